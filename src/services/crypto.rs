// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Crypto database browsing and search.

use crate::error::AppError;
use crate::models::crypto::{RawCoin, SearchRequest};
use crate::models::{CoinSnapshot, SearchHit};
use crate::services::api_client::{segment, ApiClient};
use crate::session::SessionContext;
use futures_util::stream::{self, StreamExt};

#[derive(Clone)]
pub struct CryptoService {
    api: ApiClient,
    /// Upper bound on market-data requests in flight for one search.
    concurrency: usize,
}

impl CryptoService {
    pub fn new(api: ApiClient, concurrency: usize) -> Self {
        Self {
            api,
            concurrency: concurrency.max(1),
        }
    }

    /// Every coin in the saved-crypto database.
    pub async fn saved_cryptos(&self, ctx: &SessionContext) -> Result<Vec<CoinSnapshot>, AppError> {
        let coins: Option<Vec<RawCoin>> = self.api.get(ctx, "/crypto/saved-cryptos").await?;
        Ok(coins
            .unwrap_or_default()
            .into_iter()
            .map(CoinSnapshot::from)
            .collect())
    }

    /// Saved coins whose name or symbol contains `filter`.
    pub async fn filtered_cryptos(
        &self,
        ctx: &SessionContext,
        filter: Option<&str>,
    ) -> Result<Vec<CoinSnapshot>, AppError> {
        let coins = self.saved_cryptos(ctx).await?;
        Ok(match filter {
            Some(needle) => coins.into_iter().filter(|c| c.matches(needle)).collect(),
            None => coins,
        })
    }

    /// Search coins and resolve market data for each hit.
    ///
    /// Market data is fetched with at most `concurrency` requests in flight,
    /// results keep the order of the hits, and hits whose market data fails
    /// are dropped. Dropping the returned future cancels outstanding requests.
    pub async fn search(
        &self,
        ctx: &SessionContext,
        query: &str,
    ) -> Result<Vec<CoinSnapshot>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation("Search query is required".to_string()));
        }

        let hits: Option<Vec<SearchHit>> = self
            .api
            .post(ctx, "/crypto/search", &SearchRequest { query })
            .await?;
        let hits = hits.unwrap_or_default();
        if hits.is_empty() {
            tracing::debug!(query, "Search returned no hits");
            return Ok(Vec::new());
        }

        let total_hits = hits.len();
        let results: Vec<Option<CoinSnapshot>> = stream::iter(hits)
            .map(|hit| self.market_data(ctx, hit.id))
            .buffered(self.concurrency)
            .collect()
            .await;

        // A 401 part-way through already cleared the session.
        if ctx.token().is_none() {
            return Err(AppError::Unauthorized);
        }

        let coins: Vec<CoinSnapshot> = results.into_iter().flatten().collect();
        tracing::info!(
            query,
            hits = total_hits,
            resolved = coins.len(),
            "Search completed"
        );
        Ok(coins)
    }

    /// Market data for one coin; failures are logged and yield `None`.
    async fn market_data(&self, ctx: &SessionContext, crypto_id: String) -> Option<CoinSnapshot> {
        let path = format!("/crypto/search/market/{}", segment(&crypto_id));
        match self.api.get::<RawCoin>(ctx, &path).await {
            Ok(raw) => {
                let mut coin = CoinSnapshot::from(raw);
                if coin.crypto_id.is_empty() {
                    coin.crypto_id = crypto_id;
                }
                Some(coin)
            }
            Err(e) => {
                tracing::warn!(crypto_id = %crypto_id, error = %e, "Dropping search hit without market data");
                None
            }
        }
    }
}
