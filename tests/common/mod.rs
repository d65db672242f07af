// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared integration test helpers.
//!
//! Each test gets its own in-process mock of the remote watchlist API on an
//! ephemeral port, plus a gateway router pointed at it.

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
    Json, Router,
};
use crypto_tracker::config::Config;
use crypto_tracker::routes::create_router;
use crypto_tracker::AppState;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Token the mock API accepts.
pub const VALID_TOKEN: &str = "valid-token";

/// Delay of each market-data call, long enough for calls to overlap.
const MARKET_DELAY: Duration = Duration::from_millis(25);

#[derive(Debug, Clone)]
pub struct MockList {
    pub id: String,
    pub name: String,
    pub cryptos: Vec<String>,
}

/// Recorded state of the mock API.
#[derive(Default)]
pub struct MockState {
    requests: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    market_calls: AtomicUsize,
    next_id: AtomicUsize,
    lists: Mutex<Vec<MockList>>,
    paths: Mutex<Vec<String>>,
}

impl MockState {
    /// Requests the mock has received.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Requests for exactly `path` (e.g. `/api/crypto/findListBy/list-1`).
    pub fn requests_to(&self, path: &str) -> usize {
        self.paths
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn market_calls(&self) -> usize {
        self.market_calls.load(Ordering::SeqCst)
    }

    pub fn lists(&self) -> Vec<MockList> {
        self.lists.lock().unwrap().clone()
    }

    /// Change a list behind the gateway's back (another device, another replica).
    pub fn remove_coin(&self, list_id: &str, crypto_id: &str) {
        let mut lists = self.lists.lock().unwrap();
        if let Some(list) = lists.iter_mut().find(|l| l.id == list_id) {
            list.cryptos.retain(|c| c != crypto_id);
        }
    }

    fn seed(&self) {
        let mut lists = self.lists.lock().unwrap();
        lists.push(MockList {
            id: "list-1".to_string(),
            name: "Majors".to_string(),
            cryptos: vec!["bitcoin".to_string(), "ethereum".to_string()],
        });
        lists.push(MockList {
            id: "list-2".to_string(),
            name: "Memes".to_string(),
            cryptos: vec!["dogecoin".to_string()],
        });
        lists.push(MockList {
            id: "list-3".to_string(),
            name: "Stable".to_string(),
            cryptos: vec!["tether".to_string()],
        });
        self.next_id.store(4, Ordering::SeqCst);
    }
}

/// Running mock API.
pub struct MockApi {
    pub base_url: String,
    pub state: Arc<MockState>,
}

/// Start the mock API on 127.0.0.1 with an ephemeral port.
pub async fn spawn_mock_api() -> MockApi {
    let state = Arc::new(MockState::default());
    state.seed();

    let app = Router::new()
        .route("/api/user/login", post(login))
        .route("/api/user/register", post(register))
        .route("/api/user/verify-email", get(verify_email))
        .route("/api/user/forgot-password", post(forgot_password))
        .route("/api/crypto/saved-cryptos", get(saved_cryptos))
        .route("/api/crypto/search", post(search))
        .route("/api/crypto/search/market/{id}", get(market))
        .route("/api/crypto/create-list", post(create_list))
        .route("/api/crypto/get-list", get(get_lists))
        .route("/api/crypto/findListBy/{id}", get(find_list))
        .route("/api/crypto/add-to-list/{id}", post(add_to_list))
        .route(
            "/api/crypto/remove-from-list/{id}/{crypto_id}",
            delete(remove_from_list),
        )
        .route("/api/crypto/delete-list/{id}", delete(delete_list))
        .layer(middleware::from_fn_with_state(state.clone(), count_requests))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockApi {
        base_url: format!("http://{}/api", addr),
        state,
    }
}

/// Create a gateway app backed by a fresh mock API.
pub async fn create_test_app() -> (Router, Arc<AppState>, MockApi) {
    create_test_app_with(|_| {}).await
}

/// Same as [`create_test_app`], with config tweaks applied first.
pub async fn create_test_app_with(tweak: impl FnOnce(&mut Config)) -> (Router, Arc<AppState>, MockApi) {
    let mock = spawn_mock_api().await;
    let mut config = Config::test_default();
    config.api_base_url = mock.base_url.clone();
    tweak(&mut config);

    let state = Arc::new(AppState::new(config).unwrap());
    (create_router(state.clone()), state, mock)
}

// ─── Request Helpers ─────────────────────────────────────────

/// Build a gateway request carrying `token` as the session cookie.
pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("ct_token={}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

// ─── Mock Handlers ───────────────────────────────────────────

type MockResponse = (StatusCode, Json<Value>);

async fn count_requests(
    State(state): State<Arc<MockState>>,
    request: Request,
    next: Next,
) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    state
        .paths
        .lock()
        .unwrap()
        .push(request.uri().path().to_string());
    next.run(request).await
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|h| h == format!("Bearer {}", VALID_TOKEN))
}

fn unauthorized() -> MockResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Token is not valid" })),
    )
}

fn ok(body: Value) -> MockResponse {
    (StatusCode::OK, Json(body))
}

/// Market data for a known coin id, in the API's market shape.
fn market_coin(id: &str) -> Value {
    let (name, symbol, price, change, cap, volume) = match id {
        "bitcoin" => ("Bitcoin", "btc", 65_000.12, 2.5, 1.28e12, 3.2e10),
        "ethereum" => ("Ethereum", "eth", 3_200.5, -1.25, 3.8e11, 1.5e10),
        "tether" => ("Tether", "usdt", 1.0, 0.01, 1.1e11, 5.0e10),
        "dogecoin" => ("Dogecoin", "doge", 0.1234, 5.5, 1.7e10, 9.0e8),
        "shiba-inu" => ("Shiba Inu", "shib", 0.000_017_23, -3.2, 1.0e10, 3.0e8),
        "wrapped-bitcoin" => ("Wrapped Bitcoin", "wbtc", 64_990.0, 2.4, 9.5e9, 2.0e8),
        other => (other, other, 10.0, 0.0, 1.0e6, 1.0e5),
    };
    json!({
        "id": id,
        "name": name,
        "symbol": symbol,
        "current_price": price,
        "price_change_percentage_24h": change,
        "market_cap": cap,
        "total_volume": volume,
        "image": format!("https://img.example/{}.png", id),
    })
}

/// The same coin as stored in the saved-crypto database.
fn saved_coin(id: &str) -> Value {
    let market = market_coin(id);
    json!({
        "_id": format!("doc-{}", id),
        "cryptoId": id,
        "name": market["name"],
        "symbol": market["symbol"],
        "current_price": market["current_price"],
        "price_change_24h": market["price_change_percentage_24h"],
        "marketCap": market["market_cap"],
        "total_volume": market["total_volume"],
        "images": { "thumb": market["image"] },
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody {
    user_name: String,
    password: String,
}

async fn login(Json(body): Json<LoginBody>) -> MockResponse {
    if body.user_name == "alice" && body.password == "secret" {
        ok(json!({
            "token": VALID_TOKEN,
            "userName": "alice",
            "email": "alice@example.com",
            "firstName": "Alice",
            "lastName": "Liddell",
        }))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
    }
}

async fn register(Json(body): Json<Value>) -> MockResponse {
    if body["userName"] == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Username already exists" })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({ "message": "User registered" })),
    )
}

async fn verify_email(Query(params): Query<HashMap<String, String>>) -> MockResponse {
    match params.get("token").map(String::as_str) {
        Some("good-token") => ok(json!({ "message": "Email verified" })),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Invalid or expired token" })),
        ),
    }
}

async fn forgot_password() -> MockResponse {
    ok(json!({ "message": "Reset email sent" }))
}

async fn saved_cryptos(headers: HeaderMap) -> MockResponse {
    if !authorized(&headers) {
        return unauthorized();
    }
    let coins: Vec<Value> = [
        "bitcoin",
        "ethereum",
        "tether",
        "dogecoin",
        "shiba-inu",
        "wrapped-bitcoin",
    ]
    .iter()
    .map(|id| saved_coin(id))
    .collect();
    ok(Value::Array(coins))
}

async fn search(headers: HeaderMap, Json(body): Json<Value>) -> MockResponse {
    if !authorized(&headers) {
        return unauthorized();
    }
    let ids: Vec<String> = match body["query"].as_str().unwrap_or_default() {
        "bit" => vec![
            "bitcoin".to_string(),
            "bitconnect".to_string(),
            "wrapped-bitcoin".to_string(),
        ],
        "many" => (0..12).map(|i| format!("coin-{}", i)).collect(),
        "expiring" => vec![
            "bitcoin".to_string(),
            "revoked".to_string(),
            "ethereum".to_string(),
        ],
        _ => Vec::new(),
    };
    ok(Value::Array(
        ids.into_iter()
            .map(|id| json!({ "id": id, "name": id }))
            .collect(),
    ))
}

async fn market(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> MockResponse {
    if !authorized(&headers) {
        return unauthorized();
    }

    state.market_calls.fetch_add(1, Ordering::SeqCst);
    let now = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.max_in_flight.fetch_max(now, Ordering::SeqCst);
    tokio::time::sleep(MARKET_DELAY).await;
    state.in_flight.fetch_sub(1, Ordering::SeqCst);

    // The token expires while the search is fanning out.
    if id == "revoked" {
        return unauthorized();
    }
    if id == "bitconnect" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Upstream market data unavailable" })),
        );
    }
    ok(market_coin(&id))
}

async fn create_list(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> MockResponse {
    if !authorized(&headers) {
        return unauthorized();
    }
    let id = format!("list-{}", state.next_id.fetch_add(1, Ordering::SeqCst));
    let list = MockList {
        id: id.clone(),
        name: body["listName"].as_str().unwrap_or_default().to_string(),
        cryptos: body["cryptoIds"]
            .as_array()
            .map(|ids| {
                ids.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default(),
    };
    let response = json!({ "_id": id, "listName": list.name, "cryptos": list.cryptos });
    state.lists.lock().unwrap().push(list);
    (StatusCode::CREATED, Json(response))
}

async fn get_lists(State(state): State<Arc<MockState>>, headers: HeaderMap) -> MockResponse {
    if !authorized(&headers) {
        return unauthorized();
    }
    let lists: Vec<Value> = state
        .lists()
        .into_iter()
        .map(|l| json!({ "_id": l.id, "listName": l.name, "cryptos": l.cryptos }))
        .collect();
    ok(Value::Array(lists))
}

async fn find_list(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> MockResponse {
    if !authorized(&headers) {
        return unauthorized();
    }
    if id == "broken" {
        return ok(json!({ "_id": "broken", "listName": "Broken" }));
    }
    let lists = state.lists();
    let Some(list) = lists.iter().find(|l| l.id == id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "List not found" })),
        );
    };
    let cryptos: Vec<Value> = list.cryptos.iter().map(|c| saved_coin(c)).collect();
    ok(json!({ "_id": list.id, "listName": list.name, "cryptos": cryptos }))
}

async fn add_to_list(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> MockResponse {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut lists = state.lists.lock().unwrap();
    let Some(list) = lists.iter_mut().find(|l| l.id == id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "List not found" })),
        );
    };
    for crypto_id in body["cryptoIds"].as_array().into_iter().flatten() {
        if let Some(crypto_id) = crypto_id.as_str() {
            // The API itself does not deduplicate.
            list.cryptos.push(crypto_id.to_string());
        }
    }
    ok(json!({ "message": "Added" }))
}

async fn remove_from_list(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path((id, crypto_id)): Path<(String, String)>,
) -> MockResponse {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut lists = state.lists.lock().unwrap();
    match lists.iter_mut().find(|l| l.id == id) {
        Some(list) => {
            list.cryptos.retain(|c| *c != crypto_id);
            ok(json!({ "message": "Removed" }))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "List not found" })),
        ),
    }
}

async fn delete_list(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> MockResponse {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut lists = state.lists.lock().unwrap();
    let before = lists.len();
    lists.retain(|l| l.id != id);
    if lists.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "List not found" })),
        );
    }
    ok(json!({ "message": "List deleted" }))
}
