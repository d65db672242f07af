// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory pagination of server-supplied collections.

use crate::error::AppError;
use serde::Deserialize;

pub const DEFAULT_PER_PAGE: u32 = 50;
pub const MAX_PER_PAGE: u32 = 100;

/// Query parameters selecting one page.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    /// 1-indexed page number
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

impl PageQuery {
    /// Reject page 0; everything else is clamped by [`paginate`].
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page < 1 {
            return Err(AppError::Validation(
                "Page must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

/// One page of items plus the numbers needed to render a pager.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
}

/// Slice `items` to the requested page.
///
/// `per_page` is clamped to `1..=MAX_PER_PAGE`; page 0 is rejected. Pages
/// past the end are empty.
pub fn paginate<T>(items: Vec<T>, query: PageQuery) -> Result<Page<T>, AppError> {
    query.validate()?;

    let per_page = query.per_page.clamp(1, MAX_PER_PAGE);
    let total = u32::try_from(items.len()).unwrap_or(u32::MAX);
    let total_pages = total.div_ceil(per_page);

    let start = (query.page as usize - 1)
        .checked_mul(per_page as usize)
        .ok_or_else(|| AppError::Validation("Page number causes overflow".to_string()))?;

    let items = if start < items.len() {
        items
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect()
    } else {
        Vec::new()
    };

    Ok(Page {
        items,
        page: query.page,
        per_page,
        total,
        total_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: u32, per_page: u32) -> PageQuery {
        PageQuery { page, per_page }
    }

    #[test]
    fn test_first_and_last_page() {
        let items: Vec<u32> = (1..=7).collect();

        let first = paginate(items.clone(), query(1, 3)).unwrap();
        assert_eq!(first.items, vec![1, 2, 3]);
        assert_eq!(first.total, 7);
        assert_eq!(first.total_pages, 3);

        let last = paginate(items, query(3, 3)).unwrap();
        assert_eq!(last.items, vec![7]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = paginate(vec![1, 2], query(5, 10)).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_page_zero_rejected() {
        let err = paginate(vec![1], query(0, 10)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_per_page_clamped() {
        let items: Vec<u32> = (0..250).collect();
        let page = paginate(items.clone(), query(1, 1000)).unwrap();
        assert_eq!(page.per_page, MAX_PER_PAGE);
        assert_eq!(page.items.len(), 100);

        let page = paginate(items, query(1, 0)).unwrap();
        assert_eq!(page.per_page, 1);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let page = paginate(vec![1, 2, 3], query(u32::MAX, MAX_PER_PAGE)).unwrap();
        assert!(page.items.is_empty());
    }
}
