//! Data models for the product catalog endpoint

use serde::{Deserialize, Serialize};

use super::error::FetchError;

/// Maximum number of stars in a rating
pub const MAX_STARS: usize = 5;

/// Customer rating of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score out of five
    pub rate: f64,
    /// Number of reviews
    pub count: u32,
}

/// A product as returned by the catalog endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Rating,
}

impl Product {
    /// Number of filled stars (the rating rounded down)
    pub fn full_stars(&self) -> usize {
        (self.rating.rate.max(0.0).floor() as usize).min(MAX_STARS)
    }

    /// Star bar such as `★★★☆☆`
    pub fn stars(&self) -> String {
        let full = self.full_stars();
        format!("{}{}", "\u{2605}".repeat(full), "\u{2606}".repeat(MAX_STARS - full))
    }

    /// Price formatted for display
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// Progress of an asynchronous fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState<T> {
    /// Request in flight
    #[default]
    Loading,
    /// Request finished with data
    Loaded(T),
    /// Request finished with an error message
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> From<Result<T, FetchError>> for FetchState<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(data) => FetchState::Loaded(data),
            Err(e) => FetchState::Failed(e.to_string()),
        }
    }
}
