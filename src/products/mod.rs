//! Product catalog endpoint integration
//!
//! Provides the HTTP client, data models and the fetch state consumed by
//! the home page.

pub mod client;
pub mod error;
pub mod models;

pub use client::ProductClient;
pub use error::FetchError;
pub use models::{FetchState, Product, Rating};
