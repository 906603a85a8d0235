//! HTTP client for the product catalog endpoint

use std::time::Duration;

use reqwest::{Client, Url};
use tokio_util::sync::CancellationToken;

use super::error::FetchError;
use super::models::Product;

/// Client for a product catalog endpoint
///
/// Each fetch is a single GET with no retries.
#[derive(Debug, Clone)]
pub struct ProductClient {
    /// HTTP client
    client: Client,
    /// Endpoint returning a JSON array of products
    endpoint: Url,
}

impl ProductClient {
    /// Public demo catalog
    pub const DEFAULT_ENDPOINT: &'static str = "https://fakestoreapi.com/products";
    /// Upper bound for one request
    const TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a client for the given endpoint URL
    pub fn new(endpoint: &str) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(Self::TIMEOUT).build()?;
        Self::with_client(client, endpoint)
    }

    /// Create a client reusing an existing HTTP client
    pub fn with_client(client: Client, endpoint: &str) -> Result<Self, FetchError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| FetchError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Fetch the full product list
    pub async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http { status: status.as_u16() });
        }

        let body = response.text().await?;
        let products: Vec<Product> = serde_json::from_str(&body)?;
        tracing::info!("Fetched {} products from {}", products.len(), self.endpoint);
        Ok(products)
    }

    /// Fetch the product list, giving up as soon as `cancel_token` fires
    pub async fn fetch_until_cancelled(
        &self,
        cancel_token: CancellationToken,
    ) -> Result<Vec<Product>, FetchError> {
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => Err(FetchError::Cancelled),
            result = self.fetch_products() => result,
        }
    }
}
