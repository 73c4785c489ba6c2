//! External BIN-lookup service client.
//!
//! The second resolution tier: an HTTPS GET against a third-party BIN
//! service, keyed by an API header. Every failure mode here (transport
//! error, timeout, non-success HTTP status, explicit failure status in the
//! body, unparseable body) is recoverable by design; the resolver falls
//! through to the offline tier instead of surfacing an error.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::details::CardDetails;
use crate::error::LookupError;
use crate::scheme::CardScheme;

/// Default base URL of the Handy API BIN service.
pub const DEFAULT_BASE_URL: &str = "https://data.handyapi.com";

/// Bounded timeout applied to each lookup request.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(8);

/// Trait for external BIN-lookup backends.
///
/// Abstracting the network call keeps the resolver testable: tests inject a
/// mock that counts invocations to assert the cache actually short-circuits.
#[async_trait]
pub trait BinLookupService: Send + Sync {
    /// Resolves a 6-digit BIN against the external service.
    async fn lookup(&self, bin: &str) -> Result<CardDetails, LookupError>;
}

/// Wire shape of a Handy API response body.
#[derive(Debug, Deserialize)]
struct HandyApiResponse {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Scheme")]
    scheme: Option<String>,
    #[serde(rename = "Type")]
    card_type: Option<String>,
    #[serde(rename = "Issuer")]
    issuer: Option<String>,
    #[serde(rename = "CardTier")]
    card_tier: Option<String>,
    #[serde(rename = "Country")]
    country: Option<HandyApiCountry>,
    #[serde(rename = "Luhn")]
    luhn: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct HandyApiCountry {
    #[serde(rename = "Name")]
    name: Option<String>,
}

impl HandyApiResponse {
    /// Maps the service's fields onto the resolver's output shape.
    fn into_details(self) -> CardDetails {
        CardDetails {
            bank_name: self.issuer,
            card_type: self.card_type.map(|t| t.to_lowercase()),
            scheme: self.scheme.as_deref().map(CardScheme::from_name),
            country: self.country.and_then(|c| c.name),
            is_valid: self.luhn,
            card_tier: self.card_tier,
        }
    }
}

/// HTTP client for the Handy API BIN-lookup service.
///
/// # Example
///
/// ```rust,ignore
/// use bin_resolver::remote::{BinLookupService, HandyApiClient};
///
/// let client = HandyApiClient::new("my-api-key")?;
/// let details = client.lookup("411111").await?;
/// ```
pub struct HandyApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HandyApiClient {
    /// Creates a client against the default service URL.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LookupError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL. Used by tests and
    /// self-hosted mirrors.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, LookupError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LookupError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl BinLookupService for HandyApiClient {
    async fn lookup(&self, bin: &str) -> Result<CardDetails, LookupError> {
        let url = format!("{}/bin/{}", self.base_url, bin);

        let response = self
            .http
            .get(&url)
            .header("x-api-key", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(bin, status = status.as_u16(), "BIN lookup service error");
            return Err(LookupError::Status(status.as_u16()));
        }

        let body: HandyApiResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))?;

        if body.status != "SUCCESS" {
            tracing::warn!(bin, status = %body.status, "BIN lookup returned non-success");
            return Err(LookupError::Failed(body.status));
        }

        Ok(body.into_details())
    }
}
