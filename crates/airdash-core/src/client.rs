//! HTTP client for the air-quality REST API.
//!
//! This module provides a client for the remote station API: fetching the
//! reading list, authenticating, subscribing to notifications, and
//! submitting new readings.
//!
//! The client holds an optional bearer token. Fetching works with or
//! without one; subscribing requires one. Response ordering from the API is
//! not guaranteed, so consumers scan the returned list rather than assume
//! it is sorted.
//!
//! # Example
//!
//! ```no_run
//! use airdash_core::client::ApiClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new("http://localhost:5154")?;
//!
//! let readings = client.fetch_readings().await?;
//! println!("Fetched {} readings", readings.len());
//!
//! let auth = client.login("user@example.com", "secret").await?;
//! let client = client.with_token(auth.token);
//! client.subscribe("user@example.com").await?;
//! Ok(())
//! # }
//! ```

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use airdash_types::Reading;

/// HTTP client for the air-quality API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

// ==========================================================================
// Request / Response Types
// ==========================================================================

/// Credentials for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Bearer token issued by the API on successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    /// The bearer token to attach to subsequent requests.
    pub token: String,
}

/// Body for `POST /api/notifications/subscribe`.
#[derive(Debug, Clone, Serialize)]
struct SubscribeRequest<'a> {
    email: &'a str,
}

/// A new reading to submit to the API.
///
/// Two submission schemas exist in the API's history (compact camelCase
/// field names and underscored ones); this client implements the camelCase
/// schema, which matches the shape the API serves back from
/// `GET /api/AirQuality`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReading {
    /// When the sample was taken.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: time::OffsetDateTime,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity percentage.
    pub humidity: f64,
    /// CO2 concentration in ppm.
    pub co2_ppm: f64,
    /// NH3 concentration in ppm.
    pub nh3_ppm: f64,
    /// Benzene concentration in ppm.
    pub benzene_ppm: f64,
    /// LPG concentration in ppm.
    pub lpg_ppm: f64,
    /// CO concentration in ppm.
    pub co_ppm: f64,
}

// ==========================================================================
// ApiClient Implementation
// ==========================================================================

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the station API (e.g., "http://localhost:5154")
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] when the URL does not use an http(s)
    /// scheme, or [`Error::Http`] when the underlying client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: std::time::Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Create a client with a custom reqwest Client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Attach a bearer token for authenticated requests.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the client holds a bearer token.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Fetch the full reading list.
    ///
    /// One call per refresh cycle; the bearer token is attached when held.
    /// The returned order is whatever the API produced.
    pub async fn fetch_readings(&self) -> Result<Vec<Reading>> {
        let url = format!("{}/api/AirQuality", self.base_url);
        let readings: Vec<Reading> = self.get(&url).await?;
        tracing::debug!(count = readings.len(), "fetched readings");
        Ok(readings)
    }

    /// Authenticate and obtain a bearer token.
    ///
    /// The token is returned, not stored; call [`with_token`](Self::with_token)
    /// to use it.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthToken> {
        let url = format!("{}/api/auth/login", self.base_url);
        self.post_json(&url, &LoginRequest { email, password })
            .await
    }

    /// Subscribe an email address to threshold notifications.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when no bearer token is held; the
    /// API rejects unauthenticated subscriptions.
    pub async fn subscribe(&self, email: &str) -> Result<()> {
        if self.token.is_none() {
            return Err(Error::invalid_config(
                "subscribing requires a bearer token; log in first",
            ));
        }
        let url = format!("{}/api/notifications/subscribe", self.base_url);
        self.post_json_unit(&url, &SubscribeRequest { email })
            .await
    }

    /// Submit a new reading to the station.
    pub async fn submit_reading(&self, reading: &NewReading) -> Result<()> {
        let url = format!("{}/api/AirQuality", self.base_url);
        self.post_json_unit(&url, reading).await
    }

    // ======================================================================
    // Internal HTTP helpers
    // ======================================================================

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.to_string(),
                source: e,
            })?;

        handle_response(response).await
    }

    async fn post_json<T: serde::de::DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .authorize(self.client.post(url))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.to_string(),
                source: e,
            })?;

        handle_response(response).await
    }

    async fn post_json_unit<B: Serialize>(&self, url: &str, body: &B) -> Result<()> {
        let response = self
            .authorize(self.client.post(url))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::api(status.as_u16(), error_message(response, status).await))
        }
    }
}

/// Normalize a base URL: strip the trailing slash, require an http(s) scheme.
fn normalize_base_url(base_url: &str) -> Result<String> {
    let base_url = base_url.trim_end_matches('/').to_string();

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(Error::InvalidUrl(format!(
            "URL must start with http:// or https://, got: {}",
            base_url
        )));
    }

    Ok(base_url)
}

async fn handle_response<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        response.json().await.map_err(Error::Http)
    } else {
        Err(Error::api(status.as_u16(), error_message(response, status).await))
    }
}

/// Extract the `error` field from an error body, falling back to the status line.
async fn error_message(response: reqwest::Response, status: reqwest::StatusCode) -> String {
    response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| status.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Date, Month};

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new("http://localhost:5154");
        assert!(client.is_ok());

        let client = client.unwrap();
        assert_eq!(client.base_url(), "http://localhost:5154");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_client_normalizes_url() {
        let client = ApiClient::new("http://localhost:5154/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5154");
    }

    #[test]
    fn test_client_invalid_url() {
        let result = ApiClient::new("localhost:5154");
        assert!(result.is_err());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_with_token() {
        let client = ApiClient::new("https://station.example.com")
            .unwrap()
            .with_token("abc123");
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_auth_token_deserializes() {
        let auth: AuthToken = serde_json::from_str(r#"{"token": "abc123"}"#).unwrap();
        assert_eq!(auth.token, "abc123");
    }

    #[test]
    fn test_new_reading_serializes_camel_case() {
        let reading = NewReading {
            timestamp: Date::from_calendar_date(2026, Month::March, 5)
                .unwrap()
                .with_hms(9, 12, 0)
                .unwrap()
                .assume_utc(),
            temperature: 21.4,
            humidity: 38.0,
            co2_ppm: 720.0,
            nh3_ppm: 12.0,
            benzene_ppm: 0.03,
            lpg_ppm: 410.0,
            co_ppm: 2.1,
        };

        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains("\"co2Ppm\":720.0"));
        assert!(json.contains("\"benzenePpm\":0.03"));
        assert!(json.contains("\"timestamp\":\"2026-03-05T09:12:00Z\""));
        // No underscored field names from the older schema.
        assert!(!json.contains("co2_ppm"));
    }

    #[tokio::test]
    async fn test_subscribe_without_token_fails_locally() {
        let client = ApiClient::new("http://localhost:5154").unwrap();
        let result = client.subscribe("user@example.com").await;
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
