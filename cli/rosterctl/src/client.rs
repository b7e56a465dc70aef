//! HTTP client for the board document API.
//!
//! Every mutating command pushes the whole document back; the server keeps no
//! per-field state and the last arrival wins.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use roster_board::Document;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::{Config, Credentials};
use crate::error::CliError;

/// Header carrying the shared PIN.
const PIN_HEADER: &str = "x-pin";

/// API client for communicating with the board server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from config and credentials.
    pub fn new(config: &Config, credentials: Option<&Credentials>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(creds) = credentials {
            headers.insert(
                HeaderName::from_static(PIN_HEADER),
                HeaderValue::from_str(&creds.pin).context("Invalid PIN format")?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.server_url().trim_end_matches('/').to_string(),
        })
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check the PIN against the server.
    pub async fn verify(&self) -> Result<(), CliError> {
        let _: AckResponse = self.get("/api/verify").await?;
        Ok(())
    }

    /// Fetch the full board document.
    pub async fn fetch_document(&self) -> Result<Document, CliError> {
        self.get("/api/data").await
    }

    /// Replace the server-held document with a new snapshot.
    pub async fn push_document(&self, doc: &Document) -> Result<(), CliError> {
        let _: AckResponse = self.post("/api/data", doc).await?;
        Ok(())
    }

    /// Make a GET request.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, CliError> {
        let response = self.client.get(self.url(path)).send().await?;

        self.handle_response(response).await
    }

    /// Make a POST request.
    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CliError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;

        self.handle_response(response).await
    }

    /// Handle a successful or error response.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CliError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to parse response: {}", e)))
        } else {
            self.handle_error(response).await
        }
    }

    /// Handle an error response.
    async fn handle_error<T>(&self, response: reqwest::Response) -> Result<T, CliError> {
        let status = response.status().as_u16();

        // Try to parse error response
        let error_body: ApiErrorResponse =
            response.json().await.unwrap_or_else(|_| ApiErrorResponse {
                code: "unknown".to_string(),
                message: "Unknown error".to_string(),
                request_id: None,
            });

        if status == 401 {
            // The cached PIN is replayed until verification fails.
            let _ = Credentials::delete();
            return Err(CliError::NotAuthenticated);
        }

        Err(CliError::api(
            status,
            error_body.code,
            error_body.message,
            error_body.request_id,
        ))
    }
}

#[derive(Debug, Deserialize)]
struct AckResponse {
    #[allow(dead_code)]
    success: bool,
}

/// API error response structure.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    code: String,
    message: String,
    #[serde(default)]
    request_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let config = Config::default();
        let client = ApiClient::new(&config, None).unwrap();
        assert!(client.url("/api/data").contains("/api/data"));
    }
}
