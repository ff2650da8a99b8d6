use crate::errors::AppError;
use std::time::Duration;

/// Client for the external CPF lookup API.
///
/// One blocking round trip per consultation, no retries. The access
/// token travels as a query parameter but is redacted from every log
/// line.
#[derive(Clone)]
pub struct CpfLookupClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl CpfLookupClient {
    /// Creates a new `CpfLookupClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the lookup API.
    /// * `token` - The API token for authentication.
    pub fn new(base_url: String, token: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::Internal(format!("Failed to create lookup client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Consults a CPF against the external API and returns the raw
    /// JSON payload.
    ///
    /// Non-2xx answers are surfaced as [`AppError::Upstream`] carrying
    /// the original status and body so the proxy endpoint can relay
    /// them verbatim.
    pub async fn consultar(&self, cpf: &str) -> Result<serde_json::Value, AppError> {
        // Build URL with proper parameter encoding for the token
        let url = reqwest::Url::parse_with_params(
            &format!("{}/cpf/{}", self.base_url, cpf),
            &[("token", self.token.as_str())],
        )
        .map_err(|e| AppError::Internal(format!("Failed to build lookup URL: {}", e)))?;

        tracing::info!("Consulting lookup API for CPF: {}", cpf);
        tracing::debug!(
            "Lookup URL: {}/cpf/{}?token=[REDACTED]",
            self.base_url,
            cpf
        );

        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::Internal(format!("Lookup request failed: {}", e))
        })?;

        let status = response.status();
        tracing::info!("Lookup API answered with status {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Upstream {
                status: status.as_u16(),
                details: error_text,
            });
        }

        let data: serde_json::Value = response.json().await.map_err(|e| {
            AppError::Parse(format!("Failed to parse lookup response: {}", e))
        })?;

        tracing::debug!("Lookup payload received for CPF {}", cpf);
        Ok(data)
    }
}
