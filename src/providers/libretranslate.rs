/*!
 * LibreTranslate API client.
 *
 * Speaks the LibreTranslate REST protocol: POST `/translate` with
 * `{q, source, target, format}` returning `{"translatedText": ...}`, and
 * GET `/languages` for the supported-pair listing used at session setup.
 */

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::TranslationBackend;

/// Request body for the `/translate` endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TranslateRequest {
    /// Text to translate
    pub q: String,
    /// Source language code
    pub source: String,
    /// Target language code
    pub target: String,
    /// Payload format, always "text" for catalog strings
    pub format: String,
    /// API key, omitted when the instance is open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Response body of the `/translate` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponse {
    /// Translated text
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

/// One entry of the `/languages` listing
#[derive(Debug, Clone, Deserialize)]
pub struct BackendLanguage {
    /// Language code the backend understands
    pub code: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Target codes reachable from this source; empty means unrestricted
    #[serde(default)]
    pub targets: Vec<String>,
}

/// Client for a LibreTranslate-compatible translation server
#[derive(Debug, Clone)]
pub struct LibreTranslate {
    base_url: String,
    api_key: Option<String>,
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl LibreTranslate {
    /// Create a new client with retry configuration
    pub fn new_with_config(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Self {
        let base_url = endpoint.into().trim_end_matches('/').to_string();

        Self {
            base_url,
            api_key,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                // Keep connections alive across the many small per-leaf requests
                .pool_idle_timeout(Duration::from_secs(90))
                .tcp_keepalive(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            max_retries,
            backoff_base_ms,
        }
    }

    /// Create a client with default retry settings
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::new_with_config(endpoint, None, 30, 3, 1000)
    }

    /// List the languages the backend serves
    pub async fn supported_languages(&self) -> Result<Vec<BackendLanguage>, ProviderError> {
        let url = format!("{}/languages", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<Vec<BackendLanguage>>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// POST one translation request, retrying transient failures.
    ///
    /// Server errors and network errors are retried with exponential backoff;
    /// client errors fail immediately (they will not get better on retry).
    async fn request_translation(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslateResponse, ProviderError> {
        let url = format!("{}/translate", self.base_url);

        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            let response_result = self.client.post(&url).json(request).send().await;

            match response_result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response
                            .json::<TranslateResponse>()
                            .await
                            .map_err(|e| ProviderError::ParseError(e.to_string()));
                    } else if status.is_server_error() {
                        // Server error - can retry
                        let message = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Failed to get error response text".to_string());
                        error!(
                            "Translation API error ({}): {} - attempt {}/{}",
                            status,
                            message,
                            attempt + 1,
                            self.max_retries + 1
                        );
                        last_error = Some(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message,
                        });
                    } else {
                        // Client error - don't retry
                        let message = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Failed to get error response text".to_string());
                        return Err(match status.as_u16() {
                            401 | 403 => ProviderError::AuthenticationError(message),
                            _ => ProviderError::ApiError {
                                status_code: status.as_u16(),
                                message,
                            },
                        });
                    }
                }
                Err(e) => {
                    // Network error - can retry
                    error!(
                        "Translation API network error: {} - attempt {}/{}",
                        e,
                        attempt + 1,
                        self.max_retries + 1
                    );
                    last_error = Some(ProviderError::ConnectionError(e.to_string()));
                }
            }

            attempt += 1;

            if attempt <= self.max_retries {
                let backoff_ms = self.backoff_base_ms * (1u64 << (attempt - 1));
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ProviderError::RequestFailed(format!(
                "Translation request failed after {} attempts",
                self.max_retries + 1
            ))
        }))
    }
}

#[async_trait]
impl TranslationBackend for LibreTranslate {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let request = TranslateRequest {
            q: text.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            format: "text".to_string(),
            api_key: self.api_key.clone(),
        };

        let response = self.request_translation(&request).await?;
        Ok(response.translated_text)
    }

    async fn verify_pair(&self, source: &str, target: &str) -> Result<(), ProviderError> {
        let languages = self.supported_languages().await?;

        let source_entry = languages
            .iter()
            .find(|lang| lang.code == source)
            .ok_or_else(|| ProviderError::UnsupportedLanguagePair {
                src_lang: source.to_string(),
                target: target.to_string(),
            })?;

        let target_served = if source_entry.targets.is_empty() {
            languages.iter().any(|lang| lang.code == target)
        } else {
            source_entry.targets.iter().any(|code| code == target)
        };

        if !target_served {
            return Err(ProviderError::UnsupportedLanguagePair {
                src_lang: source.to_string(),
                target: target.to_string(),
            });
        }

        Ok(())
    }
}
