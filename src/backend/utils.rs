use crate::error::{ClayCeoError, Result};
use reqwest::Response;
use tracing::{debug, error, trace};

/// Extract JSON from markdown code blocks if present, otherwise return the content as-is.
///
/// Vision models sometimes wrap their answer in ```json ... ``` despite being told not to.
pub fn extract_json_from_markdown(content: &str) -> String {
    let trimmed = content.trim();

    if let Some(after_fence) = trimmed.strip_prefix("```") {
        let body = after_fence.strip_prefix("json").unwrap_or(after_fence);
        if let Some(end_idx) = body.find("```") {
            return body[..end_idx].trim().to_string();
        }
    }

    trimmed.to_string()
}

/// Convert a reqwest error to a ClayCeoError, handling timeout errors specially.
pub fn handle_http_error(e: reqwest::Error, provider_name: &str) -> ClayCeoError {
    error!(error = %e, "HTTP request to {} failed", provider_name);
    if e.is_timeout() {
        ClayCeoError::Timeout
    } else {
        ClayCeoError::HttpError(e)
    }
}

/// Check HTTP response status and extract error message if unsuccessful.
pub async fn check_response_status(response: Response, provider_name: &str) -> Result<Response> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await?;
        error!(
            status = %status,
            error = %error_text,
            "{} API returned error response", provider_name
        );
        return Err(ClayCeoError::ApiError(format!(
            "{} API error ({}): {}",
            provider_name, status, error_text
        )));
    }
    Ok(response)
}

/// Read an API key from the environment, loading `.env` first if one exists.
pub fn api_key_from_env(var: &str, provider_name: &str) -> Result<String> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!(path = %path.display(), "Loaded .env file");
    }
    let key = std::env::var(var).map_err(|_| {
        ClayCeoError::ConfigError(format!("{} is not set ({} API key)", var, provider_name))
    })?;
    validate_api_key(key, provider_name)
}

pub fn validate_api_key(key: String, provider_name: &str) -> Result<String> {
    if key.trim().is_empty() {
        return Err(ClayCeoError::ConfigError(format!(
            "{} API key is empty",
            provider_name
        )));
    }
    trace!("API key length: {}", key.len());
    Ok(key)
}

pub fn build_http_client(timeout: Option<std::time::Duration>) -> reqwest::Client {
    let Some(timeout) = timeout else {
        return reqwest::Client::new();
    };
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                "Failed to build reqwest client with timeout, using default"
            );
            reqwest::Client::new()
        })
}

/// Macro to generate the builder methods shared by every collaborator client.
///
/// The client must have `config: $config` with `timeout: Option<Duration>` and
/// `base_url: Option<String>` fields, and a `client: reqwest::Client`.
#[macro_export]
macro_rules! impl_client_builder_methods {
    (
        client_type: $client:ty,
        provider_name: $provider:expr
    ) => {
        impl $client {
            /// Set the timeout for HTTP requests.
            ///
            /// The timeout covers connecting and the entire request. Without one,
            /// reqwest's default (no timeout) applies.
            #[tracing::instrument(skip(self))]
            pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
                tracing::debug!(
                    previous_timeout = ?self.config.timeout,
                    new_timeout = ?timeout,
                    "Setting {} timeout", $provider
                );
                self.config.timeout = Some(timeout);
                self.client = $crate::backend::utils::build_http_client(Some(timeout));
                self
            }

            /// Set a custom base URL (without trailing slash), e.g. for a proxy or a test server.
            #[tracing::instrument(skip(self, base_url))]
            pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
                let base_url_str = base_url.into();
                tracing::debug!(
                    previous_base_url = ?self.config.base_url,
                    new_base_url = %base_url_str,
                    "Setting {} base URL", $provider
                );
                self.config.base_url = Some(base_url_str.trim_end_matches('/').to_string());
                self
            }
        }
    };
}
