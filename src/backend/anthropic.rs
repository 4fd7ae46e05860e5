use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace};

use crate::backend::media::{AnthropicContentBlock, build_anthropic_vision_content};
use crate::backend::utils::{
    api_key_from_env, build_http_client, check_response_status, handle_http_error,
    validate_api_key,
};
use crate::backend::VisionModel;
use crate::error::{ClayCeoError, Result};
use crate::media::EncodedImage;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 500;

/// Claude models with vision support.
///
/// Any other model id can be used through `Custom` or `FromStr`:
///
/// ```rust
/// use clayceo::AnthropicModel;
/// use std::str::FromStr;
///
/// let model = AnthropicModel::from_str("claude-custom").unwrap();
/// assert_eq!(model, AnthropicModel::Custom("claude-custom".to_string()));
/// assert_eq!(AnthropicModel::from("claude-sonnet-4-20250514"), AnthropicModel::ClaudeSonnet4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnthropicModel {
    /// Claude Sonnet 4 (default for profile analysis)
    ClaudeSonnet4,
    /// Claude Sonnet 4.5
    ClaudeSonnet45,
    /// Claude Opus 4.1
    ClaudeOpus41,
    /// Claude Haiku 4.5 (fastest)
    ClaudeHaiku45,
    /// Claude Haiku 3.5
    Claude35Haiku,
    /// Custom model name (for new models or Anthropic-compatible endpoints)
    Custom(String),
}

impl AnthropicModel {
    pub fn as_str(&self) -> &str {
        match self {
            AnthropicModel::ClaudeSonnet4 => "claude-sonnet-4-20250514",
            AnthropicModel::ClaudeSonnet45 => "claude-sonnet-4-5-20250929",
            AnthropicModel::ClaudeOpus41 => "claude-opus-4-1-20250805",
            AnthropicModel::ClaudeHaiku45 => "claude-haiku-4-5-20251001",
            AnthropicModel::Claude35Haiku => "claude-3-5-haiku-20241022",
            AnthropicModel::Custom(name) => name,
        }
    }

    /// Known ids map to their variant, anything else becomes `Custom`.
    pub fn from_string(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.as_str() {
            "claude-sonnet-4-20250514" => AnthropicModel::ClaudeSonnet4,
            "claude-sonnet-4-5-20250929" => AnthropicModel::ClaudeSonnet45,
            "claude-opus-4-1-20250805" => AnthropicModel::ClaudeOpus41,
            "claude-haiku-4-5-20251001" => AnthropicModel::ClaudeHaiku45,
            "claude-3-5-haiku-20241022" => AnthropicModel::Claude35Haiku,
            _ => AnthropicModel::Custom(name),
        }
    }
}

impl FromStr for AnthropicModel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(AnthropicModel::from_string(s))
    }
}

impl From<&str> for AnthropicModel {
    fn from(s: &str) -> Self {
        AnthropicModel::from_string(s)
    }
}

impl From<String> for AnthropicModel {
    fn from(s: String) -> Self {
        AnthropicModel::from_string(s)
    }
}

/// Configuration for the Anthropic client
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub model: AnthropicModel,
    pub max_tokens: u32,
    /// Sampling temperature; the API default applies when unset
    pub temperature: Option<f32>,
    pub timeout: Option<Duration>,
    /// Defaults to "https://api.anthropic.com/v1" if not set
    pub base_url: Option<String>,
}

impl AnthropicConfig {
    fn with_key(api_key: String) -> Self {
        Self {
            api_key,
            model: AnthropicModel::ClaudeSonnet4,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
            timeout: None,
            base_url: None,
        }
    }
}

/// Anthropic Messages API client, used as the [`VisionModel`] for profile analysis.
pub struct AnthropicClient {
    config: AnthropicConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: Vec<AnthropicContentBlock>,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageInfo {
    input_tokens: u64,
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<UsageInfo>,
}

impl CompletionResponse {
    /// Text of the first `text` block.
    fn first_text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text.as_deref())
    }
}

impl AnthropicClient {
    /// Create a new Anthropic client with the provided API key.
    ///
    /// ```no_run
    /// # use clayceo::AnthropicClient;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AnthropicClient::new("your-anthropic-api-key")?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "anthropic_client_new", skip(api_key))]
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = validate_api_key(api_key.into(), "Anthropic")?;
        info!("Creating new Anthropic client");
        Ok(Self {
            config: AnthropicConfig::with_key(api_key),
            client: reqwest::Client::new(),
        })
    }

    /// Create a client from `ANTHROPIC_API_KEY` (a `.env` file is loaded first if present).
    #[instrument(name = "anthropic_client_from_env")]
    pub fn from_env() -> Result<Self> {
        let api_key = api_key_from_env("ANTHROPIC_API_KEY", "Anthropic")?;
        info!("Creating new Anthropic client from environment variable");
        Ok(Self {
            config: AnthropicConfig::with_key(api_key),
            client: reqwest::Client::new(),
        })
    }

    /// Build from a complete configuration.
    pub fn from_config(config: AnthropicConfig) -> Result<Self> {
        let api_key = validate_api_key(config.api_key, "Anthropic")?;
        let config = AnthropicConfig { api_key, ..config };
        let client = build_http_client(config.timeout);
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &AnthropicConfig {
        &self.config
    }

    /// Set the model to use
    #[instrument(skip(self))]
    pub fn model(mut self, model: impl Into<AnthropicModel> + std::fmt::Debug) -> Self {
        let model = model.into();
        debug!(
            previous_model = ?self.config.model,
            new_model = ?model,
            "Setting Anthropic model"
        );
        self.config.model = model;
        self
    }

    /// Set the maximum tokens to generate (at least 1)
    #[instrument(skip(self))]
    pub fn max_tokens(mut self, max: u32) -> Self {
        debug!(
            previous_max = self.config.max_tokens,
            new_max = max,
            "Setting max_tokens"
        );
        self.config.max_tokens = max.max(1);
        self
    }

    /// Set the sampling temperature (0.0 to 1.0, lower = more deterministic)
    #[instrument(skip(self))]
    pub fn temperature(mut self, temp: f32) -> Self {
        debug!(
            previous_temp = ?self.config.temperature,
            new_temp = temp,
            "Setting temperature"
        );
        self.config.temperature = Some(temp);
        self
    }

    fn build_request(&self, image: &EncodedImage, instruction: &str) -> Result<CompletionRequest> {
        Ok(CompletionRequest {
            model: self.config.model.as_str().to_string(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: build_anthropic_vision_content(image, instruction)?,
            }],
        })
    }
}

crate::impl_client_builder_methods! {
    client_type: AnthropicClient,
    provider_name: "Anthropic"
}

#[async_trait]
impl VisionModel for AnthropicClient {
    #[instrument(
        name = "anthropic_describe",
        skip(self, image, instruction),
        fields(
            model = %self.config.model.as_str(),
            media_type = %image.media_type(),
            instruction_len = instruction.len()
        )
    )]
    async fn describe(&self, image: &EncodedImage, instruction: &str) -> Result<String> {
        info!("Requesting image description from Anthropic");

        let request = self.build_request(image, instruction)?;
        let base_url = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let url = format!("{}/messages", base_url);
        debug!(
            url = %url,
            max_tokens = request.max_tokens,
            "Sending request to Anthropic API"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| handle_http_error(e, "Anthropic"))?;

        let response = check_response_status(response, "Anthropic").await?;

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse JSON response from Anthropic");
            handle_http_error(e, "Anthropic")
        })?;

        if let Some(usage) = &completion.usage {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "Anthropic token usage"
            );
        }

        match completion.first_text() {
            Some(text) => {
                trace!(text = %text, "Anthropic response text");
                Ok(text.to_string())
            }
            None => {
                error!("No text content in Anthropic response");
                Err(ClayCeoError::UnexpectedResponse(
                    "Anthropic response contained no text content".to_string(),
                ))
            }
        }
    }
}
