use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::backend::ImageGenerator;
use crate::backend::utils::{
    api_key_from_env, check_response_status, handle_http_error, validate_api_key,
};
use crate::error::{ClayCeoError, Result};
use crate::generation::{GeneratedImage, GenerationConfig};

const DEFAULT_BASE_URL: &str = "https://fal.run";

/// Configuration for the fal.ai client
#[derive(Debug, Clone)]
pub struct FalConfig {
    pub api_key: String,
    pub generation: GenerationConfig,
    pub timeout: Option<Duration>,
    /// Defaults to "https://fal.run" (synchronous endpoint) if not set
    pub base_url: Option<String>,
}

/// fal.ai client for rendering characters from a prompt.
///
/// ```no_run
/// # use clayceo::{ClayStyle, FalClient, GenerationConfig, ImageGenerator};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = FalClient::from_env()?
///     .generation(GenerationConfig::preset(ClayStyle::LowPoly));
/// let images = client.generate_character("male figure, black angular hair, navy suit red tie").await?;
/// println!("{}", images[0].url);
/// # Ok(())
/// # }
/// ```
pub struct FalClient {
    config: FalConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_size: Option<&'a str>,
    num_images: u32,
    enable_safety_checker: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_inference_steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    guidance_scale: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    image_urls: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    strength: Option<f32>,
}

impl<'a> GenerationRequest<'a> {
    fn new(config: &'a GenerationConfig, prompt: &'a str) -> Self {
        Self {
            prompt,
            negative_prompt: config.negative_prompt.as_deref(),
            image_size: config.image_size.as_deref(),
            num_images: config.num_images,
            enable_safety_checker: config.enable_safety_checker,
            num_inference_steps: config.num_inference_steps,
            guidance_scale: config.guidance_scale,
            seed: config.seed,
            image_urls: &config.image_urls,
            strength: config.strength,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    images: Vec<GeneratedImage>,
    #[serde(default)]
    seed: Option<u64>,
}

impl FalClient {
    #[instrument(name = "fal_client_new", skip(api_key))]
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = validate_api_key(api_key.into(), "fal")?;
        info!("Creating new fal client");
        Ok(Self::with_key(api_key))
    }

    /// Create a client from `FAL_KEY` (a `.env` file is loaded first if present).
    #[instrument(name = "fal_client_from_env")]
    pub fn from_env() -> Result<Self> {
        let api_key = api_key_from_env("FAL_KEY", "fal")?;
        info!("Creating new fal client from environment variable");
        Ok(Self::with_key(api_key))
    }

    fn with_key(api_key: String) -> Self {
        Self {
            config: FalConfig {
                api_key,
                generation: GenerationConfig::default(),
                timeout: None,
                base_url: None,
            },
            client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &FalConfig {
        &self.config
    }

    /// Replace the generation parameters (style, model, steps...).
    #[instrument(skip(self, generation), fields(model = %generation.model))]
    pub fn generation(mut self, generation: GenerationConfig) -> Self {
        debug!(
            previous_model = %self.config.generation.model,
            "Setting generation config"
        );
        self.config.generation = generation;
        self
    }

    fn endpoint(&self) -> String {
        let base_url = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!("{}/{}", base_url, self.config.generation.model)
    }

    /// Prefix the configured style prompt to `addition` and generate.
    pub async fn generate_character(&self, addition: &str) -> Result<Vec<GeneratedImage>> {
        let prompt = self.config.generation.full_prompt(addition);
        self.generate(&prompt).await
    }

    /// Fetch the bytes of a generated image.
    #[instrument(name = "fal_download", skip(self))]
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| handle_http_error(e, "fal"))?;
        let response = check_response_status(response, "fal").await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| handle_http_error(e, "fal"))?;
        debug!(byte_len = bytes.len(), "Downloaded generated image");
        Ok(bytes.to_vec())
    }
}

crate::impl_client_builder_methods! {
    client_type: FalClient,
    provider_name: "fal"
}

#[async_trait]
impl ImageGenerator for FalClient {
    #[instrument(
        name = "fal_generate",
        skip(self, prompt),
        fields(model = %self.config.generation.model, prompt_len = prompt.len())
    )]
    async fn generate(&self, prompt: &str) -> Result<Vec<GeneratedImage>> {
        let request = GenerationRequest::new(&self.config.generation, prompt);
        let url = self.endpoint();
        debug!(url = %url, "Sending request to fal");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Key {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| handle_http_error(e, "fal"))?;

        let response = check_response_status(response, "fal").await?;

        let result: GenerationResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse JSON response from fal");
            handle_http_error(e, "fal")
        })?;

        if result.images.is_empty() {
            error!("fal response contained no images");
            return Err(ClayCeoError::UnexpectedResponse(
                "fal response contained no images".to_string(),
            ));
        }

        info!(
            count = result.images.len(),
            seed = ?result.seed,
            first_url = %result.images[0].url,
            "Generated images"
        );
        Ok(result.images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ClayStyle;

    #[test]
    fn test_request_body_for_low_poly() {
        let config = GenerationConfig::preset(ClayStyle::LowPoly);
        let json = serde_json::to_value(GenerationRequest::new(&config, "p")).unwrap();
        assert_eq!(json["prompt"], "p");
        assert_eq!(json["image_size"], "square");
        assert_eq!(json["num_images"], 1);
        assert_eq!(json["enable_safety_checker"], false);
        assert_eq!(json["num_inference_steps"], 28);
        assert_eq!(json["guidance_scale"], 3.5);
        assert!(json["negative_prompt"].is_string());
        assert!(json.get("seed").is_none());
        assert!(json.get("image_urls").is_none());
        assert!(json.get("strength").is_none());
    }

    #[test]
    fn test_request_body_for_scene_edit() {
        let config = GenerationConfig::scene_edit("https://cdn.example.com/office.png");
        let json = serde_json::to_value(GenerationRequest::new(&config, "navy suit")).unwrap();
        assert_eq!(json["prompt"], "navy suit");
        assert_eq!(
            json["image_urls"],
            serde_json::json!(["https://cdn.example.com/office.png"])
        );
        assert_eq!(json["strength"], 0.75);
        assert_eq!(json["num_images"], 1);
        assert_eq!(json["enable_safety_checker"], false);
        assert!(
            json["negative_prompt"]
                .as_str()
                .is_some_and(|n| n.contains("different background"))
        );
        assert!(json.get("image_size").is_none());
        assert!(json.get("num_inference_steps").is_none());
    }

    #[test]
    fn test_scene_edit_endpoint() {
        let client = FalClient::new("key")
            .unwrap()
            .generation(GenerationConfig::scene_edit("https://cdn.example.com/office.png"));
        assert_eq!(
            client.endpoint(),
            "https://fal.run/fal-ai/bytedance/seedream/v4.5/edit"
        );
    }

    #[test]
    fn test_request_body_omits_unset_params() {
        let config = GenerationConfig::new("style", "fal-ai/flux/schnell");
        let json = serde_json::to_value(GenerationRequest::new(&config, "p")).unwrap();
        assert!(json.get("negative_prompt").is_none());
        assert!(json.get("num_inference_steps").is_none());
        assert!(json.get("guidance_scale").is_none());
    }

    #[test]
    fn test_endpoint_uses_model() {
        let client = FalClient::new("key")
            .unwrap()
            .generation(GenerationConfig::preset(ClayStyle::Chibi));
        assert_eq!(client.endpoint(), "https://fal.run/fal-ai/flux/schnell");

        let client = client.base_url("http://localhost:8080/");
        assert_eq!(client.endpoint(), "http://localhost:8080/fal-ai/flux/schnell");
    }

    #[test]
    fn test_response_parsing() {
        let response: GenerationResponse = serde_json::from_value(serde_json::json!({
            "images": [{"url": "https://cdn.fal.ai/a.png", "width": 1024, "height": 1024, "content_type": "image/png"}],
            "seed": 42,
            "has_nsfw_concepts": [false]
        }))
        .unwrap();
        assert_eq!(response.images.len(), 1);
        assert_eq!(response.images[0].width, Some(1024));
        assert_eq!(response.seed, Some(42));
    }

    #[test]
    fn test_new_rejects_empty_key() {
        assert!(matches!(FalClient::new(""), Err(ClayCeoError::ConfigError(_))));
    }
}
