//! clayceo: profile picture → 3D clay CEO character prompt
//!
//! # Overview
//!
//! clayceo asks a vision-capable LLM to describe a profile picture, parses the
//! answer into an [`AttributeRecord`], and composes a deterministic prompt for a
//! stylized clay CEO character. The prompt can then be rendered by an
//! image-generation service.
//!
//! Key pieces:
//! - [`EncodedImage`]: loads a picture and base64-encodes it with its media type
//! - [`AttributeExtractor`]: one request to a [`VisionModel`], strict JSON parsing
//! - [`PromptComposer`]: ordered, filtered, defaulted prompt fragments
//! - [`CharacterPipeline`]: the three above, in order
//! - `AnthropicClient` / `FalClient`: the bundled collaborators
//!
//! # Quick Start
//!
//! ```no_run
//! use clayceo::{AnthropicClient, CharacterPipeline, ClayStyle, FalClient, GenerationConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = CharacterPipeline::new(AnthropicClient::from_env()?);
//!     let output = pipeline.analyze("pfp.jpg").await?;
//!     println!("Prompt: {}", output.prompt);
//!
//!     let fal = FalClient::from_env()?.generation(GenerationConfig::preset(ClayStyle::Mannequin));
//!     let images = fal.generate_character(output.prompt.as_str()).await?;
//!     println!("Image: {}", images[0].url);
//!     Ok(())
//! }
//! ```

mod analysis;
mod backend;
mod error;
pub mod generation;
#[cfg(feature = "logging")]
pub mod logging;
mod media;
pub mod pipeline;
pub mod prompt;

// Re-exports for convenience
pub use analysis::{
    ANALYSIS_INSTRUCTION, AttributeExtractor, AttributeRecord, SkinTone, parse_attribute_record,
};
pub use error::{ClayCeoError, Result};
pub use generation::output::{next_output_path, save_image};
pub use generation::{ClayStyle, GeneratedImage, GenerationConfig};
pub use media::{EncodedImage, media_type_for_path};
pub use pipeline::{CharacterPipeline, PipelineOutput};
pub use prompt::{PromptComposer, PromptString, compose_prompt};

#[cfg(feature = "anthropic")]
pub use backend::{AnthropicClient, AnthropicConfig, AnthropicModel};

#[cfg(feature = "fal")]
pub use backend::{FalClient, FalConfig};

pub use backend::{ImageGenerator, VisionModel};
