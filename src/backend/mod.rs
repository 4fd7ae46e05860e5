#[cfg(feature = "anthropic")]
pub mod anthropic;
pub mod client;
#[cfg(feature = "fal")]
pub mod fal;
#[cfg(feature = "anthropic")]
mod media;
pub mod utils;

#[cfg(feature = "anthropic")]
pub use anthropic::{AnthropicClient, AnthropicConfig, AnthropicModel};
pub use client::{ImageGenerator, VisionModel};
#[cfg(feature = "fal")]
pub use fal::{FalClient, FalConfig};
