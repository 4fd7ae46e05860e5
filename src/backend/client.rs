use async_trait::async_trait;

use crate::error::Result;
use crate::generation::GeneratedImage;
use crate::media::EncodedImage;

/// A vision-capable model that can describe an image.
///
/// This is the seam between the analysis pipeline and whatever provider answers
/// it. Implementations send one request per call and return the model's raw text;
/// parsing happens in [`AttributeExtractor`](crate::AttributeExtractor).
///
/// The library ships `AnthropicClient`. Anything else (another provider, a
/// local model, a canned response in tests) just needs this trait:
///
/// ```
/// use async_trait::async_trait;
/// use clayceo::{EncodedImage, Result, VisionModel};
///
/// struct Canned(&'static str);
///
/// #[async_trait]
/// impl VisionModel for Canned {
///     async fn describe(&self, _image: &EncodedImage, _instruction: &str) -> Result<String> {
///         Ok(self.0.to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Send `image` and `instruction`, return the reply text.
    ///
    /// Transport failures are returned unchanged; no retry is attempted.
    async fn describe(&self, image: &EncodedImage, instruction: &str) -> Result<String>;
}

#[async_trait]
impl<T: VisionModel + ?Sized> VisionModel for &T {
    async fn describe(&self, image: &EncodedImage, instruction: &str) -> Result<String> {
        (**self).describe(image, instruction).await
    }
}

#[async_trait]
impl<T: VisionModel + ?Sized> VisionModel for Box<T> {
    async fn describe(&self, image: &EncodedImage, instruction: &str) -> Result<String> {
        (**self).describe(image, instruction).await
    }
}

/// A text-to-image service.
///
/// Generation parameters (style, model, steps...) belong to the implementation's
/// configuration; callers only pass the prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Vec<GeneratedImage>>;
}
