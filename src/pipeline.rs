//! The analysis pipeline: load the picture, extract attributes, compose the prompt.

use std::path::Path;

use tracing::{info, instrument};

use crate::analysis::{AttributeExtractor, AttributeRecord};
use crate::backend::VisionModel;
use crate::error::Result;
use crate::media::EncodedImage;
use crate::prompt::{PromptComposer, PromptString};

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub record: AttributeRecord,
    pub prompt: PromptString,
}

/// Loader → extractor → composer, wired for a single vision collaborator.
///
/// Runs are independent: the pipeline keeps no state between calls, so the same
/// picture and the same model reply always give the same prompt.
///
/// ```no_run
/// use clayceo::{AnthropicClient, CharacterPipeline};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pipeline = CharacterPipeline::new(AnthropicClient::from_env()?);
/// let output = pipeline.analyze("pfp.jpg").await?;
/// println!("{}", output.prompt);
/// # Ok(())
/// # }
/// ```
pub struct CharacterPipeline<V> {
    extractor: AttributeExtractor<V>,
    composer: PromptComposer,
}

impl<V: VisionModel> CharacterPipeline<V> {
    pub fn new(vision: V) -> Self {
        Self::with_parts(AttributeExtractor::new(vision), PromptComposer::default())
    }

    pub fn with_parts(extractor: AttributeExtractor<V>, composer: PromptComposer) -> Self {
        Self {
            extractor,
            composer,
        }
    }

    pub fn composer(&self) -> &PromptComposer {
        &self.composer
    }

    #[instrument(name = "pipeline_analyze", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn analyze(&self, path: impl AsRef<Path>) -> Result<PipelineOutput> {
        let image = EncodedImage::from_path(path)?;
        self.analyze_image(&image).await
    }

    /// Same as [`analyze`](Self::analyze) for an already-encoded image.
    pub async fn analyze_image(&self, image: &EncodedImage) -> Result<PipelineOutput> {
        let record = self.extractor.extract(image).await?;
        info!(
            hair_color = ?record.hair_color,
            hair_style = ?record.hair_style,
            dominant_colors = ?record.dominant_colors,
            accessories = ?record.accessories,
            quirky_feature = ?record.quirky_feature,
            skin_tone = ?record.skin_tone,
            vibe = ?record.vibe,
            suit_color = ?record.suit_color,
            tie_color = ?record.tie_color,
            "Analysis complete"
        );

        let prompt = self.composer.compose(&record);
        info!(prompt = %prompt, "Composed character prompt");

        Ok(PipelineOutput { record, prompt })
    }
}
