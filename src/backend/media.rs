use serde::Serialize;

use crate::error::{ClayCeoError, Result};
use crate::media::EncodedImage;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum AnthropicContentBlock {
    Text { text: String },
    Image { source: AnthropicImageSource },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum AnthropicImageSource {
    Base64 { media_type: String, data: String },
}

/// Image block first, then the instruction, as Anthropic recommends for vision prompts.
pub(crate) fn build_anthropic_vision_content(
    image: &EncodedImage,
    instruction: &str,
) -> Result<Vec<AnthropicContentBlock>> {
    if image.data().is_empty() {
        return Err(ClayCeoError::ConfigError(
            "image data cannot be empty".to_string(),
        ));
    }
    if image.media_type().is_empty() {
        return Err(ClayCeoError::ConfigError(
            "image media type cannot be empty".to_string(),
        ));
    }

    let mut blocks = vec![AnthropicContentBlock::Image {
        source: AnthropicImageSource::Base64 {
            media_type: image.media_type().to_string(),
            data: image.data().to_string(),
        },
    }];
    if !instruction.is_empty() {
        blocks.push(AnthropicContentBlock::Text {
            text: instruction.to_string(),
        });
    }
    Ok(blocks)
}
