//! Attribute extraction: ask a vision model about a profile picture and parse
//! its answer into an [`AttributeRecord`].

mod record;

pub use record::{AttributeRecord, SkinTone};

use tracing::{debug, error, info, instrument, trace};

use crate::backend::VisionModel;
use crate::backend::utils::extract_json_from_markdown;
use crate::error::{ClayCeoError, Result};
use crate::media::EncodedImage;

/// Instruction sent alongside the image.
pub const ANALYSIS_INSTRUCTION: &str = r#"Analyze this profile picture and extract visual attributes for creating a stylized 3D CEO character.

Look for UNIQUE and ECCENTRIC features that make this image distinctive! Unusual accessories, props, expressions, or quirky details would be fun to include.

Return ONLY a JSON object with these fields (no markdown, no explanation):

{
    "hair_color": "color or null if not visible",
    "hair_style": "style description or null if not visible",
    "dominant_colors": ["list", "of", "main", "colors"],
    "accessories": ["wearable items: caps, hats, beanies, glasses, sunglasses, earrings, headphones, chains, jewelry, etc"],
    "quirky_feature": "ONE unique/fun detail that stands out - like: blowing pink bubblegum, cigar in mouth, gold grillz, laser eyes, bandana, face tattoo, tears, tongue out, etc. null if nothing distinctive",
    "skin_tone": "if visible: white, tan, brown, or black. null if not clear or non-human",
    "vibe": "one or two words describing the mood/personality",
    "suit_color": "suggested suit color based on the palette",
    "tie_color": "suggested tie/accent color based on the palette"
}

Be creative! Find something unique that makes this character memorable. Use simple color names."#;

const EXCERPT_LEN: usize = 200;

/// Parse a vision model reply into an [`AttributeRecord`].
///
/// A reply wrapped in a single markdown code fence is unwrapped first. Anything
/// that is not then a JSON object of the right shape is an
/// [`ClayCeoError::AnalysisParseError`]; no partial record is built.
///
/// ```
/// use clayceo::parse_attribute_record;
///
/// let record = parse_attribute_record(r#"{"vibe": "smug", "accessories": ["crown"]}"#).unwrap();
/// assert_eq!(record.vibe.as_deref(), Some("smug"));
///
/// assert!(parse_attribute_record("Sorry, I can't help with that.").is_err());
/// ```
pub fn parse_attribute_record(text: &str) -> Result<AttributeRecord> {
    let json = extract_json_from_markdown(text);
    trace!(json = %json, "Parsing attribute record");

    let value: serde_json::Value = serde_json::from_str(&json).map_err(|e| {
        error!(error = %e, "Vision response is not valid JSON");
        ClayCeoError::AnalysisParseError(format!("{} (response: {})", e, excerpt(text)))
    })?;

    if !value.is_object() {
        error!("Vision response is JSON but not an object");
        return Err(ClayCeoError::AnalysisParseError(format!(
            "expected a JSON object (response: {})",
            excerpt(text)
        )));
    }

    serde_json::from_value(value).map_err(|e| {
        error!(error = %e, "Vision response has unexpected shape");
        ClayCeoError::AnalysisParseError(format!("{} (response: {})", e, excerpt(text)))
    })
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

/// Sends an image to a [`VisionModel`] and parses the reply.
///
/// Each call to [`extract`](Self::extract) makes exactly one request; nothing is cached.
pub struct AttributeExtractor<V> {
    vision: V,
    instruction: String,
}

impl<V: VisionModel> AttributeExtractor<V> {
    pub fn new(vision: V) -> Self {
        Self {
            vision,
            instruction: ANALYSIS_INSTRUCTION.to_string(),
        }
    }

    /// Replace the analysis instruction.
    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn vision(&self) -> &V {
        &self.vision
    }

    #[instrument(
        name = "extract_attributes",
        skip(self, image),
        fields(media_type = %image.media_type(), data_len = image.data().len())
    )]
    pub async fn extract(&self, image: &EncodedImage) -> Result<AttributeRecord> {
        info!("Requesting attribute analysis");
        let text = self.vision.describe(image, &self.instruction).await?;
        debug!(response_len = text.len(), "Received analysis response");
        parse_attribute_record(&text)
    }
}
