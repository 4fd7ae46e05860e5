use serde::{Deserialize, Deserializer, Serialize};

/// Visual attributes extracted from a profile picture.
///
/// Every field is optional because vision models routinely leave things out.
/// The record is produced once by the extractor and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    #[serde(default)]
    pub hair_color: Option<String>,
    #[serde(default)]
    pub hair_style: Option<String>,
    #[serde(default, deserialize_with = "non_null_strings")]
    pub dominant_colors: Vec<String>,
    #[serde(default, deserialize_with = "non_null_strings")]
    pub accessories: Vec<String>,
    #[serde(default)]
    pub quirky_feature: Option<String>,
    #[serde(default)]
    pub skin_tone: Option<String>,
    #[serde(default)]
    pub vibe: Option<String>,
    #[serde(default)]
    pub suit_color: Option<String>,
    #[serde(default)]
    pub tie_color: Option<String>,
}

impl AttributeRecord {
    /// Parsed skin tone, if the raw value is in the known vocabulary.
    pub fn skin_tone(&self) -> Option<SkinTone> {
        self.skin_tone.as_deref().and_then(SkinTone::parse)
    }
}

/// `null` lists become empty, `null` and blank entries are dropped.
fn non_null_strings<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect())
}

/// Skin tones the analysis instruction asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinTone {
    White,
    Tan,
    Brown,
    Black,
    Dark,
}

impl SkinTone {
    /// Case-insensitive parse; anything outside the vocabulary is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "white" => Some(SkinTone::White),
            "tan" => Some(SkinTone::Tan),
            "brown" => Some(SkinTone::Brown),
            "black" => Some(SkinTone::Black),
            "dark" => Some(SkinTone::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkinTone::White => "white",
            SkinTone::Tan => "tan",
            SkinTone::Brown => "brown",
            SkinTone::Black => "black",
            SkinTone::Dark => "dark",
        }
    }

    /// Whether the tone is written into the character prompt.
    ///
    /// The base character already renders light skin, so `White` is left out.
    pub fn is_rendered(&self) -> bool {
        !matches!(self, SkinTone::White)
    }
}
