//! Prompt composition: turn an [`AttributeRecord`] into the character prompt.
//!
//! Fragment order matters: image models weight earlier tokens more heavily, so
//! identity traits (skin, hair) come first and the fixed rendering instructions
//! come last.

use std::fmt;

use crate::analysis::AttributeRecord;


/// Accessory entries are kept only if they mention one of these.
pub const WEARABLE_KEYWORDS: &[&str] = &[
    "crown",
    "glasses",
    "sunglasses",
    "hat",
    "cap",
    "beanie",
    "earrings",
    "necklace",
    "watch",
    "cape",
    "chain",
    "headphones",
    "bandana",
    "hoodie",
    "jewelry",
];

pub const DEFAULT_HAIR: &str = "dark brown hair";
pub const DEFAULT_SUIT_COLOR: &str = "navy";
pub const DEFAULT_TIE_COLOR: &str = "red";
pub const DEFAULT_MAX_ACCESSORIES: usize = 2;

/// Appended to every prompt, in this order.
pub const TRAILING_FRAGMENTS: &[&str] = &[
    "accessories worn naturally and realistically",
    "only modify the character, keep background unchanged",
];

const SEPARATOR: &str = ", ";

/// A composed prompt: ordered fragments joined with `", "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptString {
    fragments: Vec<String>,
    text: String,
}

impl PromptString {
    fn from_fragments(fragments: Vec<String>) -> Self {
        let text = fragments.join(SEPARATOR);
        Self { fragments, text }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for PromptString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for PromptString {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Maps attribute records to prompts. Pure and infallible.
///
/// # Examples
///
/// ```
/// use clayceo::{AttributeRecord, PromptComposer};
///
/// let composer = PromptComposer::default();
/// let prompt = composer.compose(&AttributeRecord::default());
/// assert_eq!(
///     prompt.as_str(),
///     "dark brown hair, navy suit, red tie, accessories worn naturally and realistically, \
///      only modify the character, keep background unchanged"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PromptComposer {
    wearable_keywords: Vec<String>,
    max_accessories: usize,
    default_hair: String,
    default_suit_color: String,
    default_tie_color: String,
    trailing: Vec<String>,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self {
            wearable_keywords: WEARABLE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            max_accessories: DEFAULT_MAX_ACCESSORIES,
            default_hair: DEFAULT_HAIR.to_string(),
            default_suit_color: DEFAULT_SUIT_COLOR.to_string(),
            default_tie_color: DEFAULT_TIE_COLOR.to_string(),
            trailing: TRAILING_FRAGMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PromptComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the wearable keyword set. Keywords are matched in lowercase.
    pub fn wearable_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wearable_keywords = keywords
            .into_iter()
            .map(|k| k.into().to_lowercase())
            .collect();
        self
    }

    pub fn max_accessories(mut self, max: usize) -> Self {
        self.max_accessories = max;
        self
    }

    /// Hair fragment used when no hair color was detected.
    pub fn default_hair(mut self, hair: impl Into<String>) -> Self {
        self.default_hair = hair.into();
        self
    }

    pub fn default_suit_color(mut self, color: impl Into<String>) -> Self {
        self.default_suit_color = color.into();
        self
    }

    pub fn default_tie_color(mut self, color: impl Into<String>) -> Self {
        self.default_tie_color = color.into();
        self
    }

    pub fn compose(&self, record: &AttributeRecord) -> PromptString {
        let mut parts: Vec<String> = Vec::new();

        // Skin tone (only when it changes the base character)
        if let Some(raw) = record.skin_tone.as_deref()
            && record.skin_tone().is_some_and(|tone| tone.is_rendered())
        {
            parts.push(format!("{} skin", raw));
        }

        // Hair, with fallback
        match present(&record.hair_color) {
            Some(color) => match present(&record.hair_style) {
                Some(style) => parts.push(format!("{} {} hair", color, style)),
                None => parts.push(format!("{} hair", color)),
            },
            None => parts.push(self.default_hair.clone()),
        }

        let suit = non_empty(&record.suit_color).unwrap_or(self.default_suit_color.as_str());
        parts.push(format!("{} suit", suit));

        let tie = non_empty(&record.tie_color).unwrap_or(self.default_tie_color.as_str());
        parts.push(format!("{} tie", tie));

        let wearables = self.wearable_accessories(&record.accessories);
        if !wearables.is_empty() {
            parts.push(wearables.join(SEPARATOR));
        }

        if let Some(quirk) = present(&record.quirky_feature) {
            parts.push(quirk.to_string());
        }

        if let Some(vibe) = non_empty(&record.vibe) {
            parts.push(format!("{} expression", vibe));
        }

        parts.extend(self.trailing.iter().cloned());

        PromptString::from_fragments(parts)
    }

    fn wearable_accessories<'a>(&self, accessories: &'a [String]) -> Vec<&'a str> {
        accessories
            .iter()
            .map(String::as_str)
            .filter(|item| !item.is_empty())
            .filter(|item| {
                let lower = item.to_lowercase();
                self.wearable_keywords
                    .iter()
                    .any(|keyword| lower.contains(keyword.as_str()))
            })
            .take(self.max_accessories)
            .collect()
    }
}

/// Compose with the default configuration.
pub fn compose_prompt(record: &AttributeRecord) -> PromptString {
    PromptComposer::default().compose(record)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Models sometimes answer with the string "null" instead of a JSON null.
fn present(value: &Option<String>) -> Option<&str> {
    non_empty(value).filter(|v| !v.eq_ignore_ascii_case("null"))
}
