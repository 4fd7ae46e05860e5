//! Image-generation parameters and the clay character style presets.

pub mod output;

use serde::{Deserialize, Serialize};

/// One generated image as reported by the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// The character styles explored while tuning the clay CEO look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClayStyle {
    /// Rounded Pixar-like clay figure with chibi proportions
    Chibi,
    /// Clay doll with extremely minimal facial features
    Doll,
    /// Angular low-poly figure, no eyebrows or mouth
    LowPoly,
    /// Blank mannequin face, vinyl collectible look
    Mannequin,
}

impl ClayStyle {
    pub const ALL: [ClayStyle; 4] = [
        ClayStyle::Chibi,
        ClayStyle::Doll,
        ClayStyle::LowPoly,
        ClayStyle::Mannequin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ClayStyle::Chibi => "chibi",
            ClayStyle::Doll => "doll",
            ClayStyle::LowPoly => "lowpoly",
            ClayStyle::Mannequin => "mannequin",
        }
    }

    /// Parse a style name, also accepting the script versions `v1`..`v4`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "chibi" | "v1" => Some(ClayStyle::Chibi),
            "doll" | "v2" => Some(ClayStyle::Doll),
            "lowpoly" | "low-poly" | "v3" => Some(ClayStyle::LowPoly),
            "mannequin" | "v4" => Some(ClayStyle::Mannequin),
            _ => None,
        }
    }
}

const CHIBI_STYLE: &str = "3D rendered character portrait, stylized clay-like aesthetic, soft rounded forms,
minimal facial features with dot eyes and simple nose, smooth plastic/clay material look,
soft diffused lighting, Pixar-style rendering, cute chibi proportions,
wearing a business suit with tie, professional CEO look,
solid color background, high quality 3D render, octane render style";

const CHIBI_NEGATIVE: &str = "realistic, photorealistic, photograph, 2D, flat, anime, cartoon,
sketch, drawing, painting, watercolor, low quality, blurry, distorted face,
scary, horror, dark, gritty";

const DOLL_STYLE: &str = "3D rendered character, simple clay doll style, extremely minimal facial features,
tiny black dot eyes with no pupils or iris detail, almost no nose just a tiny bump,
no visible mouth or very subtle, smooth matte clay/plasticine material texture,
chunky rounded body proportions, simple geometric shapes,
muted soft lighting, solid pastel color background,
wearing simple business suit, front facing portrait,
style of Gang Beasts game characters, claymation style, vinyl toy aesthetic";

const DOLL_NEGATIVE: &str = "detailed eyes, realistic eyes, pupils, iris, anime eyes, disney eyes,
prominent nose, realistic nose, detailed mouth, teeth, realistic skin texture,
photorealistic, photograph, 2D, sketch, painting";

const LOW_POLY_STYLE: &str = "3D rendered character, low-poly stylized clay figure,
angular geometric shapes, faceted low-polygon aesthetic,
plain black oval eyes with no detail, NO eyebrows, NO mouth, tiny bump nose,
matte clay material texture, angular blocky hair,
adult body proportions not chibi, slightly elongated limbs,
simple geometric forms, flat shading, muted colors,
solid muted background, front facing portrait,
wearing business suit with tie,
style of low-poly mobile game character, angular toy figure aesthetic";

const LOW_POLY_NEGATIVE: &str = "eyebrows, mouth, lips, teeth, smile, detailed eyes, pupils, iris,
cute, chibi, short stubby proportions, rounded smooth shapes,
realistic, photorealistic, anime, cartoon, 2D, sketch,
high detail, wrinkles, skin texture";

const MANNEQUIN_STYLE: &str = "3D rendered low-poly character figure,
blank expressionless face like a mannequin,
only two flat black oval shapes for eyes on smooth featureless face,
completely smooth face with no eyebrows no mouth no expression lines,
angular geometric low-polygon body and hair,
matte clay material, faceted low-poly hair shapes,
adult figure proportions with elongated limbs,
wearing business suit with tie,
solid grey background, front view portrait,
minimalist toy figure aesthetic, vinyl collectible figure style";

const MANNEQUIN_NEGATIVE: &str = "eyebrows, mouth, lips, teeth, smile, frown, expression,
facial features, wrinkles, details, realistic face, anime face,
chibi, cute, cartoon, rounded shapes, photorealistic";

pub const FLUX_SCHNELL: &str = "fal-ai/flux/schnell";
pub const FLUX_DEV: &str = "fal-ai/flux/dev";
pub const SEEDREAM_EDIT: &str = "fal-ai/bytedance/seedream/v4.5/edit";

/// How far a scene edit may move away from the base image.
pub const SCENE_EDIT_STRENGTH: f32 = 0.75;

/// Keeps a scene edit from re-framing, re-posing or re-styling the base image.
pub const SCENE_EDIT_NEGATIVE: &str = "zoomed in, zoomed out, closer to camera, moved forward, \
moved back, different position, repositioned, changed pose, different stance, standing up, \
different angle, cropped, reframed, arm moved, hand repositioned, reaching, grabbing, \
picking up, putting down, arm raised, arm lowered, changed background, different background, \
modified text, altered signs, changed writing, multiple people, extra characters, two people, \
additional person, crowd, different art style, photorealistic, realistic photo, pixel art, \
8-bit, blurry, low quality, distorted, deformed";

/// Everything the generation service needs besides the prompt addition.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub style_prompt: String,
    pub negative_prompt: Option<String>,
    /// Model identifier on the generation service, e.g. `fal-ai/flux/dev`
    pub model: String,
    /// Omitted for edit models, which keep the base image's size
    pub image_size: Option<String>,
    pub num_images: u32,
    pub num_inference_steps: Option<u32>,
    pub guidance_scale: Option<f32>,
    pub enable_safety_checker: bool,
    pub seed: Option<u64>,
    /// Base images for image-to-image edits; empty for text-to-image
    pub image_urls: Vec<String>,
    /// Edit strength in `0.0..=1.0`, only meaningful with `image_urls`
    pub strength: Option<f32>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::preset(ClayStyle::Mannequin)
    }
}

impl GenerationConfig {
    pub fn new(style_prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            style_prompt: style_prompt.into(),
            negative_prompt: None,
            model: model.into(),
            image_size: Some("square".to_string()),
            num_images: 1,
            num_inference_steps: None,
            guidance_scale: None,
            enable_safety_checker: false,
            seed: None,
            image_urls: Vec::new(),
            strength: None,
        }
    }

    pub fn preset(style: ClayStyle) -> Self {
        match style {
            ClayStyle::Chibi => {
                Self::new(CHIBI_STYLE, FLUX_SCHNELL).negative_prompt(CHIBI_NEGATIVE)
            }
            ClayStyle::Doll => Self::new(DOLL_STYLE, FLUX_SCHNELL).negative_prompt(DOLL_NEGATIVE),
            ClayStyle::LowPoly => Self::new(LOW_POLY_STYLE, FLUX_DEV)
                .negative_prompt(LOW_POLY_NEGATIVE)
                .num_inference_steps(28)
                .guidance_scale(3.5),
            ClayStyle::Mannequin => Self::new(MANNEQUIN_STYLE, FLUX_DEV)
                .negative_prompt(MANNEQUIN_NEGATIVE)
                .num_inference_steps(30)
                .guidance_scale(4.0),
        }
    }

    /// Edit `base_image_url` in place: the composed prompt describes only the
    /// character, and the scene around it is kept.
    ///
    /// ```
    /// use clayceo::GenerationConfig;
    ///
    /// let config = GenerationConfig::scene_edit("https://cdn.example.com/office.png");
    /// assert_eq!(config.full_prompt("navy suit, red tie"), "navy suit, red tie");
    /// assert_eq!(config.strength, Some(0.75));
    /// ```
    pub fn scene_edit(base_image_url: impl Into<String>) -> Self {
        let mut config = Self::new("", SEEDREAM_EDIT)
            .negative_prompt(SCENE_EDIT_NEGATIVE)
            .image_url(base_image_url)
            .strength(SCENE_EDIT_STRENGTH);
        config.image_size = None;
        config
    }

    pub fn negative_prompt(mut self, negative: impl Into<String>) -> Self {
        self.negative_prompt = Some(negative.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn image_size(mut self, size: impl Into<String>) -> Self {
        self.image_size = Some(size.into());
        self
    }

    pub fn num_images(mut self, n: u32) -> Self {
        self.num_images = n.max(1);
        self
    }

    pub fn num_inference_steps(mut self, steps: u32) -> Self {
        self.num_inference_steps = Some(steps);
        self
    }

    pub fn guidance_scale(mut self, scale: f32) -> Self {
        self.guidance_scale = Some(scale);
        self
    }

    pub fn enable_safety_checker(mut self, enabled: bool) -> Self {
        self.enable_safety_checker = enabled;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Add a base image to edit.
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_urls.push(url.into());
        self
    }

    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = Some(strength.clamp(0.0, 1.0));
        self
    }

    /// Style prompt followed by the character-specific addition. Either part may be empty.
    ///
    /// ```
    /// use clayceo::GenerationConfig;
    ///
    /// let config = GenerationConfig::new("clay figure", "fal-ai/flux/dev");
    /// assert_eq!(config.full_prompt("navy suit"), "clay figure, navy suit");
    /// assert_eq!(config.full_prompt(""), "clay figure");
    /// ```
    pub fn full_prompt(&self, addition: &str) -> String {
        match (self.style_prompt.is_empty(), addition.is_empty()) {
            (_, true) => self.style_prompt.clone(),
            (true, false) => addition.to_string(),
            (false, false) => format!("{}, {}", self.style_prompt, addition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let chibi = GenerationConfig::preset(ClayStyle::Chibi);
        assert_eq!(chibi.model, FLUX_SCHNELL);
        assert_eq!(chibi.num_inference_steps, None);
        assert!(chibi.style_prompt.contains("chibi proportions"));

        let low_poly = GenerationConfig::preset(ClayStyle::LowPoly);
        assert_eq!(low_poly.model, FLUX_DEV);
        assert_eq!(low_poly.num_inference_steps, Some(28));
        assert_eq!(low_poly.guidance_scale, Some(3.5));

        let mannequin = GenerationConfig::default();
        assert_eq!(mannequin.num_inference_steps, Some(30));
        assert_eq!(mannequin.guidance_scale, Some(4.0));
        assert!(
            mannequin
                .negative_prompt
                .as_deref()
                .is_some_and(|n| n.starts_with("eyebrows"))
        );

        for style in ClayStyle::ALL {
            let config = GenerationConfig::preset(style);
            assert_eq!(config.image_size.as_deref(), Some("square"));
            assert_eq!(config.num_images, 1);
            assert!(!config.enable_safety_checker);
            assert!(config.image_urls.is_empty());
            assert_eq!(config.strength, None);
        }
    }

    #[test]
    fn test_scene_edit_preset() {
        let config = GenerationConfig::scene_edit("https://cdn.example.com/office.png");
        assert_eq!(config.model, SEEDREAM_EDIT);
        assert_eq!(config.image_urls, vec!["https://cdn.example.com/office.png"]);
        assert_eq!(config.strength, Some(0.75));
        assert_eq!(config.image_size, None);
        assert_eq!(config.num_images, 1);
        let negative = config.negative_prompt.as_deref().unwrap();
        assert!(negative.starts_with("zoomed in, zoomed out"));
        assert!(negative.ends_with("distorted, deformed"));
        assert!(negative.contains("changed background"));
        assert_eq!(config.full_prompt(""), "");
    }

    #[test]
    fn test_strength_is_clamped() {
        let config = GenerationConfig::new("clay", FLUX_DEV).strength(1.5);
        assert_eq!(config.strength, Some(1.0));
    }

    #[test]
    fn test_style_parse() {
        assert_eq!(ClayStyle::parse("v3"), Some(ClayStyle::LowPoly));
        assert_eq!(ClayStyle::parse("Mannequin"), Some(ClayStyle::Mannequin));
        assert_eq!(ClayStyle::parse("watercolor"), None);
        for style in ClayStyle::ALL {
            assert_eq!(ClayStyle::parse(style.name()), Some(style));
        }
    }
}
