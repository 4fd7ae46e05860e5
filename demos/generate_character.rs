//! Render clay CEO characters with fal.ai and save them under `generated/`.
//!
//! Run with:
//! ```bash
//! export FAL_KEY=your_key_here
//! cargo run --example generate_character -- mannequin "male figure, black angular hair, navy suit red tie"
//! ```
//!
//! The first argument picks a style (`chibi`, `doll`, `lowpoly`, `mannequin`, or `v1`..`v4`);
//! the remaining arguments form the character description. Without a description the
//! three reference characters are rendered.
//!
//! To put the character into an existing scene instead, pass `edit` and the scene URL:
//! ```bash
//! cargo run --example generate_character -- edit https://example.com/office.png "navy suit, red tie"
//! ```

use clayceo::{
    ClayStyle, FalClient, GenerationConfig, ImageGenerator,
    logging::{LogLevel, init_logging},
    save_image,
};
use std::env;

const OUTPUT_DIR: &str = "generated";

const REFERENCE_CHARACTERS: &[&str] = &[
    "male figure, brown angular hair, navy suit",
    "female figure, blonde angular ponytail hair, grey suit",
    "male figure, black angular hair, navy suit red tie",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogLevel::Info);

    let mut args = env::args().skip(1);
    let (label, config) = match args.next() {
        Some(name) if name == "edit" => {
            let base_url = args.next().ok_or("edit needs a base scene URL")?;
            ("edit", GenerationConfig::scene_edit(base_url))
        }
        Some(name) => {
            let style =
                ClayStyle::parse(&name).ok_or_else(|| format!("unknown style: {}", name))?;
            (style.name(), GenerationConfig::preset(style))
        }
        None => (
            ClayStyle::Mannequin.name(),
            GenerationConfig::preset(ClayStyle::Mannequin),
        ),
    };
    let description = args.collect::<Vec<_>>().join(" ");
    let descriptions: Vec<&str> = if description.is_empty() {
        REFERENCE_CHARACTERS.to_vec()
    } else {
        vec![description.as_str()]
    };

    println!("Style: {} ({})", label, config.model);
    let client = FalClient::from_env()?.generation(config);
    let prefix = format!("test_{}", label);

    for (i, addition) in descriptions.iter().enumerate() {
        println!("\n[Test {}] {}", i + 1, addition);
        let prompt = client.config().generation.full_prompt(addition);
        let images = client.generate(&prompt).await?;
        let bytes = client.download(&images[0].url).await?;
        let path = save_image(OUTPUT_DIR, &prefix, &bytes)?;
        println!("Saved to: {}", path.display());
    }

    Ok(())
}
