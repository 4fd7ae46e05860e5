//! Analyze a profile picture and print the clay CEO character prompt.
//!
//! Run with:
//! ```bash
//! export ANTHROPIC_API_KEY=your_key_here
//! cargo run --example analyze_pfp -- "path/to/pfp.jpg" [more.png ...]
//! ```

use clayceo::{
    AnthropicClient, CharacterPipeline,
    logging::{LogLevel, init_logging},
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogLevel::Warn);

    let paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: analyze_pfp <image> [image ...]");
        std::process::exit(2);
    }

    let pipeline = CharacterPipeline::new(AnthropicClient::from_env()?);

    for path in paths {
        println!("{}", "=".repeat(50));
        println!("Analyzing: {}", path);
        println!("{}", "-".repeat(40));

        let output = pipeline.analyze(&path).await?;

        println!("Analysis:");
        println!("{}", serde_json::to_string_pretty(&output.record)?);
        println!("{}", "-".repeat(40));
        println!("Generated prompt:\n{}", output.prompt);
    }

    Ok(())
}
