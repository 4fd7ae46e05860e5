//! End-to-end pipeline tests against a scripted vision model.

#[path = "common/mod.rs"]
mod common;

#[cfg(test)]
mod pipeline_tests {
    use clayceo::{
        ANALYSIS_INSTRUCTION, AttributeExtractor, CharacterPipeline, ClayCeoError, PromptComposer,
    };

    use crate::common::{ScriptedVision, TINY_PNG, write_image};

    const CIGAR_BOSS: &str = r#"{
        "hair_color": "black",
        "hair_style": "curly",
        "dominant_colors": ["gold", "black"],
        "accessories": ["gold chain", "cigar"],
        "quirky_feature": "cigar in mouth",
        "skin_tone": "tan",
        "vibe": "confident",
        "suit_color": "charcoal",
        "tie_color": "gold"
    }"#;

    #[tokio::test]
    async fn test_full_pipeline_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path(), "boss pfp.png");
        let vision = ScriptedVision::replying(CIGAR_BOSS);
        let pipeline = CharacterPipeline::new(&vision);

        let output = pipeline.analyze(&path).await.expect("pipeline should succeed");

        assert_eq!(
            output.prompt.as_str(),
            "tan skin, black curly hair, charcoal suit, gold tie, gold chain, cigar in mouth, \
             confident expression, accessories worn naturally and realistically, \
             only modify the character, keep background unchanged"
        );
        assert_eq!(output.record.dominant_colors, vec!["gold", "black"]);
    }

    #[tokio::test]
    async fn test_one_request_with_encoded_image_and_instruction() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path(), "pfp.png");
        let vision = ScriptedVision::replying("{}");
        let pipeline = CharacterPipeline::new(&vision);

        pipeline.analyze(&path).await.unwrap();

        let calls = vision.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].media_type, "image/png");
        assert_eq!(calls[0].instruction, ANALYSIS_INSTRUCTION);
        assert_eq!(
            calls[0].data,
            clayceo::EncodedImage::from_bytes(TINY_PNG, "image/png").data()
        );
    }

    #[tokio::test]
    async fn test_repeated_runs_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path(), "pfp.jpg");
        let vision = ScriptedVision::replying(CIGAR_BOSS);
        let pipeline = CharacterPipeline::new(&vision);

        let first = pipeline.analyze(&path).await.unwrap();
        let second = pipeline.analyze(&path).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(vision.calls().len(), 2);
        assert_eq!(vision.calls()[0].media_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_empty_analysis_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path(), "pfp.gif");
        let pipeline = CharacterPipeline::new(ScriptedVision::replying("{}"));

        let output = pipeline.analyze(&path).await.unwrap();
        assert_eq!(
            output.prompt.as_str(),
            "dark brown hair, navy suit, red tie, accessories worn naturally and realistically, \
             only modify the character, keep background unchanged"
        );
    }

    #[tokio::test]
    async fn test_string_null_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path(), "pfp.webp");
        let reply = r#"{"hair_color": "null", "quirky_feature": "NULL", "skin_tone": "white", "vibe": "sleepy"}"#;
        let pipeline = CharacterPipeline::new(ScriptedVision::replying(reply));

        let output = pipeline.analyze(&path).await.unwrap();
        assert_eq!(
            output.prompt.fragments(),
            &[
                "dark brown hair",
                "navy suit",
                "red tie",
                "sleepy expression",
                "accessories worn naturally and realistically",
                "only modify the character, keep background unchanged",
            ]
        );
    }

    #[tokio::test]
    async fn test_non_json_reply_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path(), "pfp.png");
        let pipeline = CharacterPipeline::new(ScriptedVision::replying(
            "I'm sorry, I can't identify people in images.",
        ));

        let result = pipeline.analyze(&path).await;
        assert!(
            matches!(result, Err(ClayCeoError::AnalysisParseError(_))),
            "got {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_missing_file_makes_no_request() {
        let dir = tempfile::tempdir().unwrap();
        let vision = ScriptedVision::replying("{}");
        let pipeline = CharacterPipeline::new(&vision);

        let result = pipeline.analyze(dir.path().join("ghost.png")).await;
        assert!(matches!(result, Err(ClayCeoError::FileAccessError { .. })));
        assert!(vision.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_file_makes_no_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.jpg");
        std::fs::write(&path, b"").unwrap();
        let vision = ScriptedVision::replying("{}");
        let pipeline = CharacterPipeline::new(&vision);

        let result = pipeline.analyze(&path).await;
        assert!(matches!(result, Err(ClayCeoError::FileAccessError { .. })));
        assert!(vision.calls().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_propagates_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path(), "pfp.png");
        let vision = ScriptedVision::failing("Anthropic API error (529): overloaded");
        let pipeline = CharacterPipeline::new(&vision);

        let err = pipeline.analyze(&path).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(
            err,
            ClayCeoError::ApiError("Anthropic API error (529): overloaded".to_string())
        );
        assert_eq!(vision.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_custom_parts() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path(), "pfp.png");
        let vision = ScriptedVision::replying(r#"{"accessories": ["silk scarf", "crown"]}"#);
        let extractor = AttributeExtractor::new(&vision).instruction("Describe as JSON.");
        let composer = PromptComposer::new().wearable_keywords(["scarf"]);
        let pipeline = CharacterPipeline::with_parts(extractor, composer);

        let output = pipeline.analyze(&path).await.unwrap();
        assert_eq!(output.prompt.fragments()[3], "silk scarf");
        assert_eq!(vision.calls()[0].instruction, "Describe as JSON.");
    }
}
