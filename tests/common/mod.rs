use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use clayceo::{ClayCeoError, EncodedImage, Result, VisionModel};

/// Bytes of a 1x1 transparent PNG.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

pub fn write_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, TINY_PNG).expect("Failed to write image fixture");
    path
}

/// One recorded `describe` call.
#[derive(Debug, Clone)]
pub struct Call {
    pub media_type: String,
    pub data: String,
    pub instruction: String,
}

/// Vision model that answers every request with the same scripted reply.
pub struct ScriptedVision {
    reply: std::result::Result<String, String>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedVision {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails every request with an `ApiError`, like a provider returning 5xx.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }
}

#[async_trait]
impl VisionModel for ScriptedVision {
    async fn describe(&self, image: &EncodedImage, instruction: &str) -> Result<String> {
        self.calls.lock().expect("calls lock poisoned").push(Call {
            media_type: image.media_type().to_string(),
            data: image.data().to_string(),
            instruction: instruction.to_string(),
        });
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(ClayCeoError::ApiError(message.clone())),
        }
    }
}
