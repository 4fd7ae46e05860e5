//! Image loading and transport encoding.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, instrument};

use crate::error::{ClayCeoError, Result};

/// Media type used when the extension is missing or unknown.
pub const DEFAULT_MEDIA_TYPE: &str = "image/jpeg";

/// Pick a media type from the file extension (case-insensitive).
///
/// ```
/// use clayceo::media_type_for_path;
///
/// assert_eq!(media_type_for_path("pfp.PNG"), "image/png");
/// assert_eq!(media_type_for_path("pfp"), "image/jpeg");
/// ```
pub fn media_type_for_path(path: impl AsRef<Path>) -> &'static str {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => DEFAULT_MEDIA_TYPE,
    }
}

/// An image encoded as standard base64 text, tagged with its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    data: String,
    media_type: String,
}

impl EncodedImage {
    /// Read an image file and encode it for transport.
    ///
    /// Fails with [`ClayCeoError::FileAccessError`] if the file is missing, unreadable or empty.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| ClayCeoError::file_access(path, e))?;
        if bytes.is_empty() {
            return Err(ClayCeoError::file_access(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, "image file is empty"),
            ));
        }
        let media_type = media_type_for_path(path);
        debug!(
            byte_len = bytes.len(),
            media_type, "Loaded image from disk"
        );
        Ok(Self::from_bytes(&bytes, media_type))
    }

    /// Encode in-memory image bytes.
    pub fn from_bytes(bytes: &[u8], media_type: impl Into<String>) -> Self {
        Self {
            data: STANDARD.encode(bytes),
            media_type: media_type.into(),
        }
    }

    /// Base64 payload.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// `data:` URL form, for providers that take images inline as URLs.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_media_type_mapping() {
        assert_eq!(media_type_for_path("a.jpg"), "image/jpeg");
        assert_eq!(media_type_for_path("a.JPEG"), "image/jpeg");
        assert_eq!(media_type_for_path("a.png"), "image/png");
        assert_eq!(media_type_for_path("a.gif"), "image/gif");
        assert_eq!(media_type_for_path("dir/a.webp"), "image/webp");
        assert_eq!(media_type_for_path("a.bmp"), "image/jpeg");
        assert_eq!(media_type_for_path("noext"), "image/jpeg");
        assert_eq!(media_type_for_path("studwud pfp.jpg"), "image/jpeg");
    }

    #[test]
    fn test_from_bytes_uses_standard_base64() {
        let image = EncodedImage::from_bytes(b"abc", "image/png");
        assert_eq!(image.data(), "YWJj");
        assert_eq!(image.media_type(), "image/png");
        assert_eq!(image.to_data_url(), "data:image/png;base64,YWJj");

        let padded = EncodedImage::from_bytes(b"ab", "image/png");
        assert_eq!(padded.data(), "YWI=");
    }

    #[test]
    fn test_from_path_reads_and_tags() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("avatar.webp");
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(b"abc").expect("write");

        let image = EncodedImage::from_path(&path).expect("image should load");
        assert_eq!(image.data(), "YWJj");
        assert_eq!(image.media_type(), "image/webp");
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.png");

        match EncodedImage::from_path(&path) {
            Err(ClayCeoError::FileAccessError { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected FileAccessError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_path_empty_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("blank.png");
        std::fs::File::create(&path).expect("create");

        match EncodedImage::from_path(&path) {
            Err(ClayCeoError::FileAccessError { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
            }
            other => panic!("Expected FileAccessError, got {:?}", other),
        }
    }
}
