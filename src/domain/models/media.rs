use bytes::Bytes;

use crate::domain::errors::ValidationError;

/// Largest accepted upload, in bytes
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// An uploaded file waiting to be handed to the media store
#[derive(Debug, Clone, PartialEq)]
pub struct MediaUpload {
    pub data: Bytes,
    pub content_type: String,
    pub file_name: Option<String>,
}

impl MediaUpload {
    pub fn new(data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Only non-empty images up to [`MAX_UPLOAD_BYTES`] are accepted
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.content_type.starts_with("image/") {
            return Err(ValidationError::UnsupportedMediaType(
                self.content_type.clone(),
            ));
        }
        if self.data.len() > MAX_UPLOAD_BYTES {
            return Err(ValidationError::MediaTooLarge {
                actual: self.data.len(),
                max: MAX_UPLOAD_BYTES,
            });
        }
        if self.data.is_empty() {
            return Err(ValidationError::MissingField("File content"));
        }
        Ok(())
    }

    /// File extension for the stored blob, taken from the content type
    pub fn extension(&self) -> &'static str {
        extension_for(&self.content_type)
    }
}

pub fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/avif" => "avif",
        "image/bmp" => "bmp",
        _ => "bin",
    }
}

/// Inverse of [`extension_for`], used when serving stored blobs
pub fn content_type_for(storage_id: &str) -> &'static str {
    let ext = storage_id
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_images() {
        let upload = MediaUpload::new(vec![1, 2, 3], "application/pdf");
        assert!(matches!(
            upload.validate(),
            Err(ValidationError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_upload() {
        let upload = MediaUpload::new(vec![0u8; MAX_UPLOAD_BYTES + 1], "image/png");
        assert!(matches!(
            upload.validate(),
            Err(ValidationError::MediaTooLarge { .. })
        ));
    }

    #[test]
    fn test_extension_round_trip() {
        let upload = MediaUpload::new(vec![1], "image/jpeg");
        assert!(upload.validate().is_ok());
        assert_eq!(upload.extension(), "jpg");
        assert_eq!(content_type_for("digiora/gallery/abc.jpg"), "image/jpeg");
        assert_eq!(content_type_for("no-extension"), "application/octet-stream");
    }
}
