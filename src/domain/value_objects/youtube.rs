use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// Watch, short-link, embed and channel-path URLs on any youtube.com host.
/// The first capture group is the 11-character video id.
const YOUTUBE_URL_PATTERN: &str = r#"(?:youtube(?:-nocookie)?\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?|shorts|live)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#;

/// The 11-character id of a YouTube video
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YoutubeVideoId(String);

impl YoutubeVideoId {
    /// Extract the video id from any of the common YouTube URL shapes
    pub fn from_url(url: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidYoutubeUrl(url.to_string());

        let pattern = Regex::new(YOUTUBE_URL_PATTERN).map_err(|_| invalid())?;
        pattern
            .captures(url.trim())
            .and_then(|captures| captures.get(1))
            .map(|id| Self(id.as_str().to_string()))
            .ok_or_else(invalid)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Thumbnail served by YouTube for this video
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", self.0)
    }
}

impl std::fmt::Display for YoutubeVideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
