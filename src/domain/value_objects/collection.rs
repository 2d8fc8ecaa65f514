use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::errors::ValidationError;

/// The ordered, media-backed collections managed by the content server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Services,
    Gallery,
    Videos,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Services, Collection::Gallery, Collection::Videos];

    /// Name used for routing and persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Services => "services",
            Collection::Gallery => "gallery",
            Collection::Videos => "videos",
        }
    }

    /// Human-readable name of a single record
    pub fn display_name(&self) -> &'static str {
        match self {
            Collection::Services => "Service",
            Collection::Gallery => "Gallery image",
            Collection::Videos => "Video",
        }
    }

    /// Folder (below the configured prefix) that uploaded blobs land in
    pub fn media_folder(&self) -> &'static str {
        match self {
            Collection::Services => "services",
            Collection::Gallery => "gallery",
            Collection::Videos => "video-thumbnails",
        }
    }

    /// Multipart field carrying the uploaded file
    pub fn media_field(&self) -> &'static str {
        match self {
            Collection::Videos => "thumbnail",
            Collection::Services | Collection::Gallery => "image",
        }
    }

    /// Page size applied when a listing request doesn't give one
    pub fn default_page_limit(&self) -> Option<usize> {
        match self {
            Collection::Gallery => Some(20),
            Collection::Services | Collection::Videos => None,
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Collection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "services" => Ok(Collection::Services),
            "gallery" => Ok(Collection::Gallery),
            "videos" => Ok(Collection::Videos),
            other => Err(ValidationError::UnknownCollection(other.to_string())),
        }
    }
}
