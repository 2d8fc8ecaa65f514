use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::ValidationError,
    models::gallery::GalleryCategory,
    value_objects::{Collection, MediaRef, ResourceId, ResourceStatus, YoutubeVideoId},
};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// An ordered, optionally media-backed content record (service, gallery image or video)
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: ResourceId,
    pub collection: Collection,
    pub title: String,
    pub description: String,
    pub media: Option<MediaRef>,
    pub order: u32,
    pub status: ResourceStatus,
    pub details: ResourceDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields that only exist for one collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResourceDetails {
    Service {
        icon: String,
        gradient: String,
    },
    Gallery {
        category: GalleryCategory,
        tags: Vec<String>,
        file_size: Option<u64>,
    },
    Video {
        youtube_url: String,
        youtube_id: YoutubeVideoId,
        thumbnail_url: String,
        views: u64,
    },
}

impl ResourceDetails {
    /// Reflect a freshly stored blob in the collection-specific fields
    pub fn attach_media(&mut self, media: &MediaRef, size: u64) {
        match self {
            ResourceDetails::Service { .. } => {}
            ResourceDetails::Gallery { file_size, .. } => *file_size = Some(size),
            ResourceDetails::Video { thumbnail_url, .. } => *thumbnail_url = media.url.clone(),
        }
    }

    pub fn category(&self) -> Option<GalleryCategory> {
        match self {
            ResourceDetails::Gallery { category, .. } => Some(*category),
            _ => None,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            ResourceDetails::Gallery { tags, .. } => tags,
            _ => &[],
        }
    }
}

/// Raw, partially-present input for creating or updating a resource.
///
/// Fields that don't apply to the target collection are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<u32>,
    pub status: Option<String>,
    pub icon: Option<String>,
    pub gradient: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub youtube_url: Option<String>,
}

/// Validated input for a resource that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDraft {
    pub collection: Collection,
    pub title: String,
    pub description: String,
    pub order: Option<u32>,
    pub status: ResourceStatus,
    pub details: ResourceDetails,
}

/// A record ready for insertion; the store assigns id and timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct NewResource {
    pub collection: Collection,
    pub title: String,
    pub description: String,
    pub media: Option<MediaRef>,
    pub order: u32,
    pub status: ResourceStatus,
    pub details: ResourceDetails,
}

impl ResourceDraft {
    /// Validate create input for a collection
    pub fn from_fields(
        collection: Collection,
        fields: ResourceFields,
    ) -> Result<Self, ValidationError> {
        let title = required_text("Title", fields.title, MAX_TITLE_LEN)?;
        let description = match collection {
            Collection::Services => {
                required_text("Description", fields.description, MAX_DESCRIPTION_LEN)?
            }
            Collection::Gallery | Collection::Videos => {
                optional_text("Description", fields.description, MAX_DESCRIPTION_LEN)?
                    .unwrap_or_default()
            }
        };
        let status = fields
            .status
            .as_deref()
            .map(str::parse::<ResourceStatus>)
            .transpose()?
            .unwrap_or_default();

        let details = match collection {
            Collection::Services => ResourceDetails::Service {
                icon: required_text("Icon", fields.icon, usize::MAX)?,
                gradient: required_text("Gradient", fields.gradient, usize::MAX)?,
            },
            Collection::Gallery => ResourceDetails::Gallery {
                category: fields
                    .category
                    .as_deref()
                    .filter(|c| !c.trim().is_empty())
                    .map(str::parse::<GalleryCategory>)
                    .transpose()?
                    .unwrap_or_default(),
                tags: fields.tags.unwrap_or_default(),
                file_size: None,
            },
            Collection::Videos => {
                let youtube_url = required_text("YouTube URL", fields.youtube_url, usize::MAX)?;
                let youtube_id = YoutubeVideoId::from_url(&youtube_url)?;
                ResourceDetails::Video {
                    thumbnail_url: youtube_id.thumbnail_url(),
                    youtube_url,
                    youtube_id,
                    views: 0,
                }
            }
        };

        Ok(Self {
            collection,
            title,
            description,
            order: fields.order,
            status,
            details,
        })
    }

    /// Finish the draft once its order is known and its blob (if any) is stored
    pub fn into_new_resource(self, order: u32, media: Option<(MediaRef, u64)>) -> NewResource {
        let mut details = self.details;
        let media = media.map(|(media, size)| {
            details.attach_media(&media, size);
            media
        });

        NewResource {
            collection: self.collection,
            title: self.title,
            description: self.description,
            media,
            order,
            status: self.status,
            details,
        }
    }
}

impl Resource {
    /// Apply a partial update; absent fields keep their current value
    pub fn apply_fields(&mut self, fields: ResourceFields) -> Result<(), ValidationError> {
        if let Some(title) = fields.title {
            self.title = required_text("Title", Some(title), MAX_TITLE_LEN)?;
        }
        if let Some(description) = fields.description {
            self.description = match self.collection {
                Collection::Services => {
                    required_text("Description", Some(description), MAX_DESCRIPTION_LEN)?
                }
                Collection::Gallery | Collection::Videos => {
                    optional_text("Description", Some(description), MAX_DESCRIPTION_LEN)?
                        .unwrap_or_default()
                }
            };
        }
        if let Some(order) = fields.order {
            self.order = order;
        }
        if let Some(status) = fields.status {
            self.status = status.parse()?;
        }

        let has_media = self.media.is_some();
        match &mut self.details {
            ResourceDetails::Service { icon, gradient } => {
                if let Some(value) = fields.icon {
                    *icon = required_text("Icon", Some(value), usize::MAX)?;
                }
                if let Some(value) = fields.gradient {
                    *gradient = required_text("Gradient", Some(value), usize::MAX)?;
                }
            }
            ResourceDetails::Gallery { category, tags, .. } => {
                if let Some(value) = fields.category {
                    *category = value.parse()?;
                }
                if let Some(value) = fields.tags {
                    *tags = value;
                }
            }
            ResourceDetails::Video {
                youtube_url,
                youtube_id,
                thumbnail_url,
                ..
            } => {
                if let Some(url) = fields.youtube_url {
                    let url = required_text("YouTube URL", Some(url), usize::MAX)?;
                    if url != *youtube_url {
                        let id = YoutubeVideoId::from_url(&url)?;
                        if !has_media {
                            *thumbnail_url = id.thumbnail_url();
                        }
                        *youtube_id = id;
                        *youtube_url = url;
                    }
                }
            }
        }

        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Current time at microsecond precision, the finest any store keeps
pub fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for a mutation of a record last touched at `previous`.
///
/// Always strictly later than `previous`, even when the clock hasn't moved.
pub fn next_update_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now_micros();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<String, ValidationError> {
    optional_text(field, value, max)?.ok_or(ValidationError::MissingField(field))
}

fn optional_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let Some(value) = value else {
        return Ok(None);
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let len = trimmed.chars().count();
    if len > max {
        return Err(ValidationError::FieldTooLong {
            field,
            actual: len,
            max,
        });
    }

    Ok(Some(trimmed.to_string()))
}
