use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::{AuthError, ContentError, ValidationError},
    models::{
        Contact, ContactStatus, ContactSubmission, GalleryCategory, GalleryStats, LibraryImage,
        Pagination, Resource, ResourceDetails, ResourceFilter, ResourceQuery, Session, Subscriber,
    },
    value_objects::{Collection, ResourceStatus},
};

/// Envelope wrapping every JSON response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            pagination: None,
            count: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_pagination(mut self, pagination: Option<Pagination>) -> Self {
        self.pagination = pagination.map(PaginationDto::from);
        self
    }
}

impl ApiResponse<()> {
    /// Success without a payload
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
            pagination: None,
            count: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error,
            pagination: None,
            count: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationDto {
    pub current: usize,
    pub pages: usize,
    pub total: usize,
}

impl From<Pagination> for PaginationDto {
    fn from(p: Pagination) -> Self {
        Self {
            current: p.current,
            pages: p.pages,
            total: p.total,
        }
    }
}

/// Error returned by handlers, rendered as a `success: false` envelope
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub error: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        let message = err.to_string();
        let status = StatusCode::from(err.clone());
        let error = match err {
            ContentError::Storage { .. } | ContentError::Database { .. } => Some(message.clone()),
            _ => None,
        };
        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => message,
        };
        Self {
            status,
            message,
            error,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::from(ContentError::from(err))
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = StatusCode::from(err.clone());
        let message = match &err {
            AuthError::InvalidCredentials => "Invalid credentials".to_string(),
            AuthError::MissingToken => "Access denied. No token provided".to_string(),
            AuthError::InvalidToken(_) => "Invalid or expired token".to_string(),
            AuthError::Hash(_) | AuthError::Token(_) => "Internal server error".to_string(),
        };
        Self {
            status,
            message,
            error: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiResponse::failure(self.message, self.error)),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Stored media as exposed over HTTP
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDto {
    pub url: String,
    pub storage_id: String,
}

/// Collection-specific fields, flattened into [`ResourceDto`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceDetailsDto {
    #[serde(rename_all = "camelCase")]
    Service { icon: String, gradient: String },
    #[serde(rename_all = "camelCase")]
    Gallery {
        category: GalleryCategory,
        tags: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        file_size: Option<u64>,
    },
    #[serde(rename_all = "camelCase")]
    Video {
        youtube_url: String,
        youtube_id: String,
        thumbnail_url: String,
        views: u64,
    },
}

impl From<ResourceDetails> for ResourceDetailsDto {
    fn from(details: ResourceDetails) -> Self {
        match details {
            ResourceDetails::Service { icon, gradient } => Self::Service { icon, gradient },
            ResourceDetails::Gallery {
                category,
                tags,
                file_size,
            } => Self::Gallery {
                category,
                tags,
                file_size,
            },
            ResourceDetails::Video {
                youtube_url,
                youtube_id,
                thumbnail_url,
                views,
            } => Self::Video {
                youtube_url,
                youtube_id: youtube_id.as_str().to_string(),
                thumbnail_url,
                views,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDto {
    pub id: String,
    pub collection: Collection,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaDto>,
    pub order: u32,
    pub status: ResourceStatus,
    pub is_active: bool,
    #[serde(flatten)]
    pub details: ResourceDetailsDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Resource> for ResourceDto {
    fn from(resource: Resource) -> Self {
        Self {
            id: resource.id.to_string(),
            collection: resource.collection,
            is_active: resource.is_active(),
            title: resource.title,
            description: resource.description,
            media: resource.media.map(|m| MediaDto {
                url: m.url,
                storage_id: m.storage_id,
            }),
            order: resource.order,
            status: resource.status,
            details: resource.details.into(),
            created_at: resource.created_at,
            updated_at: resource.updated_at,
        }
    }
}

pub fn resource_dtos(resources: Vec<Resource>) -> Vec<ResourceDto> {
    resources.into_iter().map(ResourceDto::from).collect()
}

/// Query string accepted by collection listings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub status: Option<String>,
    pub is_active: Option<bool>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl TryFrom<ListParams> for ResourceQuery {
    type Error = ValidationError;

    fn try_from(params: ListParams) -> Result<Self, Self::Error> {
        let status = match (params.status.as_deref().map(str::trim), params.is_active) {
            (Some(s), _) if !s.is_empty() && s != "all" => Some(s.parse::<ResourceStatus>()?),
            (_, Some(true)) => Some(ResourceStatus::Active),
            (_, Some(false)) => Some(ResourceStatus::Inactive),
            _ => None,
        };
        let category = match params.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() && !c.eq_ignore_ascii_case("all") => {
                Some(c.parse::<GalleryCategory>()?)
            }
            _ => None,
        };

        Ok(ResourceQuery {
            filter: ResourceFilter {
                status,
                category,
                search: params.search,
            },
            page: params.page,
            limit: params.limit,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkRequest {
    pub ids: Option<Vec<String>>,
    pub action: String,
    #[serde(default)]
    pub data: BulkData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkData {
    pub status: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkResultDto {
    pub affected: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsDto {
    pub views: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCountDto {
    pub category: GalleryCategory,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryStatsDto {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub categories: Vec<CategoryCountDto>,
    pub recent: Vec<ResourceDto>,
}

impl From<GalleryStats> for GalleryStatsDto {
    fn from(stats: GalleryStats) -> Self {
        Self {
            total: stats.total,
            active: stats.active,
            inactive: stats.inactive,
            categories: stats
                .categories
                .into_iter()
                .map(|(category, count)| CategoryCountDto { category, count })
                .collect(),
            recent: resource_dtos(stats.recent),
        }
    }
}

/// Contact form body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub budget: Option<String>,
    pub message: Option<String>,
}

impl From<ContactRequest> for ContactSubmission {
    fn from(req: ContactRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            company: req.company,
            service: req.service,
            budget: req.budget,
            message: req.message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactDto {
    fn from(c: Contact) -> Self {
        Self {
            id: c.id.to_string(),
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email.to_string(),
            phone: c.phone,
            company: c.company,
            service: c.service,
            budget: c.budget,
            message: c.message,
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// A library image as exposed over HTTP
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub id: String,
    pub image_url: String,
    pub storage_id: String,
    pub file_size: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LibraryImage> for ImageDto {
    fn from(image: LibraryImage) -> Self {
        Self {
            id: image.id.to_string(),
            image_url: image.media.url,
            storage_id: image.media.storage_id,
            file_size: image.file_size,
            created_at: image.created_at,
            updated_at: image.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsletterRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberDto {
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

impl From<Subscriber> for SubscriberDto {
    fn from(s: Subscriber) -> Self {
        Self {
            email: s.email.to_string(),
            subscribed_at: s.subscribed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub token: String,
    pub email: String,
    pub role: String,
    pub expires_at: DateTime<Utc>,
}

impl From<Session> for SessionDto {
    fn from(s: Session) -> Self {
        Self {
            token: s.token,
            email: s.email,
            role: s.role,
            expires_at: s.expires_at,
        }
    }
}
