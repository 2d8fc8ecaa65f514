/// Validation errors for domain input and value objects
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // Text field errors
    MissingField(&'static str),
    FieldTooLong {
        field: &'static str,
        actual: usize,
        max: usize,
    },
    InvalidField {
        field: String,
        value: String,
        expected: String,
    },

    // Resource errors
    EmptyResourceId,
    InvalidResourceId(String),
    InvalidStatus(String),
    UnknownCollection(String),
    InvalidCategory(String),
    InvalidYoutubeUrl(String),
    MediaRequired(&'static str),
    UnsupportedMediaType(String),
    MediaTooLarge {
        actual: usize,
        max: usize,
    },
    DuplicateId(String),

    // Contact and newsletter errors
    InvalidEmail(String),
    InvalidContactStatus(String),
    AlreadySubscribed(String),

    // Listing errors
    PageOutOfRange {
        page: usize,
        limit: usize,
    },

    // Bulk operation errors
    EmptyIdList,
    InvalidBulkAction(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingField(field) => write!(f, "{} is required", field),
            ValidationError::FieldTooLong { field, actual, max } => {
                write!(
                    f,
                    "{} cannot exceed {} characters (got {})",
                    field, max, actual
                )
            }
            ValidationError::InvalidField {
                field,
                value,
                expected,
            } => {
                write!(
                    f,
                    "Invalid value for field '{}': '{}' (expected: {})",
                    field, value, expected
                )
            }

            ValidationError::EmptyResourceId => write!(f, "Resource id cannot be empty"),
            ValidationError::InvalidResourceId(id) => write!(f, "Invalid resource id: '{}'", id),
            ValidationError::InvalidStatus(status) => {
                write!(
                    f,
                    "Invalid status '{}'. Must be active or inactive",
                    status
                )
            }
            ValidationError::UnknownCollection(name) => {
                write!(f, "Unknown collection: '{}'", name)
            }
            ValidationError::InvalidCategory(category) => {
                write!(f, "Invalid gallery category: '{}'", category)
            }
            ValidationError::InvalidYoutubeUrl(url) => write!(f, "Invalid YouTube URL: '{}'", url),
            ValidationError::MediaRequired(what) => write!(f, "{} file is required", what),
            ValidationError::UnsupportedMediaType(content_type) => {
                write!(
                    f,
                    "Only image files are allowed (got '{}')",
                    content_type
                )
            }
            ValidationError::MediaTooLarge { actual, max } => {
                write!(f, "File too large: {} bytes (max: {})", actual, max)
            }
            ValidationError::DuplicateId(id) => {
                write!(f, "Id '{}' appears more than once", id)
            }

            ValidationError::InvalidEmail(email) => {
                write!(f, "Valid email address is required (got '{}')", email)
            }
            ValidationError::InvalidContactStatus(status) => {
                write!(
                    f,
                    "Invalid contact status '{}'. Must be new, read, replied or archived",
                    status
                )
            }
            ValidationError::AlreadySubscribed(_) => write!(f, "Email is already subscribed"),

            ValidationError::PageOutOfRange { page, limit } => {
                write!(f, "Page {} with limit {} is out of range", page, limit)
            }

            ValidationError::EmptyIdList => write!(f, "Ids array is required"),
            ValidationError::InvalidBulkAction(action) => {
                write!(f, "Invalid bulk action: '{}'", action)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
