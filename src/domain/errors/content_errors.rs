use crate::domain::{errors::ValidationError, value_objects::Collection};

/// Errors that can occur during content operations
#[derive(Debug, Clone)]
pub enum ContentError {
    /// Malformed or missing input
    Validation(ValidationError),

    /// Referenced record does not exist
    NotFound { collection: Collection, id: String },

    /// Contact submission not found
    ContactNotFound { id: String },

    /// Library image not found
    ImageNotFound { id: String },

    /// Object storage upload or delete failure
    Storage {
        operation: String,
        message: String,
    },

    /// Underlying document store failure
    Database { message: String },
}

impl ContentError {
    pub fn not_found(collection: Collection, id: impl ToString) -> Self {
        ContentError::NotFound {
            collection,
            id: id.to_string(),
        }
    }

    pub fn storage(operation: &str, message: impl ToString) -> Self {
        ContentError::Storage {
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }

    pub fn database(message: impl ToString) -> Self {
        ContentError::Database {
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ContentError::NotFound { .. }
                | ContentError::ContactNotFound { .. }
                | ContentError::ImageNotFound { .. }
        )
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::Validation(err) => write!(f, "{}", err),
            ContentError::NotFound { collection, id } => {
                write!(f, "{} not found: {}", collection.display_name(), id)
            }
            ContentError::ContactNotFound { id } => write!(f, "Contact not found: {}", id),
            ContentError::ImageNotFound { id } => write!(f, "Image not found: {}", id),
            ContentError::Storage { operation, message } => {
                write!(f, "Media storage {} failed: {}", operation, message)
            }
            ContentError::Database { message } => write!(f, "Database error: {}", message),
        }
    }
}

impl std::error::Error for ContentError {}

impl From<ValidationError> for ContentError {
    fn from(err: ValidationError) -> Self {
        ContentError::Validation(err)
    }
}

impl From<ContentError> for http::StatusCode {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::Validation(_) => http::StatusCode::BAD_REQUEST,
            ContentError::NotFound { .. }
            | ContentError::ContactNotFound { .. }
            | ContentError::ImageNotFound { .. } => http::StatusCode::NOT_FOUND,
            ContentError::Storage { .. } | ContentError::Database { .. } => {
                http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Result type for content operations
pub type ContentResult<T> = Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let validation = ContentError::from(ValidationError::MissingField("Title"));
        assert_eq!(
            http::StatusCode::from(validation),
            http::StatusCode::BAD_REQUEST
        );

        let missing = ContentError::not_found(Collection::Services, "abc");
        assert!(missing.is_not_found());
        assert_eq!(http::StatusCode::from(missing), http::StatusCode::NOT_FOUND);

        let storage = ContentError::Storage {
            operation: "upload".to_string(),
            message: "timeout".to_string(),
        };
        assert_eq!(
            http::StatusCode::from(storage),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = ContentError::not_found(Collection::Gallery, "42");
        assert_eq!(err.to_string(), "Gallery image not found: 42");
    }
}
