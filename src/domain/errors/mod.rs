mod auth_errors;
mod content_errors;
mod validation_errors;

pub use auth_errors::*;
pub use content_errors::*;
pub use validation_errors::*;
