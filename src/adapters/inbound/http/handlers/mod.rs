pub mod auth_handlers;
pub mod contact_handlers;
pub mod image_handlers;
pub mod media_handlers;
pub mod multipart;
pub mod newsletter_handlers;
pub mod resource_handlers;

pub use auth_handlers::*;
pub use contact_handlers::*;
pub use image_handlers::*;
pub use media_handlers::*;
pub use newsletter_handlers::*;
pub use resource_handlers::*;
