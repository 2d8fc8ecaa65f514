pub mod auth;
pub mod dto;
pub mod handlers;
pub mod router;

pub use auth::AdminSession;
pub use dto::*;
pub use router::*;
