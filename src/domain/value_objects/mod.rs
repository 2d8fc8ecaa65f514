mod collection;
mod email;
mod media_ref;
mod resource_id;
mod resource_status;
mod youtube;

pub use collection::Collection;
pub use email::EmailAddress;
pub use media_ref::MediaRef;
pub use resource_id::ResourceId;
pub use resource_status::ResourceStatus;
pub use youtube::YoutubeVideoId;
