pub mod auth;
pub mod bulk;
pub mod contact;
pub mod gallery;
pub mod image;
pub mod media;
pub mod ordering;
pub mod query;
pub mod resource;
pub mod subscriber;

pub use auth::{Claims, Credentials, Session};
pub use bulk::{BulkAction, GalleryStats, RECENT_ENTRIES};
pub use contact::{Contact, ContactStatus, ContactSubmission, NewContact};
pub use gallery::{parse_tags, GalleryCategory};
pub use image::{sort_newest_first, LibraryImage, IMAGE_LIBRARY_FOLDER};
pub use media::{content_type_for, extension_for, MediaUpload, MAX_UPLOAD_BYTES};
pub use ordering::{canonical_cmp, next_order, sort_canonical};
pub use query::{PageRequest, Pagination, ResourceFilter, ResourcePage, ResourceQuery};
pub use resource::{
    next_update_timestamp, now_micros, NewResource, Resource, ResourceDetails, ResourceDraft, ResourceFields,
    MAX_DESCRIPTION_LEN, MAX_TITLE_LEN,
};
pub use subscriber::{Subscriber, Subscription};
