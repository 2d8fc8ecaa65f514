mod media_store;

pub use media_store::{FetchedMedia, MediaError, MediaResult, MediaStore, StoredMedia};
