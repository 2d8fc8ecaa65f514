// Backend construction
pub mod backends;

// MediaStore implementation
pub mod object_store_media;

pub use backends::{create_local_store, create_memory_store, create_s3_store, S3Config};
pub use object_store_media::{MediaSettings, ObjectStoreMediaAdapter};
