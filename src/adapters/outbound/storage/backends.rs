use object_store::{
    aws::AmazonS3Builder, local::LocalFileSystem, memory::InMemory,
    ObjectStore as ObjectStoreBackend,
};
use std::{path::Path, sync::Arc};

/// Configuration for S3 storage backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub endpoint: Option<String>,
}

pub fn create_memory_store() -> Arc<dyn ObjectStoreBackend> {
    Arc::new(InMemory::new())
}

/// Filesystem store rooted at `root`, created if missing
pub fn create_local_store(root: &Path) -> object_store::Result<Arc<dyn ObjectStoreBackend>> {
    std::fs::create_dir_all(root).map_err(|e| object_store::Error::Generic {
        store: "LocalFileSystem",
        source: Box::new(e),
    })?;
    Ok(Arc::new(LocalFileSystem::new_with_prefix(root)?))
}

/// Create an S3 store from configuration
pub fn create_s3_store(config: &S3Config) -> object_store::Result<Arc<dyn ObjectStoreBackend>> {
    let mut builder = AmazonS3Builder::new()
        .with_bucket_name(&config.bucket)
        .with_region(&config.region);

    if let Some(access_key) = &config.access_key {
        builder = builder.with_access_key_id(access_key);
    }

    if let Some(secret_key) = &config.secret_key {
        builder = builder.with_secret_access_key(secret_key);
    }

    if let Some(endpoint) = &config.endpoint {
        builder = builder
            .with_endpoint(endpoint)
            .with_allow_http(endpoint.starts_with("http://"));
    }

    Ok(Arc::new(builder.build()?))
}
