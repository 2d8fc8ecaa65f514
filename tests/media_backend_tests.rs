use agency_content_server::{
    adapters::outbound::storage::S3Config,
    domain::models::{MediaUpload, ResourceFields},
    ports::storage::MediaError,
    AppBuilder, Collection, StorageBackend,
};

fn gallery_fields() -> ResourceFields {
    ResourceFields {
        title: Some("Office opening".to_string()),
        category: Some("Team Collaboration".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_local_backend_round_trip() {
    let root = std::env::temp_dir().join(format!("agency-media-{}", uuid::Uuid::new_v4()));
    let app = AppBuilder::new()
        .with_storage_backend(StorageBackend::Local { root: root.clone() })
        .build()
        .await
        .unwrap();

    let image = app
        .resources
        .create(
            Collection::Gallery,
            gallery_fields(),
            Some(MediaUpload::new(&b"webp-bytes"[..], "image/webp")),
        )
        .await
        .unwrap();
    let media = image.media.clone().unwrap();
    assert!(media.storage_id.starts_with("digiora/gallery/"));
    assert!(media.storage_id.ends_with(".webp"));
    assert!(root.join(&media.storage_id).exists());

    let fetched = app.media.fetch(&media.storage_id).await.unwrap();
    assert_eq!(fetched.data.as_ref(), b"webp-bytes");
    assert_eq!(fetched.content_type, "image/webp");

    app.resources
        .delete(Collection::Gallery, &image.id)
        .await
        .unwrap();
    assert!(!root.join(&media.storage_id).exists());
    assert!(matches!(
        app.media.delete(&media.storage_id).await,
        Err(MediaError::NotFound(_))
    ));

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn test_storage_ids_cannot_escape_the_store() {
    let app = agency_content_server::create_in_memory_app().await.unwrap();
    let result = app.media.fetch("digiora/../secrets.txt").await;
    assert!(matches!(result, Err(MediaError::InvalidId(_))));
}

// Note: this test requires an S3-compatible server (e.g. MinIO) configured via:
// - MINIO_ENDPOINT (default: http://localhost:9000)
// - MINIO_ACCESS_KEY_ID (default: minioadmin)
// - MINIO_SECRET_ACCESS_KEY (default: minioadmin)
// - MINIO_BUCKET (default: test-bucket)

#[tokio::test]
#[ignore = "requires MinIO server to be running"]
async fn test_s3_backend_round_trip() {
    let endpoint =
        std::env::var("MINIO_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string());
    let access_key =
        std::env::var("MINIO_ACCESS_KEY_ID").unwrap_or_else(|_| "minioadmin".to_string());
    let secret_key =
        std::env::var("MINIO_SECRET_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());
    let bucket = std::env::var("MINIO_BUCKET").unwrap_or_else(|_| "test-bucket".to_string());

    let app = AppBuilder::new()
        .with_storage_backend(StorageBackend::S3(S3Config {
            bucket,
            region: "us-east-1".to_string(),
            access_key: Some(access_key),
            secret_key: Some(secret_key),
            endpoint: Some(endpoint),
        }))
        .build()
        .await
        .unwrap();

    let image = app
        .resources
        .create(
            Collection::Gallery,
            gallery_fields(),
            Some(MediaUpload::new(&b"png-bytes"[..], "image/png")),
        )
        .await
        .unwrap();
    let storage_id = image.media.clone().unwrap().storage_id;

    let fetched = app.media.fetch(&storage_id).await.unwrap();
    assert_eq!(fetched.data.as_ref(), b"png-bytes");

    app.resources
        .delete(Collection::Gallery, &image.id)
        .await
        .unwrap();
    assert!(matches!(
        app.media.fetch(&storage_id).await,
        Err(MediaError::NotFound(_))
    ));
}
