use agency_content_server::{
    app::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD},
    create_in_memory_app,
};
use axum::http::StatusCode;
use axum_test::{
    multipart::{MultipartForm, Part},
    TestServer,
};
use serde_json::{json, Value};

async fn setup_test_server() -> TestServer {
    let services = create_in_memory_app().await.unwrap();
    TestServer::new(services.router()).unwrap()
}

async fn login(server: &TestServer) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": DEFAULT_ADMIN_EMAIL, "password": DEFAULT_ADMIN_PASSWORD }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["data"]["token"].as_str().unwrap().to_string()
}

fn video_form(title: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title)
        .add_text("youtubeUrl", "https://youtu.be/dQw4w9WgXcQ")
}

fn gallery_form(title: &str, category: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title)
        .add_text("category", category)
        .add_text("tags", "team, office")
        .add_part(
            "image",
            Part::bytes(b"jpeg-bytes".to_vec())
                .file_name("photo.jpg")
                .mime_type("image/jpeg"),
        )
}

async fn create(server: &TestServer, token: &str, path: &str, form: MultipartForm) -> Value {
    let response = server
        .post(path)
        .authorization_bearer(token)
        .multipart(form)
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["data"].clone()
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let server = setup_test_server().await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": DEFAULT_ADMIN_EMAIL, "password": "wrong" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_mutations_require_admin() {
    let server = setup_test_server().await;

    server
        .post("/api/videos")
        .multipart(video_form("Reel"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .delete("/api/services/some-id")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/api/newsletter")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/api/gallery/stats")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_video_lifecycle() {
    let server = setup_test_server().await;
    let token = login(&server).await;

    let video = create(&server, &token, "/api/videos", video_form("Showreel")).await;
    let id = video["id"].as_str().unwrap().to_string();
    assert_eq!(video["order"], 0);
    assert_eq!(video["youtubeId"], "dQw4w9WgXcQ");
    assert_eq!(video["isActive"], true);

    let response = server.get(&format!("/api/videos/{}", id)).await;
    response.assert_status_ok();

    let form = MultipartForm::new().add_text("title", "Showreel 2026");
    let response = server
        .put(&format!("/api/videos/{}", id))
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["title"], "Showreel 2026");

    let response = server.post(&format!("/api/videos/{}/view", id)).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["views"], 1);

    let response = server
        .patch(&format!("/api/videos/{}/order", id))
        .authorization_bearer(&token)
        .json(&json!({ "order": 7 }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["order"], 7);

    let response = server
        .delete(&format!("/api/videos/{}", id))
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    server
        .get(&format!("/api/videos/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inactive_entries_only_in_admin_listing() {
    let server = setup_test_server().await;
    let token = login(&server).await;

    let a = create(&server, &token, "/api/videos", video_form("A")).await;
    create(&server, &token, "/api/videos", video_form("B")).await;

    server
        .patch(&format!("/api/videos/{}/status", a["id"].as_str().unwrap()))
        .authorization_bearer(&token)
        .json(&json!({ "status": "inactive" }))
        .await
        .assert_status_ok();

    let public: Value = server.get("/api/videos").await.json();
    assert_eq!(public["count"], 1);
    assert_eq!(public["data"][0]["title"], "B");

    let admin: Value = server
        .get("/api/videos/admin/all")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(admin["count"], 2);

    let inactive: Value = server
        .get("/api/videos/admin/all?status=inactive")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(inactive["count"], 1);
    assert_eq!(inactive["data"][0]["title"], "A");
}

#[tokio::test]
async fn test_reorder_rejects_bad_requests() {
    let server = setup_test_server().await;
    let token = login(&server).await;
    let a = create(&server, &token, "/api/videos", video_form("A")).await;
    let a_id = a["id"].as_str().unwrap();

    for body in [
        json!({}),
        json!({ "ids": [] }),
        json!({ "ids": [a_id, a_id] }),
        json!({ "ids": [a_id, "unknown-id"] }),
    ] {
        let response = server
            .put("/api/videos/admin/order")
            .authorization_bearer(&token)
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    let unchanged: Value = server.get(&format!("/api/videos/{}", a_id)).await.json();
    assert_eq!(unchanged["data"]["order"], 0);
}

#[tokio::test]
async fn test_gallery_filters_pagination_and_bulk() {
    let server = setup_test_server().await;
    let token = login(&server).await;

    let mut ids = Vec::new();
    for i in 0..3 {
        let image = create(
            &server,
            &token,
            "/api/gallery",
            gallery_form(&format!("Team day {}", i), "Team Collaboration"),
        )
        .await;
        ids.push(image["id"].as_str().unwrap().to_string());
    }
    create(
        &server,
        &token,
        "/api/gallery",
        gallery_form("Newsletter", "Email Marketing"),
    )
    .await;

    let page: Value = server.get("/api/gallery?limit=2&page=2").await.json();
    assert_eq!(page["count"], 2);
    assert_eq!(page["pagination"]["total"], 4);
    assert_eq!(page["pagination"]["pages"], 2);
    assert_eq!(page["pagination"]["current"], 2);

    let filtered: Value = server
        .get("/api/gallery?category=Email%20Marketing")
        .await
        .json();
    assert_eq!(filtered["count"], 1);

    let searched: Value = server.get("/api/gallery?search=team%20day").await.json();
    assert_eq!(searched["count"], 3);

    server
        .get("/api/gallery?category=Underwater")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/gallery/bulk")
        .authorization_bearer(&token)
        .json(&json!({ "ids": ids, "action": "delete" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["affected"], 3);

    let stats: Value = server
        .get("/api/gallery/stats")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(stats["data"]["total"], 1);
}

#[tokio::test]
async fn test_unreachable_page_is_bad_request() {
    let server = setup_test_server().await;

    let response = server
        .get("/api/services?page=18446744073709551615&limit=2")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);

    server
        .get("/api/gallery?page=18446744073709551615")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let beyond_last: Value = server.get("/api/services?page=50&limit=2").await.json();
    assert_eq!(beyond_last["count"], 0);
    assert_eq!(beyond_last["pagination"]["current"], 50);
}

#[tokio::test]
async fn test_upload_must_be_an_image() {
    let server = setup_test_server().await;
    let token = login(&server).await;

    let form = MultipartForm::new()
        .add_text("title", "Not a picture")
        .add_part(
            "image",
            Part::bytes(b"plain text".to_vec())
                .file_name("notes.txt")
                .mime_type("text/plain"),
        );
    let response = server
        .post("/api/gallery")
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let all: Value = server
        .get("/api/gallery/admin/all")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(all["count"], 0);
}

#[tokio::test]
async fn test_contact_flow() {
    let server = setup_test_server().await;
    let token = login(&server).await;

    let response = server
        .post("/api/contacts")
        .json(&json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "service": "SEO",
            "message": "We need a new website."
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["status"], "new");

    server
        .post("/api/contacts")
        .json(&json!({ "firstName": "No", "lastName": "Email", "message": "hi" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let list: Value = server
        .get("/api/contacts")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(list["count"], 1);

    let response = server
        .patch(&format!("/api/contacts/{}/status", id))
        .authorization_bearer(&token)
        .json(&json!({ "status": "replied" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "replied");

    server
        .delete(&format!("/api/contacts/{}", id))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
    server
        .get(&format!("/api/contacts/{}", id))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_newsletter_signup() {
    let server = setup_test_server().await;
    let token = login(&server).await;

    let response = server
        .post("/api/newsletter")
        .json(&json!({ "email": "Reader@Example.com" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    server
        .post("/api/newsletter")
        .json(&json!({ "email": "reader@example.com" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .post("/api/newsletter")
        .json(&json!({ "email": "not-an-email" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .post("/api/newsletter")
        .json(&json!({}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let list: Value = server
        .get("/api/newsletter")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(list["count"], 1);
    assert_eq!(list["data"][0]["email"], "reader@example.com");
}

#[tokio::test]
async fn test_missing_media_is_not_found() {
    let server = setup_test_server().await;
    server
        .get("/media/digiora/gallery/nothing.png")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

fn image_form(bytes: &[u8], file_name: &str, mime: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(bytes.to_vec())
            .file_name(file_name)
            .mime_type(mime),
    )
}

#[tokio::test]
async fn test_image_library_lifecycle() {
    let server = setup_test_server().await;

    server
        .post("/api/images/upload")
        .multipart(image_form(b"banner", "banner.png", "image/png"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let token = login(&server).await;

    let missing = server
        .post("/api/images/upload")
        .authorization_bearer(&token)
        .multipart(MultipartForm::new().add_text("caption", "no file"))
        .await;
    missing.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = missing.json();
    assert_eq!(body["message"], "Image file is required");

    let uploaded = create(
        &server,
        &token,
        "/api/images/upload",
        image_form(b"banner", "banner.png", "image/png"),
    )
    .await;
    let id = uploaded["id"].as_str().unwrap().to_string();
    let storage_id = uploaded["storageId"].as_str().unwrap().to_string();
    assert!(storage_id.starts_with("digiora/images/"));
    assert!(uploaded["imageUrl"].as_str().unwrap().ends_with(&storage_id));
    assert_eq!(uploaded["fileSize"], 6);

    let list: Value = server.get("/api/images").await.json();
    assert_eq!(list["success"], true);
    assert_eq!(list["count"], 1);
    assert_eq!(list["data"][0]["id"], id.as_str());

    let served = server.get(&format!("/media/{}", storage_id)).await;
    served.assert_status_ok();
    assert_eq!(served.as_bytes().as_ref(), b"banner");

    let replaced = server
        .put(&format!("/api/images/{}", id))
        .authorization_bearer(&token)
        .multipart(image_form(b"banner v2", "banner.jpg", "image/jpeg"))
        .await;
    replaced.assert_status_ok();
    let body: Value = replaced.json();
    assert_eq!(body["message"], "Image updated successfully");
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["fileSize"], 9);
    assert_ne!(body["data"]["storageId"], storage_id.as_str());
    server
        .get(&format!("/media/{}", storage_id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .delete(&format!("/api/images/{}", id))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .delete(&format!("/api/images/{}", id))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    server
        .get(&format!("/api/images/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    let list: Value = server.get("/api/images").await.json();
    assert_eq!(list["count"], 0);
}
