mod common;

use axum::http::StatusCode;
use common::{app, empty_request, read_json, timestamp};
use http_helpers::{json_request, raw_json_request};
use serde_json::json;
use tower::ServiceExt;

const MISSING_ID: &str = "64b7f0c2a1b2c3d4e5f60718";

fn sample_image() -> serde_json::Value {
    json!({
        "title": "Test Image",
        "artist": "Test Artist",
        "year": 2023,
        "medium": "Oil on canvas",
        "dimensions": "24x36 inches",
        "category": "Painting",
        "description": "A test image for API testing",
        "tags": ["test", "sample"],
        "image_url": "https://example.com/test-image.jpg"
    })
}

async fn create(app: &common::App, body: serde_json::Value) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/images", body))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

#[tokio::test]
async fn image_lifecycle_scenario() {
    let app = app();

    let created = create(
        &app,
        json!({
            "title": "Test Image",
            "artist": "Test Artist",
            "image_url": "https://x/y.jpg"
        }),
    )
    .await;
    let id = created["_id"].as_str().expect("_id").to_string();

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/images"))
        .await
        .expect("list");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await.as_array().expect("array").len(), 1);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/images/{id}"),
            json!({ "title": "Updated" }),
        ))
        .await
        .expect("update");
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["title"], "Updated");
    assert_eq!(updated["artist"], "Test Artist");

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/images/{id}")))
        .await
        .expect("delete");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "Image deleted successfully" })
    );

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/images/{id}")))
        .await
        .expect("get");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await, json!({ "message": "Image not found" }));
}

#[tokio::test]
async fn create_returns_every_field_with_id_and_timestamps() {
    let app = app();
    let created = create(&app, sample_image()).await;

    for (field, value) in sample_image().as_object().expect("object") {
        assert_eq!(&created[field], value, "field {field}");
    }
    let id = created["_id"].as_str().expect("_id");
    assert_eq!(id.len(), 24);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(
        timestamp(&created, "createdAt"),
        timestamp(&created, "updatedAt")
    );

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/images/{id}")))
        .await
        .expect("get");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, created);
}

#[tokio::test]
async fn create_coerces_loose_input() {
    let app = app();
    let created = create(
        &app,
        json!({
            "title": "Loose",
            "artist": "Someone",
            "year": "1999",
            "tags": "single",
            "image_url": "https://x/loose.jpg"
        }),
    )
    .await;
    assert_eq!(created["year"], 1999);
    assert_eq!(created["tags"], json!(["single"]));

    let bare = create(
        &app,
        json!({ "title": "Bare", "artist": "Someone", "image_url": "https://x/bare.jpg" }),
    )
    .await;
    assert_eq!(bare["tags"], json!([]));
    assert!(bare.get("year").is_none());
}

#[tokio::test]
async fn create_rejects_missing_or_empty_required_fields() {
    let app = app();
    for field in ["title", "artist", "image_url"] {
        let mut body = sample_image();
        body.as_object_mut().expect("object").remove(field);
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/images", body))
            .await
            .expect("create");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "missing {field}");
        let json = read_json(response).await;
        assert_eq!(json["message"], "Error creating image");
        assert!(json["error"].as_str().expect("error").contains(field));

        let mut body = sample_image();
        body[field] = json!("");
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/images", body))
            .await
            .expect("create");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "empty {field}");
    }

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/images"))
        .await
        .expect("list");
    assert_eq!(read_json(response).await, json!([]));
}

#[tokio::test]
async fn create_rejects_unreadable_bodies() {
    let app = app();
    let response = app
        .clone()
        .oneshot(raw_json_request("POST", "/api/images", "{not json"))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["message"], "Error creating image");

    let mut body = sample_image();
    body["year"] = json!("nineteen");
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/images", body))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_merges_and_advances_updated_at() {
    let app = app();
    let created = create(&app, sample_image()).await;
    let id = created["_id"].as_str().expect("_id");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/images/{id}"),
            json!({ "medium": "Watercolor", "tags": ["new"] }),
        ))
        .await
        .expect("update");
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["medium"], "Watercolor");
    assert_eq!(updated["tags"], json!(["new"]));
    for field in ["title", "artist", "year", "dimensions", "category", "image_url"] {
        assert_eq!(updated[field], created[field], "field {field}");
    }
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert!(timestamp(&updated, "updatedAt") > timestamp(&created, "updatedAt"));

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/images/{id}")))
        .await
        .expect("get");
    assert_eq!(read_json(response).await, updated);
}

#[tokio::test]
async fn update_rejects_blanked_required_field() {
    let app = app();
    let created = create(&app, sample_image()).await;
    let id = created["_id"].as_str().expect("_id");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/images/{id}"),
            json!({ "artist": "" }),
        ))
        .await
        .expect("update");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["message"], "Error updating image");

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/images/{id}")))
        .await
        .expect("get");
    assert_eq!(read_json(response).await, created);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = app();
    let uri = format!("/api/images/{MISSING_ID}");

    for request in [
        empty_request("GET", &uri),
        json_request("PUT", &uri, json!({ "title": "Nope" })),
        empty_request("DELETE", &uri),
    ] {
        let response = app.clone().oneshot(request).await.expect("request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await, json!({ "message": "Image not found" }));
    }
}

#[tokio::test]
async fn malformed_ids_fail_per_operation() {
    let app = app();
    let uri = "/api/images/invalid-id-format";

    let response = app
        .clone()
        .oneshot(empty_request("GET", uri))
        .await
        .expect("get");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(response).await["message"], "Error fetching image");

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", uri))
        .await
        .expect("delete");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(response).await["message"], "Error deleting image");

    let response = app
        .clone()
        .oneshot(json_request("PUT", uri, json!({ "title": "x" })))
        .await
        .expect("update");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["message"], "Error updating image");
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = app();
    let mut ids = Vec::new();
    for title in ["first", "second", "third"] {
        let mut body = sample_image();
        body["title"] = json!(title);
        ids.push(create(&app, body).await["_id"].clone());
    }

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/images"))
        .await
        .expect("list");
    let listed: Vec<serde_json::Value> = read_json(response)
        .await
        .as_array()
        .expect("array")
        .iter()
        .map(|image| image["_id"].clone())
        .collect();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn null_required_field_on_update_is_rejected() {
    let app = app();
    let created = create(&app, sample_image()).await;
    let uri = format!("/api/images/{}", created["_id"].as_str().expect("_id"));

    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, json!({ "artist": null })))
        .await
        .expect("update");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({
            "message": "Error updating image",
            "error": "Validation failed: artist: Path `artist` is required."
        })
    );

    let response = app
        .clone()
        .oneshot(empty_request("GET", &uri))
        .await
        .expect("get");
    assert_eq!(read_json(response).await, created);
}

#[tokio::test]
async fn null_optional_field_on_update_removes_it() {
    let app = app();
    let created = create(&app, sample_image()).await;
    assert_eq!(created["medium"], "Oil on canvas");
    let uri = format!("/api/images/{}", created["_id"].as_str().expect("_id"));

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({ "medium": null, "tags": null }),
        ))
        .await
        .expect("update");
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert!(updated.get("medium").is_none());
    assert_eq!(updated["tags"], json!([]));
    assert_eq!(updated["artist"], created["artist"]);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &uri))
        .await
        .expect("get");
    let fetched = read_json(response).await;
    assert!(fetched.get("medium").is_none());
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn scalar_values_are_cast_to_strings() {
    let app = app();
    let created = create(
        &app,
        json!({
            "title": 2024,
            "artist": "Test Artist",
            "category": true,
            "image_url": "https://x/2024.jpg"
        }),
    )
    .await;
    assert_eq!(created["title"], "2024");
    assert_eq!(created["category"], "true");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/images",
            json!({
                "title": { "en": "Dawn" },
                "artist": "Test Artist",
                "image_url": "https://x/dawn.jpg"
            }),
        ))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["message"], "Error creating image");
}
