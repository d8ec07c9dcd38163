mod common;

use announcement_service::dtos::AnnouncementResponse;
use chrono::{TimeZone, Utc};
use common::{TestApp, SAMPLE_BODY};
use reqwest::{Client, StatusCode};

const MISSING_ID: &str = "65a1b2c3d4e5f6a7b8c9d0e1";

// =============================================================================
// Health Check
// =============================================================================

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(app.url("/health"))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "announcement-service");
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .get(app.url("/ready"))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
}

// =============================================================================
// CRUD lifecycle
// =============================================================================

#[tokio::test]
async fn create_get_delete_lifecycle() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let id = app.create(&client, SAMPLE_BODY).await;
    assert_eq!(id.len(), 24);

    let response = client
        .get(app.url(&format!("/api/announcements/{}", id)))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let announcement: AnnouncementResponse = response.json().await.expect("Failed to parse");
    assert_eq!(announcement.id.as_deref(), Some(id.as_str()));
    assert!(announcement.is_active);
    assert_eq!(announcement.title, "t");
    assert_eq!(announcement.content, "c");
    assert_eq!(
        announcement.date,
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    );

    let response = client
        .delete(app.url(&format!("/api/announcements/{}", id)))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.text().await.unwrap(),
        format!("Deleted document with ID: {}", id)
    );

    let response = client
        .get(app.url(&format!("/api/announcements/{}", id)))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "Document not found");
}

#[tokio::test]
async fn get_all_on_empty_store_returns_empty_array() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .get(app.url("/api/announcements"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "[]");
}

#[tokio::test]
async fn get_all_returns_every_announcement() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let first = app.create(&client, SAMPLE_BODY).await;
    let second = app
        .create(
            &client,
            r#"{"isActive":false,"title":"second","content":"","date":"2024-02-01T08:30:00Z"}"#,
        )
        .await;

    let announcements: Vec<AnnouncementResponse> = client
        .get(app.url("/api/announcements"))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse");

    let ids: Vec<_> = announcements.iter().filter_map(|a| a.id.clone()).collect();
    assert_eq!(ids, vec![first, second]);
    assert!(!announcements[1].is_active);
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = TestApp::spawn().await;
    let client = Client::new();
    let id = app.create(&client, SAMPLE_BODY).await;

    let response = client
        .put(app.url(&format!("/api/announcements/{}", id)))
        .body(r#"{"isActive":false,"title":"new","content":"changed","date":"2025-03-04T05:06:07Z"}"#)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.text().await.unwrap(),
        format!("Updated document with ID: {}", id)
    );

    let announcement: AnnouncementResponse = client
        .get(app.url(&format!("/api/announcements/{}", id)))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse");
    assert_eq!(announcement.id.as_deref(), Some(id.as_str()));
    assert!(!announcement.is_active);
    assert_eq!(announcement.title, "new");
    assert_eq!(announcement.content, "changed");
}

#[tokio::test]
async fn update_of_missing_id_is_a_successful_no_op() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .put(app.url(&format!("/api/announcements/{}", MISSING_ID)))
        .body(SAMPLE_BODY)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(app.url(&format!("/api/announcements/{}", MISSING_ID)))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_of_missing_id_succeeds() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .delete(app.url(&format!("/api/announcements/{}", MISSING_ID)))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Client errors
// =============================================================================

#[tokio::test]
async fn malformed_ids_are_bad_requests() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    for path in [
        "/api/announcements/not-an-id",
        "/api/announcements/",
        "/api/announcements/65a1b2c3d4e5f6a7b8c9d0e1/extra",
    ] {
        let get = client.get(app.url(path)).send().await.unwrap();
        assert_eq!(get.status(), StatusCode::BAD_REQUEST, "GET {}", path);

        let put = client
            .put(app.url(path))
            .body(SAMPLE_BODY)
            .send()
            .await
            .unwrap();
        assert_eq!(put.status(), StatusCode::BAD_REQUEST, "PUT {}", path);

        let delete = client.delete(app.url(path)).send().await.unwrap();
        assert_eq!(delete.status(), StatusCode::BAD_REQUEST, "DELETE {}", path);
    }
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(app.url("/api/announcements"))
        .body("{\"title\":")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .put(app.url(&format!("/api/announcements/{}", MISSING_ID)))
        .body("[1, 2, 3]")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(app.store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_date_is_stored_as_zero_time() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let id = app.create(&client, r#"{"title":"nodate"}"#).await;

    let response = client
        .get(app.url(&format!("/api/announcements/{}", id)))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse");
    assert_eq!(body["title"], "nodate");
    assert_eq!(body["isActive"], false);
    assert_eq!(body["content"], "");
    assert_eq!(body["date"], "0001-01-01T00:00:00Z");
}

#[tokio::test]
async fn lenient_bodies_are_accepted() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let null_id = app.create(&client, "null").await;
    let trailing_id = app.create(&client, r#"{"title":"a"} {"x":1}"#).await;

    let stored = app
        .store
        .find_one(null_id.parse().unwrap())
        .await
        .unwrap();
    assert_eq!(stored.title, "");

    let stored = app
        .store
        .find_one(trailing_id.parse().unwrap())
        .await
        .unwrap();
    assert_eq!(stored.title, "a");

    let response = client
        .put(app.url(&format!("/api/announcements/{}", trailing_id)))
        .body("null")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .post(app.url("/api/announcements"))
        .body("")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "EOF");
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let id = app
        .create(
            &client,
            &format!(
                r#"{{"_id":"{}","isActive":true,"title":"t","content":"c","date":"2024-01-01T00:00:00Z"}}"#,
                MISSING_ID
            ),
        )
        .await;

    assert_ne!(id, MISSING_ID);
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn every_response_carries_cors_headers() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let responses = [
        client.get(app.url("/api/announcements")).send().await.unwrap(),
        client
            .get(app.url("/api/announcements/bogus"))
            .send()
            .await
            .unwrap(),
        client
            .get(app.url(&format!("/api/announcements/{}", MISSING_ID)))
            .send()
            .await
            .unwrap(),
        client.get(app.url("/nowhere")).send().await.unwrap(),
    ];

    for response in responses {
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(
            headers["access-control-allow-methods"],
            "POST, GET, OPTIONS, PUT, DELETE"
        );
        assert_eq!(headers["access-control-allow-credentials"], "true");
        assert!(headers.contains_key("access-control-allow-headers"));
    }
}

#[tokio::test]
async fn preflight_returns_empty_ok() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .request(
            reqwest::Method::OPTIONS,
            app.url(&format!("/api/announcements/{}", MISSING_ID)),
        )
        .header("Origin", "https://example.com")
        .header("Access-Control-Request-Method", "DELETE")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert!(response.text().await.unwrap().is_empty());
}
