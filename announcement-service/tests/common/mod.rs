#![allow(dead_code)]

use announcement_service::config::{AnnouncementConfig, MongoConfig, StoreBackend, StoreConfig};
use announcement_service::services::{AnnouncementStore, InMemoryAnnouncementStore};
use announcement_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub const SAMPLE_BODY: &str =
    r#"{"isActive":true,"title":"t","content":"c","date":"2024-01-01T00:00:00Z"}"#;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<dyn AnnouncementStore>,
}

pub fn test_config() -> AnnouncementConfig {
    AnnouncementConfig {
        // Use random port for testing (port 0)
        common: CoreConfig { port: 0 },
        store: StoreConfig {
            backend: StoreBackend::Memory,
            mongodb: MongoConfig {
                uri: String::new(),
                database: "test".to_string(),
                collection: "announcements".to_string(),
            },
        },
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_store(Arc::new(InMemoryAnnouncementStore::new())).await
    }

    pub async fn spawn_with_store(store: Arc<dyn AnnouncementStore>) -> Self {
        let app = Application::build_with_store(test_config(), store)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let store = app.store();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Creates an announcement over HTTP and returns its id.
    pub async fn create(&self, client: &reqwest::Client, body: &str) -> String {
        let response = client
            .post(self.url("/api/announcements"))
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 200);

        let text = response.text().await.expect("Failed to read body");
        text.strip_prefix("Inserted document with ID: ")
            .expect("Unexpected create response")
            .to_string()
    }
}
