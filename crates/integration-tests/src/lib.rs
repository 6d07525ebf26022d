//! End-to-end test harness for the Showroom server.
//!
//! Each [`TestContext`] runs the real router on an ephemeral local port with
//! fresh in-memory stores and a private uploads directory, and drives it
//! with a `reqwest` client that keeps session cookies.
//!
//! ```rust,ignore
//! #[tokio::test]
//! async fn test_health() {
//!     let ctx = TestContext::new().await;
//!     let resp = ctx.get("/health").await;
//!     assert_eq!(resp.status(), 200);
//! }
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;

use reqwest::{Client, Response, StatusCode};
use serde_json::{Value, json};
use tempfile::TempDir;

use showroom_server::config::ServerConfig;
use showroom_server::state::AppState;

/// Username of the bootstrap admin in every test server.
pub const ADMIN_USERNAME: &str = "admin";

/// Password of the bootstrap admin in every test server.
pub const ADMIN_PASSWORD: &str = "test-password-123";

/// A running server plus a cookie-keeping client.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub state: AppState,
    /// Uploads land here; removed when the context drops.
    pub uploads: TempDir,
}

impl TestContext {
    /// Start a server seeded with the built-in demo catalog.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Start a server with an empty catalog.
    pub async fn empty() -> Self {
        Self::with_config(|config| config.seed.enabled = false).await
    }

    /// Start a server after adjusting the default test configuration.
    pub async fn with_config(adjust: impl FnOnce(&mut ServerConfig)) -> Self {
        let uploads = tempfile::tempdir().unwrap();

        let mut config = ServerConfig::default();
        config.uploads_dir = uploads.path().to_path_buf();
        config.default_admin.password = ADMIN_PASSWORD.into();
        adjust(&mut config);

        let state = AppState::new(config);
        showroom_server::bootstrap(&state).await.unwrap();

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        let app = showroom_server::app(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder().cookie_store(true).build().unwrap();

        Self {
            client,
            base_url: format!("http://{addr}"),
            state,
            uploads,
        }
    }

    /// Absolute URL for a server path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.client.delete(self.url(path)).send().await.unwrap()
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> Response {
        self.client.put(self.url(path)).json(body).send().await.unwrap()
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client.post(self.url(path)).json(body).send().await.unwrap()
    }

    pub async fn post_form(&self, path: &str, form: reqwest::multipart::Form) -> Response {
        self.client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .unwrap()
    }

    /// Log in with the given credentials.
    pub async fn login_as(&self, username: &str, password: &str) -> Response {
        self.post_json(
            "/api/admin/login",
            &json!({ "username": username, "password": password }),
        )
        .await
    }

    /// Log in as the bootstrap admin, asserting success.
    pub async fn login(&self) {
        let resp = self.login_as(ADMIN_USERNAME, ADMIN_PASSWORD).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

/// Read a JSON response body.
pub async fn json_body(resp: Response) -> Value {
    resp.json().await.unwrap()
}

/// A multipart form for the "Lamp" product, without an image.
#[must_use]
pub fn lamp_form() -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("name", "Lamp")
        .text("description", "A warm reading lamp")
        .text("category", "furniture")
        .text("subcategory", "chairs")
        .text("mrp", "100")
        .text("discount", "20")
}
