//! Integration tests for the Pasta House storefront client.
//!
//! Each test drives a [`UserStore`] against a [`wiremock`] server standing in
//! for the backend.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pasta-house-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pasta_house_storefront::tokens::{FileTokenStore, MemoryTokenStore, TokenStore};
use pasta_house_storefront::{ApiClient, ClientConfig, UserStore};

/// Mock backend plus a store wired to it.
pub struct TestContext {
    pub server: MockServer,
    pub tokens: Arc<dyn TokenStore>,
    pub store: UserStore,
}

impl TestContext {
    /// Fresh backend and a store with in-memory tokens.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let store = store_for(&server, tokens.clone());
        Self {
            server,
            tokens,
            store,
        }
    }

    /// Fresh backend and a store whose tokens persist to `path`.
    ///
    /// # Panics
    ///
    /// Panics if the token file cannot be opened or the client cannot be built.
    pub async fn with_token_file(path: &Path) -> Self {
        let server = MockServer::start().await;
        let tokens = open_file_tokens(path);
        let store = store_for(&server, tokens.clone());
        Self {
            server,
            tokens,
            store,
        }
    }

    /// A second store against the same backend, as a new process would see it.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn restart(&self, tokens: Arc<dyn TokenStore>) -> UserStore {
        store_for(&self.server, tokens)
    }
}

/// # Panics
///
/// Panics if the token file cannot be opened.
#[must_use]
pub fn open_file_tokens(path: &Path) -> Arc<dyn TokenStore> {
    Arc::new(FileTokenStore::open(path).expect("open token file"))
}

fn store_for(server: &MockServer, tokens: Arc<dyn TokenStore>) -> UserStore {
    let config = ClientConfig::with_api_url(&server.uri()).expect("mock server URL");
    UserStore::new(ApiClient::new(&config, tokens).expect("build client"))
}

// =============================================================================
// Fixtures
// =============================================================================

/// Product JSON as the backend serializes it.
#[must_use]
pub fn product_json(id: i64, name: &str, price: &str, quantity: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name}, made fresh daily"),
        "price": price,
        "image": null,
        "rating": "4.00",
        "category": null,
        "tags": [],
        "in_stock": quantity > 0,
        "quantity": quantity,
        "created_at": "2025-03-01T12:00:00Z",
        "updated_at": "2025-03-01T12:00:00Z"
    })
}

/// Profile JSON for user 5, Ada.
#[must_use]
pub fn profile_json() -> Value {
    json!({
        "id": 5,
        "email": "ada@example.com",
        "name": "Ada",
        "username": "ada",
        "is_staff": false,
        "created_at": "2025-05-01T09:30:00Z"
    })
}

/// Mount the token and profile endpoints for a successful sign-in as Ada.
pub async fn mount_sign_in(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/token/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"refresh": "refresh-ada", "access": "access-ada"})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .mount(server)
        .await;
}

/// Mount `GET /api/products/{id}` for each product JSON.
pub async fn mount_products(server: &MockServer, products: &[Value]) {
    for product in products {
        let id = &product["id"];
        Mock::given(method("GET"))
            .and(path(format!("/api/products/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(product))
            .mount(server)
            .await;
    }
}
