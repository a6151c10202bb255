//! Resource services.
//!
//! Each service is a thin, borrowed view over the [`ApiClient`]: one method
//! per endpoint, one HTTP request per call, errors forwarded unmodified.
//!
//! ```rust,ignore
//! let product = api.products().get(ProductId::new(1)).await?;
//! api.cart().add(AddToCartRequest { product: product.id, quantity: 2 }).await?;
//! ```

mod auth;
mod cart;
mod orders;
mod products;
mod reviews;
mod users;

pub use auth::AuthService;
pub use cart::CartService;
pub use orders::OrderService;
pub use products::ProductService;
pub use reviews::ReviewService;
pub use users::UserService;

use crate::api::ApiClient;

impl ApiClient {
    /// Registration and JWT token endpoints.
    #[must_use]
    pub const fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    /// Server-side cart endpoints.
    #[must_use]
    pub const fn cart(&self) -> CartService<'_> {
        CartService::new(self)
    }

    /// Order endpoints.
    #[must_use]
    pub const fn orders(&self) -> OrderService<'_> {
        OrderService::new(self)
    }

    /// Catalog endpoints: products, categories and tags.
    #[must_use]
    pub const fn products(&self) -> ProductService<'_> {
        ProductService::new(self)
    }

    /// Product review endpoints.
    #[must_use]
    pub const fn reviews(&self) -> ReviewService<'_> {
        ReviewService::new(self)
    }

    /// Profile endpoints for the authenticated user.
    #[must_use]
    pub const fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use wiremock::MockServer;

    use crate::api::ApiClient;
    use crate::config::ClientConfig;
    use crate::tokens::MemoryTokenStore;

    /// Client pointed at a mock server, with no stored tokens.
    #[allow(clippy::unwrap_used)]
    pub fn client_for(server: &MockServer) -> ApiClient {
        let config = ClientConfig::with_api_url(&server.uri()).unwrap();
        ApiClient::new(&config, Arc::new(MemoryTokenStore::new())).unwrap()
    }
}
