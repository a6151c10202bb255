//! Server-side cart service.

use tracing::instrument;

use pasta_house_core::CartItemId;

use crate::api::{ApiClient, ApiError};
use crate::models::{AddToCartRequest, CartItem, MessageResponse, UpdateCartItemRequest};

/// Cart endpoints (`/api/cart`).
#[derive(Debug, Clone, Copy)]
pub struct CartService<'a> {
    api: &'a ApiClient,
}

impl<'a> CartService<'a> {
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// List the items in the user's cart.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CartItem>, ApiError> {
        self.api.get("/api/cart").await
    }

    /// Add a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn add(&self, request: AddToCartRequest) -> Result<CartItem, ApiError> {
        self.api.post("/api/cart", &request).await
    }

    /// Change the quantity of a cart item.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: CartItemId,
        request: UpdateCartItemRequest,
    ) -> Result<CartItem, ApiError> {
        self.api.put(&format!("/api/cart/{id}"), &request).await
    }

    /// Remove a single item.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: CartItemId) -> Result<MessageResponse, ApiError> {
        self.api.delete(&format!("/api/cart/{id}")).await
    }

    /// Remove every item.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<MessageResponse, ApiError> {
        self.api.delete("/api/cart").await
    }
}
