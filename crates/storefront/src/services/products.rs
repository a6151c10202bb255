//! Catalog service: products, categories and tags.
//!
//! Create, update and delete calls are staff-only; the backend answers 403
//! for anyone else and that error is returned as-is.

use tracing::instrument;

use pasta_house_core::ProductId;

use crate::api::{ApiClient, ApiError};
use crate::models::{
    Category, LatestProductsQuery, MessageResponse, NewCategory, Product, ProductInput,
    ProductList, ProductQuery, Tag,
};

/// Catalog endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ProductService<'a> {
    api: &'a ApiClient,
}

impl<'a> ProductService<'a> {
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Search and page through products.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &ProductQuery) -> Result<ProductList, ApiError> {
        self.api.get_with_query("/api/products", query).await
    }

    /// Most recently added products.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn latest(&self, query: &LatestProductsQuery) -> Result<Vec<Product>, ApiError> {
        self.api.get_with_query("/api/products/latest/", query).await
    }

    /// Fetch one product.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified (404 for unknown IDs).
    #[instrument(skip(self))]
    pub async fn get(&self, id: ProductId) -> Result<Product, ApiError> {
        self.api.get(&format!("/api/products/{id}")).await
    }

    /// Create a product (staff only).
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &ProductInput) -> Result<Product, ApiError> {
        self.api.post("/api/products", input).await
    }

    /// Update the fields set in `input` (staff only).
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: ProductId, input: &ProductInput) -> Result<Product, ApiError> {
        self.api.put(&format!("/api/products/{id}"), input).await
    }

    /// Delete a product (staff only).
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<MessageResponse, ApiError> {
        self.api.delete(&format!("/api/products/{id}")).await
    }

    // =========================================================================
    // Categories & tags
    // =========================================================================

    /// All categories.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.api.get("/api/categories").await
    }

    /// Create a category (staff only).
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self), fields(name = %category.name))]
    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, ApiError> {
        self.api.post("/api/categories", category).await
    }

    /// All tags.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.api.get("/api/tags").await
    }
}
