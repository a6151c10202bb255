//! Product review service.

use tracing::instrument;

use pasta_house_core::{ProductId, ReviewId};

use crate::api::{ApiClient, ApiError};
use crate::models::{
    CreateReviewRequest, MessageResponse, Review, ReviewList, ReviewQuery, UpdateReviewRequest,
};

/// Review endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ReviewService<'a> {
    api: &'a ApiClient,
}

impl<'a> ReviewService<'a> {
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Reviews of a product, paged.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        product: ProductId,
        query: &ReviewQuery,
    ) -> Result<ReviewList, ApiError> {
        self.api
            .get_with_query(&format!("/api/products/{product}/reviews"), query)
            .await
    }

    /// Review a product. The backend allows one review per user and product.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        product: ProductId,
        request: &CreateReviewRequest,
    ) -> Result<Review, ApiError> {
        self.api
            .post(&format!("/api/products/{product}/reviews"), request)
            .await
    }

    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: ReviewId,
        request: &UpdateReviewRequest,
    ) -> Result<Review, ApiError> {
        self.api.put(&format!("/api/reviews/{id}"), request).await
    }

    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ReviewId) -> Result<MessageResponse, ApiError> {
        self.api.delete(&format!("/api/reviews/{id}")).await
    }
}
