//! Product review types.

use serde::{Deserialize, Serialize};

use pasta_house_core::ReviewId;

use super::Pagination;

/// A product review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    /// Star rating, 1 to 5.
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

/// Response of `GET /api/products/{id}/reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewList {
    pub reviews: Vec<Review>,
    pub pagination: Pagination,
}

/// Body of `POST /api/products/{id}/reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateReviewRequest {
    pub rating: u8,
    pub comment: String,
}

/// Body of `PUT /api/reviews/{id}`; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateReviewRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Query string of `GET /api/products/{id}/reviews`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}
