//! User profile types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pasta_house_core::{Email, OrderId, UserId};

/// The authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub username: Option<String>,
    pub is_staff: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `PUT /api/users/profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: Email,
}

/// Entry of `GET /api/users/orders`; the endpoint only guarantees the ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
}
