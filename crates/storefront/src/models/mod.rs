//! Request and response shapes of the storefront REST API.
//!
//! Field names follow the backend's JSON exactly (snake_case), except for
//! query-string parameters, which the backend reads in camelCase.

mod auth;
mod cart;
mod order;
mod product;
mod review;
mod user;

pub use auth::*;
pub use cart::*;
pub use order::*;
pub use product::*;
pub use review::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// Plain acknowledgement returned by delete-style endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Page metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total number of matching records.
    pub total: u64,
}
