//! Pasta House storefront client.
//!
//! The data layer behind the storefront UI:
//!
//! - [`api`] - HTTP client for the backend REST API
//! - [`services`] - one typed method per endpoint (auth, products, cart,
//!   orders, reviews, users)
//! - [`store`] - client-side session, cart and order history
//! - [`tokens`] - persisted JWT access/refresh tokens

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod tokens;

pub use api::{ApiClient, ApiError};
pub use config::{ClientConfig, ConfigError, LogFormat};
pub use error::StoreError;
pub use store::UserStore;
