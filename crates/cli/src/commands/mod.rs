//! Subcommand implementations.

pub mod account;
pub mod catalog;
pub mod orders;

use pasta_house_storefront::{StoreError, UserStore};

/// Sign in from the stored access token or fail.
async fn require_session(store: &mut UserStore) -> Result<(), StoreError> {
    if store.resume_session().await? {
        Ok(())
    } else {
        Err(StoreError::NotAuthenticated)
    }
}
