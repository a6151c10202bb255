//! Errors reported by [`UserStore`](crate::store::UserStore) actions.

use thiserror::Error;

use crate::api::ApiError;
use crate::tokens::TokenStoreError;

/// Why a store action did not change state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The action needs a signed-in user (or a stored refresh token).
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The backend call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Tokens could not be persisted or removed.
    #[error("Token storage error: {0}")]
    Tokens(#[from] TokenStoreError),
}

impl StoreError {
    /// Whether the failure means the user has to sign in (again).
    #[must_use]
    pub fn requires_login(&self) -> bool {
        match self {
            Self::NotAuthenticated => true,
            Self::Api(err) => err.is_unauthorized(),
            Self::Tokens(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_login() {
        assert!(StoreError::NotAuthenticated.requires_login());
        assert!(
            StoreError::Api(ApiError::Status {
                status: 401,
                message: String::new(),
            })
            .requires_login()
        );
        assert!(
            !StoreError::Api(ApiError::Status {
                status: 500,
                message: String::new(),
            })
            .requires_login()
        );
    }
}
