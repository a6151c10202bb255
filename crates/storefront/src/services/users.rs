//! Profile service for the authenticated user.

use tracing::instrument;

use crate::api::{ApiClient, ApiError};
use crate::models::{OrderSummary, UpdateProfileRequest, UserProfile};

/// User endpoints (`/api/users/...`). All require a bearer token.
#[derive(Debug, Clone, Copy)]
pub struct UserService<'a> {
    api: &'a ApiClient,
}

impl<'a> UserService<'a> {
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// The current user's profile.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified (401 without a valid token).
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.api.get("/api/users/profile").await
    }

    /// Change name and email.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UserProfile, ApiError> {
        self.api.put("/api/users/profile", request).await
    }

    /// IDs of the current user's orders.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<OrderSummary>, ApiError> {
        self.api.get("/api/users/orders").await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pasta_house_core::{Email, OrderId, UserId};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::services::test_support::client_for;

    use super::*;

    #[tokio::test]
    async fn test_profile_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "email": "ada@example.com",
                "name": "Ada",
                "username": "ada",
                "is_staff": true,
                "created_at": "2025-05-01T09:30:00Z"
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/users/profile"))
            .and(body_json(json!({"name": "Ada L.", "email": "ada@example.com"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "email": "ada@example.com",
                "name": "Ada L.",
                "username": "ada",
                "is_staff": true,
                "created_at": "2025-05-01T09:30:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server);
        let profile = api.users().profile().await.unwrap();
        assert_eq!(profile.id, UserId::new(5));
        assert_eq!(profile.is_staff, Some(true));

        let updated = api
            .users()
            .update_profile(&UpdateProfileRequest {
                name: "Ada L.".to_string(),
                email: Email::parse("ada@example.com").unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "Ada L.");
    }

    #[tokio::test]
    async fn test_orders() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}, {"id": 2}])))
            .mount(&server)
            .await;

        let api = client_for(&server);
        let orders = api.users().orders().await.unwrap();
        assert_eq!(
            orders.iter().map(|o| o.id).collect::<Vec<_>>(),
            vec![OrderId::new(1), OrderId::new(2)]
        );
    }
}
