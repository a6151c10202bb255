//! Registration and JWT token types.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use pasta_house_core::{Email, UserId};

/// Body of `POST /api/users/register/`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: Email,
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
}

/// Body of `POST /api/auth/token/`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: Email,
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
}

/// JWT pair issued on login and registration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub refresh: String,
    pub access: String,
}

impl std::fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTokens")
            .field("refresh", &"[REDACTED]")
            .field("access", &"[REDACTED]")
            .finish()
    }
}

/// Response of `POST /api/users/register/`: the new account plus its tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub username: Option<String>,
    pub is_staff: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub tokens: AuthTokens,
}

/// Body of `POST /api/auth/token/refresh/`.
#[derive(Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Response of `POST /api/auth/token/refresh/`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    pub access: String,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access", &"[REDACTED]")
            .finish()
    }
}

fn expose_password<S: Serializer>(password: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(password.expose_secret())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_sends_password() {
        let request = LoginRequest {
            email: Email::parse("chef@pasta.house").unwrap(),
            password: SecretString::from("al-dente".to_string()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["email"], "chef@pasta.house");
        assert_eq!(json["password"], "al-dente");
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let tokens = AuthTokens {
            refresh: "refresh-secret".to_string(),
            access: "access-secret".to_string(),
        };
        let debug_output = format!("{tokens:?}");
        assert!(!debug_output.contains("refresh-secret"));
        assert!(!debug_output.contains("access-secret"));

        let request = LoginRequest {
            email: Email::parse("chef@pasta.house").unwrap(),
            password: SecretString::from("al-dente".to_string()),
        };
        assert!(!format!("{request:?}").contains("al-dente"));
    }

    #[test]
    fn test_auth_response_optional_fields() {
        let response: AuthResponse = serde_json::from_str(
            r#"{"id": 3, "email": "chef@pasta.house", "name": "Chef",
                "tokens": {"refresh": "r", "access": "a"}}"#,
        )
        .unwrap();
        assert_eq!(response.id, UserId::new(3));
        assert!(response.username.is_none());
        assert!(response.created_at.is_none());
    }
}
