//! Authenticated identity held by the store.

use chrono::{DateTime, Utc};

use pasta_house_core::{Email, UserId};

use crate::models::{AuthResponse, UserProfile};

/// Identity fields of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub username: Option<String>,
    pub is_staff: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<AuthResponse> for UserData {
    fn from(response: AuthResponse) -> Self {
        Self {
            id: response.id,
            name: response.name,
            email: response.email,
            username: response.username,
            is_staff: response.is_staff.unwrap_or(false),
            created_at: response.created_at,
        }
    }
}

impl From<UserProfile> for UserData {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            username: profile.username,
            is_staff: profile.is_staff.unwrap_or(false),
            created_at: profile.created_at,
        }
    }
}

/// Logged-in or logged-out, nothing in between.
///
/// The identity is present exactly when the session is logged in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<UserData>,
}

impl Session {
    pub(crate) fn begin(&mut self, user: UserData) {
        self.user = Some(user);
    }

    pub(crate) fn clear(&mut self) {
        self.user = None;
    }

    /// Overwrite identity fields with a freshly fetched profile.
    ///
    /// Fields the profile leaves unset keep their current value.
    pub(crate) fn merge_profile(&mut self, profile: UserProfile) {
        let Some(user) = self.user.as_mut() else {
            return;
        };

        user.id = profile.id;
        user.name = profile.name;
        user.email = profile.email;
        if profile.username.is_some() {
            user.username = profile.username;
        }
        if let Some(is_staff) = profile.is_staff {
            user.is_staff = is_staff;
        }
        if profile.created_at.is_some() {
            user.created_at = profile.created_at;
        }
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserData> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.id)
    }
}
