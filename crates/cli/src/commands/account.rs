//! Sign-up, sign-in and profile commands.

use secrecy::SecretString;

use pasta_house_core::Email;
use pasta_house_storefront::models::{LoginRequest, RegisterRequest};
use pasta_house_storefront::{StoreError, UserStore};

use super::require_session;

/// # Errors
///
/// Returns the store error if registration fails.
pub async fn register(
    store: &mut UserStore,
    name: String,
    email: Email,
    password: String,
) -> Result<(), StoreError> {
    store
        .sign_up(&RegisterRequest {
            name,
            email,
            password: SecretString::from(password),
        })
        .await?;
    print_signed_in(store);
    Ok(())
}

/// # Errors
///
/// Returns the store error if the credentials are rejected.
pub async fn login(store: &mut UserStore, email: Email, password: String) -> Result<(), StoreError> {
    store
        .sign_in(&LoginRequest {
            email,
            password: SecretString::from(password),
        })
        .await?;
    print_signed_in(store);
    Ok(())
}

/// # Errors
///
/// Returns an error if stored tokens could not be removed.
#[allow(clippy::print_stdout)]
pub fn logout(store: &mut UserStore) -> Result<(), StoreError> {
    store.logout()?;
    println!("{}", store.api().auth().logout().message);
    Ok(())
}

/// # Errors
///
/// Returns `StoreError::NotAuthenticated` without a stored session, or the
/// API error.
#[allow(clippy::print_stdout)]
pub async fn profile(store: &mut UserStore) -> Result<(), StoreError> {
    require_session(store).await?;

    let Some(user) = store.session().user() else {
        return Err(StoreError::NotAuthenticated);
    };
    println!("{} <{}>", user.name, user.email);
    println!("  id:       {}", user.id);
    if let Some(username) = &user.username {
        println!("  username: {username}");
    }
    if let Some(created_at) = user.created_at {
        println!("  joined:   {}", created_at.format("%Y-%m-%d"));
    }
    if user.is_staff {
        println!("  staff");
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_signed_in(store: &UserStore) {
    if let Some(user) = store.session().user() {
        println!("Signed in as {} <{}>", user.name, user.email);
    }
}
