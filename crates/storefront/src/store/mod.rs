//! Client state store: session, cart and order history.
//!
//! [`UserStore`] owns all client-side state. Fields are private; reads go
//! through accessors and writes through the action methods, which take
//! `&mut self` so mutations never interleave.
//!
//! ```rust,ignore
//! let mut store = UserStore::new(api);
//! store.sign_in(&credentials).await?;
//! store.add_to_cart(NewCartLine::from_product(&product, 2));
//! let order_id = store.place_order(details).await?;
//! ```

mod cart;
mod orders;
mod session;

pub use cart::{Cart, CartLine, CartLineId, NewCartLine};
pub use orders::{DEFAULT_ORDER_STATUS, LocalOrder, LocalOrderItem, OrderDetails};
pub use session::{Session, UserData};

use pasta_house_core::{OrderId, Price};
use tracing::{info, instrument, warn};

use crate::api::ApiClient;
use crate::error::StoreError;
use crate::models::{AuthTokens, LoginRequest, OrderQuery, RegisterRequest};
use crate::tokens::{self, TokenStoreError, keys};

/// Session, cart and order history for one client.
#[derive(Debug)]
pub struct UserStore {
    api: ApiClient,
    session: Session,
    cart: Cart,
    orders: Vec<LocalOrder>,
}

impl UserStore {
    /// Empty, logged-out store backed by `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            session: Session::default(),
            cart: Cart::default(),
            orders: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Every order known locally, regardless of owner.
    #[must_use]
    pub fn orders(&self) -> &[LocalOrder] {
        &self.orders
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Units in the cart.
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.total()
    }

    /// Orders owned by the signed-in user; empty when logged out.
    #[must_use]
    pub fn user_orders(&self) -> Vec<&LocalOrder> {
        let Some(user) = self.session.user_id() else {
            return Vec::new();
        };
        self.orders.iter().filter(|o| o.user == user).collect()
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Mark `user` as signed in.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub fn login(&mut self, user: UserData) {
        self.session.begin(user);
        info!("User logged in");
    }

    /// Mark a freshly registered `user` as signed in.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub fn register(&mut self, user: UserData) {
        self.session.begin(user);
        info!("User registered");
    }

    /// Clear the session and the cart, then drop persisted tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the tokens could not be removed. Session and cart
    /// are cleared regardless.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> Result<(), TokenStoreError> {
        self.session.clear();
        self.cart.clear();
        tokens::clear_tokens(self.api.tokens().as_ref())?;
        info!("User logged out");
        Ok(())
    }

    /// Refresh the session from `GET /api/users/profile`.
    ///
    /// Does nothing when logged out.
    ///
    /// # Errors
    ///
    /// Returns the API error; the session is left unchanged.
    #[instrument(skip(self))]
    pub async fn load_user_profile(&mut self) -> Result<(), StoreError> {
        if !self.session.is_logged_in() {
            return Ok(());
        }

        match self.api.users().profile().await {
            Ok(profile) => {
                self.session.merge_profile(profile);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load user profile");
                Err(e.into())
            }
        }
    }

    /// Sign in with a previously persisted access token, if there is one.
    ///
    /// Returns whether a session was established.
    ///
    /// # Errors
    ///
    /// Returns the API error if the stored token was rejected.
    #[instrument(skip(self))]
    pub async fn resume_session(&mut self) -> Result<bool, StoreError> {
        if self.api.tokens().get(keys::ACCESS_TOKEN).is_none() {
            return Ok(false);
        }

        let profile = self.api.users().profile().await.inspect_err(|e| {
            warn!(error = %e, "Stored access token was rejected");
        })?;
        self.login(profile.into());
        Ok(true)
    }

    /// Obtain tokens for `credentials`, persist them and sign in.
    ///
    /// # Errors
    ///
    /// Returns the API error if the credentials or the profile request are
    /// rejected, or a token storage error. On failure no tokens are kept.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn sign_in(&mut self, credentials: &LoginRequest) -> Result<(), StoreError> {
        let issued = self.api.auth().login(credentials).await?;
        self.persist_tokens(&issued)?;

        match self.api.users().profile().await {
            Ok(profile) => {
                self.login(profile.into());
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load profile after sign-in");
                if let Err(clear_err) = tokens::clear_tokens(self.api.tokens().as_ref()) {
                    warn!(error = %clear_err, "Failed to discard tokens");
                }
                Err(e.into())
            }
        }
    }

    /// Create an account, persist its tokens and sign in.
    ///
    /// # Errors
    ///
    /// Returns the API error if registration is rejected, or a token storage
    /// error.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn sign_up(&mut self, request: &RegisterRequest) -> Result<(), StoreError> {
        let response = self.api.auth().register(request).await?;
        self.persist_tokens(&response.tokens)?;
        self.register(response.into());
        Ok(())
    }

    /// Store a freshly issued pair, or neither token if that fails.
    fn persist_tokens(&self, issued: &AuthTokens) -> Result<(), TokenStoreError> {
        let store = self.api.tokens().as_ref();
        tokens::store_tokens(store, issued).inspect_err(|e| {
            warn!(error = %e, "Failed to persist tokens");
            if let Err(clear_err) = tokens::clear_tokens(store) {
                warn!(error = %clear_err, "Failed to discard tokens");
            }
        })
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotAuthenticated` when no refresh token is
    /// stored, or the API or storage error.
    #[instrument(skip(self))]
    pub async fn refresh_access_token(&self) -> Result<(), StoreError> {
        let tokens = self.api.tokens();
        let refresh = tokens
            .get(keys::REFRESH_TOKEN)
            .ok_or(StoreError::NotAuthenticated)?;

        let issued = self.api.auth().refresh_token(&refresh).await?;
        tokens.set(keys::ACCESS_TOKEN, &issued.access)?;
        Ok(())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add a product to the cart; see [`Cart::add`].
    #[instrument(skip(self, line), fields(product_id = %line.product, quantity = line.quantity))]
    pub fn add_to_cart(&mut self, line: NewCartLine) -> Option<CartLineId> {
        self.cart.add(line)
    }

    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: CartLineId) {
        self.cart.remove(id);
    }

    /// Set a line's quantity; see [`Cart::update_quantity`].
    #[instrument(skip(self))]
    pub fn update_cart_item_quantity(&mut self, id: CartLineId, quantity: u32) {
        self.cart.update_quantity(id, quantity);
    }

    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Submit the cart as an order.
    ///
    /// On success the order joins the local history and the cart is emptied.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotAuthenticated` when logged out, or the API
    /// error. Cart and history are unchanged on failure.
    #[instrument(skip(self, details), fields(lines = self.cart.lines().len()))]
    pub async fn place_order(&mut self, details: OrderDetails) -> Result<OrderId, StoreError> {
        let Some(user) = self.session.user_id() else {
            warn!("Cannot place order while logged out");
            return Err(StoreError::NotAuthenticated);
        };

        let request = details.to_request(self.cart.lines());
        let order = self.api.orders().create(&request).await.inspect_err(|e| {
            warn!(error = %e, "Failed to place order");
        })?;

        let local = LocalOrder::placed(order, user, self.cart.lines());
        let id = local.id;
        self.orders.push(local);
        self.cart.clear();

        info!(order_id = %id, "Order placed");
        Ok(id)
    }

    /// Replace the local history with the backend's order list.
    ///
    /// Returns an empty slice when logged out.
    ///
    /// # Errors
    ///
    /// Returns the API error; the history is unchanged.
    #[instrument(skip(self))]
    pub async fn load_user_orders(&mut self) -> Result<&[LocalOrder], StoreError> {
        let Some(user) = self.session.user_id() else {
            return Ok(&[]);
        };

        let fetched = self
            .api
            .orders()
            .list(&OrderQuery::default())
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to load orders"))?;

        self.orders = fetched
            .into_iter()
            .map(|order| LocalOrder::fetched(order, user))
            .collect();
        Ok(&self.orders)
    }
}
