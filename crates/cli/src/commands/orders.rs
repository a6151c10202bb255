//! Order history, cancellation and checkout.

use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use pasta_house_core::{OrderId, ProductId};
use pasta_house_storefront::store::{NewCartLine, OrderDetails};
use pasta_house_storefront::{StoreError, UserStore};

use super::require_session;

/// Errors parsing a `PRODUCT_ID:QUANTITY` argument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemSpecError {
    #[error("expected PRODUCT_ID:QUANTITY, got '{0}'")]
    Format(String),

    #[error("invalid product ID '{0}'")]
    ProductId(String),

    #[error("quantity must be a positive integer, got '{0}'")]
    Quantity(String),
}

/// A product and how many units of it to order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSpec {
    pub product: ProductId,
    pub quantity: u32,
}

impl FromStr for ItemSpec {
    type Err = ItemSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (product, quantity) = s
            .split_once(':')
            .ok_or_else(|| ItemSpecError::Format(s.to_owned()))?;

        let product = product
            .trim()
            .parse::<i64>()
            .map_err(|_| ItemSpecError::ProductId(product.to_owned()))?;
        let quantity = quantity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| ItemSpecError::Quantity(quantity.to_owned()))?;

        Ok(Self {
            product: ProductId::new(product),
            quantity,
        })
    }
}

/// # Errors
///
/// Returns `StoreError::NotAuthenticated` without a stored session, or the
/// API error.
#[allow(clippy::print_stdout)]
pub async fn list(store: &mut UserStore) -> Result<(), StoreError> {
    require_session(store).await?;
    store.load_user_orders().await?;

    let orders = store.user_orders();
    if orders.is_empty() {
        println!("No orders yet");
    }
    for order in orders {
        let units: u64 = order.items.iter().map(|i| u64::from(i.quantity)).sum();
        println!(
            "#{:<6}  {:<10}  {} item(s)  {}",
            order.id, order.status, units, order.address
        );
    }
    Ok(())
}

/// # Errors
///
/// Returns `StoreError::NotAuthenticated` without a stored session, or the
/// API error.
#[allow(clippy::print_stdout)]
pub async fn cancel(store: &mut UserStore, id: OrderId) -> Result<(), StoreError> {
    require_session(store).await?;

    let order = store.api().orders().cancel(id).await?;
    println!(
        "Order #{} is now {}",
        order.id,
        order.status.as_deref().unwrap_or("cancelled")
    );
    Ok(())
}

/// Fill the cart from `items` and place the order.
///
/// Products without stock are skipped with a warning; quantities above the
/// available stock are reduced to it.
///
/// # Errors
///
/// Returns `StoreError::NotAuthenticated` without a stored session, or the
/// API error from a product lookup or from order creation.
#[allow(clippy::print_stdout)]
pub async fn checkout(
    store: &mut UserStore,
    items: &[ItemSpec],
    details: OrderDetails,
) -> Result<(), StoreError> {
    require_session(store).await?;

    for item in items {
        let product = store.api().products().get(item.product).await?;
        let line = NewCartLine::from_product(&product, item.quantity);
        if store.add_to_cart(line).is_none() {
            warn!(product_id = %product.id, "Skipping product without stock");
        }
    }

    if store.cart().is_empty() {
        println!("Nothing to order");
        return Ok(());
    }

    let units = store.cart_item_count();
    let total = store.cart_total();
    let id = store.place_order(details).await?;
    println!("Placed order #{id}: {units} item(s), total {total}");
    Ok(())
}
