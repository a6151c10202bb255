//! Server-side cart types.

use serde::{Deserialize, Serialize};

use pasta_house_core::{CartItemId, ProductId};

/// A line of the server-side cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product: ProductId,
    pub quantity: u32,
}

/// Body of `POST /api/cart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddToCartRequest {
    pub product: ProductId,
    pub quantity: u32,
}

/// Body of `PUT /api/cart/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateCartItemRequest {
    pub quantity: u32,
}
