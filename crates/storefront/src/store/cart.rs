//! Local shopping cart.
//!
//! Every line satisfies `1 <= quantity <= max_quantity`, and there is at most
//! one line per product.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pasta_house_core::{Price, ProductId};

use crate::models::Product;

/// Client-generated identifier of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLineId(Uuid);

impl CartLineId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for CartLineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product to put in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartLine {
    pub product: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: Option<String>,
    pub quantity: u32,
    pub max_quantity: u32,
}

impl NewCartLine {
    /// Line for `quantity` units of `product`, capped at its stock level.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
            max_quantity: product.quantity,
        }
    }
}

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub id: CartLineId,
    pub product: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: Option<String>,
    pub quantity: u32,
    pub max_quantity: u32,
}

impl CartLine {
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.line_total(self.quantity)
    }
}

/// Ordered collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Add `line`, merging it into an existing line for the same product.
    ///
    /// Merged quantities saturate at the existing line's `max_quantity`; a new
    /// line is clamped to its own. Returns the ID of the line that holds the
    /// product, or `None` if nothing could be added (zero quantity or stock).
    pub fn add(&mut self, line: NewCartLine) -> Option<CartLineId> {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.product == line.product) {
            existing.quantity = existing
                .quantity
                .saturating_add(line.quantity)
                .min(existing.max_quantity);
            return Some(existing.id);
        }

        let quantity = line.quantity.min(line.max_quantity);
        if quantity == 0 {
            return None;
        }

        let id = CartLineId::generate();
        self.lines.push(CartLine {
            id,
            product: line.product,
            name: line.name,
            description: line.description,
            price: line.price,
            image: line.image,
            quantity,
            max_quantity: line.max_quantity,
        });
        Some(id)
    }

    /// Remove the line with `id`, returning it if present.
    pub fn remove(&mut self, id: CartLineId) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| l.id == id)?;
        Some(self.lines.remove(index))
    }

    /// Set a line's quantity, clamped to its maximum. Zero removes the line.
    pub fn update_quantity(&mut self, id: CartLineId, quantity: u32) {
        let Some(line) = self.lines.iter_mut().find(|l| l.id == id) else {
            return;
        };

        line.quantity = quantity.min(line.max_quantity);
        if line.quantity < 1 {
            self.remove(id);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn get(&self, id: CartLineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}
