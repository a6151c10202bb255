//! Local order history.

use chrono::{NaiveDate, Utc};

use pasta_house_core::{Email, OrderId, Price, ProductId, UserId};

use crate::models::{CreateOrderRequest, Order, OrderItem};

use super::cart::CartLine;

/// Status recorded when the backend does not report one.
pub const DEFAULT_ORDER_STATUS: &str = "pending";

/// Contact and delivery details entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub note: String,
}

impl OrderDetails {
    /// Request body for these details and the given cart lines.
    pub(crate) fn to_request(&self, lines: &[CartLine]) -> CreateOrderRequest {
        CreateOrderRequest {
            name: self.name.clone(),
            email: self.email.to_string(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            note: self.note.clone(),
            items: lines
                .iter()
                .map(|line| OrderItem {
                    product: line.product,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

/// One product of a local order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalOrderItem {
    pub product: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

/// Client-side record of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalOrder {
    pub id: OrderId,
    pub user: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub note: String,
    pub items: Vec<LocalOrderItem>,
    pub total: Price,
    pub status: String,
    pub date: NaiveDate,
}

impl LocalOrder {
    /// Record of an order just placed from `lines`.
    ///
    /// The backend echoes product IDs only, so names and prices come from
    /// the cart snapshot.
    pub(crate) fn placed(order: Order, user: UserId, lines: &[CartLine]) -> Self {
        let items = lines
            .iter()
            .map(|line| LocalOrderItem {
                product: line.product,
                name: line.name.clone(),
                price: line.price,
                quantity: line.quantity,
            })
            .collect();

        Self {
            id: order.id,
            user,
            name: order.name,
            email: order.email,
            phone: order.phone,
            address: order.address,
            note: order.note,
            items,
            total: lines.iter().map(CartLine::line_total).sum(),
            status: order
                .status
                .unwrap_or_else(|| DEFAULT_ORDER_STATUS.to_string()),
            date: today(),
        }
    }

    /// Record of an order fetched from the backend.
    ///
    /// The list endpoint carries no product names or prices; items get an
    /// empty name and a zero price, and the total is zero.
    pub(crate) fn fetched(order: Order, user: UserId) -> Self {
        let items = order
            .items
            .iter()
            .map(|item| LocalOrderItem {
                product: item.product,
                name: String::new(),
                price: Price::ZERO,
                quantity: item.quantity,
            })
            .collect();

        Self {
            id: order.id,
            user,
            name: order.name,
            email: order.email,
            phone: order.phone,
            address: order.address,
            note: order.note,
            items,
            total: Price::ZERO,
            status: order
                .status
                .unwrap_or_else(|| DEFAULT_ORDER_STATUS.to_string()),
            date: today(),
        }
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::cart::{Cart, NewCartLine};

    fn order(status: Option<&str>) -> Order {
        Order {
            id: OrderId::new(12),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "1 Via Roma".to_string(),
            note: String::new(),
            items: vec![OrderItem {
                product: ProductId::new(3),
                quantity: 2,
            }],
            status: status.map(str::to_string),
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::default();
        cart.add(NewCartLine {
            product: ProductId::new(3),
            name: "Pappardelle".to_string(),
            description: String::new(),
            price: Price::from_cents(1100),
            image: None,
            quantity: 2,
            max_quantity: 10,
        });
        cart
    }

    #[test]
    fn test_request_carries_product_and_quantity_only() {
        let details = OrderDetails {
            name: "Ada".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            phone: "555-0100".to_string(),
            address: "1 Via Roma".to_string(),
            note: "Ring twice".to_string(),
        };
        let request = details.to_request(cart().lines());

        assert_eq!(request.email, "ada@example.com");
        assert_eq!(
            request.items,
            vec![OrderItem {
                product: ProductId::new(3),
                quantity: 2
            }]
        );
    }

    #[test]
    fn test_placed_uses_cart_snapshot() {
        let cart = cart();
        let local = LocalOrder::placed(order(None), UserId::new(5), cart.lines());

        assert_eq!(local.user, UserId::new(5));
        assert_eq!(local.items[0].name, "Pappardelle");
        assert_eq!(local.total, Price::from_cents(2200));
        assert_eq!(local.status, DEFAULT_ORDER_STATUS);
    }

    #[test]
    fn test_fetched_uses_placeholders() {
        let local = LocalOrder::fetched(order(Some("shipped")), UserId::new(5));

        assert_eq!(local.status, "shipped");
        assert_eq!(local.items[0].name, "");
        assert_eq!(local.items[0].price, Price::ZERO);
        assert_eq!(local.items[0].quantity, 2);
        assert_eq!(local.total, Price::ZERO);
    }
}
