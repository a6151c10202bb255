//! Order service.

use tracing::instrument;

use pasta_house_core::OrderId;

use crate::api::{ApiClient, ApiError};
use crate::models::{CreateOrderRequest, Order, OrderQuery};

/// Order endpoints (`/api/orders`).
#[derive(Debug, Clone, Copy)]
pub struct OrderService<'a> {
    api: &'a ApiClient,
}

impl<'a> OrderService<'a> {
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// List the user's orders, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &OrderQuery) -> Result<Vec<Order>, ApiError> {
        self.api.get_with_query("/api/orders", query).await
    }

    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn get(&self, id: OrderId) -> Result<Order, ApiError> {
        self.api.get(&format!("/api/orders/{id}")).await
    }

    /// Submit a new order.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn create(&self, request: &CreateOrderRequest) -> Result<Order, ApiError> {
        self.api.post("/api/orders", request).await
    }

    /// Cancel an order. The backend decides whether it is still cancellable.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<Order, ApiError> {
        self.api.put_empty(&format!("/api/orders/{id}/cancel")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pasta_house_core::ProductId;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::models::OrderItem;
    use crate::services::test_support::client_for;

    use super::*;

    fn order_json(id: i64, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "555-0100",
            "address": "1 Via Roma",
            "note": "",
            "items": [{"product": 3, "quantity": 2}],
            "status": status
        })
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .and(query_param("status", "shipped"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([order_json(1, "shipped")])))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server);
        let orders = api
            .orders()
            .list(&OrderQuery {
                status: Some("shipped".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status.as_deref(), Some("shipped"));
    }

    #[tokio::test]
    async fn test_create_sends_items() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/orders"))
            .and(body_json(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "phone": "555-0100",
                "address": "1 Via Roma",
                "note": "ring twice",
                "items": [{"product": 3, "quantity": 2}]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(order_json(8, "pending")))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server);
        let order = api
            .orders()
            .create(&CreateOrderRequest {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555-0100".to_string(),
                address: "1 Via Roma".to_string(),
                note: "ring twice".to_string(),
                items: vec![OrderItem {
                    product: ProductId::new(3),
                    quantity: 2,
                }],
            })
            .await
            .unwrap();
        assert_eq!(order.id, OrderId::new(8));
    }

    #[tokio::test]
    async fn test_get_and_cancel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/orders/8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json(8, "pending")))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/orders/8/cancel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json(8, "cancelled")))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server);
        let order = api.orders().get(OrderId::new(8)).await.unwrap();
        assert_eq!(order.status.as_deref(), Some("pending"));

        let order = api.orders().cancel(OrderId::new(8)).await.unwrap();
        assert_eq!(order.status.as_deref(), Some("cancelled"));
    }

    #[tokio::test]
    async fn test_cancel_conflict_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/orders/8/cancel"))
            .respond_with(ResponseTemplate::new(409).set_body_string("already shipped"))
            .mount(&server)
            .await;

        let api = client_for(&server);
        let err = api.orders().cancel(OrderId::new(8)).await.unwrap_err();
        assert_eq!(err.status(), Some(409));
    }
}
