//! Order placement and history.

use shopfront_core::{CheckoutRequest, Order, OrderId};
use tracing::instrument;

use crate::api::{ApiClient, ApiError};

/// Client for the order endpoints. All of them require an authenticated
/// session; the backend answers 401 otherwise.
#[derive(Clone)]
pub struct OrderClient {
    api: ApiClient,
}

impl OrderClient {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Place an order from the account's current server-side cart.
    ///
    /// The backend validates stock, creates the order, and empties the
    /// cart; callers should refresh the cart afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if checkout is rejected (e.g. insufficient stock)
    /// or the request fails.
    #[instrument(skip(self, request))]
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<Order, ApiError> {
        self.api.post("/orders", request).await
    }

    /// List the authenticated user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self) -> Result<Vec<Order>, ApiError> {
        self.api.get("/orders").await
    }

    /// Fetch a single order. The backend enforces ownership.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the request fails.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get(&self, order_id: OrderId) -> Result<Order, ApiError> {
        self.api.get(&format!("/orders/{order_id}")).await
    }
}
