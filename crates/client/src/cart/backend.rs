//! Remote cart contract and its REST implementation.
//!
//! Every endpoint returns the full authoritative cart
//! (`{ items, totalAmount }`); the caller replaces local state wholesale
//! with it. The trait seam lets tests drive the synchronizer with an
//! in-process stub instead of a live backend.

use serde::Serialize;
use shopfront_core::{Cart, CartItemRef, ProductId};

use crate::api::{ApiClient, ApiError};

/// Remote cart operations, one per REST endpoint.
#[allow(async_fn_in_trait)]
pub trait CartBackend {
    /// `GET /cart` - fetch the authoritative cart for the session.
    async fn fetch(&self) -> Result<Cart, ApiError>;

    /// `POST /cart/items` - add a product; returns the updated cart.
    async fn add_item(&self, product_id: ProductId, quantity: u32) -> Result<Cart, ApiError>;

    /// `PUT /cart/items/{productId}` - set a line's quantity.
    async fn update_quantity(&self, product_id: ProductId, quantity: u32)
    -> Result<Cart, ApiError>;

    /// `DELETE /cart/items/{productId}` - remove a line.
    async fn remove_item(&self, product_id: ProductId) -> Result<Cart, ApiError>;

    /// `DELETE /cart` - clear the cart; returns the (empty) cart.
    async fn clear(&self) -> Result<Cart, ApiError>;

    /// `POST /cart/merge` - reconcile guest items into the account cart.
    /// The backend combines quantities and clamps to stock limits.
    async fn merge(&self, items: &[CartItemRef]) -> Result<Cart, ApiError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddItemRequest {
    product_id: ProductId,
    quantity: u32,
}

#[derive(Debug, Serialize)]
struct UpdateQuantityRequest {
    quantity: u32,
}

#[derive(Debug, Serialize)]
struct MergeRequest<'a> {
    items: &'a [CartItemRef],
}

/// [`CartBackend`] over the Shopfront REST API.
#[derive(Clone)]
pub struct RestCartBackend {
    api: ApiClient,
}

impl RestCartBackend {
    /// Create a backend over the shared API client.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl CartBackend for RestCartBackend {
    async fn fetch(&self) -> Result<Cart, ApiError> {
        self.api.get("/cart").await
    }

    async fn add_item(&self, product_id: ProductId, quantity: u32) -> Result<Cart, ApiError> {
        self.api
            .post(
                "/cart/items",
                &AddItemRequest {
                    product_id,
                    quantity,
                },
            )
            .await
    }

    async fn update_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        self.api
            .put(
                &format!("/cart/items/{product_id}"),
                &UpdateQuantityRequest { quantity },
            )
            .await
    }

    async fn remove_item(&self, product_id: ProductId) -> Result<Cart, ApiError> {
        self.api.delete(&format!("/cart/items/{product_id}")).await
    }

    async fn clear(&self) -> Result<Cart, ApiError> {
        self.api.delete("/cart").await
    }

    async fn merge(&self, items: &[CartItemRef]) -> Result<Cart, ApiError> {
        self.api.post("/cart/merge", &MergeRequest { items }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_item_request_matches_wire_shape() {
        let body = AddItemRequest {
            product_id: ProductId::new(3),
            quantity: 2,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"productId":3,"quantity":2}"#
        );
    }

    #[test]
    fn merge_request_wraps_items() {
        let items = [CartItemRef {
            product_id: ProductId::new(2),
            quantity: 1,
        }];
        let body = MergeRequest { items: &items };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"items":[{"productId":2,"quantity":1}]}"#
        );
    }
}
