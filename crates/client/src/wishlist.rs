//! Wishlist service.
//!
//! Server-side only: unlike the cart there is no guest wishlist, so every
//! operation goes straight to the backend.

use serde::{Deserialize, Serialize};
use shopfront_core::{Product, ProductId};
use tracing::instrument;

use crate::api::{ApiClient, ApiError};

/// A user's wishlist as returned by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    #[serde(default)]
    pub items: Vec<Product>,
}

impl Wishlist {
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|p| p.id == product_id)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddWishlistRequest {
    product_id: ProductId,
}

/// Client for the wishlist endpoints. Requires an authenticated session.
#[derive(Clone)]
pub struct WishlistClient {
    api: ApiClient,
}

impl WishlistClient {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch the full wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn fetch(&self) -> Result<Wishlist, ApiError> {
        self.api.get("/wishlist").await
    }

    /// Add a product. Adding a product that is already present is a no-op
    /// on the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add(&self, product_id: ProductId) -> Result<Wishlist, ApiError> {
        self.api
            .post("/wishlist/items", &AddWishlistRequest { product_id })
            .await
    }

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove(&self, product_id: ProductId) -> Result<Wishlist, ApiError> {
        self.api
            .delete(&format!("/wishlist/items/{product_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_request_uses_camel_case() {
        let body = serde_json::to_value(AddWishlistRequest {
            product_id: ProductId::new(7),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"productId": 7}));
    }

    #[test]
    fn wishlist_tolerates_missing_items() {
        let wishlist: Wishlist = serde_json::from_str("{}").unwrap();
        assert!(wishlist.items.is_empty());
        assert!(!wishlist.contains(ProductId::new(1)));
    }
}
