//! Admin operations: catalog management, order fulfilment, user accounts.
//!
//! Every endpoint here requires the admin role; the backend answers 403
//! for ordinary accounts, which surfaces as [`ApiError::Api`].

use rust_decimal::Decimal;
use serde::Serialize;
use shopfront_core::{CategoryId, Order, OrderId, OrderStatus, Page, Product, ProductId, User, UserId};
use tracing::instrument;

use crate::api::{ApiClient, ApiError};
use crate::auth::RegisterRequest;

/// Payload for creating or updating a catalog product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
}

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: OrderStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnabledUpdate {
    is_enabled: bool,
}

/// Client for the `/admin/*` endpoints.
#[derive(Clone)]
pub struct AdminClient {
    api: ApiClient,
}

impl AdminClient {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Create a catalog product.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the request fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ApiError> {
        self.api.post("/admin/products", input).await
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self, input), fields(product_id = %product_id))]
    pub async fn update_product(
        &self,
        product_id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        self.api
            .put(&format!("/admin/products/{product_id}"), input)
            .await
    }

    /// Delete a product from the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn delete_product(&self, product_id: ProductId) -> Result<(), ApiError> {
        self.api
            .delete_no_content(&format!("/admin/products/{product_id}"))
            .await
    }

    /// List all orders across accounts, paginated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_orders(&self, page: u32, size: u32) -> Result<Page<Order>, ApiError> {
        self.api
            .get_with_query(
                "/admin/orders",
                &[
                    ("page".to_string(), page.to_string()),
                    ("size".to_string(), size.to_string()),
                ],
            )
            .await
    }

    /// Move an order to a new fulfilment status.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is rejected or the request fails.
    #[instrument(skip(self), fields(order_id = %order_id, status = ?status))]
    pub async fn update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.api
            .put(
                &format!("/admin/orders/{order_id}/status"),
                &StatusUpdate { status },
            )
            .await
    }

    /// List user accounts, paginated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_users(&self, page: u32, size: u32) -> Result<Page<User>, ApiError> {
        self.api
            .get_with_query(
                "/admin/users",
                &[
                    ("page".to_string(), page.to_string()),
                    ("size".to_string(), size.to_string()),
                ],
            )
            .await
    }

    /// Enable or disable a user account.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is not found or the request fails.
    #[instrument(skip(self), fields(user_id = %user_id, enabled))]
    pub async fn update_user_status(
        &self,
        user_id: UserId,
        enabled: bool,
    ) -> Result<User, ApiError> {
        self.api
            .put(
                &format!("/admin/users/{user_id}/status"),
                &EnabledUpdate {
                    is_enabled: enabled,
                },
            )
            .await
    }

    /// Create another admin account.
    ///
    /// # Errors
    ///
    /// Returns an error if registration is rejected or the request fails.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register_admin(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.api.post("/admin/users/register-admin", request).await
    }
}
