//! Cart wire types shared between the client SDK and its consumers.
//!
//! All cart endpoints respond with the same shape:
//! `{ "items": [...], "totalAmount": <number> }`. For a guest cart the
//! display fields (`productName`, `productImageUrl`, `productPrice`) are
//! snapshots captured at add-time; for an authenticated cart the backend's
//! copies are authoritative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::money::round_money;

/// One product-and-quantity entry within a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Product identifier, unique within a cart.
    pub product_id: ProductId,
    /// Display name snapshot.
    pub product_name: String,
    /// Unit price at time of add.
    #[serde(with = "rust_decimal::serde::float")]
    pub product_price: Decimal,
    /// Display image snapshot.
    #[serde(default)]
    pub product_image_url: Option<String>,
    /// Positive quantity (>= 1); validated by the caller, not here.
    pub quantity: u32,
    /// Derived `product_price * quantity`, never independently settable.
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
}

/// A cart as exchanged with the backend.
///
/// `total_amount` is trusted as authoritative over the sum of items when it
/// comes from a backend response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartLineItem>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

impl Cart {
    /// An empty cart with a zero total.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Minimal product reference used by the merge endpoint payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRef {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Sum of all line subtotals, rounded to two decimal places.
///
/// Used for locally held carts only; authenticated carts trust the
/// backend-supplied total instead.
#[must_use]
pub fn cart_total(items: &[CartLineItem]) -> Decimal {
    round_money(items.iter().map(|item| item.subtotal).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i64, cents: i64, quantity: u32) -> CartLineItem {
        let price = Decimal::new(cents, 2);
        CartLineItem {
            product_id: ProductId::new(id),
            product_name: format!("Product {id}"),
            product_price: price,
            product_image_url: None,
            quantity,
            subtotal: crate::types::money::line_subtotal(price, quantity),
        }
    }

    #[test]
    fn cart_total_sums_subtotals() {
        let items = vec![line(1, 999, 2), line(2, 500, 1)];
        assert_eq!(cart_total(&items), Decimal::new(2498, 2));
    }

    #[test]
    fn cart_total_of_empty_cart_is_zero() {
        assert_eq!(cart_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn cart_deserializes_backend_shape() {
        let json = r#"{
            "items": [{
                "productId": 2,
                "productName": "Widget",
                "productPrice": 5.0,
                "productImageUrl": null,
                "quantity": 1,
                "subtotal": 5.0
            }],
            "totalAmount": 5.0
        }"#;

        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product_id, ProductId::new(2));
        assert_eq!(cart.total_amount, Decimal::new(5, 0));
    }

    #[test]
    fn cart_tolerates_missing_fields() {
        let cart: Cart = serde_json::from_str("{}").unwrap();
        assert!(cart.items.is_empty());
        assert_eq!(cart.total_amount, Decimal::ZERO);
    }

    #[test]
    fn item_ref_serializes_camel_case() {
        let item = CartItemRef {
            product_id: ProductId::new(2),
            quantity: 1,
        };
        assert_eq!(
            serde_json::to_string(&item).unwrap(),
            r#"{"productId":2,"quantity":1}"#
        );
    }
}
