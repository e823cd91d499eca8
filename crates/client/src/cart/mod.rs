//! Shopping cart subsystem.
//!
//! Three cooperating pieces:
//!
//! - [`store`] - canonical line items plus derived total, with pure local
//!   transitions and a wholesale-overwrite path for backend responses.
//! - [`sync`] - the single mutation entry point; routes each operation to
//!   the local store (guest) or through the REST backend (authenticated).
//! - [`merge`] - the one-time guest-cart reconciliation at login.
//!
//! Control flow: caller -> synchronizer picks a strategy -> (remote path)
//! backend call -> response replaces the store -> readers re-render from
//! the store.

pub mod backend;
pub mod merge;
pub mod store;
pub mod sync;

pub use backend::{CartBackend, RestCartBackend};
pub use store::{CartSnapshot, CartStore, RequestToken};
pub use sync::{CartError, CartStrategy, CartSynchronizer};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rust_decimal::Decimal;
    use secrecy::SecretString;
    use shopfront_core::{Cart, CartItemRef, Product, ProductId};

    use crate::api::ApiError;
    use crate::cart::backend::CartBackend;

    /// Scripted backend: every operation yields the configured outcome.
    #[derive(Default)]
    pub struct StubBackend {
        response: Option<Cart>,
        failure: Option<(u16, String)>,
        calls: AtomicUsize,
        merged: Mutex<Option<Vec<CartItemRef>>>,
    }

    impl StubBackend {
        pub fn respond_with(cart: Cart) -> Self {
            Self {
                response: Some(cart),
                ..Self::default()
            }
        }

        pub fn fail_with(status: u16, message: &str) -> Self {
            Self {
                failure: Some((status, message.to_string())),
                ..Self::default()
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn merged_items(&self) -> Option<Vec<CartItemRef>> {
            self.merged.lock().unwrap().clone()
        }

        fn outcome(&self) -> Result<Cart, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.failure {
                Some((status, message)) => Err(ApiError::Api {
                    status: *status,
                    message: message.clone(),
                }),
                None => Ok(self.response.clone().unwrap_or_default()),
            }
        }
    }

    impl CartBackend for StubBackend {
        async fn fetch(&self) -> Result<Cart, ApiError> {
            self.outcome()
        }

        async fn add_item(&self, _: ProductId, _: u32) -> Result<Cart, ApiError> {
            self.outcome()
        }

        async fn update_quantity(&self, _: ProductId, _: u32) -> Result<Cart, ApiError> {
            self.outcome()
        }

        async fn remove_item(&self, _: ProductId) -> Result<Cart, ApiError> {
            self.outcome()
        }

        async fn clear(&self) -> Result<Cart, ApiError> {
            self.outcome()
        }

        async fn merge(&self, items: &[CartItemRef]) -> Result<Cart, ApiError> {
            *self.merged.lock().unwrap() = Some(items.to_vec());
            self.outcome()
        }
    }

    /// Catalog product with a price in cents.
    pub fn product(id: i64, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: None,
            price: Decimal::new(cents, 2),
            image_url: None,
            category_id: None,
            stock_quantity: Some(10),
            created_at: None,
        }
    }

    pub fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }
}
