//! Cart synchronizer: the single mutation entry point.
//!
//! Routes every operation based on the session's authentication state: a
//! guest mutates the local store (and the persisted snapshot) directly; an
//! authenticated session round-trips through the backend and adopts the
//! response wholesale. Operations are not serialized against each other;
//! the store's request tokens discard responses that arrive after a newer
//! one has been applied.

use std::sync::Arc;

use shopfront_core::{Cart, Product, ProductId};
use thiserror::Error;
use tracing::{instrument, warn};

use crate::api::ApiError;
use crate::cart::backend::CartBackend;
use crate::cart::store::{CartStore, RequestToken};
use crate::notify::{SharedNotifier, messages};
use crate::session::Session;
use crate::storage::{self, StateStore};

/// Failure of a remote cart operation, carrying the user-facing message.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("{message}")]
    Remote { message: String },
}

impl From<ApiError> for CartError {
    fn from(error: ApiError) -> Self {
        Self::Remote {
            message: error.user_message(),
        }
    }
}

/// Per-call routing decision, chosen once from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartStrategy {
    /// Guest: mutate local state only, no network call.
    Local,
    /// Authenticated: round-trip through the backend.
    Remote,
}

impl CartStrategy {
    /// Select the strategy for the current session.
    #[must_use]
    pub fn for_session(session: &Session) -> Self {
        if session.is_authenticated() {
            Self::Remote
        } else {
            Self::Local
        }
    }
}

/// Single entry point for all cart mutations.
pub struct CartSynchronizer<B> {
    store: CartStore,
    backend: B,
    session: Session,
    snapshots: Arc<dyn StateStore>,
    notifier: SharedNotifier,
}

impl<B: CartBackend> CartSynchronizer<B> {
    /// Wire up a synchronizer over the injected collaborators.
    pub fn new(
        store: CartStore,
        backend: B,
        session: Session,
        snapshots: Arc<dyn StateStore>,
        notifier: SharedNotifier,
    ) -> Self {
        Self {
            store,
            backend,
            session,
            snapshots,
            notifier,
        }
    }

    /// The underlying state store (read access for UI layers).
    #[must_use]
    pub const fn store(&self) -> &CartStore {
        &self.store
    }

    pub(crate) const fn backend(&self) -> &B {
        &self.backend
    }

    pub(crate) const fn notifier(&self) -> &SharedNotifier {
        &self.notifier
    }

    /// Add a product to the cart.
    ///
    /// Guests capture the product's display fields as a snapshot; for an
    /// authenticated session the backend's copy is authoritative.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote call fails; local state is then
    /// left unchanged.
    #[instrument(skip(self, product), fields(product_id = %product.id, quantity))]
    pub async fn add_item(&self, product: &Product, quantity: u32) -> Result<(), CartError> {
        match CartStrategy::for_session(&self.session) {
            CartStrategy::Local => {
                self.store.add_local(
                    product.id,
                    &product.name,
                    product.price,
                    product.image_url.clone(),
                    quantity,
                );
                self.persist_guest_cart();
            }
            CartStrategy::Remote => {
                let token = self.store.begin_remote();
                let result = self.backend.add_item(product.id, quantity).await;
                self.finish_remote(token, result)?;
            }
        }

        self.notifier.success(messages::ADD_TO_CART);
        Ok(())
    }

    /// Remove a line item from the cart.
    ///
    /// Removing an absent item is a benign no-op locally; remotely the
    /// backend's verdict is surfaced as-is.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote call fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_item(&self, product_id: ProductId) -> Result<(), CartError> {
        match CartStrategy::for_session(&self.session) {
            CartStrategy::Local => {
                self.store.remove_local(product_id);
                self.persist_guest_cart();
            }
            CartStrategy::Remote => {
                let token = self.store.begin_remote();
                let result = self.backend.remove_item(product_id).await;
                self.finish_remote(token, result)?;
            }
        }

        self.notifier.success(messages::REMOVE_FROM_CART);
        Ok(())
    }

    /// Set a line item's quantity.
    ///
    /// Quantity >= 1 and stock-limit validation happen before this call.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote call fails.
    #[instrument(skip(self), fields(product_id = %product_id, quantity))]
    pub async fn update_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), CartError> {
        match CartStrategy::for_session(&self.session) {
            CartStrategy::Local => {
                self.store.update_quantity_local(product_id, quantity);
                self.persist_guest_cart();
            }
            CartStrategy::Remote => {
                let token = self.store.begin_remote();
                let result = self.backend.update_quantity(product_id, quantity).await;
                self.finish_remote(token, result)?;
            }
        }

        self.notifier.success(messages::QUANTITY_UPDATED);
        Ok(())
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), CartError> {
        match CartStrategy::for_session(&self.session) {
            CartStrategy::Local => {
                self.store.clear_local();
                self.persist_guest_cart();
            }
            CartStrategy::Remote => {
                let token = self.store.begin_remote();
                let result = self.backend.clear().await;
                self.finish_remote(token, result)?;
            }
        }

        self.notifier.success(messages::CART_CLEARED);
        Ok(())
    }

    /// Re-fetch the authoritative cart for an authenticated session.
    ///
    /// A no-op for guests (their cart is already the source of truth).
    /// Fetching emits no success notification.
    ///
    /// # Errors
    ///
    /// Returns an error when the fetch fails.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), CartError> {
        if CartStrategy::for_session(&self.session) == CartStrategy::Local {
            return Ok(());
        }

        let token = self.store.begin_remote();
        match self.backend.fetch().await {
            Ok(cart) => {
                self.store.complete_remote_ok(token, cart);
                Ok(())
            }
            Err(error) => {
                let message = error.user_message();
                self.store.complete_remote_err(token, message.clone());
                // A backend-supplied message wins; only a bare failure gets
                // the fetch-specific fallback.
                if message == messages::GENERIC_ERROR {
                    self.notifier.error(messages::FETCH_CART_FAILED);
                } else {
                    self.notifier.error(&message);
                }
                Err(CartError::Remote { message })
            }
        }
    }

    /// Revert to an empty guest cart (used on logout; no merge back).
    pub fn reset_to_guest(&self) {
        self.store.clear_local();
        self.persist_guest_cart();
    }

    /// Apply a remote outcome to the store and notify on failure.
    pub(crate) fn finish_remote(
        &self,
        token: RequestToken,
        result: Result<Cart, ApiError>,
    ) -> Result<(), CartError> {
        match result {
            Ok(cart) => {
                self.store.complete_remote_ok(token, cart);
                Ok(())
            }
            Err(error) => {
                let message = error.user_message();
                self.store.complete_remote_err(token, message.clone());
                self.notifier.error(&message);
                Err(CartError::Remote { message })
            }
        }
    }

    /// Persist the guest cart snapshot. Guest operations always succeed;
    /// a snapshot write failure is logged, not propagated.
    pub(crate) fn persist_guest_cart(&self) {
        let items = self.store.items();
        if let Err(error) = storage::update(self.snapshots.as_ref(), |state| {
            state.cart_items = items;
        }) {
            warn!(%error, "Failed to persist guest cart snapshot");
        }
    }

    /// Drop the persisted guest cart after a successful merge.
    pub(crate) fn discard_guest_snapshot(&self) {
        if let Err(error) = storage::update(self.snapshots.as_ref(), |state| {
            state.cart_items = Vec::new();
        }) {
            warn!(%error, "Failed to discard guest cart snapshot");
        }
    }
}
