//! Guest-cart merge: one-time reconciliation at login.
//!
//! The guest cart's `(product_id, quantity)` pairs are sent to the merge
//! endpoint; the backend combines them with any pre-existing account cart
//! and clamps to stock limits. The response becomes the authoritative cart.
//! Merging twice would double-add guest quantities, so the login
//! orchestration guarantees a single invocation per login transition.

use tracing::instrument;

use crate::cart::backend::CartBackend;
use crate::cart::sync::{CartError, CartSynchronizer};
use crate::notify::messages;

impl<B: CartBackend> CartSynchronizer<B> {
    /// Merge the guest cart into the freshly authenticated session's cart.
    ///
    /// Preconditions: the session already holds a valid credential, and
    /// this is the first invocation for this login. An empty guest cart is
    /// skipped entirely (nothing to reconcile).
    ///
    /// On failure the guest cart and its persisted snapshot are retained,
    /// so nothing is lost and the caller may retry; the store keeps the
    /// pre-merge view until a later fetch succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error when the merge call fails.
    #[instrument(skip(self))]
    pub async fn merge_guest_cart(&self) -> Result<(), CartError> {
        let guest_items = self.store().item_refs();
        if guest_items.is_empty() {
            return Ok(());
        }

        let token = self.store().begin_remote();
        let result = self.backend().merge(&guest_items).await;
        self.finish_remote(token, result)?;

        // Only now is the guest cart discarded; the merged response is the
        // new source of truth.
        self.discard_guest_snapshot();
        self.notifier().success(messages::CART_MERGED);
        Ok(())
    }
}
