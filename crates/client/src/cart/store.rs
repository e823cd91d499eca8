//! Cart state store.
//!
//! Holds the canonical line items and the derived total, plus the remote
//! bookkeeping (`loading`, `error`). All transitions are synchronous and
//! infallible; only the synchronizer and the merge operation mutate the
//! store, everything else reads.
//!
//! Remote responses are applied through monotonic request tokens: a
//! response older than the newest applied one is discarded instead of
//! overwriting fresher state.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;
use shopfront_core::{Cart, CartItemRef, CartLineItem, ProductId, cart_total, line_subtotal};
use tracing::warn;

/// Read-only view of the cart state.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    pub total_amount: Decimal,
    /// True while any remote cart operation is outstanding.
    pub loading: bool,
    /// Last remote failure message; cleared on the next attempt.
    pub error: Option<String>,
}

/// Token identifying one remote cart operation.
///
/// Tokens are strictly increasing; the store only applies a response whose
/// token is newer than the last applied one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Injectable cart state container.
#[derive(Clone, Default)]
pub struct CartStore {
    inner: Arc<RwLock<CartState>>,
}

#[derive(Default)]
struct CartState {
    items: Vec<CartLineItem>,
    total_amount: Decimal,
    pending: u32,
    error: Option<String>,
    issued: u64,
    applied: u64,
}

impl CartStore {
    /// Create an empty guest cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, CartState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CartState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    /// Current line items, in display order.
    #[must_use]
    pub fn items(&self) -> Vec<CartLineItem> {
        self.read().items.clone()
    }

    /// Derived (guest) or backend-supplied (authenticated) cart total.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.read().total_amount
    }

    /// Total quantity across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.read().items.iter().map(|item| item.quantity).sum()
    }

    /// True while any remote cart operation is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read().pending > 0
    }

    /// Last remote failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    /// Full read-only view.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        let state = self.read();
        CartSnapshot {
            items: state.items.clone(),
            total_amount: state.total_amount,
            loading: state.pending > 0,
            error: state.error.clone(),
        }
    }

    /// `(product_id, quantity)` pairs, as submitted to the merge endpoint.
    #[must_use]
    pub fn item_refs(&self) -> Vec<CartItemRef> {
        self.read()
            .items
            .iter()
            .map(|item| CartItemRef {
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect()
    }

    // =========================================================================
    // Local transitions (guest cart)
    // =========================================================================

    /// Add a line item, merging by product ID.
    ///
    /// An existing line keeps the price supplied on first add; only its
    /// quantity and subtotal change. The total is recomputed afterwards, so
    /// no duplicate `product_id` can result.
    pub fn add_local(
        &self,
        product_id: ProductId,
        product_name: &str,
        product_price: Decimal,
        product_image_url: Option<String>,
        quantity: u32,
    ) {
        let mut state = self.write();

        if let Some(item) = state
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            item.quantity += quantity;
            item.subtotal = line_subtotal(item.product_price, item.quantity);
        } else {
            state.items.push(CartLineItem {
                product_id,
                product_name: product_name.to_string(),
                product_price,
                product_image_url,
                quantity,
                subtotal: line_subtotal(product_price, quantity),
            });
        }

        state.total_amount = cart_total(&state.items);
    }

    /// Remove the matching line item; benign no-op when absent.
    pub fn remove_local(&self, product_id: ProductId) {
        let mut state = self.write();
        state.items.retain(|item| item.product_id != product_id);
        state.total_amount = cart_total(&state.items);
    }

    /// Set a line's quantity and recompute its subtotal; no-op when absent.
    ///
    /// Quantity >= 1 and stock-limit validation are the caller's job.
    pub fn update_quantity_local(&self, product_id: ProductId, quantity: u32) {
        let mut state = self.write();

        if let Some(item) = state
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            item.quantity = quantity;
            item.subtotal = line_subtotal(item.product_price, quantity);
            state.total_amount = cart_total(&state.items);
        }
    }

    /// Empty the cart and zero the total.
    pub fn clear_local(&self) {
        let mut state = self.write();
        state.items.clear();
        state.total_amount = Decimal::ZERO;
        state.error = None;
    }

    /// Wholesale overwrite with a backend payload. The supplied total is
    /// trusted verbatim, not recomputed.
    pub fn replace_whole(&self, items: Vec<CartLineItem>, total_amount: Decimal) {
        let mut state = self.write();
        state.items = items;
        state.total_amount = total_amount;
    }

    /// Dismiss the last remote failure message.
    pub fn clear_error(&self) {
        self.write().error = None;
    }

    // =========================================================================
    // Remote bookkeeping
    // =========================================================================

    /// Register an outstanding remote operation: raises `loading`, clears
    /// the previous error, and hands out the next request token.
    #[must_use]
    pub fn begin_remote(&self) -> RequestToken {
        let mut state = self.write();
        state.pending += 1;
        state.error = None;
        state.issued += 1;
        RequestToken(state.issued)
    }

    /// Apply a successful remote response, unless a newer response has
    /// already been applied (the stale one is discarded).
    pub fn complete_remote_ok(&self, token: RequestToken, cart: Cart) {
        let mut state = self.write();
        state.pending = state.pending.saturating_sub(1);

        if token.0 <= state.applied {
            warn!(token = token.0, applied = state.applied, "Discarding stale cart response");
            return;
        }

        state.applied = token.0;
        state.items = cart.items;
        state.total_amount = cart.total_amount;
    }

    /// Record a remote failure. Items and total are left untouched; the
    /// token is consumed but never applied, so a later response may still
    /// land.
    pub fn complete_remote_err(&self, _token: RequestToken, message: String) {
        let mut state = self.write();
        state.pending = state.pending.saturating_sub(1);
        state.error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    fn store_with_widget(quantity: u32) -> CartStore {
        let store = CartStore::new();
        store.add_local(ProductId::new(1), "Widget", dec(999), None, quantity);
        store
    }

    #[test]
    fn add_local_appends_new_line() {
        let store = store_with_widget(2);
        let items = store.items();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, ProductId::new(1));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].subtotal, dec(1998));
        assert_eq!(store.total_amount(), dec(1998));
    }

    #[test]
    fn add_local_merges_by_product_id() {
        let store = store_with_widget(2);
        store.add_local(ProductId::new(1), "Widget", dec(999), None, 3);

        let items = store.items();
        assert_eq!(items.len(), 1, "no duplicate product_id");
        assert_eq!(items[0].quantity, 5);
        assert_eq!(items[0].subtotal, dec(4995));
        assert_eq!(store.total_amount(), dec(4995));
    }

    #[test]
    fn merged_line_keeps_first_add_price() {
        let store = store_with_widget(1);
        // Second add supplies a different price; the original wins.
        store.add_local(ProductId::new(1), "Widget", dec(1299), None, 1);

        let items = store.items();
        assert_eq!(items[0].product_price, dec(999));
        assert_eq!(items[0].subtotal, dec(1998));
    }

    #[test]
    fn total_tracks_every_local_mutation() {
        let store = store_with_widget(2);
        store.add_local(ProductId::new(2), "Gadget", dec(500), None, 1);
        assert_eq!(store.total_amount(), dec(2498));

        store.update_quantity_local(ProductId::new(2), 3);
        assert_eq!(store.total_amount(), dec(3498));

        store.remove_local(ProductId::new(1));
        assert_eq!(store.total_amount(), dec(1500));

        store.clear_local();
        assert_eq!(store.total_amount(), Decimal::ZERO);
        assert!(store.items().is_empty());
    }

    #[test]
    fn remove_local_of_absent_item_is_noop() {
        let store = store_with_widget(2);
        let before = store.snapshot();

        store.remove_local(ProductId::new(99));

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn update_quantity_is_idempotent() {
        let store = store_with_widget(2);
        store.update_quantity_local(ProductId::new(1), 4);
        let once = store.snapshot();

        store.update_quantity_local(ProductId::new(1), 4);
        assert_eq!(store.snapshot(), once);
    }

    #[test]
    fn update_quantity_of_absent_item_is_noop() {
        let store = store_with_widget(2);
        let before = store.snapshot();

        store.update_quantity_local(ProductId::new(42), 7);

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn replace_whole_overwrites_regardless_of_prior_state() {
        let store = store_with_widget(2);

        let replacement = vec![CartLineItem {
            product_id: ProductId::new(7),
            product_name: "Server item".to_string(),
            product_price: dec(100),
            product_image_url: None,
            quantity: 1,
            subtotal: dec(100),
        }];
        // Deliberately inconsistent total: the backend value is trusted.
        store.replace_whole(replacement.clone(), dec(12345));

        assert_eq!(store.items(), replacement);
        assert_eq!(store.total_amount(), dec(12345));
    }

    #[test]
    fn item_count_sums_quantities() {
        let store = store_with_widget(2);
        store.add_local(ProductId::new(2), "Gadget", dec(500), None, 3);
        assert_eq!(store.item_count(), 5);
    }

    #[test]
    fn begin_remote_raises_loading_and_clears_error() {
        let store = CartStore::new();
        let first = store.begin_remote();
        store.complete_remote_err(first, "boom".to_string());
        assert_eq!(store.error().as_deref(), Some("boom"));
        assert!(!store.is_loading());

        let _token = store.begin_remote();
        assert!(store.is_loading());
        assert!(store.error().is_none());
    }

    #[test]
    fn remote_failure_keeps_prior_state() {
        let store = store_with_widget(2);
        let before_items = store.items();
        let before_total = store.total_amount();

        let token = store.begin_remote();
        store.complete_remote_err(token, "Insufficient stock available".to_string());

        assert_eq!(store.items(), before_items);
        assert_eq!(store.total_amount(), before_total);
        assert_eq!(
            store.error().as_deref(),
            Some("Insufficient stock available")
        );
        assert!(!store.is_loading());
    }

    #[test]
    fn stale_response_is_discarded() {
        let store = CartStore::new();
        let older = store.begin_remote();
        let newer = store.begin_remote();

        let newer_cart = Cart {
            items: vec![CartLineItem {
                product_id: ProductId::new(1),
                product_name: "Widget".to_string(),
                product_price: dec(999),
                product_image_url: None,
                quantity: 5,
                subtotal: dec(4995),
            }],
            total_amount: dec(4995),
        };
        store.complete_remote_ok(newer, newer_cart.clone());

        // The older response resolves last and must not win.
        store.complete_remote_ok(older, Cart::empty());

        assert_eq!(store.items(), newer_cart.items);
        assert_eq!(store.total_amount(), dec(4995));
        assert!(!store.is_loading());
    }

    #[test]
    fn loading_stays_up_while_any_operation_is_outstanding() {
        let store = CartStore::new();
        let a = store.begin_remote();
        let b = store.begin_remote();
        assert!(store.is_loading());

        store.complete_remote_ok(a, Cart::empty());
        assert!(store.is_loading());

        store.complete_remote_ok(b, Cart::empty());
        assert!(!store.is_loading());
    }
}
