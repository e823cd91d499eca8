//! End-to-end cart flow over the public API: a guest shops offline, logs
//! in, merges the guest cart, and keeps shopping through the backend.

use std::sync::Arc;
use std::sync::Mutex;

use rust_decimal::Decimal;
use secrecy::SecretString;
use shopfront_client::cart::{CartBackend, CartStore, CartSynchronizer};
use shopfront_client::{ApiError, Notifier, SharedNotifier, Session, StateStore};
use shopfront_client::storage::MemoryStore;
use shopfront_core::{Cart, CartItemRef, CartLineItem, Product, ProductId, User, UserId, cart_total};

/// Backend double: answers every call with the scripted cart and records
/// what was merged.
#[derive(Default)]
struct ScriptedBackend {
    cart: Mutex<Cart>,
    failing: Mutex<bool>,
    merged: Mutex<Option<Vec<CartItemRef>>>,
}

impl ScriptedBackend {
    fn script(&self, cart: Cart) {
        *self.cart.lock().unwrap() = cart;
    }

    fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    fn answer(&self) -> Result<Cart, ApiError> {
        if *self.failing.lock().unwrap() {
            return Err(ApiError::Api {
                status: 409,
                message: "Insufficient stock available".to_string(),
            });
        }
        Ok(self.cart.lock().unwrap().clone())
    }
}

impl CartBackend for &ScriptedBackend {
    async fn fetch(&self) -> Result<Cart, ApiError> {
        self.answer()
    }

    async fn add_item(&self, _: ProductId, _: u32) -> Result<Cart, ApiError> {
        self.answer()
    }

    async fn update_quantity(&self, _: ProductId, _: u32) -> Result<Cart, ApiError> {
        self.answer()
    }

    async fn remove_item(&self, _: ProductId) -> Result<Cart, ApiError> {
        self.answer()
    }

    async fn clear(&self) -> Result<Cart, ApiError> {
        self.answer()
    }

    async fn merge(&self, items: &[CartItemRef]) -> Result<Cart, ApiError> {
        *self.merged.lock().unwrap() = Some(items.to_vec());
        self.answer()
    }
}

struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn success(&self, _: &str) {}
    fn error(&self, _: &str) {}
}

fn product(id: i64, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        description: None,
        price: Decimal::new(cents, 2),
        image_url: None,
        category_id: None,
        stock_quantity: Some(25),
        created_at: None,
    }
}

fn line(id: i64, cents: i64, quantity: u32) -> CartLineItem {
    let price = Decimal::new(cents, 2);
    CartLineItem {
        product_id: ProductId::new(id),
        product_name: format!("Product {id}"),
        product_price: price,
        product_image_url: None,
        quantity,
        subtotal: price * Decimal::from(quantity),
    }
}

fn synchronizer<'a>(
    backend: &'a ScriptedBackend,
    session: Session,
    snapshots: Arc<MemoryStore>,
) -> CartSynchronizer<&'a ScriptedBackend> {
    let notifier: SharedNotifier = Arc::new(SilentNotifier);
    CartSynchronizer::new(CartStore::new(), backend, session, snapshots, notifier)
}

fn login(session: &Session) {
    session.set_credentials(
        User {
            id: UserId::new(7),
            email: "ada@example.com".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: None,
            roles: Vec::new(),
            enabled: true,
        },
        SecretString::from("jwt"),
    );
}

#[tokio::test]
async fn guest_cart_survives_a_restart() {
    let backend = ScriptedBackend::default();
    let snapshots = Arc::new(MemoryStore::new());
    let sync = synchronizer(&backend, Session::new(), snapshots.clone());

    sync.add_item(&product(1, 999), 2).await.unwrap();
    sync.add_item(&product(2, 1950), 1).await.unwrap();
    sync.update_quantity(ProductId::new(2), 3).await.unwrap();

    // Simulate a fresh process over the same snapshot store.
    let restarted = synchronizer(&backend, Session::new(), snapshots.clone());
    let persisted = snapshots.load().unwrap().unwrap();
    let total = cart_total(&persisted.cart_items);
    restarted.store().replace_whole(persisted.cart_items, total);

    assert_eq!(restarted.store().item_count(), 5);
    assert_eq!(
        restarted.store().total_amount(),
        Decimal::new(999 * 2 + 1950 * 3, 2)
    );
}

#[tokio::test]
async fn login_merge_hands_the_cart_to_the_backend() {
    let backend = ScriptedBackend::default();
    let merged = Cart {
        items: vec![line(1, 999, 2), line(5, 450, 1)],
        total_amount: Decimal::new(999 * 2 + 450, 2),
    };
    backend.script(merged.clone());

    let snapshots = Arc::new(MemoryStore::new());
    let session = Session::new();
    let sync = synchronizer(&backend, session.clone(), snapshots.clone());

    // Guest phase.
    sync.add_item(&product(1, 999), 2).await.unwrap();

    // Login phase.
    login(&session);
    sync.merge_guest_cart().await.unwrap();

    let submitted = backend.merged.lock().unwrap().clone().unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].product_id, ProductId::new(1));
    assert_eq!(submitted[0].quantity, 2);

    // The merged backend cart is adopted wholesale.
    assert_eq!(sync.store().items(), merged.items);
    assert_eq!(sync.store().total_amount(), merged.total_amount);

    // The persisted guest cart is gone; only the credentialless snapshot
    // shell remains.
    assert!(snapshots.load().unwrap().unwrap().cart_items.is_empty());
}

#[tokio::test]
async fn authenticated_operations_round_trip_and_surface_failures() {
    let backend = ScriptedBackend::default();
    let snapshots = Arc::new(MemoryStore::new());
    let session = Session::new();
    login(&session);
    let sync = synchronizer(&backend, session, snapshots);

    let served = Cart {
        items: vec![line(3, 2500, 1)],
        total_amount: Decimal::new(2500, 2),
    };
    backend.script(served.clone());
    sync.add_item(&product(3, 2500), 1).await.unwrap();
    assert_eq!(sync.store().items(), served.items);

    // A rejected operation keeps the last good state and records the
    // backend's message.
    backend.set_failing(true);
    let err = sync.add_item(&product(3, 2500), 99).await.unwrap_err();
    assert_eq!(err.to_string(), "Insufficient stock available");
    assert_eq!(sync.store().items(), served.items);
    assert_eq!(
        sync.store().error().as_deref(),
        Some("Insufficient stock available")
    );

    // The next successful operation clears the error.
    backend.set_failing(false);
    sync.refresh().await.unwrap();
    assert!(sync.store().error().is_none());
}
