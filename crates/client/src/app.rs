//! Application facade.
//!
//! `Storefront` wires the config, session, snapshot store, and API client
//! into one handle exposing every service, and owns the cross-service
//! orchestrations: startup restore, the login/merge sequence, logout, and
//! checkout.

use std::sync::Arc;

use shopfront_core::{Order, User, cart_total};
use tracing::{info, instrument, warn};

use crate::admin::AdminClient;
use crate::api::{ApiClient, ApiError};
use crate::auth::{AuthClient, RegisterRequest};
use crate::cart::{CartStore, CartSynchronizer, RestCartBackend};
use crate::catalog::ProductCatalog;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::notify::{SharedNotifier, messages};
use crate::orders::OrderClient;
use crate::session::Session;
use crate::storage::{FileStore, StateStore};
use crate::wishlist::WishlistClient;

/// One connected storefront instance.
pub struct Storefront {
    session: Session,
    snapshots: Arc<dyn StateStore>,
    notifier: SharedNotifier,
    auth: AuthClient,
    catalog: ProductCatalog,
    cart: CartSynchronizer<RestCartBackend>,
    orders: OrderClient,
    wishlist: WishlistClient,
    admin: AdminClient,
}

impl Storefront {
    /// Assemble the full client stack from a config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, notifier: SharedNotifier) -> Result<Self> {
        let snapshots: Arc<dyn StateStore> = Arc::new(FileStore::new(config.state_path.clone()));
        Self::with_store(config, snapshots, notifier)
    }

    /// Assemble the stack over an injected snapshot store (tests,
    /// ephemeral sessions).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_store(
        config: &ClientConfig,
        snapshots: Arc<dyn StateStore>,
        notifier: SharedNotifier,
    ) -> Result<Self> {
        let session = Session::new();
        let api = ApiClient::new(config, session.clone())?;

        let cart = CartSynchronizer::new(
            CartStore::new(),
            RestCartBackend::new(api.clone()),
            session.clone(),
            snapshots.clone(),
            notifier.clone(),
        );

        Ok(Self {
            auth: AuthClient::new(api.clone(), session.clone(), snapshots.clone()),
            catalog: ProductCatalog::new(api.clone()),
            orders: OrderClient::new(api.clone()),
            wishlist: WishlistClient::new(api.clone()),
            admin: AdminClient::new(api),
            session,
            snapshots,
            notifier,
            cart,
        })
    }

    // =========================================================================
    // Services
    // =========================================================================

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthClient {
        &self.auth
    }

    #[must_use]
    pub const fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartSynchronizer<RestCartBackend> {
        &self.cart
    }

    #[must_use]
    pub const fn orders(&self) -> &OrderClient {
        &self.orders
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistClient {
        &self.wishlist
    }

    #[must_use]
    pub const fn admin(&self) -> &AdminClient {
        &self.admin
    }

    // =========================================================================
    // Orchestrations
    // =========================================================================

    /// Resume the previous session at startup.
    ///
    /// A persisted credential re-authenticates the session and refreshes
    /// the cart from the backend (a fetch failure is logged, not fatal).
    /// Without one, the persisted guest cart is rehydrated locally.
    #[instrument(skip(self))]
    pub async fn start(&self) {
        if let Some(user) = self.auth.restore() {
            info!(email = %user.email, "Resumed authenticated session");
            if let Err(e) = self.cart.refresh().await {
                warn!(error = %e, "Cart refresh failed at startup");
            }
            return;
        }

        match self.snapshots.load() {
            Ok(Some(state)) if !state.cart_items.is_empty() => {
                let total = cart_total(&state.cart_items);
                self.cart.store().replace_whole(state.cart_items, total);
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Failed to load guest cart snapshot"),
        }
    }

    /// Log in and reconcile the guest cart.
    ///
    /// Guest items are merged into the account cart exactly once; an empty
    /// guest cart skips the merge and fetches the account cart instead.
    /// Both follow-ups are non-fatal: the login itself already succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error when the credentials are rejected.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = self.auth.login(email, password).await.map_err(|e| {
            self.notifier.error(&e.user_message());
            ClientError::from(e)
        })?;
        self.notifier.success(messages::LOGIN);

        if self.cart.store().items().is_empty() {
            if let Err(e) = self.cart.refresh().await {
                warn!(error = %e, "Cart fetch after login failed");
            }
        } else if let Err(e) = self.cart.merge_guest_cart().await {
            warn!(error = %e, "Guest cart merge failed; guest cart retained");
        }

        Ok(user)
    }

    /// Register a new account and adopt it like a login.
    ///
    /// # Errors
    ///
    /// Returns an error when registration is rejected.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        let user = self.auth.register(request).await.map_err(|e| {
            self.notifier.error(&e.user_message());
            ClientError::from(e)
        })?;
        self.notifier.success(messages::REGISTER);

        if let Err(e) = self.cart.merge_guest_cart().await {
            warn!(error = %e, "Guest cart merge failed; guest cart retained");
        }

        Ok(user)
    }

    /// Log out and reset to an empty guest cart. The account cart stays on
    /// the server; it is not merged back locally.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        self.auth.logout().await;
        self.cart.reset_to_guest();
        self.notifier.success(messages::LOGOUT);
    }

    /// Place an order from the server-side cart, then refresh the (now
    /// emptied) cart.
    ///
    /// # Errors
    ///
    /// Returns an error when checkout is rejected.
    #[instrument(skip(self, request))]
    pub async fn checkout(&self, request: &shopfront_core::CheckoutRequest) -> Result<Order> {
        let order = self.orders.checkout(request).await.map_err(|e| {
            self.notifier.error(&e.user_message());
            ClientError::from(e)
        })?;
        self.notifier.success(messages::ORDER_PLACED);

        if let Err(e) = self.cart.refresh().await {
            warn!(error = %e, "Cart refresh after checkout failed");
        }

        Ok(order)
    }

    /// Centralized 401 handling: drop the stale credential and revert to a
    /// guest cart. Call when any service returns [`ApiError::Unauthorized`].
    pub fn handle_unauthorized(&self) {
        self.auth.handle_unauthorized();
        self.cart.reset_to_guest();
        self.notifier.error(messages::UNAUTHORIZED);
    }

    /// Whether an error should trigger [`Self::handle_unauthorized`].
    #[must_use]
    pub const fn is_unauthorized(error: &ApiError) -> bool {
        matches!(error, ApiError::Unauthorized { .. })
    }
}
