//! User-visible notification observer.
//!
//! The cart synchronizer and merge operation emit a transient notification
//! for every mutating action, success or failure. The `Notifier` trait
//! keeps that side effect out of the state-transition logic: the SDK ships
//! a `tracing`-backed implementation, the CLI prints to the console, and
//! tests record messages for assertions.

use std::sync::Arc;

/// Sink for transient user-visible notifications.
pub trait Notifier: Send + Sync {
    /// A mutating action completed.
    fn success(&self, message: &str);

    /// A mutating action failed; `message` is the backend's message when
    /// present, else a generic fallback.
    fn error(&self, message: &str);

    /// Neutral information (e.g. "Your cart is empty").
    fn info(&self, message: &str) {
        self.success(message);
    }
}

/// Shared handle to a notifier.
pub type SharedNotifier = Arc<dyn Notifier>;

/// Notifier that emits structured log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(kind = "success", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!(kind = "error", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(kind = "info", "{message}");
    }
}

/// Canonical notification messages.
pub mod messages {
    pub const ADD_TO_CART: &str = "Added to cart";
    pub const REMOVE_FROM_CART: &str = "Removed from cart";
    pub const QUANTITY_UPDATED: &str = "Quantity updated";
    pub const CART_CLEARED: &str = "Cart cleared successfully";
    pub const CART_MERGED: &str = "Cart merged successfully";
    pub const ADD_TO_WISHLIST: &str = "Added to wishlist";
    pub const REMOVE_FROM_WISHLIST: &str = "Removed from wishlist";
    pub const LOGIN: &str = "Welcome back!";
    pub const REGISTER: &str = "Account created successfully!";
    pub const LOGOUT: &str = "Logged out successfully";
    pub const ORDER_PLACED: &str = "Order placed successfully!";

    pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";
    pub const UNAUTHORIZED: &str = "Please login to continue";
    pub const FETCH_CART_FAILED: &str = "Failed to load cart";
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use super::Notifier;

    /// Records every notification for later assertions.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        pub successes: Mutex<Vec<String>>,
        pub errors: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            self.successes.lock().unwrap().push(message.to_string());
        }

        fn error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
    }
}
