//! Shopfront client SDK.
//!
//! A headless storefront client for the Shopfront REST backend: catalog
//! browsing, a guest/authenticated shopping cart with login-time merge,
//! orders, wishlist, auth, and admin operations.
//!
//! The entry point is [`app::Storefront`], which wires every service over
//! one shared [`session::Session`] and [`api::ApiClient`]. The cart
//! subsystem lives in [`cart`]; see its module docs for the control flow.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod api;
pub mod app;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod orders;
pub mod session;
pub mod storage;
pub mod wishlist;

pub use api::{ApiClient, ApiError};
pub use app::Storefront;
pub use cart::{CartError, CartSnapshot, CartStore, CartSynchronizer, RestCartBackend};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use notify::{Notifier, SharedNotifier, TracingNotifier};
pub use session::Session;
pub use storage::{FileStore, MemoryStore, PersistedState, StateStore};
