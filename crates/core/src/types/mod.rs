//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers and wire DTOs for the REST
//! backend's domain concepts.

pub mod cart;
pub mod id;
pub mod money;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItemRef, CartLineItem, cart_total};
pub use id::*;
pub use money::{line_subtotal, round_money};
pub use order::{CheckoutRequest, Order, OrderItem, OrderStatus};
pub use product::{Page, Product};
pub use user::{AuthResponse, User};
