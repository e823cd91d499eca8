//! Shopfront Core - Shared types library.
//!
//! This crate provides the domain types used across all Shopfront components:
//! - `client` - Storefront client SDK talking to the REST backend
//! - `cli` - Terminal storefront shell
//!
//! # Architecture
//!
//! The core crate contains only types and helpers - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, cart/product/order/user DTOs, and money helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
