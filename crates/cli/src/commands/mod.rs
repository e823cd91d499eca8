//! Command implementations, one module per subcommand group.

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod wishlist;
