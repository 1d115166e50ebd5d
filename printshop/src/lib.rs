//! `printshop` - order lifecycle and cart-to-order core for a kids'
//! 3D-print storefront.
//!
//! The crate models the storefront's only nontrivial domain logic - price
//! snapshotting, session-scoped cart merging, atomic cart-to-order
//! conversion, append-only status history, and admin stats - as a library
//! independent of storage and transport. Persistence adapters implement the
//! [`repository::Repository`] port; see the `printshop-memory` crate for
//! the in-memory adapter.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cart;
pub mod cart_store;
pub mod catalog;
pub mod errors;
pub mod order;
pub mod orders;
pub mod product;
pub mod repository;
pub mod seed;
pub mod stats;
pub mod tracking;
pub mod types;
