//! Brewpass Core - Shared types library.
//!
//! This crate provides the records exchanged with the commerce API:
//! - stores from the nearby and address locators
//! - registered payment cards
//! - past orders, carts, priced orders and tenders
//!
//! # Architecture
//!
//! The core crate contains only types and pure transformations - no I/O, no
//! HTTP clients. `brewpass-client` fills these records from upstream JSON.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the store, card and order records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
