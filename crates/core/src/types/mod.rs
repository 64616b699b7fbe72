//! Domain records for Brewpass.
//!
//! Plain data returned by, or sent to, the commerce API.

pub mod card;
pub mod id;
pub mod order;
pub mod store;

pub use card::Card;
pub use id::*;
pub use order::{Cart, CartItem, OrderItem, PastOrder, PricedOrder, Tender, TenderKind};
pub use store::{Store, StoreAddress};
