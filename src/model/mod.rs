//! Plain data: the catalog document, carts and order records.

pub mod cart;
pub mod catalog;
pub mod order;

pub use cart::*;
pub use catalog::*;
pub use order::*;
