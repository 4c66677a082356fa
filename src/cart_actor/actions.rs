//! Custom actions for the Cart actor.
//!
//! Every change to a cart goes through one of these; the actor applies them
//! in arrival order, so two requests for the same session never interleave.

use crate::model::{Cart, CartId, CartLine, OrderDetails, OrderSubmission, Selection};
use serde::Serialize;

#[derive(Debug, Clone)]
pub enum CartAction {
    /// Prices a catalog product and merges it into the cart.
    ///
    /// With `category` set, only that category is searched for `product`.
    AddToOrder {
        category: Option<String>,
        product: String,
        selection: Selection,
    },
    /// Adds a fixed-price item (quick-order buttons).
    AddPriced {
        name: String,
        unit_price: u64,
        quantity: u32,
    },
    /// Adds one unit to the line with this display name.
    Increment(String),
    /// Removes one unit from the line with this display name.
    Decrement(String),
    Clear,
    /// Validates and snapshots the order without clearing the cart.
    Checkout(OrderDetails),
    /// Returns the current lines and total.
    Snapshot,
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone)]
pub enum CartActionResult {
    AddToOrder(CartLine),
    AddPriced(CartLine),
    /// New quantity (0 if the line was removed), `None` for an unknown line.
    Increment(Option<u32>),
    Decrement(Option<u32>),
    Clear(()),
    Checkout(Box<OrderSubmission>),
    Snapshot(CartSnapshot),
}

/// Read-only copy of a cart handed out to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    pub id: Option<CartId>,
    pub lines: Vec<CartLine>,
    pub total: u64,
    pub item_count: u64,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        Self {
            id: Some(cart.id),
            lines: cart.lines().to_vec(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}
