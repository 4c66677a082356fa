//! ActorEntity trait implementation for the Cart domain type.
//!
//! Carts need the catalog to price `AddToOrder`; it arrives as the actor
//! context, shared read-only behind an `Arc`.

use super::actions::{CartAction, CartActionResult, CartSnapshot};
use super::error::CartError;
use crate::catalog::CatalogIndex;
use crate::framework::ActorEntity;
use crate::model::{Cart, CartId};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = ();
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = Arc<CatalogIndex>;
    type Error = CartError;

    /// Opens an empty cart for a new session.
    fn from_create_params(id: CartId, _params: ()) -> Result<Self, CartError> {
        Ok(Cart::new(id))
    }

    async fn on_delete(&self, _catalog: &Arc<CatalogIndex>) -> Result<(), CartError> {
        if !self.is_empty() {
            debug!(cart = %self.id, lines = self.lines().len(), "Discarding unsubmitted cart");
        }
        Ok(())
    }

    /// Handles custom actions for the Cart entity.
    ///
    /// # Actions
    /// - `AddToOrder`: looks the product up in the catalog and prices the selection
    /// - `AddPriced`: merges a fixed-price item by name
    /// - `Increment` / `Decrement`: adjust a line by display name
    /// - `Clear`: empties the cart
    /// - `Checkout`: validates and returns the order snapshot
    /// - `Snapshot`: returns the lines and total
    async fn handle_action(
        &mut self,
        action: CartAction,
        catalog: &Arc<CatalogIndex>,
    ) -> Result<CartActionResult, CartError> {
        match action {
            CartAction::AddToOrder {
                category,
                product,
                selection,
            } => {
                let found = catalog
                    .find_product(category.as_deref(), &product)
                    .ok_or(CartError::UnknownProduct(product))?;
                let line = self.add_to_order(found.product, selection)?;
                Ok(CartActionResult::AddToOrder(line))
            }
            CartAction::AddPriced {
                name,
                unit_price,
                quantity,
            } => {
                let line = self.add_priced(&name, unit_price, quantity)?;
                Ok(CartActionResult::AddPriced(line))
            }
            CartAction::Increment(name) => Ok(CartActionResult::Increment(self.increment_line(&name))),
            CartAction::Decrement(name) => Ok(CartActionResult::Decrement(self.decrement_line(&name))),
            CartAction::Clear => {
                self.clear();
                Ok(CartActionResult::Clear(()))
            }
            CartAction::Checkout(details) => {
                let submission = self.checkout(details)?;
                Ok(CartActionResult::Checkout(Box::new(submission)))
            }
            CartAction::Snapshot => Ok(CartActionResult::Snapshot(CartSnapshot::from(&*self))),
        }
    }
}
