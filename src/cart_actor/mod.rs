//! # Cart Actor
//!
//! One [`Cart`] per ordering session, all owned by a single
//! [`ResourceActor`] task.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Cart`]
//! - [`error`] - [`CartError`] for validation and transport failures
//! - [`actions`] - [`CartAction`], [`CartActionResult`] and [`CartSnapshot`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, generic_client) = cart_actor::new(32);
//! let client = CartClient::new(generic_client, Duration::from_secs(2));
//!
//! // The catalog is the actor's context.
//! tokio::spawn(actor.run(Arc::new(catalog)));
//!
//! let cart = client.open_session().await?;
//! client.add_to_order(cart, None, "Margherita", Selection::new()).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Cart;

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size)
}
