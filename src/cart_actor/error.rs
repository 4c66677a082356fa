//! Error types for the Cart actor.

use thiserror::Error;

/// Errors that can occur while editing or submitting a cart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// No cart is open under this id.
    #[error("Cart not found: {0}")]
    NotFound(String),

    /// The product is not listed in the catalog.
    #[error("Product not found: {0}")]
    UnknownProduct(String),

    /// Lines are added with at least one unit.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Submitting requires at least one line.
    #[error("Cart is empty")]
    EmptyCart,

    /// A required customer field was left blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Delivery orders need somewhere to deliver to.
    #[error("Delivery address is required for delivery orders")]
    MissingDeliveryAddress,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
