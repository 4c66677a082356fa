//! # ActorClient Trait
//!
//! Shared surface for typed clients: each one wraps a [`ResourceClient`] and
//! gets `get` and `delete` for free once it says how framework errors map
//! into its own error type.

use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Implemented by resource-specific clients such as
/// [`CartClient`](crate::clients::CartClient).
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Cart> for CartClient {
///     type Error = CartError;
///
///     fn inner(&self) -> &ResourceClient<Cart> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> CartError {
///         CartError::ActorCommunicationError(e.to_string())
///     }
/// }
///
/// // get() and delete() come with the trait.
/// let cart = cart_client.get(CartId(1)).await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    fn inner(&self) -> &ResourceClient<T>;

    /// Translates transport and entity failures into `Self::Error`.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
