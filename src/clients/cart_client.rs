//! # Cart Client
//!
//! Session-level API over the cart actor: open a cart, edit it, submit it.
//! Submission is simulated; the order is logged and the cart emptied after a
//! fixed delay that runs on the caller's task, not the actor's.

use crate::cart_actor::{CartAction, CartActionResult, CartError, CartSnapshot};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Cart, CartId, CartLine, Confirmation, OrderDetails, QuickItem, Selection};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    submit_delay: Duration,
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    /// Validation errors raised inside the actor come back as `CartError`s,
    /// not as opaque communication failures.
    fn map_error(e: FrameworkError) -> CartError {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<CartError>() {
                Ok(cart_error) => *cart_error,
                Err(other) => CartError::ActorCommunicationError(other.to_string()),
            },
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>, submit_delay: Duration) -> Self {
        Self {
            inner,
            submit_delay,
        }
    }

    async fn act(&self, id: CartId, action: CartAction) -> Result<CartActionResult, CartError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    /// Opens an empty cart for a new session.
    #[instrument(skip(self))]
    pub async fn open_session(&self) -> Result<CartId, CartError> {
        let id = self.inner.create(()).await.map_err(Self::map_error)?;
        info!(cart = %id, "Session opened");
        Ok(id)
    }

    /// Discards the session's cart.
    #[instrument(skip(self))]
    pub async fn close_session(&self, id: CartId) -> Result<(), CartError> {
        self.delete(id).await
    }

    /// Adds a catalog product. `category` narrows the lookup when the same
    /// name is listed under several categories.
    #[instrument(skip(self, selection))]
    pub async fn add_to_order(
        &self,
        id: CartId,
        category: Option<&str>,
        product: &str,
        selection: Selection,
    ) -> Result<CartLine, CartError> {
        debug!(?selection, "Adding to order");
        let action = CartAction::AddToOrder {
            category: category.map(str::to_string),
            product: product.to_string(),
            selection,
        };
        match self.act(id, action).await? {
            CartActionResult::AddToOrder(line) => Ok(line),
            _ => unreachable!("AddToOrder action must return AddToOrder result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn add_priced(
        &self,
        id: CartId,
        name: &str,
        unit_price: u64,
        quantity: u32,
    ) -> Result<CartLine, CartError> {
        let action = CartAction::AddPriced {
            name: name.to_string(),
            unit_price,
            quantity,
        };
        match self.act(id, action).await? {
            CartActionResult::AddPriced(line) => Ok(line),
            _ => unreachable!("AddPriced action must return AddPriced result"),
        }
    }

    /// One unit of a quick-order item.
    pub async fn add_quick_item(&self, id: CartId, item: &QuickItem) -> Result<CartLine, CartError> {
        self.add_priced(id, &item.name, item.unit_price, 1).await
    }

    /// Returns the new quantity, or `None` if the cart has no such line.
    #[instrument(skip(self))]
    pub async fn increment_line(&self, id: CartId, name: &str) -> Result<Option<u32>, CartError> {
        match self.act(id, CartAction::Increment(name.to_string())).await? {
            CartActionResult::Increment(quantity) => Ok(quantity),
            _ => unreachable!("Increment action must return Increment result"),
        }
    }

    /// Returns the new quantity (0 once the line is gone), or `None` if the
    /// cart has no such line.
    #[instrument(skip(self))]
    pub async fn decrement_line(&self, id: CartId, name: &str) -> Result<Option<u32>, CartError> {
        match self.act(id, CartAction::Decrement(name.to_string())).await? {
            CartActionResult::Decrement(quantity) => Ok(quantity),
            _ => unreachable!("Decrement action must return Decrement result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, id: CartId) -> Result<(), CartError> {
        match self.act(id, CartAction::Clear).await? {
            CartActionResult::Clear(()) => Ok(()),
            _ => unreachable!("Clear action must return Clear result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn snapshot(&self, id: CartId) -> Result<CartSnapshot, CartError> {
        match self.act(id, CartAction::Snapshot).await? {
            CartActionResult::Snapshot(snapshot) => Ok(snapshot),
            _ => unreachable!("Snapshot action must return Snapshot result"),
        }
    }

    pub async fn total(&self, id: CartId) -> Result<u64, CartError> {
        Ok(self.snapshot(id).await?.total)
    }

    /// Submits the session's order.
    ///
    /// Validation runs first and fails fast. A valid order is held for the
    /// submit delay, logged as JSON, and the cart is emptied.
    #[instrument(skip(self, details))]
    pub async fn submit_order(&self, id: CartId, details: OrderDetails) -> Result<Confirmation, CartError> {
        let submission = match self.act(id, CartAction::Checkout(details)).await? {
            CartActionResult::Checkout(submission) => *submission,
            _ => unreachable!("Checkout action must return Checkout result"),
        };

        debug!(reference = %submission.reference, delay_ms = self.submit_delay.as_millis() as u64, "Sending order");
        tokio::time::sleep(self.submit_delay).await;

        match serde_json::to_string(&submission) {
            Ok(order) => info!(
                reference = %submission.reference,
                total = submission.total,
                %order,
                "Order submitted"
            ),
            Err(e) => warn!(reference = %submission.reference, error = %e, "Order submitted, payload not serializable"),
        }

        if let Err(e) = self.clear(id).await {
            warn!(error = %e, "Order submitted but cart could not be cleared");
        }
        Ok(Confirmation::from(&submission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, expect_get, MockClient};
    use crate::model::{CustomerInfo, DeliveryInfo, DeliveryTime, CONFIRMATION_MESSAGE};

    fn details() -> OrderDetails {
        OrderDetails::new(
            CustomerInfo::new("Vito", "777 123 456", "vito@example.com"),
            DeliveryInfo::delivery("Via Roma 1, Praha", DeliveryTime::In30Minutes),
        )
    }

    #[tokio::test]
    async fn test_add_to_order_sends_lookup() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = CartClient::new(client, Duration::ZERO);

        let task = tokio::spawn(async move {
            cart_client
                .add_to_order(CartId(1), Some("Pizza"), "Margherita", Selection::new().size("Ø 30 cm"))
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, CartId(1));
        match action {
            CartAction::AddToOrder {
                category,
                product,
                selection,
            } => {
                assert_eq!(category.as_deref(), Some("Pizza"));
                assert_eq!(product, "Margherita");
                assert_eq!(selection.size.as_deref(), Some("Ø 30 cm"));
            }
            other => panic!("Expected AddToOrder action, got {:?}", other),
        }

        let mut cart = Cart::new(CartId(1));
        let line = cart.add_priced("Margherita (Ø 30 cm)", 159, 1).unwrap();
        responder.send(Ok(CartActionResult::AddToOrder(line))).unwrap();

        let line = task.await.unwrap().unwrap();
        assert_eq!(line.unit_price, 159);
    }

    #[tokio::test]
    async fn test_entity_errors_keep_their_type() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = CartClient::new(client, Duration::from_secs(2));

        let task = tokio::spawn(async move { cart_client.submit_order(CartId(1), details()).await });

        let (_, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert!(matches!(action, CartAction::Checkout(_)));
        responder
            .send(Err(FrameworkError::EntityError(Box::new(CartError::EmptyCart))))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap_err(), CartError::EmptyCart);
    }

    #[tokio::test]
    async fn test_unknown_session_maps_to_not_found() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action(CartId(9))
            .return_err(FrameworkError::NotFound("cart_9".into()));
        let cart_client = CartClient::new(mock.client(), Duration::ZERO);

        let err = cart_client.clear(CartId(9)).await.unwrap_err();
        assert_eq!(err, CartError::NotFound("cart_9".into()));
        mock.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_waits_then_clears() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = CartClient::new(client, Duration::from_millis(2000));

        let mut cart = Cart::new(CartId(1));
        cart.add_priced("Don Capone Supreme", 420, 2).unwrap();
        let submission = cart.checkout(details()).unwrap();

        let started = tokio::time::Instant::now();
        let task = tokio::spawn(async move { cart_client.submit_order(CartId(1), details()).await });

        let (_, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert!(matches!(action, CartAction::Checkout(_)));
        responder
            .send(Ok(CartActionResult::Checkout(Box::new(submission.clone()))))
            .unwrap();

        let (id, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(id, CartId(1));
        assert!(matches!(action, CartAction::Clear));
        assert!(started.elapsed() >= Duration::from_millis(2000));
        responder.send(Ok(CartActionResult::Clear(()))).unwrap();

        let confirmation = task.await.unwrap().unwrap();
        assert_eq!(confirmation.reference, submission.reference);
        assert_eq!(confirmation.total, 840);
        assert_eq!(confirmation.message, CONFIRMATION_MESSAGE);
    }

    #[tokio::test]
    async fn test_open_session_returns_generated_id() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_create().return_ok(CartId(5));
        let cart_client = CartClient::new(mock.client(), Duration::ZERO);

        assert_eq!(cart_client.open_session().await.unwrap(), CartId(5));
        mock.verify();
    }

    #[tokio::test]
    async fn test_close_session_deletes_cart() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_delete(CartId(3)).return_ok(());
        mock.expect_delete(CartId(3))
            .return_err(FrameworkError::NotFound("cart_3".into()));
        let cart_client = CartClient::new(mock.client(), Duration::ZERO);

        cart_client.close_session(CartId(3)).await.unwrap();
        assert_eq!(
            cart_client.close_session(CartId(3)).await.unwrap_err(),
            CartError::NotFound("cart_3".into())
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_get_returns_stored_cart() {
        let mut mock = MockClient::<Cart>::new();
        let mut cart = Cart::new(CartId(2));
        cart.add_priced("Tiramisu", 89, 1).unwrap();
        mock.expect_get(CartId(2)).return_ok(Some(cart));
        mock.expect_get(CartId(4)).return_ok(None);
        let cart_client = CartClient::new(mock.client(), Duration::ZERO);

        let found = cart_client.get(CartId(2)).await.unwrap().unwrap();
        assert_eq!(found.total(), 89);
        assert!(cart_client.get(CartId(4)).await.unwrap().is_none());
        mock.verify();
    }

    #[tokio::test]
    async fn test_get_forwards_id() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = CartClient::new(client, Duration::ZERO);

        let task = tokio::spawn(async move { cart_client.get(CartId(7)).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, CartId(7));
        responder.send(Ok(None)).unwrap();

        assert!(task.await.unwrap().unwrap().is_none());
    }
}
