//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the menu engine.
//!
//! ## The MenuSystem Pattern
//!
//! [`MenuSystem`] builds the read-only catalog once, then starts the cart
//! actor with that catalog injected as its context:
//!
//! ```rust,ignore
//! let catalog = Arc::new(CatalogIndex::load_or_fallback(&config.catalog_path, &config.placeholder_image));
//! let (cart_actor, cart_resource) = cart_actor::new(config.channel_buffer);
//! let cart_handle = tokio::spawn(cart_actor.run(catalog.clone()));
//! ```
//!
//! The catalog never changes after startup, so the actor only borrows it; the
//! carts are the sole mutable state and live inside the actor task.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the clients** - closes the sender side of the channel
//! 2. **The actor sees `None`** from `recv()` and logs how many carts were open
//! 3. **Await the handle**
//!
//! A submission still sleeping on another task holds a client clone and
//! therefore delays shutdown until it finishes.
//!
//! ## Configuration
//!
//! [`ShopConfig`] collects the catalog location, placeholder image, mailbox
//! size, simulated delays and quick-order items. See [`config`].
//!
//! ## Observability
//!
//! [`setup_tracing`] initializes structured logging; see [`self::tracing`].

pub mod config;
pub mod menu_system;
pub mod tracing;

pub use self::config::*;
pub use self::menu_system::*;
pub use self::tracing::*;
