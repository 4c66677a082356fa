//! # Capone Menu
//!
//! The ordering engine behind the Pizza Capone menu: browse and search the
//! catalog, build a per-session cart from string-priced products, and submit
//! the order.
//!
//! ## Architecture Notes
//!
//! ### 1. Read-only catalog, actor-owned carts
//! The catalog is parsed once into a [`CatalogIndex`](catalog::CatalogIndex)
//! and shared behind an `Arc`. Carts are the only mutable state. They live in
//! a single [`ResourceActor`](framework::ResourceActor) task, one per
//! [`CartId`](model::CartId), and change only through
//! [`CartAction`](cart_actor::CartAction) messages, so concurrent requests
//! from one session are applied in order without locks.
//!
//! ### 2. Prices stay strings until they are used
//! Catalog prices read like `"159 Kč"`. [`pricing::extract_price`] pulls the
//! first run of digits out when a price enters a calculation; totals are
//! integer Kč with saturating arithmetic.
//!
//! ### 3. Context injection
//! The cart actor receives the catalog through `run(context)`, the same way
//! any actor gets its dependencies after construction.
//!
//! ### 4. Type-safe errors
//! Each component has its own `thiserror` enum. Validation errors raised
//! inside the actor reach the caller as [`CartError`](cart_actor::CartError)s.
//!
//! ### 5. Observability
//! `tracing` everywhere with structured fields; see [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! - [`framework`] - the generic entity actor and its test doubles
//! - [`catalog`] - loading, filtering, search highlighting, image fallback
//! - [`pricing`] - price parsing and formatting
//! - [`model`] - catalog document, cart lines, order records
//! - [`cart_actor`] - `ActorEntity` for [`Cart`](model::Cart)
//! - [`clients`] - [`CartClient`](clients::CartClient), including simulated submission
//! - [`view`] - the menu page snapshot
//! - [`newsletter`] - simulated signup
//! - [`lifecycle`] - [`MenuSystem`](lifecycle::MenuSystem), config and tracing setup
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run -- shop.json
//! ```

pub mod cart_actor;
pub mod catalog;
pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod newsletter;
pub mod pricing;
pub mod view;
