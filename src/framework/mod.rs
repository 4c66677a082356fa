//! Generic entity actor used to hold per-session state.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait a resource implements to be managed by an actor
//! - [`ResourceActor`] - The task owning every instance of one resource type
//! - [`ResourceClient`] - Typed, cloneable handle used to send requests
//! - [`FrameworkError`] - Transport and lookup errors
//!
//! # Testing
//!
//! See [`mock`] for clients that answer from scripted expectations.

pub mod core;
pub mod mock;

pub use self::core::*;
