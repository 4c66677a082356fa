//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter whose
//! level comes from `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run      # sessions, submissions, actor lifecycle
//! RUST_LOG=debug cargo run     # every action with its payload
//! RUST_LOG=capone_menu::framework=debug cargo run
//! ```
//!
//! Cart ids travel as structured fields, so one session can be followed
//! through the interleaved output:
//!
//! ```text
//! INFO Actor started entity_type="Cart"
//! INFO Created entity_type="Cart" id=cart_1 size=1
//! INFO open_session: Session opened cart=cart_1
//! DEBUG Action entity_type="Cart" id=cart_1 action=AddPriced { name: "Don Capone Supreme", unit_price: 420, quantity: 1 }
//! INFO submit_order{id=CartId(1)}: Order submitted reference=5f0c... total=840 order={...}
//! ```
//!
//! Catalog and config fallbacks are logged at `warn`.

/// Initializes the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type and cart fields already say where a line came from
        .compact()
        .init();
}
