//! # Tracing Setup
//!
//! Every actor logs through `tracing` with an `entity_type` field, so log lines stay short
//! while still saying which store they came from:
//!
//! ```text
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO Action ok entity_type="FoodTracker" id=tracker_3
//! ```
//!
//! The level is controlled by `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run                       # lifecycle and transitions
//! RUST_LOG=debug cargo run                      # full payloads and sweep summaries
//! RUST_LOG=stall_tracker::driver=debug cargo run
//! ```

/// Installs the global subscriber. Call once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type already says where a line came from
        .compact()
        .init();
}
