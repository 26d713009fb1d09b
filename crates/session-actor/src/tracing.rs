//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate for the whole
//! process. Verbosity comes from the `RUST_LOG` environment variable:
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle and navigation
//! RUST_LOG=debug cargo run     # every applied mutation with its revision
//! RUST_LOG=bakery_miniapp::api=debug cargo run
//! ```
//!
//! The state actor logs under its state type name (`state_type="AppState"`), so module
//! paths are hidden (`with_target(false)`) to keep lines short.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
