//!
//! Logger of the gateway integration.
//!

pub use tracing::{debug, error, event as log, info, instrument, warn, Level};

pub mod setup;

pub use setup::{setup, SetupError, TelemetryGuard};
