//! # Runtime
//!
//! Startup wiring and shutdown signal handling.

pub mod initialization;
pub mod shutdown;

pub use initialization::{initialize, InitializationResult, StartupOverrides};
pub use shutdown::shutdown_signal;
