//! Infrastructure layer providing external service integrations.
//!
//! Storage adapters, command-line configuration and file logging.

pub mod config;
pub mod logging;
pub mod persistence;

pub use config::*;
pub use logging::*;
pub use persistence::*;
