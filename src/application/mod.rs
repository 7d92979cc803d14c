//! Application layer managing state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! it owns the collection store, the form and alert state, and turns user
//! actions into store calls.

pub mod state;

pub use state::*;
