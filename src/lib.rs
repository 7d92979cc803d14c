//! albumlist - Terminal Album List
//!
//! Keep a personal list of albums: enter them through a form, reject
//! duplicate IDs, and persist the list as JSON between sessions.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
