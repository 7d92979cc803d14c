pub mod models;
pub mod services;
pub mod errors;
pub mod storage;
pub mod view;

pub use models::*;
pub use services::*;
pub use errors::*;
pub use storage::*;
pub use view::*;
