//! Task List Shared Library
//!
//! Domain models, API request/response types and validation helpers used
//! by the backend and its tests.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::*;
pub use types::*;
