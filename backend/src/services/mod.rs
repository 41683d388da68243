//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the token service.

pub mod task;
pub mod user;

pub use task::TaskService;
pub use user::UserService;
