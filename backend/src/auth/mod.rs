//! Authentication module
//!
//! Opaque bearer tokens stored per user, with argon2 password hashing.

mod middleware;
mod password;
mod token;

pub use middleware::{parse_bearer, TaskOwner};
pub use password::PasswordService;
pub use token::{generate_token_value, TokenCheckError, TokenService, TOKEN_BYTES};
