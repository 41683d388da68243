//! Task List Backend Library
//!
//! Multi-user task lists over HTTP: registration and login issue bearer
//! tokens, and each user's tasks are served grouped by priority.
//!
//! This library exposes the backend modules for use in tests and the binary.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
