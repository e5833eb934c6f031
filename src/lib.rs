//! User Registry Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod persistence;
pub mod security;
pub mod store;
pub mod validation;
pub mod workflow;

pub use config::{Config, DuplicatePolicy};
pub use error::{AppError, Result};
pub use models::{User, UserRecord};
pub use store::UserStore;
pub use validation::{PhoneRule, Rules, ValidationError};
