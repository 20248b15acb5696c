//! Database layer - connection pool, schema, and repositories
//!
//! # Design Principles
//!
//! - Connection pool with scoped acquisition - no per-call open/close
//! - One statement per data-access operation
//! - Referential integrity declared in the schema, violations surface as `DbError::Conflict`
//! - Transactions only for the multi-statement bootstrap routines

pub mod migrations;
pub mod pool;
pub mod repos;
pub mod seed;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
