//! roster-server: academic records over HTTP
//!
//! Students, instructors, courses, and the enrollments (with grades) that
//! link students to courses, stored in SQLite and served as JSON pages and
//! form endpoints.

pub mod db;
pub mod http;
pub mod models;

#[cfg(test)]
mod test_support;

pub use db::{create_pool, DbError};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
