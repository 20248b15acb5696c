//! Route handlers organized by resource

pub mod common;
pub mod index;
pub mod health;
pub mod students;
pub mod instructors;
pub mod courses;
