//! Domain layer for the filmoteca backend.
//!
//! This crate is pure: no I/O, no store types. It holds the error
//! taxonomy, the movie/user domain types with their validation rules,
//! and the listing filter builder. Both the database and API crates
//! depend on it; it depends on neither.

pub mod error;
pub mod filter;
pub mod movie;
pub mod types;
pub mod user;
