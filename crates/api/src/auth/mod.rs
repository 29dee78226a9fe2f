//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing with a server-side pepper.
//! - [`jwt`] -- access/refresh JWT pair generation and validation.

pub mod jwt;
pub mod password;
