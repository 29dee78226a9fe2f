//! Well-known role name constants.
//!
//! These must match the `role` check constraint on the `users` table.

pub const ROLE_NORMAL: &str = "normal";
pub const ROLE_ADMIN: &str = "admin";
