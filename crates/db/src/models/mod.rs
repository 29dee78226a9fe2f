//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the table row
//! plus the `Create*`/`Update*` inputs its repository accepts.

pub mod design;
pub mod user;
