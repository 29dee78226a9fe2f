//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod design_repo;
pub mod user_repo;

pub use design_repo::DesignRepo;
pub use user_repo::UserRepo;
