pub mod auth;
pub mod design;
pub mod generator;
pub mod user;
