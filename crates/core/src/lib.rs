//! Domain core for the pdfgen service.
//!
//! Everything here is free of HTTP and SQL concerns so the API crate, the
//! repository layer and tests can share one set of rules for designs,
//! templates, pagination and PDF rendering.

pub mod accounts;
pub mod design;
pub mod error;
pub mod fields;
pub mod generator;
pub mod minify;
pub mod pagination;
pub mod pdf;
pub mod roles;
pub mod template;
pub mod types;
