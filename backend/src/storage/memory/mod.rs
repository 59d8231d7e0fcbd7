//! In-memory storage backend.
//!
//! The product list lives for the process lifetime only; there is no
//! persistence layer behind this screen.

pub mod product_repository;

pub use product_repository::ProductLimitRepository;
