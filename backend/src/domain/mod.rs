//! Domain layer: models, commands and services.

pub mod commands;
pub mod import_service;
pub mod models;
pub mod product_catalog;
pub mod product_service;

pub use import_service::{BulkImportService, ImportError};
pub use product_catalog::ProductCatalog;
pub use product_service::ProductLimitService;
