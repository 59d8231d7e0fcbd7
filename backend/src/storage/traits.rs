//! # Storage Traits
//!
//! This module defines the storage abstraction trait that allows different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;

use crate::domain::models::product_limit::ProductLimit as DomainProductLimit;

/// Trait defining the interface for product-limit storage operations
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// without modification. All operations are synchronous.
///
/// There is intentionally no delete operation: the screen's delete action
/// only ever asks for confirmation and never removes a record.
pub trait ProductLimitStorage: Send + Sync {
    /// Append a batch of records, preserving their order. Existing records
    /// are never replaced or removed by an append.
    fn append_products(&self, products: &[DomainProductLimit]) -> Result<()>;

    /// List all records in insertion order
    fn list_products(&self) -> Result<Vec<DomainProductLimit>>;

    /// Retrieve a specific record by ID
    fn get_product(&self, product_id: &str) -> Result<Option<DomainProductLimit>>;

    /// Rewrite an existing record in place, matched by ID.
    /// Returns false if no record with that ID exists.
    fn update_product(&self, product: &DomainProductLimit) -> Result<bool>;

    /// Number of stored records
    fn count(&self) -> Result<usize>;
}
