use anyhow::Result;
use log::debug;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::models::product_limit::ProductLimit as DomainProductLimit;
use crate::storage::traits::ProductLimitStorage;

/// In-memory product-limit repository.
///
/// The single owned record list for the screen; every mutation funnels
/// through this store, so a bulk save can only ever grow the list.
#[derive(Clone, Default)]
pub struct ProductLimitRepository {
    products: Arc<RwLock<Vec<DomainProductLimit>>>,
}

impl ProductLimitRepository {
    /// Create a new, empty in-memory repository
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<DomainProductLimit>>> {
        self.products
            .read()
            .map_err(|_| anyhow::anyhow!("Product store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<DomainProductLimit>>> {
        self.products
            .write()
            .map_err(|_| anyhow::anyhow!("Product store lock poisoned"))
    }
}

impl ProductLimitStorage for ProductLimitRepository {
    fn append_products(&self, products: &[DomainProductLimit]) -> Result<()> {
        let mut store = self.write()?;
        store.extend_from_slice(products);
        debug!(
            "Appended {} records ({} total)",
            products.len(),
            store.len()
        );
        Ok(())
    }

    fn list_products(&self) -> Result<Vec<DomainProductLimit>> {
        Ok(self.read()?.clone())
    }

    fn get_product(&self, product_id: &str) -> Result<Option<DomainProductLimit>> {
        Ok(self
            .read()?
            .iter()
            .find(|product| product.id == product_id)
            .cloned())
    }

    fn update_product(&self, product: &DomainProductLimit) -> Result<bool> {
        let mut store = self.write()?;
        match store.iter_mut().find(|stored| stored.id == product.id) {
            Some(stored) => {
                *stored = product.clone();
                Ok(true)
            }
            None => {
                debug!("No record to update with ID {}", product.id);
                Ok(false)
            }
        }
    }

    fn count(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: &str, code: &str) -> DomainProductLimit {
        DomainProductLimit {
            id: id.to_string(),
            product_code: code.to_string(),
            product_name: format!("Product {}", code),
            limit_group: "group 1 (≤4 units)".to_string(),
            round_group: "group 2 (≤24 units)".to_string(),
            updated_at: Utc::now(),
            updated_by: "admin1".to_string(),
            validation_error: None,
        }
    }

    #[test]
    fn test_append_and_list_preserves_order() {
        let repository = ProductLimitRepository::new();

        repository
            .append_products(&[product("product::1::0", "1234567")])
            .unwrap();
        repository
            .append_products(&[
                product("product::2::0", "7654321"),
                product("product::2::1", "1111111"),
            ])
            .unwrap();

        let products = repository.list_products().unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].product_code, "1234567");
        assert_eq!(products[1].product_code, "7654321");
        assert_eq!(products[2].product_code, "1111111");
        assert_eq!(repository.count().unwrap(), 3);
    }

    #[test]
    fn test_get_product() {
        let repository = ProductLimitRepository::new();
        repository
            .append_products(&[product("product::1::0", "1234567")])
            .unwrap();

        let found = repository.get_product("product::1::0").unwrap();
        assert_eq!(found.unwrap().product_code, "1234567");

        assert!(repository.get_product("product::9::9").unwrap().is_none());
    }

    #[test]
    fn test_update_product_in_place() {
        let repository = ProductLimitRepository::new();
        repository
            .append_products(&[
                product("product::1::0", "1234567"),
                product("product::1::1", "7654321"),
            ])
            .unwrap();

        let mut updated = product("product::1::0", "9999999");
        updated.validation_error = Some("Invalid Product Code".to_string());
        assert!(repository.update_product(&updated).unwrap());

        let products = repository.list_products().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product_code, "9999999");
        assert!(products[0].validation_error.is_some());
        assert_eq!(products[1].product_code, "7654321");
    }

    #[test]
    fn test_update_unknown_product_reports_not_found() {
        let repository = ProductLimitRepository::new();

        assert!(!repository
            .update_product(&product("product::9::9", "1234567"))
            .unwrap());
        assert_eq!(repository.count().unwrap(), 0);
    }

    #[test]
    fn test_clones_share_the_same_store() {
        let repository = ProductLimitRepository::new();
        let handle = repository.clone();

        repository
            .append_products(&[product("product::1::0", "1234567")])
            .unwrap();

        assert_eq!(handle.count().unwrap(), 1);
    }
}
