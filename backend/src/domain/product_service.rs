use anyhow::Result;
use chrono::{TimeZone, Utc};
use log::{debug, info, warn};

use crate::domain::commands::products::{
    BulkSaveCommand, BulkSaveResult, ProductListQuery, ProductListResult,
    UpdateProductCodeCommand, UpdateProductCodeResult,
};
use crate::domain::models::product_limit::{LimitGroup, ProductLimit, RoundGroup};
use crate::domain::product_catalog::{ProductCatalog, NAME_NOT_FOUND};
use crate::storage::memory::ProductLimitRepository;
use crate::storage::traits::ProductLimitStorage;

/// Actor recorded on interactively written records until real auth exists
pub const CURRENT_ACTOR: &str = "current_user";

/// Service for managing product-limit records.
#[derive(Clone)]
pub struct ProductLimitService {
    product_repository: ProductLimitRepository,
    catalog: ProductCatalog,
}

impl ProductLimitService {
    /// Create a new ProductLimitService over the given repository
    pub fn new(product_repository: ProductLimitRepository) -> Self {
        Self {
            product_repository,
            catalog: ProductCatalog::new(),
        }
    }

    /// List product-limit records matching the given filters, in insertion
    /// order.
    pub fn list_products(&self, query: ProductListQuery) -> Result<ProductListResult> {
        debug!(
            "Listing products: search={:?}, limit_group={:?}, round_group={:?}",
            query.search_text, query.limit_group, query.round_group
        );

        let products = self.product_repository.list_products()?;
        let total = products.len();

        let products: Vec<ProductLimit> = products
            .into_iter()
            .filter(|product| Self::matches_query(product, &query))
            .collect();

        debug!("Matched {} of {} product-limit records", products.len(), total);

        Ok(ProductListResult { products })
    }

    /// All three predicates must hold: case-insensitive substring match of
    /// the search text against code or name, plus exact equality on each
    /// selected group label. An absent or empty filter value matches
    /// everything.
    fn matches_query(product: &ProductLimit, query: &ProductListQuery) -> bool {
        let matches_search = match query.search_text.as_deref() {
            None | Some("") => true,
            Some(text) => {
                let needle = text.to_lowercase();
                product.product_code.to_lowercase().contains(&needle)
                    || product.product_name.to_lowercase().contains(&needle)
            }
        };

        let matches_limit_group = match query.limit_group.as_deref() {
            None | Some("") => true,
            Some(label) => product.limit_group == label,
        };

        let matches_round_group = match query.round_group.as_deref() {
            None | Some("") => true,
            Some(label) => product.round_group == label,
        };

        matches_search && matches_limit_group && matches_round_group
    }

    /// Save staged rows as product-limit records.
    ///
    /// Rows with any empty field are dropped; if none survive, nothing is
    /// saved and an error is reported. Surviving rows are always appended:
    /// a record with an invalid code is saved flagged rather than rejected,
    /// to be corrected later through the single-record edit path.
    pub fn bulk_save(&self, command: BulkSaveCommand) -> Result<BulkSaveResult> {
        info!("Bulk saving {} staged rows", command.rows.len());

        let complete_rows: Vec<_> = command
            .rows
            .into_iter()
            .filter(|row| {
                !row.product_code.is_empty()
                    && !row.limit_group.is_empty()
                    && !row.round_group.is_empty()
            })
            .collect();

        if complete_rows.is_empty() {
            return Err(anyhow::anyhow!("No complete rows to save"));
        }

        let now = Utc::now();
        let mut products = Vec::with_capacity(complete_rows.len());
        for (seq, row) in complete_rows.into_iter().enumerate() {
            let validation_error = self.catalog.validate(&row.product_code);
            if validation_error.is_some() {
                warn!("Saving product with invalid code: {}", row.product_code);
            }
            products.push(ProductLimit {
                id: ProductLimit::generate_id(now.timestamp_millis() as u64, seq),
                product_name: self.catalog.resolve_name(&row.product_code),
                product_code: row.product_code,
                limit_group: row.limit_group,
                round_group: row.round_group,
                updated_at: now,
                updated_by: CURRENT_ACTOR.to_string(),
                validation_error,
            });
        }

        self.product_repository.append_products(&products)?;
        let saved_count = products.len();
        info!("Saved {} product-limit records", saved_count);

        Ok(BulkSaveResult {
            products,
            saved_count,
        })
    }

    /// Correct the product code on a single record, re-running validation
    /// and rewriting the derived fields in place.
    pub fn update_product_code(
        &self,
        command: UpdateProductCodeCommand,
    ) -> Result<UpdateProductCodeResult> {
        info!("Updating product code on record {}", command.product_id);

        if command.new_product_code.trim().is_empty() {
            return Err(anyhow::anyhow!("Product code cannot be empty"));
        }

        let mut product = self
            .product_repository
            .get_product(&command.product_id)?
            .ok_or_else(|| anyhow::anyhow!("Product not found: {}", command.product_id))?;

        product.validation_error = self.catalog.validate(&command.new_product_code);
        product.product_name = self.catalog.resolve_name(&command.new_product_code);
        product.product_code = command.new_product_code;
        product.updated_at = Utc::now();
        product.updated_by = CURRENT_ACTOR.to_string();

        if !self.product_repository.update_product(&product)? {
            return Err(anyhow::anyhow!("Product not found: {}", command.product_id));
        }

        let code_is_valid = !product.has_error();
        if code_is_valid {
            info!("Product code on record {} is now valid", product.id);
        } else {
            warn!(
                "Product code on record {} updated but still invalid: {}",
                product.id, product.product_code
            );
        }

        Ok(UpdateProductCodeResult {
            product,
            code_is_valid,
        })
    }

    /// Load the demo records the screen ships with. One record carries an
    /// intentionally invalid code so the correction flow has something to
    /// operate on.
    pub fn seed_demo_data(&self) -> Result<usize> {
        let seeds = vec![
            ProductLimit {
                id: ProductLimit::generate_id(
                    Utc.with_ymd_and_hms(2025, 5, 2, 11, 17, 0)
                        .unwrap()
                        .timestamp_millis() as u64,
                    0,
                ),
                product_code: "1234567".to_string(),
                product_name: "UHT Milk Plain 1000ml".to_string(),
                limit_group: LimitGroup::Group1.label().to_string(),
                round_group: RoundGroup::Group2.label().to_string(),
                updated_at: Utc.with_ymd_and_hms(2025, 5, 2, 11, 17, 0).unwrap(),
                updated_by: "admin1".to_string(),
                validation_error: None,
            },
            ProductLimit {
                id: ProductLimit::generate_id(
                    Utc.with_ymd_and_hms(2025, 5, 2, 10, 30, 0)
                        .unwrap()
                        .timestamp_millis() as u64,
                    1,
                ),
                product_code: "INVALID001".to_string(),
                product_name: NAME_NOT_FOUND.to_string(),
                limit_group: LimitGroup::Group2.label().to_string(),
                round_group: RoundGroup::Group3.label().to_string(),
                updated_at: Utc.with_ymd_and_hms(2025, 5, 2, 10, 30, 0).unwrap(),
                updated_by: "admin2".to_string(),
                validation_error: self.catalog.validate("INVALID001"),
            },
            ProductLimit {
                id: ProductLimit::generate_id(
                    Utc.with_ymd_and_hms(2025, 5, 1, 16, 45, 0)
                        .unwrap()
                        .timestamp_millis() as u64,
                    2,
                ),
                product_code: "1234569".to_string(),
                product_name: "UHT Milk Strawberry 1000ml".to_string(),
                limit_group: LimitGroup::Group3.label().to_string(),
                round_group: RoundGroup::Ungrouped.label().to_string(),
                updated_at: Utc.with_ymd_and_hms(2025, 5, 1, 16, 45, 0).unwrap(),
                updated_by: "admin1".to_string(),
                validation_error: None,
            },
        ];

        let seeded = seeds.len();
        self.product_repository.append_products(&seeds)?;
        info!("Seeded {} demo product-limit records", seeded);
        Ok(seeded)
    }
}
