//! # Backend for the Product Order-Limit Screen
//!
//! This crate provides direct, synchronous access to the domain services
//! and in-memory storage behind the product order-limit administration
//! screen:
//! - bulk-import parsing (pasted delimited text and spreadsheet upload)
//!   into staging rows
//! - product-code validation and display-name resolution
//! - the product-limit record list with filtering, bulk save and
//!   single-record code correction
//!
//! There is no networking or persistence layer. The [`Backend`] facade is
//! the process-local API a UI drives, speaking the DTO types from the
//! `shared` crate.

use anyhow::Result;
use log::info;

pub mod domain;
pub mod io;
pub mod storage;

pub use domain::ImportError;
pub use storage::memory::ProductLimitRepository;

use io::mappers::ProductMapper;

/// Main backend struct that orchestrates all services
pub struct Backend {
    pub product_service: domain::ProductLimitService,
    pub import_service: domain::BulkImportService,
}

impl Backend {
    /// Create a backend over an empty in-memory product list.
    pub fn new() -> Self {
        let repository = ProductLimitRepository::new();
        let product_service = domain::ProductLimitService::new(repository);
        let import_service = domain::BulkImportService::new();

        Backend {
            product_service,
            import_service,
        }
    }

    /// Create a backend pre-loaded with the demo records the screen ships
    /// with.
    pub fn with_demo_data() -> Result<Self> {
        let backend = Self::new();
        backend.product_service.seed_demo_data()?;
        Ok(backend)
    }

    /// List the visible subset of product-limit records.
    pub fn list_products(
        &self,
        request: shared::ProductListRequest,
    ) -> Result<shared::ProductListResponse> {
        let query = ProductMapper::to_list_query(request);
        let result = self.product_service.list_products(query)?;
        Ok(ProductMapper::to_list_response(result))
    }

    /// Parse pasted delimited text into staging rows. The returned rows
    /// replace the dialog's staging set wholesale.
    pub fn parse_bulk_text(
        &self,
        request: shared::ParseTextRequest,
    ) -> Result<shared::ImportRowsResponse, ImportError> {
        let result = self
            .import_service
            .parse_text(domain::commands::products::ParseTextCommand { text: request.text })?;
        Ok(ProductMapper::to_import_response(result))
    }

    /// Decode an uploaded spreadsheet into staging rows.
    pub fn import_spreadsheet(
        &self,
        request: shared::ImportSpreadsheetRequest,
    ) -> Result<shared::ImportRowsResponse, ImportError> {
        info!("Importing spreadsheet: {}", request.file_name);
        let result = self.import_service.parse_spreadsheet(
            domain::commands::products::ParseSpreadsheetCommand {
                bytes: request.data,
            },
        )?;
        Ok(ProductMapper::to_import_response(result))
    }

    /// Save the staged rows as product-limit records, appending to the
    /// existing list.
    pub fn bulk_save(&self, request: shared::BulkSaveRequest) -> Result<shared::BulkSaveResponse> {
        let command = domain::commands::products::BulkSaveCommand {
            rows: request
                .rows
                .into_iter()
                .map(ProductMapper::to_staged_row)
                .collect(),
        };
        let result = self.product_service.bulk_save(command)?;
        Ok(ProductMapper::to_bulk_save_response(result))
    }

    /// Correct the product code on a single record.
    pub fn update_product_code(
        &self,
        request: shared::UpdateProductCodeRequest,
    ) -> Result<shared::UpdateProductCodeResponse> {
        let command = domain::commands::products::UpdateProductCodeCommand {
            product_id: request.product_id,
            new_product_code: request.new_product_code,
        };
        let result = self.product_service.update_product_code(command)?;
        Ok(ProductMapper::to_update_response(result))
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::new()
    }
}
