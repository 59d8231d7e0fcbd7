//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The [`crate::Backend`] facade is responsible
//! for mapping the public DTOs defined in the `shared` crate to these
//! internal types.

pub mod products {
    use crate::domain::models::product_limit::ProductLimit as DomainProductLimit;

    /// One staged bulk-entry row as captured by the import dialog.
    /// Unvalidated: group labels are accepted verbatim at this stage.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct StagedRow {
        pub id: String,
        pub product_code: String,
        pub limit_group: String,
        pub round_group: String,
    }

    /// Input for parsing pasted delimited text into staged rows.
    #[derive(Debug, Clone)]
    pub struct ParseTextCommand {
        pub text: String,
    }

    /// Input for decoding an uploaded spreadsheet into staged rows.
    #[derive(Debug, Clone)]
    pub struct ParseSpreadsheetCommand {
        pub bytes: Vec<u8>,
    }

    /// Result of either import parser. The rows replace the current staging
    /// set wholesale.
    #[derive(Debug, Clone)]
    pub struct ParseRowsResult {
        pub rows: Vec<StagedRow>,
    }

    /// Input for saving staged rows as product-limit records.
    #[derive(Debug, Clone)]
    pub struct BulkSaveCommand {
        pub rows: Vec<StagedRow>,
    }

    /// Result of a bulk save.
    #[derive(Debug, Clone)]
    pub struct BulkSaveResult {
        pub products: Vec<DomainProductLimit>,
        pub saved_count: usize,
    }

    /// Query parameters for listing product-limit records. `None` means the
    /// predicate matches everything.
    #[derive(Debug, Clone, Default)]
    pub struct ProductListQuery {
        pub search_text: Option<String>,
        pub limit_group: Option<String>,
        pub round_group: Option<String>,
    }

    /// Result of listing product-limit records.
    #[derive(Debug, Clone)]
    pub struct ProductListResult {
        pub products: Vec<DomainProductLimit>,
    }

    /// Input for correcting the product code on a single record.
    #[derive(Debug, Clone)]
    pub struct UpdateProductCodeCommand {
        pub product_id: String,
        pub new_product_code: String,
    }

    /// Result of a single-record code correction.
    #[derive(Debug, Clone)]
    pub struct UpdateProductCodeResult {
        pub product: DomainProductLimit,
        pub code_is_valid: bool,
    }
}
