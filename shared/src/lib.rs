use serde::{Deserialize, Serialize};
use std::fmt;

/// Product-limit record ID in format: "product::<epoch_millis>::<seq>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLimit {
    pub id: String,
    /// Business key entered by the user; not guaranteed unique or valid
    pub product_code: String,
    /// Display name resolved from the code, or the not-found placeholder
    pub product_name: String,
    /// Per-order limit group label
    pub limit_group: String,
    /// Per-delivery-round limit group label
    pub round_group: String,
    /// Formatted audit timestamp, e.g. "02/05/2025 11:17"
    pub update_date: String,
    /// Actor that last wrote this record
    pub update_by: String,
    /// True iff the product code failed validation
    #[serde(default)]
    pub has_error: bool,
    /// Validation message, present iff `has_error`
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Bulk-entry staging row. Lives only while the import dialog is open and is
/// replaced wholesale by each parse, so its ID only needs to be unique
/// within one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: String,
    pub product_code: String,
    pub limit_group: String,
    pub round_group: String,
}

/// Query parameters for the product list. `None` means "no filter"; the
/// UI's "all" selection maps to `None` rather than a sentinel string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductListRequest {
    /// Case-insensitive substring match against code or name
    pub search_text: Option<String>,
    /// Exact limit-group label to match
    pub limit_group: Option<String>,
    /// Exact round-group label to match
    pub round_group: Option<String>,
}

/// Response containing the visible subset of product-limit records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductLimit>,
}

/// Request to parse pasted delimited text into staging rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
}

/// Request to decode an uploaded spreadsheet into staging rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSpreadsheetRequest {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Response after either import parser produced staging rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRowsResponse {
    pub rows: Vec<ProductRow>,
    pub imported_count: usize,
    pub success_message: String,
}

/// Request to save the staged rows as product-limit records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkSaveRequest {
    pub rows: Vec<ProductRow>,
}

/// Response after a bulk save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkSaveResponse {
    pub saved_count: usize,
    pub success_message: String,
}

/// Request to correct the product code on a single record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProductCodeRequest {
    pub product_id: String,
    pub new_product_code: String,
}

/// Response after a single-record code correction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProductCodeResponse {
    pub product: ProductLimit,
    pub code_is_valid: bool,
    pub success_message: String,
}

/// The closed set of per-order limit group labels, in display order
pub const LIMIT_GROUP_LABELS: [&str; 4] = [
    "group 1 (≤4 units)",
    "group 2 (≤24 units)",
    "group 3 (≤48 units)",
    "no group",
];

/// The closed set of per-round limit group labels, in display order.
/// Deliberately smaller than the limit set: there is no round tier below 24.
pub const ROUND_GROUP_LABELS: [&str; 3] = [
    "group 2 (≤24 units)",
    "group 3 (≤48 units)",
    "no group",
];

impl ProductLimit {
    /// Generate a record ID from a timestamp and a batch sequence number.
    /// The sequence keeps IDs distinct when a bulk save lands many records
    /// in the same millisecond.
    pub fn generate_id(epoch_millis: u64, seq: usize) -> String {
        format!("product::{}::{}", epoch_millis, seq)
    }

    /// Parse a record ID into its timestamp and sequence components
    pub fn parse_id(id: &str) -> Result<(u64, usize), ProductIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 3 || parts[0] != "product" {
            return Err(ProductIdError::InvalidFormat);
        }

        let epoch_millis = parts[1]
            .parse::<u64>()
            .map_err(|_| ProductIdError::InvalidTimestamp)?;
        let seq = parts[2]
            .parse::<usize>()
            .map_err(|_| ProductIdError::InvalidSequence)?;

        Ok((epoch_millis, seq))
    }

    /// Extract the epoch timestamp from this record's ID for sorting
    pub fn extract_timestamp(&self) -> Result<u64, ProductIdError> {
        Self::parse_id(&self.id).map(|(timestamp, _)| timestamp)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductIdError {
    InvalidFormat,
    InvalidTimestamp,
    InvalidSequence,
}

impl fmt::Display for ProductIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductIdError::InvalidFormat => write!(f, "Invalid product record ID format"),
            ProductIdError::InvalidTimestamp => write!(f, "Invalid timestamp in product record ID"),
            ProductIdError::InvalidSequence => write!(f, "Invalid sequence in product record ID"),
        }
    }
}

impl std::error::Error for ProductIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_product_id() {
        let id = ProductLimit::generate_id(1702516122000, 0);
        assert_eq!(id, "product::1702516122000::0");

        let id = ProductLimit::generate_id(1702516122000, 41);
        assert_eq!(id, "product::1702516122000::41");
    }

    #[test]
    fn test_parse_product_id() {
        // Valid ID
        let (timestamp, seq) = ProductLimit::parse_id("product::1702516122000::3").unwrap();
        assert_eq!(timestamp, 1702516122000);
        assert_eq!(seq, 3);

        // Invalid format
        assert!(ProductLimit::parse_id("invalid::format").is_err());
        assert!(ProductLimit::parse_id("product::1702516122000").is_err());
        assert!(ProductLimit::parse_id("not_product::123::0").is_err());

        // Invalid components
        assert!(ProductLimit::parse_id("product::not_a_number::0").is_err());
        assert!(ProductLimit::parse_id("product::123::not_a_number").is_err());
    }

    #[test]
    fn test_extract_timestamp() {
        let product = ProductLimit {
            id: "product::1702516122000::0".to_string(),
            product_code: "1234567".to_string(),
            product_name: "Product 1234567".to_string(),
            limit_group: LIMIT_GROUP_LABELS[0].to_string(),
            round_group: ROUND_GROUP_LABELS[0].to_string(),
            update_date: "02/05/2025 11:17".to_string(),
            update_by: "admin1".to_string(),
            has_error: false,
            error_message: None,
        };

        assert_eq!(product.extract_timestamp().unwrap(), 1702516122000);
    }

    #[test]
    fn test_product_limit_serde_round_trip() {
        let product = ProductLimit {
            id: "product::1702516122000::1".to_string(),
            product_code: "12".to_string(),
            product_name: "Product Name Not Found".to_string(),
            limit_group: "group 1 (≤4 units)".to_string(),
            round_group: "no group".to_string(),
            update_date: "02/05/2025 11:17".to_string(),
            update_by: "current_user".to_string(),
            has_error: true,
            error_message: Some("Invalid Product Code".to_string()),
        };

        let json = serde_json::to_string(&product).unwrap();
        let back: ProductLimit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
        assert_eq!(back.has_error, back.error_message.is_some());
    }

    #[test]
    fn test_product_limit_error_fields_default() {
        // Records written before the error flag existed omit both fields
        let json = r#"{
            "id": "product::1702516122000::0",
            "product_code": "1234567",
            "product_name": "Product 1234567",
            "limit_group": "group 1 (≤4 units)",
            "round_group": "group 2 (≤24 units)",
            "update_date": "02/05/2025 11:17",
            "update_by": "admin1"
        }"#;

        let product: ProductLimit = serde_json::from_str(json).unwrap();
        assert!(!product.has_error);
        assert!(product.error_message.is_none());
    }

    #[test]
    fn test_group_label_sets() {
        assert_eq!(LIMIT_GROUP_LABELS.len(), 4);
        assert_eq!(ROUND_GROUP_LABELS.len(), 3);

        // Every round label is also a limit label; only the first limit
        // tier has no round counterpart
        for label in ROUND_GROUP_LABELS {
            assert!(LIMIT_GROUP_LABELS.contains(&label));
        }
        assert!(!ROUND_GROUP_LABELS.contains(&LIMIT_GROUP_LABELS[0]));
    }
}
