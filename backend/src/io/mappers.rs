use crate::domain::commands::products::{
    BulkSaveResult, ParseRowsResult, ProductListQuery, ProductListResult, StagedRow,
    UpdateProductCodeResult,
};
use crate::domain::models::product_limit::ProductLimit as DomainProductLimit;
use shared::{
    BulkSaveResponse, ImportRowsResponse, ProductLimit as SharedProductLimit, ProductListRequest,
    ProductListResponse, ProductRow, UpdateProductCodeResponse,
};

/// Display format for audit timestamps, e.g. "02/05/2025 11:17"
const UPDATE_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Mapper to convert between shared product DTOs and domain product models.
pub struct ProductMapper;

impl ProductMapper {
    /// Converts a domain product-limit record to a shared DTO.
    pub fn to_dto(domain: DomainProductLimit) -> SharedProductLimit {
        SharedProductLimit {
            id: domain.id,
            product_code: domain.product_code,
            product_name: domain.product_name,
            limit_group: domain.limit_group,
            round_group: domain.round_group,
            update_date: domain.updated_at.format(UPDATE_DATE_FORMAT).to_string(),
            update_by: domain.updated_by,
            has_error: domain.validation_error.is_some(),
            error_message: domain.validation_error,
        }
    }

    /// Converts a shared staging row to its domain counterpart.
    pub fn to_staged_row(dto: ProductRow) -> StagedRow {
        StagedRow {
            id: dto.id,
            product_code: dto.product_code,
            limit_group: dto.limit_group,
            round_group: dto.round_group,
        }
    }

    /// Converts a domain staging row back to the shared DTO.
    pub fn to_row_dto(row: StagedRow) -> ProductRow {
        ProductRow {
            id: row.id,
            product_code: row.product_code,
            limit_group: row.limit_group,
            round_group: row.round_group,
        }
    }

    /// Converts a list request to a domain query. Empty strings and the
    /// legacy "all" sentinel both mean "no filter".
    pub fn to_list_query(request: ProductListRequest) -> ProductListQuery {
        fn group_filter(value: Option<String>) -> Option<String> {
            value.filter(|label| !label.is_empty() && label != "all")
        }

        ProductListQuery {
            search_text: request.search_text.filter(|text| !text.is_empty()),
            limit_group: group_filter(request.limit_group),
            round_group: group_filter(request.round_group),
        }
    }

    pub fn to_list_response(result: ProductListResult) -> ProductListResponse {
        ProductListResponse {
            products: result.products.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_import_response(result: ParseRowsResult) -> ImportRowsResponse {
        let imported_count = result.rows.len();
        ImportRowsResponse {
            rows: result.rows.into_iter().map(Self::to_row_dto).collect(),
            imported_count,
            success_message: format!("Imported {} rows successfully", imported_count),
        }
    }

    pub fn to_bulk_save_response(result: BulkSaveResult) -> BulkSaveResponse {
        BulkSaveResponse {
            saved_count: result.saved_count,
            success_message: format!("Saved {} products successfully", result.saved_count),
        }
    }

    pub fn to_update_response(result: UpdateProductCodeResult) -> UpdateProductCodeResponse {
        let success_message = if result.code_is_valid {
            "Product code updated successfully".to_string()
        } else {
            "Product code updated but still invalid".to_string()
        };
        UpdateProductCodeResponse {
            product: Self::to_dto(result.product),
            code_is_valid: result.code_is_valid,
            success_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_to_dto_formats_timestamp_and_derives_error_flag() {
        let domain = DomainProductLimit {
            id: "product::1::0".to_string(),
            product_code: "12".to_string(),
            product_name: "Product Name Not Found".to_string(),
            limit_group: "group 1 (≤4 units)".to_string(),
            round_group: "no group".to_string(),
            updated_at: Utc.with_ymd_and_hms(2025, 5, 2, 11, 17, 0).unwrap(),
            updated_by: "current_user".to_string(),
            validation_error: Some("Invalid Product Code".to_string()),
        };

        let dto = ProductMapper::to_dto(domain);
        assert_eq!(dto.update_date, "02/05/2025 11:17");
        assert!(dto.has_error);
        assert_eq!(dto.error_message.as_deref(), Some("Invalid Product Code"));
    }

    #[test]
    fn test_to_dto_clean_record_has_no_error_fields() {
        let domain = DomainProductLimit {
            id: "product::1::0".to_string(),
            product_code: "1234567".to_string(),
            product_name: "Product 1234567".to_string(),
            limit_group: "group 1 (≤4 units)".to_string(),
            round_group: "group 2 (≤24 units)".to_string(),
            updated_at: Utc.with_ymd_and_hms(2025, 5, 1, 16, 45, 0).unwrap(),
            updated_by: "admin1".to_string(),
            validation_error: None,
        };

        let dto = ProductMapper::to_dto(domain);
        assert!(!dto.has_error);
        assert!(dto.error_message.is_none());
    }

    #[test]
    fn test_to_list_query_drops_sentinels() {
        let query = ProductMapper::to_list_query(ProductListRequest {
            search_text: Some(String::new()),
            limit_group: Some("all".to_string()),
            round_group: Some("no group".to_string()),
        });

        assert!(query.search_text.is_none());
        assert!(query.limit_group.is_none());
        assert_eq!(query.round_group.as_deref(), Some("no group"));
    }
}
