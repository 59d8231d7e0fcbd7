use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain model representing one product's order-limit rule assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLimit {
    pub id: String,
    pub product_code: String,
    pub product_name: String,
    pub limit_group: String,
    pub round_group: String,
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
    /// Present iff `product_code` failed validation at write time
    pub validation_error: Option<String>,
}

impl ProductLimit {
    /// Generate a unique ID for a product-limit record. The sequence number
    /// keeps IDs distinct within a same-millisecond bulk save.
    pub fn generate_id(timestamp_millis: u64, seq: usize) -> String {
        format!("product::{}::{}", timestamp_millis, seq)
    }

    pub fn has_error(&self) -> bool {
        self.validation_error.is_some()
    }
}

/// Per-order limit buckets. Thresholds are inclusive upper bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitGroup {
    /// Up to 4 units per order (amounts of 3 or less)
    Group1,
    /// Up to 24 units per order
    Group2,
    /// Up to 48 units per order
    Group3,
    /// No limit group assigned
    Ungrouped,
}

impl LimitGroup {
    /// Bucket a per-order quantity into its limit group.
    pub fn classify(amount: f64) -> Self {
        if amount <= 3.0 {
            LimitGroup::Group1
        } else if amount <= 24.0 {
            LimitGroup::Group2
        } else if amount <= 48.0 {
            LimitGroup::Group3
        } else {
            LimitGroup::Ungrouped
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LimitGroup::Group1 => "group 1 (≤4 units)",
            LimitGroup::Group2 => "group 2 (≤24 units)",
            LimitGroup::Group3 => "group 3 (≤48 units)",
            LimitGroup::Ungrouped => "no group",
        }
    }
}

impl fmt::Display for LimitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-delivery-round limit buckets. There is no round tier below 24, so
/// amounts that would land in limit group 1 fall straight to `Ungrouped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundGroup {
    /// Up to 24 units per round
    Group2,
    /// Up to 48 units per round
    Group3,
    /// No round group assigned
    Ungrouped,
}

impl RoundGroup {
    /// Bucket a per-round quantity into its round group.
    pub fn classify(amount: f64) -> Self {
        if amount <= 3.0 {
            RoundGroup::Ungrouped
        } else if amount <= 24.0 {
            RoundGroup::Group2
        } else if amount <= 48.0 {
            RoundGroup::Group3
        } else {
            RoundGroup::Ungrouped
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoundGroup::Group2 => "group 2 (≤24 units)",
            RoundGroup::Group3 => "group 3 (≤48 units)",
            RoundGroup::Ungrouped => "no group",
        }
    }
}

impl fmt::Display for RoundGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
