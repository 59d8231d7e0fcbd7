//! DTO boundary for the UI layer.
//!
//! This screen has no networking, so instead of a REST layer the
//! [`crate::Backend`] facade calls these mappers directly to translate
//! between the `shared` contract types and the domain's commands and
//! results.

pub mod mappers;
