//! Built-in schemas for the seller report types the dashboard accepts.
//!
//! Each schema matches the header layout of the corresponding Seller
//! Central / advertising console CSV export. Adding support for a new
//! report type means adding one entry here; nothing else changes.

use sellerkit_model::{ColumnDef, ColumnType, SchemaDef, Transform, Value};

/// ASIN format: `B0` followed by eight alphanumerics.
const ASIN_PATTERN: &str = r"^B0[0-9A-Z]{8}$";
const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

pub fn acos_report() -> SchemaDef {
    SchemaDef::new("ACOS Report Schema", "1.0")
        .with_description("Advertising cost-of-sales report export")
        .with_column(
            "Date",
            ColumnDef::new(ColumnType::Date)
                .required()
                .with_format(DATE_PATTERN),
        )
        .with_column(
            "Impressions",
            ColumnDef::new(ColumnType::Number)
                .required()
                .with_transform(Transform::StripThousands)
                .with_min(0.0),
        )
        .with_column(
            "Clicks",
            ColumnDef::new(ColumnType::Number)
                .required()
                .with_transform(Transform::StripThousands)
                .with_min(0.0),
        )
        .with_column(
            "CTR",
            ColumnDef::new(ColumnType::Number)
                .with_transform(Transform::StripPercent)
                .with_transform(Transform::ParseNumber)
                .with_range(0.0, 100.0),
        )
        .with_column(
            "Spend",
            ColumnDef::new(ColumnType::Number)
                .required()
                .with_transform(Transform::StripCurrency)
                .with_transform(Transform::StripThousands)
                .with_transform(Transform::ParseNumber)
                .with_min(0.0),
        )
        .with_column(
            "Sales",
            ColumnDef::new(ColumnType::Number)
                .required()
                .with_transform(Transform::StripCurrency)
                .with_transform(Transform::StripThousands)
                .with_transform(Transform::ParseNumber)
                .with_min(0.0),
        )
        .with_column(
            "ACOS",
            ColumnDef::new(ColumnType::Number)
                .with_transform(Transform::StripPercent)
                .with_transform(Transform::ParseNumber)
                .with_min(0.0),
        )
}

pub fn product_listing() -> SchemaDef {
    SchemaDef::new("Product Listing Schema", "1.0")
        .with_description("Active listings report export")
        .with_column(
            "SKU",
            ColumnDef::new(ColumnType::String)
                .required()
                .with_transform(Transform::Trim)
                .with_rule("SKU must be at most 40 characters", |v| {
                    !matches!(v, Value::Str(s) if s.len() > 40)
                }),
        )
        .with_column(
            "ASIN",
            ColumnDef::new(ColumnType::String)
                .required()
                .with_transform(Transform::Trim)
                .with_transform(Transform::Uppercase)
                .with_format(ASIN_PATTERN),
        )
        .with_column(
            "Title",
            ColumnDef::new(ColumnType::String)
                .required()
                .with_transform(Transform::Trim)
                .with_rule("title must be at most 200 characters", |v| {
                    !matches!(v, Value::Str(s) if s.chars().count() > 200)
                }),
        )
        .with_column(
            "Price",
            ColumnDef::new(ColumnType::Number)
                .required()
                .with_transform(Transform::StripCurrency)
                .with_transform(Transform::StripThousands)
                .with_transform(Transform::ParseNumber)
                .with_min(0.01),
        )
        .with_column(
            "Quantity",
            ColumnDef::new(ColumnType::Number)
                .required()
                .with_transform(Transform::StripThousands)
                .with_min(0.0)
                .with_rule("quantity must be a whole number", |v| {
                    v.as_number().is_some_and(|n| n.fract() == 0.0)
                }),
        )
        .with_column(
            "Status",
            ColumnDef::new(ColumnType::String)
                .with_transform(Transform::Lowercase)
                .with_allowed_values(["active", "inactive", "incomplete"]),
        )
}

pub fn keyword_report() -> SchemaDef {
    SchemaDef::new("Keyword Report Schema", "1.0")
        .with_description("Search-term / keyword performance export")
        .with_column(
            "Keyword",
            ColumnDef::new(ColumnType::String)
                .required()
                .with_transform(Transform::Trim)
                .with_transform(Transform::Lowercase),
        )
        .with_column(
            "Match Type",
            ColumnDef::new(ColumnType::String)
                .required()
                .with_transform(Transform::Lowercase)
                .with_allowed_values(["broad", "phrase", "exact"]),
        )
        .with_column(
            "Impressions",
            ColumnDef::new(ColumnType::Number)
                .with_transform(Transform::StripThousands)
                .with_min(0.0),
        )
        .with_column(
            "Clicks",
            ColumnDef::new(ColumnType::Number)
                .with_transform(Transform::StripThousands)
                .with_min(0.0),
        )
        .with_column(
            "Bid",
            ColumnDef::new(ColumnType::Number)
                .with_transform(Transform::StripCurrency)
                .with_transform(Transform::ParseNumber)
                .with_min(0.02),
        )
}

pub fn inventory_report() -> SchemaDef {
    SchemaDef::new("Inventory Report Schema", "1.0")
        .with_description("FBA inventory snapshot export")
        .strict()
        .with_column(
            "SKU",
            ColumnDef::new(ColumnType::String)
                .required()
                .with_transform(Transform::Trim),
        )
        .with_column(
            "ASIN",
            ColumnDef::new(ColumnType::String)
                .with_transform(Transform::Trim)
                .with_transform(Transform::Uppercase)
                .with_format(ASIN_PATTERN),
        )
        .with_column(
            "Available",
            ColumnDef::new(ColumnType::Number)
                .required()
                .with_transform(Transform::StripThousands)
                .with_min(0.0),
        )
        .with_column(
            "Inbound",
            ColumnDef::new(ColumnType::Number)
                .with_transform(Transform::StripThousands)
                .with_min(0.0),
        )
        .with_column(
            "Snapshot Date",
            ColumnDef::new(ColumnType::Date).with_format(DATE_PATTERN),
        )
}

pub fn ppc_campaign() -> SchemaDef {
    SchemaDef::new("PPC Campaign Schema", "1.0")
        .with_description("Sponsored Products campaign export")
        .with_column(
            "Campaign Name",
            ColumnDef::new(ColumnType::String)
                .required()
                .with_transform(Transform::Trim),
        )
        .with_column(
            "State",
            ColumnDef::new(ColumnType::String)
                .required()
                .with_transform(Transform::Lowercase)
                .with_allowed_values(["enabled", "paused", "archived"]),
        )
        .with_column(
            "Daily Budget",
            ColumnDef::new(ColumnType::Number)
                .required()
                .with_transform(Transform::StripCurrency)
                .with_transform(Transform::StripThousands)
                .with_transform(Transform::ParseNumber)
                .with_min(1.0),
        )
        .with_column(
            "Start Date",
            ColumnDef::new(ColumnType::Date)
                .required()
                .with_format(DATE_PATTERN),
        )
        .with_column(
            "Targeting",
            ColumnDef::new(ColumnType::String)
                .with_transform(Transform::Lowercase)
                .with_allowed_values(["automatic", "manual"]),
        )
        .with_column("Serving", ColumnDef::new(ColumnType::Boolean))
}
