//! Equipment models: ICS (small items) and PAR (fixed property)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::ItemStatus;
use super::search::Searchable;

/// Equipment covered by an Inventory Custody Slip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IcsEquipment {
    pub id: i32,
    pub description: String,
    pub quantity: i32,
    /// Unit of measure (pc, set, unit...)
    pub unit: String,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    pub inventory_item_no: String,
    /// Free text, e.g. "5 years"
    pub estimated_useful_life: String,
    /// Requisition and Issue Slip reference
    pub ris_no: String,
    pub ics_no: String,
    pub status: ItemStatus,
}

impl Searchable for IcsEquipment {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.description, &self.inventory_item_no, &self.ics_no, &self.ris_no]
    }
}

/// Equipment covered by a Property Acknowledgment Receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParEquipment {
    pub id: i32,
    pub property_no: String,
    pub description: String,
    pub quantity: i32,
    pub unit: String,
    pub date_acquired: NaiveDate,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub par_no: String,
    pub status: ItemStatus,
}

impl Searchable for ParEquipment {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.description, &self.property_no, &self.par_no]
    }
}

/// Create ICS equipment request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIcsEquipment {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit: String,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    #[validate(length(min = 1, message = "Inventory item number is required"))]
    pub inventory_item_no: String,
    #[serde(default)]
    pub estimated_useful_life: String,
    #[serde(default)]
    pub ris_no: String,
    #[validate(length(min = 1, message = "ICS number is required"))]
    pub ics_no: String,
    #[serde(default)]
    pub status: ItemStatus,
}

/// Update ICS equipment request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIcsEquipment {
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i32>,
    pub unit: Option<String>,
    #[schema(value_type = Option<String>)]
    pub total_amount: Option<Decimal>,
    #[validate(length(min = 1, message = "Inventory item number cannot be empty"))]
    pub inventory_item_no: Option<String>,
    pub estimated_useful_life: Option<String>,
    pub ris_no: Option<String>,
    pub ics_no: Option<String>,
}

/// Create PAR equipment request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateParEquipment {
    #[validate(length(min = 1, message = "Property number is required"))]
    pub property_no: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit: String,
    pub date_acquired: NaiveDate,
    #[schema(value_type = String)]
    pub amount: Decimal,
    #[validate(length(min = 1, message = "PAR number is required"))]
    pub par_no: String,
    #[serde(default)]
    pub status: ItemStatus,
}

/// Update PAR equipment request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParEquipment {
    #[validate(length(min = 1, message = "Property number cannot be empty"))]
    pub property_no: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i32>,
    pub unit: Option<String>,
    pub date_acquired: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    pub par_no: Option<String>,
}

/// Equipment list filters (both classes)
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EquipmentQuery {
    /// Matches description and slip/property numbers
    pub search: Option<String>,
    pub status: Option<ItemStatus>,
}

/// Per-class totals for the equipment overview
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EquipmentClassSummary {
    /// Number of records
    pub records: i64,
    pub available: i64,
    pub borrowed: i64,
    /// Sum of quantities
    pub total_quantity: i64,
    /// Sum of amounts
    #[schema(value_type = String)]
    pub total_value: Decimal,
}

/// Combined ICS + PAR overview
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EquipmentSummary {
    pub ics: EquipmentClassSummary,
    pub par: EquipmentClassSummary,
    pub total_records: i64,
    pub total_available: i64,
    pub total_borrowed: i64,
}
