//! Medicine domain model
//!
//! Stock classification is derived, never stored: `inStock` from the
//! quantity, low-stock from the reorder level, expiry from the expiry date.

use crate::domain::ids::MedicineId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dosage form, original wire spellings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DosageForm {
    Tablet,
    Capsule,
    Syrup,
    Injection,
    Cream,
    Ointment,
    Other,
}

impl fmt::Display for DosageForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DosageForm::Tablet => "tablet",
            DosageForm::Capsule => "capsule",
            DosageForm::Syrup => "syrup",
            DosageForm::Injection => "injection",
            DosageForm::Cream => "cream",
            DosageForm::Ointment => "ointment",
            DosageForm::Other => "other",
        };
        f.write_str(s)
    }
}

/// Inventory item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    /// Medicine identifier
    #[serde(rename = "_id")]
    pub id: MedicineId,

    /// Brand name
    pub name: String,

    /// Generic (INN) name
    pub generic_name: String,

    /// Free-form category
    pub category: String,

    /// Manufacturer name
    pub manufacturer: String,

    /// Dosage form
    pub dosage_form: DosageForm,

    /// Strength, e.g. "500mg"
    pub strength: String,

    /// Units on hand, non-negative
    pub quantity: u32,

    /// Stock unit, e.g. "box", "strip"
    pub unit: String,

    /// Batch number
    pub batch_number: String,

    /// Expiry date of the current batch
    pub expiry_date: DateTime<Utc>,

    /// Low-stock threshold
    pub reorder_level: u32,

    /// Price per unit
    pub unit_price: f64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Medicine {
    /// Derived: any units on hand
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Derived: at or below the reorder level
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }

    /// Derived: expired at the given instant (inclusive)
    pub fn is_expired(&self, as_of: DateTime<Utc>) -> bool {
        self.expiry_date <= as_of
    }
}

/// Fields for creating or replacing a medicine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDraft {
    pub name: String,
    pub generic_name: String,
    pub category: String,
    pub manufacturer: String,
    pub dosage_form: DosageForm,
    pub strength: String,
    pub quantity: u32,
    pub unit: String,
    pub batch_number: String,
    pub expiry_date: DateTime<Utc>,
    pub reorder_level: u32,
    pub unit_price: f64,
}

impl MedicineDraft {
    /// Validates required fields
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        if self.batch_number.trim().is_empty() {
            return Err("batchNumber is required".to_string());
        }
        if self.unit_price < 0.0 {
            return Err("unitPrice must be non-negative".to_string());
        }
        Ok(())
    }
}

/// Direction of a quantity adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockOperation {
    Add,
    Subtract,
}
