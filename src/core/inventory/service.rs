//! Inventory quantity ledger
//!
//! Bounded stock counters with derived classification. The add/subtract
//! discriminant is the one mutation contract for quantities; replacing the
//! whole document goes through `update`. Concurrent adjustments against a
//! shared remote store can lose updates; the shipped embedded store
//! serializes them behind its writer lock, but that is a property of the
//! backend, not of this service.

use crate::adapters::store::traits::{ClinicStores, MedicineStore};
use crate::domain::errors::DomainError;
use crate::domain::ids::MedicineId;
use crate::domain::medicine::{Medicine, MedicineDraft, StockOperation};
use crate::domain::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Inventory quantity ledger
pub struct InventoryService {
    medicines: Arc<dyn MedicineStore>,
}

impl InventoryService {
    /// Creates the service over the wired store set
    pub fn new(stores: &ClinicStores) -> Self {
        Self {
            medicines: stores.medicines.clone(),
        }
    }

    /// Register a new medicine
    ///
    /// # Errors
    ///
    /// `Validation` if required fields are missing or malformed.
    pub async fn create(&self, draft: MedicineDraft) -> Result<Medicine> {
        draft.validate().map_err(DomainError::Validation)?;

        let now = Utc::now();
        let medicine = Medicine {
            id: MedicineId::generate(),
            name: draft.name,
            generic_name: draft.generic_name,
            category: draft.category,
            manufacturer: draft.manufacturer,
            dosage_form: draft.dosage_form,
            strength: draft.strength,
            quantity: draft.quantity,
            unit: draft.unit,
            batch_number: draft.batch_number,
            expiry_date: draft.expiry_date,
            reorder_level: draft.reorder_level,
            unit_price: draft.unit_price,
            created_at: now,
            updated_at: now,
        };
        let created = self.medicines.insert_medicine(medicine).await?;
        tracing::info!(medicine_id = %created.id, name = %created.name, "Medicine registered");
        Ok(created)
    }

    /// Replace a medicine document, keeping its identity and creation time
    ///
    /// # Errors
    ///
    /// `NotFound` if the medicine does not exist, `Validation` for bad
    /// fields.
    pub async fn update(&self, id: &MedicineId, draft: MedicineDraft) -> Result<Medicine> {
        draft.validate().map_err(DomainError::Validation)?;

        let existing = self.get(id).await?;
        let medicine = Medicine {
            id: existing.id,
            name: draft.name,
            generic_name: draft.generic_name,
            category: draft.category,
            manufacturer: draft.manufacturer,
            dosage_form: draft.dosage_form,
            strength: draft.strength,
            quantity: draft.quantity,
            unit: draft.unit,
            batch_number: draft.batch_number,
            expiry_date: draft.expiry_date,
            reorder_level: draft.reorder_level,
            unit_price: draft.unit_price,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        self.medicines.update_medicine(medicine).await
    }

    /// Fetch one medicine
    ///
    /// # Errors
    ///
    /// `NotFound` if the medicine does not exist.
    pub async fn get(&self, id: &MedicineId) -> Result<Medicine> {
        self.medicines
            .get_medicine(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Medicine", id.as_str()).into())
    }

    /// All medicines ordered by name
    pub async fn list_all(&self) -> Result<Vec<Medicine>> {
        self.medicines.list_medicines().await
    }

    /// Adjust the stock counter
    ///
    /// # Errors
    ///
    /// `NotFound` if the medicine does not exist; `InsufficientQuantity`
    /// when a subtract would underflow, leaving the stored quantity
    /// unchanged.
    pub async fn adjust(
        &self,
        id: &MedicineId,
        amount: u32,
        operation: StockOperation,
    ) -> Result<Medicine> {
        let updated = self
            .medicines
            .adjust_medicine_quantity(id, amount, operation)
            .await?;

        tracing::info!(
            medicine_id = %id,
            operation = ?operation,
            amount,
            quantity = updated.quantity,
            "Stock adjusted"
        );
        if updated.is_low_stock() {
            tracing::warn!(
                medicine_id = %id,
                quantity = updated.quantity,
                reorder_level = updated.reorder_level,
                "Medicine at or below reorder level"
            );
        }
        Ok(updated)
    }

    /// Medicines at or below the threshold, ordered by quantity ascending
    ///
    /// Pure query: repeated calls with no intervening mutation return
    /// identical ordered results. With `None`, each medicine compares
    /// against its own `reorderLevel`.
    pub async fn list_low_stock(&self, threshold: Option<u32>) -> Result<Vec<Medicine>> {
        self.medicines.list_low_stock_medicines(threshold).await
    }

    /// Medicines expired at `as_of`, ordered by expiry ascending
    ///
    /// Pure query, same idempotence as `list_low_stock`.
    pub async fn list_expired(&self, as_of: DateTime<Utc>) -> Result<Vec<Medicine>> {
        self.medicines.list_expired_medicines(as_of).await
    }
}
