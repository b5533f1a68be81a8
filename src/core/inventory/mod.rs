//! Pharmacy inventory ledger

pub mod service;

pub use service::InventoryService;
