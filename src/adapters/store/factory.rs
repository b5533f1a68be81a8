//! Store factory
//!
//! Builds the collection trait objects from configuration.

use crate::adapters::store::embedded::EmbeddedStore;
use crate::adapters::store::traits::ClinicStores;
use crate::config::schema::{MeridianConfig, StorageBackend};
use crate::domain::Result;

/// Create the clinic stores for the configured backend
///
/// # Errors
///
/// Returns an error if a persistent backend cannot open its data directory
/// or an existing snapshot fails to parse.
pub fn create_stores(config: &MeridianConfig) -> Result<ClinicStores> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Creating in-memory document store");
            Ok(EmbeddedStore::in_memory().into_stores())
        }
        StorageBackend::File => {
            let dir = config
                .storage
                .data_dir
                .as_ref()
                .expect("file backend config should be validated");
            tracing::info!(data_dir = %dir, "Creating file-backed document store");
            Ok(EmbeddedStore::persistent(dir)?.into_stores())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::traits::{AccountStore, PatientStore};
    use crate::config::schema::StorageConfig;

    fn config(backend: StorageBackend, data_dir: Option<String>) -> MeridianConfig {
        MeridianConfig {
            application: Default::default(),
            environment: Default::default(),
            storage: StorageConfig { backend, data_dir },
            auth: Default::default(),
            bootstrap: Default::default(),
            logging: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_memory_backend() {
        let stores = create_stores(&config(StorageBackend::Memory, None)).unwrap();
        assert_eq!(stores.accounts.count_accounts().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let stores = create_stores(&config(
            StorageBackend::File,
            Some(dir.path().to_string_lossy().to_string()),
        ))
        .unwrap();
        assert_eq!(stores.patients.list_patients().await.unwrap().len(), 0);
    }
}
