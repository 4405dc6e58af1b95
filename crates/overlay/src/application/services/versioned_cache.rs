//! Versioned Cache - key-addressed snapshot persistence with one version stamp
//!
//! Storage layout:
//! - the version key holds the bare token of the materialized dataset
//! - each collection key holds an envelope `{ version, stored_at, items }`
//!
//! A collection is only handed out when its envelope version equals the
//! version key, so a reader never pairs items written under one version with
//! another version's stamp. `write_snapshot` writes the envelope first and the
//! version key last; an interrupted write therefore reads back as corrupt,
//! which callers treat as "absent".
//!
//! There is no TTL. Freshness is decided by the caller comparing tokens.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use questlens_domain::CacheVersion;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ports::outbound::{storage_keys, StorageProvider};

#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// Stored data failed to parse or does not belong to the stored version.
    #[error("Cached collection {key} is corrupt: {message}")]
    Corrupt { key: String, message: String },

    /// The collection could not be serialized for storage.
    #[error("Failed to serialize collection {key}: {message}")]
    Serialize { key: String, message: String },
}

impl CacheError {
    fn corrupt(key: &str, message: impl ToString) -> Self {
        Self::Corrupt {
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: &'a CacheVersion,
    stored_at: DateTime<Utc>,
    items: &'a [T],
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: CacheVersion,
    stored_at: DateTime<Utc>,
    items: Vec<T>,
}

#[derive(Clone)]
pub struct VersionedCache {
    storage: Arc<dyn StorageProvider>,
}

impl VersionedCache {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }

    /// Version token of the locally materialized snapshot, if any.
    pub fn read_version(&self) -> Option<CacheVersion> {
        let raw = self.storage.load(storage_keys::DATA_VERSION)?;
        match CacheVersion::new(raw) {
            Ok(version) => Some(version),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable cache version");
                None
            }
        }
    }

    /// Items stored under `key`.
    ///
    /// Returns an empty collection when nothing has been cached yet.
    pub fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, CacheError> {
        let Some(version) = self.read_version() else {
            return Ok(Vec::new());
        };
        let Some(raw) = self.storage.load(key) else {
            return Err(CacheError::corrupt(key, "missing for stored version"));
        };

        let envelope: Envelope<T> =
            serde_json::from_str(&raw).map_err(|e| CacheError::corrupt(key, e))?;

        if envelope.version != version {
            return Err(CacheError::corrupt(
                key,
                format!(
                    "written under version {} but stored version is {}",
                    envelope.version, version
                ),
            ));
        }

        tracing::debug!(
            key,
            version = %version,
            stored_at = %envelope.stored_at,
            items = envelope.items.len(),
            "Read cached collection"
        );
        Ok(envelope.items)
    }

    /// Record `items` under `key` together with `version`.
    pub fn write_snapshot<T: Serialize>(
        &self,
        key: &str,
        items: &[T],
        version: &CacheVersion,
    ) -> Result<(), CacheError> {
        let envelope = EnvelopeRef {
            version,
            stored_at: Utc::now(),
            items,
        };
        let raw = serde_json::to_string(&envelope).map_err(|e| CacheError::Serialize {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        self.storage.save(key, &raw);
        self.storage.save(storage_keys::DATA_VERSION, version.as_str());
        Ok(())
    }

    /// Forget the stored version and the collection under `key`.
    pub fn invalidate(&self, key: &str) {
        self.storage.remove(storage_keys::DATA_VERSION);
        self.storage.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::MemoryStorageProvider;

    const KEY: &str = storage_keys::WORLDS;

    fn version(token: &str) -> CacheVersion {
        CacheVersion::new(token).expect("version")
    }

    #[test]
    fn empty_storage_reads_as_absent() {
        let cache = VersionedCache::new(Arc::new(MemoryStorageProvider::new()));
        assert_eq!(cache.read_version(), None);
        assert_eq!(cache.read_collection::<u32>(KEY).expect("empty"), Vec::<u32>::new());
    }

    #[test]
    fn write_then_read_pairs_items_with_version() {
        let cache = VersionedCache::new(Arc::new(MemoryStorageProvider::new()));
        cache
            .write_snapshot(KEY, &[1u32, 2, 3], &version("v2"))
            .expect("write");

        assert_eq!(cache.read_version(), Some(version("v2")));
        assert_eq!(cache.read_collection::<u32>(KEY).expect("items"), vec![1, 2, 3]);
    }

    #[test]
    fn unparsable_collection_is_corrupt() {
        let storage = MemoryStorageProvider::with_values([
            (storage_keys::DATA_VERSION, "v1"),
            (KEY, "[{broken"),
        ]);
        let cache = VersionedCache::new(Arc::new(storage));

        let err = cache.read_collection::<u32>(KEY).expect_err("corrupt");
        assert!(matches!(err, CacheError::Corrupt { .. }));
    }

    #[test]
    fn envelope_from_other_version_is_corrupt() {
        let storage = Arc::new(MemoryStorageProvider::new());
        let cache = VersionedCache::new(storage.clone());
        cache
            .write_snapshot(KEY, &[1u32], &version("v1"))
            .expect("write");

        // Version key advanced without the collection being rewritten.
        storage.save(storage_keys::DATA_VERSION, "v2");

        assert!(cache.read_collection::<u32>(KEY).is_err());
    }

    #[test]
    fn version_without_collection_is_corrupt() {
        let storage = MemoryStorageProvider::with_values([(storage_keys::DATA_VERSION, "v1")]);
        let cache = VersionedCache::new(Arc::new(storage));
        assert!(cache.read_collection::<u32>(KEY).is_err());
    }

    #[test]
    fn invalidate_clears_version_and_items() {
        let storage = Arc::new(MemoryStorageProvider::new());
        let cache = VersionedCache::new(storage.clone());
        cache
            .write_snapshot(KEY, &[1u32], &version("v1"))
            .expect("write");

        cache.invalidate(KEY);

        assert_eq!(cache.read_version(), None);
        assert!(storage.is_empty());
    }
}
