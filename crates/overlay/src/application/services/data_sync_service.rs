//! Data Sync Service - keeps the local world/quest snapshot current
//!
//! `sync()` compares the locally stored version token with the remote one:
//! - equal: load the snapshot from the cache, no world or quest fetches
//! - different or absent locally: fetch worlds, then every world's quests
//!   concurrently, merge, persist under the new token
//!
//! No failure escapes `sync()`. The worst outcome is an empty snapshot or a
//! stale one that was valid for its own version.

use std::sync::Arc;

use futures_util::future::join_all;
use questlens_domain::{CacheVersion, QuestSnapshot, World};

use super::versioned_cache::{CacheError, VersionedCache};
use crate::ports::outbound::{storage_keys, QuestStorePort, RemoteFetchError};

/// What a call to [`DataSyncService::sync`] ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Local version matched; snapshot loaded from the cache.
    CacheHit { worlds: usize },
    /// Fresh data fetched and persisted under `version`.
    Refreshed {
        version: CacheVersion,
        worlds: usize,
        quests: usize,
        failed_worlds: usize,
    },
    /// Remote data unavailable; whatever the cache held is in use.
    Fallback { worlds: usize },
}

pub struct DataSyncService {
    store: Arc<dyn QuestStorePort>,
    cache: VersionedCache,
    snapshot: Arc<QuestSnapshot>,
}

impl DataSyncService {
    pub fn new(store: Arc<dyn QuestStorePort>, cache: VersionedCache) -> Self {
        Self {
            store,
            cache,
            snapshot: Arc::new(QuestSnapshot::empty()),
        }
    }

    /// Current in-memory snapshot.
    pub fn snapshot(&self) -> Arc<QuestSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub async fn sync(&mut self) -> SyncOutcome {
        let local = self.cache.read_version();

        let remote = match self.store.current_version().await {
            Ok(Some(version)) => version,
            Ok(None) => {
                tracing::warn!("Remote data version is missing, using cached data");
                return self.fallback();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read remote data version, using cached data");
                return self.fallback();
            }
        };

        if local.as_ref() == Some(&remote) {
            match self.load_from_cache() {
                Ok(worlds) => {
                    tracing::info!(version = %remote, worlds, "Using cached data");
                    return SyncOutcome::CacheHit { worlds };
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Cached data unreadable, fetching fresh data");
                    self.cache.invalidate(storage_keys::WORLDS);
                }
            }
        } else {
            tracing::info!(
                local = ?local.as_ref().map(CacheVersion::as_str),
                remote = %remote,
                "Fetching fresh data"
            );
        }

        match self.refresh(remote).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Failed to refresh game data, keeping cached data");
                self.fallback()
            }
        }
    }

    /// Populate the snapshot from the cache. On failure the snapshot becomes
    /// empty and the error is returned for the caller to act on.
    pub fn load_from_cache(&mut self) -> Result<usize, CacheError> {
        match self.cache.read_collection::<World>(storage_keys::WORLDS) {
            Ok(worlds) => {
                let snapshot = QuestSnapshot::new(worlds);
                let count = snapshot.len();
                self.snapshot = Arc::new(snapshot);
                Ok(count)
            }
            Err(e) => {
                self.snapshot = Arc::new(QuestSnapshot::empty());
                Err(e)
            }
        }
    }

    /// Fetch everything and persist it under `version`.
    ///
    /// A failure to list worlds aborts without touching the cache. A failure
    /// to list one world's quests leaves that world with no quests.
    pub async fn refresh(&mut self, version: CacheVersion) -> Result<SyncOutcome, RemoteFetchError> {
        let worlds = self.store.list_worlds().await?;

        let store = &self.store;
        let results = join_all(
            worlds
                .iter()
                .map(|world| async move { store.list_quests(&world.slug).await }),
        )
        .await;

        let mut failed_worlds = 0;
        let merged: Vec<World> = worlds
            .into_iter()
            .zip(results)
            .map(|(world, result)| match result {
                Ok(mut quests) => {
                    quests.retain(|quest| quest.world_slug == world.slug);
                    world.with_quests(quests)
                }
                Err(e) => {
                    failed_worlds += 1;
                    tracing::warn!(world = %world.slug, error = %e, "Failed to fetch quests for world");
                    world.with_quests(Vec::new())
                }
            })
            .collect();

        let snapshot = QuestSnapshot::new(merged);
        if let Err(e) = self
            .cache
            .write_snapshot(storage_keys::WORLDS, snapshot.worlds(), &version)
        {
            tracing::error!(error = %e, "Failed to persist refreshed data");
        }

        let outcome = SyncOutcome::Refreshed {
            version,
            worlds: snapshot.len(),
            quests: snapshot.quest_count(),
            failed_worlds,
        };
        tracing::info!(?outcome, "Cached fresh game data");

        self.snapshot = Arc::new(snapshot);
        Ok(outcome)
    }

    fn fallback(&mut self) -> SyncOutcome {
        if let Err(e) = self.load_from_cache() {
            tracing::warn!(error = %e, "Cached data unreadable, continuing without data");
        }
        SyncOutcome::Fallback {
            worlds: self.snapshot.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::MemoryStorageProvider;
    use crate::ports::outbound::MockQuestStorePort;
    use questlens_domain::{Quest, QuestSlug, WorldSlug};

    fn slug(value: &str) -> WorldSlug {
        WorldSlug::new(value).expect("slug")
    }

    fn version(token: &str) -> CacheVersion {
        CacheVersion::new(token).expect("version")
    }

    fn world(value: &str, order: i32) -> World {
        World::new(slug(value), value, order)
    }

    fn quest(world: &str, value: &str, order: i32) -> Quest {
        Quest::new(QuestSlug::new(value).expect("slug"), value, slug(world), order)
    }

    fn seeded_cache(token: &str, worlds: Vec<World>) -> (Arc<MemoryStorageProvider>, VersionedCache) {
        let storage = Arc::new(MemoryStorageProvider::new());
        let cache = VersionedCache::new(storage.clone());
        cache
            .write_snapshot(storage_keys::WORLDS, &worlds, &version(token))
            .expect("seed");
        (storage, cache)
    }

    #[tokio::test]
    async fn matching_version_loads_cache_without_fetching() {
        let cached = vec![world("ember", 1).with_quests(vec![quest("ember", "q1", 1)])];
        let (_storage, cache) = seeded_cache("7", cached.clone());

        let mut store = MockQuestStorePort::new();
        store
            .expect_current_version()
            .times(1)
            .returning(|| Ok(Some(CacheVersion::new("7").expect("version"))));
        store.expect_list_worlds().never();
        store.expect_list_quests().never();

        let mut service = DataSyncService::new(Arc::new(store), cache);
        let outcome = service.sync().await;

        assert_eq!(outcome, SyncOutcome::CacheHit { worlds: 1 });
        assert_eq!(service.snapshot().worlds(), cached.as_slice());
    }

    #[tokio::test]
    async fn mismatched_version_refreshes_and_persists_new_version() {
        let (_storage, cache) = seeded_cache("1", vec![world("old", 1)]);

        let mut store = MockQuestStorePort::new();
        store
            .expect_current_version()
            .times(1)
            .returning(|| Ok(Some(CacheVersion::new("2").expect("version"))));
        store
            .expect_list_worlds()
            .times(1)
            .returning(|| Ok(vec![world("ember", 1), world("frost", 2)]));
        store.expect_list_quests().times(2).returning(|w| {
            Ok(vec![
                quest(w.as_str(), &format!("{}-1", w), 1),
                quest(w.as_str(), &format!("{}-2", w), 2),
            ])
        });

        let mut service = DataSyncService::new(Arc::new(store), cache.clone());
        let outcome = service.sync().await;

        assert_eq!(
            outcome,
            SyncOutcome::Refreshed {
                version: version("2"),
                worlds: 2,
                quests: 4,
                failed_worlds: 0,
            }
        );
        assert_eq!(cache.read_version(), Some(version("2")));

        let stored: Vec<World> = cache.read_collection(storage_keys::WORLDS).expect("stored");
        assert_eq!(stored, service.snapshot().worlds());
        assert_eq!(stored[1].quests[0].slug.as_str(), "frost-1");
    }

    #[tokio::test]
    async fn one_failing_world_degrades_only_that_world() {
        let cache = VersionedCache::new(Arc::new(MemoryStorageProvider::new()));

        let mut store = MockQuestStorePort::new();
        store
            .expect_current_version()
            .returning(|| Ok(Some(CacheVersion::new("3").expect("version"))));
        store
            .expect_list_worlds()
            .returning(|| Ok(vec![world("a", 1), world("b", 2), world("c", 3)]));
        store.expect_list_quests().returning(|w| {
            if w.as_str() == "b" {
                Err(RemoteFetchError::transport("list_quests", "connection reset"))
            } else {
                Ok(vec![quest(w.as_str(), &format!("{}-1", w), 1)])
            }
        });

        let mut service = DataSyncService::new(Arc::new(store), cache);
        let outcome = service.sync().await;

        assert!(matches!(
            outcome,
            SyncOutcome::Refreshed {
                worlds: 3,
                quests: 2,
                failed_worlds: 1,
                ..
            }
        ));
        let snapshot = service.snapshot();
        assert_eq!(snapshot.world(&slug("a")).map(World::quest_count), Some(1));
        assert_eq!(snapshot.world(&slug("b")).map(World::quest_count), Some(0));
        assert_eq!(snapshot.world(&slug("c")).map(World::quest_count), Some(1));
    }

    #[tokio::test]
    async fn world_list_failure_leaves_cache_untouched() {
        let cached = vec![world("ember", 1)];
        let (_storage, cache) = seeded_cache("1", cached.clone());

        let mut store = MockQuestStorePort::new();
        store
            .expect_current_version()
            .returning(|| Ok(Some(CacheVersion::new("2").expect("version"))));
        store.expect_list_worlds().returning(|| {
            Err(RemoteFetchError::Status {
                operation: "list_worlds",
                status: 503,
                body: "unavailable".into(),
            })
        });
        store.expect_list_quests().never();

        let mut service = DataSyncService::new(Arc::new(store), cache.clone());
        let outcome = service.sync().await;

        assert_eq!(outcome, SyncOutcome::Fallback { worlds: 1 });
        assert_eq!(cache.read_version(), Some(version("1")));
        assert_eq!(service.snapshot().worlds(), cached.as_slice());
    }

    #[tokio::test]
    async fn remote_version_error_uses_cache() {
        let (_storage, cache) = seeded_cache("1", vec![world("ember", 1)]);

        let mut store = MockQuestStorePort::new();
        store
            .expect_current_version()
            .returning(|| Err(RemoteFetchError::transport("current_version", "timeout")));
        store.expect_list_worlds().never();

        let mut service = DataSyncService::new(Arc::new(store), cache);
        assert_eq!(service.sync().await, SyncOutcome::Fallback { worlds: 1 });
    }

    #[tokio::test]
    async fn corrupt_cache_under_matching_version_triggers_refresh() {
        let storage = Arc::new(MemoryStorageProvider::with_values([
            (storage_keys::DATA_VERSION, "5"),
            (storage_keys::WORLDS, "not json"),
        ]));
        let cache = VersionedCache::new(storage);

        let mut store = MockQuestStorePort::new();
        store
            .expect_current_version()
            .times(1)
            .returning(|| Ok(Some(CacheVersion::new("5").expect("version"))));
        store
            .expect_list_worlds()
            .times(1)
            .returning(|| Ok(vec![world("ember", 1)]));
        store.expect_list_quests().returning(|_| Ok(Vec::new()));

        let mut service = DataSyncService::new(Arc::new(store), cache.clone());
        let outcome = service.sync().await;

        assert!(matches!(outcome, SyncOutcome::Refreshed { worlds: 1, .. }));
        assert!(cache.read_collection::<World>(storage_keys::WORLDS).is_ok());
    }

    #[tokio::test]
    async fn corrupt_cache_and_unreachable_store_yield_empty_snapshot() {
        let storage = Arc::new(MemoryStorageProvider::with_values([
            (storage_keys::DATA_VERSION, "5"),
            (storage_keys::WORLDS, "{}"),
        ]));

        let mut store = MockQuestStorePort::new();
        store
            .expect_current_version()
            .returning(|| Err(RemoteFetchError::transport("current_version", "offline")));

        let mut service = DataSyncService::new(Arc::new(store), VersionedCache::new(storage));
        assert_eq!(service.sync().await, SyncOutcome::Fallback { worlds: 0 });
        assert!(service.snapshot().is_empty());
    }

    #[tokio::test]
    async fn numeric_and_text_versions_are_equal() {
        let (_storage, cache) = seeded_cache("12", vec![world("ember", 1)]);

        let mut store = MockQuestStorePort::new();
        store.expect_current_version().returning(|| {
            Ok(Some(
                CacheVersion::from_json(&serde_json::json!(12)).expect("version"),
            ))
        });
        store.expect_list_worlds().never();

        let mut service = DataSyncService::new(Arc::new(store), cache);
        assert_eq!(service.sync().await, SyncOutcome::CacheHit { worlds: 1 });
    }
}
