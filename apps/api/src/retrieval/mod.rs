//! Retrieval Service — resolves a guide by identifier from an ordered list
//! of sources: the durable store first, then the caller-supplied fallback
//! copy cached at creation time. First hit wins; resolution is read-only
//! and never writes a fallback hit back to the store.

pub mod handlers;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::models::guide::GuideRecord;
use crate::store::GuideStore;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Present in neither the store nor the fallback: the guide is gone.
    #[error("guide not found")]
    NotFound,

    /// The store could not be consulted and no fallback copy was usable.
    /// Distinct from NotFound so the client can say "temporarily
    /// unavailable" instead of "expired or removed".
    #[error("guide store unavailable: {0}")]
    Unavailable(String),
}

/// Which source answered the lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordSource {
    Store,
    Cache,
}

#[derive(Debug, Clone)]
pub struct Resolved {
    pub record: GuideRecord,
    pub source: RecordSource,
}

/// Resolves `id` against the durable store, falling back to the caller's
/// cached copy on a miss or on an infrastructure error. A fallback record
/// whose id does not match the requested id is ignored.
pub async fn resolve(
    store: &dyn GuideStore,
    id: Uuid,
    fallback: Option<GuideRecord>,
) -> Result<Resolved, ResolveError> {
    let store_fault = match store.get(id).await {
        Ok(Some(record)) => {
            return Ok(Resolved {
                record,
                source: RecordSource::Store,
            })
        }
        Ok(None) => None,
        Err(e) => {
            warn!("Durable lookup for guide {id} failed: {e}");
            Some(e.to_string())
        }
    };

    if let Some(record) = fallback.filter(|r| r.id == id) {
        return Ok(Resolved {
            record,
            source: RecordSource::Cache,
        });
    }

    match store_fault {
        Some(reason) => Err(ResolveError::Unavailable(reason)),
        None => Err(ResolveError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::guide::test_fixtures::{sample_document, sample_profile};
    use crate::store::StoreError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<HashMap<Uuid, GuideRecord>>,
        broken: bool,
        puts: AtomicUsize,
    }

    #[async_trait]
    impl GuideStore for MemoryStore {
        async fn put(&self, record: &GuideRecord) -> Result<(), StoreError> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            self.records
                .lock()
                .unwrap()
                .insert(record.id, record.clone());
            Ok(())
        }

        async fn get(&self, id: Uuid) -> Result<Option<GuideRecord>, StoreError> {
            if self.broken {
                return Err(StoreError::InfrastructureFailure(
                    "access denied".to_string(),
                ));
            }
            Ok(self.records.lock().unwrap().get(&id).cloned())
        }
    }

    fn record() -> GuideRecord {
        GuideRecord::create(sample_profile(), sample_document(), true, true)
    }

    #[tokio::test]
    async fn durable_hit_wins_over_fallback() {
        let stored = record();
        let store = MemoryStore::default();
        store.put(&stored).await.unwrap();

        let mut cached = stored.clone();
        cached.delivered = false; // stale local copy

        let resolved = resolve(&store, stored.id, Some(cached)).await.unwrap();
        assert_eq!(resolved.source, RecordSource::Store);
        assert!(resolved.record.delivered, "durable copy is authoritative");
    }

    #[tokio::test]
    async fn miss_with_matching_fallback_serves_the_cache() {
        let cached = record();
        let store = MemoryStore::default();

        let resolved = resolve(&store, cached.id, Some(cached.clone())).await.unwrap();
        assert_eq!(resolved.source, RecordSource::Cache);
        assert_eq!(resolved.record.id, cached.id);
    }

    #[tokio::test]
    async fn infrastructure_error_with_fallback_serves_the_cache() {
        let cached = record();
        let store = MemoryStore {
            broken: true,
            ..Default::default()
        };

        let resolved = resolve(&store, cached.id, Some(cached)).await.unwrap();
        assert_eq!(resolved.source, RecordSource::Cache);
    }

    #[tokio::test]
    async fn miss_without_fallback_is_not_found() {
        let store = MemoryStore::default();
        let err = resolve(&store, Uuid::new_v4(), None).await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound));
    }

    #[tokio::test]
    async fn infrastructure_error_without_fallback_is_unavailable() {
        let store = MemoryStore {
            broken: true,
            ..Default::default()
        };
        let err = resolve(&store, Uuid::new_v4(), None).await.unwrap_err();
        assert!(matches!(err, ResolveError::Unavailable(_)));
    }

    #[tokio::test]
    async fn mismatched_fallback_id_is_ignored() {
        let store = MemoryStore::default();
        let cached = record();
        let err = resolve(&store, Uuid::new_v4(), Some(cached)).await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound));
    }

    #[tokio::test]
    async fn fallback_hit_never_writes_back() {
        let cached = record();
        let store = MemoryStore::default();

        resolve(&store, cached.id, Some(cached)).await.unwrap();
        assert_eq!(store.puts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn get_is_idempotent_without_intervening_put() {
        let stored = record();
        let store = MemoryStore::default();
        store.put(&stored).await.unwrap();

        let first = store.get(stored.id).await.unwrap().unwrap();
        let second = store.get(stored.id).await.unwrap().unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(first.has_artifact, second.has_artifact);
        assert_eq!(first.delivered, second.delivered);
    }
}
