//! In-memory leaderboard. Records live as long as the process.

use bullcow_protocol::Record;
use tokio::sync::Mutex;

use crate::store::validate_name;
use crate::{RecordError, RecordStore};

#[derive(Debug, Default)]
struct Inner {
    /// Records in insertion order.
    records: Vec<Record>,
    next_id: u64,
}

/// A [`RecordStore`] backed by a `Vec` behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    inner: Mutex<Inner>,
}

impl MemoryRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    async fn list(&self, limit: Option<usize>) -> Vec<Record> {
        let inner = self.inner.lock().await;
        let take = match limit {
            None | Some(0) => inner.records.len(),
            Some(n) => n,
        };
        inner.records.iter().take(take).cloned().collect()
    }

    async fn create(
        &self,
        name: String,
        record: u32,
    ) -> Result<Record, RecordError> {
        validate_name(&name)?;

        let mut inner = self.inner.lock().await;
        if inner.records.iter().any(|r| r.name == name) {
            return Err(RecordError::DuplicateName(name));
        }

        inner.next_id += 1;
        let entry = Record {
            id: inner.next_id,
            name,
            record,
        };
        inner.records.push(entry.clone());

        tracing::info!(id = entry.id, name = %entry.name, record, "record created");
        Ok(entry)
    }

    async fn best(&self) -> Option<u32> {
        self.inner
            .lock()
            .await
            .records
            .iter()
            .map(|r| r.record)
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryRecordStore::new();
        assert!(store.list(None).await.is_empty());
        assert_eq!(store.best().await, None);
    }

    #[tokio::test]
    async fn test_create_assigns_ascending_ids() {
        let store = MemoryRecordStore::new();
        let a = store.create("alice".into(), 7).await.unwrap();
        let b = store.create("bob".into(), 3).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(b.name, "bob");
        assert_eq!(b.record, 3);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let store = MemoryRecordStore::new();
        store.create("alice".into(), 7).await.unwrap();
        let err = store.create("alice".into(), 2).await.unwrap_err();
        assert!(matches!(err, RecordError::DuplicateName(ref n) if n == "alice"));
        assert_eq!(store.list(None).await.len(), 1);
        assert_eq!(store.best().await, Some(7));
    }

    #[tokio::test]
    async fn test_create_rejects_short_name() {
        let store = MemoryRecordStore::new();
        let err = store.create("al".into(), 1).await.unwrap_err();
        assert!(matches!(err, RecordError::InvalidName { len: 2, .. }));
        assert!(store.list(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_list_limit() {
        let store = MemoryRecordStore::new();
        for (name, record) in [("ann", 5), ("ben", 4), ("cat", 9)] {
            store.create(name.into(), record).await.unwrap();
        }

        let names = |records: Vec<Record>| {
            records.into_iter().map(|r| r.name).collect::<Vec<_>>()
        };
        assert_eq!(names(store.list(Some(2)).await), ["ann", "ben"]);
        assert_eq!(names(store.list(Some(0)).await).len(), 3);
        assert_eq!(names(store.list(Some(10)).await).len(), 3);
        assert_eq!(names(store.list(None).await), ["ann", "ben", "cat"]);
    }

    #[tokio::test]
    async fn test_best_is_lowest_record() {
        let store = MemoryRecordStore::new();
        store.create("ann".into(), 5).await.unwrap();
        store.create("ben".into(), 2).await.unwrap();
        store.create("cat".into(), 9).await.unwrap();
        assert_eq!(store.best().await, Some(2));
    }
}
