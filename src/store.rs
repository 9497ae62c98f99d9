use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::watch;

use crate::model::token::{DynamicRecord, TokenRecord};
use crate::notifier::Subscription;

/// Immutable view of every dynamic record at one point in time.
///
/// `version` increases by one for every accepted change (initialize, clear,
/// or an apply that actually altered a record).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub version: u64,
    pub records: BTreeMap<String, Arc<DynamicRecord>>,
}

impl Snapshot {
    pub fn get(&self, id: &str) -> Option<&DynamicRecord> {
        self.records.get(id).map(|r| r.as_ref())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Owner of the live token map. Cloning yields another handle to the same
/// store. Writes replace the whole snapshot, so readers never see a
/// half-written record.
#[derive(Clone)]
pub struct TokenStore {
    tx: Arc<watch::Sender<Arc<Snapshot>>>,
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Snapshot::default()));
        Self { tx: Arc::new(tx) }
    }

    /// Seed one record per token from its starting values, dropping any
    /// previously tracked set.
    pub fn initialize(&self, tokens: &[TokenRecord]) {
        let records: BTreeMap<String, Arc<DynamicRecord>> = tokens
            .iter()
            .map(|t| (t.id.clone(), Arc::new(DynamicRecord::from_token(t))))
            .collect();
        let count = records.len();
        self.tx.send_modify(|snap| {
            *snap = Arc::new(Snapshot {
                version: snap.version + 1,
                records,
            });
        });
        tracing::debug!(count, "Store initialized");
    }

    pub fn clear(&self) {
        self.tx.send_if_modified(|snap| {
            if snap.records.is_empty() {
                return false;
            }
            *snap = Arc::new(Snapshot {
                version: snap.version + 1,
                records: BTreeMap::new(),
            });
            true
        });
    }

    pub fn get(&self, id: &str) -> Option<DynamicRecord> {
        self.tx.borrow().get(id).cloned()
    }

    /// Replace the record for `id` with `mutation(old)`.
    ///
    /// Returns `None` without touching anything when `id` is not tracked.
    /// A mutation that yields an identical record leaves the snapshot (and
    /// its version) as is and wakes no subscriber. `mutation` runs while the
    /// store is locked and must not call back into the store.
    pub fn apply<F>(&self, id: &str, mutation: F) -> Option<DynamicRecord>
    where
        F: FnOnce(&DynamicRecord) -> DynamicRecord,
    {
        let mut result = None;
        self.tx.send_if_modified(|snap| {
            let Some(old) = snap.records.get(id) else {
                return false;
            };
            let next = mutation(old);
            if next == **old {
                result = Some(next);
                return false;
            }
            let mut records = snap.records.clone();
            records.insert(id.to_string(), Arc::new(next.clone()));
            *snap = Arc::new(Snapshot {
                version: snap.version + 1,
                records,
            });
            result = Some(next);
            true
        });
        if result.is_none() {
            tracing::debug!(id, "Apply skipped: id not tracked");
        }
        result
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.tx.borrow().clone()
    }

    pub fn ids(&self) -> Vec<String> {
        self.tx.borrow().records.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription::new(self.tx.subscribe())
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
