use std::sync::Arc;

use tokio::sync::watch;

use crate::store::Snapshot;

/// A view's handle on the store. Every notification hands out the full
/// current snapshot; intermediate versions a slow reader missed are skipped,
/// but versions never go backwards.
#[derive(Debug, Clone)]
pub struct Subscription {
    rx: watch::Receiver<Arc<Snapshot>>,
}

impl Subscription {
    pub(crate) fn new(rx: watch::Receiver<Arc<Snapshot>>) -> Self {
        Self { rx }
    }

    /// Latest snapshot, marking it as seen.
    pub fn current(&mut self) -> Arc<Snapshot> {
        self.rx.borrow_and_update().clone()
    }

    /// Latest snapshot without marking it as seen.
    pub fn peek(&self) -> Arc<Snapshot> {
        self.rx.borrow().clone()
    }

    /// Whether a snapshot newer than the last one read is available.
    /// Returns `false` once the store has been dropped.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for the next change. `None` means the store is gone.
    pub async fn changed(&mut self) -> Option<Arc<Snapshot>> {
        self.rx.changed().await.ok()?;
        Some(self.current())
    }
}
