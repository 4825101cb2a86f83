//! In-progress order drafts keyed by session.
//!
//! A draft lives from the first `order.add` of a conversation until its
//! `order.complete`, whether or not submission succeeded. Drafts are not
//! persisted across restarts.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::session::SessionKey;
use crate::types::FoodOrder;

/// Storage for draft orders.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn get(&self, session: &SessionKey) -> Option<FoodOrder>;
    async fn put(&self, session: &SessionKey, order: FoodOrder);
    /// Remove the draft. Returns the removed order, if any.
    async fn delete(&self, session: &SessionKey) -> Option<FoodOrder>;
}

/// Process-local draft store.
#[derive(Default)]
pub struct MemoryDraftStore {
    drafts: RwLock<HashMap<SessionKey, FoodOrder>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.drafts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.drafts.read().await.is_empty()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn get(&self, session: &SessionKey) -> Option<FoodOrder> {
        self.drafts.read().await.get(session).cloned()
    }

    async fn put(&self, session: &SessionKey, order: FoodOrder) {
        self.drafts.write().await.insert(session.clone(), order);
    }

    async fn delete(&self, session: &SessionKey) -> Option<FoodOrder> {
        self.drafts.write().await.remove(session)
    }
}

/// Per-session mutual exclusion.
///
/// Every handler runs while holding its session's guard, so a read-modify-write
/// of a draft (or a submission followed by deletion) is never interleaved with
/// another request for the same session. Different sessions never contend.
#[derive(Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<SessionKey, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `session`.
    pub async fn acquire(&self, session: &SessionKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(session.clone()).or_default())
        };
        lock.lock_owned().await
    }

    /// Drop the lock entry for `session` if nobody holds or awaits it.
    ///
    /// Must be called after the guard from [`acquire`](Self::acquire) has been
    /// dropped; a live guard keeps the entry alive.
    pub async fn release_idle(&self, session: &SessionKey) {
        let mut locks = self.locks.lock().await;
        if locks
            .get(session)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(session);
        }
    }

    pub async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}
