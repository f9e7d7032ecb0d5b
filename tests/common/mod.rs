#![allow(dead_code)]

use chrono::{DateTime, Utc};
use ketchup::AppError;
use ketchup::dtos::StoreEvent;
use ketchup::entities::{DeliveryMode, MatchPolicy, MeetupRequest, RequestId, RequestStatus};
use ketchup::{InMemoryRequestStore, NotificationController, RequestStore};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::broadcast::Receiver;

pub const COUNTDOWN: Duration = Duration::from_secs(60);

/// Store che delega a InMemoryRequestStore contando le chiamate di mutazione
pub struct CountingStore {
    inner: InMemoryRequestStore,
    pub notify_calls: AtomicUsize,
    pub match_calls: AtomicUsize,
    pub decline_calls: AtomicUsize,
}

impl CountingStore {
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            inner: InMemoryRequestStore::new(policy, 64),
            notify_calls: AtomicUsize::new(0),
            match_calls: AtomicUsize::new(0),
            decline_calls: AtomicUsize::new(0),
        }
    }

    pub fn declines(&self) -> usize {
        self.decline_calls.load(Ordering::SeqCst)
    }

    pub fn matches(&self) -> usize {
        self.match_calls.load(Ordering::SeqCst)
    }

    pub fn notifies(&self) -> usize {
        self.notify_calls.load(Ordering::SeqCst)
    }
}

impl RequestStore for CountingStore {
    fn create(&self, creator_id: &str) -> MeetupRequest {
        self.inner.create(creator_id)
    }

    fn read(&self, id: &RequestId) -> Option<MeetupRequest> {
        self.inner.read(id)
    }

    fn notify_friend(&self, id: &RequestId, friend_id: &str) -> Result<MeetupRequest, AppError> {
        self.notify_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.notify_friend(id, friend_id)
    }

    fn match_ketchup(&self, id: &RequestId, friend_id: &str) -> Result<MeetupRequest, AppError> {
        self.match_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.match_ketchup(id, friend_id)
    }

    fn decline_or_expire(
        &self,
        id: &RequestId,
        friend_id: &str,
    ) -> Result<MeetupRequest, AppError> {
        self.decline_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.decline_or_expire(id, friend_id)
    }

    fn cancel(&self, id: &RequestId, creator_id: &str) -> Result<MeetupRequest, AppError> {
        self.inner.cancel(id, creator_id)
    }

    fn expire_pending_before(&self, cutoff: DateTime<Utc>) -> usize {
        self.inner.expire_pending_before(cutoff)
    }

    fn list_by_status(&self, status: RequestStatus) -> Vec<MeetupRequest> {
        self.inner.list_by_status(status)
    }

    fn list_all(&self) -> Vec<MeetupRequest> {
        self.inner.list_all()
    }

    fn subscribe(&self) -> Receiver<StoreEvent> {
        self.inner.subscribe()
    }
}

/// Crea uno store contato e un controller per `viewer` con countdown di 60 secondi
pub fn controller_for(
    viewer: &str,
    mode: DeliveryMode,
) -> (Arc<CountingStore>, NotificationController) {
    let store = Arc::new(CountingStore::new(MatchPolicy::Exclusive));
    let controller = NotificationController::new(store.clone(), viewer, COUNTDOWN, mode);
    (store, controller)
}

/// Lascia girare i task in attesa (timer e watcher) senza far avanzare il tempo in modo significativo
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
