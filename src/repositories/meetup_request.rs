//! InMemoryRequestStore - Repository in memoria per le richieste di ketchup

use super::RequestStore;
use crate::core::AppError;
use crate::core::config::DEFAULT_EVENT_CAPACITY;
use crate::dtos::StoreEvent;
use crate::entities::{MatchPolicy, MeetupRequest, RequestId, RequestStatus};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::broadcast::{self, Receiver, Sender};
use tracing::{debug, info, instrument, warn};

//MEETUP REQUEST REPOSITORY
pub struct InMemoryRequestStore {
    requests: DashMap<RequestId, MeetupRequest>,
    /// prossimo id da assegnare, gli id non vengono mai riutilizzati
    next_id: AtomicI32,
    policy: MatchPolicy,
    events: Sender<StoreEvent>,
}

impl Default for InMemoryRequestStore {
    fn default() -> Self {
        Self::new(MatchPolicy::default(), DEFAULT_EVENT_CAPACITY)
    }
}

impl InMemoryRequestStore {
    pub fn new(policy: MatchPolicy, event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity);
        Self {
            requests: DashMap::new(),
            next_id: AtomicI32::new(1),
            policy,
            events,
        }
    }

    /// Pubblica l'evento ai subscriber. Chiamata mentre il lock della entry è ancora
    /// acquisito, così l'ordine degli eventi di una richiesta segue l'ordine delle mutazioni.
    fn publish(&self, event: StoreEvent) {
        match self.events.send(event) {
            Ok(n) => debug!(receivers = n, "Store event published"),
            Err(_) => debug!("Store event published with no active receivers"),
        }
    }

    /// In modalità Group una richiesta già Matched accetta ancora risposte
    fn accepts_responses(&self, status: RequestStatus) -> bool {
        match status {
            RequestStatus::Pending => true,
            RequestStatus::Matched => self.policy == MatchPolicy::Group,
            RequestStatus::Expired | RequestStatus::Cancelled => false,
        }
    }

    fn sorted(mut requests: Vec<MeetupRequest>) -> Vec<MeetupRequest> {
        requests.sort_by_key(|r| r.id);
        requests
    }
}

impl RequestStore for InMemoryRequestStore {
    #[instrument(skip(self))]
    fn create(&self, creator_id: &str) -> MeetupRequest {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = MeetupRequest::new(id, creator_id, Utc::now());

        // la entry resta bloccata finché l'evento Created non è pubblicato
        let entry = self.requests.entry(id).insert(request.clone());
        self.publish(StoreEvent::Created {
            request_id: id,
            creator_id: creator_id.to_string(),
        });
        drop(entry);

        info!(request_id = id, "Ketchup request created");
        request
    }

    fn read(&self, id: &RequestId) -> Option<MeetupRequest> {
        self.requests.get(id).map(|r| r.value().clone())
    }

    #[instrument(skip(self), fields(request_id = %id))]
    fn notify_friend(&self, id: &RequestId, friend_id: &str) -> Result<MeetupRequest, AppError> {
        let mut request = self.requests.get_mut(id).ok_or_else(|| {
            debug!("Notify on unknown request ignored");
            AppError::not_found("Request not found")
        })?;

        if request.status.is_terminal() {
            debug!(status = ?request.status, "Notify on terminal request ignored");
            return Err(AppError::invalid_transition("Request is not pending")
                .with_details(format!("Request is already {:?}", request.status)));
        }

        if request.is_created_by(friend_id) {
            warn!("Attempted to notify the creator of their own request");
            return Err(AppError::forbidden("The creator cannot be notified"));
        }

        if request.notified_friends.insert(friend_id.to_string()) {
            self.publish(StoreEvent::Notified {
                request_id: *id,
                friend_id: friend_id.to_string(),
            });
            info!("Friend notified");
        } else {
            debug!("Friend already notified");
        }

        Ok(request.clone())
    }

    #[instrument(skip(self), fields(request_id = %id, policy = %self.policy))]
    fn match_ketchup(&self, id: &RequestId, friend_id: &str) -> Result<MeetupRequest, AppError> {
        let mut request = self.requests.get_mut(id).ok_or_else(|| {
            debug!("Match on unknown request ignored");
            AppError::not_found("Request not found")
        })?;

        if request.is_created_by(friend_id) {
            warn!("Creator attempted to accept their own request");
            return Err(AppError::forbidden("The creator cannot accept their own request"));
        }

        // stesso amico che accetta due volte: nessun effetto
        if request.matched_friends.contains(friend_id) {
            debug!("Friend already matched");
            return Ok(request.clone());
        }

        if !self.accepts_responses(request.status) {
            debug!(status = ?request.status, "Match rejected");
            return Err(AppError::invalid_transition("Request no longer accepts matches")
                .with_details(format!("Request is already {:?}", request.status)));
        }

        if !request.notified_friends.contains(friend_id) {
            warn!("Friend attempted to accept a request they were never notified of");
            return Err(AppError::forbidden("Friend was never notified of this request"));
        }

        if request.declined_friends.contains(friend_id) {
            debug!("Friend already declined");
            return Err(AppError::invalid_transition("Friend already declined this request"));
        }

        request.matched_friends.insert(friend_id.to_string());
        request.status = RequestStatus::Matched;
        self.publish(StoreEvent::Matched {
            request_id: *id,
            friend_id: friend_id.to_string(),
        });
        info!(participants = request.matched_friends.len(), "Ketchup matched");

        Ok(request.clone())
    }

    #[instrument(skip(self), fields(request_id = %id))]
    fn decline_or_expire(
        &self,
        id: &RequestId,
        friend_id: &str,
    ) -> Result<MeetupRequest, AppError> {
        let mut request = self.requests.get_mut(id).ok_or_else(|| {
            debug!("Decline on unknown request ignored");
            AppError::not_found("Request not found")
        })?;

        if request.is_created_by(friend_id) {
            // il creatore che rifiuta sta cancellando la richiesta
            drop(request);
            return self.cancel(id, friend_id);
        }

        if !self.accepts_responses(request.status) {
            debug!(status = ?request.status, "Decline on closed request ignored");
            return Err(AppError::invalid_transition("Request no longer accepts responses")
                .with_details(format!("Request is already {:?}", request.status)));
        }

        if !request.notified_friends.contains(friend_id) {
            debug!("Decline from a friend that was never notified ignored");
            return Err(AppError::forbidden("Friend was never notified of this request"));
        }

        if request.matched_friends.contains(friend_id) {
            debug!("Decline after acceptance ignored");
            return Err(AppError::invalid_transition("Friend already accepted this request"));
        }

        if request.declined_friends.insert(friend_id.to_string()) {
            self.publish(StoreEvent::Declined {
                request_id: *id,
                friend_id: friend_id.to_string(),
            });
            info!("Friend declined");
        }

        Ok(request.clone())
    }

    #[instrument(skip(self), fields(request_id = %id))]
    fn cancel(&self, id: &RequestId, creator_id: &str) -> Result<MeetupRequest, AppError> {
        let mut request = self.requests.get_mut(id).ok_or_else(|| {
            debug!("Cancel on unknown request ignored");
            AppError::not_found("Request not found")
        })?;

        if !request.is_created_by(creator_id) {
            warn!("User {} attempted to cancel a request created by {}", creator_id, request.creator_id);
            return Err(AppError::forbidden("Only the creator can cancel a request"));
        }

        if request.status.is_terminal() {
            debug!(status = ?request.status, "Cancel on terminal request ignored");
            return Err(AppError::invalid_transition("Request is not pending")
                .with_details(format!("Request is already {:?}", request.status)));
        }

        request.status = RequestStatus::Cancelled;
        self.publish(StoreEvent::Cancelled { request_id: *id });
        info!("Ketchup request cancelled");

        Ok(request.clone())
    }

    #[instrument(skip(self))]
    fn expire_pending_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut stale: Vec<RequestId> = self
            .requests
            .iter()
            .filter(|r| r.is_pending() && r.created_at < cutoff)
            .map(|r| r.id)
            .collect();
        // gli eventi Expired seguono l'ordine di creazione
        stale.sort();

        let mut expired = 0;
        for id in stale {
            let Some(mut request) = self.requests.get_mut(&id) else {
                continue;
            };
            // ricontrollo sotto il lock della entry: nel frattempo può essere cambiata
            if !request.is_pending() {
                continue;
            }
            request.status = RequestStatus::Expired;
            self.publish(StoreEvent::Expired { request_id: id });
            expired += 1;
        }

        if expired > 0 {
            info!(expired, "Stale pending requests expired");
        }
        expired
    }

    fn list_by_status(&self, status: RequestStatus) -> Vec<MeetupRequest> {
        Self::sorted(
            self.requests
                .iter()
                .filter(|r| r.status == status)
                .map(|r| r.value().clone())
                .collect(),
        )
    }

    fn list_all(&self) -> Vec<MeetupRequest> {
        Self::sorted(self.requests.iter().map(|r| r.value().clone()).collect())
    }

    fn subscribe(&self) -> Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
