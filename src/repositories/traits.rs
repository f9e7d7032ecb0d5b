//! Request store trait
//!
//! Interface of the single source of truth for meetup requests visible to the session.
//! Every mutation is atomic with respect to the others and, when it changes state,
//! publishes exactly one [`StoreEvent`] before returning.

use crate::core::AppError;
use crate::dtos::StoreEvent;
use crate::entities::{MeetupRequest, RequestId, RequestStatus};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast::Receiver;

pub trait RequestStore: Send + Sync {
    /// Creates a new `Pending` request with empty friend sets
    ///
    /// # Arguments
    /// * `creator_id` - User proposing the ketchup
    ///
    /// # Returns
    /// The created request with a fresh, never reused id
    fn create(&self, creator_id: &str) -> MeetupRequest;

    /// Reads a snapshot of a single request
    fn read(&self, id: &RequestId) -> Option<MeetupRequest>;

    /// Records that `friend_id` has been shown the live prompt for the request
    ///
    /// # Returns
    /// * `Ok(MeetupRequest)` - Request after the call (unchanged if the friend was already notified)
    /// * `Err(AppError)` - No effect: request missing, terminal, or `friend_id` is the creator
    fn notify_friend(&self, id: &RequestId, friend_id: &str) -> Result<MeetupRequest, AppError>;

    /// Accepts the request on behalf of `friend_id`
    ///
    /// The first acceptance moves the request to `Matched`. What happens to later
    /// acceptances depends on the store's [`MatchPolicy`](crate::entities::MatchPolicy).
    ///
    /// # Returns
    /// * `Ok(MeetupRequest)` - Request after the call
    /// * `Err(AppError)` - No effect
    fn match_ketchup(&self, id: &RequestId, friend_id: &str) -> Result<MeetupRequest, AppError>;

    /// Removes the live-notification obligation of `friend_id` without touching `notified_friends`
    ///
    /// Status is unchanged, other friends may still accept. When `friend_id` is the
    /// creator this is an explicit cancellation (see [`RequestStore::cancel`]).
    fn decline_or_expire(&self, id: &RequestId, friend_id: &str)
    -> Result<MeetupRequest, AppError>;

    /// Creator-only cancellation: `Pending -> Cancelled`
    fn cancel(&self, id: &RequestId, creator_id: &str) -> Result<MeetupRequest, AppError>;

    /// Moves every `Pending` request created before `cutoff` to `Expired`
    ///
    /// # Returns
    /// Number of requests expired by this call
    fn expire_pending_before(&self, cutoff: DateTime<Utc>) -> usize;

    /// Snapshot of the requests with the given status, in creation order
    fn list_by_status(&self, status: RequestStatus) -> Vec<MeetupRequest>;

    /// Snapshot of all requests, in creation order
    fn list_all(&self) -> Vec<MeetupRequest>;

    /// Subscribes to the events published by every applied mutation
    fn subscribe(&self) -> Receiver<StoreEvent>;
}
