//! MeetupRequest DTOs - Rappresentazione di una richiesta per la view

use crate::entities::{MeetupRequest, RequestId, RequestStatus, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Struct per la view: i set diventano liste ordinate, così la serializzazione è stabile
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MeetupRequestDTO {
    pub id: RequestId,
    pub creator_id: UserId,
    pub status: RequestStatus,
    pub notified_friends: Vec<UserId>,
    pub matched_friends: Vec<UserId>,
    /// notificati che non hanno ancora accettato né rifiutato
    pub awaiting_friends: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

impl From<MeetupRequest> for MeetupRequestDTO {
    fn from(value: MeetupRequest) -> Self {
        let mut awaiting_friends: Vec<UserId> = value.awaiting_response().cloned().collect();
        awaiting_friends.sort();
        let mut notified_friends: Vec<UserId> = value.notified_friends.into_iter().collect();
        notified_friends.sort();
        let mut matched_friends: Vec<UserId> = value.matched_friends.into_iter().collect();
        matched_friends.sort();

        Self {
            id: value.id,
            creator_id: value.creator_id,
            status: value.status,
            notified_friends,
            matched_friends,
            awaiting_friends,
            created_at: value.created_at,
        }
    }
}
