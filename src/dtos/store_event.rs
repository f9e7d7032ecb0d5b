//! Store Event DTOs - Eventi pubblicati dallo store ad ogni mutazione applicata

use crate::entities::{RequestId, UserId};
use serde::{Deserialize, Serialize};

/// Tagged union per gli eventi dello store
/// Serde serializza questo come:
/// { "type": "Matched", "data": { "request_id": 1, "friend_id": "bob" } }
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum StoreEvent {
    Created { request_id: RequestId, creator_id: UserId },
    Notified { request_id: RequestId, friend_id: UserId },
    Matched { request_id: RequestId, friend_id: UserId },
    Declined { request_id: RequestId, friend_id: UserId },
    Cancelled { request_id: RequestId },
    Expired { request_id: RequestId },
}

impl StoreEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            StoreEvent::Created { request_id, .. }
            | StoreEvent::Notified { request_id, .. }
            | StoreEvent::Matched { request_id, .. }
            | StoreEvent::Declined { request_id, .. }
            | StoreEvent::Cancelled { request_id }
            | StoreEvent::Expired { request_id } => *request_id,
        }
    }
}
