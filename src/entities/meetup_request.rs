//! MeetupRequest entity - Entità richiesta di ketchup

use super::enums::RequestStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub type RequestId = i32;
pub type UserId = String;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MeetupRequest {
    pub id: RequestId,
    pub creator_id: UserId, // utente che ha proposto il ketchup
    pub status: RequestStatus,
    pub notified_friends: HashSet<UserId>, // amici a cui è già stato mostrato il prompt
    pub matched_friends: HashSet<UserId>,  // amici che hanno accettato
    // amici che hanno rifiutato o lasciato scadere il countdown: restano in notified_friends
    pub declined_friends: HashSet<UserId>,
    pub created_at: DateTime<Utc>,
}

impl MeetupRequest {
    pub fn new(id: RequestId, creator_id: impl Into<UserId>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            creator_id: creator_id.into(),
            status: RequestStatus::Pending,
            notified_friends: HashSet::new(),
            matched_friends: HashSet::new(),
            declined_friends: HashSet::new(),
            created_at,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    pub fn is_created_by(&self, user_id: &str) -> bool {
        self.creator_id == user_id
    }

    /// Delivery predicate: richiesta pending, non creata dal viewer e non ancora notificata al viewer
    pub fn should_deliver_to(&self, viewer_id: &str) -> bool {
        self.is_pending()
            && !self.is_created_by(viewer_id)
            && !self.notified_friends.contains(viewer_id)
    }

    /// Amici notificati che non hanno ancora risposto
    pub fn awaiting_response(&self) -> impl Iterator<Item = &UserId> {
        self.notified_friends
            .iter()
            .filter(|f| !self.matched_friends.contains(*f) && !self.declined_friends.contains(*f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_predicate() {
        let mut req = MeetupRequest::new(1, "alice", Utc::now());

        assert!(req.should_deliver_to("bob"));
        assert!(!req.should_deliver_to("alice"), "il creatore non riceve il proprio prompt");

        req.notified_friends.insert("bob".to_string());
        assert!(!req.should_deliver_to("bob"));
        assert!(req.should_deliver_to("carol"));

        req.status = RequestStatus::Cancelled;
        assert!(!req.should_deliver_to("carol"));
    }

    #[test]
    fn test_awaiting_response_excludes_answered_friends() {
        let mut req = MeetupRequest::new(1, "alice", Utc::now());
        for f in ["bob", "carol", "dave"] {
            req.notified_friends.insert(f.to_string());
        }
        req.matched_friends.insert("bob".to_string());
        req.declined_friends.insert("carol".to_string());

        let waiting: Vec<&UserId> = req.awaiting_response().collect();
        assert_eq!(waiting, vec!["dave"]);
    }
}
