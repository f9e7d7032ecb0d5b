//! Home feed - Sezioni della home screen

use crate::dtos::MeetupRequestDTO;
use crate::entities::{MeetupRequest, RequestStatus};
use crate::repositories::RequestStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct HomeFeed {
    /// "Upcoming Ketchups": richieste Matched
    pub upcoming: Vec<MeetupRequestDTO>,
    /// "Pending Ketchups" create dal viewer
    pub my_pending: Vec<MeetupRequestDTO>,
    /// richieste pending di altri utenti
    pub incoming: Vec<MeetupRequestDTO>,
}

impl HomeFeed {
    /// Costruisce la home leggendo lo store (snapshot al momento della chiamata)
    #[instrument(skip(store))]
    pub fn build(store: &dyn RequestStore, viewer_id: &str) -> Self {
        let (my_pending, incoming): (Vec<MeetupRequest>, Vec<MeetupRequest>) = store
            .list_by_status(RequestStatus::Pending)
            .into_iter()
            .partition(|r| r.is_created_by(viewer_id));

        let feed = Self {
            upcoming: store
                .list_by_status(RequestStatus::Matched)
                .into_iter()
                .map(Into::into)
                .collect(),
            my_pending: my_pending.into_iter().map(Into::into).collect(),
            incoming: incoming.into_iter().map(Into::into).collect(),
        };

        debug!(
            upcoming = feed.upcoming.len(),
            my_pending = feed.my_pending.len(),
            incoming = feed.incoming.len(),
            "Home feed built"
        );
        feed
    }

    /// Nessun ketchup pending né matched: la home mostra l'empty state
    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.my_pending.is_empty() && self.incoming.is_empty()
    }
}
