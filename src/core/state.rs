//! Application State - Dipendenze della sessione costruite esplicitamente
//!
//! Store e lista amici vengono creati qui e passati a chi li usa (controller, view),
//! invece di essere raggiunti come singleton globali.

use crate::core::Config;
use crate::entities::Friend;
use crate::notifications::NotificationController;
use crate::repositories::{InMemoryRequestStore, RequestStore};
use crate::services::{FriendList, HomeFeed};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Stato della sessione condiviso tra controller e layer di presentazione
pub struct AppState {
    pub config: Config,

    /// Store delle richieste di ketchup
    pub requests: Arc<dyn RequestStore>,

    /// Lista amici del viewer
    pub friends: FriendList,

    /// Controller delle notifiche del viewer, creato al primo utilizzo
    controller: OnceCell<Arc<NotificationController>>,
}

impl AppState {
    /// Crea una nuova istanza di AppState con uno store in memoria configurato da `config`
    ///
    /// # Arguments
    /// * `config` - Configurazione della sessione
    /// * `friends` - Amici del viewer corrente
    pub fn new(config: Config, friends: Vec<Friend>) -> Self {
        let store = InMemoryRequestStore::new(config.match_policy, config.event_capacity);
        Self::with_store(config, Arc::new(store), friends)
    }

    /// Come `new`, ma con uno store fornito dal chiamante (es. uno store sincronizzato col backend)
    pub fn with_store(
        config: Config,
        requests: Arc<dyn RequestStore>,
        friends: Vec<Friend>,
    ) -> Self {
        Self {
            config,
            requests,
            friends: FriendList::new(friends),
            controller: OnceCell::new(),
        }
    }

    /// Controller delle notifiche per il viewer configurato. Richiede un runtime tokio attivo.
    ///
    /// Tutte le chiamate ritornano lo stesso controller: il viewer ha al massimo un prompt attivo.
    pub async fn notification_controller(&self) -> Arc<NotificationController> {
        self.controller
            .get_or_init(|| async {
                Arc::new(NotificationController::from_config(
                    self.requests.clone(),
                    &self.config,
                ))
            })
            .await
            .clone()
    }

    pub fn home_feed(&self) -> HomeFeed {
        HomeFeed::build(self.requests.as_ref(), &self.config.viewer_id)
    }
}
