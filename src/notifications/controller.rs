//! Notification Controller - Macchina a stati del prompt per il viewer corrente

use super::countdown::{run_countdown, seconds_remaining};
use crate::core::Config;
use crate::dtos::{PromptView, StoreEvent};
use crate::entities::{DeliveryMode, MeetupRequest, RequestId, RequestStatus, UserId};
use crate::repositories::RequestStore;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tracing::{debug, info, instrument, warn};

/// Fase osservabile del controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    Idle,
    Armed { request_id: RequestId },
}

/// Come si è chiuso un prompt (stato Resolved, transitorio)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Accepted,
    Declined,
    TimedOut,
    /// la richiesta è stata cancellata o è scaduta mentre il prompt era visibile
    Dismissed,
}

struct ArmedPrompt {
    /// numero di sequenza del prompt: un timeout risolve solo il prompt che l'ha generato
    prompt_id: u64,
    request: MeetupRequest,
    deadline: Instant,
    timer: JoinHandle<()>,
}

enum ControllerState {
    Idle,
    Armed(ArmedPrompt),
}

struct Inner {
    store: Arc<dyn RequestStore>,
    viewer_id: UserId,
    countdown: Duration,
    mode: DeliveryMode,
    state: Mutex<ControllerState>,
    view_tx: watch::Sender<PromptView>,
    next_prompt: AtomicU64,
    closed: AtomicBool,
}

/// Controller del prompt urgente.
///
/// Va costruito dentro un runtime tokio: in modalità `Continuous` avvia un task che
/// ascolta gli eventi dello store. Il drop del controller rilascia timer e sottoscrizione.
///
/// Un solo controller per viewer: `AppState` lo crea una volta e ne condivide l'`Arc`.
pub struct NotificationController {
    inner: Arc<Inner>,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl NotificationController {
    pub fn new(
        store: Arc<dyn RequestStore>,
        viewer_id: impl Into<UserId>,
        countdown: Duration,
        mode: DeliveryMode,
    ) -> Self {
        // sottoscrizione prima di qualsiasi scan, così nessun evento va perso
        let events = store.subscribe();
        let (view_tx, _) = watch::channel(PromptView::idle());

        let inner = Arc::new(Inner {
            store,
            viewer_id: viewer_id.into(),
            countdown,
            mode,
            state: Mutex::new(ControllerState::Idle),
            view_tx,
            next_prompt: AtomicU64::new(1),
            closed: AtomicBool::new(false),
        });

        let watcher = match mode {
            DeliveryMode::Continuous => {
                Some(tokio::spawn(watch_store(Arc::downgrade(&inner), events)))
            }
            DeliveryMode::OneShot => None,
        };

        info!(viewer = %inner.viewer_id, ?mode, "Notification controller created");
        Self {
            inner,
            watcher: Mutex::new(watcher),
        }
    }

    pub fn from_config(store: Arc<dyn RequestStore>, config: &Config) -> Self {
        Self::new(
            store,
            config.viewer_id.clone(),
            config.countdown(),
            config.delivery_mode,
        )
    }

    /// (Ri)attiva il controller: se non c'è un prompt attivo cerca la prima richiesta da mostrare
    ///
    /// # Returns
    /// `true` se il controller è Armed dopo la chiamata
    pub async fn activate(&self) -> bool {
        let mut state = self.inner.state.lock().await;
        if self.inner.closed.load(Ordering::SeqCst) {
            return false;
        }
        self.inner.scan_locked(&mut state);
        matches!(*state, ControllerState::Armed(_))
    }

    /// Il viewer accetta il prompt attivo
    ///
    /// # Returns
    /// `true` se c'era un prompt da risolvere
    pub async fn accept(&self) -> bool {
        self.inner.resolve_active(Resolution::Accepted).await
    }

    /// Il viewer rifiuta il prompt attivo
    pub async fn decline(&self) -> bool {
        self.inner.resolve_active(Resolution::Declined).await
    }

    pub async fn phase(&self) -> ControllerPhase {
        match &*self.inner.state.lock().await {
            ControllerState::Idle => ControllerPhase::Idle,
            ControllerState::Armed(prompt) => ControllerPhase::Armed {
                request_id: prompt.request.id,
            },
        }
    }

    /// Stato corrente per la view, con i secondi calcolati al momento della chiamata
    pub async fn snapshot(&self) -> PromptView {
        match &*self.inner.state.lock().await {
            ControllerState::Idle => PromptView::idle(),
            ControllerState::Armed(prompt) => PromptView {
                active_request: Some(prompt.request.clone().into()),
                seconds_remaining: seconds_remaining(prompt.deadline, Instant::now()),
            },
        }
    }

    /// Receiver aggiornato ad ogni cambio di prompt e ad ogni secondo del countdown
    pub fn watch(&self) -> watch::Receiver<PromptView> {
        self.inner.view_tx.subscribe()
    }

    /// Teardown esplicito: ferma la sottoscrizione e il countdown senza toccare lo store
    #[instrument(skip(self), fields(viewer = %self.inner.viewer_id))]
    pub async fn shutdown(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        if let Some(watcher) = self.watcher.lock().await.take() {
            watcher.abort();
        }

        let mut state = self.inner.state.lock().await;
        if let ControllerState::Armed(prompt) = std::mem::replace(&mut *state, ControllerState::Idle) {
            prompt.timer.abort();
            debug!(request_id = prompt.request.id, "Active prompt dropped on shutdown");
        }
        self.inner.view_tx.send_replace(PromptView::idle());
        info!("Notification controller shut down");
    }

    #[cfg(test)]
    async fn active_prompt_id(&self) -> Option<u64> {
        match &*self.inner.state.lock().await {
            ControllerState::Armed(prompt) => Some(prompt.prompt_id),
            ControllerState::Idle => None,
        }
    }
}

impl Drop for NotificationController {
    fn drop(&mut self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        if let Some(watcher) = self.watcher.get_mut().take() {
            watcher.abort();
        }
        // se il lock è occupato il timer sta già risolvendo il prompt e vedrà `closed`
        if let Ok(mut state) = self.inner.state.try_lock() {
            if let ControllerState::Armed(prompt) = std::mem::replace(&mut *state, ControllerState::Idle) {
                prompt.timer.abort();
            }
        }
    }
}

impl Inner {
    /// Idle -> Armed sulla prima richiesta che soddisfa il delivery predicate, in ordine di creazione
    fn scan_locked(self: &Arc<Self>, state: &mut ControllerState) {
        if matches!(state, ControllerState::Armed(_)) {
            return;
        }
        // una risoluzione partita prima del teardown non deve notificare né armare altro
        if self.closed.load(Ordering::SeqCst) {
            debug!("Controller closed, scan skipped");
            return;
        }

        let candidates = self
            .store
            .list_by_status(RequestStatus::Pending)
            .into_iter()
            .filter(|r| r.should_deliver_to(&self.viewer_id));

        for candidate in candidates {
            // registrazione idempotente: da qui in poi il viewer risulta notificato
            match self.store.notify_friend(&candidate.id, &self.viewer_id) {
                Ok(request) => {
                    self.arm(state, request);
                    return;
                }
                Err(e) => {
                    debug!(request_id = candidate.id, error = %e, "Candidate skipped");
                }
            }
        }
    }

    fn arm(self: &Arc<Self>, state: &mut ControllerState, request: MeetupRequest) {
        let prompt_id = self.next_prompt.fetch_add(1, Ordering::SeqCst);
        let deadline = Instant::now() + self.countdown;
        let timer = tokio::spawn(expire_at(
            Arc::downgrade(self),
            prompt_id,
            request.id,
            deadline,
            self.view_tx.clone(),
        ));

        info!(
            request_id = request.id,
            creator = %request.creator_id,
            countdown_secs = self.countdown.as_secs(),
            "Prompt armed"
        );

        self.view_tx.send_replace(PromptView {
            active_request: Some(request.clone().into()),
            seconds_remaining: seconds_remaining(deadline, Instant::now()),
        });
        *state = ControllerState::Armed(ArmedPrompt {
            prompt_id,
            request,
            deadline,
            timer,
        });
    }

    /// Armed -> Resolved -> Idle. In modalità continua cerca subito il prompt successivo.
    fn finish_locked(
        self: &Arc<Self>,
        state: &mut ControllerState,
        request_id: RequestId,
        resolution: Resolution,
    ) {
        *state = ControllerState::Idle;
        self.view_tx.send_replace(PromptView::idle());
        info!(request_id, ?resolution, "Prompt resolved");

        if self.mode == DeliveryMode::Continuous {
            self.scan_locked(state);
        }
    }

    #[instrument(skip(self), fields(viewer = %self.viewer_id))]
    async fn resolve_active(self: &Arc<Self>, resolution: Resolution) -> bool {
        let mut state = self.state.lock().await;
        let prompt = match std::mem::replace(&mut *state, ControllerState::Idle) {
            ControllerState::Armed(prompt) => prompt,
            ControllerState::Idle => {
                debug!("No active prompt to resolve");
                return false;
            }
        };
        prompt.timer.abort();

        let request_id = prompt.request.id;
        let outcome = match resolution {
            Resolution::Accepted => self.store.match_ketchup(&request_id, &self.viewer_id),
            _ => self.store.decline_or_expire(&request_id, &self.viewer_id),
        };
        if let Err(e) = outcome {
            // nessun effetto: la view rilegge lo stato dello store
            warn!(request_id, error = %e, "Viewer action had no effect");
        }

        self.finish_locked(&mut state, request_id, resolution);
        true
    }

    /// Timeout del prompt `prompt_id`: decline implicito
    #[instrument(skip(self), fields(viewer = %self.viewer_id))]
    async fn expire(self: &Arc<Self>, prompt_id: u64) -> bool {
        let mut state = self.state.lock().await;
        if self.closed.load(Ordering::SeqCst) {
            return false;
        }

        let request_id = match &*state {
            ControllerState::Armed(prompt) if prompt.prompt_id == prompt_id => prompt.request.id,
            _ => {
                debug!("Stale timeout ignored");
                return false;
            }
        };
        // il task del timer è quello in esecuzione: niente abort, il JoinHandle viene solo rilasciato
        *state = ControllerState::Idle;

        if let Err(e) = self.store.decline_or_expire(&request_id, &self.viewer_id) {
            debug!(request_id, error = %e, "Timeout decline had no effect");
        }

        self.finish_locked(&mut state, request_id, Resolution::TimedOut);
        true
    }

    /// Reazione ad un evento dello store
    async fn on_store_event(self: &Arc<Self>, event: Option<StoreEvent>) {
        let mut state = self.state.lock().await;
        if self.closed.load(Ordering::SeqCst) {
            return;
        }

        let active = match &*state {
            ControllerState::Armed(prompt) => Some(prompt.request.id),
            ControllerState::Idle => None,
        };
        let Some(request_id) = active else {
            self.scan_locked(&mut state);
            return;
        };

        let touches_active = event.as_ref().is_none_or(|e| e.request_id() == request_id);
        if !touches_active {
            return;
        }

        let closed = self
            .store
            .read(&request_id)
            .is_none_or(|r| matches!(r.status, RequestStatus::Cancelled | RequestStatus::Expired));
        if closed {
            if let ControllerState::Armed(prompt) = std::mem::replace(&mut *state, ControllerState::Idle) {
                prompt.timer.abort();
            }
            self.finish_locked(&mut state, request_id, Resolution::Dismissed);
        }
    }
}

async fn expire_at(
    inner: Weak<Inner>,
    prompt_id: u64,
    request_id: RequestId,
    deadline: Instant,
    view_tx: watch::Sender<PromptView>,
) {
    run_countdown(request_id, deadline, view_tx).await;

    if let Some(inner) = inner.upgrade() {
        inner.expire(prompt_id).await;
    }
}

/// Task che ascolta lo store e ricontrolla le richieste pending (modalità continua)
async fn watch_store(inner: Weak<Inner>, events: tokio::sync::broadcast::Receiver<StoreEvent>) {
    let mut events = BroadcastStream::new(events);

    while let Some(item) = events.next().await {
        let Some(inner) = inner.upgrade() else {
            break;
        };

        let event = match item {
            Ok(event) => {
                debug!(?event, "Store event received");
                Some(event)
            }
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                // eventi persi: si ricontrolla tutto
                warn!(skipped, "Store events lagged, rescanning");
                None
            }
        };

        inner.on_store_event(event).await;
    }

    debug!("Store watcher terminated");
}
