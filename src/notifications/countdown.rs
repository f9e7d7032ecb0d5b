//! Countdown - Timer del prompt armato

use crate::dtos::PromptView;
use crate::entities::RequestId;
use tokio::sync::watch;
use tokio::time::{Duration, Instant, interval_at, sleep_until};
use tracing::{debug, instrument};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Secondi rimanenti arrotondati per eccesso: 0.2s rimanenti vengono mostrati come 1
pub fn seconds_remaining(deadline: Instant, now: Instant) -> u64 {
    let remaining = deadline.saturating_duration_since(now);
    let secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 { secs + 1 } else { secs }
}

/// Attende la scadenza aggiornando ogni secondo `seconds_remaining` nella view.
///
/// Ritorna solo alla scadenza; la cancellazione avviene abortendo il task che la esegue.
#[instrument(skip(view_tx))]
pub async fn run_countdown(
    request_id: RequestId,
    deadline: Instant,
    view_tx: watch::Sender<PromptView>,
) {
    let mut ticker = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    let expired = sleep_until(deadline);
    tokio::pin!(expired);

    loop {
        tokio::select! {
            _ = &mut expired => break,
            _ = ticker.tick() => {
                let remaining = seconds_remaining(deadline, Instant::now());
                // aggiorna solo se la view mostra ancora questa richiesta
                view_tx.send_if_modified(|view| match &view.active_request {
                    Some(active) if active.id == request_id && view.seconds_remaining != remaining => {
                        view.seconds_remaining = remaining;
                        true
                    }
                    _ => false,
                });
            }
        }
    }

    debug!("Countdown reached zero");
}
