//! Notifications Module - Prompt urgente per il viewer corrente
//!
//! Questo modulo decide quale richiesta pending (al massimo una) mostrare al viewer
//! come prompt con countdown. Include:
//! - Macchina a stati Idle -> Armed -> Resolved -> Idle
//! - Countdown con cancellazione su accept, decline, timeout e teardown
//! - Sottoscrizione agli eventi dello store per ricontrollare le richieste pending

pub mod controller;
pub mod countdown;

// Re-exports pubblici
pub use controller::{ControllerPhase, NotificationController, Resolution};
