//! Ketchup - store delle richieste di ketchup e controller del prompt urgente
//!
//! Espone i moduli principali per il binario demo e per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod notifications;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, Config, ErrorKind};
pub use notifications::{ControllerPhase, NotificationController};
pub use repositories::{InMemoryRequestStore, RequestStore};
