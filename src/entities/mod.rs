//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene le entità che rappresentano i dati gestiti dallo store.
//! Lo store è in memoria: la sincronizzazione con il backend è responsabilità esterna.

pub mod enums;
pub mod friend;
pub mod meetup_request;

// Re-exports per facilitare l'import
pub use enums::{DeliveryMode, MatchPolicy, RequestStatus};
pub use friend::Friend;
pub use meetup_request::{MeetupRequest, RequestId, UserId};
