//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Lo store delle richieste è esposto come trait (`RequestStore`) in modo che view,
//! controller e test ricevano la dipendenza esplicitamente invece di raggiungere
//! uno store globale.

// ************************* MODULI REPOSITORY ************************* //

pub mod meetup_request;
pub mod traits;

// Re-esportazione dei trait per facilitare l'import
pub use traits::RequestStore;

// Re-esportazione delle struct dei repository per facilitare l'import
pub use meetup_request::InMemoryRequestStore;
