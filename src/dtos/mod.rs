//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene i DTOs esposti al layer di presentazione.
//! I DTOs separano la rappresentazione esterna (view) dalla rappresentazione interna (entities).

pub mod friend;
pub mod meetup_request;
pub mod prompt;
pub mod store_event;

// Re-exports per facilitare l'import
pub use friend::{FriendFilterDTO, UpdateFriendTagsDTO};
pub use meetup_request::MeetupRequestDTO;
pub use prompt::PromptView;
pub use store_event::StoreEvent;
