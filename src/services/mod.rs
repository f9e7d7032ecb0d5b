//! Services module - Logica derivata usata dalle schermate
//!
//! - `home_feed`: sezioni della home calcolate dallo store
//! - `friends`: filtro della lista amici e gestione dei tag

pub mod friends;
pub mod home_feed;

// Re-exports per facilitare l'import
pub use friends::{FriendList, all_tags, filter_friends};
pub use home_feed::HomeFeed;
