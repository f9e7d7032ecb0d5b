//! Prompt DTO - Stato del prompt urgente esposto alla view

use super::MeetupRequestDTO;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PromptView {
    pub active_request: Option<MeetupRequestDTO>,
    pub seconds_remaining: u64,
}

impl PromptView {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active_request.is_some()
    }
}
