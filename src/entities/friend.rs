//! Friend entity - Entità amico nella lista dell'utente

use serde::{Deserialize, Serialize};

use super::UserId;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Friend {
    pub id: UserId,
    pub name: String,
    pub tags: Vec<String>, // es. "work", "climbing"
}

impl Friend {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
