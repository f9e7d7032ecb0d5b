//! Friend DTOs - Filtri e aggiornamenti della lista amici

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Stato dei filtri della schermata amici
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Validate)]
pub struct FriendFilterDTO {
    #[validate(length(max = 100, message = "Search must be at most 100 characters"))]
    pub search: String,
    pub tag: Option<String>,
}

impl FriendFilterDTO {
    /// Premere il tag già selezionato lo deseleziona
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.tag.as_deref() == Some(tag) {
            self.tag = None;
        } else {
            self.tag = Some(tag.to_string());
        }
    }
}

/// DTO per sostituire i tag di un amico
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct UpdateFriendTagsDTO {
    #[validate(
        length(max = 20, message = "A friend can have at most 20 tags"),
        custom(function = "validate_tags")
    )]
    pub tags: Vec<String>,
}

#[allow(clippy::ptr_arg)]
fn validate_tags(tags: &Vec<String>) -> Result<(), ValidationError> {
    if tags.iter().any(|t| t.trim().is_empty() || t.chars().count() > 32) {
        return Err(ValidationError::new("tag_length"));
    }
    Ok(())
}
