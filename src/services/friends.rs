//! Friends service - Filtro della lista amici e gestione dei tag

use crate::core::AppError;
use crate::dtos::{FriendFilterDTO, UpdateFriendTagsDTO};
use crate::entities::Friend;
use dashmap::DashMap;
use tracing::{info, instrument, warn};
use validator::Validate;

/// Amici il cui nome contiene `search` (case-insensitive, vuota = tutti)
/// e, se un tag è selezionato, che hanno quel tag
pub fn filter_friends<'a>(
    friends: &'a [Friend],
    search: &str,
    tag: Option<&str>,
) -> Vec<&'a Friend> {
    let needle = search.to_lowercase();
    friends
        .iter()
        .filter(|f| needle.is_empty() || f.name.to_lowercase().contains(&needle))
        .filter(|f| tag.is_none_or(|t| f.has_tag(t)))
        .collect()
}

/// Tutti i tag usati dagli amici, senza duplicati, nell'ordine in cui compaiono
pub fn all_tags(friends: &[Friend]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in friends.iter().flat_map(|f| f.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Lista amici dell'utente corrente
pub struct FriendList {
    /// ordine di inserimento, usato per restituire liste stabili
    order: Vec<String>,
    friends: DashMap<String, Friend>,
}

impl FriendList {
    pub fn new(friends: Vec<Friend>) -> Self {
        let order = friends.iter().map(|f| f.id.clone()).collect();
        Self {
            order,
            friends: friends.into_iter().map(|f| (f.id.clone(), f)).collect(),
        }
    }

    pub fn all(&self) -> Vec<Friend> {
        self.order
            .iter()
            .filter_map(|id| self.friends.get(id).map(|f| f.value().clone()))
            .collect()
    }

    pub fn get(&self, friend_id: &str) -> Option<Friend> {
        self.friends.get(friend_id).map(|f| f.value().clone())
    }

    /// Applica i filtri della schermata amici
    pub fn filtered(&self, filter: &FriendFilterDTO) -> Result<Vec<Friend>, AppError> {
        filter.validate()?;
        let all = self.all();
        Ok(filter_friends(&all, &filter.search, filter.tag.as_deref())
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn tags(&self) -> Vec<String> {
        all_tags(&self.all())
    }

    /// Sostituisce i tag di un amico
    #[instrument(skip(self, body))]
    pub fn update_friend_tags(
        &self,
        friend_id: &str,
        body: UpdateFriendTagsDTO,
    ) -> Result<Friend, AppError> {
        body.validate().map_err(|e| {
            warn!("Invalid tags update: {}", e);
            AppError::from(e)
        })?;

        let mut friend = self.friends.get_mut(friend_id).ok_or_else(|| {
            warn!("Friend not found");
            AppError::not_found("Friend not found")
        })?;

        let mut tags: Vec<String> = Vec::with_capacity(body.tags.len());
        for tag in body.tags.into_iter().map(|t| t.trim().to_string()) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        friend.tags = tags;
        info!(tags = friend.tags.len(), "Friend tags updated");

        Ok(friend.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn friends() -> Vec<Friend> {
        vec![
            Friend::new("f1", "Sarah Johnson", &["work", "climbing"]),
            Friend::new("f2", "Mike Chen", &["college"]),
            Friend::new("f3", "Emma Wilson", &["work"]),
        ]
    }

    #[test]
    fn test_all_tags_first_seen_order() {
        assert_eq!(all_tags(&friends()), vec!["work", "climbing", "college"]);
    }

    #[test]
    fn test_update_tags_dedups_and_trims() {
        let list = FriendList::new(friends());
        let updated = list
            .update_friend_tags(
                "f2",
                UpdateFriendTagsDTO {
                    tags: vec!["gym ".to_string(), "gym".to_string(), "college".to_string()],
                },
            )
            .unwrap();
        assert_eq!(updated.tags, vec!["gym", "college"]);
        assert_eq!(list.get("f2").unwrap().tags, vec!["gym", "college"]);
        assert_eq!(list.tags(), vec!["work", "climbing", "gym", "college"]);
    }

    #[test]
    fn test_update_tags_unknown_friend() {
        let list = FriendList::new(friends());
        let err = list
            .update_friend_tags("nobody", UpdateFriendTagsDTO { tags: vec![] })
            .unwrap_err();
        assert_eq!(err.kind(), crate::core::ErrorKind::NotFound);
    }
}
