//! Integration tests per il filtro della lista amici

#[cfg(test)]
mod friends_filter_tests {
    use ketchup::dtos::FriendFilterDTO;
    use ketchup::entities::Friend;
    use ketchup::services::{FriendList, all_tags, filter_friends};

    fn friends() -> Vec<Friend> {
        vec![
            Friend::new("f1", "Sarah Johnson", &["work", "climbing"]),
            Friend::new("f2", "Mike Chen", &["college"]),
            Friend::new("f3", "Emma Wilson", &["work"]),
            Friend::new("f4", "Jonah Hill", &[]),
        ]
    }

    /// Definizione insiemistica del filtro, usata come riferimento
    fn expected(friends: &[Friend], search: &str, tag: Option<&str>) -> Vec<String> {
        friends
            .iter()
            .filter(|f| search.is_empty() || f.name.to_lowercase().contains(&search.to_lowercase()))
            .filter(|f| match tag {
                None => true,
                Some(t) => f.tags.iter().any(|ft| ft == t),
            })
            .map(|f| f.id.clone())
            .collect()
    }

    #[test]
    fn test_filter_matches_set_definition() {
        let friends = friends();
        let searches = ["", "j", "JO", "son", "mike", "xyz", " ", "n h"];
        let tags = [None, Some("work"), Some("climbing"), Some("college"), Some("missing")];

        for search in searches {
            for tag in tags {
                let got: Vec<String> = filter_friends(&friends, search, tag)
                    .into_iter()
                    .map(|f| f.id.clone())
                    .collect();
                assert_eq!(
                    got,
                    expected(&friends, search, tag),
                    "search {:?} tag {:?}",
                    search,
                    tag
                );
            }
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let friends = friends();
        let got: Vec<&str> = filter_friends(&friends, "JOHN", None)
            .into_iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(got, vec!["Sarah Johnson"]);
    }

    #[test]
    fn test_friend_list_applies_filter_dto() {
        let list = FriendList::new(friends());
        let mut filter = FriendFilterDTO {
            search: "o".to_string(),
            tag: None,
        };
        filter.toggle_tag("work");

        let got: Vec<String> = list
            .filtered(&filter)
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(got, vec!["f1", "f3"]);

        filter.toggle_tag("work");
        let got = list.filtered(&filter).unwrap();
        assert_eq!(got.len(), 3, "Mike Chen non contiene la o");
    }

    #[test]
    fn test_filter_rejects_oversized_search() {
        let list = FriendList::new(friends());
        let filter = FriendFilterDTO {
            search: "a".repeat(101),
            tag: None,
        };
        assert!(list.filtered(&filter).is_err());
    }

    #[test]
    fn test_all_tags_unique() {
        assert_eq!(all_tags(&friends()), vec!["work", "climbing", "college"]);
        assert!(all_tags(&[]).is_empty());
    }
}
