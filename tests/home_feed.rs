//! Integration tests per le sezioni della home

#[cfg(test)]
mod home_feed_tests {
    use ketchup::entities::{Friend, MatchPolicy, RequestStatus};
    use ketchup::services::HomeFeed;
    use ketchup::{AppState, Config, RequestStore};

    fn state() -> AppState {
        let config = Config {
            viewer_id: "current-user".to_string(),
            match_policy: MatchPolicy::Exclusive,
            ..Config::default()
        };
        AppState::new(config, vec![Friend::new("sarah", "Sarah Johnson", &["work"])])
    }

    #[test]
    fn test_empty_home() {
        let state = state();
        let feed = state.home_feed();
        assert!(feed.is_empty());
        assert_eq!(feed, HomeFeed::default());
    }

    #[test]
    fn test_sections() {
        let state = state();
        let mine = state.requests.create("current-user");
        state.requests.notify_friend(&mine.id, "sarah").unwrap();
        state.requests.notify_friend(&mine.id, "mike").unwrap();
        state.requests.decline_or_expire(&mine.id, "mike").unwrap();
        let incoming = state.requests.create("sarah");
        let matched = state.requests.create("sarah");
        state.requests.notify_friend(&matched.id, "current-user").unwrap();
        state.requests.match_ketchup(&matched.id, "current-user").unwrap();
        let cancelled = state.requests.create("current-user");
        state.requests.cancel(&cancelled.id, "current-user").unwrap();

        let feed = state.home_feed();
        assert!(!feed.is_empty());
        assert_eq!(feed.my_pending.iter().map(|r| r.id).collect::<Vec<_>>(), vec![mine.id]);
        assert_eq!(feed.incoming.iter().map(|r| r.id).collect::<Vec<_>>(), vec![incoming.id]);
        assert_eq!(feed.upcoming.iter().map(|r| r.id).collect::<Vec<_>>(), vec![matched.id]);
        assert_eq!(feed.upcoming[0].status, RequestStatus::Matched);
        assert_eq!(feed.upcoming[0].matched_friends, vec!["current-user"]);

        // chi ha già risposto non è più in attesa
        assert_eq!(feed.my_pending[0].awaiting_friends, vec!["sarah"]);
        assert!(feed.upcoming[0].awaiting_friends.is_empty());
    }

    #[test]
    fn test_feed_serializes_for_the_view() {
        let state = state();
        state.requests.create("sarah");
        let value = serde_json::to_value(state.home_feed()).unwrap();
        assert_eq!(value["incoming"][0]["status"], "pending");
        assert_eq!(value["incoming"][0]["creator_id"], "sarah");
    }
}
