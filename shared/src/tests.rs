#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use crate::error::{StorageError, StoreError};
    use crate::service::{load_votes, save_votes, try_load_votes, try_save_votes, VoteService};
    use crate::storage::{KeyValueStorage, MemoryStorage, VOTES_STORAGE_KEY};
    use crate::validation::{hall_of_fame_limit, parse_vote, parse_vote_value, validate_page_id, validate_voter_id, ValidationError};
    use crate::vote_logic::{Vote, VoteError, VoteStore, HALL_OF_FAME_THRESHOLD};

    fn service() -> VoteService<MemoryStorage> {
        VoteService::open(MemoryStorage::new())
    }

    fn upvotes(service: &mut VoteService<MemoryStorage>, page: &str, voters: impl IntoIterator<Item = String>) {
        voters.into_iter().for_each(|voter| service.cast_vote(page, &voter, Vote::Up));
    }

    fn voters(prefix: &str, n: usize) -> impl Iterator<Item = String> + '_ {
        (0..n).map(move |i| format!("{prefix}-{i}"))
    }

    #[test]
    fn test_vote_values() {
        assert_eq!(Vote::try_from(1), Ok(Vote::Up));
        assert_eq!(Vote::try_from(-1), Ok(Vote::Down));
        assert!(matches!(Vote::try_from(0), Err(VoteError::InvalidVote(0))));
        assert!(matches!(Vote::try_from(2), Err(VoteError::InvalidVote(2))));
        assert_eq!(i8::from(Vote::Down), -1);
    }

    #[test]
    fn test_unvoted_page_scores_zero() {
        let s = service();
        assert_eq!(s.score_of("nobody-voted"), 0);
        assert!(!s.is_hall_of_fame("nobody-voted"));
        assert!(s.page_votes("nobody-voted").is_empty());
    }

    #[test]
    fn test_recast_overwrites() {
        let mut s = service();
        s.cast_vote("p", "alice", Vote::Up);
        s.cast_vote("p", "alice", Vote::Up);
        assert_eq!(s.score_of("p"), 1);

        s.cast_vote("p", "alice", Vote::Down);
        assert_eq!(s.score_of("p"), -1);
        assert_eq!(s.current_vote("p", Some("alice")), Some(Vote::Down));
        assert_eq!(s.page_votes("p").len(), 1);
    }

    #[test]
    fn test_hall_of_fame_threshold_is_strict() {
        let mut s = service();
        upvotes(&mut s, "p", voters("v", 10));
        assert_eq!(s.score_of("p"), 10);
        assert!(!s.is_hall_of_fame("p"));
        assert!(s.hall_of_fame_ids().is_empty());

        s.cast_vote("p", "one-more", Vote::Up);
        assert_eq!(s.score_of("p"), 11);
        assert!(s.is_hall_of_fame("p"));
        assert_eq!(s.hall_of_fame_ids(), HashSet::from(["p".to_string()]));
    }

    #[test]
    fn test_membership_matches_score_for_every_page() {
        let mut s = service();
        for (page, n) in [("a", 9), ("b", 10), ("c", 11), ("d", 15)] {
            upvotes(&mut s, page, voters(page, n));
        }
        s.cast_vote("d", "d-0", Vote::Down);
        for page in ["a", "b", "c", "d", "missing"] {
            assert_eq!(s.is_hall_of_fame(page), s.score_of(page) > HALL_OF_FAME_THRESHOLD, "page {page}");
        }
        assert_eq!(s.hall_of_fame_ids(), HashSet::from(["c".to_string(), "d".to_string()]));
    }

    #[test]
    fn test_custom_threshold() {
        let mut store = VoteStore::new();
        store.record("p", "a", Vote::Up);
        store.record("q", "a", Vote::Down);
        assert_eq!(store.hall_of_fame_ids(0), HashSet::from(["p".to_string()]));
        assert_eq!(store.hall_of_fame_ids(-2).len(), 2);
        assert!(store.hall_of_fame_ids(1).is_empty());
    }

    #[test]
    fn test_hall_of_fame_ranking() {
        let mut s = service();
        upvotes(&mut s, "low", voters("l", 11));
        upvotes(&mut s, "high", voters("h", 13));
        upvotes(&mut s, "tied", voters("t", 11));
        upvotes(&mut s, "out", voters("o", 10));

        let ranked = s.hall_of_fame(10);
        let ids: Vec<_> = ranked.iter().map(|r| r.page_id.as_str()).collect();
        assert_eq!(ids, ["high", "low", "tied"]);
        assert_eq!(ranked[0].score, 13);

        assert_eq!(s.hall_of_fame(1).len(), 1);
    }

    #[test]
    fn test_voting_scenario() {
        let mut s = service();
        s.cast_vote("P", "A", Vote::Up);
        assert_eq!(s.score_of("P"), 1);
        assert!(!s.is_hall_of_fame("P"));

        s.cast_vote("P", "A", Vote::Down);
        assert_eq!(s.score_of("P"), -1);

        let mut eleven: Vec<String> = voters("V", 10).collect();
        eleven.push("A".into());
        upvotes(&mut s, "P", eleven);
        assert_eq!(s.score_of("P"), 11);
        assert!(s.is_hall_of_fame("P"));
    }

    #[test]
    fn test_eleven_new_voters_after_downvote_stop_at_ten() {
        let mut s = service();
        s.cast_vote("P", "A", Vote::Up);
        s.cast_vote("P", "A", Vote::Down);
        upvotes(&mut s, "P", voters("V", 11));
        assert_eq!(s.score_of("P"), 10);
        assert!(!s.is_hall_of_fame("P"));
    }

    #[test]
    fn test_current_vote() {
        let mut s = service();
        s.cast_vote("P", "A", Vote::Up);
        assert_eq!(s.current_vote("P", Some("A")), Some(Vote::Up));
        assert_eq!(s.current_vote("P", Some("unknown-voter")), None);
        assert_eq!(s.current_vote("P", None), None);
        assert_eq!(s.current_vote("other", Some("A")), None);
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut store = VoteStore::new();
        store.record("p1", "a", Vote::Up);
        store.record("p1", "b", Vote::Down);
        store.record("p2", "a", Vote::Up);

        let mut storage = MemoryStorage::new();
        save_votes(&mut storage, &store);
        assert_eq!(load_votes(&storage), store);
    }

    #[test]
    fn test_persisted_format() {
        let storage = MemoryStorage::new().with_entry(VOTES_STORAGE_KEY, r#"{"page":{"alice":1,"bob":-1}}"#);
        let s = VoteService::open(storage);
        assert_eq!(s.score_of("page"), 0);
        assert_eq!(s.current_vote("page", Some("bob")), Some(Vote::Down));

        let mut storage = MemoryStorage::new();
        let mut store = VoteStore::new();
        store.record("page", "alice", Vote::Down);
        save_votes(&mut storage, &store);
        assert_eq!(storage.raw(VOTES_STORAGE_KEY), Some(r#"{"page":{"alice":-1}}"#));
    }

    #[test]
    fn test_malformed_data_loads_empty() {
        for raw in ["not json", r#"{"page":{"alice":2}}"#, r#"{"page":{"alice":"up"}}"#, "[1,2,3]", ""] {
            let storage = MemoryStorage::new().with_entry(VOTES_STORAGE_KEY, raw);
            assert!(load_votes(&storage).is_empty(), "raw {raw:?}");
            assert!(matches!(try_load_votes(&storage), Err(StoreError::Malformed(_))), "raw {raw:?}");
        }
        assert!(try_load_votes(&MemoryStorage::new()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_data_is_replaced_on_next_cast() {
        let storage = MemoryStorage::new().with_entry(VOTES_STORAGE_KEY, "{broken");
        let mut s = VoteService::open(storage);
        s.cast_vote("p", "a", Vote::Up);
        assert_eq!(load_votes(s.storage()).score("p"), 1);
    }

    #[test]
    fn test_failed_save_keeps_vote_in_memory_until_reload() {
        let mut s = VoteService::open(MemoryStorage::with_quota(0));
        s.cast_vote("p", "a", Vote::Up);
        assert_eq!(s.score_of("p"), 1);
        assert_eq!(s.storage().raw(VOTES_STORAGE_KEY), None);

        s.reload();
        assert_eq!(s.score_of("p"), 0);
    }

    #[test]
    fn test_strict_save_reports_quota() {
        let mut store = VoteStore::new();
        store.record("p", "a", Vote::Up);
        let mut storage = MemoryStorage::with_quota(4);
        assert!(matches!(
            try_save_votes(&mut storage, &store),
            Err(StoreError::Storage(StorageError::QuotaExceeded { quota: 4, .. }))
        ));
        assert!(storage.set("k", "tiny").is_ok());
    }

    #[test]
    fn test_votes_survive_reopen() {
        let mut s = service();
        s.cast_vote("p", "a", Vote::Up);
        s.cast_vote("p", "b", Vote::Up);
        s.cast_vote("orphan-page", "a", Vote::Down);

        let reopened = VoteService::open(s.into_storage());
        assert_eq!(reopened.score_of("p"), 2);
        assert_eq!(reopened.score_of("orphan-page"), -1);
    }

    #[test]
    fn test_identifier_validation() {
        assert!(validate_page_id("abc123-xyz").is_ok());
        assert_eq!(validate_page_id("  "), Err(ValidationError::EmptyPageId));
        assert_eq!(validate_voter_id(""), Err(ValidationError::EmptyVoterId));
        assert_eq!(validate_voter_id(&"x".repeat(129)), Err(ValidationError::IdTooLong));
        assert_eq!(validate_page_id("bad\nid"), Err(ValidationError::ControlCharacters));
        assert!(matches!(parse_vote(5), Err(ValidationError::InvalidVote(VoteError::InvalidVote(5)))));
        assert_eq!(parse_vote(-1), Ok(Vote::Down));
    }

    #[test]
    fn test_vote_values_from_json() {
        assert_eq!(parse_vote_value(&serde_json::json!(1)), Ok(Vote::Up));
        assert_eq!(parse_vote_value(&serde_json::json!(-1)), Ok(Vote::Down));
        assert!(matches!(parse_vote_value(&serde_json::json!(2)), Err(ValidationError::InvalidVote(_))));
        for raw in [serde_json::json!(300), serde_json::json!("up"), serde_json::json!(1.5), serde_json::Value::Null] {
            assert_eq!(parse_vote_value(&raw), Err(ValidationError::MalformedVote(raw.to_string())), "raw {raw}");
        }
        assert_eq!(
            ValidationError::MalformedVote("300".into()).to_string(),
            "Invalid vote 300. Must be 1 or -1"
        );
    }

    #[test]
    fn test_hall_of_fame_limit() {
        assert_eq!(hall_of_fame_limit(None), 50);
        assert_eq!(hall_of_fame_limit(Some(0)), 1);
        assert_eq!(hall_of_fame_limit(Some(5)), 5);
        assert_eq!(hall_of_fame_limit(Some(10_000)), 500);
    }
}
