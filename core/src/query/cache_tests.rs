//! Tests for QueryCache fetch bookkeeping and mutation effects

use habitquest_types::{
    Adventure, AdventureStatus, FriendRequest, FriendRequestStatus, Task, UserSummary,
};

use super::effects;
use super::{CacheEffect, QueryCache, QueryKey, QueryState, keys};
use crate::api::ApiError;

fn not_found() -> ApiError {
    ApiError::Status {
        endpoint: "/adventures/9".to_string(),
        status: 404,
        message: None,
    }
}

fn adventure(id: i64, status: AdventureStatus) -> Adventure {
    Adventure {
        id,
        status,
        monster_current_hp: 50,
        monster_max_hp: 200,
        ..Default::default()
    }
}

fn task(id: i64) -> Task {
    Task {
        id,
        title: format!("Task {id}"),
        description: None,
        category: "daily".to_string(),
        completed_today: false,
        streak: 0,
        xp_reward: 10,
    }
}

#[test]
fn disabled_query_is_idle_and_not_fetched_by_state() {
    let cache = QueryCache::new();
    let state = cache.state::<Vec<Task>>(&keys::tasks(), false);
    assert!(state.is_idle());
    assert!(cache.is_empty());
}

#[test]
fn enabled_query_without_entry_is_loading() {
    let cache = QueryCache::new();
    assert!(cache.needs_fetch(&keys::tasks()));
    assert!(cache.state::<Vec<Task>>(&keys::tasks(), true).is_loading());
}

#[test]
fn fetch_roundtrip_stores_data() {
    let mut cache = QueryCache::new();
    let key = keys::tasks();

    let ticket = cache.begin_fetch(&key).unwrap();
    assert!(!cache.needs_fetch(&key));
    assert!(cache.state::<Vec<Task>>(&key, true).is_loading());

    assert!(cache.complete(ticket, Ok(vec![task(1), task(2)])));
    let state = cache.state::<Vec<Task>>(&key, true);
    assert_eq!(state.data().map(Vec::len), Some(2));
    assert!(!cache.needs_fetch(&key));
}

#[test]
fn concurrent_fetches_coalesce() {
    let mut cache = QueryCache::new();
    let key = keys::adventure(1);

    let first = cache.begin_fetch(&key);
    let second = cache.begin_fetch(&key);
    assert!(first.is_some());
    assert!(second.is_none());
    assert!(cache.is_fetching(&key));
}

#[test]
fn error_is_sticky_until_invalidated() {
    let mut cache = QueryCache::new();
    let key = keys::adventure(9);

    let ticket = cache.begin_fetch(&key).unwrap();
    cache.complete::<Adventure>(ticket, Err(not_found()));

    let state = cache.state::<Adventure>(&key, true);
    assert!(state.error().is_some_and(|e| e.is_not_found()));
    assert!(!cache.needs_fetch(&key));

    cache.invalidate(&key);
    assert!(cache.needs_fetch(&key));
    assert!(cache.state::<Adventure>(&key, true).is_loading());
}

#[test]
fn invalidation_supersedes_in_flight_fetch() {
    let mut cache = QueryCache::new();
    let key = keys::current_adventure();

    let old = cache.begin_fetch(&key).unwrap();
    assert_eq!(cache.invalidate(&keys::adventures()), 1);

    let new = cache.begin_fetch(&key).unwrap();
    assert!(cache.complete(new, Ok(Some(adventure(2, AdventureStatus::Active)))));

    // The older response arrives last and must not replace the newer one
    assert!(!cache.complete(old, Ok(Some(adventure(1, AdventureStatus::Active)))));
    let current = cache.get::<Option<Adventure>>(&key).flatten().unwrap();
    assert_eq!(current.id, 2);
}

#[test]
fn refetch_keeps_showing_stale_data() {
    let mut cache = QueryCache::new();
    let key = keys::tasks();

    let ticket = cache.begin_fetch(&key).unwrap();
    cache.complete(ticket, Ok(vec![task(1)]));
    cache.invalidate(&key);
    assert!(cache.is_stale(&key));

    let _ticket = cache.begin_fetch(&key).unwrap();
    match cache.state::<Vec<Task>>(&key, true) {
        QueryState::Success { data, refreshing } => {
            assert_eq!(data.len(), 1);
            assert!(refreshing);
        }
        other => panic!("unexpected state: {other:?}"),
    }
}

#[test]
fn dropped_fetch_releases_key_for_next_mount() {
    let mut cache = QueryCache::new();
    let key = keys::adventure(7);

    // The page unmounts before the response arrives
    let ticket = cache.begin_fetch(&key).unwrap();
    assert!(cache.cancel(&ticket));
    drop(ticket);

    assert!(!cache.is_fetching(&key));
    assert!(cache.needs_fetch(&key));
    assert!(cache.begin_fetch(&key).is_some());
}

#[test]
fn cancel_keeps_stale_data_refetchable() {
    let mut cache = QueryCache::new();
    let key = keys::tasks();
    cache.set_data(&key, vec![task(1)]);
    cache.invalidate(&key);

    let ticket = cache.begin_fetch(&key).unwrap();
    cache.cancel(&ticket);

    match cache.state::<Vec<Task>>(&key, true) {
        QueryState::Success { data, refreshing } => {
            assert_eq!(data.len(), 1);
            assert!(!refreshing);
        }
        other => panic!("unexpected state: {other:?}"),
    }
    assert!(cache.needs_fetch(&key));
}

#[test]
fn cancel_of_superseded_ticket_leaves_newer_fetch() {
    let mut cache = QueryCache::new();
    let key = keys::current_adventure();

    let old = cache.begin_fetch(&key).unwrap();
    cache.invalidate(&key);
    let new = cache.begin_fetch(&key).unwrap();

    assert!(!cache.cancel(&old));
    assert!(cache.is_fetching(&key));
    assert!(cache.complete(new, Ok(None::<Adventure>)));
}

#[test]
fn prefix_invalidation_leaves_other_keys() {
    let mut cache = QueryCache::new();
    cache.set_data(&keys::current_adventure(), None::<Adventure>);
    cache.set_data(&keys::adventure_history(), Vec::<Adventure>::new());
    cache.set_data(&keys::tasks(), vec![task(1)]);

    assert_eq!(cache.invalidate(&keys::adventures()), 2);
    assert!(cache.is_stale(&keys::current_adventure()));
    assert!(cache.is_stale(&keys::adventure_history()));
    assert!(!cache.is_stale(&keys::tasks()));
}

#[test]
fn overwrite_drops_in_flight_fetch() {
    let mut cache = QueryCache::new();
    let key = keys::adventure(4);

    let ticket = cache.begin_fetch(&key).unwrap();
    cache.set_data(&key, adventure(4, AdventureStatus::Abandoned));
    assert!(!cache.complete(ticket, Ok(adventure(4, AdventureStatus::Active))));
    assert_eq!(
        cache.get::<Adventure>(&key).map(|a| a.status),
        Some(AdventureStatus::Abandoned)
    );
}

#[test]
fn mismatched_type_reads_as_missing() {
    let mut cache = QueryCache::new();
    cache.set_data(&keys::tasks(), vec![task(1)]);
    assert!(cache.get::<Adventure>(&keys::tasks()).is_none());
}

#[test]
fn remove_and_clear() {
    let mut cache = QueryCache::new();
    cache.set_data(&keys::friend_list(), 1u32);
    cache.set_data(&keys::friend_requests(), 2u32);
    cache.set_data(&keys::me(), 3u32);

    assert_eq!(cache.remove(&keys::friends()), 2);
    assert_eq!(cache.len(), 1);

    let ticket = cache.begin_fetch(&keys::me());
    cache.clear();
    assert!(cache.is_empty());
    assert!(!cache.complete(ticket.unwrap(), Ok(4u32)));
}

#[test]
fn superseded_searches_are_pruned() {
    let mut cache = QueryCache::new();
    for query in ["ad", "ada", "adal"] {
        cache.set_data(&keys::user_search(query), 0u32);
    }
    cache.set_data(&keys::friend_list(), 1u32);

    let current = keys::user_search("ada");
    assert_eq!(cache.remove_except(&keys::user_searches(), Some(&current)), 2);
    assert!(cache.contains(&current));
    assert!(cache.contains(&keys::friend_list()));

    assert_eq!(cache.remove_except(&keys::user_searches(), None), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn started_adventure_overwrites_current_and_detail() {
    let mut cache = QueryCache::new();
    cache.set_data(&keys::adventure_history(), Vec::<Adventure>::new());

    let started = adventure(11, AdventureStatus::Active);
    cache.apply(effects::adventure_started(&started));

    assert_eq!(cache.get::<Adventure>(&keys::adventure(11)), Some(started.clone()));
    assert_eq!(
        cache.get::<Option<Adventure>>(&keys::current_adventure()),
        Some(Some(started))
    );
    assert!(cache.is_stale(&keys::adventure_history()));
    assert!(!cache.needs_fetch(&keys::current_adventure()));
}

#[test]
fn completed_task_invalidates_dependents() {
    let mut cache = QueryCache::new();
    cache.set_data(&keys::tasks(), vec![task(1)]);
    cache.set_data(&keys::me(), 0u32);
    cache.set_data(&keys::current_adventure(), None::<Adventure>);
    cache.set_data(&keys::monsters(), 0u32);

    cache.apply(effects::task_completed(&task(1)));

    assert!(cache.is_stale(&keys::tasks()));
    assert!(cache.is_stale(&keys::me()));
    assert!(cache.is_stale(&keys::current_adventure()));
    assert!(!cache.is_stale(&keys::monsters()));
}

fn user(id: i64) -> UserSummary {
    UserSummary {
        id,
        username: format!("user{id}"),
        display_name: None,
        level: 1,
    }
}

fn accepted_request() -> FriendRequest {
    FriendRequest {
        id: 8,
        from: user(1),
        to: user(2),
        status: FriendRequestStatus::Accepted,
        created_at: None,
    }
}

/// (key, overwritten) pairs of an effect list, in order
fn summarize(effects: &[CacheEffect]) -> Vec<(QueryKey, bool)> {
    effects
        .iter()
        .map(|effect| {
            let overwrite = matches!(effect, CacheEffect::Overwrite { .. });
            (effect.key().clone(), overwrite)
        })
        .collect()
}

#[test]
fn mutation_effect_table() {
    let abandoned = adventure(6, AdventureStatus::Abandoned);
    let cases: Vec<(&str, Vec<CacheEffect>, Vec<(QueryKey, bool)>)> = vec![
        (
            "task completed",
            effects::task_completed(&task(1)),
            vec![
                (keys::tasks(), false),
                (keys::me(), false),
                (keys::current_adventure(), false),
            ],
        ),
        ("task created", effects::task_created(&task(1)), vec![(keys::tasks(), false)]),
        ("task deleted", effects::task_deleted(1), vec![(keys::tasks(), false)]),
        (
            "adventure started",
            effects::adventure_started(&adventure(6, AdventureStatus::Active)),
            vec![
                (keys::adventure(6), true),
                (keys::current_adventure(), true),
                (keys::adventure_history(), false),
            ],
        ),
        (
            "adventure abandoned",
            effects::adventure_abandoned(&abandoned),
            vec![
                (keys::adventure(6), true),
                (keys::current_adventure(), false),
                (keys::adventure_history(), false),
                (keys::me(), false),
            ],
        ),
        (
            "friend request sent",
            effects::friend_request_sent(&accepted_request()),
            vec![(keys::friend_requests(), false)],
        ),
        (
            "friend request answered",
            effects::friend_request_answered(&accepted_request()),
            vec![(keys::friend_requests(), false), (keys::friend_list(), false)],
        ),
    ];

    for (name, effects, expected) in cases {
        assert_eq!(summarize(&effects), expected, "{name}");
    }
}

#[test]
fn abandoned_adventure_overwrites_detail_and_refetches_current() {
    let mut cache = QueryCache::new();
    cache.set_data(&keys::adventure(6), adventure(6, AdventureStatus::Active));
    cache.set_data(
        &keys::current_adventure(),
        Some(adventure(6, AdventureStatus::Active)),
    );
    cache.set_data(&keys::adventure_history(), Vec::<Adventure>::new());
    cache.set_data(&keys::tasks(), vec![task(1)]);

    cache.apply(effects::adventure_abandoned(&adventure(6, AdventureStatus::Abandoned)));

    assert_eq!(
        cache.get::<Adventure>(&keys::adventure(6)).map(|a| a.status),
        Some(AdventureStatus::Abandoned)
    );
    assert!(!cache.needs_fetch(&keys::adventure(6)));
    assert!(cache.needs_fetch(&keys::current_adventure()));
    assert!(cache.needs_fetch(&keys::adventure_history()));
    assert!(!cache.is_stale(&keys::tasks()));
}

#[test]
fn answered_request_refreshes_requests_and_friends() {
    let mut cache = QueryCache::new();
    cache.set_data(&keys::friend_requests(), vec![accepted_request()]);
    cache.set_data(&keys::friend_list(), Vec::<UserSummary>::new());
    cache.set_data(&keys::me(), 0u32);

    cache.apply(effects::friend_request_answered(&accepted_request()));

    assert!(cache.is_stale(&keys::friend_requests()));
    assert!(cache.is_stale(&keys::friend_list()));
    assert!(!cache.is_stale(&keys::me()));
}

#[test]
fn effect_debug_hides_value() {
    let effect = CacheEffect::overwrite(QueryKey::new(["a"]), 5u8);
    assert_eq!(format!("{effect:?}"), "Overwrite { key: QueryKey([\"a\"]), .. }");
}
