//! Rollback behavior: failed or abandoned mutations restore the entry.

use sagip::domain::Marker;
use sagip::{
    temp_id, CacheStore, Collections, Coordinator, InMemoryCache, MutationError, Outcome, Plan,
    QueryKey, RemoteError,
};

use crate::support::{marker, seeded};

fn markers_key() -> QueryKey {
    QueryKey::new("markers")
}

#[test]
fn remote_failure_restores_the_exact_bytes() {
    let (coordinator, cache) = seeded();
    let before = cache.get_raw(&markers_key()).unwrap().unwrap().0;

    let err = coordinator
        .run_plan(Plan::create(marker(&temp_id(), "ghost")), || {
            Err::<Outcome<Marker>, _>(RemoteError::new("backend down"))
        })
        .unwrap_err();

    assert!(matches!(err, MutationError::Remote(_)));
    assert_eq!(err.to_string(), "remote operation failed: backend down");

    // bit for bit what was stored before the optimistic write
    assert_eq!(cache.get_raw(&markers_key()).unwrap().unwrap().0, before);
    let records = cache.collection::<Marker>().records().unwrap();
    assert_eq!(records, vec![marker("mkr-1", "Banaba creek")]);
}

#[test]
fn failed_create_on_an_uncached_collection_leaves_no_entry() {
    let cache = InMemoryCache::new();
    let coordinator = Coordinator::new(cache.clone());

    coordinator
        .run_plan(Plan::create(marker(&temp_id(), "ghost")), || {
            Err::<Outcome<Marker>, _>(RemoteError::new("timeout"))
        })
        .unwrap_err();

    assert!(cache.get_raw(&markers_key()).unwrap().is_none());
    assert_eq!(cache.version_of(&markers_key()).unwrap(), None);
}

#[test]
fn failed_mutation_on_a_stale_entry_leaves_it_stale() {
    let (coordinator, cache) = seeded();
    cache.invalidate(&markers_key()).unwrap();

    coordinator
        .run_plan(Plan::create(marker(&temp_id(), "ghost")), || {
            Err::<Outcome<Marker>, _>(RemoteError::new("backend down"))
        })
        .unwrap_err();

    // readers still refetch, and the version counter survived
    assert!(cache.get::<Vec<Marker>>(&markers_key()).unwrap().is_none());
    assert!(cache.version_of(&markers_key()).unwrap().is_some());
}

#[test]
fn abandoned_in_flight_mutation_rolls_back_on_drop() {
    let (coordinator, cache) = seeded();

    {
        let _in_flight = coordinator
            .begin(&markers_key(), |records: Option<Vec<Marker>>| {
                let mut records = records.unwrap();
                records.insert(0, marker("tmp-oops", "never settled"));
                records
            })
            .unwrap();
        // dropped without confirm or fail, as a cancelled task would
    }

    let records = cache.collection::<Marker>().records().unwrap();
    assert_eq!(records, vec![marker("mkr-1", "Banaba creek")]);
    assert!(!coordinator.is_in_flight(&markers_key()));
}

#[test]
fn consecutive_failures_keep_restoring_the_seed() {
    let (coordinator, cache) = seeded();

    for attempt in 0..3 {
        coordinator
            .run_plan(Plan::create(marker(&temp_id(), "ghost")), || {
                Err::<Outcome<Marker>, _>(RemoteError::new(format!("attempt {}", attempt)))
            })
            .unwrap_err();
    }

    let records = cache.collection::<Marker>().records().unwrap();
    assert_eq!(records, vec![marker("mkr-1", "Banaba creek")]);
}

#[test]
fn failure_after_success_only_unwinds_the_failed_mutation() {
    let (coordinator, cache) = seeded();

    coordinator
        .run_plan(Plan::create(marker(&temp_id(), "Libis underpass")), || {
            Ok(Outcome::Record(marker("mkr-2", "Libis underpass")))
        })
        .unwrap();

    coordinator
        .run_plan(Plan::<Marker>::delete("mkr-2"), || {
            Err::<Outcome<Marker>, _>(RemoteError::new("backend down"))
        })
        .unwrap_err();

    // the confirmed create survives the later rollback
    let ids: Vec<String> = cache
        .collection::<Marker>()
        .records()
        .unwrap()
        .iter()
        .map(|m| m.id.clone())
        .collect();
    assert_eq!(ids, vec!["mkr-2", "mkr-1"]);
}
