//! Full plan lifecycles driven through `Coordinator::run_plan`.

use sagip::domain::{EvacuationCenter, Marker, MarkerPatch};
use sagip::{temp_id, Collections, Coordinator, InMemoryCache, Outcome, Plan};

use crate::support::{marker, seeded};

fn center(id: &str, barangays: &[&str]) -> EvacuationCenter {
    EvacuationCenter {
        id: id.to_string(),
        name: "Covered court".to_string(),
        latitude: 14.62,
        longitude: 121.05,
        capacity: 300,
        barangay_ids: barangays.iter().map(|b| b.to_string()).collect(),
    }
}

#[test]
fn create_plan_lands_the_canonical_record() {
    let (coordinator, cache) = seeded();

    let temp = marker(&temp_id(), "Libis underpass");
    let merged = coordinator
        .run_plan(Plan::create(temp), || {
            Ok(Outcome::Record(marker("mkr-2", "Libis underpass")))
        })
        .unwrap();

    // newest first, placeholder gone
    let ids: Vec<&str> = merged.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["mkr-2", "mkr-1"]);
    assert_eq!(cache.collection::<Marker>().records().unwrap(), merged);
}

#[test]
fn create_plan_populates_an_uncached_collection() {
    let cache = InMemoryCache::new();
    let coordinator = Coordinator::new(cache.clone());

    let merged = coordinator
        .run_plan(Plan::create(marker(&temp_id(), "First report")), || {
            Ok(Outcome::Record(marker("mkr-1", "First report")))
        })
        .unwrap();

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].id, "mkr-1");
    assert_eq!(cache.collection::<Marker>().records().unwrap(), merged);
}

#[test]
fn update_plan_patches_then_takes_the_canonical_record() {
    let (coordinator, cache) = seeded();

    let patch = MarkerPatch {
        name: Some("Banaba creek (rising)".to_string()),
        ..Default::default()
    };
    let mut canonical = marker("mkr-1", "Banaba creek (rising)");
    canonical.description = "validated by field team".to_string();

    let server_copy = canonical.clone();
    let merged = coordinator
        .run_plan(Plan::update("mkr-1", patch), move || {
            Ok(Outcome::Record(server_copy))
        })
        .unwrap();

    assert_eq!(merged, vec![canonical]);
    let stored = cache.collection::<Marker>().find("mkr-1").unwrap().unwrap();
    assert_eq!(stored.description, "validated by field team");
}

#[test]
fn delete_plan_stays_removed() {
    let (coordinator, cache) = seeded();

    let merged = coordinator
        .run_plan(Plan::<Marker>::delete("mkr-1"), || Ok(Outcome::Deleted))
        .unwrap();

    assert!(merged.is_empty());
    assert!(cache.collection::<Marker>().records().unwrap().is_empty());
}

#[test]
fn delete_plan_restores_a_record_the_server_kept() {
    let (coordinator, cache) = seeded();

    coordinator
        .run_plan(Plan::<Marker>::delete("mkr-1"), || {
            Ok(Outcome::Record(marker("mkr-1", "Banaba creek")))
        })
        .unwrap();

    let restored = cache.collection::<Marker>().find("mkr-1").unwrap();
    assert_eq!(restored.unwrap().name, "Banaba creek");
}

#[test]
fn link_plan_takes_the_canonical_membership_list() {
    let cache = InMemoryCache::new();
    cache
        .collection::<EvacuationCenter>()
        .store(vec![center("evac-1", &[])])
        .unwrap();
    let coordinator = Coordinator::new(cache.clone());

    let merged = coordinator
        .run_plan(Plan::<EvacuationCenter>::link("evac-1", "brgy-3"), || {
            // the server already knew about brgy-5
            Ok(Outcome::Members(vec![
                "brgy-3".to_string(),
                "brgy-5".to_string(),
            ]))
        })
        .unwrap();

    assert_eq!(merged[0].barangay_ids, vec!["brgy-3", "brgy-5"]);
}

#[test]
fn unlink_plan_drops_the_membership() {
    let cache = InMemoryCache::new();
    cache
        .collection::<EvacuationCenter>()
        .store(vec![center("evac-1", &["brgy-3", "brgy-5"])])
        .unwrap();
    let coordinator = Coordinator::new(cache.clone());

    let merged = coordinator
        .run_plan(Plan::<EvacuationCenter>::unlink("evac-1", "brgy-3"), || {
            Ok(Outcome::Members(vec!["brgy-5".to_string()]))
        })
        .unwrap();

    assert_eq!(merged[0].barangay_ids, vec!["brgy-5"]);
}

#[test]
fn merge_runs_against_the_latest_collection_state() {
    let (coordinator, cache) = seeded();

    let merged = coordinator
        .run_plan(Plan::create(marker(&temp_id(), "Libis underpass")), || {
            // a refetch replaces the collection while the mutation is in flight
            cache
                .collection::<Marker>()
                .store(vec![
                    marker("mkr-1", "Banaba creek"),
                    marker("mkr-2", "Libis underpass"),
                ])
                .unwrap();
            Ok(Outcome::Record(marker("mkr-2", "Libis underpass")))
        })
        .unwrap();

    // the refetched rows survive; the canonical record is not duplicated
    let ids: Vec<&str> = merged.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["mkr-1", "mkr-2"]);
}
