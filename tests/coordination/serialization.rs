//! Per-key serialization: mutations on one collection queue up, mutations
//! on different collections proceed independently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use sagip::domain::{Marker, Report};
use sagip::{temp_id, Collections, Outcome, Plan, QueryKey};

use crate::support::{marker, report, seeded};

#[test]
fn concurrent_creates_all_land() {
    let (coordinator, cache) = seeded();
    let coordinator = Arc::new(coordinator);

    let mut handles = Vec::new();
    for i in 0..4 {
        let coordinator = Arc::clone(&coordinator);
        handles.push(thread::spawn(move || {
            let canonical = marker(&format!("mkr-{}", 10 + i), "sector report");
            coordinator
                .run_plan(Plan::create(marker(&temp_id(), "sector report")), move || {
                    Ok(Outcome::Record(canonical))
                })
                .unwrap();
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    // serialized mutations never lose each other's merges
    let records = cache.collection::<Marker>().records().unwrap();
    assert_eq!(records.len(), 5);
    let mut ids: Vec<String> = records.iter().map(|m| m.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

#[test]
fn same_key_mutations_run_one_at_a_time() {
    let (coordinator, _cache) = seeded();
    let coordinator = Arc::new(coordinator);
    let first_settled = Arc::new(AtomicBool::new(false));

    let slow = {
        let coordinator = Arc::clone(&coordinator);
        let first_settled = Arc::clone(&first_settled);
        thread::spawn(move || {
            coordinator
                .run_plan(Plan::create(marker(&temp_id(), "slow")), || {
                    thread::sleep(Duration::from_millis(60));
                    first_settled.store(true, Ordering::SeqCst);
                    Ok(Outcome::Record(marker("mkr-slow", "slow")))
                })
                .unwrap();
        })
    };

    // wait until the slow mutation holds the key
    while !coordinator.is_in_flight(&QueryKey::new("markers")) {
        thread::sleep(Duration::from_millis(1));
    }

    let settled = Arc::clone(&first_settled);
    coordinator
        .run_plan(Plan::create(marker(&temp_id(), "fast")), move || {
            // admitted only after the slow mutation settled
            assert!(settled.load(Ordering::SeqCst));
            Ok(Outcome::Record(marker("mkr-fast", "fast")))
        })
        .unwrap();

    slow.join().unwrap();
}

#[test]
fn different_collections_mutate_independently() {
    let (coordinator, cache) = seeded();

    // hold the markers key open
    let in_flight = coordinator
        .begin(&QueryKey::new("markers"), |records: Option<Vec<Marker>>| {
            records.unwrap_or_default()
        })
        .unwrap();
    assert!(coordinator.is_in_flight(&QueryKey::new("markers")));

    // a report mutation is not blocked by it
    coordinator
        .run_plan(Plan::create(report(&temp_id(), "family on rooftop")), || {
            Ok(Outcome::Record(report("rpt-1", "family on rooftop")))
        })
        .unwrap();

    assert_eq!(cache.collection::<Report>().records().unwrap().len(), 1);
    in_flight.confirm().unwrap();
    assert!(!coordinator.is_in_flight(&QueryKey::new("markers")));
}
