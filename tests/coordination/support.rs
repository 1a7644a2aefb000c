//! Shared fixtures for the coordination suite.

use chrono::{TimeZone, Utc};
use sagip::domain::{Marker, MarkerCategory, Report, ReportStatus};
use sagip::{Collections, Coordinator, InMemoryCache};

pub fn marker(id: &str, name: &str) -> Marker {
    Marker {
        id: id.to_string(),
        category: MarkerCategory::Flood,
        name: name.to_string(),
        latitude: 14.5995,
        longitude: 120.9842,
        description: String::new(),
        reported_by: None,
        created_at: Utc.with_ymd_and_hms(2024, 7, 28, 6, 0, 0).unwrap(),
    }
}

pub fn report(id: &str, description: &str) -> Report {
    Report {
        id: id.to_string(),
        description: description.to_string(),
        latitude: 14.676,
        longitude: 121.0437,
        status: ReportStatus::Pending,
        submitted_by: "user-7".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 7, 28, 6, 0, 0).unwrap(),
    }
}

/// A coordinator over a cache seeded with one marker.
pub fn seeded() -> (Coordinator<InMemoryCache>, InMemoryCache) {
    let cache = InMemoryCache::new();
    cache
        .collection::<Marker>()
        .store(vec![marker("mkr-1", "Banaba creek")])
        .unwrap();
    (Coordinator::new(cache.clone()), cache)
}
