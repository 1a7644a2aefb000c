//! End-to-end command flows over the registered handler set.

use serde_json::json;

use crate::support::{full_service, session};

#[test]
fn marker_lifecycle() {
    let service = full_service();

    let created = service
        .dispatch(
            "marker.create",
            json!({
                "category": "flood",
                "name": "Banaba creek overflow",
                "latitude": 14.5995,
                "longitude": 120.9842,
                "description": "water rising near footbridge"
            }),
            session("res-1", "rescuer"),
        )
        .unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["category"], "flood");
    assert_eq!(created["reported_by"], "res-1");

    let updated = service
        .dispatch(
            "marker.update",
            json!({ "id": id, "name": "Banaba creek (cleared)" }),
            session("res-1", "rescuer"),
        )
        .unwrap();
    assert_eq!(updated["name"], "Banaba creek (cleared)");
    assert_eq!(updated["category"], "flood");

    let listed = service
        .dispatch("marker.list", json!({}), session("cit-1", "citizen"))
        .unwrap();
    assert_eq!(listed["markers"].as_array().unwrap().len(), 1);
    assert_eq!(listed["markers"][0]["name"], "Banaba creek (cleared)");

    let deleted = service
        .dispatch(
            "marker.delete",
            json!({ "id": id }),
            session("adm-1", "admin"),
        )
        .unwrap();
    assert_eq!(deleted, json!({ "deleted": id }));

    let listed = service
        .dispatch("marker.list", json!({}), session("cit-1", "citizen"))
        .unwrap();
    assert!(listed["markers"].as_array().unwrap().is_empty());
}

#[test]
fn newest_marker_lists_first() {
    let service = full_service();
    for name in ["first", "second", "third"] {
        service
            .dispatch(
                "marker.create",
                json!({
                    "category": "fire",
                    "name": name,
                    "latitude": 14.6,
                    "longitude": 121.0
                }),
                session("res-1", "rescuer"),
            )
            .unwrap();
    }

    let listed = service
        .dispatch("marker.list", json!({}), session("res-1", "rescuer"))
        .unwrap();
    let names: Vec<&str> = listed["markers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["third", "second", "first"]);
}

#[test]
fn report_review_flow() {
    let service = full_service();

    let submitted = service
        .dispatch(
            "report.submit",
            json!({
                "description": "family stranded on rooftop",
                "latitude": 14.676,
                "longitude": 121.0437
            }),
            session("cit-9", "citizen"),
        )
        .unwrap();
    let id = submitted["id"].as_str().unwrap().to_string();
    assert_eq!(submitted["status"], "pending");
    assert_eq!(submitted["submitted_by"], "cit-9");

    let validated = service
        .dispatch(
            "report.validate",
            json!({ "id": id, "status": "validated" }),
            session("res-1", "rescuer"),
        )
        .unwrap();
    assert_eq!(validated["status"], "validated");

    let listed = service
        .dispatch("report.list", json!({}), session("res-1", "rescuer"))
        .unwrap();
    assert_eq!(listed["reports"][0]["status"], "validated");
}

#[test]
fn review_must_resolve_the_report() {
    let service = full_service();
    let submitted = service
        .dispatch(
            "report.submit",
            json!({
                "description": "smoke near the school",
                "latitude": 14.6,
                "longitude": 121.0
            }),
            session("cit-9", "citizen"),
        )
        .unwrap();
    let id = submitted["id"].as_str().unwrap().to_string();

    // setting a report back to pending is not a review decision
    let err = service
        .dispatch(
            "report.validate",
            json!({ "id": id, "status": "pending" }),
            session("adm-1", "admin"),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 422);
}

#[test]
fn evacuation_center_links_and_unlinks_barangays() {
    let service = full_service();
    let admin = || session("adm-1", "admin");

    let barangay = service
        .dispatch(
            "barangay.create",
            json!({ "name": "Banaba", "address": "C. Raymundo Ave", "contact": "0917-555-0101" }),
            admin(),
        )
        .unwrap();
    let barangay_id = barangay["id"].as_str().unwrap().to_string();

    let center = service
        .dispatch(
            "evacuation.create",
            json!({
                "name": "Covered court",
                "latitude": 14.62,
                "longitude": 121.05,
                "capacity": 300
            }),
            admin(),
        )
        .unwrap();
    let center_id = center["id"].as_str().unwrap().to_string();
    assert!(center["barangay_ids"].as_array().unwrap().is_empty());

    let linked = service
        .dispatch(
            "evacuation.link_barangay",
            json!({ "id": center_id, "barangay_id": barangay_id }),
            admin(),
        )
        .unwrap();
    assert_eq!(linked["barangay_ids"], json!([barangay_id]));

    // linking the same barangay twice is a no-op
    let linked = service
        .dispatch(
            "evacuation.link_barangay",
            json!({ "id": center_id, "barangay_id": barangay_id }),
            admin(),
        )
        .unwrap();
    assert_eq!(linked["barangay_ids"], json!([barangay_id]));

    let unlinked = service
        .dispatch(
            "evacuation.unlink_barangay",
            json!({ "id": center_id, "barangay_id": barangay_id }),
            admin(),
        )
        .unwrap();
    assert!(unlinked["barangay_ids"].as_array().unwrap().is_empty());

    // unlinking a barangay that was never assigned is a no-op too
    let unlinked = service
        .dispatch(
            "evacuation.unlink_barangay",
            json!({ "id": center_id, "barangay_id": "brgy-unknown" }),
            admin(),
        )
        .unwrap();
    assert!(unlinked["barangay_ids"].as_array().unwrap().is_empty());
}

#[test]
fn announcements_reach_their_audience() {
    let service = full_service();
    let admin = || session("adm-1", "admin");

    for (title, audience) in [
        ("City-wide advisory", json!("everyone")),
        ("Rescuer deployment", json!("rescuers")),
        ("Barangay drill", json!({ "barangay": "brgy-1" })),
    ] {
        service
            .dispatch(
                "announcement.publish",
                json!({ "title": title, "body": "details to follow", "audience": audience }),
                admin(),
            )
            .unwrap();
    }

    let titles = |value: &serde_json::Value| -> Vec<String> {
        let mut titles: Vec<String> = value["announcements"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap().to_string())
            .collect();
        titles.sort();
        titles
    };

    // a resident of brgy-1 sees the public and local announcements
    let mut resident = session("cit-1", "citizen");
    resident.set("x-user-barangay", "brgy-1");
    let listed = service
        .dispatch("announcement.list", json!({}), resident)
        .unwrap();
    assert_eq!(titles(&listed), vec!["Barangay drill", "City-wide advisory"]);

    // a resident elsewhere sees only the public one
    let listed = service
        .dispatch("announcement.list", json!({}), session("cit-2", "citizen"))
        .unwrap();
    assert_eq!(titles(&listed), vec!["City-wide advisory"]);

    let listed = service
        .dispatch("announcement.list", json!({}), session("res-1", "rescuer"))
        .unwrap();
    assert_eq!(
        titles(&listed),
        vec!["City-wide advisory", "Rescuer deployment"]
    );

    // admins see everything
    let listed = service
        .dispatch("announcement.list", json!({}), admin())
        .unwrap();
    assert_eq!(listed["announcements"].as_array().unwrap().len(), 3);
}

#[test]
fn missing_records_surface_as_not_found() {
    let service = full_service();

    let err = service
        .dispatch(
            "marker.delete",
            json!({ "id": "mkr-none" }),
            session("adm-1", "admin"),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    let err = service
        .dispatch(
            "evacuation.link_barangay",
            json!({ "id": "evac-none", "barangay_id": "brgy-1" }),
            session("adm-1", "admin"),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}
