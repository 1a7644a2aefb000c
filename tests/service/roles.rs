//! Role enforcement and error mapping across the handler set.

use std::collections::HashMap;

use sagip::service::{CommandRequest, HandlerError, Session};
use serde_json::json;

use crate::support::{full_service, session};

#[test]
fn marker_writes_need_a_responder_role() {
    let service = full_service();
    let input = json!({
        "category": "flood",
        "name": "Banaba creek",
        "latitude": 14.5995,
        "longitude": 120.9842
    });

    let err = service
        .dispatch("marker.create", input.clone(), session("cit-1", "citizen"))
        .unwrap_err();
    assert!(matches!(err, HandlerError::Forbidden(_)));

    assert!(service
        .dispatch("marker.create", input.clone(), session("res-1", "rescuer"))
        .is_ok());
    assert!(service
        .dispatch("marker.create", input, session("adm-1", "admin"))
        .is_ok());
}

#[test]
fn unauthenticated_calls_are_rejected() {
    let service = full_service();

    let err = service
        .dispatch("marker.list", json!({}), Session::new())
        .unwrap_err();
    assert!(matches!(err, HandlerError::Unauthorized(_)));

    let err = service
        .dispatch(
            "report.submit",
            json!({ "description": "smoke", "latitude": 14.6, "longitude": 121.0 }),
            Session::new(),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 401);
}

#[test]
fn administrative_collections_are_admin_only() {
    let service = full_service();

    for (command, input) in [
        (
            "barangay.create",
            json!({ "name": "Banaba", "address": "C. Raymundo Ave" }),
        ),
        (
            "evacuation.create",
            json!({ "name": "Covered court", "latitude": 14.62, "longitude": 121.05, "capacity": 300 }),
        ),
        (
            "announcement.publish",
            json!({ "title": "Advisory", "body": "details", "audience": "everyone" }),
        ),
    ] {
        let err = service
            .dispatch(command, input.clone(), session("res-1", "rescuer"))
            .unwrap_err();
        assert!(
            matches!(err, HandlerError::Forbidden(_)),
            "rescuer ran {}",
            command
        );
        assert!(
            service.dispatch(command, input, session("adm-1", "admin")).is_ok(),
            "admin blocked on {}",
            command
        );
    }
}

#[test]
fn report_review_is_reserved_for_responders() {
    let service = full_service();
    let submitted = service
        .dispatch(
            "report.submit",
            json!({ "description": "smoke", "latitude": 14.6, "longitude": 121.0 }),
            session("cit-1", "citizen"),
        )
        .unwrap();
    let id = submitted["id"].as_str().unwrap().to_string();

    let err = service
        .dispatch(
            "report.validate",
            json!({ "id": id, "status": "validated" }),
            session("cit-1", "citizen"),
        )
        .unwrap_err();
    assert!(matches!(err, HandlerError::Forbidden(_)));

    assert!(service
        .dispatch(
            "report.validate",
            json!({ "id": id, "status": "dismissed" }),
            session("res-1", "rescuer"),
        )
        .is_ok());
}

#[test]
fn guards_reject_malformed_input_before_handlers_run() {
    let service = full_service();

    let err = service
        .dispatch(
            "marker.create",
            json!({ "name": "no coordinates" }),
            session("adm-1", "admin"),
        )
        .unwrap_err();
    assert!(matches!(err, HandlerError::GuardRejected(_)));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn validation_failures_map_to_unprocessable() {
    let service = full_service();

    let err = service
        .dispatch(
            "marker.create",
            json!({
                "category": "flood",
                "name": "off the map",
                "latitude": 97.0,
                "longitude": 120.9
            }),
            session("res-1", "rescuer"),
        )
        .unwrap_err();
    assert!(matches!(err, HandlerError::Invalid(_)));
    assert_eq!(err.status_code(), 422);
}

#[test]
fn request_dispatch_maps_errors_to_status_codes() {
    let service = full_service();
    let request = |command: &str, input: serde_json::Value, vars: HashMap<String, String>| {
        service.dispatch_request(&CommandRequest {
            command: command.to_string(),
            input,
            session_variables: vars,
        })
    };
    let vars = |user: &str, role: &str| {
        let mut vars = HashMap::new();
        vars.insert("x-user-id".to_string(), user.to_string());
        vars.insert("x-user-role".to_string(), role.to_string());
        vars
    };

    let resp = request("no.such.command", json!({}), HashMap::new());
    assert_eq!(resp.status, 404);

    let resp = request("marker.list", json!({}), HashMap::new());
    assert_eq!(resp.status, 401);
    assert!(resp.body["error"]
        .as_str()
        .unwrap()
        .starts_with("unauthorized"));

    let resp = request(
        "barangay.create",
        json!({ "name": "Banaba", "address": "somewhere" }),
        vars("cit-1", "citizen"),
    );
    assert_eq!(resp.status, 403);

    let resp = request(
        "marker.delete",
        json!({ "id": "mkr-none" }),
        vars("adm-1", "admin"),
    );
    assert_eq!(resp.status, 404);

    let resp = request(
        "marker.create",
        json!({
            "category": "flood",
            "name": "Banaba creek",
            "latitude": 14.5995,
            "longitude": 120.9842
        }),
        vars("res-1", "rescuer"),
    );
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["reported_by"], "res-1");
}
