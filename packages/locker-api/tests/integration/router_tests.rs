//! Router tests covering every endpoint.

use serde_json::json;

use super::helpers::{json, send, test_router};

const ALICE: &str =
    r#"{"email": "a@x.com", "first_name": "A", "last_name": "X", "password": "p"}"#;

/// Create user → create locker → fetch user → delete locker → fetch user.
#[tokio::test]
async fn test_locker_lifecycle_scenario() {
    let router = test_router();

    let created = send(&router, "POST", "/users", Some(ALICE)).await;
    assert_eq!(created.status(), 201);
    assert_eq!(
        created.headers()["Content-Type"],
        "application/json"
    );
    let user = json(&created);
    assert_eq!(user["id"], 0);
    assert_eq!(user["lockers"], json!([]));

    let created = send(
        &router,
        "POST",
        "/users/0/lockers",
        Some(r#"{"number": "12A", "status": "available"}"#),
    )
    .await;
    assert_eq!(created.status(), 201);
    assert_eq!(
        json(&created),
        json!({"id": 0, "number": "12A", "status": "available", "user_id": 0})
    );

    let fetched = send(&router, "GET", "/users/0", None).await;
    assert_eq!(fetched.status(), 200);
    assert_eq!(
        json(&fetched)["lockers"],
        json!([{"id": 0, "number": "12A", "status": "available", "user_id": 0}])
    );

    let deleted = send(&router, "DELETE", "/lockers/0", None).await;
    assert_eq!(deleted.status(), 204);
    assert!(deleted.body().is_empty());

    let fetched = send(&router, "GET", "/users/0", None).await;
    assert_eq!(json(&fetched)["lockers"], json!([]));
}

#[tokio::test]
async fn test_password_is_never_returned() {
    let router = test_router();
    send(&router, "POST", "/users", Some(ALICE)).await;
    send(
        &router,
        "PUT",
        "/users/0",
        Some(r#"{"email": "b@x.com", "password": "q"}"#),
    )
    .await;

    for path in ["/users", "/users/0"] {
        let response = send(&router, "GET", path, None).await;
        let body = String::from_utf8(response.body().to_vec()).unwrap();
        assert!(!body.contains("password"), "{} leaked: {}", path, body);
    }
}

#[tokio::test]
async fn test_list_endpoints_start_empty() {
    let router = test_router();

    let users = send(&router, "GET", "/users", None).await;
    let lockers = send(&router, "GET", "/lockers", None).await;

    assert_eq!(users.status(), 200);
    assert_eq!(json(&users), json!([]));
    assert_eq!(json(&lockers), json!([]));
}

#[tokio::test]
async fn test_user_ids_increase() {
    let router = test_router();
    let mut last = None;
    for _ in 0..5 {
        let id = json(&send(&router, "POST", "/users", Some(ALICE)).await)["id"]
            .as_u64()
            .unwrap();
        if let Some(prev) = last {
            assert!(id > prev);
        }
        last = Some(id);
    }
    let users = json(&send(&router, "GET", "/users", None).await);
    assert_eq!(users.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let router = test_router();

    let response = send(&router, "POST", "/users", Some("{\"email\":")).await;
    assert_eq!(response.status(), 400);
    let body = json(&response);
    assert_eq!(body["error"]["code"], "400");
    assert!(body["error"]["message"].as_str().unwrap().contains("EOF"));

    let response = send(&router, "POST", "/users", None).await;
    assert_eq!(response.status(), 400);

    let response = send(&router, "GET", "/users", None).await;
    assert_eq!(json(&response), json!([]));
}

#[tokio::test]
async fn test_create_locker_for_missing_user() {
    let router = test_router();

    let response = send(
        &router,
        "POST",
        "/users/9/lockers",
        Some(r#"{"number": "1", "status": "available"}"#),
    )
    .await;
    assert_eq!(response.status(), 404);
    assert!(response.body().is_empty());

    // The user check wins over a malformed body.
    let response = send(&router, "POST", "/users/9/lockers", Some("not json")).await;
    assert_eq!(response.status(), 404);

    let lockers = send(&router, "GET", "/lockers", None).await;
    assert_eq!(json(&lockers), json!([]));
}

#[tokio::test]
async fn test_update_locker_keeps_id_and_owner() {
    let router = test_router();
    send(&router, "POST", "/users", Some(ALICE)).await;
    send(
        &router,
        "POST",
        "/users/0/lockers",
        Some(r#"{"number": "12A", "status": "available"}"#),
    )
    .await;

    let response = send(
        &router,
        "PUT",
        "/lockers/0",
        Some(r#"{"id": 7, "user_id": 3, "number": "12A", "status": "in-use"}"#),
    )
    .await;
    assert_eq!(response.status(), 200);
    let expected = json!({"id": 0, "number": "12A", "status": "in-use", "user_id": 0});
    assert_eq!(json(&response), expected);

    let canonical = json(&send(&router, "GET", "/lockers/0", None).await);
    let owner = json(&send(&router, "GET", "/users/0", None).await);
    assert_eq!(canonical, expected);
    assert_eq!(owner["lockers"], json!([expected]));
}

#[tokio::test]
async fn test_update_user_keeps_id_and_lockers() {
    let router = test_router();
    send(&router, "POST", "/users", Some(ALICE)).await;
    send(
        &router,
        "POST",
        "/users/0/lockers",
        Some(r#"{"number": "1", "status": "available"}"#),
    )
    .await;

    let response = send(
        &router,
        "PUT",
        "/users/0",
        Some(r#"{"id": 5, "email": "b@x.com", "first_name": "B", "last_name": "Y"}"#),
    )
    .await;
    assert_eq!(response.status(), 200);
    let user = json(&response);
    assert_eq!(user["id"], 0);
    assert_eq!(user["email"], "b@x.com");
    assert_eq!(user["lockers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_user_detaches_lockers() {
    let router = test_router();
    send(&router, "POST", "/users", Some(ALICE)).await;
    send(
        &router,
        "POST",
        "/users/0/lockers",
        Some(r#"{"number": "1", "status": "available"}"#),
    )
    .await;

    let response = send(&router, "DELETE", "/users/0", None).await;
    assert_eq!(response.status(), 204);

    assert_eq!(send(&router, "GET", "/users/0", None).await.status(), 404);
    let locker = json(&send(&router, "GET", "/lockers/0", None).await);
    assert!(locker["user_id"].is_null());
}

#[tokio::test]
async fn test_missing_entities_are_not_found() {
    let router = test_router();

    for (method, path, body) in [
        ("GET", "/users/1", None),
        ("PUT", "/users/1", Some(ALICE)),
        ("DELETE", "/users/1", None),
        ("GET", "/lockers/1", None),
        ("PUT", "/lockers/1", Some(r#"{"number": "1", "status": "a"}"#)),
        ("DELETE", "/lockers/1", None),
    ] {
        let response = send(&router, method, path, body).await;
        assert_eq!(response.status(), 404, "{} {}", method, path);
        assert!(response.body().is_empty());
    }
}

#[tokio::test]
async fn test_routing_errors() {
    let router = test_router();

    let response = send(&router, "GET", "/nowhere", None).await;
    assert_eq!(response.status(), 404);
    assert_eq!(json(&response)["success"], false);

    let response = send(&router, "PATCH", "/users/0", None).await;
    assert_eq!(response.status(), 405);

    let response = send(&router, "DELETE", "/lockers", None).await;
    assert_eq!(response.status(), 405);

    let response = send(&router, "GET", "/users/abc", None).await;
    assert_eq!(response.status(), 400);
}
