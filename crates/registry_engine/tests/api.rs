use std::time::Duration;

use pretty_assertions::assert_eq;
use registry_engine::{ApiSettings, FailureKind, NewUser, ReqwestUsersApi, UsersApi};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestUsersApi {
    ReqwestUsersApi::new(ApiSettings::new(format!("{}/api", server.uri()))).expect("client")
}

fn jane() -> NewUser {
    NewUser {
        name: "Jane Doe".to_string(),
        mobile: "9876543210".to_string(),
        email: "jane@example.com".to_string(),
    }
}

#[tokio::test]
async fn create_posts_the_draft_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "name": "Jane Doe",
            "mobile": "9876543210",
            "email": "jane@example.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "id": 1,
                "name": "Jane Doe",
                "mobile": "9876543210",
                "email": "jane@example.com",
                "created_at": "2024-01-05T15:07:00Z"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server).create_user(&jane()).await.expect("created");
}

#[tokio::test]
async fn create_accepts_any_json_success_body() {
    let bodies = [
        json!({"data": {"id": "65a1f0c2", "name": "Jane Doe"}, "message": "User registered successfully"}),
        json!({"data": {"insertId": 7}, "success": true}),
        json!({"data": null}),
    ];
    for body in bodies {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(201).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let result = api_for(&server).create_user(&jane()).await;
        assert_eq!(result, Ok(()), "body {body}");
    }
}

#[tokio::test]
async fn create_success_without_json_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .mount(&server)
        .await;

    let err = api_for(&server).create_user(&jane()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn create_rejection_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Email already exists"})),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).create_user(&jane()).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::Rejected {
            status: 400,
            server_message: Some("Email already exists".to_string()),
        }
    );
    assert_eq!(err.server_message(), Some("Email already exists"));
    assert!(err.is_rejection());
}

#[tokio::test]
async fn rejection_without_json_body_has_no_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server).list_users().await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::Rejected {
            status: 500,
            server_message: None,
        }
    );
}

#[tokio::test]
async fn list_returns_users_in_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 9, "name": "Zed", "mobile": "1111111111", "email": "z@x.io", "created_at": "2024-02-01 10:00:00"},
                {"id": 2, "name": "Amy", "mobile": "2222222222", "email": "a@x.io", "created_at": "2024-01-01 10:00:00", "extra": true}
            ]
        })))
        .mount(&server)
        .await;

    let users = api_for(&server).list_users().await.expect("users");
    let ids: Vec<_> = users.iter().map(|user| user.id).collect();
    assert_eq!(ids, vec![9, 2]);
    assert_eq!(users[1].name, "Amy");
}

#[tokio::test]
async fn empty_list_is_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    assert!(api_for(&server).list_users().await.expect("users").is_empty());
}

#[tokio::test]
async fn malformed_success_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = api_for(&server).list_users().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
    assert!(!err.is_rejection());
}

#[tokio::test]
async fn delete_targets_user_path_and_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("whatever"))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server).delete_user(5).await.expect("deleted");
}

#[tokio::test]
async fn delete_rejection_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "User not found"})))
        .mount(&server)
        .await;

    let err = api_for(&server).delete_user(404).await.unwrap_err();
    assert_eq!(err.server_message(), Some("User not found"));
}

#[tokio::test]
async fn base_url_with_trailing_slash_is_joined_cleanly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let api = ReqwestUsersApi::new(ApiSettings::new(format!("{}/api/", server.uri()))).unwrap();
    api.list_users().await.expect("users");
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"data": []})),
        )
        .mount(&server)
        .await;

    let settings = ApiSettings {
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::new(format!("{}/api", server.uri()))
    };
    let err = ReqwestUsersApi::new(settings)
        .unwrap()
        .list_users()
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_failure() {
    // Bind then drop a server so the port is closed.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let api = ReqwestUsersApi::new(ApiSettings::new(format!("{uri}/api"))).unwrap();

    let err = api.list_users().await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
}

#[test]
fn invalid_base_url_is_rejected_up_front() {
    let err = ReqwestUsersApi::new(ApiSettings::new("not a url")).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
    let err = ReqwestUsersApi::new(ApiSettings::new("ftp://example.com")).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
