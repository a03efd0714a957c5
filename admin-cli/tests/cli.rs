//! End-to-end runs of the `admin` binary against a mock backend.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn admin(server: &str, state: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("admin").unwrap();
    cmd.env_remove("ADMIN_API_URL")
        .env_remove("ADMIN_PER_PAGE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .args(["--server", server, "--yes", "--state-dir"])
        .arg(state.path());
    cmd
}

fn users_json(count: i64) -> Value {
    Value::Array(
        (1..=count)
            .map(|i| {
                json!({
                    "id": i,
                    "name": format!("User {}", i),
                    "username": format!("user{}", i),
                    "email": format!("user{}@example.com", i),
                    "company": { "name": "Acme" },
                    "address": { "city": "Gwenborough" }
                })
            })
            .collect(),
    )
}

fn read_state(state: &TempDir) -> String {
    std::fs::read_to_string(state.path().join("state.json")).unwrap_or_default()
}

#[test]
fn help_lists_resources() {
    Command::cargo_bin("admin")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("users"))
        .stdout(predicate::str::contains("posts"))
        .stdout(predicate::str::contains("tasks"))
        .stdout(predicate::str::contains("home"));
}

#[tokio::test(flavor = "multi_thread")]
async fn users_list_shows_requested_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_json(7)))
        .mount(&server)
        .await;
    let state = TempDir::new().unwrap();

    admin(&server.uri(), &state)
        .args(["users", "list", "--page", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[7] US User 7 @user7"))
        .stdout(predicate::str::contains("Acme • Gwenborough"))
        .stdout(predicate::str::contains("Showing 7–7 of 7 users"))
        .stdout(predicate::str::contains("Page 3 of 3"))
        .stdout(predicate::str::contains("User 1").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn users_list_search_hides_pager() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_json(7)))
        .mount(&server)
        .await;
    let state = TempDir::new().unwrap();

    admin(&server.uri(), &state)
        .args(["users", "list", "--search", "USER7@"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1–1 of 1 users"))
        .stdout(predicate::str::contains("Page ").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_fails_the_list() {
    let state = TempDir::new().unwrap();

    admin("http://127.0.0.1:1", &state)
        .args(["users", "list"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed to load users"));
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_user_create_never_posts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let state = TempDir::new().unwrap();

    admin(&server.uri(), &state)
        .args(["users", "create"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Please fix all errors"))
        .stdout(predicate::str::contains("name: Name is required"))
        .stdout(predicate::str::contains("address.city: City is required"));
}

#[tokio::test(flavor = "multi_thread")]
async fn sample_user_is_created() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 11,
            "name": "Leanne Graham"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let state = TempDir::new().unwrap();

    admin(&server.uri(), &state)
        .args(["users", "create", "--sample", "--set", "username=leanne"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User created successfully!"))
        .stdout(predicate::str::contains("Next: admin users list"));
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_field_is_rejected() {
    let server = MockServer::start().await;
    let state = TempDir::new().unwrap();

    admin(&server.uri(), &state)
        .args(["users", "create", "--set", "address.planet=Mars"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unknown field: address.planet"));
}

#[test]
fn post_draft_is_saved_locally() {
    let state = TempDir::new().unwrap();

    admin("http://127.0.0.1:1", &state)
        .args(["posts", "create", "--set", "title=Half written", "--save-draft"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Draft saved"));

    assert!(read_state(&state).contains("draft:posts"));
}

#[tokio::test(flavor = "multi_thread")]
async fn post_show_lists_comments_with_ages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "userName": "Enamul Hoque",
            "date": "2024-03-01",
            "title": "Hello",
            "body": "World"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(query_param("postId", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "postId": 7, "name": "Ann", "email": "ann@x.io", "body": "Nice post" }
        ])))
        .mount(&server)
        .await;
    let state = TempDir::new().unwrap();

    admin(&server.uri(), &state)
        .args(["posts", "show", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Published on 2024-03-01"))
        .stdout(predicate::str::contains("Comments (1)"))
        .stdout(predicate::str::contains("Nice post"))
        .stdout(predicate::str::contains("Just now"));

    assert!(read_state(&state).contains("commentTimestamps"));
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_bulk_update_reports_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "One", "completed": false },
            { "id": 2, "title": "Two", "completed": false }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/todos/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "title": "One", "completed": true })),
        )
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/todos/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let state = TempDir::new().unwrap();

    admin(&server.uri(), &state)
        .args(["tasks", "bulk", "1,2", "--to", "completed"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed to update 1 of 2 tasks"));
}

#[tokio::test(flavor = "multi_thread")]
async fn repeated_bulk_ids_are_not_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "One", "completed": false }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/todos/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "title": "One", "completed": true })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let state = TempDir::new().unwrap();

    admin(&server.uri(), &state)
        .args(["tasks", "bulk", "1,1", "--to", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ignoring").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn home_reopens_last_tab() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "Write report", "completed": false }
        ])))
        .mount(&server)
        .await;
    let state = TempDir::new().unwrap();

    admin(&server.uri(), &state)
        .args(["tasks", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Write report"));

    admin(&server.uri(), &state)
        .arg("home")
        .assert()
        .success()
        .stdout(predicate::str::contains("Last active tab: tasks"))
        .stdout(predicate::str::contains("[ongoing (1)]"));
}
