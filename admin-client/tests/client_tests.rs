//! Tests for the admin REST client against a mock backend.

use admin_client::{
    AdminClient, AdminClientError, ClientConfig, CommentPatch, NewComment, NewTask, PostDraft,
    TaskPatch, TaskStatus, UserDraft,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AdminClient {
    AdminClient::with_base_url(server.uri()).unwrap()
}

// =============================================================================
// Construction
// =============================================================================

mod construction {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = AdminClient::with_base_url("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn default_config_points_at_localhost() {
        let client = AdminClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn empty_url_rejected() {
        match AdminClient::with_base_url("  ") {
            Err(AdminClientError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected InvalidUrl, got {:?}", other),
        }
    }

    #[test]
    fn url_without_scheme_rejected() {
        assert!(matches!(
            AdminClient::with_base_url("localhost:5000"),
            Err(AdminClientError::InvalidUrl(_))
        ));
    }
}

// =============================================================================
// Users
// =============================================================================

mod users {
    use super::*;

    #[tokio::test]
    async fn list_users_parses_nested_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 1,
                    "name": "Leanne Graham",
                    "username": "Bret",
                    "email": "Sincere@april.biz",
                    "address": { "city": "Gwenborough", "geo": { "lat": "-37.3159", "lng": "81.1496" } },
                    "company": { "name": "Romaguera-Crona", "catchPhrase": "Multi-layered", "bs": "e-markets" }
                },
                { "id": 2, "name": "Ervin Howell", "username": "Antonette", "email": "Shanna@melissa.tv" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let users = client_for(&server).list_users().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].profile.company.name, "Romaguera-Crona");
        assert_eq!(users[1].profile.address.city, "");
    }

    #[tokio::test]
    async fn create_user_posts_json_without_id() {
        let server = MockServer::start().await;
        let draft = UserDraft {
            name: "Kurtis".into(),
            username: "kw".into(),
            email: "kurtis@example.org".into(),
            phone: "555".into(),
            ..Default::default()
        };

        Mock::given(method("POST"))
            .and(path("/users"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::to_value(&draft).unwrap()))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 11,
                "name": "Kurtis",
                "username": "kw",
                "email": "kurtis@example.org",
                "phone": "555"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = client_for(&server).create_user(&draft).await.unwrap();
        assert_eq!(user.id, 11);
        assert_eq!(user.profile.name, "Kurtis");
    }

    #[tokio::test]
    async fn update_user_uses_patch() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/users/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 4, "name": "New" })))
            .expect(1)
            .mount(&server)
            .await;

        let draft = UserDraft {
            name: "New".into(),
            ..Default::default()
        };
        let user = client_for(&server).update_user(4, &draft).await.unwrap();
        assert_eq!(user.id, 4);
    }

    #[tokio::test]
    async fn missing_user_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).get_user(99).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn delete_user_accepts_empty_object_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).delete_user(3).await.unwrap();
    }
}

// =============================================================================
// Posts & comments
// =============================================================================

mod posts_and_comments {
    use super::*;

    #[tokio::test]
    async fn post_fields_use_camel_case() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "userName": "Enamul Hoque",
                "date": "2024-01-02",
                "title": "Hello"
            })))
            .mount(&server)
            .await;

        let post = client_for(&server).get_post(5).await.unwrap();
        assert_eq!(post.content.user_name, "Enamul Hoque");
        assert_eq!(post.content.body, "");
    }

    #[tokio::test]
    async fn create_post_sends_draft() {
        let server = MockServer::start().await;
        let draft = PostDraft {
            user_name: "A".into(),
            date: "2024-05-01".into(),
            photo: String::new(),
            title: "T".into(),
            body: "B".into(),
        };
        Mock::given(method("POST"))
            .and(path("/posts"))
            .and(body_json(json!({
                "userName": "A", "date": "2024-05-01", "photo": "", "title": "T", "body": "B"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 8, "userName": "A", "date": "2024-05-01", "photo": "", "title": "T", "body": "B"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let post = client_for(&server).create_post(&draft).await.unwrap();
        assert_eq!(post.id, 8);
    }

    #[tokio::test]
    async fn comments_are_filtered_by_post_id_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/comments"))
            .and(query_param("postId", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 10, "postId": 2, "name": "n", "email": "e@x.io", "body": "first" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let comments = client_for(&server).list_comments(2).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].post_id, 2);
        assert!(comments[0].created_at.is_none());
    }

    #[tokio::test]
    async fn comment_create_update_delete() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/comments"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 501, "postId": 1, "name": "n", "email": "e@x.io", "body": "hi"
            })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/comments/501"))
            .and(body_json(json!({ "body": "edited" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 501, "postId": 1, "name": "n", "email": "e@x.io", "body": "edited"
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/comments/501"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let created = client
            .create_comment(&NewComment {
                post_id: 1,
                name: "n".into(),
                email: "e@x.io".into(),
                body: "hi".into(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 501);

        let patch = CommentPatch {
            body: Some("edited".into()),
            ..Default::default()
        };
        let updated = client.update_comment(501, &patch).await.unwrap();
        assert_eq!(updated.body, "edited");

        client.delete_comment(501).await.unwrap();
    }
}

// =============================================================================
// Todos & error mapping
// =============================================================================

mod todos {
    use super::*;

    #[tokio::test]
    async fn create_task_starts_uncompleted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/todos"))
            .and(body_json(json!({ "title": "Write docs", "completed": false })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 201, "title": "Write docs", "completed": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let task = client_for(&server)
            .create_task(&NewTask {
                title: "Write docs".into(),
                completed: false,
            })
            .await
            .unwrap();
        assert_eq!(task.status(), TaskStatus::Ongoing);
    }

    #[tokio::test]
    async fn soft_delete_is_a_patch() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/todos/3"))
            .and(body_json(json!({ "deleted": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3, "title": "x", "completed": true, "deleted": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let task = client_for(&server)
            .update_task(3, &TaskPatch::for_status(TaskStatus::Deleted))
            .await
            .unwrap();
        assert_eq!(task.status(), TaskStatus::Deleted);
    }

    #[tokio::test]
    async fn server_errors_carry_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todos"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        match client_for(&server).list_tasks().await {
            Err(AdminClientError::ServerError { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("Expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_tasks().await.unwrap_err();
        assert!(matches!(err, AdminClientError::SerializationError(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let client = AdminClient::with_base_url("http://127.0.0.1:1").unwrap();
        let err = client.list_tasks().await.unwrap_err();
        assert!(err.is_transport());
    }
}
