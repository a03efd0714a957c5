use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==================== Пользователи ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub lng: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub suite: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub geo: Geo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub catch_phrase: String,
    #[serde(default)]
    pub bs: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(flatten)]
    pub profile: UserDraft,
}

/// Everything about a user except the server-assigned id.
///
/// This is the body of both `POST /users` and `PATCH /users/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub company: Company,
}

// ==================== Посты ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(flatten)]
    pub content: PostDraft,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    #[serde(default)]
    pub user_name: String,
    /// Publication date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

// ==================== Комментарии ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub body: String,
    /// Never sent by the backend; filled from the local timestamp store.
    #[serde(skip)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

// ==================== Задачи ====================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Ongoing,
    Completed,
    Deleted,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Ongoing,
        TaskStatus::Completed,
        TaskStatus::Deleted,
    ];

    /// `deleted` wins over `completed`.
    pub fn derive(completed: bool, deleted: bool) -> Self {
        if deleted {
            TaskStatus::Deleted
        } else if completed {
            TaskStatus::Completed
        } else {
            TaskStatus::Ongoing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Ongoing => "ongoing",
            TaskStatus::Completed => "completed",
            TaskStatus::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ongoing" => Ok(TaskStatus::Ongoing),
            "completed" => Ok(TaskStatus::Completed),
            "deleted" => Ok(TaskStatus::Deleted),
            other => Err(format!("unknown task status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    /// Client-only description; the backend create call does not keep it.
    #[serde(default, skip_serializing)]
    pub body: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl Task {
    pub fn status(&self) -> TaskStatus {
        TaskStatus::derive(self.completed, self.deleted)
    }

    /// Sets the flags so that `status()` yields `status`.
    pub fn set_status(&mut self, status: TaskStatus) {
        let patch = TaskPatch::for_status(status);
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(deleted) = patch.deleted {
            self.deleted = deleted;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl TaskPatch {
    /// The minimal PATCH body that moves a task into `status`.
    pub fn for_status(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Ongoing => Self {
                completed: Some(false),
                deleted: Some(false),
                ..Default::default()
            },
            TaskStatus::Completed => Self {
                completed: Some(true),
                deleted: Some(false),
                ..Default::default()
            },
            TaskStatus::Deleted => Self {
                deleted: Some(true),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleted_takes_precedence_over_completed() {
        assert_eq!(TaskStatus::derive(true, true), TaskStatus::Deleted);
        assert_eq!(TaskStatus::derive(false, true), TaskStatus::Deleted);
        assert_eq!(TaskStatus::derive(true, false), TaskStatus::Completed);
        assert_eq!(TaskStatus::derive(false, false), TaskStatus::Ongoing);
    }

    #[test]
    fn status_derivation_is_stable() {
        for completed in [false, true] {
            for deleted in [false, true] {
                let first = TaskStatus::derive(completed, deleted);
                let mut task = Task {
                    id: 1,
                    title: String::new(),
                    body: String::new(),
                    completed,
                    deleted,
                };
                task.set_status(first);
                assert_eq!(task.status(), first);
                assert_eq!(TaskStatus::derive(task.completed, task.deleted), first);
            }
        }
    }

    #[test]
    fn user_round_trips_nested_camel_case() {
        let json = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": { "city": "Gwenborough", "geo": { "lat": "-37.3159", "lng": "81.1496" } },
            "company": { "name": "Romaguera-Crona", "catchPhrase": "Multi-layered" }
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.profile.address.geo.lng, "81.1496");
        assert_eq!(user.profile.company.catch_phrase, "Multi-layered");
        assert_eq!(user.profile.phone, "");

        let value = serde_json::to_value(&user.profile).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["company"]["catchPhrase"], "Multi-layered");
    }

    #[test]
    fn comment_timestamp_is_never_serialized() {
        let comment = Comment {
            id: 3,
            post_id: 1,
            name: "n".into(),
            email: "e@x.io".into(),
            body: "b".into(),
            created_at: Some(Utc::now()),
        };
        let value = serde_json::to_value(&comment).unwrap();
        assert!(value.get("createdAt").is_none());
        assert!(value.get("created_at").is_none());
        assert_eq!(value["postId"], 1);
    }

    #[test]
    fn task_patch_skips_unset_fields() {
        let value = serde_json::to_value(TaskPatch::for_status(TaskStatus::Deleted)).unwrap();
        assert_eq!(value, serde_json::json!({ "deleted": true }));
    }

    #[test]
    fn task_without_deleted_flag_defaults_to_ongoing() {
        let task: Task = serde_json::from_str(r#"{"id":7,"title":"x","completed":false}"#).unwrap();
        assert_eq!(task.status(), TaskStatus::Ongoing);
        assert!(serde_json::to_value(&task).unwrap().get("body").is_none());
    }
}
