pub mod error;
pub mod http_client;
pub mod models;

pub use error::AdminClientError;
pub use http_client::{ClientConfig, HttpClient, DEFAULT_BASE_URL};
pub use models::*;

/// Backend-managed collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Posts,
    Comments,
    Todos,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Posts => "posts",
            Resource::Comments => "comments",
            Resource::Todos => "todos",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Typed REST client for the admin backend.
///
/// Every method is a single request; failures propagate unchanged.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: HttpClient,
}

impl AdminClient {
    pub fn new(config: ClientConfig) -> Result<Self, AdminClientError> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, AdminClientError> {
        Self::new(ClientConfig::new(base_url))
    }

    /// Raw verbs for callers that need an endpoint without a typed helper.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    // Users

    pub async fn list_users(&self) -> Result<Vec<User>, AdminClientError> {
        let users: Vec<User> = self.http.get(Resource::Users.path()).await?;
        tracing::debug!("Fetched {} users", users.len());
        Ok(users)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, AdminClientError> {
        self.http.get_by_id(Resource::Users.path(), id).await
    }

    pub async fn create_user(&self, draft: &UserDraft) -> Result<User, AdminClientError> {
        let user: User = self.http.create(Resource::Users.path(), draft).await?;
        tracing::info!("Created user #{}", user.id);
        Ok(user)
    }

    pub async fn update_user(&self, id: i64, draft: &UserDraft) -> Result<User, AdminClientError> {
        let user = self.http.update(Resource::Users.path(), id, draft).await?;
        tracing::info!("Updated user #{}", id);
        Ok(user)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), AdminClientError> {
        self.http.remove(Resource::Users.path(), id).await?;
        tracing::info!("Deleted user #{}", id);
        Ok(())
    }

    // Posts

    pub async fn list_posts(&self) -> Result<Vec<Post>, AdminClientError> {
        let posts: Vec<Post> = self.http.get(Resource::Posts.path()).await?;
        tracing::debug!("Fetched {} posts", posts.len());
        Ok(posts)
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, AdminClientError> {
        self.http.get_by_id(Resource::Posts.path(), id).await
    }

    pub async fn create_post(&self, draft: &PostDraft) -> Result<Post, AdminClientError> {
        let post: Post = self.http.create(Resource::Posts.path(), draft).await?;
        tracing::info!("Created post #{}", post.id);
        Ok(post)
    }

    pub async fn update_post(&self, id: i64, draft: &PostDraft) -> Result<Post, AdminClientError> {
        let post = self.http.update(Resource::Posts.path(), id, draft).await?;
        tracing::info!("Updated post #{}", id);
        Ok(post)
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), AdminClientError> {
        self.http.remove(Resource::Posts.path(), id).await?;
        tracing::info!("Deleted post #{}", id);
        Ok(())
    }

    // Comments

    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, AdminClientError> {
        self.http
            .get_with_query(Resource::Comments.path(), &[("postId", post_id.to_string())])
            .await
    }

    pub async fn create_comment(&self, comment: &NewComment) -> Result<Comment, AdminClientError> {
        let created: Comment = self.http.create(Resource::Comments.path(), comment).await?;
        tracing::info!("Created comment #{} on post #{}", created.id, created.post_id);
        Ok(created)
    }

    pub async fn update_comment(
        &self,
        id: i64,
        patch: &CommentPatch,
    ) -> Result<Comment, AdminClientError> {
        self.http.update(Resource::Comments.path(), id, patch).await
    }

    pub async fn delete_comment(&self, id: i64) -> Result<(), AdminClientError> {
        self.http.remove(Resource::Comments.path(), id).await
    }

    // Todos

    pub async fn list_tasks(&self) -> Result<Vec<Task>, AdminClientError> {
        self.http.get(Resource::Todos.path()).await
    }

    pub async fn create_task(&self, task: &NewTask) -> Result<Task, AdminClientError> {
        let created: Task = self.http.create(Resource::Todos.path(), task).await?;
        tracing::info!("Created task #{}", created.id);
        Ok(created)
    }

    pub async fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Task, AdminClientError> {
        self.http.update(Resource::Todos.path(), id, patch).await
    }
}
