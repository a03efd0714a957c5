//! Post detail page with its comment thread.

use crate::error::{ConsoleError, FieldErrors, Result};
use crate::list::{Confirm, LoadState};
use crate::status::StatusBar;
use crate::storage::KeyValueStore;
use crate::time_format::relative_time;
use crate::timestamps::CommentTimestamps;
use admin_client::{AdminClient, Comment, CommentPatch, NewComment, Post};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// What the operator types into the "add comment" box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentInput {
    pub name: String,
    pub email: String,
    pub body: String,
}

pub struct PostDetail {
    client: AdminClient,
    timestamps: CommentTimestamps,
    post_id: i64,
    post: Option<Post>,
    comments: Vec<Comment>,
    state: LoadState,
    status: StatusBar,
}

impl PostDetail {
    pub fn new(client: AdminClient, store: Arc<dyn KeyValueStore>, post_id: i64) -> Self {
        Self {
            client,
            timestamps: CommentTimestamps::new(store),
            post_id,
            post: None,
            comments: Vec::new(),
            state: LoadState::Idle,
            status: StatusBar::default(),
        }
    }

    pub fn post_id(&self) -> i64 {
        self.post_id
    }

    pub fn post(&self) -> Option<&Post> {
        self.post.as_ref()
    }

    /// Most recent first.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comment(&self, id: i64) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn status(&self) -> &StatusBar {
        &self.status
    }

    pub async fn load(&mut self) -> Result<()> {
        self.load_at(Utc::now()).await
    }

    /// Fetches the post and its comments together. Comments never seen
    /// before are stamped with `now`.
    pub async fn load_at(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.state = LoadState::Loading;

        let (post, comments) = tokio::join!(
            self.client.get_post(self.post_id),
            self.client.list_comments(self.post_id)
        );

        let (post, mut comments) = match post.and_then(|p| comments.map(|c| (p, c))) {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::error!("Failed to load post #{}: {}", self.post_id, e);
                self.state = LoadState::Failed(e.to_string());
                self.status.error("Failed to load post");
                return Err(e.into());
            }
        };

        let ids: Vec<i64> = comments.iter().map(|c| c.id).collect();
        match self.timestamps.stamp_all(&ids, now) {
            Ok(stamps) => {
                for (comment, at) in comments.iter_mut().zip(stamps) {
                    comment.created_at = Some(at);
                }
            }
            Err(e) => {
                tracing::warn!("Comment timestamps unavailable: {}", e);
                for comment in comments.iter_mut() {
                    comment.created_at = Some(now);
                }
            }
        }
        // Stable, so equal stamps keep server order.
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        tracing::debug!("Loaded post #{} with {} comment(s)", post.id, comments.len());
        self.post = Some(post);
        self.comments = comments;
        self.state = LoadState::Ready;
        Ok(())
    }

    pub fn age_of(&self, comment_id: i64, now: DateTime<Utc>) -> Option<String> {
        let at = self.comment(comment_id)?.created_at?;
        Some(relative_time(now, at))
    }

    pub async fn add_comment(&mut self, input: CommentInput) -> Result<i64> {
        if input.body.trim().is_empty() {
            return Err(ConsoleError::Validation(FieldErrors::from([(
                "body".to_string(),
                "Comment cannot be empty".to_string(),
            )])));
        }

        let request = NewComment {
            post_id: self.post_id,
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            body: input.body.trim().to_string(),
        };

        match self.client.create_comment(&request).await {
            Ok(mut created) => {
                let now = Utc::now();
                if let Err(e) = self.timestamps.record(created.id, now) {
                    tracing::warn!("Failed to persist timestamp for comment #{}: {}", created.id, e);
                }
                created.created_at = Some(now);
                let id = created.id;
                self.comments.insert(0, created);
                self.status.success("Comment added");
                Ok(id)
            }
            Err(e) => {
                tracing::error!("Failed to add comment to post #{}: {}", self.post_id, e);
                self.status.error("Failed to add comment");
                Err(e.into())
            }
        }
    }

    /// Replaces only the fields set in `patch`; everything else is kept.
    pub async fn edit_comment(&mut self, id: i64, patch: CommentPatch) -> Result<()> {
        if self.comment(id).is_none() {
            return Err(ConsoleError::NotFound(id));
        }

        if let Err(e) = self.client.update_comment(id, &patch).await {
            tracing::error!("Failed to update comment #{}: {}", id, e);
            self.status.error("Failed to update comment");
            return Err(e.into());
        }

        if let Some(comment) = self.comments.iter_mut().find(|c| c.id == id) {
            if let Some(name) = patch.name {
                comment.name = name;
            }
            if let Some(email) = patch.email {
                comment.email = email;
            }
            if let Some(body) = patch.body {
                comment.body = body;
            }
        }
        self.status.success("Comment updated");
        Ok(())
    }

    pub async fn delete_comment(&mut self, id: i64, confirm: &dyn Confirm) -> Result<bool> {
        if self.comment(id).is_none() {
            return Err(ConsoleError::NotFound(id));
        }
        if !confirm.confirm("Delete this comment?") {
            return Ok(false);
        }

        if let Err(e) = self.client.delete_comment(id).await {
            tracing::error!("Failed to delete comment #{}: {}", id, e);
            self.status.error("Failed to delete comment");
            return Err(e.into());
        }

        self.comments.retain(|c| c.id != id);
        if let Err(e) = self.timestamps.forget(id) {
            tracing::warn!("Failed to drop timestamp for comment #{}: {}", id, e);
        }
        self.status.success("Comment deleted");
        Ok(true)
    }
}
