//! List/search/paginate view shared by every resource tab.

use crate::error::{ConsoleError, Result};
use crate::paging::Pagination;
use crate::search::{self, Searchable};
use crate::status::StatusBar;
use admin_client::{AdminClient, AdminClientError, Post, Task, TaskPatch, TaskStatus, User};
use async_trait::async_trait;
use std::fmt;

/// Asks the operator to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    /// Distinct from a `Ready` view with zero rows.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Hard delete: the row disappears.
    Removed,
    /// Soft delete: the row stays and is relabelled.
    SoftDeleted,
}

#[async_trait]
pub trait ListResource: Searchable + Clone + Send + Sync + 'static {
    /// Sub-tab filter applied before the search term.
    type Scope: Copy + Default + PartialEq + fmt::Debug + Send + Sync;

    /// Plural noun used in summaries and messages.
    const NOUN: &'static str;

    fn id(&self) -> i64;

    fn label(&self) -> String;

    fn in_scope(&self, _scope: &Self::Scope) -> bool {
        true
    }

    /// Local relabelling after a soft delete.
    fn mark_deleted(&mut self) {}

    async fn fetch_all(client: &AdminClient) -> std::result::Result<Vec<Self>, AdminClientError>;

    async fn delete_remote(
        client: &AdminClient,
        id: i64,
    ) -> std::result::Result<DeleteOutcome, AdminClientError>;
}

#[async_trait]
impl ListResource for User {
    type Scope = ();
    const NOUN: &'static str = "users";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        self.profile.name.clone()
    }

    async fn fetch_all(client: &AdminClient) -> std::result::Result<Vec<Self>, AdminClientError> {
        client.list_users().await
    }

    async fn delete_remote(
        client: &AdminClient,
        id: i64,
    ) -> std::result::Result<DeleteOutcome, AdminClientError> {
        client.delete_user(id).await?;
        Ok(DeleteOutcome::Removed)
    }
}

#[async_trait]
impl ListResource for Post {
    type Scope = ();
    const NOUN: &'static str = "posts";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        self.content.title.clone()
    }

    async fn fetch_all(client: &AdminClient) -> std::result::Result<Vec<Self>, AdminClientError> {
        client.list_posts().await
    }

    async fn delete_remote(
        client: &AdminClient,
        id: i64,
    ) -> std::result::Result<DeleteOutcome, AdminClientError> {
        client.delete_post(id).await?;
        Ok(DeleteOutcome::Removed)
    }
}

#[async_trait]
impl ListResource for Task {
    type Scope = TaskStatus;
    const NOUN: &'static str = "tasks";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn in_scope(&self, scope: &TaskStatus) -> bool {
        self.status() == *scope
    }

    fn mark_deleted(&mut self) {
        self.set_status(TaskStatus::Deleted);
    }

    async fn fetch_all(client: &AdminClient) -> std::result::Result<Vec<Self>, AdminClientError> {
        client.list_tasks().await
    }

    async fn delete_remote(
        client: &AdminClient,
        id: i64,
    ) -> std::result::Result<DeleteOutcome, AdminClientError> {
        client
            .update_task(id, &TaskPatch::for_status(TaskStatus::Deleted))
            .await?;
        Ok(DeleteOutcome::SoftDeleted)
    }
}

pub struct ListView<T: ListResource> {
    client: AdminClient,
    items: Vec<T>,
    state: LoadState,
    search_term: String,
    scope: T::Scope,
    pagination: Pagination,
    status: StatusBar,
}

impl<T: ListResource> ListView<T> {
    pub fn new(client: AdminClient, items_per_page: usize) -> Self {
        Self {
            client,
            items: Vec::new(),
            state: LoadState::Idle,
            search_term: String::new(),
            scope: T::Scope::default(),
            pagination: Pagination::new(items_per_page),
            status: StatusBar::default(),
        }
    }

    pub fn client(&self) -> &AdminClient {
        &self.client
    }

    /// Fetches the whole collection. On failure the list is emptied and the
    /// view enters `LoadState::Failed`.
    pub async fn load(&mut self) -> Result<()> {
        self.state = LoadState::Loading;

        match T::fetch_all(&self.client).await {
            Ok(items) => {
                tracing::debug!("Loaded {} {}", items.len(), T::NOUN);
                self.items = items;
                self.state = LoadState::Ready;
                self.clamp_page();
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to fetch {}: {}", T::NOUN, e);
                self.items.clear();
                self.state = LoadState::Failed(e.to_string());
                self.status.error(format!("Failed to load {}", T::NOUN));
                Err(e.into())
            }
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Loaded fine, nothing matches.
    pub fn is_empty_result(&self) -> bool {
        self.state == LoadState::Ready && self.filtered_count() == 0
    }

    pub fn status(&self) -> &StatusBar {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusBar {
        &mut self.status
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Changing the term always returns to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.pagination.reset();
    }

    pub fn scope(&self) -> T::Scope {
        self.scope
    }

    /// Switching sub-tab always returns to page 1.
    pub fn set_scope(&mut self, scope: T::Scope) {
        self.scope = scope;
        self.pagination.reset();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub(crate) fn item_mut(&mut self, id: i64) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Search term, then scope. Keeps server order.
    pub fn filtered(&self) -> Vec<&T> {
        search::filter(&self.items, &self.search_term)
            .into_iter()
            .filter(|item| item.in_scope(&self.scope))
            .collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    /// Rows on the current page.
    pub fn visible(&self) -> Vec<&T> {
        let filtered = self.filtered();
        let range = self.pagination.bounds(filtered.len());
        filtered[range].to_vec()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.filtered_count())
    }

    pub fn go_to_page(&mut self, page: usize) {
        let count = self.filtered_count();
        self.pagination.go_to(page, count);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page() + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.current_page().saturating_sub(1));
    }

    pub fn summary(&self) -> String {
        self.pagination.summary(self.filtered_count(), T::NOUN)
    }

    fn clamp_page(&mut self) {
        self.go_to_page(self.current_page());
    }

    pub(crate) fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Per-row delete. Returns `Ok(false)` when the operator declines.
    /// On failure the local list is left untouched.
    pub async fn delete(&mut self, id: i64, confirm: &dyn Confirm) -> Result<bool> {
        let label = self
            .item(id)
            .map(|item| item.label())
            .ok_or(ConsoleError::NotFound(id))?;

        if !confirm.confirm(&format!("Delete \"{}\"?", label)) {
            return Ok(false);
        }

        match T::delete_remote(&self.client, id).await {
            Ok(DeleteOutcome::Removed) => {
                self.items.retain(|item| item.id() != id);
                self.clamp_page();
                self.status.success(format!("Deleted \"{}\"", label));
                Ok(true)
            }
            Ok(DeleteOutcome::SoftDeleted) => {
                if let Some(item) = self.item_mut(id) {
                    item.mark_deleted();
                }
                self.clamp_page();
                self.status.success(format!("Moved \"{}\" to deleted", label));
                Ok(true)
            }
            Err(e) => {
                tracing::error!("Failed to delete {} #{}: {}", T::NOUN, id, e);
                self.status.error(format!("Failed to delete \"{}\"", label));
                Err(e.into())
            }
        }
    }
}
