//! Task board: the list view over todos, split into status tabs, with
//! multi-select status transitions.

use crate::error::{ConsoleError, Result};
use crate::list::{Confirm, ListView};
use admin_client::{AdminClient, NewTask, Task, TaskPatch, TaskStatus};
use futures::future::join_all;
use std::collections::BTreeSet;

pub struct TaskBoard {
    list: ListView<Task>,
    selection: BTreeSet<i64>,
}

impl TaskBoard {
    pub fn new(client: AdminClient, items_per_page: usize) -> Self {
        Self {
            list: ListView::new(client, items_per_page),
            selection: BTreeSet::new(),
        }
    }

    pub fn list(&self) -> &ListView<Task> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView<Task> {
        &mut self.list
    }

    pub async fn load(&mut self) -> Result<()> {
        self.list.load().await
    }

    pub fn tab(&self) -> TaskStatus {
        self.list.scope()
    }

    /// Switching tabs resets the page and drops the selection.
    pub fn set_tab(&mut self, tab: TaskStatus) {
        self.list.set_scope(tab);
        self.selection.clear();
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.list
            .items()
            .iter()
            .filter(|task| task.status() == status)
            .count()
    }

    pub fn selection(&self) -> &BTreeSet<i64> {
        &self.selection
    }

    /// Returns whether the id is selected afterwards. Unknown ids are ignored.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.list.item(id).is_none() {
            return false;
        }
        if !self.selection.remove(&id) {
            self.selection.insert(id);
            return true;
        }
        false
    }

    pub fn select(&mut self, ids: impl IntoIterator<Item = i64>) {
        for id in ids {
            if self.list.item(id).is_some() {
                self.selection.insert(id);
            }
        }
    }

    pub fn select_visible(&mut self) {
        let ids: Vec<i64> = self.list.visible().iter().map(|task| task.id).collect();
        self.selection.extend(ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub async fn create(&mut self, title: &str, body: &str) -> Result<i64> {
        let request = NewTask {
            title: title.trim().to_string(),
            completed: false,
        };

        match self.list.client().create_task(&request).await {
            Ok(mut task) => {
                task.body = body.to_string();
                let id = task.id;
                self.list.prepend(task);
                self.list.status_mut().success("Task created");
                Ok(id)
            }
            Err(e) => {
                tracing::error!("Failed to create task: {}", e);
                self.list.status_mut().error("Failed to create task");
                Err(e.into())
            }
        }
    }

    pub async fn complete(&mut self, id: i64) -> Result<()> {
        self.transition_one(id, TaskStatus::Completed).await
    }

    /// Soft delete through the shared list path.
    pub async fn delete(&mut self, id: i64, confirm: &dyn Confirm) -> Result<bool> {
        let deleted = self.list.delete(id, confirm).await?;
        if deleted {
            self.selection.remove(&id);
        }
        Ok(deleted)
    }

    async fn transition_one(&mut self, id: i64, target: TaskStatus) -> Result<()> {
        if self.list.item(id).is_none() {
            return Err(ConsoleError::NotFound(id));
        }

        let patch = TaskPatch::for_status(target);
        match self.list.client().update_task(id, &patch).await {
            Ok(_) => {
                if let Some(task) = self.list.item_mut(id) {
                    task.set_status(target);
                }
                self.list.go_to_page(self.list.current_page());
                self.list
                    .status_mut()
                    .success(format!("Task marked {}", target));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to mark task #{} {}: {}", id, target, e);
                self.list.status_mut().error("Failed to update task");
                Err(e.into())
            }
        }
    }

    /// Moves every selected task to `target`.
    ///
    /// One PATCH per id, dispatched together. Local state changes only when
    /// every request succeeded; otherwise nothing changes locally and the
    /// selection is kept. Remote PATCHes that did succeed are not reverted.
    pub async fn bulk_transition(&mut self, target: TaskStatus) -> Result<usize> {
        let ids: Vec<i64> = self.selection.iter().copied().collect();
        if ids.is_empty() {
            return Ok(0);
        }

        let patch = TaskPatch::for_status(target);
        let client = self.list.client().clone();
        let results = join_all(ids.iter().map(|id| client.update_task(*id, &patch))).await;

        let failed: Vec<i64> = ids
            .iter()
            .zip(&results)
            .filter(|(_, result)| result.is_err())
            .map(|(id, _)| *id)
            .collect();

        if !failed.is_empty() {
            for (id, result) in ids.iter().zip(&results) {
                if let Err(e) = result {
                    tracing::warn!("Bulk update of task #{} failed: {}", id, e);
                }
            }
            let total = ids.len();
            self.list.status_mut().error(format!(
                "Failed to update {} of {} tasks",
                failed.len(),
                total
            ));
            return Err(ConsoleError::BulkUpdate {
                failed: failed.len(),
                total,
            });
        }

        for id in &ids {
            if let Some(task) = self.list.item_mut(*id) {
                task.set_status(target);
            }
        }
        self.selection.clear();
        self.list.go_to_page(self.list.current_page());
        self.list
            .status_mut()
            .success(format!("{} task(s) moved to {}", ids.len(), target));
        tracing::info!("Moved {} task(s) to {}", ids.len(), target);
        Ok(ids.len())
    }
}
