//! Headless state for the admin console: list views, forms, the post detail
//! page and the task board. Nothing here renders; front ends drive these
//! types and draw whatever they expose.

pub mod debounce;
pub mod detail;
pub mod email_check;
pub mod error;
pub mod form;
pub mod form_controller;
pub mod list;
pub mod paging;
pub mod preferences;
pub mod records;
pub mod search;
pub mod status;
pub mod storage;
pub mod tasks;
pub mod time_format;
pub mod timestamps;

pub use detail::{CommentInput, PostDetail};
pub use email_check::{BlocklistCheck, UniquenessCheck};
pub use error::{ConsoleError, FieldErrors, Result};
pub use form::{EmailCheck, FormEvent, FormMode, FormRecord, FormState};
pub use form_controller::FormController;
pub use list::{Confirm, ListResource, ListView, LoadState};
pub use paging::{Pagination, DEFAULT_ITEMS_PER_PAGE};
pub use preferences::{Preferences, Tab};
pub use records::{Navigate, RemoteRecord};
pub use search::Searchable;
pub use status::{StatusBar, StatusKind, StatusMessage};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use tasks::TaskBoard;
pub use time_format::relative_time;
pub use timestamps::CommentTimestamps;

use admin_client::{Post, PostDraft, User, UserDraft};

pub type UserList = ListView<User>;
pub type PostList = ListView<Post>;
pub type UserForm = FormController<UserDraft>;
pub type PostForm = FormController<PostDraft>;
