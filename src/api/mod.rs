//! REST API Bindings
//!
//! The HTTP client plus endpoint wrappers, organized by domain. List
//! screens get a configured `ListController`; mutations are built as
//! `ActionRequest`s so the controller can reconcile the list.

mod activity;
mod archives;
mod auth;
mod dashboard;
mod events;
mod finance;
mod http;
mod letters;
mod members;
mod periods;
mod projects;

pub use activity::*;
pub use archives::*;
pub use auth::*;
pub use dashboard::*;
pub use events::*;
pub use finance::*;
pub use http::HttpClient;
pub use letters::*;
pub use members::*;
pub use periods::*;
pub use projects::*;

use remote_collection::ListController;

/// List controller talking to the backend
pub type RemoteList<T> = ListController<T, HttpClient>;
