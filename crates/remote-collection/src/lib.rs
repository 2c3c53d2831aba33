//! Remote Collection Controller
//!
//! Client-side view state for list screens backed by a REST API:
//! - fetcher: loads a collection, discards stale responses
//! - filter: pure filter/sort derivation of the displayed rows
//! - dispatcher: remote mutations with local reconciliation
//! - modal: which secondary view is open and what it targets
//! - controller: one list page wiring all of the above together

mod client;
mod collection;
mod controller;
mod dispatcher;
mod entity;
mod envelope;
mod error;
mod fetcher;
mod filter;
mod modal;
mod query;
mod state;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use client::{ApiClient, Method};
pub use collection::{LoadOutcome, LoadTicket, PendingAction, Placement, RemoteCollection};
pub use controller::{ListController, Subscription};
pub use dispatcher::{ActionDispatcher, ActionKind, ActionOutcome, ActionRequest, Reconcile};
pub use entity::Entity;
pub use envelope::{decode_collection, CollectionPayload, PageEnvelope, PageInfo};
pub use error::{ApiError, ApiResult};
pub use fetcher::{CollectionFetcher, Fallback};
pub use filter::{derive, parse_timestamp, FilterCriteria, FilterValue, Filterable, SortSpec};
pub use modal::{ModalSlot, ModalTarget, ModalWorkflow, ReasonPrompt};
pub use query::{CollectionQuery, PageRequest, FETCH_ALL_PAGE_SIZE};
pub use state::{SharedState, SubscriptionId};
