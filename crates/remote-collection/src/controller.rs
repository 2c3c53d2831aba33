//! List Controller
//!
//! One list page: its collection, its modals, the fetcher and dispatcher
//! that talk to the server on its behalf. Cloning shares the same state.

use serde::de::DeserializeOwned;
use std::future::Future;
use std::rc::Rc;

use serde_json::Value;

use crate::client::ApiClient;
use crate::collection::{LoadOutcome, RemoteCollection};
use crate::dispatcher::{ActionDispatcher, ActionKind, ActionOutcome, ActionRequest, Reconcile};
use crate::entity::Entity;
use crate::error::ApiResult;
use crate::fetcher::{CollectionFetcher, Fallback};
use crate::filter::{derive, FilterCriteria, Filterable, SortSpec};
use crate::modal::{ModalSlot, ModalWorkflow};
use crate::query::CollectionQuery;
use crate::state::{SharedState, SubscriptionId};

/// Subscriber ids returned by [`ListController::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    collection: SubscriptionId,
    modals: SubscriptionId,
}

pub struct ListController<T: Entity, C> {
    fetcher: CollectionFetcher<C>,
    dispatcher: ActionDispatcher<C>,
    endpoint: String,
    query: CollectionQuery,
    fallback: Option<Fallback<T>>,
    collection: SharedState<RemoteCollection<T>>,
    modals: SharedState<ModalWorkflow<T>>,
}

impl<T: Entity, C> Clone for ListController<T, C> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            dispatcher: self.dispatcher.clone(),
            endpoint: self.endpoint.clone(),
            query: self.query.clone(),
            fallback: self.fallback.clone(),
            collection: self.collection.clone(),
            modals: self.modals.clone(),
        }
    }
}

impl<T, C> ListController<T, C>
where
    T: Entity + DeserializeOwned,
    C: ApiClient,
{
    pub fn new(client: Rc<C>, endpoint: impl Into<String>, query: CollectionQuery) -> Self {
        Self {
            fetcher: CollectionFetcher::new(Rc::clone(&client)),
            dispatcher: ActionDispatcher::new(client),
            endpoint: endpoint.into(),
            query,
            fallback: None,
            collection: SharedState::new(RemoteCollection::new()),
            modals: SharedState::new(ModalWorkflow::new()),
        }
    }

    pub fn with_fallback(mut self, fallback: Fallback<T>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Message shown when a load fails without server text
    pub fn with_load_error(mut self, message: impl Into<String>) -> Self {
        self.fetcher = self.fetcher.with_error_message(message);
        self
    }

    pub fn collection(&self) -> &SharedState<RemoteCollection<T>> {
        &self.collection
    }

    pub fn modals(&self) -> &SharedState<ModalWorkflow<T>> {
        &self.modals
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn refresh(&self) -> LoadOutcome {
        match &self.fallback {
            Some(fallback) => self.fetcher.load_with_fallback(&self.collection, &self.endpoint, &self.query, fallback).await,
            None => self.fetcher.load(&self.collection, &self.endpoint, &self.query).await,
        }
    }

    /// Run `request`; refetches the list when the response can't be spliced.
    pub async fn dispatch(&self, request: ActionRequest<T>) -> ApiResult<ActionOutcome<T>> {
        let outcome = self.dispatcher.execute(&self.collection, request).await?;
        self.follow_up(&outcome).await;
        Ok(outcome)
    }

    /// [`dispatch`](Self::dispatch) for a caller-built request
    pub async fn dispatch_with<F>(
        &self,
        kind: ActionKind,
        entity_id: Option<T::Id>,
        reconcile: Reconcile<T>,
        send: F,
    ) -> ApiResult<ActionOutcome<T>>
    where
        F: Future<Output = ApiResult<Option<Value>>>,
    {
        let outcome = self.dispatcher.execute_with(&self.collection, kind, entity_id, reconcile, send).await?;
        self.follow_up(&outcome).await;
        Ok(outcome)
    }

    /// Dispatch from an open modal. The list is patched first; the modal
    /// closes only when the server accepted the mutation.
    pub async fn dispatch_from_modal(&self, slot: ModalSlot, request: ActionRequest<T>) -> ApiResult<ActionOutcome<T>> {
        let outcome = self.dispatch(request).await?;
        if outcome.succeeded() {
            self.modals.update(|m| m.complete(slot));
        }
        Ok(outcome)
    }

    async fn follow_up(&self, outcome: &ActionOutcome<T>) {
        if matches!(outcome, ActionOutcome::RefetchRequired) {
            self.refresh().await;
        }
    }

    /// Filtered and sorted rows for display
    pub fn visible(&self, criteria: &FilterCriteria, sort: SortSpec) -> Vec<T>
    where
        T: Filterable,
    {
        self.collection.read(|c| derive(&c.items, criteria, sort))
    }

    /// Call `on_change` whenever the collection or the modals change
    pub fn subscribe(&self, on_change: impl Fn() + 'static) -> Subscription {
        let on_change: Rc<dyn Fn()> = Rc::new(on_change);
        let for_modals = Rc::clone(&on_change);
        Subscription {
            collection: self.collection.subscribe(move || on_change()),
            modals: self.modals.subscribe(move || for_modals()),
        }
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.collection.unsubscribe(subscription.collection);
        self.modals.unsubscribe(subscription.modals);
    }
}
