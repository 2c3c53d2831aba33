//! Collection Fetcher
//!
//! One request per call, no retries. A failure is stored as a message next
//! to the last good items. Responses that lose the race against a newer
//! fetch are dropped on arrival.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::rc::Rc;

use crate::client::ApiClient;
use crate::collection::{LoadOutcome, RemoteCollection};
use crate::entity::Entity;
use crate::envelope::decode_collection;
use crate::error::ApiResult;
use crate::query::CollectionQuery;
use crate::state::SharedState;

const DEFAULT_LOAD_ERROR: &str = "Failed to load data";

/// Secondary source used once when the primary endpoint comes back empty
pub struct Fallback<T> {
    path: String,
    derive: Rc<dyn Fn(Value) -> ApiResult<Vec<T>>>,
}

impl<T> Clone for Fallback<T> {
    fn clone(&self) -> Self {
        Self { path: self.path.clone(), derive: Rc::clone(&self.derive) }
    }
}

impl<T> Fallback<T> {
    /// `derive` maps the secondary response body to reduced-fidelity items
    pub fn new(path: impl Into<String>, derive: impl Fn(Value) -> ApiResult<Vec<T>> + 'static) -> Self {
        Self { path: path.into(), derive: Rc::new(derive) }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Loads collections through an [`ApiClient`]
pub struct CollectionFetcher<C> {
    client: Rc<C>,
    error_message: String,
}

impl<C> Clone for CollectionFetcher<C> {
    fn clone(&self) -> Self {
        Self { client: Rc::clone(&self.client), error_message: self.error_message.clone() }
    }
}

impl<C: ApiClient> CollectionFetcher<C> {
    pub fn new(client: Rc<C>) -> Self {
        Self { client, error_message: DEFAULT_LOAD_ERROR.to_string() }
    }

    /// Message stored when a failure carries no server text
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    pub async fn load<T>(&self, state: &SharedState<RemoteCollection<T>>, endpoint: &str, query: &CollectionQuery) -> LoadOutcome
    where
        T: Entity + DeserializeOwned,
    {
        self.run(state, &query.to_path(endpoint), None).await
    }

    /// Like [`load`](Self::load), falling back to `fallback` once when the
    /// primary endpoint returns nothing or fails.
    pub async fn load_with_fallback<T>(
        &self,
        state: &SharedState<RemoteCollection<T>>,
        endpoint: &str,
        query: &CollectionQuery,
        fallback: &Fallback<T>,
    ) -> LoadOutcome
    where
        T: Entity + DeserializeOwned,
    {
        self.run(state, &query.to_path(endpoint), Some(fallback)).await
    }

    async fn run<T>(&self, state: &SharedState<RemoteCollection<T>>, path: &str, fallback: Option<&Fallback<T>>) -> LoadOutcome
    where
        T: Entity + DeserializeOwned,
    {
        let ticket = state.update(|c| c.begin_load());
        log::debug!("GET {} ({:?})", path, ticket);
        let mut result = self.fetch_items::<T>(path).await;

        if let Some(fallback) = fallback {
            if !state.read(|c| c.is_latest(ticket)) {
                log::debug!("discarded stale response for {}", path);
                return LoadOutcome::Stale;
            }
            result = match result {
                Ok(items) if items.is_empty() => match self.fetch_fallback(fallback).await {
                    Ok(derived) => Ok(derived),
                    Err(err) => {
                        log::warn!("fallback {} failed: {}", fallback.path(), err);
                        Ok(items)
                    }
                },
                Err(err) if !err.is_unauthorized() => match self.fetch_fallback(fallback).await {
                    Ok(derived) => Ok(derived),
                    Err(fallback_err) => {
                        log::warn!("fallback {} failed: {}", fallback.path(), fallback_err);
                        Err(err)
                    }
                },
                other => other,
            };
        }

        if let Err(err) = &result {
            log::warn!("GET {} failed: {}", path, err);
        }
        let outcome = state.update(|c| c.finish_load(ticket, result, |err| err.user_message(&self.error_message)));
        if outcome == LoadOutcome::Stale {
            log::debug!("discarded stale response for {}", path);
        }
        outcome
    }

    async fn fetch_items<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<T>> {
        let body = self.client.get(path).await?;
        let (items, _page) = decode_collection(body)?;
        Ok(items)
    }

    async fn fetch_fallback<T>(&self, fallback: &Fallback<T>) -> ApiResult<Vec<T>> {
        log::debug!("primary collection empty, deriving from {}", fallback.path());
        let body = self.client.get(fallback.path()).await?;
        (fallback.derive)(body)
    }
}
