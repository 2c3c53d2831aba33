//! Action Dispatcher
//!
//! Runs one remote mutation for a list and reconciles the local collection
//! when it succeeds. Only one mutation per list is in flight; a second
//! trigger while one is pending is dropped without a request.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use crate::client::{ApiClient, Method};
use crate::collection::{Placement, RemoteCollection};
use crate::entity::Entity;
use crate::error::{ApiError, ApiResult};
use crate::state::SharedState;

/// Class of mutation, used for the pending slot and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Create,
    Update,
    Approve,
    Reject,
    Verify,
    Activate,
    Archive,
    Delete,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Create => "create",
            ActionKind::Update => "update",
            ActionKind::Approve => "approve",
            ActionKind::Reject => "reject",
            ActionKind::Verify => "verify",
            ActionKind::Activate => "activate",
            ActionKind::Archive => "archive",
            ActionKind::Delete => "delete",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the local list follows a successful mutation
pub enum Reconcile<T> {
    /// Entity deleted: drop it by id
    Remove,
    /// Entity changed: splice the returned entity by id. Without a body the
    /// patch closure runs on the cached entity, or the list is refetched
    /// when there is none.
    Replace { on_empty: Option<Box<dyn FnOnce(&mut T)>> },
    /// Entity created: place the returned entity, refetch without a body
    Insert(Placement),
    /// Always refetch
    Refetch,
}

impl<T> Reconcile<T> {
    pub fn replace_or_refetch() -> Self {
        Reconcile::Replace { on_empty: None }
    }

    pub fn replace_or_patch(patch: impl FnOnce(&mut T) + 'static) -> Self {
        Reconcile::Replace { on_empty: Some(Box::new(patch)) }
    }
}

impl<T> fmt::Debug for Reconcile<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reconcile::Remove => f.write_str("Remove"),
            Reconcile::Replace { on_empty } => f
                .debug_struct("Replace")
                .field("patch", &on_empty.is_some())
                .finish(),
            Reconcile::Insert(placement) => f.debug_tuple("Insert").field(placement).finish(),
            Reconcile::Refetch => f.write_str("Refetch"),
        }
    }
}

/// Result of a dispatched mutation
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome<T> {
    /// Local list patched; carries the entity the server returned, if any
    Applied(Option<T>),
    /// Succeeded, but the list had to be refetched to reflect it
    RefetchRequired,
    /// Another mutation was pending; nothing was sent
    Skipped,
}

impl<T> ActionOutcome<T> {
    /// True when the server accepted the mutation
    pub fn succeeded(&self) -> bool {
        !matches!(self, ActionOutcome::Skipped)
    }
}

/// One mutation to send
pub struct ActionRequest<T: Entity> {
    pub kind: ActionKind,
    pub entity_id: Option<T::Id>,
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub reconcile: Reconcile<T>,
}

impl<T: Entity> fmt::Debug for ActionRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRequest")
            .field("kind", &self.kind)
            .field("entity_id", &self.entity_id)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("reconcile", &self.reconcile)
            .finish()
    }
}

impl<T: Entity> ActionRequest<T> {
    /// `DELETE path`, then remove `id` locally
    pub fn delete(id: T::Id, path: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Delete,
            entity_id: Some(id),
            method: Method::Delete,
            path: path.into(),
            body: None,
            reconcile: Reconcile::Remove,
        }
    }

    /// State change on `id` (approve, verify, activate...), replaced locally
    pub fn transition(kind: ActionKind, id: T::Id, method: Method, path: impl Into<String>) -> Self {
        Self {
            kind,
            entity_id: Some(id),
            method,
            path: path.into(),
            body: Some(json!({})),
            reconcile: Reconcile::replace_or_refetch(),
        }
    }

    /// `POST path` with `body`, inserting the created entity
    pub fn create(path: impl Into<String>, body: Value, placement: Placement) -> Self {
        Self {
            kind: ActionKind::Create,
            entity_id: None,
            method: Method::Post,
            path: path.into(),
            body: Some(body),
            reconcile: Reconcile::Insert(placement),
        }
    }

    /// `POST path {reason_field: reason}`. An empty reason is rejected
    /// here, before anything can reach the network.
    pub fn reject(id: T::Id, path: impl Into<String>, reason_field: &str, reason: &str) -> ApiResult<Self> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ApiError::Validation("rejection reason is required".to_string()));
        }
        let mut body = serde_json::Map::new();
        body.insert(reason_field.to_string(), Value::String(reason.to_string()));
        Ok(Self {
            kind: ActionKind::Reject,
            entity_id: Some(id),
            method: Method::Post,
            path: path.into(),
            body: Some(Value::Object(body)),
            reconcile: Reconcile::replace_or_refetch(),
        })
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_reconcile(mut self, reconcile: Reconcile<T>) -> Self {
        self.reconcile = reconcile;
        self
    }

    /// Patch the cached entity when the server answers without a body
    pub fn patch_on_empty(self, patch: impl FnOnce(&mut T) + 'static) -> Self {
        self.with_reconcile(Reconcile::replace_or_patch(patch))
    }
}

/// Sends mutations and reconciles the collection
pub struct ActionDispatcher<C> {
    client: Rc<C>,
}

impl<C> Clone for ActionDispatcher<C> {
    fn clone(&self) -> Self {
        Self { client: Rc::clone(&self.client) }
    }
}

impl<C: ApiClient> ActionDispatcher<C> {
    pub fn new(client: Rc<C>) -> Self {
        Self { client }
    }

    /// Send `request` through the client and reconcile on success.
    pub async fn execute<T>(
        &self,
        state: &SharedState<RemoteCollection<T>>,
        request: ActionRequest<T>,
    ) -> ApiResult<ActionOutcome<T>>
    where
        T: Entity + DeserializeOwned,
    {
        let ActionRequest { kind, entity_id, method, path, body, reconcile } = request;
        log::debug!("{} {} ({})", method, path, kind);
        let client = Rc::clone(&self.client);
        let send = async move { client.request(method, &path, body.as_ref()).await };
        self.execute_with(state, kind, entity_id, reconcile, send).await
    }

    /// Same contract as [`execute`](Self::execute) for a caller-built
    /// request (e.g. a multipart upload). `send` is not polled when another
    /// mutation is pending.
    pub async fn execute_with<T, F>(
        &self,
        state: &SharedState<RemoteCollection<T>>,
        kind: ActionKind,
        entity_id: Option<T::Id>,
        reconcile: Reconcile<T>,
        send: F,
    ) -> ApiResult<ActionOutcome<T>>
    where
        T: Entity + DeserializeOwned,
        F: Future<Output = ApiResult<Option<Value>>>,
    {
        if !state.update(|c| c.try_begin_action(kind, entity_id.clone())) {
            log::debug!("{} on {:?} skipped: another action is pending", kind, entity_id);
            return Ok(ActionOutcome::Skipped);
        }

        match send.await {
            Ok(body) => {
                let returned = decode_entity::<T>(kind, body);
                Ok(state.update(|c| {
                    let outcome = reconcile_local(c, entity_id.as_ref(), reconcile, returned);
                    c.invalidate_loads();
                    c.end_action();
                    outcome
                }))
            }
            Err(err) => {
                log::warn!("{} on {:?} failed: {}", kind, entity_id, err);
                state.update(|c| c.end_action());
                Err(err)
            }
        }
    }
}

fn decode_entity<T: DeserializeOwned>(kind: ActionKind, body: Option<Value>) -> Option<T> {
    let body = body.filter(|v| !v.is_null())?;
    match serde_json::from_value(body) {
        Ok(entity) => Some(entity),
        Err(err) => {
            log::warn!("{} response is not an entity: {}", kind, err);
            None
        }
    }
}

fn reconcile_local<T: Entity>(
    coll: &mut RemoteCollection<T>,
    entity_id: Option<&T::Id>,
    reconcile: Reconcile<T>,
    returned: Option<T>,
) -> ActionOutcome<T> {
    match reconcile {
        Reconcile::Remove => {
            if let Some(id) = entity_id {
                coll.remove(id);
            }
            ActionOutcome::Applied(None)
        }
        Reconcile::Replace { on_empty } => match (returned, on_empty) {
            (Some(entity), _) => {
                if !coll.replace(entity.clone()) {
                    log::debug!("updated entity {} is not in the list", entity.id());
                }
                ActionOutcome::Applied(Some(entity))
            }
            (None, Some(patch)) => {
                if let Some(id) = entity_id {
                    coll.patch(id, patch);
                }
                ActionOutcome::Applied(None)
            }
            (None, None) => ActionOutcome::RefetchRequired,
        },
        Reconcile::Insert(placement) => match returned {
            Some(entity) => {
                coll.insert(entity.clone(), placement);
                ActionOutcome::Applied(Some(entity))
            }
            None => ActionOutcome::RefetchRequired,
        },
        Reconcile::Refetch => ActionOutcome::RefetchRequired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Row, ScriptedClient};

    #[test]
    fn test_reject_requires_reason() {
        let err = ActionRequest::<Row>::reject("p1".into(), "/projects/p1/reject", "rejectionReason", "  \n").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let req = ActionRequest::<Row>::reject("p1".into(), "/projects/p1/reject", "rejectionReason", " Budget ").unwrap();
        assert_eq!(req.body, Some(json!({"rejectionReason": "Budget"})));
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.kind, ActionKind::Reject);
    }

    #[test]
    fn test_reconcile_replace_without_body_patches() {
        let mut coll = RemoteCollection::with_items(vec![Row::new("1", "A").status("PENDING")]);
        let outcome = reconcile_local(
            &mut coll,
            Some(&"1".to_string()),
            Reconcile::replace_or_patch(|r: &mut Row| r.status = "VERIFIED".into()),
            None,
        );
        assert_eq!(outcome, ActionOutcome::Applied(None));
        assert_eq!(coll.items[0].status, "VERIFIED");
    }

    #[test]
    fn test_reconcile_insert_without_body_needs_refetch() {
        let mut coll = RemoteCollection::<Row>::new();
        let outcome = reconcile_local(&mut coll, None, Reconcile::Insert(Placement::Prepend), None);
        assert_eq!(outcome, ActionOutcome::RefetchRequired);
        assert!(coll.items.is_empty());
    }

    #[test]
    fn test_non_entity_body_is_ignored() {
        assert!(decode_entity::<Row>(ActionKind::Approve, Some(json!({"message": "ok"}))).is_none());
        assert!(decode_entity::<Row>(ActionKind::Approve, Some(Value::Null)).is_none());
        assert!(decode_entity::<Row>(ActionKind::Approve, None).is_none());
    }

    #[tokio::test]
    async fn test_failure_leaves_items_and_clears_pending() {
        let client = ScriptedClient::new();
        client.reply(Err(ApiError::from_status(403, Some("Forbidden".into()))));
        let dispatcher = ActionDispatcher::new(client.clone());
        let state = SharedState::new(RemoteCollection::with_items(vec![Row::new("1", "A")]));

        let err = dispatcher
            .execute(&state, ActionRequest::delete("1".to_string(), "/periods/1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
        assert_eq!(state.read(|c| c.items.len()), 1);
        assert!(!state.read(|c| c.is_busy()));
        assert_eq!(client.calls()[0].method, Method::Delete);
    }
}
