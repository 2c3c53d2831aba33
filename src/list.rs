//! List Handle
//!
//! Binds a `ListController` to the Leptos owner of a page. The controller
//! is not `Send`, so it is stored locally; a version signal bumped by its
//! subscription makes views re-read it.

use leptos::prelude::*;
use leptos::task::spawn_local;
use remote_collection::{
    ActionKind, ActionOutcome, ActionRequest, ApiResult, Entity, FilterCriteria, Filterable, ModalSlot, ModalWorkflow,
    Reconcile, RemoteCollection, SortSpec,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::rc::Rc;

use crate::api::{HttpClient, RemoteList};
use crate::context::use_app_context;
use crate::store::{notify_error, notify_success, use_ui_store, UiStore};

/// Toast texts for one action
#[derive(Clone, Copy, Debug)]
pub struct Notice {
    pub success: &'static str,
    pub failure: &'static str,
}

impl Notice {
    pub const fn new(success: &'static str, failure: &'static str) -> Self {
        Self { success, failure }
    }
}

pub struct ListHandle<T: Entity + 'static> {
    controller: StoredValue<RemoteList<T>, LocalStorage>,
    version: RwSignal<u32>,
    toasts: UiStore,
}

impl<T: Entity + 'static> Clone for ListHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Entity + 'static> Copy for ListHandle<T> {}

/// Build the page's controller, subscribe to it and start the first fetch
pub fn use_list_controller<T>(build: impl FnOnce(Rc<HttpClient>) -> RemoteList<T>) -> ListHandle<T>
where
    T: Entity + DeserializeOwned + 'static,
{
    let ctx = use_app_context();
    let controller = build(ctx.client());
    let version = RwSignal::new(0u32);
    let subscription = controller.subscribe(move || {
        version.try_update(|v| *v = v.wrapping_add(1));
    });
    let stored = StoredValue::new_local(controller);
    on_cleanup(move || {
        stored.try_with_value(|c| c.unsubscribe(subscription));
    });

    let handle = ListHandle { controller: stored, version, toasts: use_ui_store() };
    handle.refresh();
    handle
}

impl<T> ListHandle<T>
where
    T: Entity + DeserializeOwned + 'static,
{
    fn controller(&self) -> RemoteList<T> {
        self.controller.get_value()
    }

    /// Read the collection, tracking changes
    pub fn with_collection<R>(&self, f: impl FnOnce(&RemoteCollection<T>) -> R) -> R {
        self.version.track();
        self.controller.with_value(|c| c.collection().read(f))
    }

    /// Read the modal state, tracking changes
    pub fn with_modals<R>(&self, f: impl FnOnce(&ModalWorkflow<T>) -> R) -> R {
        self.version.track();
        self.controller.with_value(|c| c.modals().read(f))
    }

    /// Read the modal state without tracking, for event handlers
    pub fn peek_modals<R>(&self, f: impl FnOnce(&ModalWorkflow<T>) -> R) -> R {
        self.controller.with_value(|c| c.modals().read(f))
    }

    pub fn update_modals<R>(&self, f: impl FnOnce(&mut ModalWorkflow<T>) -> R) -> R {
        self.controller.with_value(|c| c.modals().update(f))
    }

    pub fn rows(&self, criteria: &FilterCriteria, sort: SortSpec) -> Vec<T>
    where
        T: Filterable,
    {
        self.version.track();
        self.controller.with_value(|c| c.visible(criteria, sort))
    }

    pub fn is_loading(&self) -> bool {
        self.with_collection(|c| c.is_loading)
    }

    pub fn error(&self) -> Option<String> {
        self.with_collection(|c| c.error.clone())
    }

    pub fn is_busy(&self) -> bool {
        self.with_collection(|c| c.is_busy())
    }

    pub fn is_pending_for(&self, kind: ActionKind, id: &T::Id) -> bool {
        self.with_collection(|c| c.is_pending_for(kind, id))
    }

    pub fn is_empty(&self) -> bool {
        self.with_collection(|c| c.items.is_empty())
    }

    // ========================
    // Modals
    // ========================

    pub fn open(&self, slot: ModalSlot, entity: T) {
        self.update_modals(|m| m.open(slot, entity));
    }

    pub fn open_blank(&self, slot: ModalSlot) {
        self.update_modals(|m| m.open_blank(slot));
    }

    pub fn cancel(&self, slot: ModalSlot) {
        self.update_modals(|m| m.cancel(slot));
    }

    pub fn is_open(&self, slot: ModalSlot) -> bool {
        self.with_modals(|m| m.is_open(slot))
    }

    pub fn target(&self, slot: ModalSlot) -> Option<T> {
        self.with_modals(|m| m.target(slot).cloned())
    }

    // ========================
    // Server round trips
    // ========================

    pub fn refresh(&self) {
        let controller = self.controller();
        spawn_local(async move {
            controller.refresh().await;
        });
    }

    /// Run `request`; toasts the outcome
    pub fn dispatch(&self, request: ActionRequest<T>, notice: Notice) {
        let controller = self.controller();
        let toasts = self.toasts;
        spawn_local(async move {
            report(&toasts, controller.dispatch(request).await, notice);
        });
    }

    /// Run `request` for the entity in `slot`; the slot closes on success
    pub fn dispatch_from_modal(&self, slot: ModalSlot, request: ActionRequest<T>, notice: Notice) {
        self.dispatch_from_modal_then(slot, request, notice, || ());
    }

    pub fn dispatch_from_modal_then(
        &self,
        slot: ModalSlot,
        request: ActionRequest<T>,
        notice: Notice,
        on_success: impl FnOnce() + 'static,
    ) {
        let controller = self.controller();
        let toasts = self.toasts;
        spawn_local(async move {
            if report(&toasts, controller.dispatch_from_modal(slot, request).await, notice) {
                on_success();
            }
        });
    }

    /// Like [`dispatch_from_modal`](Self::dispatch_from_modal) for a
    /// request the caller sends itself, such as a multipart upload
    pub fn dispatch_with<F>(
        &self,
        slot: ModalSlot,
        kind: ActionKind,
        entity_id: Option<T::Id>,
        reconcile: Reconcile<T>,
        send: F,
        notice: Notice,
    ) where
        F: Future<Output = ApiResult<Option<Value>>> + 'static,
    {
        let controller = self.controller();
        let toasts = self.toasts;
        spawn_local(async move {
            let result = controller.dispatch_with(kind, entity_id, reconcile, send).await;
            if report(&toasts, result, notice) {
                controller.modals().update(|m| m.complete(slot));
            }
        });
    }

    /// Toast a client-side validation failure without sending anything
    pub fn reject_input(&self, message: String) {
        notify_error(&self.toasts, message);
    }
}

/// Toast the result; true when the server accepted the mutation
fn report<T>(toasts: &UiStore, result: ApiResult<ActionOutcome<T>>, notice: Notice) -> bool {
    match result {
        Ok(outcome) if outcome.succeeded() => {
            notify_success(toasts, notice.success);
            true
        }
        Ok(_) => false,
        Err(err) => {
            if !err.is_unauthorized() {
                notify_error(toasts, err.user_message(notice.failure));
            }
            false
        }
    }
}
