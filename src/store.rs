//! UI Store
//!
//! App-wide notices kept in a reactive_stores store.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Transient UI state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// Visible notices, oldest first
    pub toasts: Vec<Toast>,
    /// Last id handed out
    pub toast_seq: u32,
    /// Auto-dismiss delay
    pub toast_timeout_ms: u32,
}

impl UiState {
    pub fn new(toast_timeout_ms: u32) -> Self {
        Self { toast_timeout_ms, ..Default::default() }
    }
}

pub type UiStore = Store<UiState>;

/// Get the UI store from context
pub fn use_ui_store() -> UiStore {
    expect_context::<UiStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_toasts(store: &UiStore) -> Vec<Toast> {
    store.toasts().get()
}

/// Add a toast and schedule its dismissal
pub fn store_push_toast(store: &UiStore, kind: ToastKind, message: impl Into<String>) -> u32 {
    let seq = store.toast_seq();
    seq.update(|n| *n += 1);
    let id = seq.get_untracked();
    let toast = Toast { id, kind, message: message.into() };
    store.toasts().update(|list| list.push(toast));

    let timeout = store.toast_timeout_ms().get_untracked();
    let store = *store;
    spawn_local(async move {
        TimeoutFuture::new(timeout).await;
        store_dismiss_toast(&store, id);
    });
    id
}

pub fn store_dismiss_toast(store: &UiStore, id: u32) {
    store.toasts().update(|list| list.retain(|t| t.id != id));
}

pub fn notify_success(store: &UiStore, message: impl Into<String>) {
    store_push_toast(store, ToastKind::Success, message);
}

pub fn notify_error(store: &UiStore, message: impl Into<String>) {
    store_push_toast(store, ToastKind::Error, message);
}
