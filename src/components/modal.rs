//! Modal Components
//!
//! Overlay dialog shell and a confirm dialog built on it.

use leptos::prelude::*;

/// Overlay dialog; clicking the backdrop or × calls `on_close`
#[component]
pub fn Modal(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| on_close.run(())>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <h2>{move || title.get()}</h2>
                        <button class="modal-close" on:click=move |_| on_close.run(())>"×"</button>
                    </div>
                    <div class="modal-body">{children()}</div>
                </div>
            </div>
        </Show>
    }
}

/// Confirmation dialog. Closing it never runs `on_confirm`.
#[component]
pub fn ConfirmModal(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] message: Signal<String>,
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
    #[prop(default = "Delete")] confirm_label: &'static str,
) -> impl IntoView {
    view! {
        <Modal title=title open=open on_close=on_cancel>
            <p class="confirm-message">{move || message.get()}</p>
            <div class="modal-actions">
                <button class="btn btn-secondary" on:click=move |_| on_cancel.run(()) disabled=move || busy.get()>
                    "Cancel"
                </button>
                <button class="btn btn-danger" on:click=move |_| on_confirm.run(()) disabled=move || busy.get()>
                    {move || if busy.get() { "Working..." } else { confirm_label }}
                </button>
            </div>
        </Modal>
    }
}
