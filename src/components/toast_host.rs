//! Toast Host Component
//!
//! Renders the store's notices; click to dismiss early.

use leptos::prelude::*;

use crate::store::{store_dismiss_toast, store_toasts, use_ui_store};

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_ui_store();

    view! {
        <div class="toast-host">
            <For
                each=move || store_toasts(&store)
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() on:click=move |_| store_dismiss_toast(&store, id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
