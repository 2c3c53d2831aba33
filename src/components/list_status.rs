//! List Status Component
//!
//! Loading, error and empty states shown above a table.

use leptos::prelude::*;

#[component]
pub fn ListStatus(
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] empty: Signal<bool>,
    #[prop(into)] empty_text: String,
    #[prop(into)] on_retry: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || loading.get()>
            <div class="list-loading">"Loading..."</div>
        </Show>
        {move || {
            error
                .get()
                .map(|message| {
                    view! {
                        <div class="list-error">
                            <span>{message}</span>
                            <button class="btn btn-secondary" on:click=move |_| on_retry.run(())>"Retry"</button>
                        </div>
                    }
                })
        }}
        <Show when=move || !loading.get() && empty.get()>
            <div class="list-empty">{empty_text.clone()}</div>
        </Show>
    }
}
