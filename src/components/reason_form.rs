//! Reason Form Component
//!
//! Second step of a reject action: collects the reason text.

use leptos::prelude::*;

#[component]
pub fn ReasonForm(
    #[prop(into)] reason: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] on_submit: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
    #[prop(into)] busy: Signal<bool>,
) -> impl IntoView {
    view! {
        <form
            class="reason-form"
            on:submit=move |ev: web_sys::SubmitEvent| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <label>"Rejection reason"</label>
            <textarea
                rows="3"
                prop:value=move || reason.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
            <div class="modal-actions">
                <button type="button" class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                    "Back"
                </button>
                <button type="submit" class="btn btn-danger" disabled=move || busy.get()>
                    "Confirm rejection"
                </button>
            </div>
        </form>
    }
}
