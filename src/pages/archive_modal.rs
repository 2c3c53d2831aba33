//! Archive Modal
//!
//! Creates an archive entry from a completed project or event.

use leptos::prelude::*;

use crate::components::Modal;
use crate::models::{ArchiveSource, CreateArchiveRequest, ARCHIVE_TYPES};

#[component]
pub fn ArchiveModal(
    source: ArchiveSource,
    #[prop(into)] open: Signal<bool>,
    /// Id and name of the project or event being archived
    #[prop(into)] target: Signal<Option<(String, String)>>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_submit: Callback<CreateArchiveRequest>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let archive_type = RwSignal::new(String::from("DOCUMENT"));
    let description = RwSignal::new(String::new());
    let publish_location = RwSignal::new(String::new());
    let publish_date = RwSignal::new(String::new());

    // Prefill from the newly targeted entity
    Effect::new(move |previous: Option<Option<String>>| {
        let current = target.get();
        let id = current.as_ref().map(|(id, _)| id.clone());
        if let Some((_, name)) = current {
            if previous.flatten() != id {
                title.set(name);
                description.set(String::new());
                publish_location.set(String::new());
                publish_date.set(String::new());
            }
        }
        id
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some((id, _)) = target.get_untracked() else { return };
        let request = CreateArchiveRequest::from_source(source, &id, &title.get_untracked(), &archive_type.get_untracked())
            .with_details(&description.get_untracked(), &publish_location.get_untracked(), &publish_date.get_untracked());
        on_submit.run(request);
    };

    let heading = move || {
        let name = target.with(|t| t.as_ref().map(|(_, name)| name.clone()).unwrap_or_default());
        format!("Archive: {}", name)
    };

    view! {
        <Modal title=Signal::derive(heading) open=open on_close=on_cancel>
            <form class="modal-form" on:submit=submit>
                <label>
                    "Title"
                    <input type="text" prop:value=move || title.get() on:input=move |ev| title.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Type"
                    <select on:change=move |ev| archive_type.set(event_target_value(&ev))>
                        {ARCHIVE_TYPES
                            .iter()
                            .map(|(value, label)| {
                                let value = *value;
                                view! { <option value=value selected=move || archive_type.get() == value>{*label}</option> }
                            })
                            .collect_view()}
                    </select>
                </label>
                <label>
                    "Description"
                    <textarea rows="3" prop:value=move || description.get() on:input=move |ev| description.set(event_target_value(&ev))></textarea>
                </label>
                <label>
                    "Publish location"
                    <input
                        type="text"
                        placeholder="Drive link or shelf"
                        prop:value=move || publish_location.get()
                        on:input=move |ev| publish_location.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Publish date"
                    <input type="date" prop:value=move || publish_date.get() on:input=move |ev| publish_date.set(event_target_value(&ev)) />
                </label>
                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                    <button type="submit" class="btn btn-primary" disabled=move || busy.get()>"Archive"</button>
                </div>
            </form>
        </Modal>
    }
}
