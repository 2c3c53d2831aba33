//! Archives Page

use leptos::prelude::*;
use remote_collection::{ActionKind, FilterCriteria, FilterValue, ModalSlot, SortSpec};

use crate::api;
use crate::components::{ChoiceFilter, ConfirmModal, ListStatus, SearchInput, SortSelect, StatusBadge};
use crate::context::use_app_context;
use crate::list::{use_list_controller, ListHandle, Notice};
use crate::models::{choice_label, date_part, Archive, Role, ARCHIVE_TYPES};

const SEARCH_FIELDS: &[&str] = &["title", "archiveCode"];

const DELETED: Notice = Notice::new("Archive deleted", "Failed to delete archive");

#[component]
pub fn ArchivesPage() -> impl IntoView {
    let list = use_list_controller(api::archive_list);

    let search = RwSignal::new(String::new());
    let archive_type = RwSignal::new(String::new());
    let sort = RwSignal::new(SortSpec::default());

    let rows = move || {
        let criteria = FilterCriteria::new(SEARCH_FIELDS)
            .with_search(search.get())
            .with_filter("archiveType", FilterValue::from_option(&archive_type.get()));
        list.rows(&criteria, sort.get())
    };

    let confirm_delete = move |_: ()| {
        if let Some(archive) = list.peek_modals(|m| m.confirm(ModalSlot::DeleteConfirm)) {
            list.dispatch_from_modal(ModalSlot::DeleteConfirm, api::delete_archive(&archive.id), DELETED);
        }
    };

    view! {
        <div class="page archives-page">
            <div class="page-toolbar">
                <SearchInput value=search placeholder="Search title or code..." />
                <ChoiceFilter value=archive_type choices=ARCHIVE_TYPES any_label="All types" />
                <SortSelect value=sort />
            </div>

            <ListStatus
                loading=Signal::derive(move || list.is_loading())
                error=Signal::derive(move || list.error())
                empty=Signal::derive(move || list.is_empty())
                empty_text="Nothing archived yet"
                on_retry=move |_| list.refresh()
            />

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Code"</th>
                        <th>"Title"</th>
                        <th>"Type"</th>
                        <th>"Source"</th>
                        <th>"Published"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || rows().into_iter().map(|archive| view! { <ArchiveRow archive=archive list=list /> }).collect_view()}
                </tbody>
            </table>

            <ConfirmModal
                title="Delete archive"
                message=Signal::derive(move || {
                    list.target(ModalSlot::DeleteConfirm)
                        .map(|a| format!("Delete archive {}?", a.title))
                        .unwrap_or_default()
                })
                open=Signal::derive(move || list.is_open(ModalSlot::DeleteConfirm))
                busy=Signal::derive(move || list.is_busy())
                on_confirm=confirm_delete
                on_cancel=move |_| list.cancel(ModalSlot::DeleteConfirm)
            />
        </div>
    }
}

#[component]
fn ArchiveRow(archive: Archive, list: ListHandle<Archive>) -> impl IntoView {
    let ctx = use_app_context();
    let id = archive.id.clone();
    let deleting = move || list.is_pending_for(ActionKind::Delete, &id);
    let target = archive.clone();

    let published = match (archive.publish_location.clone(), archive.publish_date.as_deref()) {
        (Some(location), Some(date)) => format!("{} ({})", location, date_part(date)),
        (Some(location), None) => location,
        (None, Some(date)) => date_part(date).to_string(),
        (None, None) => "-".to_string(),
    };

    view! {
        <tr class:row-busy=deleting>
            <td class="mono">{archive.archive_code.clone()}</td>
            <td>
                {archive.title.clone()}
                {archive.description.clone().map(|d| view! { <div class="row-subtitle">{d}</div> })}
            </td>
            <td>
                <StatusBadge status=archive.archive_type.clone() label=choice_label(ARCHIVE_TYPES, &archive.archive_type) />
            </td>
            <td>{archive.source_type.clone()}</td>
            <td>{published}</td>
            <td class="row-actions">
                <Show when=move || ctx.allows(Role::can_delete)>
                    {
                        let target = target.clone();
                        view! {
                            <button
                                class="btn btn-small btn-danger"
                                disabled=move || list.is_busy()
                                on:click=move |_| list.open(ModalSlot::DeleteConfirm, target.clone())
                            >
                                "Delete"
                            </button>
                        }
                    }
                </Show>
            </td>
        </tr>
    }
}
