//! Periods Page
//!
//! Academic periods. Admins create, activate, archive and delete them.

use leptos::prelude::*;
use remote_collection::{ActionKind, FilterCriteria, ModalSlot, SortSpec};

use crate::api;
use crate::components::{ConfirmButton, ListStatus, Modal, SearchInput, SortSelect, StatusBadge};
use crate::context::use_app_context;
use crate::list::{use_list_controller, ListHandle, Notice};
use crate::models::{date_part, CreatePeriodRequest, Period, Role};

const SEARCH_FIELDS: &[&str] = &["code", "name"];

const CREATED: Notice = Notice::new("Period created", "Failed to create period");
const ACTIVATED: Notice = Notice::new("Period activated", "Failed to activate period");
const ARCHIVED: Notice = Notice::new("Period archived", "Failed to archive period");
const DELETED: Notice = Notice::new("Period deleted", "Failed to delete period");

#[component]
pub fn PeriodsPage() -> impl IntoView {
    let ctx = use_app_context();
    let list = use_list_controller(api::period_list);

    let search = RwSignal::new(String::new());
    let sort = RwSignal::new(SortSpec::default());

    let rows = move || {
        let criteria = FilterCriteria::new(SEARCH_FIELDS).with_search(search.get());
        list.rows(&criteria, sort.get())
    };

    view! {
        <div class="page periods-page">
            <div class="page-toolbar">
                <SearchInput value=search placeholder="Search code or name..." />
                <SortSelect value=sort />
                <Show when=move || ctx.allows(Role::can_manage_periods)>
                    <button class="btn btn-primary" on:click=move |_| list.open_blank(ModalSlot::Create)>
                        "New period"
                    </button>
                </Show>
            </div>

            <ListStatus
                loading=Signal::derive(move || list.is_loading())
                error=Signal::derive(move || list.error())
                empty=Signal::derive(move || list.is_empty())
                empty_text="No periods yet"
                on_retry=move |_| list.refresh()
            />

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Code"</th>
                        <th>"Name"</th>
                        <th>"Start"</th>
                        <th>"End"</th>
                        <th>"State"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || rows().into_iter().map(|period| view! { <PeriodRow period=period list=list /> }).collect_view()}
                </tbody>
            </table>

            <CreatePeriodModal list=list />
        </div>
    }
}

#[component]
fn PeriodRow(period: Period, list: ListHandle<Period>) -> impl IntoView {
    let ctx = use_app_context();
    let id = period.id.clone();
    let busy_row = move || list.with_collection(|c| c.pending().is_some_and(|p| p.entity_id.as_ref() == Some(&id)));
    let state = period.state();
    let can_activate = !period.is_active && !period.is_archived;
    let can_archive = !period.is_archived;

    let activate_id = period.id.clone();
    let archive_id = period.id.clone();
    let delete_id = period.id.clone();

    view! {
        <tr class:row-busy=busy_row class:row-active=period.is_active>
            <td class="mono">{period.code.clone()}</td>
            <td>{period.name.clone()}</td>
            <td>{period.start_date.as_deref().map(date_part).unwrap_or("-").to_string()}</td>
            <td>{period.end_date.as_deref().map(date_part).unwrap_or("-").to_string()}</td>
            <td><StatusBadge status=state label=state /></td>
            <td class="row-actions">
                <Show when=move || ctx.allows(Role::can_manage_periods)>
                    {
                        let activate_id = activate_id.clone();
                        let archive_id = archive_id.clone();
                        let delete_id = delete_id.clone();
                        view! {
                            <Show when=move || can_activate>
                                {
                                    let id = activate_id.clone();
                                    view! {
                                        <ConfirmButton
                                            label="Activate"
                                            prompt="Activate?"
                                            button_class="btn btn-small"
                                            disabled=Signal::derive(move || list.is_busy())
                                            on_confirm=move |_| list.dispatch(api::activate_period(&id), ACTIVATED)
                                        />
                                    }
                                }
                            </Show>
                            <Show when=move || can_archive>
                                {
                                    let id = archive_id.clone();
                                    view! {
                                        <ConfirmButton
                                            label="Archive"
                                            prompt="Archive?"
                                            button_class="btn btn-small"
                                            disabled=Signal::derive(move || list.is_busy())
                                            on_confirm=move |_| list.dispatch(api::archive_period(&id), ARCHIVED)
                                        />
                                    }
                                }
                            </Show>
                            <ConfirmButton
                                label="Delete"
                                prompt="Delete?"
                                button_class="btn btn-small btn-danger"
                                disabled=Signal::derive(move || list.is_busy())
                                on_confirm=move |_| list.dispatch(api::delete_period(&delete_id), DELETED)
                            />
                        }
                    }
                </Show>
            </td>
        </tr>
    }
}

#[component]
fn CreatePeriodModal(list: ListHandle<Period>) -> impl IntoView {
    let code = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let start_date = RwSignal::new(String::new());
    let end_date = RwSignal::new(String::new());

    let reset = move || {
        code.set(String::new());
        name.set(String::new());
        start_date.set(String::new());
        end_date.set(String::new());
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = CreatePeriodRequest {
            code: code.get_untracked().trim().to_string(),
            name: name.get_untracked().trim().to_string(),
            start_date: start_date.get_untracked(),
            end_date: end_date.get_untracked(),
        };
        match api::create_period(&request) {
            Ok(action) => list.dispatch_from_modal(ModalSlot::Create, action, CREATED),
            Err(err) => list.reject_input(err.user_message(CREATED.failure)),
        }
    };

    // Start from a blank form each time the modal opens
    Effect::new(move |was_open: Option<bool>| {
        let open = list.is_open(ModalSlot::Create);
        if open && was_open != Some(true) {
            reset();
        }
        open
    });

    let creating = move || list.with_collection(|c| c.pending().is_some_and(|p| p.kind == ActionKind::Create));

    view! {
        <Modal
            title="New period"
            open=Signal::derive(move || list.is_open(ModalSlot::Create))
            on_close=move |_| list.cancel(ModalSlot::Create)
        >
            <form class="modal-form" on:submit=submit>
                <label>
                    "Code"
                    <input type="text" placeholder="2024/2025" prop:value=move || code.get() on:input=move |ev| code.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Name"
                    <input type="text" prop:value=move || name.get() on:input=move |ev| name.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Start date"
                    <input type="date" prop:value=move || start_date.get() on:input=move |ev| start_date.set(event_target_value(&ev)) />
                </label>
                <label>
                    "End date"
                    <input type="date" prop:value=move || end_date.get() on:input=move |ev| end_date.set(event_target_value(&ev)) />
                </label>
                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" on:click=move |_| list.cancel(ModalSlot::Create)>"Cancel"</button>
                    <button type="submit" class="btn btn-primary" disabled=creating>
                        {move || if creating() { "Saving..." } else { "Create" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
