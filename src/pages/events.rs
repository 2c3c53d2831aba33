//! Events Page
//!
//! Event list with delete and archive, plus the admin create form with
//! its schedule rows.

use leptos::prelude::*;
use remote_collection::{ActionKind, FilterCriteria, FilterValue, ModalSlot, SortSpec};

use super::archive_modal::ArchiveModal;
use crate::api;
use super::load_member_options;
use crate::components::{ChoiceFilter, ConfirmModal, ListStatus, Modal, SearchInput, SortSelect, StatusBadge};
use crate::context::use_app_context;
use crate::list::{use_list_controller, ListHandle, Notice};
use crate::models::{
    choice_label, date_part, ArchiveSource, CreateArchiveRequest, CreateEventRequest, Event, EventScheduleRequest, Member,
    Role, EVENT_STATUSES,
};

const SEARCH_FIELDS: &[&str] = &["name", "eventCode"];

const CREATED: Notice = Notice::new("Event created", "Failed to create event");
const DELETED: Notice = Notice::new("Event deleted", "Failed to delete event");
const ARCHIVED: Notice = Notice::new("Event archived", "Failed to archive event");

#[component]
pub fn EventsPage() -> impl IntoView {
    let ctx = use_app_context();
    let list = use_list_controller(api::event_list);

    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let sort = RwSignal::new(SortSpec::default());

    let rows = move || {
        let criteria = FilterCriteria::new(SEARCH_FIELDS)
            .with_search(search.get())
            .with_filter("status", FilterValue::from_option(&status.get()));
        list.rows(&criteria, sort.get())
    };

    let confirm_delete = move |_: ()| {
        if let Some(event) = list.peek_modals(|m| m.confirm(ModalSlot::DeleteConfirm)) {
            list.dispatch_from_modal(ModalSlot::DeleteConfirm, api::delete_event(&event.id), DELETED);
        }
    };

    let submit_archive = move |archive: CreateArchiveRequest| {
        let Some(event) = list.peek_modals(|m| m.confirm(ModalSlot::Archive)) else { return };
        match api::archive_event(&event.id, &archive) {
            Ok(request) => list.dispatch_from_modal(ModalSlot::Archive, request, ARCHIVED),
            Err(err) => list.reject_input(err.user_message(ARCHIVED.failure)),
        }
    };

    view! {
        <div class="page events-page">
            <div class="page-toolbar">
                <SearchInput value=search placeholder="Search name or code..." />
                <ChoiceFilter value=status choices=EVENT_STATUSES any_label="All statuses" />
                <SortSelect value=sort />
                <button class="btn btn-secondary" on:click=move |_| list.refresh()>"Refresh"</button>
                <Show when=move || ctx.allows(Role::is_admin)>
                    <button class="btn btn-primary" on:click=move |_| list.open_blank(ModalSlot::Create)>"New event"</button>
                </Show>
            </div>

            <ListStatus
                loading=Signal::derive(move || list.is_loading())
                error=Signal::derive(move || list.error())
                empty=Signal::derive(move || list.is_empty())
                empty_text="No events yet"
                on_retry=move |_| list.refresh()
            />

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Code"</th>
                        <th>"Name"</th>
                        <th>"Date"</th>
                        <th>"Location"</th>
                        <th>"PIC"</th>
                        <th>"Status"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || rows().into_iter().map(|event| view! { <EventRow event=event list=list /> }).collect_view()}
                </tbody>
            </table>

            <ConfirmModal
                title="Delete event"
                message=Signal::derive(move || {
                    list.target(ModalSlot::DeleteConfirm)
                        .map(|e| format!("Delete {}? This cannot be undone.", e.name))
                        .unwrap_or_default()
                })
                open=Signal::derive(move || list.is_open(ModalSlot::DeleteConfirm))
                busy=Signal::derive(move || list.is_busy())
                on_confirm=confirm_delete
                on_cancel=move |_| list.cancel(ModalSlot::DeleteConfirm)
            />

            <ArchiveModal
                source=ArchiveSource::Event
                open=Signal::derive(move || list.is_open(ModalSlot::Archive))
                target=Signal::derive(move || list.target(ModalSlot::Archive).map(|e| (e.id, e.name)))
                busy=Signal::derive(move || list.is_busy())
                on_submit=submit_archive
                on_cancel=move |_| list.cancel(ModalSlot::Archive)
            />

            <CreateEventModal list=list />
        </div>
    }
}

#[component]
fn EventRow(event: Event, list: ListHandle<Event>) -> impl IntoView {
    let ctx = use_app_context();
    let id = event.id.clone();
    let deleting = move || list.is_pending_for(ActionKind::Delete, &id);
    let completed = event.is_completed();
    let archive_target = event.clone();
    let delete_target = event.clone();

    let dates = match (event.start_date.as_deref(), event.end_date.as_deref()) {
        (Some(start), Some(end)) if date_part(start) != date_part(end) => {
            format!("{} to {}", date_part(start), date_part(end))
        }
        (Some(start), _) => date_part(start).to_string(),
        _ => "-".to_string(),
    };

    view! {
        <tr class:row-busy=deleting>
            <td class="mono">{event.event_code.clone()}</td>
            <td>{event.name.clone()}</td>
            <td>{dates}</td>
            <td>{event.location.clone().unwrap_or_else(|| "-".into())}</td>
            <td>{event.pic_display().to_string()}</td>
            <td>
                <StatusBadge status=event.status.clone() label=choice_label(EVENT_STATUSES, &event.status) />
            </td>
            <td class="row-actions">
                <Show when=move || completed && ctx.allows(Role::can_archive)>
                    {
                        let target = archive_target.clone();
                        view! {
                            <button
                                class="btn btn-small"
                                disabled=move || list.is_busy()
                                on:click=move |_| list.open(ModalSlot::Archive, target.clone())
                            >
                                "Archive"
                            </button>
                        }
                    }
                </Show>
                <Show when=move || ctx.allows(Role::can_delete)>
                    {
                        let target = delete_target.clone();
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

/// Schedule row being edited; `row` keys it across re-renders
#[derive(Debug, Clone, PartialEq)]
struct ScheduleDraft {
    row: u32,
    schedule: EventScheduleRequest,
}

#[component]
fn CreateEventModal(list: ListHandle<Event>) -> impl IntoView {
    let ctx = use_app_context();
    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let start_date = RwSignal::new(String::new());
    let end_date = RwSignal::new(String::new());
    let pic_id = RwSignal::new(String::new());
    let schedules = RwSignal::new(Vec::<ScheduleDraft>::new());
    let next_row = StoredValue::new(0u32);
    let members = RwSignal::new(Vec::<Member>::new());

    Effect::new(move |was_open: Option<bool>| {
        let open = list.is_open(ModalSlot::Create);
        if open && was_open != Some(true) {
            load_member_options(ctx, members);
            name.set(String::new());
            description.set(String::new());
            start_date.set(String::new());
            end_date.set(String::new());
            pic_id.set(String::new());
            schedules.set(Vec::new());
        }
        open
    });

    let add_schedule = move || {
        next_row.update_value(|n| *n += 1);
        let row = next_row.get_value();
        // new rows start on the event's first day
        let schedule = EventScheduleRequest::on(&start_date.get_untracked());
        schedules.update(|s| s.push(ScheduleDraft { row, schedule }));
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = CreateEventRequest {
            name: name.get_untracked().trim().to_string(),
            description: description.get_untracked().trim().to_string(),
            start_date: start_date.get_untracked(),
            end_date: end_date.get_untracked(),
            pic_id: pic_id.get_untracked(),
            schedules: schedules.with_untracked(|s| s.iter().map(|d| d.schedule.clone()).collect()),
        };
        match api::create_event(&request) {
            Ok(action) => list.dispatch_from_modal(ModalSlot::Create, action, CREATED),
            Err(err) => list.reject_input(err.user_message(CREATED.failure)),
        }
    };

    view! {
        <Modal
            title="New event"
            open=Signal::derive(move || list.is_open(ModalSlot::Create))
            on_close=move |_| list.cancel(ModalSlot::Create)
        >
            <form class="modal-form" on:submit=submit>
                <label>
                    "Name"
                    <input
                        type="text"
                        placeholder="IoT Basics Workshop"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Start date"
                    <input type="date" prop:value=move || start_date.get() on:input=move |ev| start_date.set(event_target_value(&ev)) />
                </label>
                <label>
                    "End date"
                    <input type="date" prop:value=move || end_date.get() on:input=move |ev| end_date.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Person in charge"
                    <select on:change=move |ev| pic_id.set(event_target_value(&ev))>
                        <option value="" selected=move || pic_id.get().is_empty()>"Choose a member"</option>
                        {move || {
                            members
                                .get()
                                .into_iter()
                                .map(|m| {
                                    let id = m.id.clone();
                                    let label = m.option_label();
                                    view! { <option value=m.id selected=move || pic_id.get() == id>{label}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                    <small class="form-hint">"Other committee members can be added after the event is created."</small>
                </label>
                <label>
                    "Description"
                    <textarea rows="3" prop:value=move || description.get() on:input=move |ev| description.set(event_target_value(&ev))></textarea>
                </label>

                <div class="schedule-section">
                    <div class="schedule-header">
                        <h3>"Schedule"</h3>
                        <button type="button" class="btn btn-secondary btn-small" on:click=move |_| add_schedule()>"Add session"</button>
                    </div>
                    <Show when=move || schedules.with(Vec::is_empty)>
                        <p class="empty-hint">"No sessions yet."</p>
                    </Show>
                    <For
                        each=move || schedules.with(|s| s.iter().map(|d| d.row).collect::<Vec<_>>())
                        key=|row| *row
                        children=move |row| view! { <ScheduleRow row=row schedules=schedules /> }
                    />
                </div>

                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" on:click=move |_| list.cancel(ModalSlot::Create)>"Cancel"</button>
                    <button type="submit" class="btn btn-primary" disabled=move || list.is_busy()>"Create"</button>
                </div>
            </form>
        </Modal>
    }
}

/// Inputs write straight into the draft list; rows are keyed so typing
/// does not rebuild them
#[component]
fn ScheduleRow(row: u32, schedules: RwSignal<Vec<ScheduleDraft>>) -> impl IntoView {
    let initial = schedules
        .with_untracked(|s| s.iter().find(|d| d.row == row).map(|d| d.schedule.clone()))
        .unwrap_or_else(|| EventScheduleRequest::on(""));
    let edit = move |apply: fn(&mut EventScheduleRequest, String), value: String| {
        schedules.update(|s| {
            if let Some(draft) = s.iter_mut().find(|d| d.row == row) {
                apply(&mut draft.schedule, value);
            }
        });
    };

    view! {
        <div class="schedule-row">
            <label>
                "Title"
                <input
                    type="text"
                    placeholder="Session 1 - Introduction"
                    value=initial.title
                    on:input=move |ev| edit(|s, v| s.title = v, event_target_value(&ev))
                />
            </label>
            <label>
                "Date"
                <input type="date" value=initial.activity_date on:input=move |ev| edit(|s, v| s.activity_date = v, event_target_value(&ev)) />
            </label>
            <label>
                "Location"
                <input type="text" value=initial.location on:input=move |ev| edit(|s, v| s.location = v, event_target_value(&ev)) />
            </label>
            <label>
                "Starts"
                <input type="time" value=initial.start_time on:input=move |ev| edit(|s, v| s.start_time = v, event_target_value(&ev)) />
            </label>
            <label>
                "Ends"
                <input type="time" value=initial.end_time on:input=move |ev| edit(|s, v| s.end_time = v, event_target_value(&ev)) />
            </label>
            <button
                type="button"
                class="btn btn-small btn-danger"
                on:click=move |_| schedules.update(|s| s.retain(|d| d.row != row))
            >
                "Remove"
            </button>
        </div>
    }
}
