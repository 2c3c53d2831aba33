//! Letters Page
//!
//! Letter requests; approvers approve them or reject with a reason.

use leptos::prelude::*;
use remote_collection::{ActionKind, FilterCriteria, FilterValue, ModalSlot, SortSpec};

use crate::api;
use crate::components::{ChoiceFilter, ListStatus, Modal, ReasonForm, SearchInput, SortSelect, StatusBadge};
use crate::context::use_app_context;
use crate::list::{use_list_controller, ListHandle, Notice};
use crate::models::{choice_label, date_part, Letter, Role, LETTER_STATUSES};

const SEARCH_FIELDS: &[&str] = &["subject", "recipient"];

const APPROVED: Notice = Notice::new("Letter approved", "Failed to approve letter");
const REJECTED: Notice = Notice::new("Letter rejected", "Failed to reject letter");

#[component]
pub fn LettersPage() -> impl IntoView {
    let list = use_list_controller(api::letter_list);

    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let sort = RwSignal::new(SortSpec::default());

    let rows = move || {
        let criteria = FilterCriteria::new(SEARCH_FIELDS)
            .with_search(search.get())
            .with_filter("status", FilterValue::from_option(&status.get()));
        list.rows(&criteria, sort.get())
    };

    let submit_reject = move |_: ()| {
        let Some(letter) = list.peek_modals(|m| m.confirm(ModalSlot::Reject)) else { return };
        let request = list
            .peek_modals(|m| m.submit_reason())
            .and_then(|reason| api::reject_letter(&letter.id, &reason));
        match request {
            Ok(request) => list.dispatch_from_modal(ModalSlot::Reject, request, REJECTED),
            Err(err) => list.reject_input(err.user_message("A rejection reason is required")),
        }
    };

    let reject_title = move || {
        list.target(ModalSlot::Reject)
            .map(|l| format!("Reject: {}", l.subject))
            .unwrap_or_default()
    };

    view! {
        <div class="page letters-page">
            <div class="page-toolbar">
                <SearchInput value=search placeholder="Search subject or recipient..." />
                <ChoiceFilter value=status choices=LETTER_STATUSES any_label="All statuses" />
                <SortSelect value=sort />
                <button class="btn btn-secondary" on:click=move |_| list.refresh()>"Refresh"</button>
            </div>

            <ListStatus
                loading=Signal::derive(move || list.is_loading())
                error=Signal::derive(move || list.error())
                empty=Signal::derive(move || list.is_empty())
                empty_text="No letter requests"
                on_retry=move |_| list.refresh()
            />

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Number"</th>
                        <th>"Subject"</th>
                        <th>"Recipient"</th>
                        <th>"Requested by"</th>
                        <th>"Date"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || rows().into_iter().map(|letter| view! { <LetterRow letter=letter list=list /> }).collect_view()}
                </tbody>
            </table>

            <Modal
                title=Signal::derive(reject_title)
                open=Signal::derive(move || list.is_open(ModalSlot::Reject))
                on_close=move |_| list.cancel(ModalSlot::Reject)
            >
                <ReasonForm
                    reason=Signal::derive(move || list.with_modals(|m| m.reason().text().to_string()))
                    on_input=move |text: String| list.update_modals(|m| m.set_reason(text))
                    on_submit=submit_reject
                    on_cancel=move |_| list.cancel(ModalSlot::Reject)
                    busy=Signal::derive(move || list.is_busy())
                />
            </Modal>
        </div>
    }
}

#[component]
fn LetterRow(letter: Letter, list: ListHandle<Letter>) -> impl IntoView {
    let ctx = use_app_context();
    let id = letter.id.clone();
    let approving = {
        let id = id.clone();
        move || list.is_pending_for(ActionKind::Approve, &id)
    };
    let busy_row = move || list.with_collection(|c| c.pending().is_some_and(|p| p.entity_id.as_ref() == Some(&id)));
    let pending = letter.is_pending();
    let approve_id = letter.id.clone();
    let reject_target = letter.clone();

    view! {
        <tr class:row-busy=busy_row>
            <td class="mono">{letter.letter_number.clone().unwrap_or_else(|| "-".into())}</td>
            <td>
                {letter.subject.clone()}
                {letter.rejection_reason.clone().map(|r| view! { <div class="row-subtitle">"Rejected: " {r}</div> })}
            </td>
            <td>{letter.recipient.clone()}</td>
            <td>{letter.requester_name.clone().unwrap_or_else(|| "-".into())}</td>
            <td>{letter.created_at.as_deref().map(date_part).unwrap_or("-").to_string()}</td>
            <td>
                <StatusBadge status=letter.status.clone() label=choice_label(LETTER_STATUSES, &letter.status) />
            </td>
            <td class="row-actions">
                <Show when=move || pending && ctx.allows(Role::can_approve_letters)>
                    {
                        let id = approve_id.clone();
                        let target = reject_target.clone();
                        let approving = approving.clone();
                        view! {
                            <button
                                class="btn btn-small btn-primary"
                                disabled=move || list.is_busy()
                                on:click=move |_| list.dispatch(api::approve_letter(&id), APPROVED)
                            >
                                {move || if approving() { "Approving..." } else { "Approve" }}
                            </button>
                            <button
                                class="btn btn-small btn-danger"
                                disabled=move || list.is_busy()
                                on:click=move |_| list.open(ModalSlot::Reject, target.clone())
                            >
                                "Reject"
                            </button>
                        }
                    }
                </Show>
            </td>
        </tr>
    }
}
