//! Procurement tab: purchase requests with approve and reject.

use leptos::prelude::*;
use remote_collection::{ActionKind, FilterCriteria, FilterValue, ModalSlot, SortSpec};

use crate::api;
use crate::components::{ChoiceFilter, ListStatus, Modal, ReasonForm, SearchInput, StatusBadge};
use crate::context::use_app_context;
use crate::list::{use_list_controller, ListHandle, Notice};
use crate::models::{
    choice_label, date_part, format_currency, Choices, CreateProcurementRequest, ProcurementRequest, Role, PRIORITIES,
};

const SEARCH_FIELDS: &[&str] = &["itemName", "requesterName"];

const PROCUREMENT_STATUSES: Choices = &[("PENDING", "Pending"), ("APPROVED", "Approved"), ("REJECTED", "Rejected")];

const CREATED: Notice = Notice::new("Procurement request submitted", "Failed to submit request");
const APPROVED: Notice = Notice::new("Request approved", "Failed to approve request");
const REJECTED: Notice = Notice::new("Request rejected", "Failed to reject request");

#[component]
pub fn ProcurementTab() -> impl IntoView {
    let list = use_list_controller(api::procurement_list);

    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());

    let rows = move || {
        let criteria = FilterCriteria::new(SEARCH_FIELDS)
            .with_search(search.get())
            .with_filter("status", FilterValue::from_option(&status.get()));
        list.rows(&criteria, SortSpec::Newest)
    };

    let submit_reject = move |_: ()| {
        let Some(request) = list.peek_modals(|m| m.confirm(ModalSlot::Reject)) else { return };
        let action = list
            .peek_modals(|m| m.submit_reason())
            .and_then(|reason| api::reject_procurement(&request.id, &reason));
        match action {
            Ok(action) => list.dispatch_from_modal(ModalSlot::Reject, action, REJECTED),
            Err(err) => list.reject_input(err.user_message("A rejection reason is required")),
        }
    };

    view! {
        <div class="page-toolbar">
            <SearchInput value=search placeholder="Search item or requester..." />
            <ChoiceFilter value=status choices=PROCUREMENT_STATUSES any_label="All statuses" />
            <button class="btn btn-primary" on:click=move |_| list.open_blank(ModalSlot::Create)>"New request"</button>
        </div>

        <ListStatus
            loading=Signal::derive(move || list.is_loading())
            error=Signal::derive(move || list.error())
            empty=Signal::derive(move || list.is_empty())
            empty_text="No procurement requests"
            on_retry=move |_| list.refresh()
        />

        <table class="data-table">
            <thead>
                <tr>
                    <th>"Item"</th>
                    <th>"Requester"</th>
                    <th>"Estimate"</th>
                    <th>"Priority"</th>
                    <th>"Requested"</th>
                    <th>"Status"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {move || rows().into_iter().map(|request| view! { <ProcurementRow request=request list=list /> }).collect_view()}
            </tbody>
        </table>

        <Modal
            title="Reject request"
            open=Signal::derive(move || list.is_open(ModalSlot::Reject))
            on_close=move |_| list.cancel(ModalSlot::Reject)
        >
            <p class="confirm-message">
                {move || list.target(ModalSlot::Reject).map(|r| r.item_name).unwrap_or_default()}
            </p>
            <ReasonForm
                reason=Signal::derive(move || list.with_modals(|m| m.reason().text().to_string()))
                on_input=move |text: String| list.update_modals(|m| m.set_reason(text))
                on_submit=submit_reject
                on_cancel=move |_| list.cancel(ModalSlot::Reject)
                busy=Signal::derive(move || list.is_busy())
            />
        </Modal>

        <CreateProcurementModal list=list />
    }
}

#[component]
fn ProcurementRow(request: ProcurementRequest, list: ListHandle<ProcurementRequest>) -> impl IntoView {
    let ctx = use_app_context();
    let id = request.id.clone();
    let busy_row = move || list.with_collection(|c| c.pending().is_some_and(|p| p.entity_id.as_ref() == Some(&id)));
    let pending = request.is_pending();
    let approve_id = request.id.clone();
    let reject_target = request.clone();

    let item = match request.purchase_link.clone() {
        Some(link) => view! { <a href=link target="_blank" rel="noopener">{request.item_name.clone()}</a> }.into_any(),
        None => request.item_name.clone().into_any(),
    };

    view! {
        <tr class:row-busy=busy_row>
            <td>
                {item}
                {request.reason.clone().map(|r| view! { <div class="row-subtitle">{r}</div> })}
            </td>
            <td>{request.requester_name.clone().unwrap_or_else(|| "-".into())}</td>
            <td>{format_currency(request.estimated_price)}</td>
            <td>
                <StatusBadge status=request.priority.clone() label=choice_label(PRIORITIES, &request.priority) />
            </td>
            <td>{request.created_at.as_deref().map(date_part).unwrap_or("-").to_string()}</td>
            <td>
                <StatusBadge status=request.status.clone() label=choice_label(PROCUREMENT_STATUSES, &request.status) />
            </td>
            <td class="row-actions">
                <Show when=move || pending && ctx.allows(Role::can_manage_finance)>
                    {
                        let id = approve_id.clone();
                        let target = reject_target.clone();
                        let approving_id = approve_id.clone();
                        view! {
                            <button
                                class="btn btn-small btn-primary"
                                disabled=move || list.is_busy()
                                on:click=move |_| list.dispatch(api::approve_procurement(&id), APPROVED)
                            >
                                {move || {
                                    if list.is_pending_for(ActionKind::Approve, &approving_id) { "Approving..." } else { "Approve" }
                                }}
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

#[component]
fn CreateProcurementModal(list: ListHandle<ProcurementRequest>) -> impl IntoView {
    let item_name = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let priority = RwSignal::new(String::from("MEDIUM"));
    let reason = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let link = RwSignal::new(String::new());

    Effect::new(move |was_open: Option<bool>| {
        let open = list.is_open(ModalSlot::Create);
        if open && was_open != Some(true) {
            for field in [item_name, price, reason, description, link] {
                field.set(String::new());
            }
            priority.set("MEDIUM".to_string());
        }
        open
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let link = link.get_untracked().trim().to_string();
        let request = CreateProcurementRequest {
            item_name: item_name.get_untracked().trim().to_string(),
            estimated_price: price.get_untracked().trim().parse().unwrap_or(0.0),
            priority: priority.get_untracked(),
            reason: reason.get_untracked().trim().to_string(),
            description: description.get_untracked().trim().to_string(),
            purchase_link: (!link.is_empty()).then_some(link),
        };
        match api::create_procurement(&request) {
            Ok(action) => list.dispatch_from_modal(ModalSlot::Create, action, CREATED),
            Err(err) => list.reject_input(err.user_message(CREATED.failure)),
        }
    };

    view! {
        <Modal
            title="New procurement request"
            open=Signal::derive(move || list.is_open(ModalSlot::Create))
            on_close=move |_| list.cancel(ModalSlot::Create)
        >
            <form class="modal-form" on:submit=submit>
                <label>
                    "Item"
                    <input type="text" prop:value=move || item_name.get() on:input=move |ev| item_name.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Estimated price"
                    <input type="number" min="0" prop:value=move || price.get() on:input=move |ev| price.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Priority"
                    <select on:change=move |ev| priority.set(event_target_value(&ev))>
                        {PRIORITIES
                            .iter()
                            .map(|(value, label)| {
                                let value = *value;
                                view! { <option value=value selected=move || priority.get() == value>{*label}</option> }
                            })
                            .collect_view()}
                    </select>
                </label>
                <label>
                    "Reason"
                    <textarea rows="2" prop:value=move || reason.get() on:input=move |ev| reason.set(event_target_value(&ev))></textarea>
                </label>
                <label>
                    "Description"
                    <textarea rows="2" prop:value=move || description.get() on:input=move |ev| description.set(event_target_value(&ev))></textarea>
                </label>
                <label>
                    "Purchase link"
                    <input type="url" prop:value=move || link.get() on:input=move |ev| link.set(event_target_value(&ev)) />
                </label>
                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" on:click=move |_| list.cancel(ModalSlot::Create)>"Cancel"</button>
                    <button type="submit" class="btn btn-primary" disabled=move || list.is_busy()>"Submit"</button>
                </div>
            </form>
        </Modal>
    }
}
