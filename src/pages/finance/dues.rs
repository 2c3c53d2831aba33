//! Dues tab: monthly member dues with proof upload and verification.

use chrono::{Datelike, Local};
use leptos::html;
use leptos::prelude::*;
use remote_collection::{ActionKind, FilterCriteria, FilterValue, ModalSlot, Placement, Reconcile, SortSpec};

use crate::api;
use crate::components::{ChoiceFilter, ListStatus, Modal, SearchInput, StatusBadge};
use crate::context::use_app_context;
use crate::list::{use_list_controller, ListHandle, Notice};
use crate::models::{choice_label, date_part, format_currency, Choices, CreateDuesRequest, DuesPayment, Role};

const SEARCH_FIELDS: &[&str] = &["memberName", "memberNim"];

const DUES_STATUSES: Choices = &[("PENDING", "Pending"), ("VERIFIED", "Verified"), ("REJECTED", "Rejected")];

const UPLOADED: Notice = Notice::new("Payment submitted", "Failed to submit payment");
const VERIFIED: Notice = Notice::new("Payment verified", "Failed to verify payment");

#[component]
pub fn DuesTab() -> impl IntoView {
    let list = use_list_controller(api::dues_list);

    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());

    let rows = move || {
        let criteria = FilterCriteria::new(SEARCH_FIELDS)
            .with_search(search.get())
            .with_filter("status", FilterValue::from_option(&status.get()));
        list.rows(&criteria, SortSpec::Newest)
    };

    let proof = move || list.target(ModalSlot::Proof);

    view! {
        <div class="page-toolbar">
            <SearchInput value=search placeholder="Search member or NIM..." />
            <ChoiceFilter value=status choices=DUES_STATUSES any_label="All statuses" />
            <button class="btn btn-primary" on:click=move |_| list.open_blank(ModalSlot::Create)>"Pay dues"</button>
        </div>

        <ListStatus
            loading=Signal::derive(move || list.is_loading())
            error=Signal::derive(move || list.error())
            empty=Signal::derive(move || list.is_empty())
            empty_text="No dues payments"
            on_retry=move |_| list.refresh()
        />

        <table class="data-table">
            <thead>
                <tr>
                    <th>"Member"</th>
                    <th>"Period"</th>
                    <th>"Amount"</th>
                    <th>"Paid"</th>
                    <th>"Status"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {move || rows().into_iter().map(|payment| view! { <DuesRow payment=payment list=list /> }).collect_view()}
            </tbody>
        </table>

        <Modal
            title=Signal::derive(move || proof().map(|p| format!("Proof: {}", p.member_name)).unwrap_or_default())
            open=Signal::derive(move || list.is_open(ModalSlot::Proof))
            on_close=move |_| list.cancel(ModalSlot::Proof)
        >
            {move || {
                proof()
                    .and_then(|p| p.payment_proof_url)
                    .map(|url| {
                        let href = url.clone();
                        view! {
                            <a href=href target="_blank" rel="noopener">
                                <img class="proof-image" src=url alt="Payment proof" />
                            </a>
                        }
                    })
            }}
        </Modal>

        <PayDuesModal list=list />
    }
}

#[component]
fn DuesRow(payment: DuesPayment, list: ListHandle<DuesPayment>) -> impl IntoView {
    let ctx = use_app_context();
    let id = payment.id.clone();
    let verifying = move || list.is_pending_for(ActionKind::Verify, &id);
    let pending = payment.is_pending();
    let has_proof = payment.payment_proof_url.is_some();
    let verify_id = payment.id.clone();
    let proof_target = payment.clone();

    view! {
        <tr class:row-busy=verifying>
            <td>
                {payment.member_name.clone()}
                {payment.member_nim.clone().map(|nim| view! { <div class="row-subtitle mono">{nim}</div> })}
            </td>
            <td>{payment.period_label()}</td>
            <td>{format_currency(payment.amount)}</td>
            <td>{payment.paid_at.as_deref().map(date_part).unwrap_or("-").to_string()}</td>
            <td>
                <StatusBadge status=payment.status.clone() label=choice_label(DUES_STATUSES, &payment.status) />
            </td>
            <td class="row-actions">
                <Show when=move || has_proof>
                    {
                        let target = proof_target.clone();
                        view! {
                            <button class="btn btn-small" on:click=move |_| list.open(ModalSlot::Proof, target.clone())>
                                "Proof"
                            </button>
                        }
                    }
                </Show>
                <Show when=move || pending && ctx.allows(Role::can_manage_finance)>
                    {
                        let id = verify_id.clone();
                        view! {
                            <button
                                class="btn btn-small btn-primary"
                                disabled=move || list.is_busy()
                                on:click=move |_| list.dispatch(api::verify_dues(&id), VERIFIED)
                            >
                                "Verify"
                            </button>
                        }
                    }
                </Show>
            </td>
        </tr>
    }
}

#[component]
fn PayDuesModal(list: ListHandle<DuesPayment>) -> impl IntoView {
    let ctx = use_app_context();
    let month = RwSignal::new(String::new());
    let year = RwSignal::new(String::new());
    let amount = RwSignal::new(String::new());
    let file_input: NodeRef<html::Input> = NodeRef::new();

    Effect::new(move |was_open: Option<bool>| {
        let open = list.is_open(ModalSlot::Create);
        if open && was_open != Some(true) {
            let today = Local::now().date_naive();
            month.set(today.month().to_string());
            year.set(today.year().to_string());
            amount.set(String::new());
        }
        open
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = CreateDuesRequest {
            payment_month: month.get_untracked().trim().parse().unwrap_or(0),
            payment_year: year.get_untracked().trim().parse().unwrap_or(0),
            amount: amount.get_untracked().trim().parse().unwrap_or(0.0),
        };
        let file = file_input.get_untracked().and_then(|input| input.files()).and_then(|files| files.get(0));
        let form = match api::dues_form(&request, file.as_ref()) {
            Ok(form) => form,
            Err(err) => return list.reject_input(err.user_message(UPLOADED.failure)),
        };
        let client = ctx.client();
        list.dispatch_with(
            ModalSlot::Create,
            ActionKind::Create,
            None,
            Reconcile::Insert(Placement::Prepend),
            async move { client.post_multipart(api::DUES, &form).await },
            UPLOADED,
        );
    };

    view! {
        <Modal
            title="Pay dues"
            open=Signal::derive(move || list.is_open(ModalSlot::Create))
            on_close=move |_| list.cancel(ModalSlot::Create)
        >
            <form class="modal-form" on:submit=submit>
                <label>
                    "Month"
                    <input type="number" min="1" max="12" prop:value=move || month.get() on:input=move |ev| month.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Year"
                    <input type="number" prop:value=move || year.get() on:input=move |ev| year.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Amount"
                    <input type="number" min="0" prop:value=move || amount.get() on:input=move |ev| amount.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Payment proof"
                    <input type="file" accept="image/*,application/pdf" node_ref=file_input />
                </label>
                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" on:click=move |_| list.cancel(ModalSlot::Create)>"Cancel"</button>
                    <button type="submit" class="btn btn-primary" disabled=move || list.is_busy()>
                        {move || if list.is_busy() { "Uploading..." } else { "Submit" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
