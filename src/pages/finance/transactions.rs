//! Cash book tab: balance cards, latest transactions and the quick entry
//! form.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use remote_collection::{FilterCriteria, ModalSlot, SortSpec};
use std::rc::Rc;

use crate::api::{self, HttpClient};
use crate::components::{ListStatus, Modal};
use crate::context::use_app_context;
use crate::list::{use_list_controller, ListHandle, Notice};
use crate::models::{
    choice_label, compose_description, date_part, format_currency, CreateTransactionRequest, FinanceCategory,
    FinanceTransaction, Member, Role, TransactionSummary, TRANSACTION_TYPES,
};
use crate::pages::load_member_options;

const CREATED: Notice = Notice::new("Transaction recorded", "Failed to record transaction");

#[component]
pub fn TransactionsTab() -> impl IntoView {
    let ctx = use_app_context();
    let list = use_list_controller(api::transaction_list);
    let summary = RwSignal::new(None::<TransactionSummary>);
    let categories = RwSignal::new(Vec::<FinanceCategory>::new());

    load_summary(ctx.client(), summary);

    {
        let client = ctx.client();
        spawn_local(async move {
            match api::fetch_categories(&client).await {
                Ok(c) => {
                    categories.try_set(c);
                }
                Err(err) => log::warn!("finance categories unavailable: {}", err),
            }
        });
    }

    let rows = move || list.rows(&FilterCriteria::new(&[]), SortSpec::Newest);
    let card = move |pick: fn(&TransactionSummary) -> f64| {
        move || summary.with(|s| s.as_ref().map(|s| format_currency(pick(s))).unwrap_or_else(|| "-".into()))
    };

    view! {
        <div class="summary-cards">
            <div class="stat-card">
                <span class="stat-label">"Balance"</span>
                <span class="stat-value">{card(|s| s.balance)}</span>
            </div>
            <div class="stat-card income">
                <span class="stat-label">"Income"</span>
                <span class="stat-value">{card(|s| s.total_income)}</span>
            </div>
            <div class="stat-card expense">
                <span class="stat-label">"Expense"</span>
                <span class="stat-value">{card(|s| s.total_expense)}</span>
            </div>
        </div>

        <div class="page-toolbar">
            <h3>"Latest transactions"</h3>
            <Show when=move || ctx.allows(Role::can_manage_finance)>
                <button class="btn btn-primary" on:click=move |_| list.open_blank(ModalSlot::Create)>
                    "New transaction"
                </button>
            </Show>
        </div>

        <ListStatus
            loading=Signal::derive(move || list.is_loading())
            error=Signal::derive(move || list.error())
            empty=Signal::derive(move || list.is_empty())
            empty_text="No transactions yet"
            on_retry=move |_| list.refresh()
        />

        <table class="data-table">
            <thead>
                <tr>
                    <th>"Date"</th>
                    <th>"Description"</th>
                    <th>"Category"</th>
                    <th>"Amount"</th>
                </tr>
            </thead>
            <tbody>
                {move || rows().into_iter().map(transaction_row).collect_view()}
            </tbody>
        </table>

        <CreateTransactionModal list=list categories=categories summary=summary />
    }
}

fn load_summary(client: Rc<HttpClient>, summary: RwSignal<Option<TransactionSummary>>) {
    spawn_local(async move {
        match api::fetch_transaction_summary(&client).await {
            Ok(s) => {
                summary.try_set(Some(s));
            }
            Err(err) => log::warn!("transaction summary unavailable: {}", err),
        }
    });
}

fn transaction_row(tx: FinanceTransaction) -> impl IntoView {
    let sign = if tx.is_income() { "+" } else { "-" };
    view! {
        <tr>
            <td>{date_part(&tx.transaction_date).to_string()}</td>
            <td>{tx.description.clone()}</td>
            <td>{tx.category_name.clone().unwrap_or_else(|| "-".into())}</td>
            <td class:amount-income=tx.is_income() class:amount-expense=!tx.is_income()>
                {format!("{}{}", sign, format_currency(tx.amount))}
            </td>
        </tr>
    }
}

#[component]
fn CreateTransactionModal(
    list: ListHandle<FinanceTransaction>,
    categories: RwSignal<Vec<FinanceCategory>>,
    /// Reloaded after a successful create
    summary: RwSignal<Option<TransactionSummary>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let description = RwSignal::new(String::new());
    let amount = RwSignal::new(String::new());
    let kind = RwSignal::new(String::from("EXPENSE"));
    let category_id = RwSignal::new(String::new());
    let date = RwSignal::new(String::new());
    let pic_id = RwSignal::new(String::new());
    let note = RwSignal::new(String::new());
    let members = RwSignal::new(Vec::<Member>::new());

    Effect::new(move |was_open: Option<bool>| {
        let open = list.is_open(ModalSlot::Create);
        if open && was_open != Some(true) {
            load_member_options(ctx, members);
            description.set(String::new());
            amount.set(String::new());
            category_id.set(String::new());
            pic_id.set(String::new());
            note.set(String::new());
            date.set(Local::now().format("%Y-%m-%d").to_string());
        }
        open
    });

    let matching_categories = move || {
        let kind = kind.get();
        categories.with(|all| all.iter().filter(|c| c.applies_to(&kind)).cloned().collect::<Vec<_>>())
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let chosen = pic_id.get_untracked();
        let pic_name = members.with_untracked(|all| all.iter().find(|m| m.id == chosen).map(|m| m.full_name.clone()));
        let request = CreateTransactionRequest {
            description: compose_description(&description.get_untracked(), pic_name.as_deref(), &note.get_untracked()),
            amount: amount.get_untracked().trim().parse().unwrap_or(0.0),
            kind: kind.get_untracked(),
            category_id: category_id.get_untracked(),
            transaction_date: date.get_untracked(),
        };
        match api::create_transaction(&request) {
            Ok(action) => list.dispatch_from_modal_then(ModalSlot::Create, action, CREATED, move || load_summary(ctx.client(), summary)),
            Err(err) => list.reject_input(err.user_message(CREATED.failure)),
        }
    };

    view! {
        <Modal
            title="New transaction"
            open=Signal::derive(move || list.is_open(ModalSlot::Create))
            on_close=move |_| list.cancel(ModalSlot::Create)
        >
            <form class="modal-form" on:submit=submit>
                <label>
                    "Type"
                    <select
                        on:change=move |ev| {
                            kind.set(event_target_value(&ev));
                            category_id.set(String::new());
                        }
                    >
                        {TRANSACTION_TYPES
                            .iter()
                            .map(|(value, _)| {
                                let value = *value;
                                view! {
                                    <option value=value selected=move || kind.get() == value>
                                        {choice_label(TRANSACTION_TYPES, value)}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
                <label>
                    "Category"
                    <select on:change=move |ev| category_id.set(event_target_value(&ev))>
                        <option value="" selected=move || category_id.get().is_empty()>"Choose a category"</option>
                        {move || {
                            matching_categories()
                                .into_iter()
                                .map(|c| {
                                    let id = c.id.clone();
                                    view! { <option value=c.id selected=move || category_id.get() == id>{c.name}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>
                <label>
                    "Description"
                    <input type="text" prop:value=move || description.get() on:input=move |ev| description.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Amount"
                    <input type="number" min="0" prop:value=move || amount.get() on:input=move |ev| amount.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Date"
                    <input type="date" prop:value=move || date.get() on:input=move |ev| date.set(event_target_value(&ev)) />
                </label>
                <label>
                    "PIC (optional)"
                    <select on:change=move |ev| pic_id.set(event_target_value(&ev))>
                        <option value="" selected=move || pic_id.get().is_empty()>"No PIC"</option>
                        {move || {
                            members
                                .get()
                                .into_iter()
                                .map(|m| {
                                    let id = m.id.clone();
                                    view! { <option value=m.id selected=move || pic_id.get() == id>{m.full_name}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>
                <label>
                    "Note (optional)"
                    <textarea rows="2" prop:value=move || note.get() on:input=move |ev| note.set(event_target_value(&ev))></textarea>
                </label>
                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" on:click=move |_| list.cancel(ModalSlot::Create)>"Cancel"</button>
                    <button type="submit" class="btn btn-primary" disabled=move || list.is_busy()>"Save"</button>
                </div>
            </form>
        </Modal>
    }
}
