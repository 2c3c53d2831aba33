//! Finance Page
//!
//! Three tabs over the finance endpoints: the cash book, procurement
//! requests and member dues.

mod dues;
mod procurement;
mod transactions;

use leptos::prelude::*;

use dues::DuesTab;
use procurement::ProcurementTab;
use transactions::TransactionsTab;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FinanceTab {
    Transactions,
    Procurement,
    Dues,
}

impl FinanceTab {
    const ALL: [FinanceTab; 3] = [FinanceTab::Transactions, FinanceTab::Procurement, FinanceTab::Dues];

    fn label(&self) -> &'static str {
        match self {
            FinanceTab::Transactions => "Transactions",
            FinanceTab::Procurement => "Procurement",
            FinanceTab::Dues => "Dues",
        }
    }
}

#[component]
pub fn FinancePage() -> impl IntoView {
    let tab = RwSignal::new(FinanceTab::Transactions);

    view! {
        <div class="page finance-page">
            <div class="tab-bar">
                {FinanceTab::ALL
                    .into_iter()
                    .map(|t| {
                        view! {
                            <button class="tab" class:active=move || tab.get() == t on:click=move |_| tab.set(t)>
                                {t.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            // Each tab owns its list; switching remounts and refetches
            {move || match tab.get() {
                FinanceTab::Transactions => view! { <TransactionsTab /> }.into_any(),
                FinanceTab::Procurement => view! { <ProcurementTab /> }.into_any(),
                FinanceTab::Dues => view! { <DuesTab /> }.into_any(),
            }}
        </div>
    }
}
