//! Filter Bar Components
//!
//! Search box, categorical select and sort select bound to page signals.

use leptos::prelude::*;
use remote_collection::{FilterValue, SortSpec};

use crate::models::Choices;

pub fn sort_label(sort: SortSpec) -> &'static str {
    match sort {
        SortSpec::Newest => "Newest",
        SortSpec::Oldest => "Oldest",
        SortSpec::NameAsc => "Name (A-Z)",
        SortSpec::NameDesc => "Name (Z-A)",
    }
}

#[component]
pub fn SearchInput(value: RwSignal<String>, #[prop(into)] placeholder: String) -> impl IntoView {
    view! {
        <input
            type="search"
            class="search-input"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
}

/// Select over `choices` plus an "any" entry that clears the filter
#[component]
pub fn ChoiceFilter(
    value: RwSignal<String>,
    choices: Choices,
    #[prop(into)] any_label: String,
) -> impl IntoView {
    view! {
        <select class="filter-select" on:change=move |ev| value.set(event_target_value(&ev))>
            <option value=FilterValue::ANY_OPTION selected=move || value.get().is_empty()>{any_label}</option>
            {choices
                .iter()
                .map(|(v, label)| {
                    let v = *v;
                    view! { <option value=v selected=move || value.get() == v>{*label}</option> }
                })
                .collect_view()}
        </select>
    }
}

#[component]
pub fn SortSelect(value: RwSignal<SortSpec>) -> impl IntoView {
    view! {
        <select
            class="filter-select"
            on:change=move |ev| {
                if let Some(sort) = SortSpec::parse(&event_target_value(&ev)) {
                    value.set(sort);
                }
            }
        >
            {SortSpec::ALL
                .into_iter()
                .map(|sort| {
                    view! {
                        <option value=sort.as_str() selected=move || value.get() == sort>
                            {sort_label(sort)}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
