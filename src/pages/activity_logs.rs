//! Activity Logs Page

use chrono::Utc;
use leptos::prelude::*;
use remote_collection::{FilterCriteria, FilterValue, SortSpec};

use crate::api;
use crate::components::{ChoiceFilter, ListStatus, SearchInput, SortSelect, StatusBadge};
use crate::list::use_list_controller;
use crate::models::{choice_label, ActivityLog, ACTIONS, TARGET_TYPES, UNKNOWN_TARGET};

const SEARCH_FIELDS: &[&str] = &["userName", "targetName", "details"];

#[component]
pub fn ActivityLogsPage() -> impl IntoView {
    let list = use_list_controller(api::activity_list);

    let search = RwSignal::new(String::new());
    let action = RwSignal::new(String::new());
    let target_type = RwSignal::new(String::new());
    let sort = RwSignal::new(SortSpec::Newest);

    let rows = move || {
        let criteria = FilterCriteria::new(SEARCH_FIELDS)
            .with_search(search.get())
            .with_filter("action", FilterValue::from_option(&action.get()))
            .with_filter("targetType", FilterValue::from_option(&target_type.get()));
        list.rows(&criteria, sort.get())
    };

    view! {
        <div class="page activity-page">
            <div class="page-toolbar">
                <SearchInput value=search placeholder="Search user, target or details..." />
                <ChoiceFilter value=action choices=ACTIONS any_label="All actions" />
                <ChoiceFilter value=target_type choices=TARGET_TYPES any_label="All targets" />
                <SortSelect value=sort />
                <button class="btn btn-secondary" disabled=move || list.is_loading() on:click=move |_| list.refresh()>
                    {move || if list.is_loading() { "Refreshing..." } else { "Refresh" }}
                </button>
            </div>

            <ListStatus
                loading=Signal::derive(move || list.is_loading())
                error=Signal::derive(move || list.error())
                empty=Signal::derive(move || list.is_empty())
                empty_text="No activity recorded"
                on_retry=move |_| list.refresh()
            />

            <ul class="activity-list">
                {move || {
                    let now = Utc::now();
                    rows().into_iter().map(|log| activity_item(log, now)).collect_view()
                }}
            </ul>
        </div>
    }
}

fn activity_item(log: ActivityLog, now: chrono::DateTime<Utc>) -> impl IntoView {
    let when = log.display_time(now);
    let target = if log.target_type == UNKNOWN_TARGET {
        log.target_name.clone()
    } else {
        format!("{} {}", choice_label(TARGET_TYPES, &log.target_type), log.target_name)
    };

    view! {
        <li class="activity-item">
            <StatusBadge status=log.action.clone() label=choice_label(ACTIONS, &log.action) />
            <div class="activity-body">
                <span class="activity-user">{log.user_name}</span>
                " "
                <span class="activity-target">{target}</span>
                {log.details.map(|d| view! { <div class="activity-details">{d}</div> })}
            </div>
            <span class="activity-time">{when}</span>
        </li>
    }
}
