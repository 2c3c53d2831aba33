//! Dashboard Page
//!
//! Summary statistics, upcoming deadlines and recent activity.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, RequestSeq};
use crate::context::{use_app_context, Route};
use crate::models::{date_part, DashboardSummary};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let (summary, set_summary) = signal(None::<DashboardSummary>);
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(false);
    let (reload, set_reload) = signal(0u32);
    let requests = StoredValue::new(RequestSeq::default());

    Effect::new(move |_| {
        let _ = reload.get();
        let mut issued = 0;
        requests.update_value(|seq| issued = seq.next());
        set_loading.set(true);
        let client = ctx.client();
        spawn_local(async move {
            let result = api::fetch_summary(&client).await;
            // a retry superseded this request, or the page is gone
            if !requests.try_with_value(|seq| seq.is_latest(issued)).unwrap_or(false) {
                return;
            }
            set_loading.try_set(false);
            match result {
                Ok(loaded) => {
                    set_error.try_set(None);
                    set_summary.try_set(Some(loaded));
                }
                Err(err) => {
                    log::warn!("dashboard summary failed: {}", err);
                    set_error.try_set(Some(err.user_message("Failed to load dashboard")));
                }
            }
        });
    });

    let stat_cards = move || {
        summary.with(|s| {
            let stats = s.as_ref().map(|s| s.statistics.clone()).unwrap_or_default();
            vec![
                ("Projects", stats.total_projects, format!("{} active", stats.active_projects)),
                ("Events", stats.total_events, format!("{} ongoing", stats.ongoing_events)),
                ("Members", stats.total_members, format!("{} active", stats.active_members)),
                ("Archives", stats.total_archives, format!("{} letters", stats.total_letters)),
            ]
        })
    };

    view! {
        <div class="page dashboard-page">
            {move || error.get().map(|message| view! {
                <div class="list-error">
                    <span>{message}</span>
                    <button
                        class="btn btn-secondary"
                        disabled=move || loading.get()
                        on:click=move |_| set_reload.update(|v| *v += 1)
                    >
                        "Retry"
                    </button>
                </div>
            })}
            <section class="stat-grid">
                {move || stat_cards()
                    .into_iter()
                    .map(|(title, value, detail)| view! {
                        <div class="stat-card">
                            <span class="stat-title">{title}</span>
                            <span class="stat-value">{value}</span>
                            <span class="stat-detail">{detail}</span>
                        </div>
                    })
                    .collect_view()}
            </section>

            <section class="card">
                <h2>"Monthly activity"</h2>
                <div class="bar-chart">
                    {move || summary.with(|s| {
                        let Some(s) = s else { return Vec::new() };
                        let peak = s.monthly_peak().max(1);
                        s.monthly_stats
                            .iter()
                            .map(|m| {
                                let projects = format!("height: {}%", m.projects * 100 / peak);
                                let events = format!("height: {}%", m.events * 100 / peak);
                                view! {
                                    <div class="bar-group">
                                        <div class="bar bar-projects" style=projects title=format!("{} projects", m.projects)></div>
                                        <div class="bar bar-events" style=events title=format!("{} events", m.events)></div>
                                        <span class="bar-label">{m.name.clone()}</span>
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                    })}
                </div>
            </section>

            <div class="dashboard-columns">
                <section class="card">
                    <h2>"Upcoming deadlines"</h2>
                    <ul class="deadline-list">
                        {move || summary.with(|s| {
                            s.iter()
                                .flat_map(|s| s.upcoming_deadlines.iter())
                                .map(|item| {
                                    let target = if item.kind == "EVENT" { Route::Events } else { Route::Projects };
                                    view! {
                                        <li on:click=move |_| ctx.navigate(target)>
                                            <span class="deadline-code">{item.code.clone()}</span>
                                            <span class="deadline-name">{item.name.clone()}</span>
                                            <span class="deadline-date">{date_part(&item.deadline).to_string()}</span>
                                            <span class="deadline-days">{format!("{} days left", item.days_remaining)}</span>
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()
                        })}
                    </ul>
                </section>
                <section class="card">
                    <h2>"Recent activity"</h2>
                    <ul class="activity-list">
                        {move || summary.with(|s| {
                            s.iter()
                                .flat_map(|s| s.recent_activities.iter())
                                .map(|a| view! {
                                    <li>
                                        <strong>{a.user_name.clone()}</strong>
                                        " "
                                        {a.action.to_lowercase()}
                                        " "
                                        {a.target_name.clone()}
                                        <span class="activity-time">{a.time_ago.clone().unwrap_or_default()}</span>
                                    </li>
                                })
                                .collect::<Vec<_>>()
                        })}
                    </ul>
                    <button class="btn btn-link" on:click=move |_| ctx.navigate(Route::ActivityLogs)>"View all"</button>
                </section>
            </div>
        </div>
    }
}
