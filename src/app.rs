//! Lab UI App
//!
//! Login screen while signed out, otherwise the dashboard shell:
//! sidebar, header and the page for the current route.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{Header, Sidebar, ToastHost};
use crate::config::AppConfig;
use crate::context::{use_app_context, AppContext, Route};
use crate::pages::{
    ActivityLogsPage, ArchivesPage, DashboardPage, EventsPage, FinancePage, LettersPage, LoginPage, MembersPage,
    PeriodsPage, ProfilePage, ProjectsPage,
};
use crate::store::UiState;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let toast_timeout_ms = config.toast_timeout_ms;
    provide_context(AppContext::new(config));
    provide_context(Store::new(UiState::new(toast_timeout_ms)));

    let ctx = use_app_context();
    let signed_in = move || ctx.user.with(Option::is_some);

    view! {
        <div class="app-root" data-theme=move || ctx.theme.get().as_str()>
            <Show when=signed_in fallback=|| view! { <LoginPage /> }>
                <Shell />
            </Show>
            <ToastHost />
        </div>
    }
}

#[component]
fn Shell() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="app-layout" class:sidebar-collapsed=move || ctx.sidebar_collapsed.get()>
            <Sidebar />
            <div class="app-main">
                <Header />
                <main class="main-content">
                    // Remounting a page refetches its data
                    {move || match ctx.route.get() {
                        Route::Dashboard => view! { <DashboardPage /> }.into_any(),
                        Route::Projects => view! { <ProjectsPage /> }.into_any(),
                        Route::Members => view! { <MembersPage /> }.into_any(),
                        Route::Events => view! { <EventsPage /> }.into_any(),
                        Route::Letters => view! { <LettersPage /> }.into_any(),
                        Route::Archives => view! { <ArchivesPage /> }.into_any(),
                        Route::Finance => view! { <FinancePage /> }.into_any(),
                        Route::Periods => view! { <PeriodsPage /> }.into_any(),
                        Route::ActivityLogs => view! { <ActivityLogsPage /> }.into_any(),
                        Route::Profile => view! { <ProfilePage /> }.into_any(),
                    }}
                </main>
            </div>
        </div>
    }
}
