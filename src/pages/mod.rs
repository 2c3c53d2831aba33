//! Pages
//!
//! One component per screen of the dashboard, plus the login screen.

mod activity_logs;
mod archive_modal;
mod archives;
mod dashboard;
mod events;
mod finance;
mod letters;
mod login;
mod members;
mod periods;
mod profile;
mod projects;

pub use activity_logs::ActivityLogsPage;
pub use archives::ArchivesPage;
pub use dashboard::DashboardPage;
pub use events::EventsPage;
pub use finance::FinancePage;
pub use letters::LettersPage;
pub use login::LoginPage;
pub use members::MembersPage;
pub use periods::PeriodsPage;
pub use profile::ProfilePage;
pub use projects::ProjectsPage;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::models::Member;

/// Fill `into` with the PIC picker options unless already loaded
fn load_member_options(ctx: AppContext, into: RwSignal<Vec<Member>>) {
    if !into.with_untracked(Vec::is_empty) {
        return;
    }
    let client = ctx.client();
    let page_size = ctx.page_size();
    spawn_local(async move {
        match crate::api::fetch_member_options(&client, page_size).await {
            Ok(members) => {
                into.try_set(members);
            }
            Err(err) => log::warn!("member options unavailable: {}", err),
        }
    });
}
