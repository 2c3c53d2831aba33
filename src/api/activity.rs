//! Activity Log Endpoints

use chrono::Utc;
use remote_collection::{CollectionQuery, Fallback};
use std::rc::Rc;

use super::{HttpClient, RemoteList, DASHBOARD_SUMMARY};
use crate::models::ActivityLog;

pub const ACTIVITY_LOGS: &str = "/activity-logs";

/// Logs list that falls back to the summary's recent activity when the
/// log endpoint has nothing
pub fn activity_list(client: Rc<HttpClient>) -> RemoteList<ActivityLog> {
    let fallback = Fallback::new(DASHBOARD_SUMMARY, |body| ActivityLog::from_summary(body, Utc::now()));
    RemoteList::new(client, ACTIVITY_LOGS, CollectionQuery::all())
        .with_fallback(fallback)
        .with_load_error("Failed to load activity logs")
}
