use chrono::{DateTime, SecondsFormat, Utc};
use remote_collection::{parse_timestamp, ApiResult, Entity, Filterable};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Choices, DashboardSummary};

pub const ACTIONS: Choices = &[
    ("CREATE", "Create"),
    ("UPDATE", "Update"),
    ("DELETE", "Delete"),
    ("APPROVE", "Approve"),
    ("REJECT", "Reject"),
];

pub const TARGET_TYPES: Choices = &[
    ("MEMBER", "Member"),
    ("PROJECT", "Project"),
    ("EVENT", "Event"),
    ("LETTER", "Letter"),
    ("ARCHIVE", "Archive"),
];

/// Target type of entries derived from the dashboard summary
pub const UNKNOWN_TARGET: &str = "UNKNOWN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub target_type: String,
    #[serde(default)]
    pub target_name: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub details: Option<String>,
    /// Relative time pre-rendered by the server
    #[serde(default)]
    pub time_ago: Option<String>,
}

impl ActivityLog {
    /// Build reduced-fidelity entries from `/dashboard/summary`
    pub fn from_summary(body: Value, now: DateTime<Utc>) -> ApiResult<Vec<ActivityLog>> {
        let summary: DashboardSummary = serde_json::from_value(body)?;
        let timestamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);
        Ok(summary
            .recent_activities
            .into_iter()
            .enumerate()
            .map(|(index, recent)| ActivityLog {
                id: format!("log-{}", index),
                action: recent.action,
                target_type: UNKNOWN_TARGET.to_string(),
                target_name: recent.target_name,
                user_name: recent.user_name,
                timestamp: timestamp.clone(),
                details: None,
                time_ago: recent.time_ago,
            })
            .collect())
    }

    /// Server text when present, otherwise computed against `now`
    pub fn display_time(&self, now: DateTime<Utc>) -> String {
        if let Some(text) = self.time_ago.as_deref().filter(|t| !t.trim().is_empty()) {
            return text.to_string();
        }
        match parse_timestamp(&self.timestamp) {
            Some(millis) => time_ago(now.timestamp_millis() - millis),
            None => "-".to_string(),
        }
    }
}

/// Coarse relative time for an elapsed duration in milliseconds
pub fn time_ago(elapsed_ms: i64) -> String {
    const UNITS: &[(i64, &str)] = &[
        (31_536_000, "yr"),
        (2_592_000, "mo"),
        (86_400, "day"),
        (3_600, "hr"),
        (60, "min"),
    ];
    let seconds = elapsed_ms.max(0) / 1000;
    for (size, unit) in UNITS {
        // a unit is used once more than one whole unit has passed
        if seconds > *size {
            let count = seconds / size;
            let plural = if count == 1 { "" } else { "s" };
            return format!("{} {}{} ago", count, unit, plural);
        }
    }
    "just now".to_string()
}

impl Entity for ActivityLog {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl Filterable for ActivityLog {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "userName" => Some(&self.user_name),
            "targetName" => Some(&self.target_name),
            "details" => self.details.as_deref(),
            "action" => Some(&self.action),
            "targetType" => Some(&self.target_type),
            _ => None,
        }
    }

    fn sort_name(&self) -> &str {
        &self.target_name
    }

    fn sort_time(&self) -> Option<i64> {
        parse_timestamp(&self.timestamp)
    }
}
