use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub total_projects: u32,
    pub active_projects: u32,
    pub completed_projects: u32,
    pub total_events: u32,
    pub ongoing_events: u32,
    pub completed_events: u32,
    pub total_members: u32,
    pub active_members: u32,
    pub total_archives: u32,
    pub total_letters: u32,
}

/// Project or event deadline shown on the overview
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingItem {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub days_remaining: i64,
}

/// Activity entry as embedded in the summary; fewer fields than a log row
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecentActivity {
    pub action: String,
    pub target_name: String,
    pub user_name: String,
    pub time_ago: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStat {
    pub name: String,
    #[serde(default)]
    pub projects: u32,
    #[serde(default)]
    pub events: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSummary {
    pub statistics: Statistics,
    pub upcoming_deadlines: Vec<UpcomingItem>,
    pub recent_activities: Vec<RecentActivity>,
    pub monthly_stats: Vec<MonthlyStat>,
}

impl DashboardSummary {
    /// Highest monthly count, for scaling the overview bars
    pub fn monthly_peak(&self) -> u32 {
        self.monthly_stats.iter().map(|m| m.projects.max(m.events)).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_decodes_partial_payload() {
        let summary: DashboardSummary = serde_json::from_value(json!({
            "statistics": {"totalProjects": 12, "activeProjects": 5},
            "upcomingDeadlines": [{"type": "EVENT", "id": "e1", "name": "Expo", "deadline": "2024-07-01", "daysRemaining": 4}],
            "monthlyStats": [{"name": "Jan", "projects": 2, "events": 7}, {"name": "Feb", "projects": 4}]
        }))
        .unwrap();
        assert_eq!(summary.statistics.total_projects, 12);
        assert_eq!(summary.statistics.total_members, 0);
        assert_eq!(summary.upcoming_deadlines[0].days_remaining, 4);
        assert!(summary.recent_activities.is_empty());
        assert_eq!(summary.monthly_peak(), 7);
    }
}
