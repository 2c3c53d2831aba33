use remote_collection::{parse_timestamp, Entity, Filterable};
use serde::{Deserialize, Serialize};

use super::{Choices, MemberSummary};

pub const DIVISIONS: Choices = &[
    ("BIG_DATA", "Big Data"),
    ("CYBER_SECURITY", "Cyber Security"),
    ("GAME_TECH", "Game Tech"),
    ("GIS", "GIS"),
];

pub const PROJECT_STATUSES: Choices = &[
    ("NOT_STARTED", "Not Started"),
    ("IN_PROGRESS", "In Progress"),
    ("ON_HOLD", "On Hold"),
    ("COMPLETED", "Completed"),
];

pub const APPROVAL_PENDING: &str = "PENDING";
pub const APPROVAL_APPROVED: &str = "APPROVED";
pub const APPROVAL_REJECTED: &str = "REJECTED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub project_code: String,
    pub name: String,
    #[serde(default)]
    pub division: String,
    #[serde(default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub approval_status: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub progress_percent: u32,
    #[serde(default)]
    pub leader: Option<MemberSummary>,
    #[serde(default)]
    pub team_members: Vec<MemberSummary>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Project {
    pub fn is_awaiting_approval(&self) -> bool {
        self.approval_status.as_deref() == Some(APPROVAL_PENDING)
    }

    pub fn is_completed(&self) -> bool {
        self.status == "COMPLETED"
    }

    pub fn leader_name(&self) -> &str {
        self.leader.as_ref().map(|l| l.full_name.as_str()).unwrap_or("-")
    }
}

impl Entity for Project {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl Filterable for Project {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "projectCode" => Some(&self.project_code),
            "division" => Some(&self.division),
            "status" => Some(&self.status),
            "approvalStatus" => self.approval_status.as_deref(),
            _ => None,
        }
    }

    fn sort_name(&self) -> &str {
        &self.name
    }

    fn sort_time(&self) -> Option<i64> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remote_collection::{derive, FilterCriteria, FilterValue, SortSpec};
    use serde_json::json;

    fn project(id: &str, name: &str, code: &str, division: &str, created: &str) -> Project {
        serde_json::from_value(json!({
            "id": id,
            "projectCode": code,
            "name": name,
            "division": division,
            "status": "IN_PROGRESS",
            "approvalStatus": "PENDING",
            "createdAt": created,
            "leader": {"id": "m1", "username": "2201001", "fullName": "Rina Putri"}
        }))
        .unwrap()
    }

    #[test]
    fn test_decodes_sparse_project() {
        let p: Project = serde_json::from_value(json!({"id": "p9", "name": "Bare"})).unwrap();
        assert_eq!(p.leader_name(), "-");
        assert!(!p.is_awaiting_approval());
        assert!(p.team_members.is_empty());
    }

    #[test]
    fn test_search_covers_name_and_code() {
        let items = vec![
            project("1", "Smart Farming", "PRJ-001", "GIS", "2024-01-01T00:00:00"),
            project("2", "Threat Intel", "SEC-002", "CYBER_SECURITY", "2024-02-01T00:00:00"),
        ];
        let by_code = FilterCriteria::new(&["name", "projectCode"]).with_search("sec-");
        assert_eq!(derive(&items, &by_code, SortSpec::Newest)[0].id, "2");

        let by_division = FilterCriteria::new(&["name", "projectCode"])
            .with_filter("division", FilterValue::Exact("GIS".into()));
        let out = derive(&items, &by_division, SortSpec::Newest);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].leader_name(), "Rina Putri");
    }

    #[test]
    fn test_newest_first_by_created_at() {
        let items = vec![
            project("1", "A", "P1", "GIS", "2024-01-01T00:00:00"),
            project("2", "B", "P2", "GIS", "2024-05-01T00:00:00"),
        ];
        let out = derive(&items, &FilterCriteria::new(&["name"]), SortSpec::Newest);
        assert_eq!(out[0].id, "2");
    }
}
