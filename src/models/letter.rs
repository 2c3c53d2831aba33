use remote_collection::{parse_timestamp, Entity, Filterable};
use serde::{Deserialize, Serialize};

use super::Choices;

pub const LETTER_STATUSES: Choices = &[("PENDING", "Pending"), ("APPROVED", "Approved"), ("REJECTED", "Rejected")];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Letter {
    pub id: String,
    /// Assigned on approval
    #[serde(default)]
    pub letter_number: Option<String>,
    #[serde(default)]
    pub letter_type: String,
    #[serde(default)]
    pub category: String,
    pub subject: String,
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub requester_name: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Letter {
    pub fn is_pending(&self) -> bool {
        self.status == "PENDING"
    }
}

impl Entity for Letter {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl Filterable for Letter {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "subject" => Some(&self.subject),
            "recipient" => Some(&self.recipient),
            "status" => Some(&self.status),
            "letterType" => Some(&self.letter_type),
            _ => None,
        }
    }

    fn sort_name(&self) -> &str {
        &self.subject
    }

    fn sort_time(&self) -> Option<i64> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}
