use remote_collection::{parse_timestamp, Entity, Filterable};
use serde::{Deserialize, Serialize};

use super::{choice_label, DIVISIONS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    /// Student number (NIM)
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub expert_division: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub social_media_link: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Member {
    /// `Full Name (Division)` for PIC pickers
    pub fn option_label(&self) -> String {
        match self.expert_division.as_deref().filter(|d| !d.is_empty()) {
            Some(division) => format!("{} ({})", self.full_name, choice_label(DIVISIONS, division)),
            None => self.full_name.clone(),
        }
    }
}

impl Entity for Member {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl Filterable for Member {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "fullName" => Some(&self.full_name),
            "username" => Some(&self.username),
            "email" => self.email.as_deref(),
            "expertDivision" => self.expert_division.as_deref(),
            _ => None,
        }
    }

    fn sort_name(&self) -> &str {
        &self.full_name
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

    #[test]
    fn test_search_by_nim_and_division_filter() {
        let members: Vec<Member> = serde_json::from_value(json!([
            {"id": "1", "username": "2201001", "fullName": "Rina", "expertDivision": "GIS", "email": null},
            {"id": "2", "username": "2201002", "fullName": "Budi", "expertDivision": "BIG_DATA", "email": "budi@lab.id"}
        ]))
        .unwrap();
        let by_nim = FilterCriteria::new(&["fullName", "username", "email"]).with_search("1002");
        assert_eq!(derive(&members, &by_nim, SortSpec::NameAsc)[0].id, "2");

        let gis = FilterCriteria::new(&["fullName"]).with_filter("expertDivision", FilterValue::Exact("GIS".into()));
        assert_eq!(derive(&members, &gis, SortSpec::NameAsc)[0].id, "1");
    }

    #[test]
    fn test_option_label_names_division() {
        let with: Member = serde_json::from_value(json!({
            "id": "m1", "username": "2201001", "fullName": "Rina Putri", "expertDivision": "CYBER_SECURITY"
        }))
        .unwrap();
        assert_eq!(with.option_label(), "Rina Putri (Cyber Security)");

        let without: Member = serde_json::from_value(json!({"id": "m2", "username": "2201002", "fullName": "Budi"})).unwrap();
        assert_eq!(without.option_label(), "Budi");
    }
}
