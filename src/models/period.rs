use remote_collection::{parse_timestamp, ApiError, ApiResult, Entity, Filterable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Period {
    pub fn state(&self) -> &'static str {
        if self.is_archived {
            "ARCHIVED"
        } else if self.is_active {
            "ACTIVE"
        } else {
            "INACTIVE"
        }
    }
}

impl Entity for Period {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl Filterable for Period {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "code" => Some(&self.code),
            "name" => Some(&self.name),
            "state" => Some(self.state()),
            _ => None,
        }
    }

    fn sort_name(&self) -> &str {
        &self.name
    }

    fn sort_time(&self) -> Option<i64> {
        self.start_date.as_deref().and_then(parse_timestamp)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePeriodRequest {
    pub code: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
}

impl CreatePeriodRequest {
    pub fn validate(&self) -> ApiResult<()> {
        if self.code.trim().is_empty() || self.name.trim().is_empty() {
            return Err(ApiError::Validation("Code and name are required".into()));
        }
        if self.start_date.is_empty() || self.end_date.is_empty() {
            return Err(ApiError::Validation("Start and end dates are required".into()));
        }
        // ISO dates compare correctly as strings
        if self.end_date < self.start_date {
            return Err(ApiError::Validation("End date must not be before start date".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(start: &str, end: &str) -> CreatePeriodRequest {
        CreatePeriodRequest {
            code: "P2024-1".into(),
            name: "Period 2024/2025".into(),
            start_date: start.into(),
            end_date: end.into(),
        }
    }

    #[test]
    fn test_validate_dates() {
        assert!(request("2024-08-01", "2025-07-31").validate().is_ok());
        assert!(request("2024-08-01", "2024-07-31").validate().is_err());
        assert!(request("", "2024-07-31").validate().is_err());
    }

    #[test]
    fn test_state() {
        let mut p = Period {
            id: "1".into(),
            code: "P1".into(),
            name: "One".into(),
            start_date: None,
            end_date: None,
            is_active: true,
            is_archived: false,
            created_at: None,
        };
        assert_eq!(p.state(), "ACTIVE");
        p.is_archived = true;
        assert_eq!(p.state(), "ARCHIVED");
    }
}
