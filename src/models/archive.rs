use remote_collection::{parse_timestamp, ApiError, ApiResult, Entity, Filterable};
use serde::{Deserialize, Serialize};

use super::Choices;

pub const ARCHIVE_TYPES: Choices = &[("DOCUMENT", "Document"), ("SOFTWARE", "Software"), ("MEDIA", "Media")];

/// What an archive entry was created from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveSource {
    Project,
    Event,
}

impl ArchiveSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveSource::Project => "PROJECT",
            ArchiveSource::Event => "EVENT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Archive {
    pub id: String,
    #[serde(default)]
    pub archive_code: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub archive_type: String,
    #[serde(default)]
    pub source_type: String,
    #[serde(default)]
    pub publish_location: Option<String>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Entity for Archive {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl Filterable for Archive {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "archiveCode" => Some(&self.archive_code),
            "archiveType" => Some(&self.archive_type),
            "sourceType" => Some(&self.source_type),
            _ => None,
        }
    }

    fn sort_name(&self) -> &str {
        &self.title
    }

    fn sort_time(&self) -> Option<i64> {
        self.publish_date
            .as_deref()
            .or(self.created_at.as_deref())
            .and_then(parse_timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArchiveRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub archive_type: String,
    pub source_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
}

impl CreateArchiveRequest {
    /// Archive entry pointing at a project or event. Blank optional inputs
    /// are left out of the body.
    pub fn from_source(source: ArchiveSource, source_id: &str, title: &str, archive_type: &str) -> Self {
        let source_id = Some(source_id.to_string());
        Self {
            title: title.trim().to_string(),
            description: None,
            archive_type: archive_type.to_string(),
            source_type: source.as_str().to_string(),
            project_id: if source == ArchiveSource::Project { source_id.clone() } else { None },
            event_id: if source == ArchiveSource::Event { source_id } else { None },
            publish_location: None,
            reference_number: None,
            publish_date: None,
        }
    }

    pub fn with_details(mut self, description: &str, publish_location: &str, publish_date: &str) -> Self {
        self.description = non_blank(description);
        self.publish_location = non_blank(publish_location);
        self.publish_date = non_blank(publish_date);
        self
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.title.is_empty() || self.archive_type.is_empty() {
            return Err(ApiError::Validation("Title and archive type are required".into()));
        }
        Ok(())
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_archive_request_from_event() {
        let req = CreateArchiveRequest::from_source(ArchiveSource::Event, "e7", " Expo 2024 ", "MEDIA")
            .with_details("", "https://drive.example/expo", "2024-07-01");
        assert!(req.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "title": "Expo 2024",
                "archiveType": "MEDIA",
                "sourceType": "EVENT",
                "eventId": "e7",
                "publishLocation": "https://drive.example/expo",
                "publishDate": "2024-07-01"
            })
        );
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let req = CreateArchiveRequest::from_source(ArchiveSource::Project, "p1", "  ", "DOCUMENT");
        assert!(matches!(req.validate(), Err(ApiError::Validation(_))));
    }
}
