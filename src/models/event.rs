use remote_collection::{parse_timestamp, ApiError, ApiResult, Entity, Filterable};
use serde::{Deserialize, Serialize};

use super::{Choices, MemberSummary};

pub const EVENT_STATUSES: Choices = &[
    ("PLANNED", "Planned"),
    ("ONGOING", "Ongoing"),
    ("COMPLETED", "Completed"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub event_code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub pic: Option<MemberSummary>,
    #[serde(default)]
    pub pic_name: Option<String>,
}

impl Event {
    /// Person in charge, from the nested member or the flattened name
    pub fn pic_display(&self) -> &str {
        self.pic
            .as_ref()
            .map(|p| p.full_name.as_str())
            .or(self.pic_name.as_deref())
            .unwrap_or("-")
    }

    pub fn is_completed(&self) -> bool {
        self.status == "COMPLETED"
    }
}

/// One session inside an event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventScheduleRequest {
    pub activity_date: String,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
}

impl EventScheduleRequest {
    /// Blank full-day session on `date`
    pub fn on(date: &str) -> Self {
        Self {
            activity_date: date.to_string(),
            title: String::new(),
            start_time: "08:00".into(),
            end_time: "16:00".into(),
            location: "Research Lab".into(),
        }
    }
}

/// `POST /events` body. Committee members other than the PIC are added
/// after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub pic_id: String,
    pub schedules: Vec<EventScheduleRequest>,
}

impl CreateEventRequest {
    pub fn validate(&self) -> ApiResult<()> {
        if self.name.trim().is_empty() || self.pic_id.is_empty() || self.start_date.is_empty() || self.end_date.is_empty() {
            return Err(ApiError::Validation("Name, PIC, start date and end date are required".into()));
        }
        // ISO dates compare correctly as strings
        if self.end_date < self.start_date {
            return Err(ApiError::Validation("End date must not be before start date".into()));
        }
        for schedule in &self.schedules {
            if schedule.title.trim().is_empty() || schedule.activity_date.is_empty() {
                return Err(ApiError::Validation("Every schedule needs a title and a date".into()));
            }
            if schedule.activity_date < self.start_date || schedule.activity_date > self.end_date {
                return Err(ApiError::Validation(format!(
                    "Schedule \"{}\" is outside the event dates",
                    schedule.title.trim()
                )));
            }
        }
        Ok(())
    }
}

impl Entity for Event {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

/// Events sort on their start date
impl Filterable for Event {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "eventCode" => Some(&self.event_code),
            "status" => Some(&self.status),
            "location" => self.location.as_deref(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use remote_collection::{derive, FilterCriteria, SortSpec};
    use serde_json::json;

    #[test]
    fn test_pic_display_prefers_member() {
        let flat: Event = serde_json::from_value(json!({"id": "e1", "name": "Expo", "picName": "Budi"})).unwrap();
        assert_eq!(flat.pic_display(), "Budi");

        let nested: Event = serde_json::from_value(json!({
            "id": "e2", "name": "Expo", "picName": "Budi",
            "pic": {"id": "m2", "fullName": "Sari"}
        }))
        .unwrap();
        assert_eq!(nested.pic_display(), "Sari");
    }

    fn expo(schedules: Vec<EventScheduleRequest>) -> CreateEventRequest {
        CreateEventRequest {
            name: "Tech Expo".into(),
            description: String::new(),
            start_date: "2024-10-01".into(),
            end_date: "2024-10-03".into(),
            pic_id: "m2".into(),
            schedules,
        }
    }

    fn session(title: &str, date: &str) -> EventScheduleRequest {
        EventScheduleRequest { title: title.into(), ..EventScheduleRequest::on(date) }
    }

    #[test]
    fn test_create_event_requires_core_fields() {
        assert!(expo(vec![]).validate().is_ok());
        assert!(CreateEventRequest { pic_id: String::new(), ..expo(vec![]) }.validate().is_err());
        assert!(CreateEventRequest { name: "  ".into(), ..expo(vec![]) }.validate().is_err());
        assert!(CreateEventRequest { end_date: "2024-09-30".into(), ..expo(vec![]) }.validate().is_err());
    }

    #[test]
    fn test_schedules_must_fall_inside_event_dates() {
        let edges = expo(vec![session("Opening", "2024-10-01"), session("Closing", "2024-10-03")]);
        assert!(edges.validate().is_ok());

        let early = expo(vec![session("Setup", "2024-09-30")]);
        assert!(matches!(early.validate(), Err(ApiError::Validation(m)) if m.contains("Setup")));

        let late = expo(vec![session("Teardown", "2024-10-04")]);
        assert!(late.validate().is_err());

        let untitled = expo(vec![session(" ", "2024-10-02")]);
        assert!(matches!(untitled.validate(), Err(ApiError::Validation(m)) if m.contains("title")));

        let undated = expo(vec![session("Talk", "")]);
        assert!(undated.validate().is_err());
    }

    #[test]
    fn test_create_event_body() {
        let body = serde_json::to_value(expo(vec![session("Opening", "2024-10-01")])).unwrap();
        assert_eq!(body["picId"], "m2");
        assert_eq!(body["schedules"][0]["activityDate"], "2024-10-01");
        assert_eq!(body["schedules"][0]["startTime"], "08:00");
    }

    #[test]
    fn test_oldest_sorts_by_start_date() {
        let items: Vec<Event> = serde_json::from_value(json!([
            {"id": "late", "name": "B", "startDate": "2024-09-01"},
            {"id": "undated", "name": "C"},
            {"id": "early", "name": "A", "startDate": "2024-02-01"}
        ]))
        .unwrap();
        let out = derive(&items, &FilterCriteria::new(&["name", "eventCode"]), SortSpec::Oldest);
        let ids: Vec<&str> = out.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["undated", "early", "late"]);
    }
}
