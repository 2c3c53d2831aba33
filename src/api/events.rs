//! Event Endpoints

use remote_collection::{ActionKind, ActionRequest, ApiResult, CollectionQuery, Method, Placement, Reconcile};
use std::rc::Rc;

use super::{HttpClient, RemoteList, ARCHIVES};
use crate::models::{CreateArchiveRequest, CreateEventRequest, Event};

pub const EVENTS: &str = "/events";

pub fn event_list(client: Rc<HttpClient>) -> RemoteList<Event> {
    RemoteList::new(client, EVENTS, CollectionQuery::all()).with_load_error("Failed to load events")
}

pub fn create_event(request: &CreateEventRequest) -> ApiResult<ActionRequest<Event>> {
    request.validate()?;
    Ok(ActionRequest::create(EVENTS, serde_json::to_value(request)?, Placement::Prepend))
}

pub fn delete_event(id: &str) -> ActionRequest<Event> {
    ActionRequest::delete(id.to_string(), format!("{}/{}", EVENTS, id))
}

pub fn archive_event(id: &str, archive: &CreateArchiveRequest) -> ApiResult<ActionRequest<Event>> {
    archive.validate()?;
    Ok(ActionRequest {
        kind: ActionKind::Archive,
        entity_id: Some(id.to_string()),
        method: Method::Post,
        path: ARCHIVES.to_string(),
        body: Some(serde_json::to_value(archive)?),
        reconcile: Reconcile::Refetch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventScheduleRequest;

    #[test]
    fn test_create_event_prepends_after_validation() {
        let mut request = CreateEventRequest {
            name: "Tech Expo".into(),
            start_date: "2024-10-01".into(),
            end_date: "2024-10-03".into(),
            pic_id: "m2".into(),
            ..Default::default()
        };
        request.schedules.push(EventScheduleRequest { title: "Setup".into(), ..EventScheduleRequest::on("2024-09-30") });
        assert!(create_event(&request).is_err());

        request.schedules[0].activity_date = "2024-10-01".into();
        let action = create_event(&request).unwrap();
        assert_eq!(action.path, "/events");
        assert_eq!(action.method, Method::Post);
        assert!(matches!(action.reconcile, Reconcile::Insert(Placement::Prepend)));
    }
}
