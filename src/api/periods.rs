//! Period Endpoints

use remote_collection::{ActionKind, ActionRequest, ApiResult, CollectionQuery, Method, Placement, Reconcile};
use std::rc::Rc;

use super::{HttpClient, RemoteList};
use crate::models::{CreatePeriodRequest, Period};

pub const PERIODS: &str = "/periods";

pub fn period_list(client: Rc<HttpClient>) -> RemoteList<Period> {
    RemoteList::new(client, PERIODS, CollectionQuery::all()).with_load_error("Failed to load periods")
}

pub fn create_period(request: &CreatePeriodRequest) -> ApiResult<ActionRequest<Period>> {
    request.validate()?;
    Ok(ActionRequest::create(PERIODS, serde_json::to_value(request)?, Placement::Prepend))
}

/// Activating one period deactivates the others, so the list is refetched
pub fn activate_period(id: &str) -> ActionRequest<Period> {
    ActionRequest::transition(ActionKind::Activate, id.to_string(), Method::Patch, format!("{}/{}/activate", PERIODS, id))
        .with_reconcile(Reconcile::Refetch)
}

pub fn archive_period(id: &str) -> ActionRequest<Period> {
    ActionRequest::transition(ActionKind::Archive, id.to_string(), Method::Patch, format!("{}/{}/archive", PERIODS, id))
}

pub fn delete_period(id: &str) -> ActionRequest<Period> {
    ActionRequest::delete(id.to_string(), format!("{}/{}", PERIODS, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_paths() {
        let activate = activate_period("pe1");
        assert_eq!(activate.method, Method::Patch);
        assert_eq!(activate.path, "/periods/pe1/activate");
        assert!(matches!(activate.reconcile, Reconcile::Refetch));

        let archive = archive_period("pe1");
        assert_eq!(archive.path, "/periods/pe1/archive");
        assert!(matches!(archive.reconcile, Reconcile::Replace { .. }));
    }

    #[test]
    fn test_create_validates_first() {
        assert!(create_period(&CreatePeriodRequest::default()).is_err());
    }
}
