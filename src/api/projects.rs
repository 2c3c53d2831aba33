//! Project Endpoints

use remote_collection::{ActionKind, ActionRequest, ApiResult, CollectionQuery, Method, Reconcile};
use std::rc::Rc;

use super::{HttpClient, RemoteList, ARCHIVES};
use crate::models::{CreateArchiveRequest, Project, APPROVAL_APPROVED, APPROVAL_REJECTED};

pub const PROJECTS: &str = "/projects";

pub fn project_list(client: Rc<HttpClient>, page_size: u32) -> RemoteList<Project> {
    RemoteList::new(client, PROJECTS, CollectionQuery::page(0, page_size)).with_load_error("Failed to load projects")
}

pub fn approve_project(id: &str) -> ActionRequest<Project> {
    ActionRequest::transition(ActionKind::Approve, id.to_string(), Method::Post, format!("{}/{}/approve", PROJECTS, id))
        .patch_on_empty(|p: &mut Project| p.approval_status = Some(APPROVAL_APPROVED.to_string()))
}

/// Fails with a validation error on a blank reason
pub fn reject_project(id: &str, reason: &str) -> ApiResult<ActionRequest<Project>> {
    let reason_kept = reason.trim().to_string();
    let request = ActionRequest::reject(id.to_string(), format!("{}/{}/reject", PROJECTS, id), "rejectionReason", reason)?;
    Ok(request.patch_on_empty(move |p: &mut Project| {
        p.approval_status = Some(APPROVAL_REJECTED.to_string());
        p.rejection_reason = Some(reason_kept);
    }))
}

pub fn delete_project(id: &str) -> ActionRequest<Project> {
    ActionRequest::delete(id.to_string(), format!("{}/{}", PROJECTS, id))
}

/// Archive entry for a completed project; the project list is refetched
pub fn archive_project(id: &str, archive: &CreateArchiveRequest) -> ApiResult<ActionRequest<Project>> {
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
