//! Letter Endpoints

use remote_collection::{ActionKind, ActionRequest, ApiResult, CollectionQuery, Method};
use std::rc::Rc;

use super::{HttpClient, RemoteList};
use crate::models::Letter;

pub const LETTERS: &str = "/letters";

pub fn letter_list(client: Rc<HttpClient>) -> RemoteList<Letter> {
    RemoteList::new(client, LETTERS, CollectionQuery::all()).with_load_error("Failed to load letters")
}

pub fn approve_letter(id: &str) -> ActionRequest<Letter> {
    ActionRequest::transition(ActionKind::Approve, id.to_string(), Method::Post, format!("{}/{}/approve", LETTERS, id))
        .patch_on_empty(|l: &mut Letter| l.status = "APPROVED".to_string())
}

pub fn reject_letter(id: &str, reason: &str) -> ApiResult<ActionRequest<Letter>> {
    let reason_kept = reason.trim().to_string();
    let request = ActionRequest::reject(id.to_string(), format!("{}/{}/reject", LETTERS, id), "rejectionReason", reason)?;
    Ok(request.patch_on_empty(move |l: &mut Letter| {
        l.status = "REJECTED".to_string();
        l.rejection_reason = Some(reason_kept);
    }))
}
