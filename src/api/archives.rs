//! Archive Endpoints

use remote_collection::{ActionRequest, CollectionQuery};
use std::rc::Rc;

use super::{HttpClient, RemoteList};
use crate::models::Archive;

pub const ARCHIVES: &str = "/archives";

pub fn archive_list(client: Rc<HttpClient>) -> RemoteList<Archive> {
    RemoteList::new(client, ARCHIVES, CollectionQuery::all()).with_load_error("Failed to load archives")
}

pub fn delete_archive(id: &str) -> ActionRequest<Archive> {
    ActionRequest::delete(id.to_string(), format!("{}/{}", ARCHIVES, id))
}
