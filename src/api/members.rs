//! Member Endpoints

use remote_collection::{decode_collection, ActionRequest, ApiClient, ApiResult, CollectionQuery};
use std::rc::Rc;

use super::{HttpClient, RemoteList};
use crate::models::Member;

pub const MEMBERS: &str = "/members";

pub fn member_list(client: Rc<HttpClient>, page_size: u32) -> RemoteList<Member> {
    RemoteList::new(client, MEMBERS, CollectionQuery::page(0, page_size)).with_load_error("Failed to load members")
}

pub fn delete_member(id: &str) -> ActionRequest<Member> {
    ActionRequest::delete(id.to_string(), member_path(id))
}

fn member_path(id: &str) -> String {
    format!("{}/{}", MEMBERS, id)
}

/// One page of members for the PIC pickers
pub async fn fetch_member_options(client: &HttpClient, page_size: u32) -> ApiResult<Vec<Member>> {
    let body = client.get(&CollectionQuery::page(0, page_size).to_path(MEMBERS)).await?;
    let (members, _) = decode_collection(body)?;
    Ok(members)
}

pub async fn fetch_member(client: &HttpClient, id: &str) -> ApiResult<Member> {
    let body = client.get(&member_path(id)).await?;
    Ok(serde_json::from_value(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_paths() {
        assert_eq!(member_path("m7"), "/members/m7");
        assert_eq!(CollectionQuery::page(0, 1000).to_path(MEMBERS), "/members?page=0&size=1000");
        assert_eq!(delete_member("m7").path, "/members/m7");
    }
}
