//! Collection Payload Decoding
//!
//! The backend returns collections either as a bare JSON array or wrapped in
//! a page envelope (`{"content": [...], "totalElements": ..}`). Both are
//! normalized here before any list state sees them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Page envelope as sent by paginated endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
}

/// Either response shape
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CollectionPayload<T> {
    Bare(Vec<T>),
    Page(PageEnvelope<T>),
}

/// Pagination metadata, present only for enveloped responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub total_elements: Option<u64>,
    pub total_pages: Option<u32>,
    pub number: Option<u32>,
    pub size: Option<u32>,
}

impl<T> CollectionPayload<T> {
    pub fn into_parts(self) -> (Vec<T>, Option<PageInfo>) {
        match self {
            CollectionPayload::Bare(items) => (items, None),
            CollectionPayload::Page(page) => {
                let info = PageInfo {
                    total_elements: page.total_elements,
                    total_pages: page.total_pages,
                    number: page.number,
                    size: page.size,
                };
                (page.content, Some(info))
            }
        }
    }

    pub fn into_items(self) -> Vec<T> {
        self.into_parts().0
    }
}

/// Decode a raw response body into the canonical item list.
pub fn decode_collection<T: DeserializeOwned>(body: Value) -> ApiResult<(Vec<T>, Option<PageInfo>)> {
    if body.is_null() {
        return Err(ApiError::Decode("empty response body".to_string()));
    }
    let payload: CollectionPayload<T> = serde_json::from_value(body)?;
    Ok(payload.into_parts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Row {
        id: u32,
    }

    #[test]
    fn test_decode_bare_array() {
        let (items, info) = decode_collection::<Row>(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert_eq!(items, vec![Row { id: 1 }, Row { id: 2 }]);
        assert!(info.is_none());
    }

    #[test]
    fn test_decode_page_envelope() {
        let body = json!({
            "content": [{"id": 7}],
            "totalElements": 31,
            "totalPages": 4,
            "number": 0,
            "size": 10,
            "sort": {"sorted": false}
        });
        let (items, info) = decode_collection::<Row>(body).unwrap();
        assert_eq!(items, vec![Row { id: 7 }]);
        let info = info.unwrap();
        assert_eq!(info.total_elements, Some(31));
        assert_eq!(info.total_pages, Some(4));
    }

    #[test]
    fn test_envelope_without_metadata() {
        let (items, info) = decode_collection::<Row>(json!({"content": []})).unwrap();
        assert!(items.is_empty());
        assert_eq!(info, Some(PageInfo::default()));
    }

    #[test]
    fn test_unknown_shape_is_decode_error() {
        let err = decode_collection::<Row>(json!({"items": []})).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        let err = decode_collection::<Row>(Value::Null).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
