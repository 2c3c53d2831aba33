//! Collection Query
//!
//! Builds the request path for a collection endpoint.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Page size used when a paginated endpoint should return everything at once
pub const FETCH_ALL_PAGE_SIZE: u32 = 1000;

/// Characters escaped inside query keys and values
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'%');

/// Which slice of the collection to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageRequest {
    /// No paging parameters; the endpoint returns the whole collection
    #[default]
    All,
    /// One zero-based page
    Page { index: u32, size: u32 },
}

impl PageRequest {
    /// First page large enough to hold the whole collection
    pub fn everything() -> Self {
        PageRequest::Page { index: 0, size: FETCH_ALL_PAGE_SIZE }
    }
}

/// Paging plus extra query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionQuery {
    pub page: PageRequest,
    pub params: Vec<(String, String)>,
}

impl CollectionQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn page(index: u32, size: u32) -> Self {
        Self { page: PageRequest::Page { index, size }, params: Vec::new() }
    }

    /// Only a page size (server default page index)
    pub fn sized(size: u32) -> Self {
        Self::all().param("size", size.to_string())
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Append the query string to `endpoint`.
    pub fn to_path(&self, endpoint: &str) -> String {
        let mut pairs: Vec<(String, String)> = Vec::new();
        if let PageRequest::Page { index, size } = self.page {
            pairs.push(("page".to_string(), index.to_string()));
            pairs.push(("size".to_string(), size.to_string()));
        }
        pairs.extend(self.params.iter().cloned());

        if pairs.is_empty() {
            return endpoint.to_string();
        }
        let query = pairs
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, QUERY_VALUE),
                    utf8_percent_encode(v, QUERY_VALUE)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        let sep = if endpoint.contains('?') { '&' } else { '?' };
        format!("{}{}{}", endpoint, sep, query)
    }
}
