//! API Client Contract
//!
//! The transport is supplied by the host application (browser `fetch` in
//! the UI, scripted replies in tests). Authentication headers are the
//! implementation's concern.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::error::ApiResult;

/// HTTP verbs used by the list controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON transport
///
/// Futures are not `Send`: everything runs on the UI thread.
#[async_trait(?Send)]
pub trait ApiClient {
    /// Issue one request. `Ok(None)` means the server sent no body.
    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> ApiResult<Option<Value>>;

    /// GET returning the body, `null` when empty
    async fn get(&self, path: &str) -> ApiResult<Value> {
        Ok(self.request(Method::Get, path, None).await?.unwrap_or(Value::Null))
    }
}

