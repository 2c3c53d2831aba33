//! HTTP Client
//!
//! Browser `fetch` through gloo-net. Adds the bearer token of the current
//! session and turns non-2xx responses into typed errors. A 401 also
//! clears the session, which sends the UI back to the login screen.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use remote_collection::{ApiClient, ApiError, ApiResult, Method, SharedState};
use serde_json::{Map, Value};
use wasm_bindgen::JsValue;
use web_sys::FormData;

use crate::models::Session;

/// Keys allowed next to `data` in the `{data, message, meta}` wrapper
const WRAPPER_KEYS: &[&str] = &["data", "message", "meta", "success", "status", "timestamp"];

pub struct HttpClient {
    base_url: String,
    session: SharedState<Option<Session>>,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>, session: SharedState<Option<Session>>) -> Self {
        Self { base_url: base_url.into(), session }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self.session.read(|s| s.as_ref().map(|s| s.token.clone()));
        match token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// POST a multipart form. The browser sets the boundary header.
    pub async fn post_multipart(&self, path: &str, form: &FormData) -> ApiResult<Option<Value>> {
        log::debug!("POST {} (multipart)", path);
        let request = self
            .authorize(Request::post(&self.url(path)))
            .body(JsValue::from(form.clone()))
            .map_err(network)?;
        let response = request.send().await.map_err(network)?;
        self.read_response(path, response).await
    }

    async fn read_response(&self, path: &str, response: Response) -> ApiResult<Option<Value>> {
        let status = response.status();
        let text = response.text().await.map_err(network)?;
        if (200..300).contains(&status) {
            return parse_body(&text);
        }
        let err = ApiError::from_status(status, server_message(&text));
        if err.is_unauthorized() {
            log::info!("{} answered 401, signing out", path);
            self.session.set(None);
        }
        Err(err)
    }
}

#[async_trait(?Send)]
impl ApiClient for HttpClient {
    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> ApiResult<Option<Value>> {
        let url = self.url(path);
        let builder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Patch => Request::patch(&url),
            Method::Delete => Request::delete(&url),
        };
        let builder = self.authorize(builder);
        let request = match body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(network)?;
        let response = request.send().await.map_err(network)?;
        self.read_response(path, response).await
    }
}

fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

pub(crate) fn js_error(err: JsValue) -> ApiError {
    ApiError::Network(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// Empty body is `None`; a `{data: ...}` wrapper is unwrapped.
fn parse_body(text: &str) -> ApiResult<Option<Value>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(text)?;
    Ok(Some(unwrap_data(value)))
}

fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if is_wrapper(&map) => map.remove("data").unwrap_or(Value::Null),
        other => other,
    }
}

fn is_wrapper(map: &Map<String, Value>) -> bool {
    map.contains_key("data") && map.keys().all(|k| WRAPPER_KEYS.contains(&k.as_str()))
}

/// `message` (or `error`) from an error body, if it is JSON
fn server_message(text: &str) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body_empty() {
        assert_eq!(parse_body("").unwrap(), None);
        assert_eq!(parse_body("  \n").unwrap(), None);
    }

    #[test]
    fn test_parse_body_unwraps_api_response() {
        let body = parse_body(r#"{"data": [{"id": "1"}], "message": "ok", "meta": {"page": 0}}"#).unwrap();
        assert_eq!(body, Some(json!([{"id": "1"}])));
    }

    #[test]
    fn test_parse_body_keeps_entities_and_pages() {
        let page = parse_body(r#"{"content": [], "totalElements": 0}"#).unwrap();
        assert_eq!(page, Some(json!({"content": [], "totalElements": 0})));

        // an entity that happens to have a `data` field is not a wrapper
        let entity = parse_body(r#"{"id": "x", "data": 1}"#).unwrap();
        assert_eq!(entity, Some(json!({"id": "x", "data": 1})));
    }

    #[test]
    fn test_parse_body_rejects_garbage() {
        assert!(matches!(parse_body("<html>"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_server_message() {
        assert_eq!(server_message(r#"{"message": "Project not found"}"#).as_deref(), Some("Project not found"));
        assert_eq!(server_message(r#"{"error": "Forbidden"}"#).as_deref(), Some("Forbidden"));
        assert_eq!(server_message("Bad Gateway"), None);
        assert_eq!(server_message(r#"{"status": 500}"#), None);
    }
}
