//! Test fixtures: a small entity and a scripted client.

use async_trait::async_trait;
use futures::channel::oneshot;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::client::{ApiClient, Method};
use crate::entity::Entity;
use crate::error::{ApiError, ApiResult};
use crate::filter::{parse_timestamp, Filterable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Row {
    pub fn new(id: &str, name: &str) -> Self {
        Self { id: id.into(), name: name.into(), status: String::new(), code: String::new(), created_at: None }
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = status.into();
        self
    }

    pub fn code(mut self, code: &str) -> Self {
        self.code = code.into();
        self
    }

    pub fn created(mut self, at: &str) -> Self {
        self.created_at = Some(at.into());
        self
    }
}

impl Entity for Row {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl Filterable for Row {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "status" => Some(&self.status),
            "code" => Some(&self.code),
            _ => None,
        }
    }

    fn sort_name(&self) -> &str {
        &self.name
    }

    fn sort_time(&self) -> Option<i64> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

enum Reply {
    Ready(ApiResult<Option<Value>>),
    Deferred(oneshot::Receiver<ApiResult<Option<Value>>>),
}

/// Answers requests from a queue, in order. Deferred replies resolve when
/// the test sends on the returned channel.
#[derive(Default)]
pub struct ScriptedClient {
    replies: RefCell<VecDeque<Reply>>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedClient {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn reply(&self, result: ApiResult<Value>) {
        self.replies.borrow_mut().push_back(Reply::Ready(result.map(Some)));
    }

    /// Successful response with no body
    pub fn reply_empty(&self) {
        self.replies.borrow_mut().push_back(Reply::Ready(Ok(None)));
    }

    pub fn defer(&self) -> oneshot::Sender<ApiResult<Option<Value>>> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Reply::Deferred(rx));
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl ApiClient for ScriptedClient {
    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> ApiResult<Option<Value>> {
        self.calls.borrow_mut().push(Call { method, path: path.to_string(), body: body.cloned() });
        let next = self.replies.borrow_mut().pop_front();
        match next {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Deferred(rx)) => rx.await.unwrap_or_else(|_| Err(ApiError::Network("reply dropped".into()))),
            None => Err(ApiError::Network(format!("no scripted reply for {} {}", method, path))),
        }
    }
}
