//! In-memory [`Transport`] for tests: replays queued responses and records
//! every call. Compiled for this crate's own tests and for dependents that
//! enable the `test-util` feature.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::http::{HttpError, Method, Transport};

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value, HttpError>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    /// Queue `responses`, returned in order. Once drained every request
    /// fails with [`HttpError::Request`].
    #[must_use]
    pub fn new(responses: Vec<Result<Value, HttpError>>) -> Self {
        Self { responses: Mutex::new(responses.into()), calls: Mutex::new(Vec::new()) }
    }

    /// Every call made so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    /// `(method, path)` of every call made so far.
    #[must_use]
    pub fn requests(&self) -> Vec<(Method, String)> {
        lock(&self.calls).iter().map(|c| (c.method, c.path.clone())).collect()
    }
}

// A panicking test thread must not hide the calls made before it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, HttpError> {
        lock(&self.calls).push(Call { method, path: path.to_owned(), body: body.cloned() });
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Request("no mock response queued".to_owned())))
    }
}
