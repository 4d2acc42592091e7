//! Action dispatchers: one per resource, turning a user intent into a
//! backend call and a typed result.
//!
//! DESIGN
//! ======
//! A dispatcher owns no state besides its transport handle and resource
//! path. It does not emit notifications; the page layer maps the returned
//! `Result` onto a notice. Wire decoding is kept in pure functions so it can
//! be tested without a transport.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::http::{HttpError, Method, Transport};
use crate::record::{Record, RecordError};

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;

/// Failure of a dispatcher operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// Transport, status or JSON failure from the HTTP adapter.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The body is valid JSON but not the shape this operation expects.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// A record in the body was rejected.
    #[error("invalid record in response: {0}")]
    Record(#[from] RecordError),
}

impl DispatchError {
    /// Whether the failure came from the payload rather than the network.
    /// Decode failures are logged in more detail than transport ones.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Http(HttpError::Decode(_)) | Self::Shape(_) | Self::Record(_))
    }
}

/// Dispatcher for one backend resource.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    resource: &'static str,
    path: &'static str,
}

impl Dispatcher {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, resource: &'static str, path: &'static str) -> Self {
        Self { transport, resource, path }
    }

    #[must_use]
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    #[must_use]
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// `GET <path>`: the whole collection.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] on any transport or decode failure.
    pub async fn fetch_all(&self) -> Result<Vec<Record>, DispatchError> {
        let body = self.transport.request(Method::Get, self.path, None).await?;
        let records = decode_collection(body)?;
        tracing::debug!(resource = self.resource, count = records.len(), "collection fetched");
        Ok(records)
    }

    /// `POST <path>` with `fields` as the JSON body: the created record.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] on any transport or decode failure.
    pub async fn create(&self, fields: &Map<String, Value>) -> Result<Record, DispatchError> {
        let body = Value::Object(fields.clone());
        let response = self.transport.request(Method::Post, self.path, Some(&body)).await?;
        let record = decode_created(response)?;
        tracing::info!(resource = self.resource, id = %record.id(), "record created");
        Ok(record)
    }
}

/// A collection response is a JSON array of records.
fn decode_collection(body: Value) -> Result<Vec<Record>, DispatchError> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .map(|item| Record::from_value(item).map_err(DispatchError::from))
            .collect(),
        other => Err(DispatchError::Shape(format!("expected an array, got {}", short(&other)))),
    }
}

/// A create response is `{ "data": Record }`. A bare record carrying an
/// `id` is accepted too, since some endpoints skip the envelope.
fn decode_created(body: Value) -> Result<Record, DispatchError> {
    match body {
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(data) => Ok(Record::from_value(data)?),
            None if envelope.contains_key("id") => Ok(Record::from_fields(envelope)?),
            None => Err(DispatchError::Shape("missing `data` in create response".to_owned())),
        },
        other => Err(DispatchError::Shape(format!("expected an object, got {}", short(&other)))),
    }
}

fn short(value: &Value) -> String {
    let mut text = value.to_string();
    if text.len() > 64 {
        let cut = (0..=64).rev().find(|&i| text.is_char_boundary(i)).unwrap_or(0);
        text.truncate(cut);
        text.push('…');
    }
    text
}
