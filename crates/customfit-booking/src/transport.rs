//! Booking endpoint transport
//!
//! One request per submission: a multipart POST of every named form field.
//! The reply is JSON; on a non-2xx status it may carry an `errors` list.

use crate::error::TransportError;
use async_trait::async_trait;
use serde::Serialize;

/// Shown when the server rejects the booking without saying why
pub const BOOKING_FAILED: &str = "Booking failed. Please try again.";

/// Shown for transport and parse failures
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

/// Named form fields, in document order. Duplicate names are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, String)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encode as `multipart/form-data`
    pub fn to_multipart(&self) -> reqwest::multipart::Form {
        self.fields
            .iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            })
    }
}

impl FromIterator<(String, String)> for FormPayload {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Raw endpoint reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends the booking form
#[async_trait(?Send)]
pub trait Transport {
    async fn post_form(
        &self,
        url: &str,
        payload: &FormPayload,
    ) -> Result<TransportResponse, TransportError>;
}

/// `reqwest` transport. Runs natively and, through fetch, on wasm32.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: None,
        }
    }

    /// Resolve relative endpoints against `base_url` (scheme and host)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub fn resolve(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        match &self.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                endpoint.trim_start_matches('/')
            ),
            None => endpoint.to_string(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn post_form(
        &self,
        url: &str,
        payload: &FormPayload,
    ) -> Result<TransportResponse, TransportError> {
        let url = self.resolve(url);
        tracing::debug!(%url, fields = payload.len(), "POST booking form");

        let response = self
            .client
            .post(&url)
            .multipart(payload.to_multipart())
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}

/// What the page should do with a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Booking accepted; leave for this URL
    Redirect(String),
    /// Server refused the booking
    Rejected(String),
    /// Transport or parse failure
    Failed(String),
}

/// Map a reply onto an outcome. The body must be JSON whatever the status.
pub fn interpret_response(response: &TransportResponse, success_redirect: &str) -> SubmissionOutcome {
    let reply: serde_json::Value = match serde_json::from_str(&response.body) {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(status = response.status, error = %e, "booking reply is not JSON");
            return SubmissionOutcome::Failed(GENERIC_FAILURE.into());
        }
    };

    if !response.is_success() {
        let message = server_errors(&reply).unwrap_or_else(|| BOOKING_FAILED.into());
        return SubmissionOutcome::Rejected(message);
    }

    SubmissionOutcome::Redirect(success_redirect.into())
}

/// `errors` joined with ", "; `None` when absent, not a list, or empty
fn server_errors(reply: &serde_json::Value) -> Option<String> {
    let errors = reply.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }
    let messages: Vec<String> = errors
        .iter()
        .map(|e| match e.as_str() {
            Some(s) => s.to_string(),
            None => e.to_string(),
        })
        .collect();
    Some(messages.join(", "))
}
