use reqwest::Method;
use reqwest::blocking::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ApiError, RemoteClient};
use crate::model::Credential;

impl RemoteClient {
    pub fn set_credential(&mut self, credential: Option<Credential>) {
        self.credential = credential;
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(super) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let rb = self.client.request(method, self.url(path));
        match &self.credential {
            Some(credential) => rb.header(reqwest::header::AUTHORIZATION, credential.bearer()),
            None => rb,
        }
    }

    pub(super) fn send_json<T: DeserializeOwned>(
        &self,
        rb: RequestBuilder,
        label: &str,
    ) -> Result<T, ApiError> {
        let resp = self.send(rb, label)?;
        resp.json::<T>()
            .map_err(|err| ApiError::Decode(format!("{}: {}", label, err)))
    }

    pub(super) fn send(&self, rb: RequestBuilder, label: &str) -> Result<Response, ApiError> {
        debug!(request = label, authenticated = self.credential.is_some(), "sending");
        let resp = rb
            .send()
            .map_err(|err| ApiError::Transport(format!("{}: {}", label, err)))?;
        ensure_ok(resp, label)
    }
}

fn ensure_ok(resp: Response, label: &str) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let detail = resp
        .json::<serde_json::Value>()
        .ok()
        .as_ref()
        .and_then(error_detail);
    debug!(request = label, status = status.as_u16(), "request rejected");
    Err(ApiError::from_status(status.as_u16(), detail))
}

/// Server message from an error body: `detail` (FastAPI) or `error`.
/// Non-string details such as validation error lists are ignored.
pub(super) fn error_detail(body: &serde_json::Value) -> Option<String> {
    ["detail", "error"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "../tests/remote/http_client_tests.rs"]
mod tests;
