use std::time::Duration;

use anyhow::{Context, Result};

use crate::model::Credential;

mod admin;
mod auth;
mod error;
mod http_client;
mod market;

pub use self::error::ApiError;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking client for the backend REST API.
///
/// While a credential is set every request carries it as a bearer header;
/// clearing the credential drops the header from all later requests.
pub struct RemoteClient {
    base_url: String,
    credential: Option<Credential>,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_connect_timeout(base_url, DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn with_connect_timeout(base_url: &str, connect_timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("mk7")
            .connect_timeout(connect_timeout)
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credential: None,
            client,
        })
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }
}
