use anyhow::{Context, Result};

use super::LocalStore;
use crate::model::Credential;

/// Fixed key the bearer credential is persisted under.
pub const CREDENTIAL_KEY: &str = "token";

/// Durable home of the session credential. Absence means logged out.
pub trait CredentialStore {
    fn load_credential(&self) -> Result<Option<Credential>>;
    fn save_credential(&mut self, credential: &Credential) -> Result<()>;
    fn clear_credential(&mut self) -> Result<()>;
}

impl CredentialStore for LocalStore {
    fn load_credential(&self) -> Result<Option<Credential>> {
        let token = self
            .get_entry(CREDENTIAL_KEY)
            .context("load persisted credential")?;
        Ok(token.filter(|t| !t.is_empty()).map(Credential::new))
    }

    fn save_credential(&mut self, credential: &Credential) -> Result<()> {
        self.set_entry(CREDENTIAL_KEY, credential.as_str())
            .context("persist credential")
    }

    fn clear_credential(&mut self) -> Result<()> {
        self.remove_entry(CREDENTIAL_KEY)
            .context("clear persisted credential")
    }
}

/// Process-local credential storage (tests, embedding without a state dir).
#[derive(Clone, Debug, Default)]
pub struct MemoryCredentialStore {
    credential: Option<Credential>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: Some(credential),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load_credential(&self) -> Result<Option<Credential>> {
        Ok(self.credential.clone())
    }

    fn save_credential(&mut self, credential: &Credential) -> Result<()> {
        self.credential = Some(credential.clone());
        Ok(())
    }

    fn clear_credential(&mut self) -> Result<()> {
        self.credential = None;
        Ok(())
    }
}
