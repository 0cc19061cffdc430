//! Session store: the single owner of the current credential and identity.
//!
//! A `SessionStore` starts out loading. `restore_session` settles it to
//! logged-in or logged-out; `login`/`register` replace the session
//! wholesale; `logout` clears it. Mutations take `&mut self`, so two
//! logins can never interleave on the same store.

use tracing::{info, warn};

use crate::capability::{Capabilities, Decision, Feature, FeatureDenied, Guard};
use crate::model::{AuthResponse, Credential, Identity};
use crate::remote::ApiError;
use crate::store::CredentialStore;

mod error;
pub use self::error::SessionError;

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

/// Identity endpoint seam the session validates credentials against.
pub trait AuthBackend {
    fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;

    fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<AuthResponse, ApiError>;

    /// Identity for the credential currently attached to outbound requests.
    fn current_identity(&self) -> Result<Identity, ApiError>;

    /// Attach (or with `None`, detach) the bearer credential for later requests.
    fn set_credential(&mut self, credential: Option<Credential>);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// Not yet determined; `restore_session` has not completed.
    Loading,
    LoggedOut,
    LoggedIn,
}

pub struct SessionStore<B, S> {
    backend: B,
    storage: S,
    credential: Option<Credential>,
    identity: Option<Identity>,
    loading: bool,
}

impl<B: AuthBackend, S: CredentialStore> SessionStore<B, S> {
    pub fn new(mut backend: B, storage: S) -> Self {
        backend.set_credential(None);
        Self {
            backend,
            storage,
            credential: None,
            identity: None,
            loading: true,
        }
    }

    /// Revalidate the persisted credential, if any. Any failure is an
    /// ordinary transition to logged-out, never an error.
    pub fn restore_session(&mut self) -> SessionStatus {
        let persisted = match self.storage.load_credential() {
            Ok(credential) => credential,
            Err(err) => {
                warn!(error = %format!("{:#}", err), "cannot read persisted credential");
                None
            }
        };

        match persisted {
            None => {
                self.credential = None;
                self.identity = None;
                self.backend.set_credential(None);
            }
            Some(credential) => {
                self.backend.set_credential(Some(credential.clone()));
                match self.backend.current_identity() {
                    Ok(identity) => {
                        info!(user_type = %identity.user_type, "session restored");
                        self.credential = Some(credential);
                        self.identity = Some(identity);
                    }
                    Err(err) => {
                        warn!(
                            error = %err,
                            rejected = err.is_rejection(),
                            "session restore failed; logging out"
                        );
                        self.clear();
                    }
                }
            }
        }

        self.loading = false;
        self.status()
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<Identity, SessionError> {
        let resp = self
            .backend
            .login(email, password)
            .map_err(|err| SessionError::request(err, LOGIN_FAILED))?;
        self.accept(resp)
    }

    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Identity, SessionError> {
        let resp = self
            .backend
            .register(email, password, full_name)
            .map_err(|err| SessionError::request(err, REGISTRATION_FAILED))?;
        self.accept(resp)
    }

    /// Drop the session everywhere. Storage failures are logged, not returned.
    pub fn logout(&mut self) {
        self.clear();
        self.loading = false;
        info!("logged out");
    }

    // Persist first so a storage failure leaves the in-memory session untouched.
    fn accept(&mut self, resp: AuthResponse) -> Result<Identity, SessionError> {
        let credential = Credential::new(resp.access_token);
        self.storage
            .save_credential(&credential)
            .map_err(SessionError::Storage)?;

        self.backend.set_credential(Some(credential.clone()));
        self.credential = Some(credential);
        self.loading = false;
        info!(user_type = %resp.user.user_type, "logged in");
        self.identity = Some(resp.user.clone());
        Ok(resp.user)
    }

    fn clear(&mut self) {
        self.credential = None;
        self.identity = None;
        self.backend.set_credential(None);
        if let Err(err) = self.storage.clear_credential() {
            warn!(error = %format!("{:#}", err), "cannot clear persisted credential");
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> SessionStatus {
        if self.loading {
            SessionStatus::Loading
        } else if self.identity.is_some() {
            SessionStatus::LoggedIn
        } else {
            SessionStatus::LoggedOut
        }
    }

    /// Derived on every call; never cached.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::derive(self.identity.as_ref())
    }

    pub fn evaluate(&self, guard: Guard) -> Decision {
        guard.evaluate(self.loading, self.capabilities())
    }

    /// Backend access for a gated feature.
    pub fn authorize(&self, feature: Feature) -> Result<&B, FeatureDenied> {
        self.capabilities().require_feature(feature)?;
        Ok(&self.backend)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
