use reqwest::Method;

use super::{ApiError, RemoteClient};
use crate::model::{AuthResponse, Credential, Identity};
use crate::session::AuthBackend;

impl RemoteClient {
    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let rb = self
            .request(Method::POST, "/api/auth/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }));
        self.send_json(rb, "login")
    }

    pub fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<AuthResponse, ApiError> {
        let rb = self
            .request(Method::POST, "/api/auth/register")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "full_name": full_name,
            }));
        self.send_json(rb, "register")
    }

    pub fn me(&self) -> Result<Identity, ApiError> {
        let rb = self.request(Method::GET, "/api/auth/me");
        self.send_json(rb, "me")
    }
}

impl AuthBackend for RemoteClient {
    fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        RemoteClient::login(self, email, password)
    }

    fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<AuthResponse, ApiError> {
        RemoteClient::register(self, email, password, full_name)
    }

    fn current_identity(&self) -> Result<Identity, ApiError> {
        self.me()
    }

    fn set_credential(&mut self, credential: Option<Credential>) {
        RemoteClient::set_credential(self, credential)
    }
}
