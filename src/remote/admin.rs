//! Admin console operations. The backend enforces admin rights; callers
//! should still check the capability gate before issuing these.

use reqwest::Method;

use super::{ApiError, RemoteClient};
use crate::model::{AdminSettings, ManagedUser, MessageResponse, UserType};

impl RemoteClient {
    pub fn list_users(&self) -> Result<Vec<ManagedUser>, ApiError> {
        let rb = self.request(Method::GET, "/api/admin/users");
        self.send_json(rb, "list users")
    }

    pub fn upgrade_user(
        &self,
        user_id: &str,
        plan: UserType,
    ) -> Result<MessageResponse, ApiError> {
        let rb = self
            .request(Method::PUT, &format!("/api/admin/users/{}/upgrade", user_id))
            .query(&[("new_plan", plan.as_str())]);
        self.send_json(rb, "upgrade user")
    }

    pub fn admin_settings(&self) -> Result<AdminSettings, ApiError> {
        let rb = self.request(Method::GET, "/api/admin/settings");
        self.send_json(rb, "get admin settings")
    }

    pub fn update_admin_settings(
        &self,
        settings: &AdminSettings,
    ) -> Result<MessageResponse, ApiError> {
        let rb = self.request(Method::PUT, "/api/admin/settings").json(settings);
        self.send_json(rb, "update admin settings")
    }
}
