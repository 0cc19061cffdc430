use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::UserType;

/// Account row as listed by the admin console.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ManagedUser {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub user_type: UserType,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Plan pricing and third-party API keys managed by admins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdminSettings {
    #[serde(default = "default_basic_price")]
    pub basic_plan_price: f64,

    #[serde(default = "default_premium_price")]
    pub premium_plan_price: f64,

    #[serde(default)]
    pub trading_api_keys: BTreeMap<String, String>,

    #[serde(default)]
    pub payment_api_keys: BTreeMap<String, String>,
}

fn default_basic_price() -> f64 {
    29.99
}

fn default_premium_price() -> f64 {
    99.99
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            basic_plan_price: default_basic_price(),
            premium_plan_price: default_premium_price(),
            trading_api_keys: BTreeMap::new(),
            payment_api_keys: BTreeMap::new(),
        }
    }
}

impl AdminSettings {
    /// Monthly revenue implied by the current user mix.
    pub fn projected_revenue(&self, users: &[ManagedUser]) -> f64 {
        users
            .iter()
            .map(|u| match u.user_type {
                UserType::Basic => self.basic_plan_price,
                UserType::Premium => self.premium_plan_price,
                UserType::Admin => 0.0,
            })
            .sum()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
