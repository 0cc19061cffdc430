mod admin;
mod config;
mod identity;
mod market;

pub use self::admin::{AdminSettings, ManagedUser, MessageResponse};
pub use self::config::{ClientConfig, ClientState, DEFAULT_API_URL};
pub use self::identity::{AuthResponse, Credential, Identity, UserType};
pub use self::market::{AnalysisReport, AnalysisRequest, AnalysisType, CoinQuote, HealthStatus};
