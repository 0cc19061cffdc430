use std::collections::BTreeMap;

use reqwest::Method;

use super::{ApiError, RemoteClient};
use crate::model::{AnalysisReport, AnalysisRequest, CoinQuote, HealthStatus};

impl RemoteClient {
    pub fn health(&self) -> Result<HealthStatus, ApiError> {
        let rb = self.request(Method::GET, "/api/health");
        self.send_json(rb, "health")
    }

    /// Spot prices keyed by coin id (`bitcoin`, `ethereum`, ...).
    pub fn crypto_prices(&self) -> Result<BTreeMap<String, CoinQuote>, ApiError> {
        let rb = self.request(Method::GET, "/api/market/crypto-prices");
        self.send_json(rb, "crypto prices")
    }

    pub fn analyze_market(&self, req: &AnalysisRequest) -> Result<AnalysisReport, ApiError> {
        let rb = self.request(Method::POST, "/api/analysis/gemini").json(req);
        self.send_json(rb, "market analysis")
    }
}
