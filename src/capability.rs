//! Capability gate: boolean access flags derived from the session identity.

use std::fmt;

use serde::Serialize;

use crate::model::{AnalysisType, Identity, UserType};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub authenticated: bool,
    pub admin: bool,
    pub premium: bool,
}

impl Capabilities {
    /// Total and pure: no identity means every flag is false.
    pub fn derive(identity: Option<&Identity>) -> Self {
        match identity {
            Some(identity) => Self::for_tier(identity.user_type),
            None => Self::default(),
        }
    }

    pub fn for_tier(user_type: UserType) -> Self {
        Self {
            authenticated: true,
            admin: user_type == UserType::Admin,
            premium: matches!(user_type, UserType::Premium | UserType::Admin),
        }
    }

    pub fn allows(&self, guard: Guard) -> bool {
        self.require(guard).is_ok()
    }

    pub fn require(&self, guard: Guard) -> Result<(), Denial> {
        if !self.authenticated {
            return Err(Denial::Unauthenticated);
        }
        match guard {
            Guard::Authenticated => Ok(()),
            Guard::Premium if self.premium => Ok(()),
            Guard::Premium => Err(Denial::PremiumRequired),
            Guard::Admin if self.admin => Ok(()),
            Guard::Admin => Err(Denial::AdminRequired),
        }
    }

    pub fn require_feature(&self, feature: Feature) -> Result<(), FeatureDenied> {
        self.require(feature.guard())
            .map_err(|denial| FeatureDenied { feature, denial })
    }
}

/// Access requirement attached to a view or action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    Authenticated,
    Premium,
    Admin,
}

impl Guard {
    pub fn evaluate(self, loading: bool, capabilities: Capabilities) -> Decision {
        if loading {
            return Decision::Pending;
        }
        match capabilities.require(self) {
            Ok(()) => Decision::Allow,
            Err(denial) => Decision::Deny(denial),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Session restore has not finished; render nothing yet.
    Pending,
    Allow,
    Deny(Denial),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Denial {
    /// Send the user to the login screen.
    #[error("not logged in (run `mk7 login`)")]
    Unauthenticated,

    #[error("requires a Premium subscription")]
    PremiumRequired,

    /// Send the user back to the dashboard.
    #[error("admin access required")]
    AdminRequired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    Dashboard,
    MarketPrices,
    TechnicalAnalysis,
    FundamentalAnalysis,
    AdvancedAnalysis,
    TradingBot,
    AdminConsole,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Feature::Dashboard,
        Feature::MarketPrices,
        Feature::TechnicalAnalysis,
        Feature::FundamentalAnalysis,
        Feature::AdvancedAnalysis,
        Feature::TradingBot,
        Feature::AdminConsole,
    ];

    pub fn guard(self) -> Guard {
        match self {
            Feature::Dashboard
            | Feature::MarketPrices
            | Feature::TechnicalAnalysis
            | Feature::FundamentalAnalysis => Guard::Authenticated,
            Feature::AdvancedAnalysis | Feature::TradingBot => Guard::Premium,
            Feature::AdminConsole => Guard::Admin,
        }
    }

    pub fn for_analysis(kind: AnalysisType) -> Self {
        match kind {
            AnalysisType::Technical => Feature::TechnicalAnalysis,
            AnalysisType::Fundamental => Feature::FundamentalAnalysis,
            AnalysisType::Advanced => Feature::AdvancedAnalysis,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Feature::Dashboard => "Dashboard",
            Feature::MarketPrices => "Market prices",
            Feature::TechnicalAnalysis => "Technical analysis",
            Feature::FundamentalAnalysis => "Fundamental analysis",
            Feature::AdvancedAnalysis => "Advanced analysis",
            Feature::TradingBot => "Trading Bot",
            Feature::AdminConsole => "Admin console",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{feature}: {denial}")]
pub struct FeatureDenied {
    pub feature: Feature,
    pub denial: Denial,
}

#[cfg(test)]
#[path = "tests/capability_tests.rs"]
mod tests;
