use clap::Subcommand;

pub(crate) mod admin;
pub(crate) mod config;
pub(crate) mod identity;
pub(crate) mod market;

pub(crate) use self::admin::{AdminCommands, SettingsCommands};
pub(crate) use self::config::ConfigCommands;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Log in with email and password
    Login(identity::LoginArgs),

    /// Create an account (basic plan) and log in
    Register(identity::RegisterArgs),

    /// Log out (clear the stored credential)
    Logout,

    /// Show the logged-in identity and its capabilities
    Whoami(identity::WhoamiArgs),

    /// Show which features the current plan unlocks
    Features(identity::FeaturesArgs),

    /// Show current crypto prices
    Prices(market::PricesArgs),

    /// Request an AI market analysis
    Analyze(market::AnalyzeArgs),

    /// Admin console: users, plans, pricing and API keys
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Show or change client configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}
