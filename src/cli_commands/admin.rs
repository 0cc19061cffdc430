use clap::Subcommand;

use mk7::model::UserType;

#[derive(Subcommand)]
pub(crate) enum AdminCommands {
    /// List all users with plan statistics
    Users {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a user's plan
    Upgrade {
        #[arg(long)]
        user_id: String,
        /// basic, premium or admin
        #[arg(long)]
        plan: UserType,
    },

    /// Show or update plan pricing and API keys
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
pub(crate) enum SettingsCommands {
    /// Show current settings (API keys masked unless --json)
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Update settings; unspecified fields keep their current value
    Set {
        #[arg(long)]
        basic_price: Option<f64>,
        #[arg(long)]
        premium_price: Option<f64>,
        /// Trading API key as NAME=VALUE (repeatable)
        #[arg(long = "trading-key", value_name = "NAME=VALUE")]
        trading_keys: Vec<String>,
        /// Payment API key as NAME=VALUE (repeatable)
        #[arg(long = "payment-key", value_name = "NAME=VALUE")]
        payment_keys: Vec<String>,
    },
}
