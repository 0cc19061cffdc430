use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the effective configuration
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Persist configuration to config.json
    Set {
        #[arg(long)]
        api_url: Option<String>,
        #[arg(long)]
        connect_timeout_secs: Option<u64>,
    },
}
