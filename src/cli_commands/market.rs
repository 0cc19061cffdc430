use clap::Args;

use mk7::model::AnalysisType;

#[derive(Args)]
pub(crate) struct PricesArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct AnalyzeArgs {
    /// Symbol to analyze (BTC, ETH, EURUSD, ...)
    #[arg(long)]
    pub(crate) symbol: String,
    #[arg(long, default_value = "1d")]
    pub(crate) timeframe: String,
    /// technical, fundamental or advanced (Premium)
    #[arg(long, default_value = "technical")]
    pub(crate) analysis_type: AnalysisType,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
