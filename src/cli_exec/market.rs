use mk7::capability::Feature;
use mk7::model::{AnalysisRequest, AnalysisType};

use super::*;

pub(super) fn handle_prices_command(ctx: &ClientContext, json: bool) -> Result<()> {
    let session = ctx.restored_session()?;
    let prices = session
        .authorize(Feature::MarketPrices)?
        .crypto_prices()
        .context("fetch crypto prices")?;

    if json {
        return print_json(&prices, "prices");
    }
    for (coin, quote) in prices {
        match quote.usd_24h_change {
            Some(change) => println!("{:<14} {:>14.2} {:>+8.2}%", coin, quote.usd, change),
            None => println!("{:<14} {:>14.2}", coin, quote.usd),
        }
    }
    Ok(())
}

pub(super) fn handle_analyze_command(
    ctx: &ClientContext,
    symbol: String,
    timeframe: String,
    analysis_type: AnalysisType,
    json: bool,
) -> Result<()> {
    let session = ctx.restored_session()?;
    // Premium analysis is refused locally, before any request goes out.
    let backend = session.authorize(Feature::for_analysis(analysis_type))?;

    let req = AnalysisRequest {
        symbol: symbol.trim().to_ascii_uppercase(),
        timeframe,
        analysis_type,
    };
    let report = backend.analyze_market(&req).context("Analysis failed")?;

    if json {
        return print_json(&report, "analysis");
    }
    println!("symbol: {}", report.symbol);
    println!("timeframe: {}", report.timeframe);
    if let Some(analyst) = &report.analyst {
        println!("analyst: {}", analyst);
    }
    if let Some(generated_at) = &report.generated_at {
        println!("generated_at: {}", generated_at);
    }
    println!();
    println!("{}", report.analysis.trim());
    Ok(())
}
