use super::admin::handle_admin_command;
use super::config::handle_config_command;
use super::identity::{
    handle_features_command, handle_login_command, handle_logout_command,
    handle_register_command, handle_whoami_command,
};
use super::market::{handle_analyze_command, handle_prices_command};
use super::*;

pub(super) fn handle_command(ctx: &ClientContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => handle_login_command(ctx, &args.email, &args.password)?,
        Commands::Register(args) => {
            handle_register_command(ctx, &args.email, &args.password, &args.full_name)?
        }
        Commands::Logout => handle_logout_command(ctx)?,
        Commands::Whoami(args) => handle_whoami_command(ctx, args.json)?,
        Commands::Features(args) => handle_features_command(ctx, args.json)?,
        Commands::Prices(args) => handle_prices_command(ctx, args.json)?,
        Commands::Analyze(args) => handle_analyze_command(
            ctx,
            args.symbol,
            args.timeframe,
            args.analysis_type,
            args.json,
        )?,
        Commands::Admin { command } => handle_admin_command(ctx, command)?,
        Commands::Config { command } => handle_config_command(ctx, command)?,
    }
    Ok(())
}
