use anyhow::{Context, Result};

use crate::cli_runtime::ClientContext;
use crate::{AdminCommands, Commands, ConfigCommands, SettingsCommands};

mod admin;
mod config;
mod dispatch;
mod identity;
mod market;

pub(super) fn handle_command(ctx: &ClientContext, command: Commands) -> Result<()> {
    dispatch::handle_command(ctx, command)
}

fn print_json<T: serde::Serialize>(value: &T, label: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {} json", label))?
    );
    Ok(())
}
