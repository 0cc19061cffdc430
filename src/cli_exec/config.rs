use super::*;

pub(super) fn handle_config_command(ctx: &ClientContext, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let cfg = ctx.store.read_config()?;
            let api_url = ctx.api_url()?;
            if json {
                return print_json(
                    &serde_json::json!({
                        "state_dir": ctx.store.root(),
                        "api_url": api_url,
                        "connect_timeout_secs": cfg.connect_timeout_secs,
                    }),
                    "config",
                );
            }
            println!("state_dir: {}", ctx.store.root().display());
            println!("api_url: {}", api_url);
            if let Some(secs) = cfg.connect_timeout_secs {
                println!("connect_timeout_secs: {}", secs);
            }
        }
        ConfigCommands::Set {
            api_url,
            connect_timeout_secs,
        } => {
            let mut cfg = ctx.store.read_config()?;
            if let Some(url) = api_url {
                let url = url.trim().trim_end_matches('/').to_string();
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    anyhow::bail!("api url must start with http:// or https:// (got {})", url);
                }
                cfg.api_url = Some(url);
            }
            if let Some(secs) = connect_timeout_secs {
                if secs == 0 {
                    anyhow::bail!("connect timeout must be at least 1 second");
                }
                cfg.connect_timeout_secs = Some(secs);
            }
            ctx.store.write_config(&cfg)?;
            println!("Configuration saved");
        }
    }
    Ok(())
}
