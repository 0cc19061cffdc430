use std::collections::BTreeMap;

use mk7::capability::Feature;
use mk7::model::{AdminSettings, UserType};

use super::*;

pub(super) fn handle_admin_command(ctx: &ClientContext, command: AdminCommands) -> Result<()> {
    let session = ctx.restored_session()?;
    let client = session.authorize(Feature::AdminConsole)?;

    match command {
        AdminCommands::Users { json } => {
            let users = client.list_users().context("list users")?;
            if json {
                return print_json(&users, "users");
            }
            for u in &users {
                let status = if u.is_active { "active" } else { "disabled" };
                println!("{} {} {} {}", u.id, u.email, u.user_type, status);
            }

            let settings = client.admin_settings().context("get admin settings")?;
            let count = |t: UserType| users.iter().filter(|u| u.user_type == t).count();
            println!();
            println!(
                "total: {} (basic {}, premium {}, admin {})",
                users.len(),
                count(UserType::Basic),
                count(UserType::Premium),
                count(UserType::Admin)
            );
            println!(
                "projected revenue: ${:.2}",
                settings.projected_revenue(&users)
            );
        }
        AdminCommands::Upgrade { user_id, plan } => {
            let out = client
                .upgrade_user(&user_id, plan)
                .context("update user plan")?;
            println!("{}", out.message);
        }
        AdminCommands::Settings { command } => match command {
            SettingsCommands::Show { json } => {
                let settings = client.admin_settings().context("get admin settings")?;
                if json {
                    return print_json(&settings, "settings");
                }
                print_settings(&settings);
            }
            SettingsCommands::Set {
                basic_price,
                premium_price,
                trading_keys,
                payment_keys,
            } => {
                let mut settings = client.admin_settings().context("get admin settings")?;
                if let Some(price) = basic_price {
                    settings.basic_plan_price = validate_price(price)?;
                }
                if let Some(price) = premium_price {
                    settings.premium_plan_price = validate_price(price)?;
                }
                merge_keys(&mut settings.trading_api_keys, &trading_keys)?;
                merge_keys(&mut settings.payment_api_keys, &payment_keys)?;

                let out = client
                    .update_admin_settings(&settings)
                    .context("save admin settings")?;
                println!("{}", out.message);
            }
        },
    }
    Ok(())
}

fn print_settings(settings: &AdminSettings) {
    println!("basic_plan_price: {:.2}", settings.basic_plan_price);
    println!("premium_plan_price: {:.2}", settings.premium_plan_price);
    for (label, keys) in [
        ("trading", &settings.trading_api_keys),
        ("payment", &settings.payment_api_keys),
    ] {
        for (name, value) in keys {
            println!("{}_api_key {}: {}", label, name, mask_secret(value));
        }
    }
}

fn validate_price(price: f64) -> Result<f64> {
    if !price.is_finite() || price < 0.0 {
        anyhow::bail!("invalid price {} (must be a non-negative number)", price);
    }
    Ok(price)
}

/// Apply `NAME=VALUE` pairs; an empty value removes the key.
fn merge_keys(keys: &mut BTreeMap<String, String>, pairs: &[String]) -> Result<()> {
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .with_context(|| format!("expected NAME=VALUE, got '{}'", pair))?;
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("empty key name in '{}'", pair);
        }
        if value.is_empty() {
            keys.remove(name);
        } else {
            keys.insert(name.to_string(), value.to_string());
        }
    }
    Ok(())
}

fn mask_secret(value: &str) -> String {
    let tail: String = value
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if value.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("****{}", tail)
    }
}

#[cfg(test)]
#[path = "../tests/cli_exec/admin_tests.rs"]
mod tests;
