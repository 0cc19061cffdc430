use mk7::capability::{Decision, Feature};
use mk7::session::SessionError;

use super::*;

pub(super) fn handle_login_command(ctx: &ClientContext, email: &str, password: &str) -> Result<()> {
    let mut session = ctx.session()?;
    let who = session.login(email, password).map_err(session_failure)?;
    println!("Logged in as {} ({})", who.email, who.user_type);
    Ok(())
}

pub(super) fn handle_register_command(
    ctx: &ClientContext,
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<()> {
    let mut session = ctx.session()?;
    let who = session
        .register(email, password, full_name)
        .map_err(session_failure)?;
    println!("Registered {} ({})", who.email, who.user_type);
    Ok(())
}

fn session_failure(err: SessionError) -> anyhow::Error {
    match err {
        // Server detail or fallback text is the whole user-facing message.
        SessionError::Request { .. } => anyhow::anyhow!("{}", err),
        SessionError::Storage(_) => anyhow::Error::new(err),
    }
}

pub(super) fn handle_logout_command(ctx: &ClientContext) -> Result<()> {
    let mut session = ctx.session()?;
    session.logout();
    println!("Logged out");
    Ok(())
}

pub(super) fn handle_whoami_command(ctx: &ClientContext, json: bool) -> Result<()> {
    let session = ctx.restored_session()?;
    session.authorize(Feature::Dashboard)?;
    let who = session
        .identity()
        .context("session restored without identity")?;
    let caps = session.capabilities();

    if json {
        return print_json(
            &serde_json::json!({
                "identity": who,
                "capabilities": caps,
            }),
            "whoami",
        );
    }

    println!("id: {}", who.id);
    println!("email: {}", who.email);
    println!("name: {}", who.full_name);
    println!("plan: {}", who.user_type);
    println!("active: {}", who.is_active);
    if let Some(created_at) = &who.created_at {
        println!("created_at: {}", created_at);
    }
    println!("premium: {}", caps.premium);
    println!("admin: {}", caps.admin);
    Ok(())
}

pub(super) fn handle_features_command(ctx: &ClientContext, json: bool) -> Result<()> {
    let session = ctx.restored_session()?;

    let rows = Feature::ALL
        .iter()
        .map(|feature| {
            let decision = session.evaluate(feature.guard());
            let reason = match decision {
                Decision::Deny(denial) => Some(denial.to_string()),
                Decision::Allow | Decision::Pending => None,
            };
            (feature.label(), decision == Decision::Allow, reason)
        })
        .collect::<Vec<_>>();

    if json {
        let out = rows
            .iter()
            .map(|(feature, allowed, reason)| {
                serde_json::json!({
                    "feature": feature,
                    "allowed": allowed,
                    "reason": reason,
                })
            })
            .collect::<Vec<_>>();
        return print_json(&out, "features");
    }

    for (feature, allowed, reason) in rows {
        match reason {
            Some(reason) if !allowed => println!("{:<22} no  ({})", feature, reason),
            _ => println!("{:<22} {}", feature, if allowed { "yes" } else { "no" }),
        }
    }
    Ok(())
}
