//! Setup and dispatch commands: run the workflow functions from the shell.

use anyhow::Result;
use console::style;

use tig_types::function::SetupInputs;
use tig_types::id::{ChannelId, UserId};

use crate::state::AppState;

/// Register `channel` for alerts, optionally on behalf of `user`.
///
/// # Examples
///
/// ```bash
/// tig-advisor setup --channel C0123ABCD --user U0456EFGH
/// ```
pub async fn run_setup(
    state: &AppState,
    channel: &str,
    user: Option<&str>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let inputs = SetupInputs {
        channel: channel.parse::<ChannelId>().map_err(anyhow::Error::msg)?,
        user_to_alert: user
            .map(|u| u.parse::<UserId>().map_err(anyhow::Error::msg))
            .transpose()?,
    };

    let outcome = state.setup.run(&inputs).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "channel": inputs.channel,
                "user_to_alert": inputs.user_to_alert,
                "route_id": outcome.route_id.to_string(),
                "watch_created": outcome.watch_created,
            })
        );
        return Ok(());
    }
    if quiet {
        return Ok(());
    }

    println!();
    println!(
        "  {} Listening for {} announcements in {}",
        style("✓").green().bold(),
        style(&state.config.keyword).bold(),
        style(&inputs.channel).cyan()
    );
    if outcome.watch_created {
        println!("  {}", style("New watch created").dim());
    } else {
        println!("  {}", style("Existing watch reused").dim());
    }
    println!();

    Ok(())
}

/// Send the alert DM for `channel` to `user`.
pub async fn run_dispatch(
    state: &AppState,
    channel: &str,
    user: &str,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let channel = channel.parse::<ChannelId>().map_err(anyhow::Error::msg)?;
    let user = user.parse::<UserId>().map_err(anyhow::Error::msg)?;

    state.dispatch.dispatch(&channel, &user).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"sent": true, "channel": channel, "recipient": user})
        );
    } else if !quiet {
        println!(
            "  {} Alert sent to {}",
            style("✓").green().bold(),
            style(&user).bold()
        );
    }

    Ok(())
}
