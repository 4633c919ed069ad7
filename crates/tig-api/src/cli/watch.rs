//! Watch and route listing commands.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use tig_types::id::ChannelId;

use crate::state::AppState;

/// List the alert watches registered with the platform.
pub async fn list_watches(state: &AppState, json: bool) -> Result<()> {
    let watches = state.setup.registration().alert_watches().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&watches)?);
        return Ok(());
    }

    if watches.is_empty() {
        println!();
        println!(
            "  {} No alert watches yet. Register a channel with: {}",
            style("i").blue().bold(),
            style("tig-advisor setup --channel <id> --user <id>").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Channels").fg(Color::White),
        Cell::new("Alerts").fg(Color::White),
        Cell::new("Name").fg(Color::White),
    ]);

    for watch in &watches {
        let channels: Vec<&str> = watch.channel_ids.iter().map(|c| c.as_str()).collect();
        let alerts = watch
            .inputs
            .get("triggered_user")
            .map(|b| b.value.clone())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(&watch.id).fg(Color::Cyan),
            Cell::new(channels.join(", ")),
            Cell::new(alerts),
            Cell::new(&watch.name).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} watch{}",
        style(watches.len()).bold(),
        if watches.len() == 1 { "" } else { "es" }
    );
    println!();

    Ok(())
}

/// List the alert routes saved for `channel`.
pub async fn list_routes(state: &AppState, channel: &str, json: bool) -> Result<()> {
    let channel = channel.parse::<ChannelId>().map_err(anyhow::Error::msg)?;
    let routes = state.routes.list_by_channel(&channel).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&routes)?);
        return Ok(());
    }

    if routes.is_empty() {
        println!();
        println!(
            "  {} No alert routes for {}",
            style("i").blue().bold(),
            style(&channel).cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("User").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for route in &routes {
        let user = route
            .user_to_alert
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(route.id.to_string()).fg(Color::Cyan),
            Cell::new(user),
            Cell::new(route.created_at.format("%Y-%m-%d %H:%M").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}
