//! Print the app manifest.

use anyhow::Result;
use console::style;

use tig_types::manifest::app_manifest;

pub fn print_manifest(json: bool) -> Result<()> {
    let manifest = app_manifest();

    if json {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(manifest.name).bold());
    println!("  {}", style(manifest.description).dim());
    println!();
    for workflow in &manifest.workflows {
        println!(
            "  {} {} ({})",
            style("•").cyan(),
            style(workflow.title).bold(),
            workflow.callback_id
        );
        println!("    inputs: {}", workflow.input_parameters.join(", "));
    }
    println!();
    println!("  datastores: {}", manifest.datastores.join(", "));
    println!("  bot scopes: {}", manifest.bot_scopes.join(", "));
    println!();

    Ok(())
}
