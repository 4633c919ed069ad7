//! TIG Advisor CLI and function server entry point.
//!
//! Binary name: `tig-advisor`
//!
//! Parses CLI arguments, initializes the alert route store and the Slack
//! client, then dispatches to a command handler or starts the HTTP server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tig_observe::tracing_setup::{default_filter, init_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity; the guard flushes OTel spans on exit.
    let filter = default_filter(cli.verbose, cli.quiet);
    let _tracing = init_tracing(filter, cli.otel)?;

    run(cli).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Commands that don't need app state
    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(*shell, &mut cmd, "tig-advisor", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Manifest => return cli::manifest::print_manifest(cli.json),
        _ => {}
    }

    // Initialize application state (DB, Slack client, services)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, data_dir = %state.data_dir.display(), "server listening");
            if !cli.quiet {
                println!(
                    "  {} TIG Advisor listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Setup { channel, user } => {
            cli::setup::run_setup(&state, &channel, user.as_deref(), cli.json, cli.quiet).await?;
        }

        Commands::Dispatch { channel, user } => {
            cli::setup::run_dispatch(&state, &channel, &user, cli.json, cli.quiet).await?;
        }

        Commands::Watches => {
            cli::watch::list_watches(&state, cli.json).await?;
        }

        Commands::Routes { channel } => {
            cli::watch::list_routes(&state, &channel, cli.json).await?;
        }

        Commands::Manifest | Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
