//! Ping Monitor - Main CLI Application
//!
//! Probes one host at a fixed interval until the configured duration is
//! used up or the user interrupts, then prints summary statistics.

use clap::Parser;
use ping_monitor::{
    cli::Cli,
    config::{load_config, EnvManager},
    error::{AppError, Result},
    App, VERSION, PKG_NAME,
};
use std::process;
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(AppError::internal("panic").exit_code());
    }));

    let cli = Cli::parse();
    let use_color = !cli.no_color;

    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(use_color));
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    cli.validate().map_err(AppError::validation)?;

    if cli.env_help {
        println!("{}", EnvManager::display_env_help());
        return Ok(());
    }

    if cli.debug {
        eprintln!("{} v{} ({}, built {})", PKG_NAME, VERSION, env!("TARGET_TRIPLE"), env!("BUILD_TIME"));
        if let Some(commit) = option_env!("GIT_COMMIT") {
            eprintln!("Commit: {}", commit);
        }
    }

    let config = load_config(cli)?;
    let app = App::new(config);

    let cancel = shutdown_listener();
    app.run(&cancel).await?;

    Ok(())
}

/// Token cancelled on Ctrl-C or, on Unix, SIGTERM
fn shutdown_listener() -> CancellationToken {
    let cancellation_token = CancellationToken::new();
    tokio::spawn({
        let cancellation_token = cancellation_token.clone();
        async move {
            wait_for_shutdown_signal().await;
            cancellation_token.cancel();
        }
    });

    cancellation_token
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = sigterm.recv() => {}
                _ = signal::ctrl_c() => {}
            }
        }
        Err(e) => {
            eprintln!("SIGTERM listener unavailable ({}), only Ctrl-C will stop the monitor", e);
            let _ = signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
    let _ = signal::ctrl_c().await;
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Validation(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format (see --env-help)");
            eprintln!("  - Interval must be 1-3600 seconds, timeout 1-60 seconds");
            eprintln!("  - Hosts cannot contain whitespace or start with '-'");
        },
        AppError::Io(_) => {
            eprintln!();
            eprintln!("System help:");
            eprintln!("  - Make sure the 'ping' utility is installed and on PATH");
        },
        _ => {}
    }
}
