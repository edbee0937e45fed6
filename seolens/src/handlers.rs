use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use seolens_core::Auditor;
use seolens_core::report::{ReportData, ReportFormat, generate_report, save_report};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::{LogFormat, ServerConfig, fetch_config_from_matches};
use crate::logging::init_logging;
use crate::server::{self, AppState};

pub async fn handle_serve(args: &ArgMatches) -> Result<()> {
    let config = ServerConfig::from_matches(args)?;
    init_logging(config.log_format, "info");

    let auditor = Auditor::new(config.fetch.clone()).context("Failed to create HTTP client")?;
    let state = AppState {
        auditor: Arc::new(auditor),
    };
    let app = server::build_router(state, config.cors_enabled);

    info!(
        "Request timeout {:?}, CORS {}",
        config.fetch.timeout,
        if config.cors_enabled { "enabled" } else { "disabled" }
    );

    let listener = server::bind(&config).await?;
    server::run(listener, app, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

pub async fn handle_audit(args: &ArgMatches) -> Result<()> {
    init_logging(LogFormat::Text, "warn");

    let url = args
        .get_one::<String>("URL")
        .ok_or_else(|| anyhow!("A URL is required"))?;
    let format = args
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text);
    let output = args.get_one::<PathBuf>("output");

    let auditor =
        Auditor::new(fetch_config_from_matches(args)).context("Failed to create HTTP client")?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("Invalid progress template")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Auditing {}...", url));

    let outcome = auditor.audit(Some(url)).await;
    spinner.finish_and_clear();

    let result = outcome.map_err(|e| match e.details() {
        Some(details) => anyhow!("{} ({})", e, details),
        None => anyhow!("{}", e),
    })?;

    let data = ReportData::from_result(result);
    let report = generate_report(&data, format).context("Failed to render report")?;

    match output {
        Some(path) => {
            save_report(&report, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!(
                "{} Report saved to {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        None => print!("{}", report),
    }

    Ok(())
}
