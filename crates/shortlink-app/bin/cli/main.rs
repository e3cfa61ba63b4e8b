mod cli;
mod telemetry;

use crate::cli::{Command, CLI};
use anyhow::Context;
use clap::Parser;
use shortlink_app::{ShortenerController, SubmitReport, UiState};
use shortlink_client::{HttpClientSettings, HttpShortenClient};
use shortlink_core::{check_url, SystemClock};
use shortlink_history::{FileStorage, HistorySettings, HistoryStorage, HistoryStore, MemoryStorage};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const HISTORY_FILE_NAME: &str = "history.json";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = CLI::parse();
    telemetry::init(config.log_format)?;

    check_url(&config.api_url)
        .with_context(|| format!("invalid api url: {}", config.api_url))?;

    if config.no_persist {
        info!(api_url = %config.api_url, "starting with in-memory history");
        return run(config, MemoryStorage::new()).await;
    }

    let history_file = match config.history_file.clone() {
        Some(path) => path,
        None => default_history_file().context("could not determine a history file location")?,
    };
    info!(
        api_url = %config.api_url,
        history_file = %history_file.display(),
        log_format = %config.log_format,
        "starting"
    );
    run(config, FileStorage::new(history_file)).await
}

fn default_history_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("shortlink").join(HISTORY_FILE_NAME))
}

async fn run<S: HistoryStorage>(config: CLI, storage: S) -> anyhow::Result<ExitCode> {
    let client = HttpShortenClient::new(
        HttpClientSettings::builder()
            .base_url(config.api_url.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build(),
    )?;
    let base_url = client.base_url().to_string();
    let store = HistoryStore::open(storage, SystemClock, HistorySettings::default()).await;
    let controller = Arc::new(ShortenerController::new(client, store, base_url));

    let code = match config.command {
        Command::Shorten { url } => {
            let report = controller.submit_url(url).await;
            let view = controller.view().await;
            match report {
                SubmitReport::Shortened { display_url, .. } => {
                    println!("{display_url}");
                    print_notification(&view);
                    print_history(&view);
                    ExitCode::SUCCESS
                }
                SubmitReport::Rejected(_) => {
                    if let Some(message) = &view.validation_error {
                        eprintln!("{message}");
                    }
                    ExitCode::FAILURE
                }
                SubmitReport::Failed(_) => {
                    print_notification(&view);
                    ExitCode::FAILURE
                }
                SubmitReport::Busy | SubmitReport::Discarded => ExitCode::FAILURE,
            }
        }
        Command::History => {
            print_history(&controller.view().await);
            ExitCode::SUCCESS
        }
        Command::Clear => {
            controller.clear_history().await;
            print_notification(&controller.view().await);
            ExitCode::SUCCESS
        }
        Command::Watch => {
            print_history(&controller.view().await);
            controller.start_age_refresh(Duration::from_secs(config.refresh_secs), |view| {
                print_history(&view)
            });
            tokio::signal::ctrl_c()
                .await
                .context("failed to listen for ctrl-c")?;
            ExitCode::SUCCESS
        }
    };

    controller.shutdown().await;
    Ok(code)
}

fn print_notification(view: &UiState) {
    if let Some(notification) = &view.notification {
        eprintln!("{}", notification.message());
    }
}

fn print_history(view: &UiState) {
    if view.history.is_empty() {
        println!("No recently shortened URLs");
        return;
    }

    println!("Previously shortened URLs");
    for row in &view.history {
        println!("  {:<40} {:<16} {}", row.display_url, row.age, row.original_url);
    }
}
