mod app;
mod config;
mod i18n;
mod range;
mod refresh;
mod selection;
mod ui;
mod view;

use anyhow::Result;
use profit_client::ClientConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cfg = config::DashConfig::from_env();

    // The terminal belongs to the TUI, so logs go to a rolling file
    let _log_guard = init_logger(&cfg.log_dir);
    tracing::info!("profit-dash starting, server {}", cfg.server_url);

    let client = ClientConfig::new(&cfg.server_url)
        .with_timeout(cfg.timeout_secs)
        .build_http_client();

    let terminal = ratatui::init();
    let result = app::App::new(client, cfg).run(terminal).await;
    ratatui::restore();
    result
}

fn init_logger(log_dir: &str) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(log_dir, "profit-dash");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}
