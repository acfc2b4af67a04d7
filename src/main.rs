use anyhow::Result;
use hdc_mcp::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

use hdc_mcp::config::TransportKind;
use hdc_mcp::hdc::HdcClient;
use hdc_mcp::hdc::resolver::ExecutablePathResolver;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout belongs to the stdio transport
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = config::AppConfig::load()?;
    let executable = ExecutablePathResolver::from_env(
        app_config.hdc.path.as_deref(),
        app_config.hdc.sdk_home.as_deref(),
    )
    .resolve()?;
    let client = Arc::new(HdcClient::from_config(executable, &app_config.hdc));
    tracing::info!(
        name = version::NAME,
        version = version::VERSION,
        hdc = %client.executable().display(),
        "starting"
    );
    let dispatcher = Arc::new(dispatcher::Dispatcher::new(client));

    match app_config.server.transport {
        TransportKind::Stdio => transport::stdio::serve_stdio(dispatcher).await?,
        TransportKind::Http => {
            let app = routes::app(dispatcher);
            let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}/mcp", addr);

            tokio::select! {
                result = axum::serve(listener, app) => {
                    result?;
                }
                _ = shutdown_signal() => {
                    tracing::info!("Received shutdown signal");
                }
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
