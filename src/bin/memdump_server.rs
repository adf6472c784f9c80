use anyhow::Context;
use memdump::{CaptureServer, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memdump=info,memdump_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::default();
    let output_dir = config.output_dir.clone();
    let mut server = CaptureServer::bind(config)
        .await
        .context("failed to start capture server")?;

    let served = server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await
        .with_context(|| format!("capture into {} aborted", output_dir.display()))?;

    tracing::info!(served, "Server stopped");
    Ok(())
}
