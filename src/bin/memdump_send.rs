use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use memdump::client::{self, DEFAULT_ADDR};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Stream a file (or stdin) to a memdump capture server.
#[derive(Debug, Parser)]
#[command(name = "memdump-send", version)]
struct Args {
    /// Server address.
    #[arg(short, long, default_value = DEFAULT_ADDR)]
    addr: SocketAddr,

    /// File to send; stdin when omitted.
    input: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memdump=info,memdump_send=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let sent = match &args.input {
        Some(path) => {
            let mut file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open {}", path.display()))?;
            client::send(args.addr, &mut file).await
        }
        None => client::send(args.addr, &mut tokio::io::stdin()).await,
    }
    .with_context(|| format!("failed to send to {}", args.addr))?;

    tracing::info!(server = %args.addr, bytes = sent, "Sent");
    Ok(())
}
