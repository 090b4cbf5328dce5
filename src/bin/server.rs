use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use taskboard::server;

#[derive(Parser)]
#[command(name = "taskboard-server", about = "REST backend for the task board")]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = server::DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    server::run(args.port).await
}
