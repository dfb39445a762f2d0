//! Service entry point

use anyhow::Context;
use bgcomp_server::{router, CommandSegmenter, Processor, ServerConfig};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bgcomp-server")]
#[command(about = "HTTP service for background removal and solid-color compositing")]
#[command(version)]
struct Cli {
    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Segmentation command (reads PNG on stdin, writes cut-out PNG to stdout)
    #[arg(long, default_value = "rembg i")]
    segmenter: String,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> anyhow::Result<()> {
    // RUST_LOG wins over the verbosity flags when set.
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = ServerConfig::builder()
        .host(cli.host)
        .port(cli.port)
        .segmenter_command(cli.segmenter)
        .build()?;

    let segmenter = Arc::new(CommandSegmenter::from_command_line(
        &config.segmenter_command,
    )?);
    let processor = Arc::new(Processor::new(segmenter));

    info!(
        segmenter = %processor.segmenter_name(),
        "Configured segmentation collaborator"
    );

    let app = router(processor);
    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;

    info!(address = %config.bind_address(), "Listening");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
