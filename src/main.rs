use anyhow::Context;
use clap::Parser;
use imgate::config::Config;
use imgate::context::ServiceContext;
use imgate::server::{self, ServerOptions};
use std::path::PathBuf;
use std::sync::Arc;

/// Imgate - on-the-fly image transformation gateway built with Cloudflare's Pingora
#[derive(Parser, Debug)]
#[command(name = "imgate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Daemon mode
    #[arg(short = 'd', long)]
    daemon: bool,

    /// Test configuration and watermark assets, then exit
    #[arg(long)]
    test: bool,

    /// Upgrade workers gracefully
    #[arg(long)]
    upgrade: bool,
}

fn main() {
    let args = Args::parse();

    // Logging depends on the config, so config errors go to stderr
    let config = Config::from_file(&args.config).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    let guard = imgate::logging::init_subscriber(&config.logging).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logging subsystem: {}", e);
        std::process::exit(1);
    });
    imgate::logging::install_panic_hook();

    if let Err(e) = run(args, config) {
        tracing::error!(error = %format!("{:#}", e), "Fatal error");
        drop(guard);
        std::process::exit(1);
    }
}

fn run(args: Args, config: Config) -> anyhow::Result<()> {
    tracing::info!(
        config_file = %args.config.display(),
        server_address = %config.server.address,
        server_port = config.server.port,
        origin = %config.proxy.url,
        watermark_enabled = config.watermark.is_some(),
        "Configuration loaded successfully"
    );

    let ctx = ServiceContext::initialize(config).context("Failed to initialize service")?;

    tracing::info!(
        max_requests = ctx.config.proxy.max_requests,
        hostname = %imgate::logging::host_name(),
        "Service initialized"
    );

    if args.test {
        tracing::info!("Configuration test passed");
        return Ok(());
    }

    let options = ServerOptions {
        daemon: args.daemon,
        test: args.test,
        upgrade: args.upgrade,
    };
    let server = server::build(options, Arc::new(ctx)).context("Failed to build server")?;

    // Blocks until shutdown
    server.run_forever();
}
