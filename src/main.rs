//! echoes: HTTP echo/mock server (v1)
//!
//! Answers any path with a deterministic status and body, and forwards a
//! few configured GET routes to upstream resources with timing attached.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request ──▶ http::server ──▶ GET on forwarding route? ──yes──▶ upstream::fetch_timed ──▶ Upstream
//!                              │                    │
//!                              │                    no
//!                              │                    ▼
//!     Client Response ◀────────┴──────────── routing::classify
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use echoes::config::{
    load_config, metrics_listen_addr, validate_config, ConfigError, EchoConfig, ForwardTarget,
};
use echoes::observability::{logging, metrics};
use echoes::{EchoServer, ForwardingTable, Shutdown};

#[derive(Parser, Debug)]
#[command(name = "echoes")]
#[command(about = "HTTP echo server with status-code replies and timed forwarding", long_about = None)]
struct Cli {
    /// Bind host [default: 0.0.0.0, localhost on Windows]
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Listen port [default: 54321]
    #[arg(short, long)]
    port: Option<u16>,

    /// Forwarding pair <route>:<URL>, repeatable. Example: /foo:1.2.3.4:8080/bar
    #[arg(long = "fwd", value_name = "ROUTE:URL")]
    forwards: Vec<String>,

    /// TOML configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Skip TLS certificate verification for upstream fetches
    #[arg(long)]
    insecure: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Serve Prometheus metrics on this address
    #[arg(long, value_name = "ADDR")]
    metrics_address: Option<String>,
}

impl Cli {
    /// Merge the optional file config with flags and validate the result.
    fn into_config(self) -> Result<(EchoConfig, Vec<ForwardTarget>), ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => EchoConfig::default(),
        };

        if let Some(host) = self.host {
            config.listener.host = host;
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        config.forwards.extend(self.forwards);
        if self.insecure {
            config.outbound.accept_invalid_certs = true;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
        if let Some(addr) = self.metrics_address {
            config.observability.metrics_enabled = true;
            config.observability.metrics_address = addr;
        }

        let targets = validate_config(&config).map_err(ConfigError::Validation)?;
        metrics_listen_addr(&config)?;
        Ok((config, targets))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("echoes: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (config, targets) = cli.into_config()?;

    logging::init(&config.observability.log_level);
    tracing::info!("echoes v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.bind_address(),
        forwards = config.forwards.len(),
        accept_invalid_certs = config.outbound.accept_invalid_certs,
        "Configuration loaded"
    );

    let client = config.outbound.build_client()?;
    let table = ForwardingTable::from_targets(targets, &client);

    if let Some(addr) = metrics_listen_addr(&config)? {
        metrics::init_metrics(addr).map_err(ConfigError::Metrics)?;
    }

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ConfigError::Bind { address: address.clone(), source })?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    EchoServer::new(table).run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
