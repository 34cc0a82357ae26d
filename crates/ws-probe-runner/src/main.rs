/*
[INPUT]:  CLI arguments, optional YAML endpoints file, OS shutdown signals
[OUTPUT]: Concurrent WebSocket probes with a fleet summary on exit
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ws_probe_adapter::{enabled_endpoints, Endpoint, ProbeClient, ProbeConfig};
use ws_probe_runner::{EndpointsFile, FleetSummary, ProbeFleet};

#[derive(Parser, Debug)]
#[command(name = "ws-probe-runner", version, about = "Exchange WebSocket gateway connection prober")]
struct Cli {
    /// Tracing filter directive, e.g. "info" or "ws_probe_adapter=debug"
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Keep-alive ping interval in seconds
    #[arg(long = "heartbeat-secs", value_name = "SECS", default_value_t = 10)]
    heartbeat_secs: u64,
    /// YAML file replacing the builtin endpoint catalog
    #[arg(long = "endpoints", value_name = "PATH")]
    endpoints_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let endpoints = match &args.endpoints_path {
        Some(path) => load_endpoints(path)?,
        None => enabled_endpoints(),
    };
    info!(
        endpoint_count = endpoints.len(),
        heartbeat_secs = args.heartbeat_secs,
        "starting ws-probe"
    );

    let client = Arc::new(ProbeClient::with_config(ProbeConfig {
        heartbeat: Duration::from_secs(args.heartbeat_secs),
    }));

    let mut fleet = ProbeFleet::new();
    setup_signal_handlers(fleet.shutdown_token());
    fleet.spawn_probes(client, endpoints);

    let reports = fleet.wait().await;
    let summary = FleetSummary::from_reports(&reports);
    info!(
        probes = summary.probes,
        opened = summary.opened,
        failed = summary.failed,
        cancelled = summary.cancelled,
        messages = summary.messages,
        "probe fleet finished"
    );

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_endpoints(path: &PathBuf) -> Result<Vec<Endpoint>> {
    let path_str = path.to_str().context("endpoints path must be valid utf-8")?;
    let file = EndpointsFile::from_file(path_str).context("load endpoints file")?;
    if file.endpoints.is_empty() {
        return Err(anyhow!("endpoints file lists no endpoints"));
    }
    Ok(file.enabled())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
