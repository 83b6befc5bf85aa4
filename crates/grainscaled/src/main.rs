//! grainscaled — the external scaler daemon.
//!
//! Thin hosting shell: connects the management-plane client to the
//! saturation probe and serves the external scaler contract over
//! gRPC. All scaling logic lives in `grainscale-scaler`.
//!
//! # Usage
//!
//! ```text
//! grainscaled --listen-addr 0.0.0.0:9090 --management-addr http://127.0.0.1:4040
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use grainscale_cluster::{ManagementClient, SaturationProbe};
use grainscale_scaler::ExternalScalerServer;

#[derive(Parser)]
#[command(name = "grainscaled", about = "Grainscale external scaler daemon")]
struct Cli {
    /// Address to serve the scaler gRPC endpoint on.
    #[arg(long, default_value = "0.0.0.0:9090")]
    listen_addr: SocketAddr,

    /// Endpoint of the cluster's management service.
    #[arg(long, default_value = "http://127.0.0.1:4040")]
    management_addr: String,

    /// StreamIsActive polling interval in seconds.
    #[arg(long, default_value = "5")]
    poll_interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "info,grainscaled=debug,grainscale_scaler=debug,grainscale_cluster=debug"
                        .parse()
                        .unwrap()
                }),
        )
        .init();

    let cli = Cli::parse();

    info!(
        listen_addr = %cli.listen_addr,
        management_addr = %cli.management_addr,
        "grainscale daemon starting"
    );

    let inspector = ManagementClient::connect(cli.management_addr).await?;
    let probe = SaturationProbe::new(Arc::new(inspector));

    let scaler = ExternalScalerServer::new(probe)
        .with_poll_interval(Duration::from_secs(cli.poll_interval));

    info!(addr = %cli.listen_addr, "external scaler gRPC server starting");
    tonic::transport::Server::builder()
        .add_service(scaler.into_service())
        .serve_with_shutdown(cli.listen_addr, async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    info!("grainscale daemon stopped");
    Ok(())
}
