// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use azmon_configurator::client::create_client;
use azmon_configurator::config::Config;
use azmon_configurator::configurator::Configurator;
use azmon_configurator::namespaces::NamespaceMonitor;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize tracing, RUST_LOG wins over VERBOSITY
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.verbosity))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting azmon-configurator {}", build_info());
    info!("Log verbosity level set to {}", config.verbosity);
    info!("Mesh name is {}", config.mesh_name);
    info!("OSM namespace is {}", config.osm_namespace);
    info!("Azure Monitor ConfigMap name is {}", config.configmap_name);

    // Create Kubernetes client
    let client = create_client(config.kubeconfig.as_deref()).await?;
    info!("Connected to Kubernetes cluster");

    let stop = CancellationToken::new();
    tokio::spawn(cancel_on_signal(stop.clone()));

    let monitor = match NamespaceMonitor::new(
        client.clone(),
        &config.mesh_name,
        config.resync_interval,
        stop.clone(),
    )
    .await
    {
        Ok(monitor) => monitor,
        Err(e) => {
            error!("Error starting namespace monitor: {}", e);
            return Err(e.into());
        }
    };

    let configurator = Configurator::new(monitor, client, &config).start(stop.clone());

    stop.cancelled().await;
    configurator.await?;

    info!("Stopping azmon-configurator {}", build_info());
    Ok(())
}

/// Version plus the commit and build date stamped in by CI, when present
fn build_info() -> String {
    format!(
        "{} (commit {}, built {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("GIT_COMMIT").unwrap_or("unknown"),
        option_env!("BUILD_DATE").unwrap_or("unknown")
    )
}

/// Cancel `stop` on SIGINT or SIGTERM
async fn cancel_on_signal(stop: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }

    stop.cancel();
}
