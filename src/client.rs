// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation

use crate::error::{ConfiguratorError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use std::path::Path;
use tracing::{debug, instrument};

/// Create a client from an explicit kubeconfig file, or infer one from
/// KUBECONFIG, ~/.kube/config or the in-cluster service account
#[instrument]
pub async fn create_client(kubeconfig: Option<&Path>) -> Result<Client> {
    let client_config = match kubeconfig {
        Some(path) => config_from_kubeconfig(path).await?,
        None => KConfig::infer()
            .await
            .map_err(|e| ConfiguratorError::Kubeconfig(format!("Failed to infer config: {}", e)))?,
    };

    debug!("Using cluster {}", client_config.cluster_url);
    Client::try_from(client_config)
        .map_err(|e| ConfiguratorError::Kubeconfig(format!("Failed to create client: {}", e)))
}

async fn config_from_kubeconfig(path: &Path) -> Result<KConfig> {
    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
        ConfiguratorError::Kubeconfig(format!("Failed to read {}: {}", path.display(), e))
    })?;

    KConfig::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| ConfiguratorError::Kubeconfig(format!("Failed to create config: {}", e)))
}
