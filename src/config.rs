// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{configmap, intervals, DEFAULT_VERBOSITY};
use crate::error::ConfiguratorError;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Operator configuration, from command-line flags or environment variables
#[derive(Parser, Debug, Clone)]
#[command(name = "azmon-configurator", version, about)]
pub struct Config {
    /// Mesh name; namespaces labelled as monitored by this mesh are published
    #[arg(long, env = "MESH_NAME")]
    pub mesh_name: String,

    /// Namespace the ConfigMap lives in
    #[arg(long, env = "OSM_NAMESPACE")]
    pub osm_namespace: String,

    #[arg(
        long = "azmon-configmap-name",
        env = "AZMON_CONFIGMAP_NAME",
        default_value = configmap::DEFAULT_NAME
    )]
    pub configmap_name: String,

    /// Log level used when RUST_LOG is not set
    #[arg(short, long, env = "VERBOSITY", default_value = DEFAULT_VERBOSITY)]
    pub verbosity: String,

    /// Path to a kubeconfig file; falls back to KUBECONFIG or in-cluster config
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    #[arg(skip = Duration::from_secs(intervals::RESYNC_SECS))]
    pub resync_interval: Duration,

    #[arg(skip = Duration::from_secs(intervals::CHECK_SECS))]
    pub check_interval: Duration,
}

impl Config {
    /// Load configuration from the process arguments and environment
    pub fn load() -> Result<Self> {
        Self::parse().validate()
    }

    /// Reject blank values that clap accepts
    fn validate(self) -> Result<Self> {
        for (flag, value) in [
            ("--mesh-name", &self.mesh_name),
            ("--osm-namespace", &self.osm_namespace),
            ("--azmon-configmap-name", &self.configmap_name),
        ] {
            if value.trim().is_empty() {
                let message = format!("{} must not be empty", flag);
                return Err(ConfiguratorError::InvalidConfig(message).into());
            }
        }
        Ok(self)
    }
}
