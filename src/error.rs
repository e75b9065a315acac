// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfiguratorError {
    #[error("Error syncing namespace cache")]
    SyncingCache,

    #[error("Failed to list monitored namespaces: {0}")]
    ListNamespaces(String),

    #[error("Failed to get ConfigMap: {0}")]
    GetConfigMap(#[source] kube::Error),

    #[error("Failed to create ConfigMap: {0}")]
    CreateConfigMap(#[source] kube::Error),

    #[error("Failed to update ConfigMap: {0}")]
    UpdateConfigMap(#[source] kube::Error),

    #[error("Kubeconfig error: {0}")]
    Kubeconfig(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ConfiguratorError>;
