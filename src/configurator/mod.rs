// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Publishes the monitored namespaces into the Azure Monitor ConfigMap.

pub mod configmap;
pub mod manager;

pub use configmap::{converge_configmap, namespaces_csv, ConfigMapTarget, Converged};
pub use manager::Configurator;
