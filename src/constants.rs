// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes label keys read by the configurator
pub mod labels {
    /// Namespaces carrying this label with the mesh name as value are monitored
    pub const MONITORED_BY: &str = "openservicemesh.io/monitored-by";
}

/// Layout of the published ConfigMap
pub mod configmap {
    /// Data key holding the comma separated namespace list
    pub const NAMESPACES_KEY: &str = "namespaces";
    /// Separator between namespace names
    pub const DELIMITER: &str = ",";
    /// ConfigMap name used when none is configured
    pub const DEFAULT_NAME: &str = "azmon-config";
}

/// Trigger timing
pub mod intervals {
    /// Full resync of the namespace cache, in seconds
    pub const RESYNC_SECS: u64 = 5 * 60;
    /// Periodic reconcile of the ConfigMap, in seconds
    pub const CHECK_SECS: u64 = 60;
}

/// Log level used when neither RUST_LOG nor VERBOSITY is set
pub const DEFAULT_VERBOSITY: &str = "info";
