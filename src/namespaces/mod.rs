// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cached view of the namespaces monitored by the mesh.

pub mod monitor;

pub use monitor::{monitor_label_selector, NamespaceMonitor};
