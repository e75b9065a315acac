// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Trigger loop that keeps the Azure Monitor ConfigMap in line with the
//! monitored namespaces.

use crate::config::Config;
use crate::configurator::configmap::{
    converge_configmap, namespaces_csv, ConfigMapTarget, Converged,
};
use crate::error::Result;
use crate::namespaces::NamespaceMonitor;
use kube::Client;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// What woke the loop up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    NamespaceEvent,
    Ticker,
}

/// Reconciles the ConfigMap from the namespace monitor's snapshot.
/// Owns no state besides the monitor; every cycle starts from scratch.
pub struct Configurator {
    monitor: NamespaceMonitor,
    client: Client,
    target: ConfigMapTarget,
    check_interval: Duration,
}

impl Configurator {
    pub fn new(monitor: NamespaceMonitor, client: Client, config: &Config) -> Self {
        Self {
            monitor,
            client,
            target: ConfigMapTarget::new(&config.osm_namespace, &config.configmap_name),
            check_interval: config.check_interval,
        }
    }

    /// Spawn the trigger loop. It runs until `stop` is cancelled.
    pub fn start(self, stop: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(stop))
    }

    pub async fn run(mut self, stop: CancellationToken) {
        info!("Configurator started for ConfigMap {}", self.target);

        let mut ticker = interval_at(Instant::now() + self.check_interval, self.check_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut events_open = true;

        loop {
            let trigger = tokio::select! {
                biased;
                _ = stop.cancelled() => break,
                event = self.monitor.changed(), if events_open => match event {
                    Some(()) => Trigger::NamespaceEvent,
                    None => {
                        warn!("Namespace events closed, relying on the periodic check");
                        events_open = false;
                        continue;
                    }
                },
                _ = ticker.tick() => Trigger::Ticker,
            };

            // Abandon the cycle in flight when stopping
            tokio::select! {
                biased;
                _ = stop.cancelled() => break,
                _ = self.refresh(trigger) => {}
            }
        }

        info!("Configurator stopped");
    }

    /// One reconciliation cycle; failures are logged and left for the next trigger.
    #[instrument(skip(self), fields(configmap = %self.target))]
    async fn refresh(&self, trigger: Trigger) {
        match trigger {
            Trigger::NamespaceEvent => info!("Triggered by Kubernetes Namespaces event"),
            Trigger::Ticker => info!("Triggered by periodic check"),
        }

        match self.try_refresh().await {
            Ok(Converged::Created) => debug!("Created ConfigMap {}", self.target),
            Ok(Converged::Updated) => debug!("Updated ConfigMap {}", self.target),
            Err(e) => error!("Error refreshing ConfigMap {}: {}", self.target, e),
        }
    }

    async fn try_refresh(&self) -> Result<Converged> {
        let namespaces = self.monitor.list()?;
        let csv = namespaces_csv(&namespaces);
        debug!("Monitored namespaces: '{}'", csv);

        converge_configmap(&self.client, &self.target, &csv).await
    }
}
