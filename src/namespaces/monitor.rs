// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace watcher backed by a reflector store.
//!
//! A background task keeps the store in sync with the namespaces labelled as
//! monitored by the mesh and pushes a payload-free wake-up on every change.

use crate::constants::labels;
use crate::error::{ConfiguratorError, Result};
use futures::StreamExt;
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    runtime::{
        reflector::{self, store::Writer, ObjectRef, Store},
        WatchStreamExt,
    },
    Api, Client,
};
use kube_runtime::watcher::{self, Event};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Kind of cache change that caused a wake-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NamespaceChange {
    Added,
    Updated,
    Deleted,
    /// A (re)list completed and replaced the cache contents
    Relisted,
    /// Periodic resync
    Resync,
}

/// Locally cached set of monitored namespaces plus a change signal.
pub struct NamespaceMonitor {
    store: Store<Namespace>,
    events: mpsc::Receiver<()>,
}

/// Label selector matching namespaces monitored by `mesh_name`
pub fn monitor_label_selector(mesh_name: &str) -> String {
    format!("{}={}", labels::MONITORED_BY, mesh_name)
}

impl NamespaceMonitor {
    /// Start watching monitored namespaces and wait for the initial cache sync.
    ///
    /// Returns [`ConfiguratorError::SyncingCache`] if `stop` fires or the watch
    /// task goes away before the cache is synced.
    #[instrument(skip(client, stop))]
    pub async fn new(
        client: Client,
        mesh_name: &str,
        resync_interval: Duration,
        stop: CancellationToken,
    ) -> Result<Self> {
        let selector = monitor_label_selector(mesh_name);
        let api: Api<Namespace> = Api::all(client);
        let (store, writer) = reflector::store();
        let (events_tx, events_rx) = mpsc::channel(1);

        let watch_stop = stop.child_token();
        tokio::spawn(watch_namespaces(
            api,
            selector,
            writer,
            events_tx,
            resync_interval,
            watch_stop.clone(),
        ));

        info!("Namespace watcher started, waiting for namespace cache to sync...");

        let synced = tokio::select! {
            biased;
            _ = stop.cancelled() => false,
            ready = store.wait_until_ready() => ready.is_ok(),
        };
        if !synced {
            watch_stop.cancel();
            return Err(ConfiguratorError::SyncingCache);
        }

        info!("Namespace cache synced");
        Ok(Self::from_parts(store, events_rx))
    }

    pub(crate) fn from_parts(store: Store<Namespace>, events: mpsc::Receiver<()>) -> Self {
        Self { store, events }
    }

    /// Names of all monitored namespaces, sorted. Reads the local cache only.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = self
            .store
            .state()
            .iter()
            .map(|ns| {
                ns.metadata.name.clone().ok_or_else(|| {
                    ConfiguratorError::ListNamespaces("cached namespace has no name".to_string())
                })
            })
            .collect::<Result<Vec<_>>>()?;
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Wait for the next change notification.
    ///
    /// Returns `None` once the watch task has stopped.
    pub async fn changed(&mut self) -> Option<()> {
        self.events.recv().await
    }
}

/// Background task: drive the watcher, keep the store current and signal changes.
async fn watch_namespaces(
    api: Api<Namespace>,
    selector: String,
    mut writer: Writer<Namespace>,
    events: mpsc::Sender<()>,
    resync_interval: Duration,
    stop: CancellationToken,
) {
    let config = watcher::Config::default().labels(&selector);
    let stream = watcher::watcher(api, config).default_backoff();
    futures::pin_mut!(stream);

    let mut resync = interval_at(Instant::now() + resync_interval, resync_interval);
    resync.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = stop.cancelled() => break,
            _ = resync.tick() => notify(&events, NamespaceChange::Resync),
            event = stream.next() => match event {
                Some(Ok(event)) => handle_event(&mut writer, &events, &event),
                Some(Err(e)) => warn!("Namespace watch error: {}", e),
                None => break,
            },
        }
    }

    debug!("Namespace watcher stopped");
}

/// Apply a watch event to the cache, then signal if it changed what `list` returns
fn handle_event(
    writer: &mut Writer<Namespace>,
    events: &mpsc::Sender<()>,
    event: &Event<Namespace>,
) {
    let change = classify(&writer.as_reader(), event);
    writer.apply_watcher_event(event);
    if let Some(change) = change {
        notify(events, change);
    }
}

fn classify(store: &Store<Namespace>, event: &Event<Namespace>) -> Option<NamespaceChange> {
    match event {
        Event::Apply(ns) => {
            if store.get(&ObjectRef::from_obj(ns)).is_some() {
                Some(NamespaceChange::Updated)
            } else {
                Some(NamespaceChange::Added)
            }
        }
        Event::Delete(_) => Some(NamespaceChange::Deleted),
        // Listed objects are buffered until InitDone swaps them in
        Event::Init | Event::InitApply(_) => None,
        Event::InitDone => Some(NamespaceChange::Relisted),
    }
}

/// Push a wake-up. A full slot means one is already pending, so drop this one.
fn notify(events: &mpsc::Sender<()>, change: NamespaceChange) {
    debug!(?change, "Namespace cache changed");
    if let Err(TrySendError::Closed(())) = events.try_send(()) {
        debug!("Change receiver dropped, notification discarded");
    }
}
