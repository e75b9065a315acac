// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ConfigMap composition and get-then-create-or-update.

use crate::constants::configmap::{DELIMITER, NAMESPACES_KEY};
use crate::error::{ConfiguratorError, Result};
use k8s_openapi::api::core::v1::ConfigMap;
use kube::{
    api::{ObjectMeta, PostParams},
    Api, Client,
};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, instrument};

/// Location of the published ConfigMap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigMapTarget {
    pub namespace: String,
    pub name: String,
}

impl ConfigMapTarget {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ConfigMapTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// What a converge step did to the ConfigMap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converged {
    Created,
    Updated,
}

/// Join namespace names in order, without whitespace
pub fn namespaces_csv<S: AsRef<str>>(namespaces: &[S]) -> String {
    namespaces
        .iter()
        .map(|ns| ns.as_ref())
        .collect::<Vec<&str>>()
        .join(DELIMITER)
}

/// Fresh ConfigMap holding only the namespace list
fn desired_configmap(target: &ConfigMapTarget, namespaces_csv: &str) -> ConfigMap {
    ConfigMap {
        metadata: ObjectMeta {
            name: Some(target.name.clone()),
            namespace: Some(target.namespace.clone()),
            ..Default::default()
        },
        data: Some(BTreeMap::from([(
            NAMESPACES_KEY.to_string(),
            namespaces_csv.to_string(),
        )])),
        ..Default::default()
    }
}

/// Existing ConfigMap with the namespace list overwritten.
///
/// The resourceVersion is cleared so the replace is unconditional.
fn updated_configmap(mut existing: ConfigMap, namespaces_csv: &str) -> ConfigMap {
    existing.metadata.resource_version = None;
    existing
        .data
        .get_or_insert_with(BTreeMap::new)
        .insert(NAMESPACES_KEY.to_string(), namespaces_csv.to_string());
    existing
}

/// Make the ConfigMap at `target` hold `namespaces_csv`.
///
/// Creates it when it does not exist. Any other lookup failure aborts without
/// writing anything.
#[instrument(skip(client, namespaces_csv), fields(configmap = %target))]
pub async fn converge_configmap(
    client: &Client,
    target: &ConfigMapTarget,
    namespaces_csv: &str,
) -> Result<Converged> {
    let configmaps: Api<ConfigMap> = Api::namespaced(client.clone(), &target.namespace);

    match configmaps.get(&target.name).await {
        Ok(existing) => {
            debug!("Updating ConfigMap {} with namespaces '{}'", target, namespaces_csv);
            configmaps
                .replace(
                    &target.name,
                    &PostParams::default(),
                    &updated_configmap(existing, namespaces_csv),
                )
                .await
                .map_err(ConfiguratorError::UpdateConfigMap)?;
            Ok(Converged::Updated)
        }
        Err(kube::Error::Api(err)) if err.code == 404 => {
            debug!("Creating ConfigMap {} with namespaces '{}'", target, namespaces_csv);
            configmaps
                .create(
                    &PostParams::default(),
                    &desired_configmap(target, namespaces_csv),
                )
                .await
                .map_err(ConfiguratorError::CreateConfigMap)?;
            info!("Successfully created ConfigMap {}", target);
            Ok(Converged::Created)
        }
        Err(e) => Err(ConfiguratorError::GetConfigMap(e)),
    }
}
