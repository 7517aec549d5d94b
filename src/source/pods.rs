//! This module provides the [`ObjectSource`] implementation backed by the
//! Kubernetes API, targeting pods in a single namespace.
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, DeleteParams, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use tracing::{debug, info};

use super::{ObjectSource, SourceError};
use crate::types::Snapshot;

/// Builds an authenticated client.
///
/// With an explicit path the kubeconfig is read from there; otherwise the
/// standard discovery (`KUBECONFIG`, `~/.kube/config`, in-cluster) applies.
///
/// # Errors
///
/// Returns an error if no usable configuration can be found or the client
/// cannot be constructed.
pub async fn connect(kubeconfig: Option<&Path>) -> Result<Client> {
    let config = match kubeconfig {
        Some(path) => {
            let raw = Kubeconfig::read_from(path)
                .with_context(|| format!("failed to read kubeconfig {}", path.display()))?;
            kube::Config::from_custom_kubeconfig(raw, &KubeConfigOptions::default())
                .await
                .context("invalid kubeconfig")?
        }
        None => kube::Config::infer()
            .await
            .context("failed to infer cluster configuration")?,
    };

    info!("Connecting to cluster at {}", config.cluster_url);
    Client::try_from(config).context("failed to build cluster client")
}

/// Pods in one namespace, listed and deleted through the API server.
pub struct KubePodSource {
    api: Api<Pod>,
    namespace: String,
}

impl KubePodSource {
    pub fn new(client: Client, namespace: &str) -> Self {
        Self {
            api: Api::namespaced(client, namespace),
            namespace: namespace.to_string(),
        }
    }
}

#[async_trait]
impl ObjectSource for KubePodSource {
    async fn refresh(&self) -> Result<Snapshot, SourceError> {
        let pods = self
            .api
            .list(&ListParams::default())
            .await
            .map_err(|e| SourceError::Unreachable(e.to_string()))?;

        let snapshot = live_snapshot(pods.items);
        debug!(
            "Listed {} live pods in namespace {}",
            snapshot.len(),
            self.namespace
        );
        Ok(snapshot)
    }

    async fn request_deletion(&self, identifier: &str) -> Result<(), SourceError> {
        self.api
            .delete(identifier, &DeleteParams::default())
            .await
            .map_err(classify)?;
        info!("Deletion of pod {}/{} accepted", self.namespace, identifier);
        Ok(())
    }
}

/// Keeps the pods that are not already terminating, in list order.
///
/// Pods without a name are skipped and repeated names keep their first
/// occurrence.
pub fn live_snapshot<I>(pods: I) -> Snapshot
where
    I: IntoIterator<Item = Pod>,
{
    Snapshot::from_names(pods.into_iter().filter_map(|pod| {
        if pod.metadata.deletion_timestamp.is_some() {
            return None;
        }
        pod.metadata.name
    }))
}

fn classify(err: kube::Error) -> SourceError {
    match err {
        kube::Error::Api(resp) if resp.code == 404 => SourceError::NotFound(resp.message),
        kube::Error::Api(resp) if resp.code == 403 => SourceError::Forbidden(resp.message),
        other => SourceError::Unreachable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
    use kube::core::ErrorResponse;

    fn pod(name: &str, terminating: bool) -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some("default".to_string()),
                deletion_timestamp: terminating.then(|| Time(Utc::now())),
                ..ObjectMeta::default()
            },
            ..Pod::default()
        }
    }

    fn names(snapshot: &Snapshot) -> Vec<&str> {
        snapshot
            .items()
            .iter()
            .map(|item| item.identifier.as_str())
            .collect()
    }

    #[test]
    fn terminating_pods_are_filtered_out() {
        let snapshot = live_snapshot(vec![
            pod("api-1", false),
            pod("api-2", true),
            pod("db-0", false),
        ]);
        assert_eq!(names(&snapshot), vec!["api-1", "db-0"]);
    }

    #[test]
    fn unnamed_and_duplicate_pods_are_skipped() {
        let mut unnamed = pod("ignored", false);
        unnamed.metadata.name = None;

        let snapshot = live_snapshot(vec![
            pod("worker", false),
            unnamed,
            pod("worker", false),
        ]);
        assert_eq!(names(&snapshot), vec!["worker"]);
    }

    #[test]
    fn everything_terminating_yields_empty_snapshot() {
        let snapshot = live_snapshot(vec![pod("a", true), pod("b", true)]);
        assert!(snapshot.is_empty());
    }

    fn api_error(code: u16) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("status {code}"),
            reason: String::new(),
            code,
        })
    }

    #[test]
    fn api_status_codes_map_to_source_errors() {
        assert!(matches!(classify(api_error(404)), SourceError::NotFound(_)));
        assert!(matches!(classify(api_error(403)), SourceError::Forbidden(_)));
        assert!(matches!(
            classify(api_error(500)),
            SourceError::Unreachable(_)
        ));
    }
}
