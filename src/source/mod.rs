//! This module defines the interface to the cluster: listing live workload
//! objects and requesting their deletion.
pub mod pods;

pub use pods::KubePodSource;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::Snapshot;

/// Failures reported by an [`ObjectSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    /// The control plane could not be reached or answered with an
    /// unexpected failure.
    #[error("control plane unreachable: {0}")]
    Unreachable(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
}

/// A trait for the collaborator that owns the workload objects.
#[async_trait]
pub trait ObjectSource {
    /// Lists the objects that are live, i.e. not already being deleted.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Unreachable` if the list call fails.
    async fn refresh(&self) -> Result<Snapshot, SourceError>;

    /// Asks the control plane to delete the named object.
    ///
    /// Success means the request was accepted, not that the object is gone.
    async fn request_deletion(&self, identifier: &str) -> Result<(), SourceError>;
}

#[async_trait]
impl<T: ObjectSource + Send + Sync + ?Sized> ObjectSource for Arc<T> {
    async fn refresh(&self) -> Result<Snapshot, SourceError> {
        (**self).refresh().await
    }

    async fn request_deletion(&self, identifier: &str) -> Result<(), SourceError> {
        (**self).request_deletion(identifier).await
    }
}
