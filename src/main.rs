//! The main entry point for the pod-chaos application.
mod app;
mod config;
mod layout;
mod logging;
mod source;
mod types;
mod ui;

use anyhow::Result;

/// The main function of the application.
///
/// Pods of one namespace float around the terminal as labels; clicking a
/// label deletes the pod.
///
/// # Errors
///
/// Returns an error if the cluster cannot be reached, either at startup or
/// on a later refresh.
#[tokio::main]
async fn main() -> Result<()> {
    app::launch().await
}
