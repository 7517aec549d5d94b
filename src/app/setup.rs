//! This module handles the initial setup of the application.
use super::args::AppArgs;
use crate::config::Config;
use crate::logging::{LogBuffer, LogCollector};
use crate::source::pods;
use anyhow::Result;
use std::sync::Arc;

const LOG_BUFFER_SIZE: usize = 1000;
/// Used when `RUST_LOG` is unset.
pub(crate) const DEFAULT_LOG_DIRECTIVE: &str = "info";

/// Contains all the necessary components for the application to run.
pub struct PreparedApp {
    /// The resolved configuration.
    pub config: Config,
    /// An authenticated cluster client.
    pub client: kube::Client,
    /// Log entries collected while the terminal is taken over.
    pub log_buffer: Arc<LogBuffer>,
}

/// Prepares the application for running.
///
/// This function performs the following steps:
/// 1. Resolves the configuration from the config file and flags.
/// 2. Configures logging.
/// 3. Prints a start banner.
/// 4. Connects to the cluster.
///
/// # Errors
///
/// This function will return an error if the configuration is invalid or no
/// cluster client can be built. Both happen before the terminal is touched.
pub async fn prepare(args: &AppArgs) -> Result<PreparedApp> {
    let config = Config::resolve(args)?;

    let log_buffer = Arc::new(LogBuffer::new(LOG_BUFFER_SIZE));
    configure_logging(log_buffer.clone());
    print_start_banner(&config);

    let client = pods::connect(args.kubeconfig.as_deref()).await?;

    Ok(PreparedApp {
        config,
        client,
        log_buffer,
    })
}

/// Configures logging for the application.
fn configure_logging(log_buffer: Arc<LogBuffer>) {
    if let Err(e) = LogCollector::init_subscriber(log_buffer, DEFAULT_LOG_DIRECTIVE) {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

/// Prints a banner with startup information.
fn print_start_banner(config: &Config) {
    println!("💥 Starting pod-chaos");
    println!("Namespace: {}", config.namespace);
    println!("Refresh every {:?}, scramble every {:?}", config.refresh_period, config.layout_period);
    println!("Click a pod to delete it, Ctrl+C to quit");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::EnvFilter;

    #[test]
    fn default_directive_drops_debug_events() {
        let buffer = Arc::new(LogBuffer::new(16));
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
            .with(LogCollector::new(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("Refreshed snapshot: 3 items");
            tracing::info!("Requested deletion of web-1");
        });

        let messages: Vec<_> = buffer
            .entries_at_least(Level::TRACE)
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, vec!["Requested deletion of web-1"]);
    }
}
