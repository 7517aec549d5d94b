pub mod args;
mod setup;

pub use args::AppArgs;

use anyhow::Result;
use tracing::Level;

use crate::logging::LogBuffer;
use crate::source::KubePodSource;
use crate::ui::{run_tui, Exit};

pub async fn launch() -> Result<()> {
    launch_with_args(AppArgs::from_cli()).await
}

pub async fn launch_with_args(args: AppArgs) -> Result<()> {
    let setup::PreparedApp {
        config,
        client,
        log_buffer,
    } = setup::prepare(&args).await?;

    let source = KubePodSource::new(client, &config.namespace);
    let result = run_tui(&config, source).await;

    // The terminal is back in normal mode by now.
    replay_warnings(&log_buffer);

    match result? {
        Exit::Quit => println!("👋 Bye"),
        Exit::InputClosed => println!("Input closed, exiting"),
    }
    Ok(())
}

fn replay_warnings(log_buffer: &LogBuffer) {
    for entry in log_buffer.entries_at_least(Level::WARN) {
        eprintln!("{}", entry);
    }
}
