//! Terminal input: a blocking reader forwarding crossterm events to the
//! event loop over a channel.
use std::time::Duration;

use crossterm::event::{self, Event};
use tokio::sync::mpsc;
use tracing::{debug, error};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Starts reading terminal events on a blocking thread.
///
/// The reader stops within one poll interval of the receiver being dropped,
/// or on the first read error, which closes the channel.
pub fn spawn_input_reader() -> mpsc::UnboundedReceiver<Event> {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        while !event_tx.is_closed() {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if event_tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    error!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
        }
        debug!("Input reader stopped");
    });

    event_rx
}
