//! The event loop: owns the current snapshot and layout, and multiplexes the
//! refresh timer, the layout timer and terminal input.
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::Event;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::dispatch::dispatch;
use super::event::spawn_input_reader;
use super::terminal::{CrosstermRenderer, Renderer};
use super::Action;
use crate::config::Config;
use crate::layout::{layout, Layout};
use crate::source::ObjectSource;
use crate::types::{DisplayState, PlacedItem, Snapshot};

/// Why the loop stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The operator pressed a quit key.
    Quit,
    /// The input source went away.
    InputClosed,
}

/// Takes over the terminal and runs the visualization until it stops.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or a refresh fails.
pub async fn run_tui<S: ObjectSource>(config: &Config, source: S) -> Result<Exit> {
    info!(
        "Starting pod view for namespace {} (refresh {:?}, layout {:?})",
        config.namespace, config.refresh_period, config.layout_period
    );

    let renderer = CrosstermRenderer::acquire().context("failed to set up terminal")?;
    let input = spawn_input_reader();

    EventLoop::new(source, renderer, config).run(input).await
}

pub struct EventLoop<S, R> {
    source: S,
    renderer: R,
    snapshot: Snapshot,
    /// What is currently on screen; clicks are resolved against this.
    placed: Vec<PlacedItem>,
    viewport: (u16, u16),
    rng: StdRng,
    refresh_period: Duration,
    layout_period: Duration,
}

impl<S: ObjectSource, R: Renderer> EventLoop<S, R> {
    pub fn new(source: S, renderer: R, config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let viewport = renderer.viewport();

        Self {
            source,
            renderer,
            snapshot: Snapshot::default(),
            placed: Vec::new(),
            viewport,
            rng,
            refresh_period: config.refresh_period,
            layout_period: config.layout_period,
        }
    }

    /// Runs until a quit key, the end of input, or a failed refresh.
    ///
    /// The renderer is released exactly once on every one of those paths.
    pub async fn run(mut self, input: mpsc::UnboundedReceiver<Event>) -> Result<Exit> {
        let result = self.drive(input).await;

        if let Err(e) = self.renderer.release() {
            warn!("Failed to restore terminal: {}", e);
        }

        match &result {
            Ok(exit) => info!("Stopped: {:?}", exit),
            // The caller reports the error itself.
            Err(e) => debug!("Stopped on error: {:#}", e),
        }
        result
    }

    async fn drive(&mut self, mut input: mpsc::UnboundedReceiver<Event>) -> Result<Exit> {
        self.refresh().await?;

        let mut refresh_timer = timer(self.refresh_period);
        let mut layout_timer = timer(self.layout_period);

        loop {
            tokio::select! {
                _ = refresh_timer.tick() => {
                    self.refresh().await?;
                }
                _ = layout_timer.tick() => {
                    self.scramble()?;
                }
                event = input.recv() => {
                    let Some(event) = event else {
                        return Ok(Exit::InputClosed);
                    };
                    if let Some(exit) = self.handle_input(event).await? {
                        return Ok(exit);
                    }
                }
            }
        }
    }

    async fn refresh(&mut self) -> Result<()> {
        self.snapshot = self
            .source
            .refresh()
            .await
            .context("failed to list pods")?;
        if self.snapshot.is_empty() {
            info!("No live pods left");
        } else {
            debug!("Refreshed snapshot: {} items", self.snapshot.len());
        }
        self.scramble()
    }

    /// Places the current snapshot anew and draws it.
    fn scramble(&mut self) -> Result<()> {
        let (width, height) = self.viewport;
        match layout(self.snapshot.items(), width, height, &mut self.rng) {
            Layout::Empty => {
                self.placed.clear();
                self.renderer.draw_empty()
            }
            Layout::Placed(placed) => {
                self.placed = placed;
                self.renderer.draw(&self.placed)
            }
        }
    }

    async fn handle_input(&mut self, event: Event) -> Result<Option<Exit>> {
        if let Event::Resize(width, height) = event {
            debug!("Viewport resized to {}x{}", width, height);
            self.viewport = (width, height);
            self.renderer.resize(width, height);
            self.scramble()?;
            return Ok(None);
        }

        match dispatch(&event, &self.placed) {
            Action::Quit => Ok(Some(Exit::Quit)),
            Action::Delete(identifier) => {
                self.delete(&identifier).await?;
                Ok(None)
            }
            Action::None => Ok(None),
        }
    }

    /// Requests deletion and marks the item right away, whether or not the
    /// request was accepted. The next refresh is what reconciles the mark.
    async fn delete(&mut self, identifier: &str) -> Result<()> {
        match self.source.request_deletion(identifier).await {
            Ok(()) => info!("Requested deletion of {}", identifier),
            Err(e) => warn!("Deletion of {} failed: {}", identifier, e),
        }

        self.snapshot.mark_for_removal(identifier);
        for p in self
            .placed
            .iter_mut()
            .filter(|p| p.item.identifier == identifier)
        {
            p.item.display_state = DisplayState::MarkedForRemoval;
        }
        self.renderer.draw(&self.placed)
    }
}

/// An interval whose first tick is one full period away.
fn timer(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
