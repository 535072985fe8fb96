//! Stopwatch ticker for the Detox TUI.
//!
//! Sends [`Event::Tick`] to the event loop once per period until the
//! cancellation token fires or the channel closes. The event loop decides
//! what a tick means; the ticker keeps running while the stopwatch is
//! paused.
//!
//! **Panic-Free Policy:** This module follows the project's panic-free guidelines.
//! No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`, or `todo!()`.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::input::Event;

/// Default tick period: one stopwatch second.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic tick source.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    event_tx: mpsc::UnboundedSender<Event>,
    cancel_token: CancellationToken,
}

impl Ticker {
    pub fn new(
        period: Duration,
        event_tx: mpsc::UnboundedSender<Event>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            period,
            event_tx,
            cancel_token,
        }
    }

    /// Creates a ticker with [`TICK_PERIOD`].
    pub fn with_defaults(
        event_tx: mpsc::UnboundedSender<Event>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self::new(TICK_PERIOD, event_tx, cancel_token)
    }

    /// Runs until cancelled or until the receiver is dropped.
    pub async fn run(&self) {
        let mut ticks = interval(self.period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticks.tick().await;

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    if self.event_tx.send(Event::Tick).is_err() {
                        debug!("Event channel closed, ticker exiting");
                        break;
                    }
                }
                _ = self.cancel_token.cancelled() => {
                    debug!("Ticker shutting down");
                    break;
                }
            }
        }
    }
}
