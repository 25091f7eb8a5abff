//! Periodic tick delivery.
//!
//! Ticks are never delivered into the timer directly. A [`Ticker`] pushes
//! them into a channel and the timer's owner drains that channel on the
//! same thread that handles clicks, which keeps every mutation serialized.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::FocusError;

/// One elapsed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick;

/// Source of periodic ticks. Starting or stopping twice is a no-op.
pub trait PeriodicDriver: Send {
    /// Begin delivering ticks.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver cannot be started.
    fn start(&mut self) -> Result<(), FocusError>;

    /// Stop delivering ticks.
    fn stop(&mut self);

    /// Whether ticks are currently being delivered.
    fn is_running(&self) -> bool;
}

struct Worker {
    halt: Sender<()>,
    handle: JoinHandle<()>,
}

/// Thread-backed driver sending one [`Tick`] per interval into a channel.
pub struct Ticker {
    interval: Duration,
    sink: Sender<Tick>,
    worker: Option<Worker>,
}

impl Ticker {
    /// Create a stopped ticker and the receiving end of its tick channel.
    #[must_use]
    pub fn channel(interval: Duration) -> (Self, Receiver<Tick>) {
        let (sink, ticks) = mpsc::channel();
        (
            Self {
                interval,
                sink,
                worker: None,
            },
            ticks,
        )
    }

    /// A ticker firing once per second.
    #[must_use]
    pub fn every_second() -> (Self, Receiver<Tick>) {
        Self::channel(Duration::from_secs(1))
    }
}

impl PeriodicDriver for Ticker {
    fn start(&mut self) -> Result<(), FocusError> {
        if self.worker.is_some() {
            return Ok(());
        }

        let (halt, halted) = mpsc::channel::<()>();
        let sink = self.sink.clone();
        let interval = self.interval;

        let handle = thread::Builder::new()
            .name("focusbar-ticker".to_string())
            .spawn(move || {
                let mut deadline = Instant::now() + interval;
                loop {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    match halted.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {
                            if sink.send(Tick).is_err() {
                                break;
                            }
                            deadline += interval;
                        }
                        // Halt requested or ticker dropped
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })
            .map_err(|e| FocusError::Config(format!("Failed to start ticker: {e}")))?;

        debug!(interval_ms = self.interval.as_millis(), "ticker started");
        self.worker = Some(Worker { halt, handle });
        Ok(())
    }

    fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        drop(worker.halt);
        if worker.handle.join().is_err() {
            warn!("ticker thread panicked");
        }
        debug!("ticker stopped");
    }

    fn is_running(&self) -> bool {
        self.worker.is_some()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticker")
            .field("interval", &self.interval)
            .field("running", &self.is_running())
            .finish()
    }
}
