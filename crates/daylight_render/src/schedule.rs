//! Cancellable fixed-cadence re-render task.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::error::RenderError;

/// Default cadence of the live map.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Runs a job immediately and then once per interval on a named worker
/// thread until stopped or dropped.
///
/// Stopping wakes the worker at once; it does not wait out the current
/// interval. A tick that is already running finishes first.
pub struct PeriodicTask {
    worker: Option<JoinHandle<()>>,
    stop_tx: Option<mpsc::Sender<()>>,
    ticks: Arc<AtomicU64>,
    interval: Duration,
}

impl PeriodicTask {
    pub fn spawn<F>(name: &str, interval: Duration, mut job: F) -> Result<Self, RenderError>
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let ticks = Arc::new(AtomicU64::new(0));
        let ticks_worker = ticks.clone();

        let worker = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                loop {
                    job();
                    ticks_worker.fetch_add(1, Ordering::Relaxed);
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        log::info!("started periodic task '{name}' every {interval:?}");
        Ok(Self {
            worker: Some(worker),
            stop_tx: Some(stop_tx),
            ticks,
            interval,
        })
    }

    /// Number of completed runs of the job.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Stop the schedule and wait for the worker to exit.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.worker.take() {
            let name = handle.thread().name().unwrap_or("periodic").to_string();
            if handle.join().is_err() {
                log::warn!("periodic task '{name}' panicked");
            } else {
                log::info!("stopped periodic task '{name}'");
            }
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.stop();
    }
}
