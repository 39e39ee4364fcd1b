//! Observer location acquisition.
//!
//! A provider may be slow or fail, so it runs on its own thread while the
//! first frame renders. The result is awaited with a timeout; absence only
//! removes the observer panel from the output.

use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use daylight_frames::GeoPoint;

/// Source of the observer's position.
pub trait LocationProvider: Send + 'static {
    /// Short label for log messages.
    fn name(&self) -> &str;
    /// Best-effort position, `None` when unavailable.
    fn locate(&mut self) -> Option<GeoPoint>;
}

/// A position known up front (command-line flags, config).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub GeoPoint);

impl LocationProvider for FixedLocation {
    fn name(&self) -> &str {
        "fixed"
    }

    fn locate(&mut self) -> Option<GeoPoint> {
        Some(self.0)
    }
}

/// An in-flight location lookup.
pub struct LocationRequest {
    rx: Option<mpsc::Receiver<Option<GeoPoint>>>,
    resolved: Option<Option<GeoPoint>>,
}

impl LocationRequest {
    /// Start `provider` on a worker thread.
    pub fn spawn<P: LocationProvider>(mut provider: P) -> Self {
        let (tx, rx) = mpsc::channel();
        let spawned = std::thread::Builder::new()
            .name("location".to_string())
            .spawn(move || {
                let point = provider.locate().and_then(|p| match p.validated() {
                    Ok(p) => Some(p),
                    Err(e) => {
                        log::warn!("location provider '{}' returned {e}", provider.name());
                        None
                    }
                });
                if point.is_none() {
                    log::warn!("location provider '{}' gave no position", provider.name());
                }
                let _ = tx.send(point);
            });

        match spawned {
            Ok(_) => Self {
                rx: Some(rx),
                resolved: None,
            },
            Err(e) => {
                log::warn!("could not start location lookup: {e}");
                Self::unavailable()
            }
        }
    }

    /// A request that has already failed.
    pub fn unavailable() -> Self {
        Self {
            rx: None,
            resolved: Some(None),
        }
    }

    /// Non-blocking check. `None` while the lookup is still running.
    pub fn poll(&mut self) -> Option<Option<GeoPoint>> {
        if self.resolved.is_none() {
            if let Some(rx) = &self.rx {
                match rx.try_recv() {
                    Ok(point) => self.resolved = Some(point),
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => self.resolved = Some(None),
                }
            }
        }
        self.resolved
    }

    /// Block up to `timeout` for the result. A lookup that has not
    /// finished by then counts as unavailable.
    pub fn wait(mut self, timeout: Duration) -> Option<GeoPoint> {
        if let Some(resolved) = self.poll() {
            return resolved;
        }
        let Some(rx) = self.rx.take() else {
            return None;
        };
        match rx.recv_timeout(timeout) {
            Ok(point) => point,
            Err(RecvTimeoutError::Timeout) => {
                log::warn!("location lookup timed out after {timeout:?}");
                None
            }
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
