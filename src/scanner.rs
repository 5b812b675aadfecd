//! Contract with the external QR decoding capability.
//!
//! The decoder itself is not part of this crate. A [`ScanSource`] is started, yields
//! decoded text or classified failures, and is stopped when the [`ScanSession`] that
//! owns it goes away.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

/// Failure classes a decoder can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display)]
#[serde(rename_all = "snake_case")]
pub enum ScanFailure {
    #[display(fmt = "frame could not be decoded")]
    DecodeFailed,
    #[display(fmt = "camera access denied")]
    CameraDenied,
    #[display(fmt = "scanner library unavailable")]
    LibraryUnavailable,
}

impl std::error::Error for ScanFailure {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Decoded(String),
    Failed(ScanFailure),
}

/// Why a scan attempt did not verify the kiosk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ScanError {
    #[display(fmt = "decoded text is not the kiosk token")]
    InvalidToken,
    #[display(fmt = "scan failed")]
    DecodeFailed,
    #[display(fmt = "camera access denied")]
    CameraDenied,
    #[display(fmt = "scanner library unavailable")]
    LibraryUnavailable,
}

impl std::error::Error for ScanError {}

impl From<ScanFailure> for ScanError {
    fn from(failure: ScanFailure) -> Self {
        match failure {
            ScanFailure::DecodeFailed => ScanError::DecodeFailed,
            ScanFailure::CameraDenied => ScanError::CameraDenied,
            ScanFailure::LibraryUnavailable => ScanError::LibraryUnavailable,
        }
    }
}

pub trait ScanSource {
    /// Acquires the camera and begins decoding.
    fn start(&mut self) -> Result<(), ScanFailure>;

    /// The next decoder result; `None` once the source is exhausted or cancelled.
    fn next_event(&mut self) -> Option<ScanEvent>;

    /// Releases the camera.
    fn stop(&mut self) -> anyhow::Result<()>;
}

/// A started [`ScanSource`]. Dropping the session stops the source; a failing stop is
/// logged and never reaches the caller.
pub struct ScanSession<'a> {
    source: &'a mut dyn ScanSource,
}

impl<'a> ScanSession<'a> {
    pub fn open(source: &'a mut dyn ScanSource) -> Result<Self, ScanFailure> {
        if let Err(failure) = source.start() {
            debug!(%failure, "Scan source failed to start");
            if let Err(e) = source.stop() {
                warn!(error = %e, "Scanner cleanup failed");
            }
            return Err(failure);
        }
        Ok(Self { source })
    }

    pub fn next_event(&mut self) -> Option<ScanEvent> {
        self.source.next_event()
    }
}

impl Drop for ScanSession<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.source.stop() {
            warn!(error = %e, "Scanner cleanup failed");
        }
    }
}

/// A source that replays a single event reported by the kiosk page, whose browser
/// owns the camera and the decoder.
#[derive(Debug, Default)]
pub struct ReportedScan {
    event: Option<ScanEvent>,
}

impl ReportedScan {
    pub fn new(event: Option<ScanEvent>) -> Self {
        Self { event }
    }
}

impl ScanSource for ReportedScan {
    fn start(&mut self) -> Result<(), ScanFailure> {
        match self.event {
            Some(ScanEvent::Failed(f @ (ScanFailure::CameraDenied | ScanFailure::LibraryUnavailable))) => {
                self.event = None;
                Err(f)
            }
            _ => Ok(()),
        }
    }

    fn next_event(&mut self) -> Option<ScanEvent> {
        self.event.take()
    }

    fn stop(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}
