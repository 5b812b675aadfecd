use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::scanner::{ScanError, ScanEvent, ScanFailure, ScanSession, ScanSource};

/// The payload printed on the kiosk's QR code.
pub const VALID_QR_TOKEN: &str = "KUMAMOTO_HIGO";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GateState {
    #[default]
    Unverified,
    Verified,
}

/// How a scan attempt that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Verified,
    /// The source ended without producing anything.
    Cancelled,
}

/// One successful scan authorizes exactly one punch attempt.
#[derive(Debug, Default)]
pub struct VerificationGate {
    state: GateState,
}

impl VerificationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_verified(&self) -> bool {
        self.state == GateState::Verified
    }

    /// Applies one decoder event. Failures leave the state untouched.
    pub fn observe(&mut self, event: ScanEvent) -> Result<(), ScanError> {
        match event {
            ScanEvent::Decoded(text) if text == VALID_QR_TOKEN => {
                self.state = GateState::Verified;
                Ok(())
            }
            ScanEvent::Decoded(_) => Err(ScanError::InvalidToken),
            ScanEvent::Failed(failure) => Err(failure.into()),
        }
    }

    /// Runs one scan attempt against `source`: the first decoded text settles it,
    /// transient decode failures are skipped while the source keeps producing.
    pub fn scan(&mut self, source: &mut dyn ScanSource) -> Result<ScanOutcome, ScanError> {
        let mut session = ScanSession::open(source)?;
        let mut undecodable = false;

        while let Some(event) = session.next_event() {
            match event {
                ScanEvent::Failed(ScanFailure::DecodeFailed) => undecodable = true,
                event => return self.observe(event).map(|()| ScanOutcome::Verified),
            }
        }

        if undecodable {
            Err(ScanError::DecodeFailed)
        } else {
            Ok(ScanOutcome::Cancelled)
        }
    }

    /// The employee-name field was edited.
    pub fn name_changed(&mut self) {
        if self.is_verified() {
            debug!("Name changed, verification revoked");
        }
        self.state = GateState::Unverified;
    }

    /// Consumes the authorization: returns the state held until now and resets it.
    pub fn take(&mut self) -> GateState {
        std::mem::take(&mut self.state)
    }
}
