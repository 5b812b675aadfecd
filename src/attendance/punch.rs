use chrono::{DateTime, Local};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::attendance::gate::{GateState, VerificationGate};
use crate::attendance::records::RecordBook;
use crate::model::{AttendanceRecord, Status};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display)]
#[serde(rename_all = "lowercase")]
pub enum PunchKind {
    #[display(fmt = "in")]
    In,
    #[display(fmt = "out")]
    Out,
}

/// Reasons a punch is refused, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PunchError {
    #[display(fmt = "employee name is required")]
    NameRequired,
    #[display(fmt = "QR verification is required")]
    VerificationRequired,
    #[display(fmt = "already clocked in today")]
    AlreadyClockedIn,
    #[display(fmt = "no clock-in found for today")]
    NotClockedIn,
    #[display(fmt = "already clocked out today")]
    AlreadyClockedOut,
}

impl std::error::Error for PunchError {}

/// Records a clock-in or clock-out for `name` at `now`.
///
/// The gate is consumed whatever the outcome. On success the returned record is the
/// created (`In`) or updated (`Out`) row; on failure `book` is untouched.
pub fn punch(
    kind: PunchKind,
    name: &str,
    gate: &mut VerificationGate,
    book: &mut RecordBook,
    now: DateTime<Local>,
) -> Result<AttendanceRecord, PunchError> {
    let gate_state = gate.take();

    if name.trim().is_empty() {
        return Err(PunchError::NameRequired);
    }
    if gate_state != GateState::Verified {
        return Err(PunchError::VerificationRequired);
    }

    let local = now.naive_local();
    let today = local.format(DATE_FORMAT).to_string();
    let time = local.format(TIME_FORMAT).to_string();

    match kind {
        PunchKind::In => {
            if book.find_for_day(name, &today).is_some() {
                return Err(PunchError::AlreadyClockedIn);
            }

            let record = AttendanceRecord {
                id: book.next_id(now.timestamp_millis()),
                date: today,
                name: name.to_string(),
                clock_in: time,
                clock_out: None,
                status: Status::Pending,
            };
            info!(id = record.id, name = %record.name, date = %record.date, "Clocked in");
            book.prepend(record.clone());
            Ok(record)
        }
        PunchKind::Out => {
            let record = book
                .find_for_day_mut(name, &today)
                .ok_or(PunchError::NotClockedIn)?;
            if !record.is_open() {
                debug!(id = record.id, "Second clock-out refused");
                return Err(PunchError::AlreadyClockedOut);
            }

            record.clock_out = Some(time);
            info!(id = record.id, name = %record.name, date = %record.date, "Clocked out");
            Ok(record.clone())
        }
    }
}
