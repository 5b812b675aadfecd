pub mod gate;
pub mod punch;
pub mod records;
pub mod review;

pub use gate::{GateState, ScanOutcome, VALID_QR_TOKEN, VerificationGate};
pub use punch::{PunchError, PunchKind, punch};
pub use records::{RECORDS_KEY, RecordBook};
pub use review::{SortField, SortOrder};
