pub mod attendance;
pub mod language;

pub use attendance::{AttendanceRecord, Status};
pub use language::Language;
