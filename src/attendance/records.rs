use tracing::warn;

use crate::model::AttendanceRecord;
use crate::storage::{KvStore, StorageError};

/// Key under which the whole collection is persisted as a JSON array.
pub const RECORDS_KEY: &str = "attendance_records";

/// The attendance collection, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordBook {
    records: Vec<AttendanceRecord>,
}

impl RecordBook {
    pub fn new(records: Vec<AttendanceRecord>) -> Self {
        Self { records }
    }

    /// Reads the persisted collection. Absent or malformed data yields an empty book.
    pub fn load(store: &dyn KvStore) -> Self {
        let Some(raw) = store.get(RECORDS_KEY) else {
            return Self::default();
        };

        match serde_json::from_str::<Vec<AttendanceRecord>>(&raw) {
            Ok(records) => Self { records },
            Err(e) => {
                warn!(error = %e, "Persisted attendance records are malformed, starting empty");
                Self::default()
            }
        }
    }

    /// Replaces the persisted collection with this one.
    pub fn save(&self, store: &mut dyn KvStore) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&self.records)?;
        store.set(RECORDS_KEY, encoded)
    }

    /// The record for `name` on `date`, open or closed.
    pub fn find_for_day(&self, name: &str, date: &str) -> Option<&AttendanceRecord> {
        self.records
            .iter()
            .find(|r| r.name == name && r.date == date)
    }

    pub(crate) fn find_for_day_mut(
        &mut self,
        name: &str,
        date: &str,
    ) -> Option<&mut AttendanceRecord> {
        self.records
            .iter_mut()
            .find(|r| r.name == name && r.date == date)
    }

    pub fn find(&self, id: i64) -> Option<&AttendanceRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: i64) -> Option<&mut AttendanceRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// An id derived from `timestamp_ms` that is greater than every id already held.
    pub fn next_id(&self, timestamp_ms: i64) -> i64 {
        match self.records.iter().map(|r| r.id).max() {
            Some(max) if max >= timestamp_ms => max.saturating_add(1),
            _ => timestamp_ms,
        }
    }

    pub(crate) fn prepend(&mut self, record: AttendanceRecord) {
        self.records.insert(0, record);
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
