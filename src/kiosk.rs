//! The kiosk's whole in-process state and the operations the HTTP layer drives.

use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::attendance::gate::{GateState, ScanOutcome, VerificationGate};
use crate::attendance::punch::{PunchKind, punch};
use crate::attendance::records::RecordBook;
use crate::attendance::review::{self, SortField, SortOrder};
use crate::clock::Clock;
use crate::error::AppError;
use crate::i18n::messages;
use crate::model::language::LANG_KEY;
use crate::model::{AttendanceRecord, Language, Status};
use crate::scanner::ScanSource;
use crate::storage::{KvStore, StorageError};

pub struct Kiosk {
    store: Box<dyn KvStore + Send>,
    clock: Box<dyn Clock>,
    records: RecordBook,
    language: Language,
    gate: VerificationGate,
    employee_name: String,
}

impl Kiosk {
    /// Loads the language preference and the record collection from `store`.
    pub fn open(store: Box<dyn KvStore + Send>, clock: Box<dyn Clock>) -> Self {
        let language = match store.get(LANG_KEY) {
            Some(raw) => Language::from_str(&raw).unwrap_or_else(|_| {
                warn!(value = %raw, "Unknown stored language, using default");
                Language::default()
            }),
            None => Language::default(),
        };
        let records = RecordBook::load(&*store);

        info!(%language, records = records.len(), "Kiosk state loaded");

        Self {
            store,
            clock,
            records,
            language,
            gate: VerificationGate::new(),
            employee_name: String::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), StorageError> {
        self.store.set(LANG_KEY, language.to_string())?;
        self.language = language;
        Ok(())
    }

    pub fn employee_name(&self) -> &str {
        &self.employee_name
    }

    /// Edits the name field; a changed value revokes a pending verification.
    pub fn set_employee_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name != self.employee_name {
            self.employee_name = name;
            self.gate.name_changed();
        }
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn scan(&mut self, source: &mut dyn ScanSource) -> Result<ScanOutcome, AppError> {
        let outcome = self.gate.scan(source)?;
        debug!(?outcome, "Scan finished");
        Ok(outcome)
    }

    /// Punches for the current name field. The collection is replaced only once the
    /// updated copy has been persisted.
    pub fn punch(&mut self, kind: PunchKind) -> Result<AttendanceRecord, AppError> {
        let mut next = self.records.clone();
        let now = self.clock.now();
        let record = punch(kind, &self.employee_name, &mut self.gate, &mut next, now)?;

        next.save(&mut *self.store)?;
        self.records = next;
        Ok(record)
    }

    pub fn set_status(&mut self, id: i64, status: Status) -> Result<AttendanceRecord, AppError> {
        let mut next = self.records.clone();
        let record = review::set_status(&mut next, id, status).ok_or(AppError::RecordNotFound(id))?;

        next.save(&mut *self.store)?;
        self.records = next;
        Ok(record)
    }

    pub fn records(&self) -> &RecordBook {
        &self.records
    }

    pub fn sorted_records(&self, field: SortField, order: SortOrder) -> Vec<AttendanceRecord> {
        review::sort_records(self.records.records(), field, order)
    }

    /// The export file name and its bytes, rows in the requested order.
    pub fn export_csv(&self, field: SortField, order: SortOrder) -> (String, Vec<u8>) {
        let rows = self.sorted_records(field, order);
        let bytes = review::export_csv(&rows, messages(self.language));
        (review::csv_filename(self.today()), bytes)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }
}

/// Shared handle to the kiosk; every operation runs under one lock.
pub struct AppContext {
    kiosk: Mutex<Kiosk>,
}

impl AppContext {
    pub fn new(kiosk: Kiosk) -> Self {
        Self {
            kiosk: Mutex::new(kiosk),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, Kiosk> {
        self.kiosk.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
