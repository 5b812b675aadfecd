use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use tracing::info;
use utoipa::ToSchema;

use crate::attendance::punch::DATE_FORMAT;
use crate::attendance::records::RecordBook;
use crate::i18n::Messages;
use crate::model::{AttendanceRecord, Status};

/// Written in the clock-out column of an open record.
pub const CLOCK_OUT_PLACEHOLDER: &str = "-";

const UTF8_BOM: char = '\u{FEFF}';

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
    #[default]
    Id,
    Date,
    Name,
    ClockIn,
    ClockOut,
    Status,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue<'a> {
    Int(i64),
    Text(&'a str),
}

fn sort_value(record: &AttendanceRecord, field: SortField) -> Option<SortValue<'_>> {
    match field {
        SortField::Id => Some(SortValue::Int(record.id)),
        SortField::Date => Some(SortValue::Text(&record.date)),
        SortField::Name => Some(SortValue::Text(&record.name)),
        SortField::ClockIn => Some(SortValue::Text(&record.clock_in)),
        SortField::ClockOut => record.clock_out.as_deref().map(SortValue::Text),
        SortField::Status => Some(SortValue::Text(record.status.as_ref())),
    }
}

/// A copy of `records` ordered by `field`. Records without a value for `field` go last
/// in both directions; ties keep their stored order.
pub fn sort_records(
    records: &[AttendanceRecord],
    field: SortField,
    order: SortOrder,
) -> Vec<AttendanceRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| match (sort_value(a, field), sort_value(b, field)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => match order {
            SortOrder::Asc => x.cmp(&y),
            SortOrder::Desc => y.cmp(&x),
        },
    });
    sorted
}

/// Overwrites the status of record `id`. Every transition is allowed.
pub fn set_status(book: &mut RecordBook, id: i64, status: Status) -> Option<AttendanceRecord> {
    let record = book.find_mut(id)?;
    let previous = record.status;
    record.status = status;
    info!(id, from = %previous, to = %status, "Record status set");
    Some(record.clone())
}

/// CSV bytes: BOM, localized header line, then one unescaped row per record.
pub fn export_csv(records: &[AttendanceRecord], labels: &Messages) -> Vec<u8> {
    let header = format!(
        "{},{},{},{},{}\n",
        labels.table_date, labels.table_name, labels.table_in, labels.table_out, labels.table_status
    );
    let rows = records
        .iter()
        .map(|r| {
            format!(
                "{},{},{},{},{}",
                r.date,
                r.name,
                r.clock_in,
                r.clock_out.as_deref().unwrap_or(CLOCK_OUT_PLACEHOLDER),
                r.status
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut csv = String::with_capacity(header.len() + rows.len() + UTF8_BOM.len_utf8());
    csv.push(UTF8_BOM);
    csv.push_str(&header);
    csv.push_str(&rows);
    csv.into_bytes()
}

pub fn csv_filename(today: NaiveDate) -> String {
    format!("attendance_{}.csv", today.format(DATE_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::messages;
    use crate::model::Language;

    fn record(id: i64, date: &str, name: &str, clock_out: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            id,
            date: date.into(),
            name: name.into(),
            clock_in: "09:00:00".into(),
            clock_out: clock_out.map(Into::into),
            status: Status::Pending,
        }
    }

    fn ids(records: &[AttendanceRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    fn sample() -> Vec<AttendanceRecord> {
        vec![
            record(3, "2026-10-19", "Carol", None),
            record(2, "2026-10-18", "alice", Some("17:00:00")),
            record(1, "2026-10-17", "Bob", Some("18:00:00")),
        ]
    }

    #[test]
    fn set_status_accepts_any_transition_and_repeats() {
        let mut book = RecordBook::new(sample());

        for status in [Status::Approved, Status::Rejected, Status::Pending, Status::Pending] {
            let updated = set_status(&mut book, 2, status).unwrap();
            assert_eq!(updated.status, status);
            assert_eq!(book.find(2).unwrap().status, status);
        }
        assert_eq!(book.find(1).unwrap().status, Status::Pending);
    }

    #[test]
    fn set_status_on_unknown_id_changes_nothing() {
        let mut book = RecordBook::new(sample());
        let before = book.clone();
        assert!(set_status(&mut book, 99, Status::Approved).is_none());
        assert_eq!(book, before);
    }

    #[test]
    fn date_order_reverses_with_direction() {
        let records = sample();
        assert_eq!(ids(&sort_records(&records, SortField::Date, SortOrder::Asc)), [1, 2, 3]);
        assert_eq!(ids(&sort_records(&records, SortField::Date, SortOrder::Desc)), [3, 2, 1]);
    }

    #[test]
    fn missing_clock_out_sorts_last_both_ways() {
        let records = sample();
        assert_eq!(ids(&sort_records(&records, SortField::ClockOut, SortOrder::Asc)), [2, 1, 3]);
        assert_eq!(ids(&sort_records(&records, SortField::ClockOut, SortOrder::Desc)), [1, 2, 3]);
    }

    #[test]
    fn names_compare_by_code_point() {
        let records = sample();
        assert_eq!(ids(&sort_records(&records, SortField::Name, SortOrder::Asc)), [1, 3, 2]);
    }

    #[test]
    fn unpadded_legacy_times_sort_as_text() {
        let mut legacy = record(1, "2024-06-10", "Sato", None);
        legacy.clock_in = "9:01:02".into();
        let mut current = record(2, "2026-10-19", "Alice", None);
        current.clock_in = "10:00:00".into();

        let sorted = sort_records(&[legacy, current], SortField::ClockIn, SortOrder::Asc);
        assert_eq!(ids(&sorted), [2, 1]);
    }

    #[test]
    fn default_order_is_newest_first() {
        let mut records = sample();
        records.reverse();
        assert_eq!(
            ids(&sort_records(&records, SortField::default(), SortOrder::default())),
            [3, 2, 1]
        );
    }

    #[test]
    fn csv_has_bom_header_and_one_row_per_record() {
        let records = vec![
            record(2, "2026-10-19", "Alice", None),
            record(1, "2026-10-18", "Bob", Some("18:00:00")),
        ];

        let bytes = export_csv(&records, messages(Language::En));
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            "\u{FEFF}Date,Name,In,Out,Status\n\
             2026-10-19,Alice,09:00:00,-,pending\n\
             2026-10-18,Bob,09:00:00,18:00:00,pending"
        );
    }

    #[test]
    fn csv_does_not_escape_delimiters() {
        let records = vec![record(1, "2026-10-19", "Doe, Jane", None)];
        let text = String::from_utf8(export_csv(&records, messages(Language::En))).unwrap();
        assert!(text.ends_with("2026-10-19,Doe, Jane,09:00:00,-,pending"));
    }

    #[test]
    fn csv_header_follows_language() {
        let text = String::from_utf8(export_csv(&[], messages(Language::Ja))).unwrap();
        assert_eq!(text, "\u{FEFF}日付,社員名,出勤,退勤,状態\n");
    }

    #[test]
    fn filename_carries_the_date() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(csv_filename(day), "attendance_2026-01-05.csv");
    }
}
