use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// One punch row: a clock-in and an optional clock-out for one employee on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1760860800000i64,
        "date": "2026-10-19",
        "name": "Alice",
        "clockIn": "09:00:12",
        "clockOut": null,
        "status": "pending"
    })
)]
pub struct AttendanceRecord {
    /// Creation timestamp in epoch milliseconds, bumped when it would collide.
    #[schema(example = 1760860800000i64)]
    pub id: i64,

    #[schema(example = "2026-10-19", format = Date)]
    pub date: String,

    #[schema(example = "Alice")]
    pub name: String,

    #[schema(example = "09:00:12")]
    pub clock_in: String,

    #[serde(default)]
    #[schema(example = "18:02:45")]
    pub clock_out: Option<String>,

    #[serde(default)]
    pub status: Status,
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Approved,
    Rejected,
}
