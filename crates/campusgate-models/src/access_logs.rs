//! Access-log models, filters and analytics DTOs.
//!
//! Access logs are written by the door controllers; the API only reads them.

use std::fmt;
use std::str::FromStr;

use campusgate_core::serde::{
    deserialize_optional_date, deserialize_optional_from_str, deserialize_optional_string,
};
use campusgate_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Outcome of an access attempt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum AccessStatus {
    Allowed,
    Denied,
}

impl AccessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessStatus::Allowed => "allowed",
            AccessStatus::Denied => "denied",
        }
    }
}

impl fmt::Display for AccessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessLogError {
    #[error("unknown access status: {0}")]
    UnknownStatus(String),
    #[error("unknown time frame: {0}")]
    UnknownTimeFrame(String),
}

impl FromStr for AccessStatus {
    type Err = AccessLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allowed" => Ok(AccessStatus::Allowed),
            "denied" => Ok(AccessStatus::Denied),
            other => Err(AccessLogError::UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for AccessStatus {
    type Error = AccessLogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One access attempt at a room.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct AccessLogEntry {
    pub id: Uuid,
    /// CMS ID presented at the door
    pub user_id: String,
    pub room_name: String,
    #[sqlx(try_from = "String")]
    pub access_status: AccessStatus,
    #[serde(rename = "timestamp")]
    pub accessed_at: DateTime<Utc>,
}

/// Filters shared by the log list and the analytics endpoint.
///
/// `start_date` and `end_date` are whole UTC days and both inclusive.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct AccessLogFilter {
    /// Exact CMS ID
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub user_id: Option<String>,
    /// Case-insensitive substring of the room name
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub room_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<NaiveDate>,
}

impl AccessLogFilter {
    /// Inclusive lower bound: midnight UTC at the start of `start_date`.
    pub fn from_timestamp(&self) -> Option<DateTime<Utc>> {
        self.start_date
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    /// Exclusive upper bound: midnight UTC after `end_date`.
    pub fn until_timestamp(&self) -> Option<DateTime<Utc>> {
        self.end_date
            .and_then(|date| date.checked_add_days(Days::new(1)))
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct AccessLogFilterParams {
    #[serde(flatten)]
    pub filter: AccessLogFilter,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated response containing access logs, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedAccessLogsResponse {
    pub data: Vec<AccessLogEntry>,
    pub meta: PaginationMeta,
}

/// Bucket width for the analytics time series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    #[default]
    #[serde(alias = "all")]
    Daily,
    Weekly,
    Monthly,
}

impl FromStr for TimeFrame {
    type Err = AccessLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" | "all" => Ok(TimeFrame::Daily),
            "weekly" => Ok(TimeFrame::Weekly),
            "monthly" => Ok(TimeFrame::Monthly),
            other => Err(AccessLogError::UnknownTimeFrame(other.to_string())),
        }
    }
}

impl TimeFrame {
    /// Bucket key for `timestamp`, in UTC.
    ///
    /// - daily: `2025-03-07`
    /// - weekly: `2025-W3-2` (year, month, `day / 7 + 1`)
    /// - monthly: `2025-3`
    pub fn bucket_key(&self, timestamp: DateTime<Utc>) -> String {
        match self {
            TimeFrame::Daily => timestamp.format("%Y-%m-%d").to_string(),
            TimeFrame::Weekly => format!(
                "{}-W{}-{}",
                timestamp.year(),
                timestamp.month(),
                timestamp.day() / 7 + 1
            ),
            TimeFrame::Monthly => format!("{}-{}", timestamp.year(), timestamp.month()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct AnalyticsParams {
    #[serde(flatten)]
    pub filter: AccessLogFilter,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub time_frame: Option<TimeFrame>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: AccessStatus,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoomAccessStats {
    pub room_name: String,
    pub granted: i64,
    pub denied: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeBucket {
    pub date: String,
    pub count: i64,
    pub granted: i64,
    pub denied: i64,
}

/// Aggregated view of the filtered access logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccessAnalytics {
    pub time_frame: TimeFrame,
    pub total: i64,
    pub status_counts: Vec<StatusCount>,
    /// Sorted by room name
    pub rooms: Vec<RoomAccessStats>,
    /// Sorted by bucket key
    pub time_series: Vec<TimeBucket>,
}
