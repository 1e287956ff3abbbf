use std::collections::BTreeMap;

use campusgate_core::{AppError, PaginationMeta};
use campusgate_models::access_logs::{
    AccessAnalytics, AccessLogEntry, AccessLogFilter, AccessLogFilterParams, AccessStatus,
    PaginatedAccessLogsResponse, RoomAccessStats, StatusCount, TimeBucket, TimeFrame,
};
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::users::service::like_pattern;

const ACCESS_LOG_COLUMNS: &str = "id, user_id, room_name, access_status, accessed_at";

/// Every filter is optional; an unset parameter disables its condition.
const ACCESS_LOG_WHERE: &str = r#" WHERE ($1::text IS NULL OR user_id = $1)
   AND ($2::text IS NULL OR room_name ILIKE $2)
   AND ($3::timestamptz IS NULL OR accessed_at >= $3)
   AND ($4::timestamptz IS NULL OR accessed_at < $4)"#;

pub struct AccessLogService;

impl AccessLogService {
    /// Lists access logs matching the filter, newest first.
    #[instrument(skip(db))]
    pub async fn list_logs(
        db: &PgPool,
        params: AccessLogFilterParams,
    ) -> Result<PaginatedAccessLogsResponse, AppError> {
        let filter = &params.filter;
        let room_pattern = filter.room_name.as_deref().map(like_pattern);

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM access_logs{}",
            ACCESS_LOG_WHERE
        ))
        .bind(filter.user_id.as_deref())
        .bind(room_pattern.as_deref())
        .bind(filter.from_timestamp())
        .bind(filter.until_timestamp())
        .fetch_one(db)
        .await?;

        let logs = sqlx::query_as::<_, AccessLogEntry>(&format!(
            "SELECT {} FROM access_logs{} ORDER BY accessed_at DESC, id DESC LIMIT $5 OFFSET $6",
            ACCESS_LOG_COLUMNS, ACCESS_LOG_WHERE
        ))
        .bind(filter.user_id.as_deref())
        .bind(room_pattern.as_deref())
        .bind(filter.from_timestamp())
        .bind(filter.until_timestamp())
        .bind(params.pagination.limit())
        .bind(params.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedAccessLogsResponse {
            data: logs,
            meta: PaginationMeta::new(total, &params.pagination),
        })
    }

    /// Aggregates every log matching the filter.
    #[instrument(skip(db))]
    pub async fn analytics(
        db: &PgPool,
        filter: AccessLogFilter,
        time_frame: TimeFrame,
    ) -> Result<AccessAnalytics, AppError> {
        let room_pattern = filter.room_name.as_deref().map(like_pattern);

        let logs = sqlx::query_as::<_, AccessLogEntry>(&format!(
            "SELECT {} FROM access_logs{} ORDER BY accessed_at ASC",
            ACCESS_LOG_COLUMNS, ACCESS_LOG_WHERE
        ))
        .bind(filter.user_id.as_deref())
        .bind(room_pattern.as_deref())
        .bind(filter.from_timestamp())
        .bind(filter.until_timestamp())
        .fetch_all(db)
        .await?;

        tracing::debug!(count = logs.len(), ?time_frame, "Summarizing access logs");

        Ok(summarize(&logs, time_frame))
    }
}

#[derive(Default)]
struct Tally {
    granted: i64,
    denied: i64,
}

impl Tally {
    fn record(&mut self, status: AccessStatus) {
        match status {
            AccessStatus::Allowed => self.granted += 1,
            AccessStatus::Denied => self.denied += 1,
        }
    }

    fn total(&self) -> i64 {
        self.granted + self.denied
    }
}

/// Counts `logs` by status, by room and by time bucket.
///
/// Rooms are ordered by name and buckets by key; statuses that never occur
/// are left out.
pub fn summarize(logs: &[AccessLogEntry], time_frame: TimeFrame) -> AccessAnalytics {
    let mut overall = Tally::default();
    let mut rooms: BTreeMap<&str, Tally> = BTreeMap::new();
    let mut buckets: BTreeMap<String, Tally> = BTreeMap::new();

    for log in logs {
        overall.record(log.access_status);
        rooms
            .entry(log.room_name.as_str())
            .or_default()
            .record(log.access_status);
        buckets
            .entry(time_frame.bucket_key(log.accessed_at))
            .or_default()
            .record(log.access_status);
    }

    let status_counts = [
        (AccessStatus::Allowed, overall.granted),
        (AccessStatus::Denied, overall.denied),
    ]
    .into_iter()
    .filter(|(_, count)| *count > 0)
    .map(|(status, count)| StatusCount { status, count })
    .collect();

    AccessAnalytics {
        time_frame,
        total: overall.total(),
        status_counts,
        rooms: rooms
            .into_iter()
            .map(|(room, tally)| RoomAccessStats {
                room_name: room.to_string(),
                granted: tally.granted,
                denied: tally.denied,
                total: tally.total(),
            })
            .collect(),
        time_series: buckets
            .into_iter()
            .map(|(date, tally)| TimeBucket {
                date,
                count: tally.total(),
                granted: tally.granted,
                denied: tally.denied,
            })
            .collect(),
    }
}
