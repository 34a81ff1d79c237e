use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// One day's self-reported metrics: a reaction-time test result and a
/// 1-5 alertness/mood rating. One row per (user, date).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyMetric {
    pub id: Uuid,
    pub user_id: Uuid,
    pub metric_date: NaiveDate,
    pub reaction_ms: Option<i32>,
    pub mood_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// POST /api/metrics
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertMetricRequest {
    /// Default: today in the user's local time.
    pub metric_date: Option<NaiveDate>,

    #[validate(range(min = 1, max = 60000, message = "Reaction time must be 1-60000 ms"))]
    pub reaction_ms: Option<i32>,

    #[validate(range(min = 1, max = 5, message = "Mood score must be 1-5"))]
    pub mood_score: Option<i32>,
}

/// GET /api/metrics query params
#[derive(Debug, Deserialize)]
pub struct MetricQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// GET /api/metrics/summary
#[derive(Debug, Serialize, FromRow)]
pub struct MetricSummary {
    pub days_logged: i64,
    pub avg_reaction_ms: Option<f64>,
    pub best_reaction_ms: Option<i32>,
    pub avg_mood_score: Option<f64>,
}
