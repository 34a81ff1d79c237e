use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "weather_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sunny,
    Cloudy,
    Rainy,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "light_activity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LightActivity {
    Walk,
    Lightbox,
}

/// One day's sunrise plan. `sunrise_time` is NULL on polar day/night dates.
/// Completion state is keyed by (user_id, plan_date) and survives advice
/// regeneration.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_date: NaiveDate,
    pub sunrise_time: Option<NaiveTime>,
    pub weather: Weather,
    pub recommendation: LightActivity,
    pub advice: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// POST /api/plan/complete
#[derive(Debug, Deserialize)]
pub struct CompletePlanRequest {
    /// Date of the plan to mark complete. Default: today in the user's
    /// local time.
    pub date: Option<NaiveDate>,
}

/// GET /api/plans query params
#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
