use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::metric::{DailyMetric, MetricQuery, MetricSummary, UpsertMetricRequest};
use crate::AppState;

pub async fn upsert_metric(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpsertMetricRequest>,
) -> AppResult<Json<DailyMetric>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if body.reaction_ms.is_none() && body.mood_score.is_none() {
        return Err(AppError::Validation(
            "At least one of reaction_ms or mood_score must be provided".into(),
        ));
    }

    let metric_date = body.metric_date.unwrap_or_else(|| Utc::now().date_naive());

    let metric = sqlx::query_as::<_, DailyMetric>(
        r#"
        INSERT INTO daily_metrics (id, user_id, metric_date, reaction_ms, mood_score)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id, metric_date) DO UPDATE SET
            reaction_ms = COALESCE($4, daily_metrics.reaction_ms),
            mood_score = COALESCE($5, daily_metrics.mood_score),
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(metric_date)
    .bind(body.reaction_ms)
    .bind(body.mood_score)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(metric))
}

pub async fn list_metrics(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<MetricQuery>,
) -> AppResult<Json<Vec<DailyMetric>>> {
    let start = query
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive() - chrono::Duration::days(30));
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());

    let metrics = sqlx::query_as::<_, DailyMetric>(
        r#"
        SELECT * FROM daily_metrics
        WHERE user_id = $1 AND metric_date BETWEEN $2 AND $3
        ORDER BY metric_date DESC
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(metrics))
}

/// GET /api/metrics/summary
///
/// Aggregates over the requested range.
pub async fn metric_summary(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<MetricQuery>,
) -> AppResult<Json<MetricSummary>> {
    let start = query
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive() - chrono::Duration::days(30));
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());

    let summary = sqlx::query_as::<_, MetricSummary>(
        r#"
        SELECT
            COUNT(*) AS days_logged,
            AVG(reaction_ms)::float8 AS avg_reaction_ms,
            MIN(reaction_ms) AS best_reaction_ms,
            AVG(mood_score)::float8 AS avg_mood_score
        FROM daily_metrics
        WHERE user_id = $1 AND metric_date BETWEEN $2 AND $3
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .bind(end)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(summary))
}
