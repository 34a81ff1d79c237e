use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::plan::{CompletePlanRequest, LightActivity, Plan, PlanQuery, Weather};
use crate::models::user::User;
use crate::services::recommend::{advice_text, recommend, Recommendation};
use crate::services::solar::{sunrise_local, Location, SunriseEvent};
use crate::AppState;

/// Today's date in the user's civil local time.
fn local_today(utc_offset_minutes: i32) -> NaiveDate {
    (Utc::now() + Duration::minutes(i64::from(utc_offset_minutes))).date_naive()
}

/// Sunrise time and recommendation for one plan day. Polar dates have no
/// sunrise clock time; the fallback keeps the recommendation engine's
/// five-rule ladder untouched.
fn derive_plan_parts(event: SunriseEvent, weather: Weather) -> (Option<NaiveTime>, Recommendation) {
    let recommendation = match event {
        SunriseEvent::Rises(t) => recommend(t, weather),
        SunriseEvent::PolarDay => Recommendation {
            activity: LightActivity::Walk,
            reason: "Sun is above the horizon all day — any outdoor time gives you light".into(),
        },
        SunriseEvent::PolarNight => Recommendation {
            activity: LightActivity::Lightbox,
            reason: "No sunrise today — indoor light therapy recommended".into(),
        },
    };
    (event.time(), recommendation)
}

/// GET /api/plan/tomorrow
///
/// Generates (or regenerates) tomorrow's sunrise plan. The weather sample
/// is drawn once per (user, date) and reused on regeneration; completion
/// state is never touched by the upsert.
pub async fn get_tomorrow_plan(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Plan>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(auth_user.id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    let (lat, lon) = match (user.city_lat, user.city_lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => state.config.default_city.ok_or(AppError::Validation(
            "Set your city location before requesting a sunrise plan".into(),
        ))?,
    };
    let location = Location::new(lat, lon)?;

    let plan_date = local_today(user.utc_offset_minutes) + Duration::days(1);

    let persisted_weather = sqlx::query_scalar::<_, Weather>(
        "SELECT weather FROM plans WHERE user_id = $1 AND plan_date = $2",
    )
    .bind(auth_user.id)
    .bind(plan_date)
    .fetch_optional(&state.db)
    .await?;

    let weather = persisted_weather
        .unwrap_or_else(|| state.weather.sample(plan_date, location));

    let event = sunrise_local(plan_date, location, user.utc_offset_minutes);
    let (sunrise_time, recommendation) = derive_plan_parts(event, weather);
    let advice = advice_text(&recommendation);

    let plan = sqlx::query_as::<_, Plan>(
        r#"
        INSERT INTO plans (id, user_id, plan_date, sunrise_time, weather, recommendation, advice)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (user_id, plan_date) DO UPDATE SET
            sunrise_time = EXCLUDED.sunrise_time,
            weather = EXCLUDED.weather,
            recommendation = EXCLUDED.recommendation,
            advice = EXCLUDED.advice,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(plan_date)
    .bind(sunrise_time)
    .bind(weather)
    .bind(recommendation.activity)
    .bind(&advice)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(plan))
}

/// POST /api/plan/complete
///
/// Marks the plan for a date done. Keyed by (user, date); last write wins,
/// and the flag survives later advice regeneration.
pub async fn complete_plan(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CompletePlanRequest>,
) -> AppResult<Json<Plan>> {
    let plan_date = match body.date {
        Some(date) => date,
        None => {
            let offset = sqlx::query_scalar::<_, i32>(
                "SELECT utc_offset_minutes FROM users WHERE id = $1",
            )
            .bind(auth_user.id)
            .fetch_optional(&state.db)
            .await?
            .ok_or(AppError::NotFound("User not found".into()))?;
            local_today(offset)
        }
    };

    let plan = sqlx::query_as::<_, Plan>(
        r#"
        UPDATE plans SET
            completed = true,
            completed_at = NOW(),
            updated_at = NOW()
        WHERE user_id = $1 AND plan_date = $2
        RETURNING *
        "#,
    )
    .bind(auth_user.id)
    .bind(plan_date)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("No plan for that date".into()))?;

    Ok(Json(plan))
}

/// GET /api/plans
///
/// Plan history for trend browsing, newest first.
pub async fn list_plans(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<PlanQuery>,
) -> AppResult<Json<Vec<Plan>>> {
    let start = query
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive() - Duration::days(30));
    let end = query
        .end_date
        .unwrap_or_else(|| Utc::now().date_naive() + Duration::days(1));

    let plans = sqlx::query_as::<_, Plan>(
        r#"
        SELECT * FROM plans
        WHERE user_id = $1 AND plan_date BETWEEN $2 AND $3
        ORDER BY plan_date DESC
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(plans))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rising_event_goes_through_the_ladder() {
        let t = NaiveTime::from_hms_opt(5, 40, 0).unwrap();
        let (time, rec) = derive_plan_parts(SunriseEvent::Rises(t), Weather::Rainy);
        assert_eq!(time, Some(t));
        assert_eq!(rec, recommend(t, Weather::Rainy));
    }

    #[test]
    fn test_polar_night_falls_back_to_lightbox() {
        let (time, rec) = derive_plan_parts(SunriseEvent::PolarNight, Weather::Sunny);
        assert!(time.is_none());
        assert_eq!(rec.activity, LightActivity::Lightbox);
    }

    #[test]
    fn test_polar_day_falls_back_to_walk() {
        let (time, rec) = derive_plan_parts(SunriseEvent::PolarDay, Weather::Rainy);
        assert!(time.is_none());
        assert_eq!(rec.activity, LightActivity::Walk);
    }
}
