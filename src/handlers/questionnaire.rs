use std::collections::HashMap;

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::services::chronotype::{chrono_score, classify_window, wake_window_for_score, Archetype};
use crate::AppState;

/// POST /api/questionnaire
///
/// Answers are keyed by question index 1..=5. Missing or unrecognized
/// codes score as neutral, so a partial submission still produces a
/// window.
#[derive(Debug, Deserialize)]
pub struct SubmitQuestionnaireRequest {
    pub answers: HashMap<u8, String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionnaireResult {
    pub chrono_window: String,
    pub score: i32,
    pub archetype: Archetype,
}

pub async fn submit_questionnaire(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<SubmitQuestionnaireRequest>,
) -> AppResult<Json<QuestionnaireResult>> {
    let score = chrono_score(&body.answers);
    let window = wake_window_for_score(score);

    // Retakes overwrite; no history is kept.
    let updated = sqlx::query(
        "UPDATE users SET chrono_window = $2, updated_at = NOW() WHERE id = $1",
    )
    .bind(auth_user.id)
    .bind(window)
    .execute(&state.db)
    .await?;

    if updated.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    tracing::info!(user_id = %auth_user.id, score = score, window = window, "Questionnaire scored");

    Ok(Json(QuestionnaireResult {
        chrono_window: window.to_string(),
        score,
        archetype: classify_window(window),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serializes_snake_case_archetype() {
        let result = QuestionnaireResult {
            chrono_window: "06:30-07:00".into(),
            score: 15,
            archetype: classify_window("06:30-07:00"),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["chrono_window"], "06:30-07:00");
        assert_eq!(json["score"], 15);
        assert_eq!(json["archetype"], "third_bird");
    }

    #[test]
    fn test_request_accepts_sparse_answer_maps() {
        let body: SubmitQuestionnaireRequest =
            serde_json::from_str(r#"{"answers": {"1": "22:00-23:00", "5": "fairly-alert"}}"#)
                .unwrap();
        assert_eq!(body.answers.len(), 2);
        // Two answered (2 + 2) + three neutral (9) = 13
        assert_eq!(chrono_score(&body.answers), 13);
    }
}
