use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::services::chronotype::{classify_window, Archetype};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub name: String,
    pub is_guest: bool,
    pub guest_token: Option<Uuid>,
    /// Optimal wake window, e.g. "06:30-07:00". Written on questionnaire
    /// completion; last write wins, no history.
    pub chrono_window: Option<String>,
    pub city_lat: Option<f64>,
    pub city_lon: Option<f64>,
    /// Civil-time offset from UTC, supplied by the client.
    pub utc_offset_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile shape returned to clients. The archetype is derived from the
/// stored wake window at response time, never persisted.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub name: String,
    pub is_guest: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrono_window: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archetype: Option<Archetype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_lon: Option<f64>,
    pub utc_offset_minutes: i32,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(u: User) -> Self {
        let archetype = u.chrono_window.as_deref().map(classify_window);
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            is_guest: u.is_guest,
            chrono_window: u.chrono_window,
            archetype,
            city_lat: u.city_lat,
            city_lon: u.city_lon,
            utc_offset_minutes: u.utc_offset_minutes,
            created_at: u.created_at,
        }
    }
}

/// PUT /api/profile/location
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    pub latitude: f64,
    pub longitude: f64,

    /// Offset from UTC in minutes, within ±14 hours.
    #[validate(range(min = -840, max = 840, message = "UTC offset must be within ±14 hours"))]
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[allow(dead_code)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_window(window: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            email: Some("a@example.com".into()),
            password_hash: Some("hash".into()),
            name: "A".into(),
            is_guest: false,
            guest_token: None,
            chrono_window: window.map(String::from),
            city_lat: Some(40.7128),
            city_lon: Some(-74.0060),
            utc_offset_minutes: -240,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_derives_archetype_from_window() {
        let profile: UserProfile = user_with_window(Some("05:30-06:00")).into();
        assert_eq!(profile.archetype, Some(Archetype::Lark));
    }

    #[test]
    fn test_profile_without_window_has_no_archetype() {
        let profile: UserProfile = user_with_window(None).into();
        assert!(profile.archetype.is_none());
        assert!(profile.chrono_window.is_none());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let json = serde_json::to_value(user_with_window(None)).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
