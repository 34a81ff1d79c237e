//! Morning light-exposure recommendation.
//!
//! Given tomorrow's sunrise time and a weather sample, decide between an
//! outdoor walk and a light-therapy box. The rules are an ordered ladder;
//! the first match wins. Weather comes through the `WeatherProvider` trait
//! so a real forecast feed can replace the uniform random placeholder
//! without touching the decision policy.

use chrono::{NaiveDate, NaiveTime, Timelike};
use rand::Rng;
use serde::Serialize;

use crate::models::plan::{LightActivity, Weather};
use crate::services::solar::Location;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Recommendation {
    pub activity: LightActivity,
    pub reason: String,
}

/// Source of a daily weather sample. The default implementation draws
/// uniformly at random; a forecast-API implementation would use the date
/// and location.
pub trait WeatherProvider {
    fn sample(&self, date: NaiveDate, location: Location) -> Weather;
}

/// Placeholder provider until a real weather feed is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomWeather;

impl WeatherProvider for RandomWeather {
    fn sample(&self, _date: NaiveDate, _location: Location) -> Weather {
        match rand::thread_rng().gen_range(0..3) {
            0 => Weather::Sunny,
            1 => Weather::Cloudy,
            _ => Weather::Rainy,
        }
    }
}

/// Decision ladder, first match wins:
/// sunrise before 06:00 → walk; 07:00 or later → lightbox; then rainy →
/// lightbox, cloudy → lightbox; clear mornings with sunrise in [06:00,
/// 07:00) → walk.
pub fn recommend(sunrise_local: NaiveTime, weather: Weather) -> Recommendation {
    let hour = sunrise_local.hour();

    if hour < 6 {
        return Recommendation {
            activity: LightActivity::Walk,
            reason: format!("Early sunrise at {}", sunrise_local.format("%H:%M")),
        };
    }
    if hour >= 7 {
        return Recommendation {
            activity: LightActivity::Lightbox,
            reason: "Late sunrise — indoor light therapy recommended".into(),
        };
    }
    match weather {
        Weather::Rainy => Recommendation {
            activity: LightActivity::Lightbox,
            reason: "Rain predicted — indoor light therapy recommended".into(),
        },
        Weather::Cloudy => Recommendation {
            activity: LightActivity::Lightbox,
            reason: "Cloudy conditions — brighter indoor light recommended".into(),
        },
        Weather::Sunny => Recommendation {
            activity: LightActivity::Walk,
            reason: "Clear morning — perfect for outdoor light exposure".into(),
        },
    }
}

/// Fixed advice template per activity, joined with the reason.
pub fn advice_text(recommendation: &Recommendation) -> String {
    let activity = match recommendation.activity {
        LightActivity::Walk => "15 minute morning walk",
        LightActivity::Lightbox => "20-30 minute light therapy",
    };
    format!("{activity}. {}", recommendation.reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_WEATHER: [Weather; 3] = [Weather::Sunny, Weather::Cloudy, Weather::Rainy];

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    // ── decision ladder ──────────────────────────────────────────────────

    #[test]
    fn test_early_sunrise_always_walk() {
        for weather in ALL_WEATHER {
            let rec = recommend(at(5, 12), weather);
            assert_eq!(rec.activity, LightActivity::Walk);
            assert_eq!(rec.reason, "Early sunrise at 05:12");
        }
    }

    #[test]
    fn test_late_sunrise_always_lightbox() {
        for weather in ALL_WEATHER {
            let rec = recommend(at(7, 0), weather);
            assert_eq!(rec.activity, LightActivity::Lightbox);
            assert_eq!(rec.reason, "Late sunrise — indoor light therapy recommended");
        }
    }

    #[test]
    fn test_mid_window_rainy_is_lightbox() {
        let rec = recommend(at(6, 30), Weather::Rainy);
        assert_eq!(rec.activity, LightActivity::Lightbox);
        assert_eq!(rec.reason, "Rain predicted — indoor light therapy recommended");
    }

    #[test]
    fn test_mid_window_cloudy_is_lightbox() {
        let rec = recommend(at(6, 30), Weather::Cloudy);
        assert_eq!(rec.activity, LightActivity::Lightbox);
        assert_eq!(
            rec.reason,
            "Cloudy conditions — brighter indoor light recommended"
        );
    }

    #[test]
    fn test_mid_window_sunny_is_walk() {
        let rec = recommend(at(6, 59), Weather::Sunny);
        assert_eq!(rec.activity, LightActivity::Walk);
        assert_eq!(rec.reason, "Clear morning — perfect for outdoor light exposure");
    }

    #[test]
    fn test_boundary_just_before_six_is_early() {
        let rec = recommend(at(5, 59), Weather::Rainy);
        assert_eq!(rec.activity, LightActivity::Walk);
    }

    #[test]
    fn test_boundary_six_sharp_falls_to_weather() {
        let rec = recommend(at(6, 0), Weather::Sunny);
        assert_eq!(rec.activity, LightActivity::Walk);
        let rec = recommend(at(6, 0), Weather::Rainy);
        assert_eq!(rec.activity, LightActivity::Lightbox);
    }

    // ── advice templates ─────────────────────────────────────────────────

    #[test]
    fn test_walk_advice_template() {
        let rec = recommend(at(5, 30), Weather::Sunny);
        assert_eq!(advice_text(&rec), "15 minute morning walk. Early sunrise at 05:30");
    }

    #[test]
    fn test_lightbox_advice_template() {
        let rec = recommend(at(7, 45), Weather::Sunny);
        assert_eq!(
            advice_text(&rec),
            "20-30 minute light therapy. Late sunrise — indoor light therapy recommended"
        );
    }

    // ── weather provider ─────────────────────────────────────────────────

    #[test]
    fn test_random_provider_yields_valid_variants() {
        let provider = RandomWeather;
        let date = NaiveDate::from_ymd_opt(2026, 6, 21).unwrap();
        let loc = Location::new(40.7128, -74.0060).unwrap();
        for _ in 0..100 {
            let w = provider.sample(date, loc);
            assert!(ALL_WEATHER.contains(&w));
        }
    }
}
