//! Chronotype questionnaire scoring.
//!
//! Five fixed questions, each answered with a categorical code. Every valid
//! code carries an integer weight in 1..=5; the weights sum to a circadian
//! score in 5..=25 which selects one of five optimal wake windows. Missing
//! or unrecognized answers fall back to the neutral weight instead of
//! erroring, so scoring is total over any input map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Weight substituted for a missing or unrecognized answer code.
const NEUTRAL_WEIGHT: i32 = 3;

/// The five canonical wake windows, earliest first.
pub const WAKE_WINDOWS: [&str; 5] = [
    "05:30-06:00",
    "06:00-06:30",
    "06:30-07:00",
    "07:00-07:30",
    "07:30-08:00",
];

/// Per-question answer weight. Question indices run 1..=5:
/// 1 bedtime preference, 2 wake preference, 3 peak-alertness period,
/// 4 exercise-time preference, 5 post-wake grogginess.
fn answer_weight(question: u8, code: &str) -> i32 {
    let weight = match question {
        1 => match code {
            "before-22:00" => Some(1),
            "22:00-23:00" => Some(2),
            "23:00-00:00" => Some(3),
            "00:00-01:00" => Some(4),
            "after-01:00" => Some(5),
            _ => None,
        },
        2 => match code {
            "before-06:00" => Some(1),
            "06:00-07:00" => Some(2),
            "07:00-08:00" => Some(3),
            "08:00-09:00" => Some(4),
            "after-09:00" => Some(5),
            _ => None,
        },
        3 => match code {
            "early-morning" => Some(1),
            "late-morning" => Some(2),
            "afternoon" => Some(3),
            "early-evening" => Some(4),
            "late-evening" => Some(5),
            _ => None,
        },
        4 => match code {
            "early-morning" => Some(1),
            "morning" => Some(2),
            "midday" => Some(3),
            "evening" => Some(4),
            "night" => Some(5),
            _ => None,
        },
        5 => match code {
            "wide-awake" => Some(1),
            "fairly-alert" => Some(2),
            "fairly-groggy" => Some(4),
            "very-groggy" => Some(5),
            _ => None,
        },
        _ => None,
    };
    weight.unwrap_or(NEUTRAL_WEIGHT)
}

/// Sum of the five per-question weights. Range 5..=25.
pub fn chrono_score(answers: &HashMap<u8, String>) -> i32 {
    (1..=5u8)
        .map(|q| {
            answers
                .get(&q)
                .map(|code| answer_weight(q, code))
                .unwrap_or(NEUTRAL_WEIGHT)
        })
        .sum()
}

/// Monotonic step lookup from score to wake window.
pub fn wake_window_for_score(score: i32) -> &'static str {
    if score <= 8 {
        WAKE_WINDOWS[0]
    } else if score <= 12 {
        WAKE_WINDOWS[1]
    } else if score <= 16 {
        WAKE_WINDOWS[2]
    } else if score <= 20 {
        WAKE_WINDOWS[3]
    } else {
        WAKE_WINDOWS[4]
    }
}

/// Coarse chronotype label derived from a stored wake window.
/// Display-only; never feeds back into scoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Lark,
    ThirdBird,
    Owl,
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Archetype::Lark => write!(f, "Lark"),
            Archetype::ThirdBird => write!(f, "Third Bird"),
            Archetype::Owl => write!(f, "Owl"),
        }
    }
}

/// Inverse lookup from a persisted window string to its archetype.
/// Windows starting 05:xx or exactly 06:00 are Larks; 06:30 and 07:00
/// starts are Third Birds; everything else is an Owl.
pub fn classify_window(window: &str) -> Archetype {
    if window.starts_with("05:") || window.starts_with("06:00") {
        Archetype::Lark
    } else if window.starts_with("06:30") || window.starts_with("07:00") {
        Archetype::ThirdBird
    } else {
        Archetype::Owl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q1: [&str; 5] = ["before-22:00", "22:00-23:00", "23:00-00:00", "00:00-01:00", "after-01:00"];
    const Q2: [&str; 5] = ["before-06:00", "06:00-07:00", "07:00-08:00", "08:00-09:00", "after-09:00"];
    const Q3: [&str; 5] = ["early-morning", "late-morning", "afternoon", "early-evening", "late-evening"];
    const Q4: [&str; 5] = ["early-morning", "morning", "midday", "evening", "night"];
    const Q5: [&str; 4] = ["wide-awake", "fairly-alert", "fairly-groggy", "very-groggy"];

    fn compute_wake_window(answers: &HashMap<u8, String>) -> &'static str {
        wake_window_for_score(chrono_score(answers))
    }

    fn answers(a1: &str, a2: &str, a3: &str, a4: &str, a5: &str) -> HashMap<u8, String> {
        HashMap::from([
            (1, a1.to_string()),
            (2, a2.to_string()),
            (3, a3.to_string()),
            (4, a4.to_string()),
            (5, a5.to_string()),
        ])
    }

    // ── scoring ──────────────────────────────────────────────────────────

    #[test]
    fn test_empty_answers_score_neutral() {
        let empty = HashMap::new();
        assert_eq!(chrono_score(&empty), 15);
        assert_eq!(compute_wake_window(&empty), "06:30-07:00");
    }

    #[test]
    fn test_unknown_codes_score_neutral() {
        let a = answers("whenever", "whenever", "whenever", "whenever", "whenever");
        assert_eq!(chrono_score(&a), 15);
    }

    #[test]
    fn test_extreme_lark() {
        let a = answers(Q1[0], Q2[0], Q3[0], Q4[0], Q5[0]);
        assert_eq!(chrono_score(&a), 5);
        assert_eq!(compute_wake_window(&a), "05:30-06:00");
    }

    #[test]
    fn test_extreme_owl() {
        let a = answers(Q1[4], Q2[4], Q3[4], Q4[4], Q5[3]);
        assert_eq!(chrono_score(&a), 25);
        assert_eq!(compute_wake_window(&a), "07:30-08:00");
    }

    #[test]
    fn test_all_combinations_yield_canonical_windows() {
        // All 5*5*5*5*4 = 2,500 valid answer sets.
        for a1 in Q1 {
            for a2 in Q2 {
                for a3 in Q3 {
                    for a4 in Q4 {
                        for a5 in Q5 {
                            let w = compute_wake_window(&answers(a1, a2, a3, a4, a5));
                            assert!(WAKE_WINDOWS.contains(&w), "unexpected window {w}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_window_lookup_is_monotonic() {
        let mut prev = 0;
        for score in 5..=25 {
            let idx = WAKE_WINDOWS
                .iter()
                .position(|w| *w == wake_window_for_score(score))
                .unwrap();
            assert!(idx >= prev, "window bucket regressed at score {score}");
            prev = idx;
        }
    }

    #[test]
    fn test_raising_one_answer_never_lowers_the_bucket() {
        let base = answers(Q1[2], Q2[2], Q3[2], Q4[2], Q5[1]);
        let base_idx = WAKE_WINDOWS
            .iter()
            .position(|w| *w == compute_wake_window(&base))
            .unwrap();

        for (q, heavier) in [(1u8, Q1[4]), (2, Q2[4]), (3, Q3[4]), (4, Q4[4]), (5, Q5[3])] {
            let mut bumped = base.clone();
            bumped.insert(q, heavier.to_string());
            let idx = WAKE_WINDOWS
                .iter()
                .position(|w| *w == compute_wake_window(&bumped))
                .unwrap();
            assert!(idx >= base_idx, "bucket dropped after raising question {q}");
        }
    }

    #[test]
    fn test_score_breakpoints() {
        assert_eq!(wake_window_for_score(5), "05:30-06:00");
        assert_eq!(wake_window_for_score(8), "05:30-06:00");
        assert_eq!(wake_window_for_score(9), "06:00-06:30");
        assert_eq!(wake_window_for_score(12), "06:00-06:30");
        assert_eq!(wake_window_for_score(13), "06:30-07:00");
        assert_eq!(wake_window_for_score(16), "06:30-07:00");
        assert_eq!(wake_window_for_score(17), "07:00-07:30");
        assert_eq!(wake_window_for_score(20), "07:00-07:30");
        assert_eq!(wake_window_for_score(21), "07:30-08:00");
        assert_eq!(wake_window_for_score(25), "07:30-08:00");
    }

    // ── archetype classification ─────────────────────────────────────────

    #[test]
    fn test_archetype_for_canonical_windows() {
        assert_eq!(classify_window("05:30-06:00"), Archetype::Lark);
        assert_eq!(classify_window("06:00-06:30"), Archetype::Lark);
        assert_eq!(classify_window("06:30-07:00"), Archetype::ThirdBird);
        assert_eq!(classify_window("07:00-07:30"), Archetype::ThirdBird);
        assert_eq!(classify_window("07:30-08:00"), Archetype::Owl);
    }

    #[test]
    fn test_archetype_classification_is_idempotent() {
        for w in WAKE_WINDOWS {
            assert_eq!(classify_window(w), classify_window(w));
        }
    }

    #[test]
    fn test_archetype_display_names() {
        assert_eq!(Archetype::Lark.to_string(), "Lark");
        assert_eq!(Archetype::ThirdBird.to_string(), "Third Bird");
        assert_eq!(Archetype::Owl.to_string(), "Owl");
    }
}
