//! Heuristic formatting score for raw resume text

use crate::processing::sections::SectionPresenceMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,4}").expect("Invalid email regex")
});

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\- ]{7,}\d").expect("Invalid phone regex"));

const EMAIL_POINTS: u32 = 30;
const PHONE_POINTS: u32 = 20;
const BULLET_POINTS: u32 = 15;
const SECTION_POINTS: u32 = 5;
const SECTION_POINTS_CAP: u32 = 15;

/// Each signal that contributed to the formatting score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormattingBreakdown {
    pub has_email: bool,
    pub has_phone: bool,
    pub has_bullets: bool,
    /// Mean length of trimmed non-empty lines; `None` when there are no such lines
    pub average_line_length: Option<f64>,
    pub line_length_points: u32,
    pub section_points: u32,
    pub score: u32,
}

impl FormattingBreakdown {
    pub fn zero() -> Self {
        Self {
            has_email: false,
            has_phone: false,
            has_bullets: false,
            average_line_length: None,
            line_length_points: 0,
            section_points: 0,
            score: 0,
        }
    }

    pub fn score_pct(&self) -> f64 {
        f64::from(self.score)
    }
}

pub fn score_formatting(raw_text: &str, sections: &SectionPresenceMap) -> FormattingBreakdown {
    let has_email = EMAIL_REGEX.is_match(raw_text);
    let has_phone = PHONE_REGEX.is_match(raw_text);
    let has_bullets = raw_text.contains('•') || raw_text.contains('-');

    // Indentation is not line length: lines are trimmed before measuring
    let average_line_length = average_line_length(raw_text);
    let line_length_points = match average_line_length {
        Some(avg) if avg < 120.0 => 20,
        Some(avg) if avg < 200.0 => 10,
        _ => 0,
    };

    let section_points = (SECTION_POINTS * sections.present_count() as u32).min(SECTION_POINTS_CAP);

    let mut score = line_length_points + section_points;
    if has_email {
        score += EMAIL_POINTS;
    }
    if has_phone {
        score += PHONE_POINTS;
    }
    if has_bullets {
        score += BULLET_POINTS;
    }

    FormattingBreakdown {
        has_email,
        has_phone,
        has_bullets,
        average_line_length,
        line_length_points,
        section_points,
        score: score.min(100),
    }
}

fn average_line_length(text: &str) -> Option<f64> {
    let lengths: Vec<usize> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().count())
        .collect();

    if lengths.is_empty() {
        return None;
    }

    Some(lengths.iter().sum::<usize>() as f64 / lengths.len() as f64)
}
