//! Presentation helpers shared by the report formatters

use crate::processing::analyzer::AtsReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=100 => ScoreBand::Excellent,
            65..=79 => ScoreBand::Good,
            50..=64 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::Poor => "Poor",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Likely to pass most ATS filters",
            ScoreBand::Good => "Should pass many ATS filters with minor changes",
            ScoreBand::Fair => "At risk of being filtered out; address the suggestions below",
            ScoreBand::Poor => "Unlikely to pass ATS screening in its current form",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "score-excellent",
            ScoreBand::Good => "score-good",
            ScoreBand::Fair => "score-fair",
            ScoreBand::Poor => "score-poor",
        }
    }
}

/// One line of the score breakdown table
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRow {
    pub label: &'static str,
    pub pct: f64,
    /// `None` when the component is shown but not weighted
    pub weight: Option<f64>,
}

impl ComponentRow {
    pub fn weight_label(&self) -> String {
        match self.weight {
            Some(weight) => format!("{:.0}%", weight * 100.0),
            None => "not scored".to_string(),
        }
    }
}

pub fn component_rows(report: &AtsReport) -> Vec<ComponentRow> {
    vec![
        ComponentRow {
            label: "Skills match",
            pct: report.skills_pct,
            weight: Some(report.weights.skills),
        },
        ComponentRow {
            label: "Keyword match",
            pct: report.keywords_pct,
            weight: report.weights.keywords,
        },
        ComponentRow {
            label: "Formatting",
            pct: report.formatting_pct,
            weight: Some(report.weights.formatting),
        },
        ComponentRow {
            label: "Section completeness",
            pct: report.sections_pct,
            weight: Some(report.weights.sections),
        },
    ]
}

/// Number of keywords listed before the rest are summarised
pub const KEYWORD_SAMPLE: usize = 20;
/// Number of missing job keywords shown as recommended skills
pub const MISSING_SAMPLE: usize = 40;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(50), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Poor);
    }

    #[test]
    fn test_weight_label() {
        let row = ComponentRow {
            label: "Keyword match",
            pct: 50.0,
            weight: None,
        };
        assert_eq!(row.weight_label(), "not scored");
        let row = ComponentRow { weight: Some(0.15), ..row };
        assert_eq!(row.weight_label(), "15%");
    }
}
