//! Digital-maturity assessment: six 1–5 ratings, their mean and a maturity
//! level bucketed at 1.5 / 2.5 / 3.5 / 4.5.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const QUESTION_COUNT: usize = 6;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("missing answers: {answered} of {expected} questions answered")]
    MissingAnswers { answered: usize, expected: usize },
    #[error("too many answers: expected {expected}, got {answered}")]
    TooManyAnswers { answered: usize, expected: usize },
    #[error("rating {value} for question {question} is outside 1..=5")]
    OutOfRange { question: usize, value: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Strategy,
    Processes,
    Technology,
    Data,
    Integration,
    People,
}

impl Dimension {
    /// Question order of the questionnaire.
    pub const ALL: [Dimension; QUESTION_COUNT] = [
        Dimension::Strategy,
        Dimension::Processes,
        Dimension::Technology,
        Dimension::Data,
        Dimension::Integration,
        Dimension::People,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Strategy => "Strategy & Vision",
            Dimension::Processes => "Business Processes",
            Dimension::Technology => "Technology & Platform",
            Dimension::Data => "Data & Analytics",
            Dimension::Integration => "Integration",
            Dimension::People => "People & Culture",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaturityLevel {
    pub level: u8,
    pub label: &'static str,
    pub recommendation: &'static str,
}

const LEVELS: [MaturityLevel; 5] = [
    MaturityLevel {
        level: 1,
        label: "Initial",
        recommendation: "Start with a Discover unit to map goals and the current landscape.",
    },
    MaturityLevel {
        level: 2,
        label: "Repeatable",
        recommendation: "Define a target architecture before scaling individual initiatives.",
    },
    MaturityLevel {
        level: 3,
        label: "Defined",
        recommendation: "Standardise integration and extension patterns across teams.",
    },
    MaturityLevel {
        level: 4,
        label: "Managed",
        recommendation: "Invest in data products and measurable platform operations.",
    },
    MaturityLevel {
        level: 5,
        label: "Optimized",
        recommendation: "Keep innovating: automate, measure and share patterns company-wide.",
    },
];

/// Upper bounds (exclusive) of levels 1 to 4; anything above is level 5.
const THRESHOLDS: [f64; 4] = [1.5, 2.5, 3.5, 4.5];

/// Maturity level for a mean rating.
pub fn level_for(mean: f64) -> MaturityLevel {
    let idx = THRESHOLDS.iter().position(|t| mean < *t).unwrap_or(LEVELS.len() - 1);
    LEVELS[idx]
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentInput {
    pub ratings: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPoint {
    pub dimension: Dimension,
    pub label: &'static str,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    pub average: f64,
    pub level: u8,
    pub label: &'static str,
    pub recommendation: &'static str,
    pub radar: Vec<RadarPoint>,
}

/// Score six ratings given in questionnaire order.
///
/// # Examples
/// ```
/// let r = service::assessment::score(&[3, 3, 2, 2, 3, 2]).unwrap();
/// assert_eq!(r.average, 2.5);
/// assert_eq!(r.label, "Defined");
/// ```
pub fn score(ratings: &[u8]) -> Result<AssessmentResult, AssessmentError> {
    if ratings.len() < QUESTION_COUNT {
        return Err(AssessmentError::MissingAnswers { answered: ratings.len(), expected: QUESTION_COUNT });
    }
    if ratings.len() > QUESTION_COUNT {
        return Err(AssessmentError::TooManyAnswers { answered: ratings.len(), expected: QUESTION_COUNT });
    }
    if let Some((i, v)) = ratings.iter().enumerate().find(|(_, v)| !(MIN_RATING..=MAX_RATING).contains(*v)) {
        return Err(AssessmentError::OutOfRange { question: i + 1, value: *v });
    }

    let sum: u32 = ratings.iter().map(|&v| u32::from(v)).sum();
    let average = f64::from(sum) / QUESTION_COUNT as f64;
    let level = level_for(average);
    let radar = Dimension::ALL
        .iter()
        .zip(ratings)
        .map(|(&dimension, &value)| RadarPoint { dimension, label: dimension.label(), value })
        .collect();

    Ok(AssessmentResult {
        average,
        level: level.level,
        label: level.label,
        recommendation: level.recommendation,
        radar,
    })
}
