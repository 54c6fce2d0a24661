//! Score tiers and the cosmetic sub-score breakdown shown in the detail panel.

/// Color band for a compliance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Good,
    Warning,
    Critical,
}

pub const GOOD_THRESHOLD: u32 = 800;
pub const WARNING_THRESHOLD: u32 = 600;

impl ScoreTier {
    pub fn for_score(score: u32) -> Self {
        if score >= GOOD_THRESHOLD {
            ScoreTier::Good
        } else if score >= WARNING_THRESHOLD {
            ScoreTier::Warning
        } else {
            ScoreTier::Critical
        }
    }

    /// Hex color used for text, markers and tag borders.
    pub fn color(&self) -> &'static str {
        match self {
            ScoreTier::Good => "#00ff9d",
            ScoreTier::Warning => "#ffcc00",
            ScoreTier::Critical => "#ff4d4d",
        }
    }
}

/// Shorthand for `ScoreTier::for_score(score).color()`.
pub fn score_color(score: u32) -> &'static str {
    ScoreTier::for_score(score).color()
}

/// Seeded compliance score: a fixed base plus the id folded into a 300-point band.
pub fn compliance_score(seed: u64) -> u32 {
    650 + (seed % 300) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubScore {
    pub label: &'static str,
    pub value: u32,
    pub max: u32,
}

/// (label, fraction of total, displayed maximum)
const BREAKDOWN: [(&str, f64, u32); 4] = [
    ("LEGAL", 0.12, 100),
    ("FINANCE", 0.15, 150),
    ("HEALTH", 0.1, 100),
    ("EDU", 0.14, 150),
];

/// Derive the four detail-panel metrics from the total score.
///
/// These are fixed fractions of the total, not independently sourced data.
pub fn breakdown(total_score: u32) -> [SubScore; 4] {
    BREAKDOWN.map(|(label, fraction, max)| SubScore {
        label,
        value: (total_score as f64 * fraction).floor() as u32,
        max,
    })
}
