//! # Compliance Bands
//!
//! Maps a whole-number score onto one of three non-overlapping bands,
//! evaluated high to low with inclusive lower bounds:
//!
//! | Score | Band |
//! |-------|------|
//! | 80–100 | [`ComplianceBand::High`] |
//! | 50–79  | [`ComplianceBand::Moderate`] |
//! | 0–49   | [`ComplianceBand::Critical`] |

use serde::{Deserialize, Serialize};

/// Lowest score in the high-compliance band.
pub const HIGH_THRESHOLD: u8 = 80;

/// Lowest score in the moderate-risk band.
pub const MODERATE_THRESHOLD: u8 = 50;

/// Classification of an overall compliance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceBand {
    /// 80% and above.
    High,
    /// 50% up to 79%.
    Moderate,
    /// Below 50%.
    Critical,
}

impl ComplianceBand {
    /// Classify a percentage. Values above 100 classify as [`Self::High`].
    pub fn from_percent(percent: u8) -> Self {
        if percent >= HIGH_THRESHOLD {
            Self::High
        } else if percent >= MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Critical
        }
    }

    /// Headline shown next to the score.
    pub fn message(&self) -> &'static str {
        match self {
            Self::High => "High Compliance Level",
            Self::Moderate => "Moderate Risk Detected",
            Self::Critical => "Critical Non-Compliance",
        }
    }
}

impl std::fmt::Display for ComplianceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
