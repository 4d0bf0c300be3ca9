//! # Assessment Categories
//!
//! Defines the `Category` enum, the one definition of questionnaire
//! categories used across the workspace. Every `match` on `Category` is
//! exhaustive, so adding a category forces the scorer, the report renderer
//! and the CLI to handle it at compile time.
//!
//! Ordering follows declaration order. Risks are reported category by
//! category in this order, and `BTreeMap<Category, _>` iteration matches it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PopiaError;

/// Total number of assessment categories.
pub const CATEGORY_COUNT: usize = 2;

/// A questionnaire category, mapped to a chapter of the Act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Chapter 8: direct marketing, opt-out handling and security of contact data.
    Security,
    /// Chapter 11: offences such as obstruction of the Regulator or false evidence.
    Offences,
}

impl Category {
    /// All categories in reporting order.
    pub const ALL: [Category; CATEGORY_COUNT] = [Category::Security, Category::Offences];

    /// Returns the snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Offences => "offences",
        }
    }

    /// Human-readable title used in reports.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Security => "Chapter 8 (Security & Marketing)",
            Self::Offences => "Chapter 11 (Offences)",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PopiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "security" => Ok(Self::Security),
            "offences" | "offenses" => Ok(Self::Offences),
            _ => Err(PopiaError::UnknownCategory(s.to_string())),
        }
    }
}
