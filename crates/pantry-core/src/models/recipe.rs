//! Recipe model definition and related functionality.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-assigned recipe identifier.
pub type RecipeId = u64;

/// Represents a recipe held by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique identifier assigned by the backend
    pub id: RecipeId,

    /// Display name of the recipe
    pub name: String,

    /// Ingredient lines in the order they were entered
    pub ingredients: Vec<String>,

    /// How much work the recipe takes
    pub effort_level: EffortLevel,
}

impl Recipe {
    /// Case-insensitive substring match against the name or any ingredient.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .ingredients
                .iter()
                .any(|ingredient| ingredient.to_lowercase().contains(needle))
    }
}

/// Coarse preparation effort of a recipe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    /// Quick to make
    #[default]
    Low,

    /// Worth the effort
    Medium,

    /// For special days
    High,
}

impl FromStr for EffortLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(EffortLevel::Low),
            "medium" => Ok(EffortLevel::Medium),
            "high" => Ok(EffortLevel::High),
            _ => Err(format!("Invalid effort level: {s}")),
        }
    }
}

impl EffortLevel {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EffortLevel::Low => "low",
            EffortLevel::Medium => "medium",
            EffortLevel::High => "high",
        }
    }

    /// Label with a short hint, as shown on effort chips.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pantry_core::models::EffortLevel;
    ///
    /// assert_eq!(EffortLevel::Low.with_hint(), "Low (quick)");
    /// assert_eq!(EffortLevel::High.with_hint(), "High (special days only)");
    /// ```
    pub fn with_hint(&self) -> &'static str {
        match self {
            EffortLevel::Low => "Low (quick)",
            EffortLevel::Medium => "Medium (worth the effort)",
            EffortLevel::High => "High (special days only)",
        }
    }
}

/// Split free-form ingredient text on commas and newlines.
///
/// Entries are trimmed and blank entries dropped, so `"rice,, soy sauce\n"`
/// yields `["rice", "soy sauce"]`.
pub fn parse_ingredients(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|ingredient| !ingredient.is_empty())
        .map(ToString::to_string)
        .collect()
}
