//! Recipe picker filtering.
//!
//! The picker narrows the loaded recipe list by a free-text search term and
//! an effort facet. Filtering is pure: it borrows the list and returns the
//! matching recipes in their original order.

use std::str::FromStr;

use super::{EffortLevel, Recipe};

/// Effort facet of the recipe picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffortFilter {
    /// Every effort level passes
    #[default]
    All,

    /// Only recipes with exactly this level pass
    Only(EffortLevel),
}

impl EffortFilter {
    pub fn allows(&self, level: EffortLevel) -> bool {
        match self {
            EffortFilter::All => true,
            EffortFilter::Only(wanted) => *wanted == level,
        }
    }
}

impl FromStr for EffortFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(EffortFilter::All);
        }
        s.parse::<EffortLevel>().map(EffortFilter::Only)
    }
}

impl From<Option<EffortLevel>> for EffortFilter {
    fn from(level: Option<EffortLevel>) -> Self {
        level.map_or(EffortFilter::All, EffortFilter::Only)
    }
}

/// Search term plus effort facet for narrowing a recipe list.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Free-text term matched against names and ingredients
    /// (case-insensitive, surrounding whitespace ignored)
    pub search_term: String,

    /// Effort facet, ANDed with the search term
    pub effort: EffortFilter,
}

impl RecipeFilter {
    pub fn new(search_term: impl Into<String>, effort: EffortFilter) -> Self {
        Self {
            search_term: search_term.into(),
            effort,
        }
    }

    /// True when `recipe` satisfies both the search term and the facet.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let needle = self.search_term.trim().to_lowercase();
        self.matches_with(recipe, &needle)
    }

    fn matches_with(&self, recipe: &Recipe, needle: &str) -> bool {
        self.effort.allows(recipe.effort_level) && (needle.is_empty() || recipe.mentions(needle))
    }

    /// Recipes that pass the filter, in input order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pantry_core::models::{EffortFilter, EffortLevel, Recipe, RecipeFilter};
    ///
    /// let recipes = vec![
    ///     Recipe {
    ///         id: 1,
    ///         name: "Chicken Rice Bowl".to_string(),
    ///         ingredients: vec!["rice".to_string(), "chicken".to_string()],
    ///         effort_level: EffortLevel::Low,
    ///     },
    ///     Recipe {
    ///         id: 2,
    ///         name: "Roast Dinner".to_string(),
    ///         ingredients: vec!["whole chicken".to_string()],
    ///         effort_level: EffortLevel::High,
    ///     },
    /// ];
    ///
    /// let low_chicken = RecipeFilter::new("CHICKEN", EffortFilter::Only(EffortLevel::Low));
    /// let found = low_chicken.apply(&recipes);
    /// assert_eq!(found.len(), 1);
    /// assert_eq!(found[0].id, 1);
    /// ```
    pub fn apply(&self, recipes: &[Recipe]) -> Vec<Recipe> {
        let needle = self.search_term.trim().to_lowercase();
        recipes
            .iter()
            .filter(|recipe| self.matches_with(recipe, &needle))
            .cloned()
            .collect()
    }
}

impl From<&crate::params::SearchRecipes> for RecipeFilter {
    fn from(params: &crate::params::SearchRecipes) -> Self {
        Self {
            search_term: params.term.clone().unwrap_or_default(),
            effort: params.effort.into(),
        }
    }
}

/// Filter `recipes` by search term and effort facet.
///
/// Shorthand for [`RecipeFilter::apply`].
pub fn filter_recipes(recipes: &[Recipe], search_term: &str, effort: EffortFilter) -> Vec<Recipe> {
    RecipeFilter::new(search_term, effort).apply(recipes)
}
