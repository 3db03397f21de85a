//! Weekly plan model definition and the client-side recipe join.

use std::collections::HashSet;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{EffortLevel, Recipe, RecipeId};
use crate::dates::Day;

/// Label used when a slot has no recipe or the recipe is unknown.
pub const NO_RECIPE: &str = "No Recipe";

/// One (day, slot) cell of a weekly plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlannerEntry {
    /// Day of the week this entry belongs to
    pub day: Day,

    /// Meal occasion, e.g. `breakfast`, `lunch` or `dinner`
    pub slot: String,

    /// Assigned recipe, `None` when nothing is planned
    pub recipe_id: Option<RecipeId>,
}

/// A week of planner entries as held by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlannerWeek {
    /// First day of the week, normalized to the configured week start
    pub start_date: Date,

    /// Every (day, slot) pair of the week, populated by the server
    #[serde(alias = "days")]
    pub entries: Vec<PlannerEntry>,
}

impl PlannerWeek {
    /// Entries for one day, in server order.
    pub fn entries_for(&self, day: Day) -> impl Iterator<Item = &PlannerEntry> {
        self.entries.iter().filter(move |entry| entry.day == day)
    }

    /// The entry for a (day, slot) pair.
    pub fn entry(&self, day: Day, slot: &str) -> Option<&PlannerEntry> {
        self.entries
            .iter()
            .find(|entry| entry.day == day && entry.slot == slot)
    }

    /// True when no (day, slot) pair appears more than once.
    pub fn has_unique_slots(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.entries.len());
        self.entries
            .iter()
            .all(|entry| seen.insert((entry.day, entry.slot.as_str())))
    }

    /// Number of slots with a recipe assigned.
    pub fn planned_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.recipe_id.is_some())
            .count()
    }
}

/// Name of the recipe with `recipe_id`, or [`NO_RECIPE`].
///
/// # Examples
///
/// ```rust
/// use pantry_core::models::{recipe_name, EffortLevel, Recipe, NO_RECIPE};
///
/// let recipes = vec![Recipe {
///     id: 3,
///     name: "Shakshuka".to_string(),
///     ingredients: vec!["eggs".to_string()],
///     effort_level: EffortLevel::Low,
/// }];
/// assert_eq!(recipe_name(&recipes, Some(3)), "Shakshuka");
/// assert_eq!(recipe_name(&recipes, Some(4)), NO_RECIPE);
/// assert_eq!(recipe_name(&recipes, None), NO_RECIPE);
/// ```
pub fn recipe_name(recipes: &[Recipe], recipe_id: Option<RecipeId>) -> &str {
    recipe_id
        .and_then(|id| recipes.iter().find(|recipe| recipe.id == id))
        .map_or(NO_RECIPE, |recipe| recipe.name.as_str())
}

/// A planner entry joined with the recipe it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMeal {
    pub day: Day,
    pub slot: String,
    pub recipe_id: Option<RecipeId>,
    /// Name of the recipe; `None` if unassigned or missing from the catalog
    pub recipe_name: Option<String>,
    pub effort_level: Option<EffortLevel>,
}

impl PlannedMeal {
    /// Join an entry against the recipe catalog.
    pub fn join(entry: &PlannerEntry, recipes: &[Recipe]) -> Self {
        let recipe = entry
            .recipe_id
            .and_then(|id| recipes.iter().find(|recipe| recipe.id == id));
        Self {
            day: entry.day,
            slot: entry.slot.clone(),
            recipe_id: entry.recipe_id,
            recipe_name: recipe.map(|r| r.name.clone()),
            effort_level: recipe.map(|r| r.effort_level),
        }
    }

    /// Name to show, falling back to [`NO_RECIPE`].
    pub fn label(&self) -> &str {
        self.recipe_name.as_deref().unwrap_or(NO_RECIPE)
    }
}
