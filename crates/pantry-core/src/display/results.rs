//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use super::collections::DayPlan;
use crate::models::Recipe;

/// Outcome of a create operation: a confirmation line and the created
/// resource.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Recipe> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created recipe with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of an update operation, optionally listing what changed.
///
/// # Examples
///
/// ```rust
/// use pantry_core::{
///     display::UpdateResult,
///     models::{EffortLevel, Recipe},
/// };
///
/// let recipe = Recipe {
///     id: 2,
///     name: "Roast Dinner".to_string(),
///     ingredients: vec!["whole chicken".to_string()],
///     effort_level: EffortLevel::High,
/// };
/// let result = UpdateResult::with_changes(recipe, vec!["Effort set to high".to_string()]);
/// assert!(result.to_string().contains("- Effort set to high"));
/// ```
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn fmt_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for UpdateResult<Recipe> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated recipe with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<DayPlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated plan for {}", self.resource.date)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of a delete operation, naming what was removed.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Recipe> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted recipe '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}
