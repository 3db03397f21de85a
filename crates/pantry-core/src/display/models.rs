//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so data and presentation stay
//! separate. All output is markdown.

use std::fmt;

use crate::models::{EffortLevel, PlannedMeal, Recipe};

impl fmt::Display for EffortLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;
        writeln!(f, "- Effort: {}", self.effort_level.with_hint())?;
        writeln!(f)?;

        writeln!(f, "## Ingredients")?;
        writeln!(f)?;
        for ingredient in &self.ingredients {
            writeln!(f, "- {ingredient}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PlannedMeal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}**: {}", self.slot, self.label())?;
        match (self.recipe_id, self.effort_level) {
            (Some(id), Some(effort)) => writeln!(f, " (ID: {id}, {effort} effort)"),
            // Points at a recipe that no longer exists
            (Some(id), None) => writeln!(f, " (unknown recipe {id})"),
            _ => writeln!(f),
        }
    }
}
