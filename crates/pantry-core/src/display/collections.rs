//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use jiff::{civil::Date, ToSpan};

use super::dates::DayHeading;
use crate::{
    dates::Day,
    models::{PlannedMeal, PlannerWeek, Recipe},
};

/// Newtype wrapper for displaying a recipe list as compact summaries.
///
/// # Examples
///
/// ```rust
/// use pantry_core::{
///     display::Recipes,
///     models::{EffortLevel, Recipe},
/// };
///
/// let recipes = Recipes(vec![Recipe {
///     id: 1,
///     name: "Chicken Rice Bowl".to_string(),
///     ingredients: vec!["rice".to_string(), "chicken".to_string()],
///     effort_level: EffortLevel::Low,
/// }]);
/// let output = recipes.to_string();
/// assert!(output.contains("## 1. Chicken Rice Bowl (low)"));
/// assert!(output.contains("rice, chicken"));
///
/// assert_eq!(Recipes(vec![]).to_string(), "No recipes found.\n");
/// ```
pub struct Recipes(pub Vec<Recipe>);

impl Recipes {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.0.iter()
    }
}

impl Index<usize> for Recipes {
    type Output = Recipe;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Recipes {
    type Item = Recipe;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Recipes {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Recipes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No recipes found.");
        }
        for recipe in &self.0 {
            writeln!(
                f,
                "## {}. {} ({})",
                recipe.id, recipe.name, recipe.effort_level
            )?;
            writeln!(f)?;
            writeln!(f, "{}", recipe.ingredients.join(", "))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The meal slots of one day, joined with their recipes.
pub struct DayPlan {
    pub date: Date,
    pub meals: Vec<PlannedMeal>,
}

impl DayPlan {
    pub fn new(date: Date, meals: Vec<PlannedMeal>) -> Self {
        Self { date, meals }
    }
}

impl fmt::Display for DayPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", DayHeading(self.date))?;
        writeln!(f)?;
        if self.meals.is_empty() {
            return writeln!(f, "No meal slots for this day.");
        }
        for meal in &self.meals {
            write!(f, "{meal}")?;
        }
        Ok(())
    }
}

/// A whole planner week with recipe names joined in, one section per day.
pub struct WeekPlan<'a> {
    pub week: &'a PlannerWeek,
    pub recipes: &'a [Recipe],
}

impl<'a> WeekPlan<'a> {
    pub fn new(week: &'a PlannerWeek, recipes: &'a [Recipe]) -> Self {
        Self { week, recipes }
    }
}

impl fmt::Display for WeekPlan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Week of {}", DayHeading(self.week.start_date))?;
        writeln!(f)?;
        writeln!(
            f,
            "{} of {} slots planned.",
            self.week.planned_count(),
            self.week.entries.len()
        )?;

        for offset in 0..7i64 {
            let Ok(date) = self.week.start_date.checked_add(offset.days()) else {
                break;
            };
            writeln!(f)?;
            writeln!(f, "## {}", DayHeading(date))?;
            writeln!(f)?;

            let mut any = false;
            for entry in self.week.entries_for(Day::of(date)) {
                write!(f, "{}", PlannedMeal::join(entry, self.recipes))?;
                any = true;
            }
            if !any {
                writeln!(f, "No meal slots.")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::{EffortLevel, PlannerEntry};

    fn week() -> PlannerWeek {
        PlannerWeek {
            start_date: date(2024, 3, 10),
            entries: vec![
                PlannerEntry {
                    day: Day::Thu,
                    slot: "lunch".to_string(),
                    recipe_id: None,
                },
                PlannerEntry {
                    day: Day::Thu,
                    slot: "dinner".to_string(),
                    recipe_id: Some(7),
                },
            ],
        }
    }

    fn recipes() -> Vec<Recipe> {
        vec![Recipe {
            id: 7,
            name: "Tacos".to_string(),
            ingredients: vec!["tortillas".to_string()],
            effort_level: EffortLevel::Medium,
        }]
    }

    #[test]
    fn test_week_plan_lists_every_day() {
        let week = week();
        let recipes = recipes();
        let output = WeekPlan::new(&week, &recipes).to_string();

        assert!(output.starts_with("# Week of Sun Mar 10, 2024\n"));
        assert!(output.contains("1 of 2 slots planned."));
        assert_eq!(output.matches("## ").count(), 7);
        assert!(output.contains(
            "## Thu Mar 14, 2024\n\n- **lunch**: No Recipe\n- **dinner**: Tacos (ID: 7, medium effort)\n"
        ));
        assert_eq!(output.matches("No meal slots.").count(), 6);
    }

    #[test]
    fn test_day_plan_without_slots() {
        let plan = DayPlan::new(date(2024, 3, 14), vec![]);
        assert_eq!(
            plan.to_string(),
            "# Thu Mar 14, 2024\n\nNo meal slots for this day.\n"
        );
    }

    #[test]
    fn test_recipes_collection_accessors() {
        let list = Recipes(recipes());
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Tacos");
        assert!(list.get(1).is_none());
        assert_eq!(list.iter().count(), 1);
    }
}
