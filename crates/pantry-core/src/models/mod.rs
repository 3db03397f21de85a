//! Data models for recipes and weekly plans.
//!
//! These types mirror the JSON payloads of the backend REST surface. Field
//! names are camelCase on the wire (`effortLevel`, `startDate`, `recipeId`)
//! and snake_case in Rust. Display implementations live in
//! [`crate::display::models`] so that data and presentation stay apart.
//!
//! The planner week uses the minimal wire shape: each entry carries only a
//! nullable `recipeId`. Names and effort levels for display are joined on the
//! client from the recipe list, see [`PlannedMeal`].
//!
//! # Examples
//!
//! ```rust
//! use pantry_core::models::{EffortLevel, Recipe};
//!
//! let recipe: Recipe = serde_json::from_str(
//!     r#"{"id": 1, "name": "Rice Bowl", "ingredients": ["rice"], "effortLevel": "low"}"#,
//! )
//! .unwrap();
//! assert_eq!(recipe.effort_level, EffortLevel::Low);
//! ```

pub mod filters;
pub mod health;
pub mod planner;
pub mod recipe;


pub use filters::{filter_recipes, EffortFilter, RecipeFilter};
pub use health::HealthStatus;
pub use planner::{recipe_name, PlannedMeal, PlannerEntry, PlannerWeek, NO_RECIPE};
pub use recipe::{parse_ingredients, EffortLevel, Recipe, RecipeId};
