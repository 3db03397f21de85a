//! Core library for the Pantry meal planner.
//!
//! This crate is the client side of a recipe and weekly meal planning
//! backend: typed access to the REST resources, a keyed query cache with
//! invalidation on mutation, and the planner view state machine that keeps
//! the selected day in step with the server-held week.
//!
//! - [`dates`]: week boundaries and calendar helpers
//! - [`gateway`]: JSON request wrappers over a pluggable [`gateway::Transport`]
//! - [`cache`]: the query cache shared by all store operations
//! - [`client`]: the [`Pantry`] client and its builder
//! - [`view`]: [`PlannerView`], the planner screen state
//! - [`models`]: wire types and the recipe picker filter
//! - [`display`]: markdown formatting of models and results
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jiff::civil::date;
//! use pantry_core::{PantryBuilder, PlannerView};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pantry = PantryBuilder::new()
//!     .with_base_url(Some("http://localhost:8000"))
//!     .build()?;
//!
//! let recipes = pantry.list_recipes().await?;
//!
//! let mut view = PlannerView::new(pantry, date(2024, 3, 14));
//! view.show_date(date(2024, 3, 14)).await?;
//! view.assign_slot("dinner", Some(recipes[0].id)).await?;
//!
//! for meal in view.planned_meals(&recipes) {
//!     println!("{}: {}", meal.slot, meal.label());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod dates;
pub mod display;
pub mod error;
pub mod gateway;
pub mod models;
pub mod params;
pub mod view;

// Re-export commonly used types
pub use cache::{QueryCache, QueryKey, ResourceKind};
pub use client::{Pantry, PantryBuilder};
pub use config::Config;
pub use dates::Day;
pub use display::{
    CreateResult, DayPlan, DeleteResult, OperationStatus, Recipes, UpdateResult, WeekPlan,
};
pub use error::{PantryError, Result};
pub use models::{
    EffortFilter, EffortLevel, HealthStatus, PlannedMeal, PlannerEntry, PlannerWeek, Recipe,
    RecipeFilter, RecipeId,
};
pub use params::{CreateRecipe, EditRecipe, Id, SearchRecipes, UpdateSlot};
pub use view::{PlannerView, ViewState};
