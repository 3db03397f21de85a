//! Markdown formatting of models and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes are wrapped in small newtypes so each
//! output context gets consistent structure and empty-collection handling.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (Recipe, Week)  │───▶│ & Result Types  │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: [`Recipes`], [`DayPlan`] and [`WeekPlan`]
//! - [`results`]: [`CreateResult`], [`UpdateResult`], [`DeleteResult`]
//! - [`status`]: [`OperationStatus`]
//! - [`dates`]: [`DayHeading`]
//! - [`models`]: Display implementations for domain models
//!
//! # Examples
//!
//! ```rust
//! use pantry_core::{
//!     display::CreateResult,
//!     models::{EffortLevel, Recipe},
//! };
//!
//! let recipe = Recipe {
//!     id: 3,
//!     name: "Shakshuka".to_string(),
//!     ingredients: vec!["eggs".to_string(), "tomatoes".to_string()],
//!     effort_level: EffortLevel::Medium,
//! };
//!
//! let output = CreateResult::new(recipe).to_string();
//! assert!(output.contains("Created recipe with ID: 3"));
//! assert!(output.contains("- tomatoes"));
//! ```

pub mod collections;
pub mod dates;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{DayPlan, Recipes, WeekPlan};
pub use dates::DayHeading;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
