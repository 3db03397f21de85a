//! Typed access to the recipe and planner resources.
//!
//! [`Pantry`] is the one entry point for backend data. It owns the
//! [`ApiGateway`] and a shared [`QueryCache`] and exposes the store
//! operations, split across submodules by resource:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  PlannerView /  │    │     Pantry      │    │   ApiGateway    │
//! │      CLI        │───▶│ (recipe_ops,    │───▶│  + Transport    │
//! │                 │    │  planner_ops)   │    │                 │
//! └─────────────────┘    └────────┬────────┘    └─────────────────┘
//!                                 │
//!                         ┌───────▼────────┐
//!                         │   QueryCache   │
//!                         └────────────────┘
//! ```
//!
//! - [`builder`]: configuration and construction of [`Pantry`] instances
//! - [`recipe_ops`]: list, get, create, edit, delete and search recipes
//! - [`planner_ops`]: fetch a week and update one of its slots
//!
//! Reads go through the cache. Mutations never write into the cache: on
//! success they invalidate the affected entries so the next read refetches.
//!
//! # Usage
//!
//! ```rust,no_run
//! use jiff::civil::date;
//! use pantry_core::{dates::Day, params::UpdateSlot, PantryBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pantry = PantryBuilder::new()
//!     .with_base_url(Some("http://localhost:8000"))
//!     .build()?;
//!
//! let start = pantry.week_start_for(date(2024, 3, 14))?;
//! pantry
//!     .update_planner_slot(&UpdateSlot {
//!         start_date: start,
//!         day: Day::Thu,
//!         slot: "dinner".to_string(),
//!         recipe_id: Some(7),
//!     })
//!     .await?;
//!
//! let week = pantry.get_planner_week(start).await?;
//! assert_eq!(week.entry(Day::Thu, "dinner").unwrap().recipe_id, Some(7));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use jiff::civil::Date;

use crate::{
    cache::QueryCache, config::Config, dates, error::Result, gateway::ApiGateway,
    models::HealthStatus,
};

pub mod builder;
pub mod planner_ops;
pub mod recipe_ops;


pub use builder::PantryBuilder;

/// Client for the recipe and planner backend.
///
/// Cloning is cheap; clones share the gateway and the cache.
#[derive(Clone)]
pub struct Pantry {
    pub(crate) gateway: ApiGateway,
    pub(crate) cache: Arc<QueryCache>,
    pub(crate) config: Config,
}

impl Pantry {
    pub(crate) fn new(gateway: ApiGateway, cache: Arc<QueryCache>, config: Config) -> Self {
        Self {
            gateway,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The cache shared by every clone of this client.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Start of the planner week containing `date`, per configuration.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::InvalidDate` at the edge of the calendar range.
    pub fn week_start_for(&self, date: Date) -> Result<Date> {
        dates::week_start(date, self.config.first_day_of_week)
    }

    /// Backend liveness probe. Never cached.
    pub async fn health(&self) -> Result<HealthStatus> {
        self.gateway.get("/health").await
    }
}
