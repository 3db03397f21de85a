//! Planner week operations for the Pantry client.

use jiff::civil::Date;
use log::{info, warn};

use super::Pantry;
use crate::{
    cache::QueryKey,
    dates::{self, format_iso},
    error::{PantryError, Result},
    models::PlannerWeek,
    params::UpdateSlot,
};

impl Pantry {
    /// Fetches the plan for the week starting at `start_date`.
    ///
    /// The backend fills in every (day, slot) pair, so the returned week is
    /// complete even if nothing has been planned yet.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::InvalidInput` without sending anything when
    /// `start_date` is not on the configured first day of the week. Use
    /// [`Pantry::week_start_for`] or [`Pantry::get_week_containing`] to
    /// normalize first.
    pub async fn get_planner_week(&self, start_date: Date) -> Result<PlannerWeek> {
        self.ensure_week_start(start_date)?;

        let gateway = &self.gateway;
        let path = format!("/planner/week?startDate={}", format_iso(start_date));
        let week: PlannerWeek = self
            .cache
            .query(QueryKey::planner_week(start_date), || gateway.get(&path))
            .await?;

        if !week.has_unique_slots() {
            warn!("Planner week {start_date} contains duplicate (day, slot) pairs");
        }
        Ok(week)
    }

    /// Fetches the plan for the week that contains `date`.
    pub async fn get_week_containing(&self, date: Date) -> Result<PlannerWeek> {
        let start = self.week_start_for(date)?;
        self.get_planner_week(start).await
    }

    /// Assigns a recipe to one (day, slot) of a week, or clears it when
    /// `recipe_id` is `None`.
    ///
    /// Returns the week as the server holds it after the change. The cached
    /// entry for that week is invalidated rather than overwritten, so the
    /// next [`Pantry::get_planner_week`] refetches; other weeks are left
    /// alone.
    pub async fn update_planner_slot(&self, params: &UpdateSlot) -> Result<PlannerWeek> {
        self.ensure_week_start(params.start_date)?;
        if params.slot.trim().is_empty() {
            return Err(PantryError::invalid_input("slot").with_reason("must not be empty"));
        }

        let week: PlannerWeek = self.gateway.post("/planner/week/slot", params).await?;
        self.cache
            .invalidate(&QueryKey::planner_week(params.start_date));

        match params.recipe_id {
            Some(id) => info!(
                "Planned recipe {id} for {} {} of week {}",
                params.day, params.slot, params.start_date
            ),
            None => info!(
                "Cleared {} {} of week {}",
                params.day, params.slot, params.start_date
            ),
        }
        Ok(week)
    }

    fn ensure_week_start(&self, start_date: Date) -> Result<()> {
        let first_day = self.config.first_day_of_week;
        if dates::is_week_start(start_date, first_day) {
            return Ok(());
        }
        Err(PantryError::invalid_input("startDate").with_reason(format!(
            "{start_date} is not a {}; weeks start on {}",
            first_day.label(),
            first_day.label()
        )))
    }
}
