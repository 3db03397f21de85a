//! Planner view state.
//!
//! [`PlannerView`] reconciles the server-held week with what the planner
//! screen shows: the selected date, the week derived from it, the meal
//! slots of the selected day, and pending slot edits.
//!
//! ```text
//!            select_date / retry
//!   Idle ──────────────────────▶ Loading ──ok──▶ Ready ◀────────────┐
//!                                   │                │              │
//!                                  err          begin_update     refetch ok
//!                                   ▼                ▼              │
//!                                 Error ◀──err── Updating ──────────┘
//! ```
//!
//! Every transition is an explicit method. Network work is split in two so
//! that callers control when results land:
//!
//! 1. a transition such as [`PlannerView::select_date`] returns a
//!    [`WeekRequest`] (or a [`SlotUpdate`] from [`PlannerView::begin_update`]);
//! 2. the request is run with [`PlannerView::fetch_week`] /
//!    [`PlannerView::send_update`], which only borrow the view;
//! 3. the result is handed back through [`PlannerView::apply_week`] /
//!    [`PlannerView::finish_update`].
//!
//! Each request carries the sequence number current when it was issued.
//! Selecting another week or starting an edit bumps the sequence, so a
//! result that arrives for an abandoned request is dropped instead of
//! overwriting newer state. [`PlannerView::show_date`] and
//! [`PlannerView::assign_slot`] chain the three steps for callers that do
//! not need the control.
//!
//! Selecting a date inside the loaded week never touches the network: the
//! day's entries are re-sliced from the data already held.

use std::fmt;

use jiff::{civil::Date, ToSpan};
use log::debug;
use thiserror::Error;

use crate::{
    client::Pantry,
    dates::{self, Day},
    error::{PantryError, Result},
    models::{PlannedMeal, PlannerEntry, PlannerWeek, Recipe, RecipeId},
    params::UpdateSlot,
};

#[cfg(test)]
mod tests;

/// Which kind of action put the view into [`ViewState::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedAction {
    /// Fetching the week failed
    Load,
    /// Saving a slot edit failed
    Update,
}

impl fmt::Display for FailedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailedAction::Load => "load",
            FailedAction::Update => "update",
        })
    }
}

/// A failure together with whatever was on screen before it.
#[derive(Debug, Error)]
#[error("Failed to {action} the planner week of {week_start}")]
pub struct ViewError {
    pub week_start: Date,
    pub action: FailedAction,
    #[source]
    pub cause: PantryError,
    /// Week displayed before the failure, kept visible for failed edits
    /// and failed refetches
    pub last_good: Option<PlannerWeek>,
}

impl ViewError {
    /// True when there is nothing to show besides the error.
    pub fn is_blocking(&self) -> bool {
        self.last_good.is_none()
    }
}

/// A slot edit waiting for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSlot {
    pub day: Day,
    pub slot: String,
    pub recipe_id: Option<RecipeId>,
}

/// Where the view is in its load and edit cycle.
#[derive(Debug)]
pub enum ViewState {
    /// Nothing requested yet
    Idle,
    /// A week fetch is in flight. A retry of the week on screen keeps the
    /// entries it had
    Loading {
        week_start: Date,
        last_good: Option<PlannerWeek>,
    },
    Ready { week_start: Date, week: PlannerWeek },
    /// An edit is in flight; the previous week stays on screen
    Updating {
        week_start: Date,
        week: PlannerWeek,
        pending: PendingSlot,
    },
    Error(ViewError),
}

impl ViewState {
    /// Week start the state refers to, if any.
    pub fn week_start(&self) -> Option<Date> {
        match self {
            ViewState::Idle => None,
            ViewState::Loading { week_start, .. }
            | ViewState::Ready { week_start, .. }
            | ViewState::Updating { week_start, .. } => Some(*week_start),
            ViewState::Error(error) => Some(error.week_start),
        }
    }

    /// The week currently on screen, if any.
    pub fn displayed_week(&self) -> Option<&PlannerWeek> {
        match self {
            ViewState::Ready { week, .. } | ViewState::Updating { week, .. } => Some(week),
            ViewState::Loading { last_good, .. } => last_good.as_ref(),
            ViewState::Error(error) => error.last_good.as_ref(),
            ViewState::Idle => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading { .. } => "loading",
            ViewState::Ready { .. } => "ready",
            ViewState::Updating { .. } => "updating",
            ViewState::Error(_) => "error",
        }
    }
}

/// A week fetch issued by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a week request does nothing until it is fetched and applied"]
pub struct WeekRequest {
    seq: u64,
    week_start: Date,
}

impl WeekRequest {
    pub fn week_start(&self) -> Date {
        self.week_start
    }
}

/// A slot edit issued by [`PlannerView::begin_update`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a slot update does nothing until it is sent and finished"]
pub struct SlotUpdate {
    seq: u64,
    params: UpdateSlot,
}

impl SlotUpdate {
    pub fn params(&self) -> &UpdateSlot {
        &self.params
    }
}

/// Entries of `week` that belong to the weekday of `date`, in server order.
///
/// An empty result means nothing is configured for that day; it is not an
/// error.
pub fn slice_day(week: &PlannerWeek, date: Date) -> Vec<&PlannerEntry> {
    week.entries_for(Day::of(date)).collect()
}

/// State of the planner screen for one selected date.
pub struct PlannerView {
    pantry: Pantry,
    selected: Date,
    state: ViewState,
    seq: u64,
}

impl PlannerView {
    /// A view in [`ViewState::Idle`] with `selected` as the selected date.
    pub fn new(pantry: Pantry, selected: Date) -> Self {
        Self {
            pantry,
            selected,
            state: ViewState::Idle,
            seq: 0,
        }
    }

    pub fn pantry(&self) -> &Pantry {
        &self.pantry
    }

    pub fn selected_date(&self) -> Date {
        self.selected
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The view itself, or the error it ended up in.
    ///
    /// # Errors
    ///
    /// Returns the [`ViewError`] when the view is in [`ViewState::Error`].
    pub fn settled(self) -> std::result::Result<Self, ViewError> {
        match self.state {
            ViewState::Error(error) => Err(error),
            state => Ok(Self { state, ..self }),
        }
    }

    /// Start of the week containing the selected date.
    pub fn week_start(&self) -> Result<Date> {
        self.pantry.week_start_for(self.selected)
    }

    /// True while a fetch or an edit is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            ViewState::Loading { .. } | ViewState::Updating { .. }
        )
    }

    /// The seven dates of the selected week.
    pub fn week_dates(&self) -> Result<Vec<Date>> {
        dates::week_dates(self.week_start()?)
    }

    /// Entries for the selected day from the week on screen.
    pub fn day_entries(&self) -> Vec<&PlannerEntry> {
        self.state
            .displayed_week()
            .map(|week| slice_day(week, self.selected))
            .unwrap_or_default()
    }

    /// Entries for the selected day joined with their recipes.
    pub fn planned_meals(&self, recipes: &[Recipe]) -> Vec<PlannedMeal> {
        self.day_entries()
            .into_iter()
            .map(|entry| PlannedMeal::join(entry, recipes))
            .collect()
    }

    fn transition(&mut self, state: ViewState) {
        debug!(
            "Planner view {} -> {} (selected {})",
            self.state.name(),
            state.name(),
            self.selected
        );
        self.state = state;
    }

    fn issue(&mut self, week_start: Date) -> WeekRequest {
        self.seq += 1;
        WeekRequest {
            seq: self.seq,
            week_start,
        }
    }

    /// Select a date.
    ///
    /// Returns the fetch to run when the date lies outside the loaded week,
    /// or when nothing usable is loaded. Inside the loaded week only the
    /// selection changes and `None` is returned. Selecting again after an
    /// error always refetches, keeping the entries still on screen when the
    /// date lies in the same week.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::InvalidDate` if the week start cannot be
    /// computed.
    pub fn select_date(&mut self, date: Date) -> Result<Option<WeekRequest>> {
        let week_start = self.pantry.week_start_for(date)?;
        self.selected = date;

        let current = match &self.state {
            ViewState::Loading { week_start, .. }
            | ViewState::Ready { week_start, .. }
            | ViewState::Updating { week_start, .. } => Some(*week_start),
            ViewState::Idle | ViewState::Error(_) => None,
        };
        if current == Some(week_start) {
            debug!("{date} is inside the loaded week {week_start}");
            return Ok(None);
        }

        let last_good = match &self.state {
            ViewState::Error(error) if error.week_start == week_start => error.last_good.clone(),
            _ => None,
        };
        let request = self.issue(week_start);
        self.transition(ViewState::Loading {
            week_start,
            last_good,
        });
        Ok(Some(request))
    }

    /// Move the selection seven days forward.
    pub fn next_week(&mut self) -> Result<Option<WeekRequest>> {
        let date = self.selected.checked_add(7.days())?;
        self.select_date(date)
    }

    /// Move the selection seven days back.
    pub fn previous_week(&mut self) -> Result<Option<WeekRequest>> {
        let date = self.selected.checked_sub(7.days())?;
        self.select_date(date)
    }

    /// Re-issue the fetch for the current week after a failure.
    ///
    /// Returns `None` unless the view is in [`ViewState::Error`].
    pub fn retry(&mut self) -> Option<WeekRequest> {
        let (week_start, last_good) = match &self.state {
            ViewState::Error(error) => (error.week_start, error.last_good.clone()),
            _ => return None,
        };
        let request = self.issue(week_start);
        self.transition(ViewState::Loading {
            week_start,
            last_good,
        });
        Some(request)
    }

    /// Run a week fetch. Only borrows the view; apply the result with
    /// [`PlannerView::apply_week`].
    pub async fn fetch_week(&self, request: &WeekRequest) -> Result<PlannerWeek> {
        self.pantry.get_planner_week(request.week_start).await
    }

    /// Apply the result of a week fetch.
    ///
    /// Returns `false`, leaving the state untouched, when the request has
    /// been superseded by a later selection, retry or edit.
    pub fn apply_week(&mut self, request: WeekRequest, result: Result<PlannerWeek>) -> bool {
        if request.seq != self.seq {
            debug!(
                "Discarding superseded week {} (request {}, current {})",
                request.week_start, request.seq, self.seq
            );
            return false;
        }

        let week_start = request.week_start;
        let next = match result {
            Ok(week) => ViewState::Ready { week_start, week },
            Err(cause) => {
                let last_good = self.state.displayed_week().cloned();
                ViewState::Error(ViewError {
                    week_start,
                    action: FailedAction::Load,
                    cause,
                    last_good,
                })
            }
        };
        self.transition(next);
        true
    }

    /// Fetch and apply in one step.
    pub async fn load(&mut self, request: WeekRequest) -> bool {
        let result = self.fetch_week(&request).await;
        self.apply_week(request, result)
    }

    /// Select a date and, when needed, load its week.
    ///
    /// A failed fetch is recorded in [`ViewState::Error`] rather than
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::InvalidDate` if the week start cannot be
    /// computed.
    pub async fn show_date(&mut self, date: Date) -> Result<()> {
        if let Some(request) = self.select_date(date)? {
            self.load(request).await;
        }
        Ok(())
    }

    /// Start editing one slot of the selected day.
    ///
    /// The week on screen stays visible while the edit is pending. Any fetch
    /// still in flight is superseded.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::InvalidInput` when no week is on screen.
    pub fn begin_update(
        &mut self,
        slot: impl Into<String>,
        recipe_id: Option<RecipeId>,
    ) -> Result<SlotUpdate> {
        let (week_start, week) = match (self.state.week_start(), self.state.displayed_week()) {
            (Some(week_start), Some(week)) => (week_start, week.clone()),
            _ => {
                return Err(PantryError::invalid_input("week")
                    .with_reason("no planner week is loaded to edit"))
            }
        };

        let pending = PendingSlot {
            day: Day::of(self.selected),
            slot: slot.into(),
            recipe_id,
        };
        self.seq += 1;
        let update = SlotUpdate {
            seq: self.seq,
            params: UpdateSlot {
                start_date: week_start,
                day: pending.day,
                slot: pending.slot.clone(),
                recipe_id,
            },
        };
        self.transition(ViewState::Updating {
            week_start,
            week,
            pending,
        });
        Ok(update)
    }

    /// Send a slot edit. Only borrows the view; finish with
    /// [`PlannerView::finish_update`].
    pub async fn send_update(&self, update: &SlotUpdate) -> Result<PlannerWeek> {
        self.pantry.update_planner_slot(&update.params).await
    }

    /// Apply the outcome of a slot edit.
    ///
    /// On success the returned week is not shown directly: the view stays in
    /// [`ViewState::Updating`] and returns the refetch that brings it back to
    /// [`ViewState::Ready`]. On failure the view moves to
    /// [`ViewState::Error`] keeping the previous entries. Outcomes of edits
    /// that were superseded are ignored and yield `None`.
    pub fn finish_update(
        &mut self,
        update: SlotUpdate,
        result: Result<PlannerWeek>,
    ) -> Option<WeekRequest> {
        if update.seq != self.seq {
            debug!(
                "Ignoring outcome of superseded edit of {} {}",
                update.params.day, update.params.slot
            );
            return None;
        }

        let week_start = update.params.start_date;
        match result {
            Ok(_) => Some(self.issue(week_start)),
            Err(cause) => {
                let last_good = self.state.displayed_week().cloned();
                self.transition(ViewState::Error(ViewError {
                    week_start,
                    action: FailedAction::Update,
                    cause,
                    last_good,
                }));
                None
            }
        }
    }

    /// Assign a recipe to a slot of the selected day and refetch the week.
    ///
    /// Backend failures are recorded in [`ViewState::Error`] rather than
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::InvalidInput` when no week is on screen.
    pub async fn assign_slot(
        &mut self,
        slot: impl Into<String>,
        recipe_id: Option<RecipeId>,
    ) -> Result<()> {
        let update = self.begin_update(slot, recipe_id)?;
        let result = self.send_update(&update).await;
        if let Some(refetch) = self.finish_update(update, result) {
            self.load(refetch).await;
        }
        Ok(())
    }

    /// Clear a slot of the selected day. See [`PlannerView::assign_slot`].
    pub async fn clear_slot(&mut self, slot: impl Into<String>) -> Result<()> {
        self.assign_slot(slot, None).await
    }
}
