//! Tests for the planner view state machine.
//!
//! Results are handed to the view directly, so no request is ever sent.

use std::sync::Arc;

use jiff::civil::date;
use proptest::prelude::*;

use super::*;
use crate::{
    client::PantryBuilder,
    gateway::{ApiRequest, ApiResponse, Transport},
    models::{EffortLevel, NO_RECIPE},
};

struct Offline;

#[async_trait::async_trait]
impl Transport for Offline {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        Err(PantryError::Network {
            url: request.path,
            reason: "offline".to_string(),
        })
    }
}

fn view(selected: Date) -> PlannerView {
    let pantry = PantryBuilder::new()
        .with_base_url(Some("http://localhost:8000"))
        .with_first_day_of_week(Some(Day::Sun))
        .with_transport(Arc::new(Offline))
        .build()
        .unwrap();
    PlannerView::new(pantry, selected)
}

fn week(start: Date, thu_dinner: Option<RecipeId>) -> PlannerWeek {
    let entries = Day::ALL
        .iter()
        .flat_map(|day| {
            ["breakfast", "dinner"].map(|slot| PlannerEntry {
                day: *day,
                slot: slot.to_string(),
                recipe_id: (*day == Day::Thu && slot == "dinner")
                    .then_some(thu_dinner)
                    .flatten(),
            })
        })
        .collect();
    PlannerWeek {
        start_date: start,
        entries,
    }
}

fn server_error() -> PantryError {
    PantryError::http(500).with_body("boom")
}

fn ready(selected: Date, thu_dinner: Option<RecipeId>) -> PlannerView {
    let mut view = view(selected);
    let request = view.select_date(selected).unwrap().unwrap();
    assert!(view.apply_week(request, Ok(week(request.week_start(), thu_dinner))));
    view
}

#[test]
fn test_select_date_derives_week_start() {
    let mut view = view(date(2024, 3, 14));
    assert!(matches!(view.state(), ViewState::Idle));

    let request = view.select_date(date(2024, 3, 14)).unwrap().unwrap();
    assert_eq!(request.week_start(), date(2024, 3, 10));
    assert!(matches!(
        view.state(),
        ViewState::Loading { week_start, last_good: None } if *week_start == date(2024, 3, 10)
    ));
    assert!(view.is_busy());
    assert!(view.day_entries().is_empty());
}

#[test]
fn test_ready_slices_selected_day() {
    let view = ready(date(2024, 3, 14), Some(7));
    assert!(matches!(view.state(), ViewState::Ready { .. }));
    assert!(!view.is_busy());

    let entries = view.day_entries();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| entry.day == Day::Thu));
    assert_eq!(entries[1].recipe_id, Some(7));
}

#[test]
fn test_same_week_selection_reslices_without_fetch() {
    let mut view = ready(date(2024, 3, 14), Some(7));

    // Saturday of the same Sunday-started week
    assert!(view.select_date(date(2024, 3, 16)).unwrap().is_none());
    assert!(matches!(view.state(), ViewState::Ready { .. }));
    assert_eq!(view.selected_date(), date(2024, 3, 16));
    assert!(view.day_entries().iter().all(|entry| entry.day == Day::Sat));
}

#[test]
fn test_abandoned_fetch_is_discarded() {
    let mut view = view(date(2024, 3, 14));
    let first = view.select_date(date(2024, 3, 14)).unwrap().unwrap();
    let second = view.select_date(date(2024, 3, 21)).unwrap().unwrap();
    assert_eq!(second.week_start(), date(2024, 3, 17));

    assert!(view.apply_week(second, Ok(week(date(2024, 3, 17), None))));
    assert!(!view.apply_week(first, Ok(week(date(2024, 3, 10), Some(7)))));
    assert_eq!(view.state().week_start(), Some(date(2024, 3, 17)));
}

#[test]
fn test_successful_edit_refetches() {
    let mut view = ready(date(2024, 3, 14), None);

    let update = view.begin_update("dinner", Some(7)).unwrap();
    assert_eq!(
        update.params(),
        &UpdateSlot {
            start_date: date(2024, 3, 10),
            day: Day::Thu,
            slot: "dinner".to_string(),
            recipe_id: Some(7),
        }
    );
    assert!(matches!(view.state(), ViewState::Updating { .. }));
    // Previous entries stay visible while the edit is pending
    assert_eq!(view.day_entries().len(), 2);

    let refetch = view
        .finish_update(update, Ok(week(date(2024, 3, 10), Some(7))))
        .unwrap();
    assert!(matches!(view.state(), ViewState::Updating { .. }));
    assert_eq!(refetch.week_start(), date(2024, 3, 10));

    assert!(view.apply_week(refetch, Ok(week(date(2024, 3, 10), Some(7)))));
    assert!(matches!(view.state(), ViewState::Ready { .. }));
    assert_eq!(view.day_entries()[1].recipe_id, Some(7));
    assert_eq!(view.selected_date(), date(2024, 3, 14));
}

#[test]
fn test_failed_edit_keeps_last_good_entries() {
    let mut view = ready(date(2024, 3, 14), Some(3));

    let update = view.begin_update("dinner", Some(7)).unwrap();
    assert!(view.finish_update(update, Err(server_error())).is_none());

    match view.state() {
        ViewState::Error(error) => {
            assert_eq!(error.action, FailedAction::Update);
            assert!(!error.is_blocking());
            assert_eq!(error.cause.status(), Some(500));
        }
        other => panic!("expected error state, got {other:?}"),
    }
    assert_eq!(view.day_entries()[1].recipe_id, Some(3));

    // Editing again from the error state is allowed
    assert!(view.begin_update("dinner", Some(7)).is_ok());
}

fn failed_edit(selected: Date) -> PlannerView {
    let mut view = ready(selected, Some(3));
    let update = view.begin_update("dinner", Some(7)).unwrap();
    assert!(view.finish_update(update, Err(server_error())).is_none());
    view
}

#[test]
fn test_retry_after_failed_edit_keeps_entries() {
    let mut view = failed_edit(date(2024, 3, 14));

    let retry = view.retry().unwrap();
    assert!(view.is_busy());
    assert_eq!(view.day_entries().len(), 2);
    assert_eq!(view.day_entries()[1].recipe_id, Some(3));

    assert!(view.apply_week(retry, Err(server_error())));
    match view.state() {
        ViewState::Error(error) => {
            assert_eq!(error.action, FailedAction::Load);
            assert!(!error.is_blocking());
        }
        other => panic!("expected error state, got {other:?}"),
    }
    assert_eq!(view.day_entries().len(), 2);
    assert_eq!(view.day_entries()[1].recipe_id, Some(3));
}

#[test]
fn test_reselect_after_failed_edit_keeps_entries() {
    let mut view = failed_edit(date(2024, 3, 14));

    // Friday of the same week refetches but keeps the week on screen
    let request = view.select_date(date(2024, 3, 15)).unwrap().unwrap();
    assert_eq!(request.week_start(), date(2024, 3, 10));
    assert_eq!(view.day_entries().len(), 2);
    assert!(view.day_entries().iter().all(|entry| entry.day == Day::Fri));

    assert!(view.apply_week(request, Err(server_error())));
    match view.state() {
        ViewState::Error(error) => assert!(!error.is_blocking()),
        other => panic!("expected error state, got {other:?}"),
    }
    assert_eq!(view.day_entries().len(), 2);
}

#[test]
fn test_selecting_another_week_after_failed_edit_drops_entries() {
    let mut view = failed_edit(date(2024, 3, 14));

    let request = view.select_date(date(2024, 3, 21)).unwrap().unwrap();
    assert!(view.day_entries().is_empty());

    assert!(view.apply_week(request, Err(server_error())));
    match view.state() {
        ViewState::Error(error) => assert!(error.is_blocking()),
        other => panic!("expected error state, got {other:?}"),
    }
}

#[test]
fn test_failed_initial_load_is_blocking_and_retryable() {
    let mut view = view(date(2024, 3, 14));
    let request = view.select_date(date(2024, 3, 14)).unwrap().unwrap();
    assert!(view.apply_week(request, Err(server_error())));

    match view.state() {
        ViewState::Error(error) => {
            assert_eq!(error.action, FailedAction::Load);
            assert!(error.is_blocking());
        }
        other => panic!("expected error state, got {other:?}"),
    }
    assert!(view.day_entries().is_empty());
    assert!(view.begin_update("dinner", Some(7)).unwrap_err().is_validation());

    let retry = view.retry().unwrap();
    assert_eq!(retry.week_start(), date(2024, 3, 10));
    assert!(view.apply_week(retry, Ok(week(date(2024, 3, 10), None))));
    assert!(matches!(view.state(), ViewState::Ready { .. }));
    assert!(view.retry().is_none());
}

#[test]
fn test_settled_surfaces_error_chain() {
    let mut view = view(date(2024, 3, 14));
    let request = view.select_date(date(2024, 3, 14)).unwrap().unwrap();
    view.apply_week(request, Err(server_error()));

    let error = view.settled().err().unwrap();
    assert_eq!(
        error.to_string(),
        "Failed to load the planner week of 2024-03-10"
    );
    let source = std::error::Error::source(&error).unwrap();
    assert_eq!(source.to_string(), "HTTP 500: boom");

    assert!(ready(date(2024, 3, 14), None).settled().is_ok());
}

#[test]
fn test_reselecting_after_error_refetches() {
    let mut view = view(date(2024, 3, 14));
    let request = view.select_date(date(2024, 3, 14)).unwrap().unwrap();
    view.apply_week(request, Err(server_error()));

    assert!(view.select_date(date(2024, 3, 13)).unwrap().is_some());
}

#[test]
fn test_edit_supersedes_in_flight_refetch() {
    let mut view = ready(date(2024, 3, 14), None);

    let first = view.begin_update("dinner", Some(7)).unwrap();
    let refetch = view
        .finish_update(first, Ok(week(date(2024, 3, 10), Some(7))))
        .unwrap();

    let second = view.begin_update("breakfast", Some(2)).unwrap();
    assert!(!view.apply_week(refetch, Ok(week(date(2024, 3, 10), Some(7)))));
    assert!(matches!(view.state(), ViewState::Updating { .. }));

    // A superseded edit outcome is ignored as well
    let latest = view.begin_update("dinner", None).unwrap();
    assert!(view.finish_update(second, Err(server_error())).is_none());
    assert!(matches!(view.state(), ViewState::Updating { .. }));
    assert!(view.finish_update(latest, Ok(week(date(2024, 3, 10), None))).is_some());
}

#[test]
fn test_week_navigation() {
    let mut view = ready(date(2024, 3, 14), None);

    let next = view.next_week().unwrap().unwrap();
    assert_eq!(next.week_start(), date(2024, 3, 17));
    assert_eq!(view.selected_date(), date(2024, 3, 21));

    let back = view.previous_week().unwrap().unwrap();
    assert_eq!(back.week_start(), date(2024, 3, 10));
    assert_eq!(view.week_dates().unwrap()[0], date(2024, 3, 10));
    assert_eq!(view.week_dates().unwrap()[6], date(2024, 3, 16));
}

#[test]
fn test_planned_meals_join() {
    let view = ready(date(2024, 3, 14), Some(7));
    let recipes = vec![Recipe {
        id: 7,
        name: "Tacos".to_string(),
        ingredients: vec!["tortillas".to_string()],
        effort_level: EffortLevel::Medium,
    }];

    let meals = view.planned_meals(&recipes);
    assert_eq!(meals.len(), 2);
    assert_eq!(meals[0].label(), NO_RECIPE);
    assert_eq!(meals[1].label(), "Tacos");
    assert_eq!(meals[1].effort_level, Some(EffortLevel::Medium));

    // Unknown recipe IDs fall back too
    assert_eq!(view.planned_meals(&[])[1].label(), NO_RECIPE);
}

#[tokio::test]
async fn test_show_date_records_network_failure() {
    let mut view = view(date(2024, 3, 14));
    view.show_date(date(2024, 3, 14)).await.unwrap();

    match view.state() {
        ViewState::Error(error) => assert!(error.cause.is_network()),
        other => panic!("expected error state, got {other:?}"),
    }
}

#[test]
fn test_slice_day_without_entries_is_empty() {
    let empty = PlannerWeek {
        start_date: date(2024, 3, 10),
        entries: vec![],
    };
    assert!(slice_day(&empty, date(2024, 3, 14)).is_empty());
}

fn any_entry() -> impl Strategy<Value = PlannerEntry> {
    (0usize..7, prop::sample::select(vec!["breakfast", "lunch", "dinner"]), any::<Option<u8>>())
        .prop_map(|(day, slot, recipe)| PlannerEntry {
            day: Day::ALL[day],
            slot: slot.to_string(),
            recipe_id: recipe.map(u64::from),
        })
}

proptest! {
    #[test]
    fn prop_slice_returns_only_matching_day(
        entries in prop::collection::vec(any_entry(), 0..30),
        offset in 0i64..7,
    ) {
        let start = date(2024, 3, 10);
        let selected = start.checked_add(offset.days()).unwrap();
        let week = PlannerWeek { start_date: start, entries };

        let slice = slice_day(&week, selected);
        let day = Day::of(selected);
        prop_assert!(slice.iter().all(|entry| entry.day == day));
        prop_assert_eq!(
            slice.len(),
            week.entries.iter().filter(|entry| entry.day == day).count()
        );
    }
}
