//! In-process fake backend for integration tests.
//!
//! Serves the recipe and planner REST surface from memory with `axum` on an
//! ephemeral port, so tests exercise the real reqwest transport.

#![allow(dead_code)]

use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use jiff::{civil::Date, ToSpan};
use pantry_core::{
    dates::{self, Day},
    CreateRecipe, EditRecipe, EffortLevel, Pantry, PantryBuilder, PlannerEntry, PlannerWeek,
    Recipe, RecipeId, UpdateSlot,
};
use serde::Deserialize;
use serde_json::{json, Value};

pub const SLOTS: [&str; 3] = ["breakfast", "lunch", "dinner"];

/// Backend state shared with the tests for inspection.
#[derive(Default)]
pub struct Backend {
    data: Mutex<Data>,
    week_fetches: AtomicUsize,
    recipe_fetches: AtomicUsize,
}

#[derive(Default)]
struct Data {
    recipes: BTreeMap<RecipeId, Recipe>,
    next_id: RecipeId,
    weeks: HashMap<Date, PlannerWeek>,
}

impl Backend {
    fn seeded() -> Self {
        let backend = Self::default();
        {
            let mut data = backend.data.lock().unwrap();
            for (id, name, ingredients, effort_level) in [
                (1, "Chicken Rice Bowl", vec!["rice", "chicken"], EffortLevel::Low),
                (2, "Roast Dinner", vec!["whole chicken", "potatoes"], EffortLevel::High),
                (5, "Lentil Soup", vec!["lentils", "carrots"], EffortLevel::Medium),
                (7, "Tacos", vec!["tortillas", "beans"], EffortLevel::Medium),
            ] {
                data.recipes.insert(
                    id,
                    Recipe {
                        id,
                        name: name.to_string(),
                        ingredients: ingredients.into_iter().map(String::from).collect(),
                        effort_level,
                    },
                );
            }
            data.next_id = 8;
        }
        backend
    }

    /// Number of `GET /planner/week` requests served.
    pub fn week_fetches(&self) -> usize {
        self.week_fetches.load(Ordering::SeqCst)
    }

    /// Number of `GET /recipes` and `GET /recipes/{id}` requests served.
    pub fn recipe_fetches(&self) -> usize {
        self.recipe_fetches.load(Ordering::SeqCst)
    }
}

fn empty_week(start_date: Date) -> PlannerWeek {
    let entries = Day::ALL
        .iter()
        .flat_map(|day| {
            SLOTS.map(|slot| PlannerEntry {
                day: *day,
                slot: slot.to_string(),
                recipe_id: None,
            })
        })
        .collect();
    PlannerWeek {
        start_date,
        entries,
    }
}

type Db = Arc<Backend>;

async fn list_recipes(State(db): State<Db>) -> Json<Vec<Recipe>> {
    db.recipe_fetches.fetch_add(1, Ordering::SeqCst);
    let data = db.data.lock().unwrap();
    Json(data.recipes.values().cloned().collect())
}

async fn get_recipe(
    State(db): State<Db>,
    Path(id): Path<RecipeId>,
) -> Result<Json<Recipe>, StatusCode> {
    db.recipe_fetches.fetch_add(1, Ordering::SeqCst);
    let data = db.data.lock().unwrap();
    data.recipes
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_recipe(
    State(db): State<Db>,
    Json(input): Json<CreateRecipe>,
) -> Result<(StatusCode, Json<Recipe>), (StatusCode, String)> {
    if input.name.trim().is_empty() || input.ingredients.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "name and ingredients are required".to_string(),
        ));
    }
    let mut data = db.data.lock().unwrap();
    let id = data.next_id;
    data.next_id += 1;
    let recipe = Recipe {
        id,
        name: input.name,
        ingredients: input.ingredients,
        effort_level: input.effort_level,
    };
    data.recipes.insert(id, recipe.clone());
    Ok((StatusCode::CREATED, Json(recipe)))
}

async fn edit_recipe(
    State(db): State<Db>,
    Path(id): Path<RecipeId>,
    Json(input): Json<EditRecipe>,
) -> Result<Json<Recipe>, StatusCode> {
    let mut data = db.data.lock().unwrap();
    let recipe = data.recipes.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        recipe.name = name;
    }
    if let Some(ingredients) = input.ingredients {
        recipe.ingredients = ingredients;
    }
    if let Some(effort_level) = input.effort_level {
        recipe.effort_level = effort_level;
    }
    Ok(Json(recipe.clone()))
}

async fn delete_recipe(State(db): State<Db>, Path(id): Path<RecipeId>) -> StatusCode {
    let mut data = db.data.lock().unwrap();
    match data.recipes.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

#[derive(Deserialize)]
struct WeekQuery {
    #[serde(rename = "startDate")]
    start_date: String,
}

async fn get_week(
    State(db): State<Db>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<PlannerWeek>, (StatusCode, String)> {
    db.week_fetches.fetch_add(1, Ordering::SeqCst);
    let start_date = dates::parse_iso(&query.start_date)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    // Let concurrent requests overlap
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let mut data = db.data.lock().unwrap();
    let week = data
        .weeks
        .entry(start_date)
        .or_insert_with(|| empty_week(start_date));
    Ok(Json(week.clone()))
}

async fn update_slot(
    State(db): State<Db>,
    Json(input): Json<UpdateSlot>,
) -> Result<Json<PlannerWeek>, (StatusCode, String)> {
    let mut data = db.data.lock().unwrap();
    if let Some(id) = input.recipe_id {
        if !data.recipes.contains_key(&id) {
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("unknown recipe {id}"),
            ));
        }
    }
    let week = data
        .weeks
        .entry(input.start_date)
        .or_insert_with(|| empty_week(input.start_date));
    let entry = week
        .entries
        .iter_mut()
        .find(|entry| entry.day == input.day && entry.slot == input.slot)
        .ok_or((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("unknown slot {}", input.slot),
        ))?;
    entry.recipe_id = input.recipe_id;
    Ok(Json(week.clone()))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn router(db: Db) -> Router {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/recipes/{id}",
            get(get_recipe).patch(edit_recipe).delete(delete_recipe),
        )
        .route("/planner/week", get(get_week))
        .route("/planner/week/slot", post(update_slot))
        .route("/health", get(health))
        .with_state(db)
}

/// A running fake backend.
pub struct TestServer {
    pub base_url: String,
    pub backend: Arc<Backend>,
}

impl TestServer {
    /// Client for this server with weeks starting on Sunday.
    pub fn pantry(&self) -> Pantry {
        PantryBuilder::new()
            .with_base_url(Some(self.base_url.clone()))
            .with_first_day_of_week(Some(Day::Sun))
            .build()
            .expect("Failed to build pantry client")
    }
}

/// Serve a freshly seeded backend on an ephemeral port.
pub async fn spawn_backend() -> TestServer {
    let backend = Arc::new(Backend::seeded());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    let app = router(backend.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    TestServer {
        base_url: format!("http://{addr}"),
        backend,
    }
}

/// A base URL nothing listens on.
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);
    format!("http://{addr}")
}

/// The Sunday-started week containing `date`.
pub fn sunday_week(date: Date) -> Date {
    let back = i64::from(date.weekday().to_sunday_zero_offset());
    date.checked_sub(back.days()).expect("date in range")
}
