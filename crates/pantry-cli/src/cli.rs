//! Command argument wrappers and their handlers.
//!
//! Each subcommand has a clap `Args` struct converted into the matching
//! `pantry_core::params` type with `From`, so clap concerns stay out of the
//! core:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Pantry client
//! ```
//!
//! [`Cli`] runs the converted operation and renders the markdown result.

use anyhow::{bail, Result};
use clap::{Args, Subcommand, ValueEnum};
use jiff::civil::Date;
use pantry_core::{
    dates::{self, Day},
    models::{parse_ingredients, EffortLevel, RecipeId},
    params::{CreateRecipe, EditRecipe, Id, SearchRecipes},
    CreateResult, DayPlan, DeleteResult, OperationStatus, Pantry, PantryError, PlannerView,
    Recipes, UpdateResult, WeekPlan,
};

use crate::renderer::TerminalRenderer;

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(value: &str) -> std::result::Result<Date, String> {
    dates::parse_iso(value).map_err(|e| e.to_string())
}

/// Parse a weekday argument such as `sun` or `Monday`.
pub fn parse_day(value: &str) -> std::result::Result<Day, String> {
    value.parse()
}

/// Effort level values accepted on the command line.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum EffortArg {
    /// Quick
    Low,
    /// Worth the effort
    Medium,
    /// Special days only
    High,
}

impl From<EffortArg> for EffortLevel {
    fn from(val: EffortArg) -> Self {
        match val {
            EffortArg::Low => EffortLevel::Low,
            EffortArg::Medium => EffortLevel::Medium,
            EffortArg::High => EffortLevel::High,
        }
    }
}

/// Effort facet of a search; `all` passes every level.
#[derive(Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum EffortFilterArg {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl From<EffortFilterArg> for Option<EffortLevel> {
    fn from(val: EffortFilterArg) -> Self {
        match val {
            EffortFilterArg::All => None,
            EffortFilterArg::Low => Some(EffortLevel::Low),
            EffortFilterArg::Medium => Some(EffortLevel::Medium),
            EffortFilterArg::High => Some(EffortLevel::High),
        }
    }
}

/// Show one recipe
#[derive(Args)]
pub struct ShowRecipeArgs {
    /// ID of the recipe to display
    pub id: RecipeId,
}

impl From<ShowRecipeArgs> for Id {
    fn from(val: ShowRecipeArgs) -> Self {
        Id { id: val.id }
    }
}

/// Add a recipe to the collection
#[derive(Args)]
pub struct CreateRecipeArgs {
    /// Name of the recipe
    pub name: String,
    /// Ingredients, separated by commas or newlines
    #[arg(short, long)]
    pub ingredients: String,
    /// Preparation effort
    #[arg(short, long, value_enum, default_value_t = EffortArg::Low)]
    pub effort: EffortArg,
}

impl From<CreateRecipeArgs> for CreateRecipe {
    fn from(val: CreateRecipeArgs) -> Self {
        CreateRecipe {
            name: val.name,
            ingredients: parse_ingredients(&val.ingredients),
            effort_level: val.effort.into(),
        }
    }
}

/// Change fields of an existing recipe
///
/// Only the given fields are changed.
#[derive(Args)]
pub struct EditRecipeArgs {
    /// ID of the recipe to edit
    pub id: RecipeId,
    /// New name
    #[arg(short, long)]
    pub name: Option<String>,
    /// New ingredients, separated by commas or newlines
    #[arg(short, long)]
    pub ingredients: Option<String>,
    /// New preparation effort
    #[arg(short, long, value_enum)]
    pub effort: Option<EffortArg>,
}

impl From<&EditRecipeArgs> for EditRecipe {
    fn from(val: &EditRecipeArgs) -> Self {
        EditRecipe {
            name: val.name.clone(),
            ingredients: val.ingredients.as_deref().map(parse_ingredients),
            effort_level: val.effort.map(EffortLevel::from),
        }
    }
}

/// Delete a recipe permanently
#[derive(Args)]
pub struct DeleteRecipeArgs {
    /// ID of the recipe to delete
    pub id: RecipeId,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

/// Search recipes by name or ingredient
#[derive(Args)]
pub struct SearchRecipesArgs {
    /// Text to look for in names and ingredients, case-insensitive
    pub term: Option<String>,
    /// Only show recipes with this effort level
    #[arg(short, long, value_enum, default_value_t)]
    pub effort: EffortFilterArg,
}

impl From<SearchRecipesArgs> for SearchRecipes {
    fn from(val: SearchRecipesArgs) -> Self {
        SearchRecipes {
            term: val.term,
            effort: val.effort.into(),
        }
    }
}

#[derive(Subcommand)]
pub enum RecipeCommands {
    /// List all recipes
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of a recipe
    #[command(alias = "s")]
    Show(ShowRecipeArgs),
    /// Add a recipe
    #[command(alias = "c")]
    Create(CreateRecipeArgs),
    /// Change fields of a recipe
    #[command(alias = "e")]
    Edit(EditRecipeArgs),
    /// Delete a recipe permanently
    #[command(alias = "d")]
    Delete(DeleteRecipeArgs),
    /// Search recipes by text and effort
    #[command(alias = "f")]
    Search(SearchRecipesArgs),
}

/// Pick the day to work on
#[derive(Args)]
pub struct DateArgs {
    /// Date in YYYY-MM-DD form. Defaults to today
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<Date>,
}

impl DateArgs {
    fn resolve(&self) -> Date {
        self.date.unwrap_or_else(dates::today)
    }
}

/// Assign a recipe to a meal slot
#[derive(Args)]
pub struct AssignSlotArgs {
    /// Meal slot, e.g. breakfast, lunch or dinner
    pub slot: String,
    /// ID of the recipe to plan
    pub recipe_id: RecipeId,
    #[command(flatten)]
    pub date: DateArgs,
}

/// Remove the recipe from a meal slot
#[derive(Args)]
pub struct ClearSlotArgs {
    /// Meal slot, e.g. breakfast, lunch or dinner
    pub slot: String,
    #[command(flatten)]
    pub date: DateArgs,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show the meals planned for a day
    #[command(alias = "s")]
    Show(DateArgs),
    /// Show the whole week containing a day
    #[command(alias = "w")]
    Week(DateArgs),
    /// Assign a recipe to a slot of a day
    #[command(alias = "a")]
    Assign(AssignSlotArgs),
    /// Clear a slot of a day
    #[command(alias = "c")]
    Clear(ClearSlotArgs),
}

/// Runs commands against a [`Pantry`] client and renders the results.
pub struct Cli {
    pantry: Pantry,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(pantry: Pantry, renderer: TerminalRenderer) -> Self {
        Self { pantry, renderer }
    }

    pub async fn handle_recipe_command(&self, command: RecipeCommands) -> Result<()> {
        match command {
            RecipeCommands::List => {
                let recipes = self.pantry.list_recipes().await?;
                self.renderer
                    .render(&format!("# Recipes\n\n{}", Recipes(recipes)))
            }
            RecipeCommands::Show(args) => {
                let recipe = self.pantry.get_recipe(&args.into()).await?;
                self.renderer.render(&recipe.to_string())
            }
            RecipeCommands::Create(args) => {
                let recipe = self.pantry.create_recipe(&args.into()).await?;
                self.renderer.render(&CreateResult::new(recipe).to_string())
            }
            RecipeCommands::Edit(args) => self.edit_recipe(&args).await,
            RecipeCommands::Delete(args) => self.delete_recipe(&args).await,
            RecipeCommands::Search(args) => {
                let recipes = self.pantry.search_recipes(&args.into()).await?;
                self.renderer
                    .render(&format!("# Search results\n\n{}", Recipes(recipes)))
            }
        }
    }

    async fn edit_recipe(&self, args: &EditRecipeArgs) -> Result<()> {
        let params = EditRecipe::from(args);
        let recipe = self.pantry.edit_recipe(args.id, &params).await?;

        let mut changes = Vec::new();
        if let Some(name) = &params.name {
            changes.push(format!("Renamed to {}", name.trim()));
        }
        if params.ingredients.is_some() {
            changes.push(format!("Ingredients set to {}", recipe.ingredients.join(", ")));
        }
        if let Some(effort) = params.effort_level {
            changes.push(format!("Effort set to {effort}"));
        }
        self.renderer
            .render(&UpdateResult::with_changes(recipe, changes).to_string())
    }

    async fn delete_recipe(&self, args: &DeleteRecipeArgs) -> Result<()> {
        if !args.confirm {
            bail!(
                "Refusing to delete recipe {} without --confirm",
                args.id
            );
        }
        let id = Id { id: args.id };
        let recipe = self.pantry.get_recipe(&id).await?;
        self.pantry.delete_recipe(&id).await?;
        self.renderer.render(&DeleteResult::new(recipe).to_string())
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Show(args) => self.show_day(args.resolve()).await,
            PlanCommands::Week(args) => self.show_week(args.resolve()).await,
            PlanCommands::Assign(args) => {
                self.update_slot(args.date.resolve(), args.slot, Some(args.recipe_id))
                    .await
            }
            PlanCommands::Clear(args) => {
                self.update_slot(args.date.resolve(), args.slot, None).await
            }
        }
    }

    async fn open_view(&self, date: Date) -> Result<PlannerView> {
        let mut view = PlannerView::new(self.pantry.clone(), date);
        view.show_date(date).await?;
        Ok(view.settled()?)
    }

    /// Render the meals planned for `date`.
    pub async fn show_day(&self, date: Date) -> Result<()> {
        let view = self.open_view(date).await?;
        let recipes = self.pantry.list_recipes().await?;
        let plan = DayPlan::new(date, view.planned_meals(&recipes));
        self.renderer.render(&plan.to_string())
    }

    async fn show_week(&self, date: Date) -> Result<()> {
        let week = self.pantry.get_week_containing(date).await?;
        let recipes = self.pantry.list_recipes().await?;
        self.renderer
            .render(&WeekPlan::new(&week, &recipes).to_string())
    }

    async fn update_slot(
        &self,
        date: Date,
        slot: String,
        recipe_id: Option<RecipeId>,
    ) -> Result<()> {
        let recipes = self.pantry.list_recipes().await?;
        let change = match recipe_id {
            Some(id) => match recipes.iter().find(|recipe| recipe.id == id) {
                Some(recipe) => format!("Assigned {} to {slot}", recipe.name),
                None => return Err(PantryError::not_found("Recipe", id).into()),
            },
            None => format!("Cleared {slot}"),
        };

        let mut view = self.open_view(date).await?;
        view.assign_slot(slot, recipe_id).await?;
        let view = view.settled()?;

        let plan = DayPlan::new(date, view.planned_meals(&recipes));
        self.renderer
            .render(&UpdateResult::with_changes(plan, vec![change]).to_string())
    }

    pub async fn health(&self) -> Result<()> {
        let health = self.pantry.health().await?;
        let status = OperationStatus::from_health(&health, &self.pantry.config().api_base_url);
        self.renderer.render(&status.to_string())?;
        if !status.success {
            bail!("Backend is unhealthy");
        }
        Ok(())
    }
}
