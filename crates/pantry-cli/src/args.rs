use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pantry_core::dates::Day;

use crate::cli::{parse_day, PlanCommands, RecipeCommands};

/// Terminal front end for the Pantry meal planner
///
/// Browse and manage the recipe collection and assign recipes to the meal
/// slots of a weekly plan held by a Pantry backend. Without a subcommand,
/// today's meals are shown.
#[derive(Parser)]
#[command(version, about, name = "pantry")]
pub struct Args {
    /// Backend base URL. Overrides the config file and $PANTRY_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to a JSON config file. Defaults to
    /// $XDG_CONFIG_HOME/pantry/config.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// First day of the planner week, e.g. sun or mon
    #[arg(long, global = true, value_parser = parse_day)]
    pub first_day: Option<Day>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage the recipe collection
    #[command(alias = "r")]
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },
    /// View and edit the weekly meal plan
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Check that the backend is reachable
    Health,
}
