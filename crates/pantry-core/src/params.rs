//! Parameter structures for pantry operations.
//!
//! These are the interface-agnostic inputs of the store operations. The CLI
//! wraps them in clap argument structs and converts with `From`, keeping
//! framework concerns out of the core. Several of them double as request
//! bodies and serialize to the backend's camelCase JSON.
//!
//! Validation happens here, before any request is built: a recipe with a
//! blank name or no ingredients never reaches the network.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    dates::Day,
    error::{PantryError, Result},
    models::{EffortLevel, RecipeId},
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: RecipeId,
}

/// Parameters for creating a new recipe. Sent as the `POST /recipes` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipe {
    /// Name of the recipe (required, non-blank)
    pub name: String,
    /// Ingredient lines (at least one, none blank)
    pub ingredients: Vec<String>,
    /// Preparation effort
    pub effort_level: EffortLevel,
}

impl CreateRecipe {
    /// Return a trimmed copy, or the first validation failure.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::InvalidInput` for a blank name, an empty
    /// ingredient list or a blank ingredient line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pantry_core::{models::EffortLevel, params::CreateRecipe};
    ///
    /// let input = CreateRecipe {
    ///     name: "  Rice Bowl ".to_string(),
    ///     ingredients: vec!["rice".to_string()],
    ///     effort_level: EffortLevel::Low,
    /// };
    /// assert_eq!(input.validated().unwrap().name, "Rice Bowl");
    ///
    /// let blank = CreateRecipe { name: "  ".to_string(), ..input };
    /// assert!(blank.validated().is_err());
    /// ```
    pub fn validated(&self) -> Result<Self> {
        Ok(Self {
            name: validate_name(&self.name)?,
            ingredients: validate_ingredients(&self.ingredients)?,
            effort_level: self.effort_level,
        })
    }
}

/// Partial recipe update. Sent as the `PATCH /recipes/{id}` body; absent
/// fields are left out of the JSON and keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditRecipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_level: Option<EffortLevel>,
}

impl EditRecipe {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.ingredients.is_none() && self.effort_level.is_none()
    }

    /// Return a trimmed copy, or the first validation failure.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::InvalidInput` when nothing would change or a
    /// supplied field breaks the rules of [`CreateRecipe::validated`].
    pub fn validated(&self) -> Result<Self> {
        if self.is_empty() {
            return Err(PantryError::invalid_input("recipe")
                .with_reason("at least one of name, ingredients or effort level must change"));
        }
        Ok(Self {
            name: self.name.as_deref().map(validate_name).transpose()?,
            ingredients: self
                .ingredients
                .as_deref()
                .map(validate_ingredients)
                .transpose()?,
            effort_level: self.effort_level,
        })
    }
}

/// Parameters for assigning or clearing one planner slot. Sent as the
/// `POST /planner/week/slot` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlot {
    /// Start of the week, already normalized to the configured first day
    pub start_date: Date,
    /// Day of the week being edited
    pub day: Day,
    /// Meal slot being edited
    pub slot: String,
    /// New recipe, or `None` to clear the slot
    pub recipe_id: Option<RecipeId>,
}

/// Parameters for searching the recipe catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRecipes {
    /// Free-text term matched against names and ingredients
    pub term: Option<String>,
    /// Restrict to a single effort level
    pub effort: Option<EffortLevel>,
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PantryError::invalid_input("name").with_reason("must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_ingredients(ingredients: &[String]) -> Result<Vec<String>> {
    if ingredients.is_empty() {
        return Err(PantryError::invalid_input("ingredients")
            .with_reason("at least one ingredient is required"));
    }
    ingredients
        .iter()
        .map(|ingredient| {
            let trimmed = ingredient.trim();
            if trimmed.is_empty() {
                Err(PantryError::invalid_input("ingredients")
                    .with_reason("ingredient entries must not be blank"))
            } else {
                Ok(trimmed.to_string())
            }
        })
        .collect()
}
