//! Recipe operations for the Pantry client.

use log::info;

use super::Pantry;
use crate::{
    cache::{QueryKey, ResourceKind},
    error::{NotFoundExt, Result},
    models::{Recipe, RecipeFilter, RecipeId},
    params::{CreateRecipe, EditRecipe, Id, SearchRecipes},
};

const RECIPE: &str = "Recipe";

fn recipe_path(id: RecipeId) -> String {
    format!("/recipes/{id}")
}

impl Pantry {
    /// Lists every recipe, in server order.
    pub async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        let gateway = &self.gateway;
        self.cache
            .query(QueryKey::recipes(), || gateway.get("/recipes"))
            .await
    }

    /// Retrieves a recipe by its ID.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::NotFound` if the backend answers 404.
    pub async fn get_recipe(&self, params: &Id) -> Result<Recipe> {
        let gateway = &self.gateway;
        let path = recipe_path(params.id);
        self.cache
            .query(QueryKey::recipe(params.id), || gateway.get(&path))
            .await
            .or_not_found(RECIPE, params.id)
    }

    /// Creates a recipe and returns it as stored, with its server-assigned ID.
    ///
    /// The input is validated first; an invalid recipe is never sent. On
    /// success every cached recipe query is invalidated.
    pub async fn create_recipe(&self, params: &CreateRecipe) -> Result<Recipe> {
        let body = params.validated()?;
        let recipe: Recipe = self.gateway.post("/recipes", &body).await?;
        self.cache.invalidate_kind(ResourceKind::Recipes);
        info!("Created recipe {} ({})", recipe.id, recipe.name);
        Ok(recipe)
    }

    /// Applies a partial update to a recipe and returns the stored result.
    ///
    /// Fields left as `None` keep their current value. On success every
    /// cached recipe query is invalidated.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::InvalidInput` before any request if nothing
    /// would change or a field is blank, and `PantryError::NotFound` if the
    /// recipe does not exist.
    pub async fn edit_recipe(&self, id: RecipeId, params: &EditRecipe) -> Result<Recipe> {
        let body = params.validated()?;
        let recipe: Recipe = self
            .gateway
            .patch(&recipe_path(id), &body)
            .await
            .or_not_found(RECIPE, id)?;
        self.cache.invalidate_kind(ResourceKind::Recipes);
        info!("Updated recipe {id}");
        Ok(recipe)
    }

    /// Deletes a recipe.
    ///
    /// Deleting is not idempotent: a second delete of the same ID fails with
    /// `PantryError::NotFound`. Planner entries that still point at the
    /// recipe are left alone and display as "No Recipe".
    pub async fn delete_recipe(&self, params: &Id) -> Result<()> {
        self.gateway
            .delete(&recipe_path(params.id))
            .await
            .or_not_found(RECIPE, params.id)?;
        self.cache.invalidate_kind(ResourceKind::Recipes);
        info!("Deleted recipe {}", params.id);
        Ok(())
    }

    /// Recipes matching a search term and effort facet.
    ///
    /// Filtering happens client-side over [`Pantry::list_recipes`], so the
    /// cached list is reused.
    pub async fn search_recipes(&self, params: &SearchRecipes) -> Result<Vec<Recipe>> {
        let recipes = self.list_recipes().await?;
        Ok(RecipeFilter::from(params).apply(&recipes))
    }
}
