use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine;
use crate::error::{RecipeError, Result};
use crate::models::{IngredientId, Recipe};
use crate::state::repository::{RecipeId, RecipeRepository, RecipeSummary, StoredRecipe};

/// Load the working recipe from a JSON file.
///
/// A missing file yields the default recipe. Duplicate ingredient ids are
/// renumbered by position, and amounts are re-derived only if the file does
/// not satisfy the baker's-percentage law.
pub fn load_recipe<P: AsRef<Path>>(path: P) -> Result<Recipe> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No recipe at {}, starting from the default", path.display());
        return Ok(Recipe::default());
    }

    let content = fs::read_to_string(path)?;
    let mut recipe: Recipe = serde_json::from_str(&content)?;

    if let Some(bad) = recipe.ingredients.iter().find(|i| !i.is_valid()) {
        return Err(RecipeError::InvalidInput(format!(
            "ingredient '{}' has an invalid amount or percentage",
            bad.label()
        )));
    }

    let mut seen = HashSet::new();
    if !recipe.ingredients.iter().all(|i| seen.insert(i.id)) {
        debug!("Renumbering duplicate ingredient ids");
        for (ingredient, id) in recipe.ingredients.iter_mut().zip(1u32..) {
            ingredient.id = IngredientId(id);
        }
    }

    recipe.ingredients = engine::normalize(&recipe.ingredients);
    Ok(recipe)
}

/// Save the working recipe as pretty-printed JSON.
pub fn save_recipe<P: AsRef<Path>>(path: P, recipe: &Recipe) -> Result<()> {
    let json = serde_json::to_string_pretty(recipe)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Library {
    next_id: RecipeId,
    recipes: Vec<StoredRecipe>,
}

/// Recipe library kept in a single JSON file.
///
/// The file is read on every call and rewritten on every change; a missing
/// file is an empty library.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Library> {
        if !self.path.exists() {
            return Ok(Library {
                next_id: 1,
                recipes: Vec::new(),
            });
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn store(&self, library: &Library) -> Result<()> {
        let json = serde_json::to_string_pretty(library)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl RecipeRepository for JsonFileRepository {
    fn create(&mut self, recipe: &Recipe) -> Result<RecipeId> {
        let mut library = self.load()?;
        let id = library.next_id.max(1);
        library.next_id = id + 1;
        library.recipes.push(StoredRecipe::from_recipe(id, recipe));
        self.store(&library)?;

        info!("Saved recipe {} as #{}", recipe.title, id);
        Ok(id)
    }

    fn read(&self, id: RecipeId) -> Result<Recipe> {
        self.load()?
            .recipes
            .iter()
            .find(|r| r.id == id)
            .map(StoredRecipe::to_recipe)
            .ok_or(RecipeError::RecipeNotFound(id))
    }

    fn update(&mut self, id: RecipeId, recipe: &Recipe) -> Result<()> {
        let mut library = self.load()?;
        let slot = library
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RecipeError::RecipeNotFound(id))?;
        *slot = StoredRecipe::from_recipe(id, recipe);
        self.store(&library)
    }

    fn delete(&mut self, id: RecipeId) -> Result<()> {
        let mut library = self.load()?;
        let before = library.recipes.len();
        library.recipes.retain(|r| r.id != id);
        if library.recipes.len() == before {
            return Err(RecipeError::RecipeNotFound(id));
        }
        self.store(&library)
    }

    fn list(&self) -> Result<Vec<RecipeSummary>> {
        let mut summaries: Vec<RecipeSummary> =
            self.load()?.recipes.iter().map(StoredRecipe::summary).collect();
        summaries.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(summaries)
    }
}
