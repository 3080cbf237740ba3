use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Ingredient, IngredientId, Recipe};

pub type RecipeId = u64;

/// Flat storage shape of one ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRow {
    pub name: String,
    pub is_flour: bool,
    pub amount: f64,
    pub percentage: f64,
    pub sort_order: u32,
}

/// A recipe as kept by a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_public: bool,
    /// Whole grams, for listing without loading rows.
    pub total_weight: u64,
    pub ingredients: Vec<IngredientRow>,
}

/// Listing entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub title: String,
    pub total_weight: u64,
    pub ingredient_count: usize,
}

/// Rows in list order: `sort_order` is the position.
pub fn ingredients_to_rows(ingredients: &[Ingredient]) -> Vec<IngredientRow> {
    ingredients
        .iter()
        .zip(0u32..)
        .map(|(ingredient, sort_order)| IngredientRow {
            name: ingredient.name.clone(),
            is_flour: ingredient.is_flour,
            amount: ingredient.amount,
            percentage: ingredient.percentage,
            sort_order,
        })
        .collect()
}

/// Ingredients ordered by `sort_order`, with session ids renumbered from 1.
///
/// Non-finite or negative quantities read back as zero.
pub fn rows_to_ingredients(rows: &[IngredientRow]) -> Vec<Ingredient> {
    let mut sorted: Vec<&IngredientRow> = rows.iter().collect();
    sorted.sort_by_key(|row| row.sort_order);

    let sanitize = |value: f64| if value.is_finite() && value >= 0.0 { value } else { 0.0 };

    sorted
        .into_iter()
        .zip(1u32..)
        .map(|(row, id)| Ingredient {
            id: IngredientId(id),
            name: row.name.clone(),
            is_flour: row.is_flour,
            amount: sanitize(row.amount),
            percentage: sanitize(row.percentage),
        })
        .collect()
}

impl StoredRecipe {
    pub fn from_recipe(id: RecipeId, recipe: &Recipe) -> Self {
        Self {
            id,
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            notes: recipe.notes.clone(),
            is_public: recipe.is_public,
            total_weight: recipe.total_weight().round().max(0.0) as u64,
            ingredients: ingredients_to_rows(&recipe.ingredients),
        }
    }

    pub fn to_recipe(&self) -> Recipe {
        Recipe {
            title: self.title.clone(),
            description: self.description.clone(),
            notes: self.notes.clone(),
            ingredients: rows_to_ingredients(&self.ingredients),
            is_public: self.is_public,
            view_mode: false,
        }
    }

    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            title: self.title.clone(),
            total_weight: self.total_weight,
            ingredient_count: self.ingredients.len(),
        }
    }
}

/// Create/read/update/delete boundary for saved recipes.
pub trait RecipeRepository {
    fn create(&mut self, recipe: &Recipe) -> Result<RecipeId>;

    /// Fails with `RecipeNotFound` for an unknown id.
    fn read(&self, id: RecipeId) -> Result<Recipe>;

    fn update(&mut self, id: RecipeId, recipe: &Recipe) -> Result<()>;

    fn delete(&mut self, id: RecipeId) -> Result<()>;

    /// Most recently created first.
    fn list(&self) -> Result<Vec<RecipeSummary>>;
}
