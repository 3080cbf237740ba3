use serde::{Deserialize, Serialize};

use crate::engine;
use crate::models::{Ingredient, IngredientId};

/// A recipe as edited in one session: metadata plus the ordered ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    #[serde(default)]
    pub is_public: bool,

    /// Read-only presentation toggle; never persisted.
    #[serde(skip)]
    pub view_mode: bool,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            title: "Neapolitan Pizza".to_string(),
            description: "Default recipe".to_string(),
            notes: String::new(),
            ingredients: vec![
                Ingredient::flour(IngredientId(1), "Flour", 1000.0),
                Ingredient::other(IngredientId(2), "Water", 600.0, 60.0),
                Ingredient::other(IngredientId(3), "Salt", 30.0, 3.0),
                Ingredient::other(IngredientId(4), "Yeast", 2.0, 0.2),
            ],
            is_public: false,
            view_mode: false,
        }
    }
}

impl Recipe {
    /// Recipe with no metadata around an ingredient list.
    pub fn with_ingredients(ingredients: Vec<Ingredient>) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            notes: String::new(),
            ingredients,
            is_public: false,
            view_mode: false,
        }
    }

    pub fn total_weight(&self) -> f64 {
        engine::total_weight(&self.ingredients)
    }

    pub fn total_flour_weight(&self) -> f64 {
        engine::total_flour_weight(&self.ingredients)
    }

    pub fn flour_count(&self) -> usize {
        engine::flour_count(&self.ingredients)
    }

    /// Highest ingredient id in use, if any.
    pub fn max_ingredient_id(&self) -> Option<IngredientId> {
        self.ingredients.iter().map(|i| i.id).max()
    }

    pub fn ingredient(&self, id: IngredientId) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }
}
