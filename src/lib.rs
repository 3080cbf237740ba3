pub mod cli;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod interface;
pub mod models;
pub mod state;

pub use error::{RecipeError, Result};
pub use models::{Ingredient, IngredientId, Recipe};
