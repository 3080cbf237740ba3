mod ingredient;
mod recipe;

pub use ingredient::{Ingredient, IngredientId};
pub use recipe::Recipe;
