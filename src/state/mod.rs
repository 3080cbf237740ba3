mod persistence;
mod repository;
mod sequence;
mod store;

pub use persistence::{load_recipe, save_recipe, JsonFileRepository};
pub use repository::{
    ingredients_to_rows, rows_to_ingredients, IngredientRow, RecipeId, RecipeRepository,
    RecipeSummary, StoredRecipe,
};
pub use sequence::IdSequence;
pub use store::{RecipeStore, SubscriptionId};
