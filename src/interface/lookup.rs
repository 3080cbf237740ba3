use strsim::jaro_winkler;

use crate::error::{RecipeError, Result};
use crate::models::{Ingredient, IngredientId};

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.85;

/// Resolve a command-line reference to an ingredient.
///
/// Tries, in order: numeric id (`3` or `#3`), case-insensitive name, and the
/// closest fuzzy name match above [`FUZZY_MATCH_THRESHOLD`].
pub fn resolve_ingredient(ingredients: &[Ingredient], query: &str) -> Result<IngredientId> {
    let query = query.trim();
    let not_found = || RecipeError::IngredientNotFound(query.to_string());

    if let Ok(raw) = query.trim_start_matches('#').parse::<u32>() {
        return ingredients
            .iter()
            .find(|i| i.id == IngredientId(raw))
            .map(|i| i.id)
            .ok_or_else(not_found);
    }

    let needle = query.to_lowercase();
    if let Some(exact) = ingredients.iter().find(|i| i.name.to_lowercase() == needle) {
        return Ok(exact.id);
    }

    ingredients
        .iter()
        .map(|i| (i.id, jaro_winkler(&i.name.to_lowercase(), &needle)))
        .filter(|(_, score)| *score >= FUZZY_MATCH_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(id, _)| id)
        .ok_or_else(not_found)
}
