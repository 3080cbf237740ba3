use crate::engine::satisfies_bakers_law;
use crate::models::Recipe;
use crate::state::RecipeSummary;

/// Render a recipe as a formatted table.
pub fn format_recipe(recipe: &Recipe) -> String {
    let mut out = String::new();

    let title = if recipe.title.is_empty() {
        "Untitled recipe"
    } else {
        recipe.title.as_str()
    };
    out.push_str(&format!("=== {} ===\n", title));
    if !recipe.description.is_empty() {
        out.push_str(&format!("{}\n", recipe.description));
    }
    out.push('\n');

    if recipe.ingredients.is_empty() {
        out.push_str("(no ingredients)\n");
        return out;
    }

    let labels: Vec<String> = recipe.ingredients.iter().map(|i| i.label()).collect();
    let width = labels.iter().map(|l| l.len()).max().unwrap_or(10);

    for (ingredient, label) in recipe.ingredients.iter().zip(&labels) {
        let role = if ingredient.is_flour { "[flour]" } else { "" };
        out.push_str(&format!(
            "{:>4}  {:<width$} {:>7} {:>10.2} g {:>8.2} %\n",
            ingredient.id.to_string(),
            label,
            role,
            ingredient.amount,
            ingredient.percentage,
            width = width
        ));
    }

    out.push('\n');
    out.push_str(&format!(
        "Total weight: {:.1} g ({} flour, {:.1} g flour)\n",
        recipe.total_weight(),
        recipe.flour_count(),
        recipe.total_flour_weight()
    ));

    if recipe.flour_count() == 0 {
        out.push_str("Warning: no flour ingredient, percentages cannot be applied.\n");
    } else if !satisfies_bakers_law(&recipe.ingredients) {
        out.push_str("Warning: amounts and percentages are out of sync.\n");
    }

    if !recipe.notes.is_empty() {
        out.push_str(&format!("\nNotes:\n{}\n", recipe.notes));
    }

    out
}

pub fn display_recipe(recipe: &Recipe) {
    println!();
    print!("{}", format_recipe(recipe));
    println!();
}

/// Full share link: the fragment appended to the configured page URL.
pub fn share_link(fragment: &str, base_url: Option<&str>) -> String {
    match base_url {
        Some(base) => format!("{}{}", base.trim_end_matches('#'), fragment),
        None => fragment.to_string(),
    }
}

/// Display saved recipes, newest first.
pub fn display_library(summaries: &[RecipeSummary]) {
    if summaries.is_empty() {
        println!("No saved recipes.");
        return;
    }

    println!();
    println!("=== Saved recipes ({}) ===", summaries.len());
    println!();

    for summary in summaries {
        println!(
            "{:>4}. {} - {} g, {} ingredients",
            summary.id, summary.title, summary.total_weight, summary.ingredient_count
        );
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, IngredientId};

    #[test]
    fn test_format_default_recipe() {
        let text = format_recipe(&Recipe::default());
        assert!(text.starts_with("=== Neapolitan Pizza ==="));
        assert!(text.contains("[flour]"));
        assert!(text.contains("Total weight: 1632.0 g (1 flour, 1000.0 g flour)"));
        assert!(!text.contains("Warning"));
    }

    #[test]
    fn test_format_warns_without_flour() {
        let recipe = Recipe::with_ingredients(vec![Ingredient::other(
            IngredientId(1),
            "Water",
            100.0,
            60.0,
        )]);
        let text = format_recipe(&recipe);
        assert!(text.contains("Untitled recipe"));
        assert!(text.contains("Warning: no flour ingredient"));
    }

    #[test]
    fn test_no_sync_warning_after_edits() {
        let mut recipe = Recipe::default();
        recipe.ingredients =
            crate::engine::update_amount(&recipe.ingredients, IngredientId(3), 33.333).unwrap();
        assert!(!format_recipe(&recipe).contains("out of sync"));

        recipe.ingredients = crate::engine::set_total_weight(&recipe.ingredients, 1000.0).unwrap();
        assert!(!format_recipe(&recipe).contains("out of sync"));

        recipe.ingredients[1].amount += 5.0;
        assert!(format_recipe(&recipe).contains("out of sync"));
    }

    #[test]
    fn test_share_link() {
        assert_eq!(share_link("#abc", None), "#abc");
        assert_eq!(
            share_link("#abc", Some("https://example.org/calc")),
            "https://example.org/calc#abc"
        );
    }
}
