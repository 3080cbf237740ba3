use dialoguer::{Confirm, Input, Select};

use crate::error::{RecipeError, Result};
use crate::interface::render::{display_recipe, share_link};
use crate::models::IngredientId;
use crate::state::RecipeStore;

const ACTIONS: [&str; 12] = [
    "Set amount",
    "Set percentage",
    "Toggle flour",
    "Rename ingredient",
    "Add ingredient",
    "Remove ingredient",
    "Move ingredient",
    "Scale to total weight",
    "Edit notes",
    "Show share link",
    "Save and quit",
    "Quit without saving",
];

/// Prompt for a non-negative number.
pub fn prompt_number(prompt: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| RecipeError::InvalidInput("Invalid number".to_string()))?;

    if !value.is_finite() || value < 0.0 {
        return Err(RecipeError::InvalidInput(
            "Value must be a non-negative number".to_string(),
        ));
    }

    Ok(value)
}

/// Prompt for free text, allowing an empty answer.
pub fn prompt_text(prompt: &str, default: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .allow_empty(true)
        .interact_text()?)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Let the user pick one ingredient from the current list.
pub fn prompt_ingredient(store: &RecipeStore, prompt: &str) -> Result<Option<IngredientId>> {
    let ingredients = store.ingredients();
    if ingredients.is_empty() {
        println!("No ingredients yet.");
        return Ok(None);
    }

    let labels: Vec<String> = ingredients.iter().map(|i| i.label()).collect();
    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(Some(ingredients[selection].id))
}

fn report(applied: bool) {
    if !applied {
        println!("Nothing changed.");
    }
}

/// Run one action against the store. Returns `Some(save)` when the session ends.
fn run_action(
    store: &mut RecipeStore,
    action: usize,
    share_base_url: Option<&str>,
) -> Result<Option<bool>> {
    match action {
        0 => {
            if let Some(id) = prompt_ingredient(store, "Which ingredient?")? {
                let current = store.state().ingredient(id).map_or(0.0, |i| i.amount);
                let amount = prompt_number("Amount (g)", current)?;
                report(store.update_amount(id, amount));
            }
        }
        1 => {
            if let Some(id) = prompt_ingredient(store, "Which ingredient?")? {
                let Some(ingredient) = store.state().ingredient(id) else {
                    return Ok(None);
                };
                if ingredient.is_flour {
                    println!("Flour is always 100 %. Edit its amount instead.");
                    return Ok(None);
                }
                let percentage = prompt_number("Percentage of flour", ingredient.percentage)?;
                report(store.update_percentage(id, percentage));
            }
        }
        2 => {
            if let Some(id) = prompt_ingredient(store, "Toggle flour on which ingredient?")? {
                report(store.toggle_flour(id));
            }
        }
        3 => {
            if let Some(id) = prompt_ingredient(store, "Rename which ingredient?")? {
                let current = store
                    .state()
                    .ingredient(id)
                    .map(|i| i.name.clone())
                    .unwrap_or_default();
                let name = prompt_text("New name", &current)?;
                report(store.rename(id, name.trim()));
            }
        }
        4 => {
            let name = prompt_text("Name", "")?;
            let is_flour = prompt_yes_no("Is it a flour?", false)?;
            let id = store.add_named_ingredient(name.trim(), is_flour);
            println!("Added ingredient {}.", id);
        }
        5 => {
            if let Some(id) = prompt_ingredient(store, "Remove which ingredient?")? {
                report(store.remove_ingredient(id));
            }
        }
        6 => {
            let dragged = prompt_ingredient(store, "Move which ingredient?")?;
            let target = prompt_ingredient(store, "Into the place of?")?;
            if let (Some(dragged), Some(target)) = (dragged, target) {
                report(store.reorder(dragged, target));
            }
        }
        7 => {
            let total = prompt_number("Target total weight (g)", store.state().total_weight())?;
            report(store.set_total_weight(total));
        }
        8 => {
            let notes = prompt_text("Notes", &store.state().notes)?;
            store.set_notes(&notes);
        }
        9 => {
            let fragment = store.share_fragment();
            if fragment.is_empty() {
                println!("Recipe could not be encoded.");
            } else {
                println!("{}", share_link(&fragment, share_base_url));
            }
        }
        10 => return Ok(Some(true)),
        _ => return Ok(Some(false)),
    }

    Ok(None)
}

/// Interactive editing session over the store.
///
/// Returns true if the user chose to save. Invalid numbers are reported and
/// the session continues.
pub fn run_editor(store: &mut RecipeStore, share_base_url: Option<&str>) -> Result<bool> {
    loop {
        display_recipe(store.state());

        let action = Select::new()
            .with_prompt("What next?")
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        match run_action(store, action, share_base_url) {
            Ok(Some(save)) => return Ok(save),
            Ok(None) => {}
            Err(RecipeError::InvalidInput(msg)) => println!("{}", msg),
            Err(e) => return Err(e),
        }
    }
}
