//! Edit operations over an ingredient snapshot.
//!
//! Each operation takes the current list by reference and returns
//! `Some(next)` with the recalculated list, or `None` when the edit does not
//! apply (unknown id, negative or non-finite input, nothing to scale). The
//! edited field is always authoritative; recalculation only flows outward
//! from it.

use crate::engine::calculations::{
    amount_for, percentage_for, round_to, satisfies_bakers_law, total_flour_weight, total_weight,
};
use crate::engine::constants::{DERIVED_DECIMALS, FLOUR_PERCENTAGE, SCALE_DECIMALS};
use crate::models::{Ingredient, IngredientId};

fn position(ingredients: &[Ingredient], id: IngredientId) -> Option<usize> {
    ingredients.iter().position(|i| i.id == id)
}

#[inline]
fn is_valid_quantity(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Re-derive every non-flour amount from its percentage.
///
/// Leaves the list untouched and returns false when total flour is zero.
fn recompute_amounts(ingredients: &mut [Ingredient]) -> bool {
    let total_flour = total_flour_weight(ingredients);
    if total_flour <= 0.0 {
        return false;
    }

    for ingredient in ingredients.iter_mut().filter(|i| !i.is_flour) {
        ingredient.amount = round_to(
            amount_for(ingredient.percentage, total_flour),
            DERIVED_DECIMALS,
        );
    }
    true
}

/// Append an ingredient. Rejected if its id is already taken.
pub fn add_ingredient(
    ingredients: &[Ingredient],
    ingredient: Ingredient,
) -> Option<Vec<Ingredient>> {
    if position(ingredients, ingredient.id).is_some() {
        return None;
    }

    let mut updated = ingredients.to_vec();
    updated.push(ingredient);
    Some(updated)
}

/// Set the amount of one ingredient.
///
/// A flour edit changes the denominator, so every non-flour ingredient keeps
/// its percentage and has its amount re-derived. A non-flour edit only
/// re-derives that ingredient's percentage. With zero flour weight the
/// derived fields are left as they were.
pub fn update_amount(
    ingredients: &[Ingredient],
    id: IngredientId,
    amount: f64,
) -> Option<Vec<Ingredient>> {
    if !is_valid_quantity(amount) {
        return None;
    }
    let index = position(ingredients, id)?;

    let mut updated = ingredients.to_vec();
    updated[index].amount = amount;

    if updated[index].is_flour {
        recompute_amounts(&mut updated);
    } else if let Some(percentage) = percentage_for(amount, total_flour_weight(&updated)) {
        updated[index].percentage = round_to(percentage, DERIVED_DECIMALS);
    }

    Some(updated)
}

/// Set the percentage of a non-flour ingredient and re-derive its amount.
///
/// Flour percentages are fixed, so editing one does not apply.
pub fn update_percentage(
    ingredients: &[Ingredient],
    id: IngredientId,
    percentage: f64,
) -> Option<Vec<Ingredient>> {
    if !is_valid_quantity(percentage) {
        return None;
    }
    let index = position(ingredients, id)?;
    if ingredients[index].is_flour {
        return None;
    }

    let total_flour = total_flour_weight(ingredients);
    let mut updated = ingredients.to_vec();
    let ingredient = &mut updated[index];
    ingredient.percentage = percentage;
    ingredient.amount = if total_flour > 0.0 {
        round_to(amount_for(percentage, total_flour), DERIVED_DECIMALS)
    } else {
        0.0
    };

    Some(updated)
}

/// Flip an ingredient between flour and non-flour.
///
/// The toggled ingredient keeps its amount. Other non-flour ingredients keep
/// their percentages and follow the new flour total. Toggling never promotes
/// a replacement flour, even if the flour set becomes empty.
pub fn toggle_flour(ingredients: &[Ingredient], id: IngredientId) -> Option<Vec<Ingredient>> {
    let index = position(ingredients, id)?;

    let mut updated = ingredients.to_vec();
    updated[index].is_flour = !updated[index].is_flour;
    let total_flour = total_flour_weight(&updated);

    for (i, ingredient) in updated.iter_mut().enumerate() {
        if ingredient.is_flour {
            ingredient.percentage = FLOUR_PERCENTAGE;
        } else if i == index {
            if let Some(percentage) = percentage_for(ingredient.amount, total_flour) {
                ingredient.percentage = round_to(percentage, DERIVED_DECIMALS);
            }
        } else {
            ingredient.amount = round_to(
                amount_for(ingredient.percentage, total_flour),
                DERIVED_DECIMALS,
            );
        }
    }

    Some(updated)
}

/// Scale every amount so the recipe weighs `new_total` grams.
///
/// Percentages are untouched: scaling preserves every ratio to flour.
pub fn set_total_weight(ingredients: &[Ingredient], new_total: f64) -> Option<Vec<Ingredient>> {
    if !is_valid_quantity(new_total) {
        return None;
    }
    let current_total = total_weight(ingredients);
    if current_total <= 0.0 {
        return None;
    }

    let ratio = new_total / current_total;
    let scaled = ingredients
        .iter()
        .map(|ingredient| Ingredient {
            amount: round_to(ingredient.amount * ratio, SCALE_DECIMALS),
            ..ingredient.clone()
        })
        .collect();

    Some(scaled)
}

/// Remove an ingredient.
///
/// If that empties the flour set while other ingredients remain, the first
/// remaining ingredient becomes flour and non-flour amounts are re-derived.
pub fn remove_ingredient(
    ingredients: &[Ingredient],
    id: IngredientId,
) -> Option<Vec<Ingredient>> {
    let index = position(ingredients, id)?;

    let mut updated = ingredients.to_vec();
    updated.remove(index);

    if !updated.is_empty() && !updated.iter().any(|i| i.is_flour) {
        let promoted = &mut updated[0];
        promoted.is_flour = true;
        promoted.percentage = FLOUR_PERCENTAGE;
        recompute_amounts(&mut updated);
    }

    Some(updated)
}

/// Move `dragged` into the position currently held by `target`.
pub fn reorder(
    ingredients: &[Ingredient],
    dragged: IngredientId,
    target: IngredientId,
) -> Option<Vec<Ingredient>> {
    let from = position(ingredients, dragged)?;
    let to = position(ingredients, target)?;
    if from == to {
        return None;
    }

    let mut updated = ingredients.to_vec();
    let item = updated.remove(from);
    updated.insert(to, item);
    Some(updated)
}

pub fn rename(
    ingredients: &[Ingredient],
    id: IngredientId,
    name: &str,
) -> Option<Vec<Ingredient>> {
    let index = position(ingredients, id)?;

    let mut updated = ingredients.to_vec();
    updated[index].name = name.to_string();
    Some(updated)
}

/// Restore the baker's-percentage law on a list from an untrusted source.
///
/// Flour percentages are reset to 100. Non-flour amounts are re-derived from
/// their percentages only when the list does not already satisfy the law, so
/// a consistent list keeps the amounts it was saved with.
pub fn normalize(ingredients: &[Ingredient]) -> Vec<Ingredient> {
    let mut updated = ingredients.to_vec();
    for ingredient in updated.iter_mut().filter(|i| i.is_flour) {
        ingredient.percentage = FLOUR_PERCENTAGE;
    }
    if !satisfies_bakers_law(&updated) {
        recompute_amounts(&mut updated);
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calculations::flour_count;

    fn dough() -> Vec<Ingredient> {
        vec![
            Ingredient::flour(IngredientId(1), "Flour", 1000.0),
            Ingredient::other(IngredientId(2), "Water", 600.0, 60.0),
            Ingredient::other(IngredientId(3), "Salt", 20.0, 2.0),
        ]
    }

    fn find(ingredients: &[Ingredient], id: u32) -> &Ingredient {
        ingredients.iter().find(|i| i.id == IngredientId(id)).unwrap()
    }

    #[test]
    fn test_flour_amount_edit_rederives_amounts() {
        let updated = update_amount(&dough(), IngredientId(1), 500.0).unwrap();

        assert!((find(&updated, 2).amount - 300.0).abs() < 0.01);
        assert!((find(&updated, 3).amount - 10.0).abs() < 0.01);
        assert_eq!(find(&updated, 2).percentage, 60.0);
        assert_eq!(find(&updated, 3).percentage, 2.0);
    }

    #[test]
    fn test_flour_amount_to_zero_leaves_others() {
        let updated = update_amount(&dough(), IngredientId(1), 0.0).unwrap();

        assert_eq!(find(&updated, 1).amount, 0.0);
        assert_eq!(find(&updated, 2).amount, 600.0);
        assert_eq!(find(&updated, 2).percentage, 60.0);
    }

    #[test]
    fn test_non_flour_amount_edit_rederives_percentage() {
        let updated = update_amount(&dough(), IngredientId(2), 725.0).unwrap();

        assert_eq!(find(&updated, 2).percentage, 72.5);
        assert_eq!(find(&updated, 1).amount, 1000.0);
        assert_eq!(find(&updated, 3).amount, 20.0);
    }

    #[test]
    fn test_non_flour_amount_edit_rounds_percentage() {
        let updated = update_amount(&dough(), IngredientId(3), 1.0 / 3.0 * 100.0).unwrap();
        assert_eq!(find(&updated, 3).percentage, 3.33);
        assert!(satisfies_bakers_law(&updated));

        let updated = update_amount(&dough(), IngredientId(3), 33.333).unwrap();
        assert_eq!(find(&updated, 3).amount, 33.333);
        assert_eq!(find(&updated, 3).percentage, 3.33);
        assert!(satisfies_bakers_law(&updated));
    }

    #[test]
    fn test_invalid_amount_is_rejected() {
        assert!(update_amount(&dough(), IngredientId(2), -5.0).is_none());
        assert!(update_amount(&dough(), IngredientId(2), f64::NAN).is_none());
        assert!(update_amount(&dough(), IngredientId(2), f64::INFINITY).is_none());
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        assert!(update_amount(&dough(), IngredientId(99), 10.0).is_none());
        assert!(update_percentage(&dough(), IngredientId(99), 10.0).is_none());
        assert!(toggle_flour(&dough(), IngredientId(99)).is_none());
        assert!(remove_ingredient(&dough(), IngredientId(99)).is_none());
        assert!(rename(&dough(), IngredientId(99), "x").is_none());
        assert!(reorder(&dough(), IngredientId(99), IngredientId(1)).is_none());
    }

    #[test]
    fn test_percentage_edit_rederives_amount() {
        let updated = update_percentage(&dough(), IngredientId(2), 70.0).unwrap();

        assert_eq!(find(&updated, 2).amount, 700.0);
        assert_eq!(find(&updated, 2).percentage, 70.0);
        assert_eq!(find(&updated, 1).amount, 1000.0);
        assert_eq!(find(&updated, 3).amount, 20.0);
    }

    #[test]
    fn test_percentage_edit_on_flour_does_not_apply() {
        assert!(update_percentage(&dough(), IngredientId(1), 50.0).is_none());
    }

    #[test]
    fn test_percentage_edit_without_flour_gives_zero_amount() {
        let ingredients = vec![Ingredient::other(IngredientId(1), "Water", 50.0, 60.0)];
        let updated = update_percentage(&ingredients, IngredientId(1), 80.0).unwrap();
        assert_eq!(updated[0].amount, 0.0);
        assert_eq!(updated[0].percentage, 80.0);
    }

    #[test]
    fn test_toggle_to_flour() {
        let updated = toggle_flour(&dough(), IngredientId(2)).unwrap();

        // Water becomes flour: 1600 g total flour.
        let water = find(&updated, 2);
        assert!(water.is_flour);
        assert_eq!(water.amount, 600.0);
        assert_eq!(water.percentage, 100.0);

        // Salt keeps 2 % of the new total.
        let salt = find(&updated, 3);
        assert_eq!(salt.percentage, 2.0);
        assert_eq!(salt.amount, 32.0);
        assert!(satisfies_bakers_law(&updated));
    }

    #[test]
    fn test_toggle_from_flour_with_remaining_flour() {
        let mut ingredients = dough();
        ingredients.insert(1, Ingredient::flour(IngredientId(4), "Rye", 250.0));
        let ingredients = update_amount(&ingredients, IngredientId(4), 250.0).unwrap();

        let updated = toggle_flour(&ingredients, IngredientId(4)).unwrap();
        let rye = find(&updated, 4);
        assert!(!rye.is_flour);
        assert_eq!(rye.amount, 250.0);
        assert_eq!(rye.percentage, 25.0);
        assert_eq!(find(&updated, 2).amount, 600.0);
        assert!(satisfies_bakers_law(&updated));
    }

    #[test]
    fn test_toggle_only_flour_does_not_promote() {
        let ingredients = vec![
            Ingredient::flour(IngredientId(1), "Flour", 1000.0),
            Ingredient::other(IngredientId(2), "Water", 600.0, 60.0),
        ];
        let updated = toggle_flour(&ingredients, IngredientId(1)).unwrap();

        assert_eq!(flour_count(&updated), 0);
        let toggled = find(&updated, 1);
        assert_eq!(toggled.percentage, 100.0);
        assert!(updated.iter().all(|i| i.amount.is_finite() && i.percentage.is_finite()));
    }

    #[test]
    fn test_set_total_weight_doubles() {
        let updated = set_total_weight(&dough(), 3240.0).unwrap();
        assert_eq!(find(&updated, 1).amount, 2000.0);
        assert_eq!(find(&updated, 2).amount, 1200.0);
        assert_eq!(find(&updated, 3).amount, 40.0);
        assert_eq!(find(&updated, 2).percentage, 60.0);
    }

    #[test]
    fn test_set_total_weight_rejections() {
        assert!(set_total_weight(&dough(), -1.0).is_none());
        let empty: Vec<Ingredient> = vec![Ingredient::blank(IngredientId(1))];
        assert!(set_total_weight(&empty, 100.0).is_none());
    }

    #[test]
    fn test_set_total_weight_to_zero() {
        let updated = set_total_weight(&dough(), 0.0).unwrap();
        assert!(updated.iter().all(|i| i.amount == 0.0));
    }

    #[test]
    fn test_remove_last_flour_promotes_first() {
        let updated = remove_ingredient(&dough(), IngredientId(1)).unwrap();

        assert_eq!(updated.len(), 2);
        let water = &updated[0];
        assert!(water.is_flour);
        assert_eq!(water.percentage, 100.0);
        // Salt is 2 % of the promoted 600 g.
        assert_eq!(updated[1].amount, 12.0);
    }

    #[test]
    fn test_remove_non_flour_keeps_others() {
        let updated = remove_ingredient(&dough(), IngredientId(2)).unwrap();
        assert_eq!(updated.len(), 2);
        assert_eq!(updated, vec![dough()[0].clone(), dough()[2].clone()]);
    }

    #[test]
    fn test_remove_only_ingredient() {
        let ingredients = vec![Ingredient::flour(IngredientId(1), "Flour", 500.0)];
        let updated = remove_ingredient(&ingredients, IngredientId(1)).unwrap();
        assert!(updated.is_empty());
    }

    #[test]
    fn test_reorder_moves_to_target_position() {
        let updated = reorder(&dough(), IngredientId(3), IngredientId(1)).unwrap();
        let ids: Vec<u32> = updated.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let updated = reorder(&dough(), IngredientId(1), IngredientId(3)).unwrap();
        let ids: Vec<u32> = updated.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(find(&updated, 1), &dough()[0]);
    }

    #[test]
    fn test_reorder_onto_self_does_not_apply() {
        assert!(reorder(&dough(), IngredientId(2), IngredientId(2)).is_none());
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        assert!(add_ingredient(&dough(), Ingredient::blank(IngredientId(2))).is_none());
        let updated = add_ingredient(&dough(), Ingredient::blank(IngredientId(4))).unwrap();
        assert_eq!(updated.len(), 4);
        assert_eq!(updated[3].id, IngredientId(4));
    }

    #[test]
    fn test_rename() {
        let updated = rename(&dough(), IngredientId(3), "Sea Salt").unwrap();
        assert_eq!(find(&updated, 3).name, "Sea Salt");
        assert_eq!(find(&updated, 3).amount, 20.0);
    }

    #[test]
    fn test_normalize_repairs_amounts() {
        let mut ingredients = dough();
        ingredients[0].percentage = 42.0;
        ingredients[1].amount = 1.0;

        let updated = normalize(&ingredients);
        assert_eq!(updated[0].percentage, 100.0);
        assert_eq!(updated[1].amount, 600.0);
        assert!(satisfies_bakers_law(&updated));
    }

    #[test]
    fn test_normalize_keeps_consistent_amounts() {
        let typed = update_amount(&dough(), IngredientId(3), 33.333).unwrap();
        let updated = normalize(&typed);
        assert_eq!(find(&updated, 3).amount, 33.333);
        assert_eq!(updated, typed);
    }

    #[test]
    fn test_set_total_weight_keeps_law() {
        let ingredients = vec![
            Ingredient::flour(IngredientId(1), "Flour", 1000.0),
            Ingredient::other(IngredientId(2), "Water", 600.0, 60.0),
            Ingredient::other(IngredientId(3), "Salt", 30.0, 3.0),
            Ingredient::other(IngredientId(4), "Yeast", 2.0, 0.2),
        ];
        // 1000 / 1632 does not terminate.
        let updated = set_total_weight(&ingredients, 1000.0).unwrap();
        assert_eq!(find(&updated, 1).amount, 612.7);
        assert_eq!(find(&updated, 3).amount, 18.4);
        assert_eq!(find(&updated, 3).percentage, 3.0);
        assert!(satisfies_bakers_law(&updated));
    }
}
