use crate::engine::constants::{FLOUR_PERCENTAGE, INVARIANT_TOLERANCE};
use crate::models::Ingredient;

/// Sum of every ingredient's amount.
pub fn total_weight(ingredients: &[Ingredient]) -> f64 {
    ingredients.iter().map(|i| i.amount).sum()
}

/// Sum of amounts over flour ingredients: the percentage denominator.
pub fn total_flour_weight(ingredients: &[Ingredient]) -> f64 {
    ingredients
        .iter()
        .filter(|i| i.is_flour)
        .map(|i| i.amount)
        .sum()
}

pub fn flour_count(ingredients: &[Ingredient]) -> usize {
    ingredients.iter().filter(|i| i.is_flour).count()
}

/// Round half away from zero to `decimals` places.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Amount implied by a percentage of the given flour weight.
#[inline]
pub fn amount_for(percentage: f64, total_flour: f64) -> f64 {
    percentage / FLOUR_PERCENTAGE * total_flour
}

/// Percentage of the given flour weight represented by an amount.
///
/// Returns `None` when there is no flour to divide by.
#[inline]
pub fn percentage_for(amount: f64, total_flour: f64) -> Option<f64> {
    if total_flour > 0.0 {
        Some(amount / total_flour * FLOUR_PERCENTAGE)
    } else {
        None
    }
}

/// Check that every non-flour ingredient agrees with its percentage of total flour.
///
/// An ingredient passes when its amount is within tolerance of the amount its
/// percentage implies (amount derived, in grams), or its percentage is within
/// tolerance of the percentage its amount implies (percentage derived, in
/// percent). Vacuously true when there is no flour weight to measure against.
pub fn satisfies_bakers_law(ingredients: &[Ingredient]) -> bool {
    let total_flour = total_flour_weight(ingredients);
    if total_flour <= 0.0 {
        return true;
    }

    ingredients.iter().filter(|i| !i.is_flour).all(|i| {
        let gram_gap = (i.amount - amount_for(i.percentage, total_flour)).abs();
        let percent_gap = percentage_for(i.amount, total_flour)
            .map_or(f64::INFINITY, |p| (p - i.percentage).abs());
        gram_gap <= INVARIANT_TOLERANCE || percent_gap <= INVARIANT_TOLERANCE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IngredientId;

    fn sample() -> Vec<Ingredient> {
        vec![
            Ingredient::flour(IngredientId(1), "Bread Flour", 800.0),
            Ingredient::flour(IngredientId(2), "Whole Wheat", 200.0),
            Ingredient::other(IngredientId(3), "Water", 700.0, 70.0),
            Ingredient::other(IngredientId(4), "Salt", 20.0, 2.0),
        ]
    }

    #[test]
    fn test_totals() {
        let ingredients = sample();
        assert!((total_weight(&ingredients) - 1720.0).abs() < 0.001);
        assert!((total_flour_weight(&ingredients) - 1000.0).abs() < 0.001);
        assert_eq!(flour_count(&ingredients), 2);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(33.333_333, 2), 33.33);
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(1234.56, 1), 1234.6);
    }

    #[test]
    fn test_percentage_for_zero_flour() {
        assert!(percentage_for(50.0, 0.0).is_none());
        assert_eq!(percentage_for(50.0, 200.0), Some(25.0));
    }

    #[test]
    fn test_satisfies_bakers_law() {
        let mut ingredients = sample();
        assert!(satisfies_bakers_law(&ingredients));

        ingredients[2].amount = 650.0;
        assert!(!satisfies_bakers_law(&ingredients));
    }

    #[test]
    fn test_bakers_law_accepts_rounded_percentage() {
        let mut ingredients = sample();
        // 33.333 g of 1000 g is 3.3333 %, stored as 3.33 %.
        ingredients[3].amount = 33.333;
        ingredients[3].percentage = 3.33;
        assert!(satisfies_bakers_law(&ingredients));

        ingredients[3].percentage = 3.3;
        assert!(!satisfies_bakers_law(&ingredients));
    }

    #[test]
    fn test_bakers_law_vacuous_without_flour() {
        let ingredients = vec![Ingredient::other(IngredientId(1), "Water", 100.0, 70.0)];
        assert!(satisfies_bakers_law(&ingredients));
    }
}
