use std::fmt;

use serde::{Deserialize, Serialize};

/// Session-scoped ingredient identity.
///
/// Stable while a recipe is being edited; persistence layers may remap it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(pub u32);

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single recipe component.
///
/// Flour ingredients carry an authoritative `amount` and a fixed percentage
/// of 100. Everything else carries an authoritative `percentage` of total
/// flour weight, with `amount` derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: IngredientId,

    pub name: String,

    #[serde(default)]
    pub is_flour: bool,

    /// Weight in grams.
    #[serde(default)]
    pub amount: f64,

    #[serde(default)]
    pub percentage: f64,
}

impl Ingredient {
    /// Blank non-flour ingredient, as appended by "add ingredient".
    pub fn blank(id: IngredientId) -> Self {
        Self {
            id,
            name: String::new(),
            is_flour: false,
            amount: 0.0,
            percentage: 0.0,
        }
    }

    /// Flour ingredient with the given weight.
    pub fn flour(id: IngredientId, name: impl Into<String>, amount: f64) -> Self {
        Self {
            id,
            name: name.into(),
            is_flour: true,
            amount,
            percentage: 100.0,
        }
    }

    /// Non-flour ingredient with both fields supplied by the caller.
    pub fn other(id: IngredientId, name: impl Into<String>, amount: f64, percentage: f64) -> Self {
        Self {
            id,
            name: name.into(),
            is_flour: false,
            amount,
            percentage,
        }
    }

    /// Finite, non-negative amount and finite percentage.
    pub fn is_valid(&self) -> bool {
        self.amount.is_finite()
            && self.amount >= 0.0
            && self.percentage.is_finite()
            && self.percentage >= 0.0
    }

    /// Display name, falling back to the id for unnamed ingredients.
    pub fn label(&self) -> String {
        if self.name.trim().is_empty() {
            format!("(unnamed {})", self.id)
        } else {
            self.name.clone()
        }
    }
}
