use tracing::debug;

use crate::codec;
use crate::engine;
use crate::models::{Ingredient, IngredientId, Recipe};
use crate::state::IdSequence;

/// Handle returned by [`RecipeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Recipe)>;

/// Observable container for the recipe being edited.
///
/// Every edit runs through the recalculation engine. Edits that apply are
/// committed and listeners are notified synchronously, in subscription
/// order. Edits that do not apply leave the state alone and notify nobody.
/// Single-threaded: callers serialize edits.
pub struct RecipeStore {
    recipe: Recipe,
    ids: IdSequence,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for RecipeStore {
    fn default() -> Self {
        Self::new(Recipe::default())
    }
}

impl RecipeStore {
    pub fn new(recipe: Recipe) -> Self {
        let ids = IdSequence::after(recipe.max_ingredient_id());
        Self {
            recipe,
            ids,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &Recipe {
        &self.recipe
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.recipe.ingredients
    }

    /// Replace the whole recipe and notify listeners.
    pub fn set_state(&mut self, recipe: Recipe) {
        if let Some(max_id) = recipe.max_ingredient_id() {
            self.ids.advance_past(max_id);
        }
        self.commit(recipe);
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Recipe) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Id the next added ingredient will receive.
    pub fn next_id(&self) -> IngredientId {
        self.ids.peek()
    }

    pub fn set_next_id(&mut self, next: u32) {
        self.ids = IdSequence::starting_at(next);
        if let Some(max_id) = self.recipe.max_ingredient_id() {
            self.ids.advance_past(max_id);
        }
    }

    fn commit(&mut self, recipe: Recipe) {
        self.recipe = recipe;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.recipe);
        }
    }

    fn apply(&mut self, operation: &str, next: Option<Vec<Ingredient>>) -> bool {
        match next {
            Some(ingredients) => {
                debug!(operation, count = ingredients.len(), "ingredients updated");
                let recipe = Recipe {
                    ingredients,
                    ..self.recipe.clone()
                };
                self.commit(recipe);
                true
            }
            None => {
                debug!(operation, "edit not applicable, state unchanged");
                false
            }
        }
    }

    /// Append a blank non-flour ingredient.
    pub fn add_ingredient(&mut self) -> IngredientId {
        let id = self.ids.next_id();
        let next = engine::add_ingredient(&self.recipe.ingredients, Ingredient::blank(id));
        self.apply("add", next);
        id
    }

    /// Append a named ingredient with zero weight.
    pub fn add_named_ingredient(&mut self, name: &str, is_flour: bool) -> IngredientId {
        let id = self.ids.next_id();
        let ingredient = if is_flour {
            Ingredient::flour(id, name, 0.0)
        } else {
            Ingredient::other(id, name, 0.0, 0.0)
        };
        let next = engine::add_ingredient(&self.recipe.ingredients, ingredient);
        self.apply("add", next);
        id
    }

    pub fn remove_ingredient(&mut self, id: IngredientId) -> bool {
        let next = engine::remove_ingredient(&self.recipe.ingredients, id);
        self.apply("remove", next)
    }

    pub fn update_amount(&mut self, id: IngredientId, amount: f64) -> bool {
        let next = engine::update_amount(&self.recipe.ingredients, id, amount);
        self.apply("update_amount", next)
    }

    pub fn update_percentage(&mut self, id: IngredientId, percentage: f64) -> bool {
        let next = engine::update_percentage(&self.recipe.ingredients, id, percentage);
        self.apply("update_percentage", next)
    }

    pub fn toggle_flour(&mut self, id: IngredientId) -> bool {
        let next = engine::toggle_flour(&self.recipe.ingredients, id);
        self.apply("toggle_flour", next)
    }

    pub fn rename(&mut self, id: IngredientId, name: &str) -> bool {
        let next = engine::rename(&self.recipe.ingredients, id, name);
        self.apply("rename", next)
    }

    pub fn reorder(&mut self, dragged: IngredientId, target: IngredientId) -> bool {
        let next = engine::reorder(&self.recipe.ingredients, dragged, target);
        self.apply("reorder", next)
    }

    pub fn set_total_weight(&mut self, new_total: f64) -> bool {
        let next = engine::set_total_weight(&self.recipe.ingredients, new_total);
        self.apply("set_total_weight", next)
    }

    pub fn set_title(&mut self, title: &str) {
        let recipe = Recipe {
            title: title.to_string(),
            ..self.recipe.clone()
        };
        self.commit(recipe);
    }

    pub fn set_description(&mut self, description: &str) {
        let recipe = Recipe {
            description: description.to_string(),
            ..self.recipe.clone()
        };
        self.commit(recipe);
    }

    pub fn set_notes(&mut self, notes: &str) {
        let recipe = Recipe {
            notes: notes.to_string(),
            ..self.recipe.clone()
        };
        self.commit(recipe);
    }

    pub fn toggle_view_mode(&mut self) {
        let recipe = Recipe {
            view_mode: !self.recipe.view_mode,
            ..self.recipe.clone()
        };
        self.commit(recipe);
    }

    /// Back to the default recipe. Ids continue after the default's ids.
    pub fn reset(&mut self) {
        let recipe = Recipe::default();
        self.ids = IdSequence::after(recipe.max_ingredient_id());
        self.commit(recipe);
    }

    /// `#<token>` sharing the current ingredients and notes.
    pub fn share_fragment(&self) -> String {
        codec::to_fragment(&self.recipe.ingredients, &self.recipe.notes)
    }

    /// Load ingredients and notes from a share fragment.
    ///
    /// Title and description are kept. Returns false, leaving the state
    /// untouched, if the fragment does not decode.
    pub fn load_fragment(&mut self, fragment: &str) -> bool {
        let Some(shared) = codec::from_fragment(fragment) else {
            return false;
        };

        let recipe = Recipe {
            ingredients: shared.ingredients,
            notes: shared.notes,
            ..self.recipe.clone()
        };
        self.ids = IdSequence::after(recipe.max_ingredient_id());
        self.commit(recipe);
        true
    }
}
