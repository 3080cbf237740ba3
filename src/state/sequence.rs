use crate::models::IngredientId;

/// Session-scoped source of fresh ingredient ids.
///
/// Owned by a store instance, so two stores never share a counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u32,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdSequence {
    pub fn starting_at(next: u32) -> Self {
        Self { next: next.max(1) }
    }

    /// Sequence that continues after the highest id already in use.
    pub fn after(max_id: Option<IngredientId>) -> Self {
        Self::starting_at(max_id.map_or(1, |id| id.0.saturating_add(1)))
    }

    /// Hand out the next id.
    pub fn next_id(&mut self) -> IngredientId {
        let id = IngredientId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// The id the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> IngredientId {
        IngredientId(self.next)
    }

    /// Make sure future ids are greater than `id`.
    pub fn advance_past(&mut self, id: IngredientId) {
        if id.0 >= self.next {
            self.next = id.0.saturating_add(1);
        }
    }
}
