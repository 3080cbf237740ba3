use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Share token could not be decoded")]
    InvalidShareToken,
}

pub type Result<T> = std::result::Result<T, RecipeError>;
