use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Baker's-percentage recipe calculator.
///
/// Flour is weighed, everything else is a percentage of total flour; editing
/// either side keeps the other in step.
#[derive(Parser, Debug)]
#[command(name = "bakers")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the working recipe JSON file.
    #[arg(short, long, env = "BAKERS_RECIPE_FILE")]
    pub file: Option<PathBuf>,

    /// Path to the saved-recipe library JSON file.
    #[arg(long, env = "BAKERS_LIBRARY_FILE")]
    pub library: Option<PathBuf>,

    /// Path to a TOML config file (defaults to ./bakers.toml if present).
    #[arg(short, long, env = "BAKERS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// Show the working recipe.
    #[default]
    Show,

    /// Add an ingredient with zero weight.
    Add {
        /// Ingredient name.
        name: String,

        /// Mark it as flour.
        #[arg(long)]
        flour: bool,
    },

    /// Remove an ingredient (by id or name).
    Remove { ingredient: String },

    /// Set an ingredient's weight in grams.
    Amount { ingredient: String, grams: f64 },

    /// Set a non-flour ingredient's percentage of total flour.
    Percent { ingredient: String, percentage: f64 },

    /// Switch an ingredient between flour and non-flour.
    ToggleFlour { ingredient: String },

    /// Rename an ingredient.
    Rename { ingredient: String, name: String },

    /// Move an ingredient into another ingredient's position.
    Move { ingredient: String, target: String },

    /// Scale every amount to a new total weight in grams.
    Scale { total: f64 },

    /// Set the recipe notes.
    Notes { text: String },

    /// Set the recipe title.
    Title { text: String },

    /// Set the recipe description.
    Description { text: String },

    /// Print a share link for the working recipe.
    Share,

    /// Replace ingredients and notes from a share link or token.
    Import { token: String },

    /// Export the ingredient list to CSV.
    Export { path: PathBuf },

    /// Edit the working recipe interactively.
    Edit,

    /// Reset the working recipe to the default.
    Reset,

    /// Manage saved recipes.
    #[command(subcommand)]
    Library(LibraryCommand),
}

#[derive(Subcommand, Debug)]
pub enum LibraryCommand {
    /// Save the working recipe (updates it in place with --id).
    Save {
        #[arg(long)]
        id: Option<u64>,
    },

    /// List saved recipes.
    List,

    /// Replace the working recipe with a saved one.
    Open { id: u64 },

    /// Delete a saved recipe.
    Delete { id: u64 },
}
