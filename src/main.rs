use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use bakers_percent_rs::cli::{Cli, Command, LibraryCommand};
use bakers_percent_rs::config::{Settings, load_settings};
use bakers_percent_rs::error::{RecipeError, Result};
use bakers_percent_rs::interface::{
    display_library, display_recipe, resolve_ingredient, run_editor, share_link, write_csv,
};
use bakers_percent_rs::state::{
    JsonFileRepository, RecipeRepository, RecipeStore, load_recipe, save_recipe,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(settings: &Settings) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_directive().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    init_logging(&settings);

    let recipe_file = cli.file.unwrap_or_else(|| settings.recipe_file.clone());
    let library_file = cli.library.unwrap_or_else(|| settings.library_file.clone());
    let share_base_url = settings.share_base_url.as_deref();
    let command = cli.command.unwrap_or_default();

    info!("Working recipe: {}", recipe_file.display());

    match command {
        Command::Show => cmd_show(&recipe_file),
        Command::Add { name, flour } => edit_recipe(&recipe_file, |store| {
            let id = store.add_named_ingredient(&name, flour);
            println!("Added {} as {}.", name, id);
            Ok(true)
        }),
        Command::Remove { ingredient } => edit_recipe(&recipe_file, |store| {
            let id = resolve_ingredient(store.ingredients(), &ingredient)?;
            Ok(store.remove_ingredient(id))
        }),
        Command::Amount { ingredient, grams } => edit_recipe(&recipe_file, |store| {
            let id = resolve_ingredient(store.ingredients(), &ingredient)?;
            Ok(store.update_amount(id, grams))
        }),
        Command::Percent {
            ingredient,
            percentage,
        } => edit_recipe(&recipe_file, |store| {
            let id = resolve_ingredient(store.ingredients(), &ingredient)?;
            if store.state().ingredient(id).is_some_and(|i| i.is_flour) {
                return Err(RecipeError::InvalidInput(
                    "flour is always 100 %; set its amount instead".to_string(),
                ));
            }
            Ok(store.update_percentage(id, percentage))
        }),
        Command::ToggleFlour { ingredient } => edit_recipe(&recipe_file, |store| {
            let id = resolve_ingredient(store.ingredients(), &ingredient)?;
            Ok(store.toggle_flour(id))
        }),
        Command::Rename { ingredient, name } => edit_recipe(&recipe_file, |store| {
            let id = resolve_ingredient(store.ingredients(), &ingredient)?;
            Ok(store.rename(id, &name))
        }),
        Command::Move { ingredient, target } => edit_recipe(&recipe_file, |store| {
            let dragged = resolve_ingredient(store.ingredients(), &ingredient)?;
            let target = resolve_ingredient(store.ingredients(), &target)?;
            Ok(store.reorder(dragged, target))
        }),
        Command::Scale { total } => {
            edit_recipe(&recipe_file, |store| Ok(store.set_total_weight(total)))
        }
        Command::Notes { text } => edit_recipe(&recipe_file, |store| {
            store.set_notes(&text);
            Ok(true)
        }),
        Command::Title { text } => edit_recipe(&recipe_file, |store| {
            store.set_title(&text);
            Ok(true)
        }),
        Command::Description { text } => edit_recipe(&recipe_file, |store| {
            store.set_description(&text);
            Ok(true)
        }),
        Command::Share => cmd_share(&recipe_file, share_base_url),
        Command::Import { token } => edit_recipe(&recipe_file, |store| {
            // Accept a whole link as well as a bare token.
            let fragment = token.rsplit_once('#').map_or(token.as_str(), |(_, t)| t);
            if store.load_fragment(fragment) {
                Ok(true)
            } else {
                Err(RecipeError::InvalidShareToken)
            }
        }),
        Command::Export { path } => cmd_export(&recipe_file, &path),
        Command::Edit => cmd_edit(&recipe_file, share_base_url),
        Command::Reset => edit_recipe(&recipe_file, |store| {
            store.reset();
            Ok(true)
        }),
        Command::Library(sub) => cmd_library(&recipe_file, library_file, sub),
    }
}

/// Load the working recipe, apply an edit, and save it if the edit applied.
fn edit_recipe<F>(path: &Path, edit: F) -> Result<()>
where
    F: FnOnce(&mut RecipeStore) -> Result<bool>,
{
    let mut store = RecipeStore::new(load_recipe(path)?);

    if edit(&mut store)? {
        save_recipe(path, store.state())?;
        info!("Saved {}", path.display());
    } else {
        println!("Nothing changed.");
    }

    display_recipe(store.state());
    Ok(())
}

fn cmd_show(path: &Path) -> Result<()> {
    let recipe = load_recipe(path)?;
    display_recipe(&recipe);
    Ok(())
}

fn cmd_share(path: &Path, share_base_url: Option<&str>) -> Result<()> {
    let store = RecipeStore::new(load_recipe(path)?);
    let fragment = store.share_fragment();

    if fragment.is_empty() {
        return Err(RecipeError::InvalidInput(
            "recipe could not be encoded".to_string(),
        ));
    }

    println!("{}", share_link(&fragment, share_base_url));
    Ok(())
}

fn cmd_export(recipe_path: &Path, csv_path: &Path) -> Result<()> {
    let recipe = load_recipe(recipe_path)?;
    write_csv(&recipe.ingredients, csv_path)?;
    println!(
        "Exported {} ingredients to {}.",
        recipe.ingredients.len(),
        csv_path.display()
    );
    Ok(())
}

fn cmd_edit(path: &Path, share_base_url: Option<&str>) -> Result<()> {
    let mut store = RecipeStore::new(load_recipe(path)?);

    if run_editor(&mut store, share_base_url)? {
        save_recipe(path, store.state())?;
        println!("Recipe saved.");
    }

    Ok(())
}

fn cmd_library(recipe_path: &Path, library_path: PathBuf, command: LibraryCommand) -> Result<()> {
    let mut repo = JsonFileRepository::new(library_path);

    match command {
        LibraryCommand::Save { id } => {
            let recipe = load_recipe(recipe_path)?;
            match id {
                Some(id) => {
                    repo.update(id, &recipe)?;
                    println!("Updated saved recipe {}.", id);
                }
                None => {
                    let id = repo.create(&recipe)?;
                    println!("Saved as recipe {}.", id);
                }
            }
        }
        LibraryCommand::List => display_library(&repo.list()?),
        LibraryCommand::Open { id } => {
            let recipe = repo.read(id)?;
            save_recipe(recipe_path, &recipe)?;
            display_recipe(&recipe);
        }
        LibraryCommand::Delete { id } => {
            repo.delete(id)?;
            println!("Deleted recipe {}.", id);
        }
    }

    Ok(())
}
