pub mod export;
pub mod lookup;
pub mod prompts;
pub mod render;

pub use export::write_csv;
pub use lookup::{resolve_ingredient, FUZZY_MATCH_THRESHOLD};
pub use prompts::{prompt_ingredient, prompt_number, prompt_text, prompt_yes_no, run_editor};
pub use render::{display_library, display_recipe, format_recipe, share_link};
