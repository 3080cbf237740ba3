pub mod calculations;
pub mod constants;
pub mod recalculate;

pub use calculations::{
    amount_for, flour_count, percentage_for, round_to, satisfies_bakers_law, total_flour_weight,
    total_weight,
};
pub use constants::*;
pub use recalculate::{
    add_ingredient, normalize, remove_ingredient, rename, reorder, set_total_weight, toggle_flour,
    update_amount, update_percentage,
};
