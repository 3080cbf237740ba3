/// Percentage carried by every flour ingredient.
pub const FLOUR_PERCENTAGE: f64 = 100.0;

/// Decimal places kept when a derived amount or percentage is written.
pub const DERIVED_DECIMALS: i32 = 2;

/// Decimal places kept for amounts after rescaling to a target weight.
pub const SCALE_DECIMALS: i32 = 1;

/// Tolerance used when checking the baker's-percentage law, in grams for a
/// derived amount and in percent for a derived percentage.
pub const INVARIANT_TOLERANCE: f64 = 0.01;
