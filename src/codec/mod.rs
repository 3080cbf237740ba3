mod compact;

pub use compact::{decode, encode, from_fragment, to_fragment, SharedRecipe};
