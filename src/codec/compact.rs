//! Compact, URL-fragment-safe recipe tokens.
//!
//! Payload layout before base64:
//!
//! ```text
//! name,1,amount|name,0,percentage|...||notes
//! ```
//!
//! Flour entries carry their amount and everything else carries its
//! percentage, so decoding re-derives non-flour amounts from the flour total
//! and the baker's-percentage law holds as soon as a token is loaded.

use base64::{Engine as _, engine::general_purpose};
use tracing::warn;

use crate::engine::{DERIVED_DECIMALS, amount_for, round_to, total_flour_weight};
use crate::models::{Ingredient, IngredientId};

const ENTRY_SEPARATOR: &str = "|";
const FIELD_SEPARATOR: &str = ",";
const NOTES_SEPARATOR: &str = "||";
const NOTES_SENTINEL: &str = "%%";

/// Escaped stand-ins for the separators inside names and notes.
const ESCAPED_FIELD: &str = ";";
const ESCAPED_ENTRY: &str = "/";

/// Ingredient list and notes carried by a share token.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SharedRecipe {
    pub ingredients: Vec<Ingredient>,
    pub notes: String,
}

fn encode_entry(ingredient: &Ingredient) -> Option<String> {
    let value = if ingredient.is_flour {
        ingredient.amount
    } else {
        ingredient.percentage
    };
    if !value.is_finite() {
        return None;
    }

    let name = ingredient
        .name
        .replace(FIELD_SEPARATOR, ESCAPED_FIELD)
        .replace(ENTRY_SEPARATOR, ESCAPED_ENTRY);
    let flag = if ingredient.is_flour { "1" } else { "0" };

    Some(format!("{name}{FIELD_SEPARATOR}{flag}{FIELD_SEPARATOR}{value}"))
}

/// Encode an ingredient list and notes into a share token.
///
/// Returns an empty string if any authoritative value is not a finite number.
///
/// The escapes are not reversible for every input: `||` in notes is written
/// as `%%`, so notes that already contain `%%` decode with `||` in its place.
/// Likewise a literal `/` in a name or notes decodes as `|`, and a literal `;`
/// in a name decodes as `,`.
pub fn encode(ingredients: &[Ingredient], notes: &str) -> String {
    let entries: Option<Vec<String>> = ingredients.iter().map(encode_entry).collect();
    let Some(entries) = entries else {
        warn!("Refusing to encode recipe with non-finite quantities");
        return String::new();
    };

    let record = entries.join(ENTRY_SEPARATOR);
    let escaped_notes = notes
        .replace(NOTES_SEPARATOR, NOTES_SENTINEL)
        .replace(ENTRY_SEPARATOR, ESCAPED_ENTRY);

    let payload = if escaped_notes.is_empty() {
        record
    } else {
        format!("{record}{NOTES_SEPARATOR}{escaped_notes}")
    };

    general_purpose::URL_SAFE_NO_PAD.encode(payload)
}

fn decode_entry(entry: &str, position: usize) -> Option<Ingredient> {
    let mut fields = entry.split(FIELD_SEPARATOR);
    let (name, flag, value) = (fields.next()?, fields.next()?, fields.next()?);
    if fields.next().is_some() {
        return None;
    }

    let is_flour = match flag.trim() {
        "1" => true,
        "0" => false,
        _ => return None,
    };
    let value: f64 = value.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let name = name
        .replace(ESCAPED_FIELD, FIELD_SEPARATOR)
        .replace(ESCAPED_ENTRY, ENTRY_SEPARATOR);
    let id = IngredientId(u32::try_from(position + 1).ok()?);

    Some(if is_flour {
        Ingredient::flour(id, name, value)
    } else {
        // Amount is re-derived once the flour total is known.
        Ingredient::other(id, name, 0.0, value)
    })
}

fn decode_payload(token: &str) -> Option<String> {
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(token)
        .or_else(|_| general_purpose::STANDARD.decode(token));

    let bytes = match bytes {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to decode share token: {}", e);
            return None;
        }
    };

    match String::from_utf8(bytes) {
        Ok(payload) => Some(payload),
        Err(e) => {
            warn!("Share token is not valid UTF-8: {}", e);
            None
        }
    }
}

/// Decode a share token.
///
/// Ids are assigned by position starting at 1. Returns `None` for an empty or
/// malformed token; nothing is raised to the caller.
pub fn decode(token: &str) -> Option<SharedRecipe> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let payload = decode_payload(token)?;
    let (record, notes) = payload
        .split_once(NOTES_SEPARATOR)
        .unwrap_or((payload.as_str(), ""));

    let mut ingredients = Vec::new();
    for entry in record.split(ENTRY_SEPARATOR).filter(|e| !e.trim().is_empty()) {
        match decode_entry(entry, ingredients.len()) {
            Some(ingredient) => ingredients.push(ingredient),
            None => {
                warn!("Malformed share token entry: {:?}", entry);
                return None;
            }
        }
    }

    let total_flour = total_flour_weight(&ingredients);
    if total_flour > 0.0 {
        for ingredient in ingredients.iter_mut().filter(|i| !i.is_flour) {
            ingredient.amount = round_to(
                amount_for(ingredient.percentage, total_flour),
                DERIVED_DECIMALS,
            );
        }
    }

    let notes = notes
        .replace(NOTES_SENTINEL, NOTES_SEPARATOR)
        .replace(ESCAPED_ENTRY, ENTRY_SEPARATOR);

    Some(SharedRecipe { ingredients, notes })
}

/// `#<token>` for the document location, or empty if encoding failed.
pub fn to_fragment(ingredients: &[Ingredient], notes: &str) -> String {
    let token = encode(ingredients, notes);
    if token.is_empty() {
        token
    } else {
        format!("#{token}")
    }
}

/// Decode a location fragment, with or without its leading `#`.
pub fn from_fragment(fragment: &str) -> Option<SharedRecipe> {
    let fragment = fragment.trim();
    decode(fragment.strip_prefix('#').unwrap_or(fragment))
}
