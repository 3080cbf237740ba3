use std::path::Path;

use crate::error::Result;
use crate::models::Ingredient;

/// Write the ingredient list to a CSV file, one row per ingredient in order.
pub fn write_csv(ingredients: &[Ingredient], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["name", "is_flour", "amount", "percentage"])?;

    for ingredient in ingredients {
        wtr.write_record([
            ingredient.name.clone(),
            ingredient.is_flour.to_string(),
            format!("{:.2}", ingredient.amount),
            format!("{:.2}", ingredient.percentage),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IngredientId;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_csv() {
        let ingredients = vec![
            Ingredient::flour(IngredientId(1), "Flour, T65", 1000.0),
            Ingredient::other(IngredientId(2), "Water", 650.0, 65.0),
        ];

        let file = NamedTempFile::new().unwrap();
        write_csv(&ingredients, file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "name,is_flour,amount,percentage");
        assert_eq!(lines[1], "\"Flour, T65\",true,1000.00,100.00");
        assert_eq!(lines[2], "Water,false,650.00,65.00");
    }
}
