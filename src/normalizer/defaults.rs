use crate::model::{IngredientEntry, Nutrition};

pub const GENERIC_INSTRUCTION: &str = "Follow the preparation steps as described in the recipe.";

/// Beverage categories with fixed fallback content, recognized by title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Lemonade,
    Smoothie,
    Juice,
}

impl Category {
    /// Lemonade is checked first so "Lemonade juice" stays lemonade.
    pub fn from_title(title: &str) -> Option<Self> {
        let lower = title.to_lowercase();
        if lower.contains("lemonade") {
            Some(Category::Lemonade)
        } else if lower.contains("smoothie") {
            Some(Category::Smoothie)
        } else if lower.contains("juice") {
            Some(Category::Juice)
        } else {
            None
        }
    }

    pub fn ingredients(&self) -> Vec<IngredientEntry> {
        let items: &[(&str, f64, &str)] = match self {
            Category::Lemonade => &[
                ("Lemons", 4.0, ""),
                ("Sugar", 0.5, "cup"),
                ("Water", 4.0, "cups"),
                ("Ice", 1.0, "cup"),
            ],
            Category::Smoothie | Category::Juice => &[
                ("Main ingredient (fruit or base)", 2.0, "cups"),
                ("Liquid (water or juice)", 1.0, "cup"),
                ("Sweetener (optional)", 2.0, "tbsp"),
            ],
        };

        items
            .iter()
            .enumerate()
            .map(|(i, (name, amount, unit))| {
                IngredientEntry::new(format!("ing-{}", i + 1), *name, *amount, *unit)
            })
            .collect()
    }

    pub fn instructions(&self) -> Vec<String> {
        let steps: &[&str] = match self {
            Category::Lemonade => &[
                "Juice the lemons to make about 1 cup of juice.",
                "Add the sugar and stir until dissolved in the lemon juice.",
                "Add the water and stir to combine.",
                "Add ice cubes and serve immediately.",
                "Garnish with lemon slices if desired.",
            ],
            Category::Smoothie => &[
                "Add all ingredients to a blender.",
                "Blend until smooth and creamy.",
                "Pour into glasses and serve immediately.",
            ],
            Category::Juice => &[
                "Wash all produce thoroughly.",
                "Cut ingredients into pieces that will fit your juicer.",
                "Process through a juicer following manufacturer instructions.",
                "Stir and serve immediately over ice if desired.",
            ],
        };
        steps.iter().map(|step| step.to_string()).collect()
    }

    /// Typical values per serving
    pub fn nutrition(&self) -> Nutrition {
        let (calories, protein, carbs, fat, fiber) = match self {
            Category::Lemonade => (120, 0, 32, 0, 0),
            Category::Smoothie => (200, 5, 40, 2, 4),
            Category::Juice => (110, 1, 26, 0, 0),
        };
        Nutrition {
            calories,
            protein,
            carbs,
            fat,
            fiber,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_title() {
        assert_eq!(
            Category::from_title("Classic Pink Lemonade"),
            Some(Category::Lemonade)
        );
        assert_eq!(
            Category::from_title("Berry SMOOTHIE"),
            Some(Category::Smoothie)
        );
        assert_eq!(Category::from_title("Green juice"), Some(Category::Juice));
        assert_eq!(Category::from_title("Summer drink"), None);
        assert_eq!(Category::from_title("Beef Stew"), None);
    }

    #[test]
    fn test_lemonade_defaults() {
        let ingredients = Category::Lemonade.ingredients();
        assert_eq!(ingredients.len(), 4);
        assert_eq!(ingredients[1].name, "Sugar");
        assert_eq!(ingredients[1].amount, 0.5);
        assert_eq!(ingredients[3].id, "ing-4");
        assert_eq!(Category::Lemonade.instructions().len(), 5);
        assert_eq!(Category::Lemonade.nutrition().carbs, 32);
    }

    #[test]
    fn test_generic_beverage_defaults() {
        assert_eq!(Category::Juice.ingredients(), Category::Smoothie.ingredients());
        assert_eq!(Category::Juice.instructions().len(), 4);
        assert_eq!(Category::Smoothie.nutrition().fiber, 4);
    }
}
