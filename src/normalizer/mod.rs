//! Turns a [`RecipeDraft`] into a storable [`Recipe`], backfilling whatever
//! the segmenter could not find.

use lazy_static::lazy_static;
use regex::Regex;

mod defaults;
mod validation;

pub use self::defaults::{Category, GENERIC_INSTRUCTION};
pub use self::validation::{validate, validate_and_repair, ValidationReport};

use crate::config::NormalizeConfig;
use crate::diagnostics::{BackfillField, BackfillSource, Diagnostic, DiagnosticSink};
use crate::extractors::{extract_nutrition, is_numbered, parse_ingredient, strip_list_marker};
use crate::model::{IngredientEntry, Nutrition, Recipe, RecipeDraft};

const PLACEHOLDER_INGREDIENT_ID: &str = "ing-default-1";
const PLACEHOLDER_INGREDIENT: &str = "Ingredients extracted from recipe";

lazy_static! {
    // From "ingredients" up to the start of the steps, or the end of the text
    static ref INGREDIENT_SPAN: Regex = Regex::new(
        r"(?is)\bingredients\b.*?(?:\b(?:instructions|directions|steps|preparation|method)\b:?|$)"
    )
    .expect("ingredient span pattern should be valid");
    // From the steps label up to any "nutrition..." word or notes, or the end of the text
    static ref INSTRUCTION_SPAN: Regex = Regex::new(
        r"(?is)\b(?:instructions|directions|steps|preparation|method|how to prepare|how to make)\b:?.*?(?:\bnutrition\w*:?|\b(?:notes|tips)\b:?|$)"
    )
    .expect("instruction span pattern should be valid");
    static ref INGREDIENT_HINT: Regex = Regex::new(
        r"(?i)\d+\s*(?:g|oz|cups?|tbsp|tsp|pound|lb)|chicken|beef|pork|fish|salt|pepper|oil|butter|garlic|onion|lemon|sugar|water"
    )
    .expect("ingredient hint pattern should be valid");
    static ref STEP_LABEL: Regex =
        Regex::new(r"(?i)^(?:instructions|directions|steps|preparation|method):?")
            .expect("step label pattern should be valid");
}

/// Fills gaps in a draft and shapes it into a [`Recipe`].
pub struct RecipeNormalizer<'a> {
    config: &'a NormalizeConfig,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> RecipeNormalizer<'a> {
    pub fn new(config: &'a NormalizeConfig, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self { config, sink }
    }

    /// Build a recipe from `draft`. A non-empty `title_hint` replaces the
    /// detected title. The meal type is left for the caller to set.
    pub fn normalize(&mut self, draft: &RecipeDraft, title_hint: &str) -> Recipe {
        let name = if title_hint.trim().is_empty() {
            draft.title.clone()
        } else {
            title_hint.trim().to_string()
        };
        let category = Category::from_title(&name);

        let ingredients = if draft.ingredients.is_empty() {
            self.backfill_ingredients(&draft.full_text, category)
        } else {
            draft.ingredients.clone()
        };

        let instructions = if draft.instructions.is_empty() {
            self.backfill_instructions(&draft.full_text, category)
        } else {
            draft.instructions.clone()
        };

        let nutritional_info = self.backfill_nutrition(draft, category);

        let prep_time = non_zero_or(draft.prep_time, self.config.default_prep_time);
        let cook_time = non_zero_or(draft.cook_time, self.config.default_cook_time);

        Recipe {
            id: draft.id.clone(),
            name,
            description: self.describe(&draft.full_text),
            meal_type: Default::default(),
            prep_time,
            cook_time,
            total_time: non_zero_or(draft.total_time, prep_time.saturating_add(cook_time)),
            servings: non_zero_or(draft.servings, self.config.default_servings),
            nutritional_info,
            ingredients,
            instructions,
            cuisine: self.config.cuisine.clone(),
            tags: self.config.tags.clone(),
            raw_nutritional_info: draft.raw_nutrition_text.clone(),
        }
    }

    fn backfill_ingredients(
        &mut self,
        full_text: &str,
        category: Option<Category>,
    ) -> Vec<IngredientEntry> {
        if let Some(span) = INGREDIENT_SPAN.find(full_text) {
            let candidates: Vec<&str> = span
                .as_str()
                .lines()
                .map(str::trim)
                .filter(|line| {
                    line.chars().count() > 3 && !line.to_lowercase().contains("ingredients:")
                })
                .collect();

            let listed: Vec<&str> = candidates
                .iter()
                .copied()
                .filter(|line| line.starts_with(['•', '-', '*']) || is_numbered(line))
                .collect();
            if !listed.is_empty() {
                return self.parsed_ingredients(&listed, BackfillSource::ListLines);
            }

            let hinted: Vec<&str> = candidates
                .iter()
                .copied()
                .filter(|line| INGREDIENT_HINT.is_match(line))
                .collect();
            if !hinted.is_empty() {
                return self.parsed_ingredients(&hinted, BackfillSource::KeywordLines);
            }
        }

        if let Some(ingredients) = category.map(|c| c.ingredients()) {
            self.backfilled(
                BackfillField::Ingredients,
                BackfillSource::CategoryDefaults,
                ingredients.len(),
            );
            return ingredients;
        }

        self.backfilled(BackfillField::Ingredients, BackfillSource::Placeholder, 1);
        vec![IngredientEntry::new(
            PLACEHOLDER_INGREDIENT_ID,
            PLACEHOLDER_INGREDIENT,
            0.0,
            "",
        )]
    }

    fn parsed_ingredients(
        &mut self,
        lines: &[&str],
        source: BackfillSource,
    ) -> Vec<IngredientEntry> {
        let ingredients: Vec<IngredientEntry> = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let mut entry = parse_ingredient(&strip_list_marker(line));
                entry.id = format!("ing-{}", i + 1);
                entry
            })
            .collect();
        self.backfilled(BackfillField::Ingredients, source, ingredients.len());
        ingredients
    }

    fn backfill_instructions(&mut self, full_text: &str, category: Option<Category>) -> Vec<String> {
        if let Some((steps, source)) = INSTRUCTION_SPAN
            .find(full_text)
            .and_then(|span| instructions_in_span(span.as_str()))
        {
            self.backfilled(BackfillField::Instructions, source, steps.len());
            return steps;
        }

        if let Some(steps) = category.map(|c| c.instructions()) {
            self.backfilled(
                BackfillField::Instructions,
                BackfillSource::CategoryDefaults,
                steps.len(),
            );
            return steps;
        }

        self.backfilled(BackfillField::Instructions, BackfillSource::Placeholder, 1);
        vec![GENERIC_INSTRUCTION.to_string()]
    }

    /// Each step only fills fields that are still zero.
    fn backfill_nutrition(&mut self, draft: &RecipeDraft, category: Option<Category>) -> Nutrition {
        let mut nutrition = draft.nutrition;

        if nutrition.calories == 0 || nutrition.carbs == 0 {
            if let Some(defaults) = category.map(|c| c.nutrition()) {
                if nutrition.fill_missing(&defaults) {
                    self.backfilled(BackfillField::Nutrition, BackfillSource::CategoryDefaults, 1);
                }
            }
        }

        for (text, source) in [
            (&draft.raw_nutrition_text, BackfillSource::RawNutrition),
            (&draft.full_text, BackfillSource::FullText),
        ] {
            if !nutrition.has_missing_macros() {
                break;
            }
            if nutrition.fill_missing(&extract_nutrition(text)) {
                self.backfilled(BackfillField::Nutrition, source, 1);
            }
        }

        nutrition
    }

    fn describe(&self, full_text: &str) -> String {
        let text = full_text.trim();
        if text.is_empty() {
            return self.config.default_description.clone();
        }

        let max = self.config.description_max_chars;
        let mut description = self.config.description_prefix.clone();
        if text.chars().count() > max {
            description.extend(text.chars().take(max));
            description.push_str("...");
        } else {
            description.push_str(text);
        }
        description
    }

    fn backfilled(&mut self, field: BackfillField, source: BackfillSource, count: usize) {
        self.sink.emit(Diagnostic::Backfilled {
            field,
            source,
            count,
        });
    }
}

/// Numbered steps first, then long paragraphs, then any reasonable line.
fn instructions_in_span(span: &str) -> Option<(Vec<String>, BackfillSource)> {
    let lines: Vec<&str> = span.lines().map(str::trim).collect();

    let numbered: Vec<String> = lines
        .iter()
        .filter(|line| is_numbered(line) && line.chars().count() > 10)
        .map(|line| strip_list_marker(line))
        .collect();
    if !numbered.is_empty() {
        return Some((numbered, BackfillSource::ListLines));
    }

    let unlabeled = || {
        lines
            .iter()
            .copied()
            .filter(|line| !STEP_LABEL.is_match(line))
    };

    let paragraphs: Vec<String> = unlabeled()
        .filter(|line| line.chars().count() > 20 && !line.starts_with(['#', '*', '-']))
        .map(str::to_string)
        .collect();
    if !paragraphs.is_empty() {
        return Some((paragraphs, BackfillSource::Paragraphs));
    }

    let any: Vec<String> = unlabeled()
        .filter(|line| line.chars().count() > 10)
        .map(str::to_string)
        .collect();
    if !any.is_empty() {
        return Some((any, BackfillSource::AnyLines));
    }

    None
}

fn non_zero_or(value: u32, default: u32) -> u32 {
    if value == 0 {
        default
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(draft: &RecipeDraft, title_hint: &str) -> (Recipe, Vec<Diagnostic>) {
        let config = NormalizeConfig::default();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let recipe = RecipeNormalizer::new(&config, &mut sink).normalize(draft, title_hint);
        (recipe, sink)
    }

    fn draft(title: &str, full_text: &str) -> RecipeDraft {
        let mut draft = RecipeDraft::new("recipe-1", title, 0);
        draft.full_text = full_text.to_string();
        draft
    }

    #[test]
    fn test_extracted_content_is_kept() {
        let mut d = draft("Veggie Stew", "# Veggie Stew");
        d.add_ingredient(IngredientEntry::new("", "carrots", 2.0, "cups"));
        d.instructions.push("Chop vegetables.".to_string());
        d.prep_time = 10;
        let (recipe, sink) = normalize(&d, "");

        assert_eq!(recipe.name, "Veggie Stew");
        assert_eq!(recipe.ingredients, d.ingredients);
        assert_eq!(recipe.instructions, d.instructions);
        assert_eq!(recipe.prep_time, 10);
        assert_eq!(recipe.cook_time, 15);
        assert_eq!(recipe.total_time, 25);
        assert_eq!(recipe.servings, 2);
        assert_eq!(recipe.tags, vec!["ai-recommended"]);
        assert!(!sink.iter().any(|d| matches!(
            d,
            Diagnostic::Backfilled {
                field: BackfillField::Ingredients | BackfillField::Instructions,
                ..
            }
        )));
    }

    #[test]
    fn test_title_hint_wins() {
        let (recipe, _) = normalize(&draft("Soup", ""), "  Grandma's Soup ");
        assert_eq!(recipe.name, "Grandma's Soup");
    }

    #[test]
    fn test_ingredients_from_list_lines() {
        let text = "Tasty Pasta\nIngredients:\n- 200g spaghetti\n- 2 tbsp olive oil\nInstructions:\nBoil.";
        let (recipe, sink) = normalize(&draft("Tasty Pasta", text), "");

        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[0].name, "spaghetti");
        assert_eq!(recipe.ingredients[1].id, "ing-2");
        assert!(sink.contains(&Diagnostic::Backfilled {
            field: BackfillField::Ingredients,
            source: BackfillSource::ListLines,
            count: 2,
        }));
    }

    #[test]
    fn test_ingredients_from_keyword_lines() {
        let text = "Ingredients\nchicken breast\na splash of water\nfresh herbs\nMethod";
        let (recipe, _) = normalize(&draft("Poached chicken", text), "");
        let names: Vec<&str> = recipe.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["chicken breast", "a splash of water"]);
    }

    #[test]
    fn test_beverage_defaults() {
        let (recipe, sink) = normalize(&draft("Classic Lemonade", "# Classic Lemonade"), "");

        assert_eq!(recipe.ingredients.len(), 4);
        assert_eq!(recipe.ingredients[0].name, "Lemons");
        assert_eq!(recipe.instructions.len(), 5);
        assert_eq!(recipe.nutritional_info.calories, 120);
        assert_eq!(recipe.nutritional_info.carbs, 32);
        assert!(sink.contains(&Diagnostic::Backfilled {
            field: BackfillField::Instructions,
            source: BackfillSource::CategoryDefaults,
            count: 5,
        }));
    }

    #[test]
    fn test_placeholders_for_unknown_dishes() {
        let (recipe, _) = normalize(&draft("Mystery Dish", "just a dish"), "");
        assert_eq!(recipe.ingredients.len(), 1);
        assert_eq!(recipe.ingredients[0].id, "ing-default-1");
        assert_eq!(recipe.ingredients[0].name, "Ingredients extracted from recipe");
        assert_eq!(recipe.instructions, vec![GENERIC_INSTRUCTION]);
    }

    #[test]
    fn test_instruction_fallback_order() {
        let numbered = "Instructions:\n1. Whisk the eggs well.\n2. Fry gently in butter.\nNotes: none";
        assert_eq!(
            instructions_in_span(numbered),
            Some((
                vec![
                    "Whisk the eggs well.".to_string(),
                    "Fry gently in butter.".to_string()
                ],
                BackfillSource::ListLines
            ))
        );

        let prose = "Directions:\nWhisk the eggs until they are fluffy.\n- short bullet line here\n";
        assert_eq!(
            instructions_in_span(prose),
            Some((
                vec!["Whisk the eggs until they are fluffy.".to_string()],
                BackfillSource::Paragraphs
            ))
        );

        let short = "Steps:\n- Whisk eggs.\n";
        assert_eq!(
            instructions_in_span(short),
            Some((vec!["- Whisk eggs.".to_string()], BackfillSource::AnyLines))
        );

        assert_eq!(instructions_in_span("Steps:\nStir."), None);

        let (recipe, _) = normalize(
            &draft(
                "Oat Bowl",
                "Oat Bowl\nInstructions:\nWhisk everything together in a large bowl.\nNutritional Facts:\nCalories: 300 kcal per serving, roughly",
            ),
            "",
        );
        assert_eq!(
            recipe.instructions,
            vec!["Whisk everything together in a large bowl."]
        );
        assert_eq!(recipe.nutritional_info.calories, 300);
    }

    #[test]
    fn test_total_time_saturates() {
        let mut d = draft("Chicken Stew", "# Chicken Stew");
        d.prep_time = 4_000_000_000;
        d.cook_time = 4_000_000_000;
        let (recipe, _) = normalize(&d, "");
        assert_eq!(recipe.total_time, u32::MAX);
    }

    #[test]
    fn test_nutrition_backfill_never_overwrites() {
        let mut d = draft(
            "Berry Smoothie",
            "# Berry Smoothie\nCalories: 999, Protein: 12g, Carbs: 99g",
        );
        d.nutrition.protein = 8;
        d.raw_nutrition_text = "Protein: 30g\nFat: 3g".to_string();
        let (recipe, _) = normalize(&d, "");

        assert_eq!(
            recipe.nutritional_info,
            Nutrition {
                calories: 200,
                protein: 8,
                carbs: 40,
                fat: 2,
                fiber: 4,
            }
        );
    }

    #[test]
    fn test_nutrition_from_raw_then_full_text() {
        let mut d = draft("Beef Tacos", "# Beef Tacos\nabout 15g fat per taco");
        d.raw_nutrition_text = "Calories: 450\nProtein: 28g\nCarbs: 35g".to_string();
        let (recipe, sink) = normalize(&d, "");

        assert_eq!(recipe.nutritional_info.calories, 450);
        assert_eq!(recipe.nutritional_info.fat, 15);
        assert!(sink.contains(&Diagnostic::Backfilled {
            field: BackfillField::Nutrition,
            source: BackfillSource::FullText,
            count: 1,
        }));
    }

    #[test]
    fn test_description() {
        let long = "x".repeat(320);
        let (recipe, _) = normalize(&draft("Soup", &long), "");
        assert_eq!(recipe.description.chars().count(), 303);
        assert!(recipe.description.ends_with("..."));

        let (recipe, _) = normalize(&draft("Soup", "Short soup."), "");
        assert_eq!(recipe.description, "Short soup.");

        let (recipe, _) = normalize(&draft("Soup", "  "), "");
        assert_eq!(recipe.description, "Added from AI recommendation");
    }
}
