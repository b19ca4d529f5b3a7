use chat_recipe_import::{
    Diagnostic, ImportConfig, ImportError, ImportResult, MealType, RecipeImporter,
};

const TWO_SMOOTHIES: &str = "🥤 Mango Smoothie\n\
Ingredients:\n\
- 1 cup mango\n\
- 1/2 cup yogurt\n\
Instructions:\n\
1. Blend everything until smooth.\n\
\n\
🥤 Green Smoothie\n\
Ingredients:\n\
- 2 cups spinach\n\
- 1 banana\n";

/// Text → drafts with builder API
#[test]
fn test_builder_text_to_drafts() {
    let result = RecipeImporter::builder()
        .text(TWO_SMOOTHIES)
        .extract_only()
        .build()
        .unwrap();

    match result {
        ImportResult::Drafts(drafts) => {
            let titles: Vec<&str> = drafts.iter().map(|d| d.title.as_str()).collect();
            assert_eq!(titles, vec!["Mango Smoothie", "Green Smoothie"]);
        }
        ImportResult::Recipe(_) => panic!("Expected drafts"),
    }
}

/// Text → recipe, selecting the second draft
#[test]
fn test_builder_select_second_recipe() {
    let result = RecipeImporter::builder()
        .text(TWO_SMOOTHIES)
        .meal_type(MealType::Breakfast)
        .select(1)
        .build()
        .unwrap();

    let ImportResult::Recipe(recipe) = result else {
        panic!("Expected a recipe");
    };
    assert_eq!(recipe.name, "Green Smoothie");
    assert_eq!(recipe.meal_type, MealType::Breakfast);
    assert_eq!(recipe.ingredients.len(), 2);
    // No steps in the text, so the smoothie sequence is used
    assert_eq!(recipe.instructions.len(), 3);
    assert_eq!(recipe.instructions[0], "Add all ingredients to a blender.");
    assert_eq!(recipe.nutritional_info.calories, 200);
}

#[test]
fn test_builder_custom_config() {
    let mut config = ImportConfig::default();
    config.normalize.default_servings = 4;
    config.normalize.tags = vec!["chat".to_string(), "smoothie".to_string()];
    config.normalize.cuisine = "Tropical".to_string();
    config.normalize.description_max_chars = 18;
    config.normalize.description_prefix = "From chat: ".to_string();

    let result = RecipeImporter::builder()
        .text(TWO_SMOOTHIES)
        .meal_type(MealType::Snack)
        .config(config)
        .build()
        .unwrap();

    let ImportResult::Recipe(recipe) = result else {
        panic!("Expected a recipe");
    };
    assert_eq!(recipe.servings, 4);
    assert_eq!(recipe.tags, vec!["chat", "smoothie"]);
    assert_eq!(recipe.cuisine, "Tropical");
    assert_eq!(recipe.description, "From chat: 🥤 Mango Smoothie\nI...");
}

#[test]
fn test_builder_collects_diagnostics() {
    let mut sink: Vec<Diagnostic> = Vec::new();
    RecipeImporter::builder()
        .text("Here is a recipe: 2 cups of rice, cooked.")
        .meal_type(MealType::Dinner)
        .build_with(&mut sink)
        .unwrap();

    assert!(sink
        .iter()
        .any(|d| matches!(d, Diagnostic::FallbackRecipe { .. })));
    assert!(sink.iter().any(|d| matches!(d, Diagnostic::Backfilled { .. })));
}

#[test]
fn test_builder_no_source_error() {
    let result = RecipeImporter::builder().meal_type(MealType::Lunch).build();

    assert!(result.is_err());
    match result.unwrap_err() {
        ImportError::BuilderError(msg) => assert!(msg.contains("No input text")),
        other => panic!("Expected BuilderError, got {:?}", other),
    }
}

#[test]
fn test_builder_no_recipe_detected() {
    let result = RecipeImporter::builder()
        .text("Just a grocery list: milk, eggs, bread")
        .meal_type(MealType::Lunch)
        .build();

    assert!(matches!(result, Err(ImportError::NoRecipeDetected)));
}

#[test]
fn test_builder_extract_only_with_no_recipe_is_empty() {
    let result = RecipeImporter::builder()
        .text("Thanks, that was delicious!")
        .extract_only()
        .build()
        .unwrap();

    assert!(matches!(result, ImportResult::Drafts(drafts) if drafts.is_empty()));
}

#[test]
fn test_import_result_to_json() {
    let drafts = RecipeImporter::builder()
        .text(TWO_SMOOTHIES)
        .extract_only()
        .build()
        .unwrap()
        .to_json_pretty()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&drafts).unwrap();
    assert_eq!(json[1]["title"], "Green Smoothie");

    let recipe = RecipeImporter::builder()
        .text(TWO_SMOOTHIES)
        .meal_type(MealType::Breakfast)
        .build()
        .unwrap()
        .to_json_pretty()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&recipe).unwrap();
    assert_eq!(json["name"], "Mango Smoothie");
    assert_eq!(json["mealType"], "breakfast");
}

#[test]
fn test_builder_invalid_meal_type_string() {
    let err = "elevenses".parse::<MealType>().unwrap_err();
    assert!(matches!(err, ImportError::InvalidMealType(ref s) if s == "elevenses"));
    assert_eq!(err.to_string(), "Invalid meal type: elevenses");
}
