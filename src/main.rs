use log::{debug, error};
use std::env;
use std::fs;
use std::io::{self, Read};

use chat_recipe_import::{ImportConfig, ImportError, MealType, RecipeImporter};

const USAGE: &str = "Usage: chat-recipe-import <file|-> [meal-type] [title]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get the input path and optional meal type / title from command-line arguments
    let args: Vec<String> = env::args().collect();
    let path = args.get(1).ok_or(USAGE)?;

    match run(path, args.get(2), args.get(3)) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Unable to import a recipe: {}", e);
            Err(e.into())
        }
    }
}

fn run(
    path: &str,
    meal_type: Option<&String>,
    title: Option<&String>,
) -> Result<String, ImportError> {
    let text = read_input(path)?;

    let config = ImportConfig::load()?;
    debug!("{:#?}", config);

    let mut builder = RecipeImporter::builder().text(text).config(config);
    builder = match meal_type {
        Some(meal_type) => builder.meal_type(meal_type.parse::<MealType>()?),
        None => builder.extract_only(),
    };
    if let Some(title) = title {
        builder = builder.title(title.as_str());
    }

    builder.build()?.to_json_pretty()
}

fn read_input(path: &str) -> Result<String, ImportError> {
    if path == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}
