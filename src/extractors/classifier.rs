use lazy_static::lazy_static;
use regex::Regex;

use super::{has_measurement, is_list_item, is_numbered, strip_list_marker};
use crate::extractors::extract_nutrition;
use crate::model::Section;

/// What a single line of a chat message looks like
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// "Ingredients:", "## Instructions", "Nutrition Facts" ...
    SectionHeader(Section),
    /// A recipe title with its markers removed
    Title(String),
    /// Ingredient text with the list marker removed
    Ingredient(String),
    /// Instruction text with the list marker removed
    Instruction(String),
    /// A line inside a nutrition section, kept verbatim
    Nutrition(String),
    Plain(String),
}

/// How strictly section headers are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMatching {
    /// The header line must be one of a fixed vocabulary
    #[default]
    Strict,
    /// Short lines that merely contain a header word also count.
    /// Used when the message has no recognizable recipe title.
    Relaxed,
}

const FOOD_EMOJI: &[char] = &[
    '🍽', '🍳', '🥗', '🍲', '🥘', '🍚', '🍝', '🍗', '🍖', '🥩', '🥞', '🍋', '🍔', '🌮', '🌯',
    '🥤', '🧃', '🍵', '🥪',
];

const TITLE_KEYWORDS: &[&str] = &[
    "recipe", "bowl", "salad", "sandwich", "meal", "dish", "breakfast", "lunch", "dinner",
    "dessert", "drink", "smoothie", "juice", "lemonade", "soup", "cake", "pie", "stew",
    "casserole", "curry", "stir-fry", "pasta", "burger", "taco", "wrap", "chicken", "beef",
    "pork", "fish", "salmon", "shrimp", "tofu",
];

const RAW_INGREDIENT_KEYWORDS: &[&str] = &[
    "sugar", "salt", "oil", "water", "flour", "butter", "garlic", "onion",
];

const INGREDIENT_HEADERS: &[&str] = &[
    "ingredients",
    "ingredient list",
    "what you'll need",
    "what you’ll need",
    "you'll need",
    "you’ll need",
    "you will need",
    "what you need",
    "shopping list",
];

const INSTRUCTION_HEADERS: &[&str] = &[
    "instructions",
    "directions",
    "steps",
    "method",
    "preparation",
    "how to make",
    "how to make it",
    "how to prepare",
    "procedure",
    "to prepare",
];

const NUTRITION_HEADERS: &[&str] = &[
    "nutrition",
    "nutrition info",
    "nutrition information",
    "nutrition facts",
    "nutritional info",
    "nutritional information",
    "nutritional facts",
    "nutritional values",
    "nutritional value",
    "nutritional breakdown",
    "macros",
];

lazy_static! {
    static ref COOKING_VERB: Regex =
        Regex::new(r"(?i)\b(?:mix|stir|cook|add|heat|bake|boil|simmer)")
            .expect("cooking verb pattern should be valid");
    static ref METADATA_LABEL: Regex = Regex::new(
        r"^(?:(?:prep(?:aration)?|cook(?:ing)?|total|active)\s*time\b|(?:servings|serves|yield)\b)"
    )
    .expect("metadata label pattern should be valid");
    static ref STEP_HEADING: Regex =
        Regex::new(r"^step\s*\d").expect("step heading pattern should be valid");
    static ref TITLE_NUMBER: Regex =
        Regex::new(r"^\d+[.)]\s+").expect("title number pattern should be valid");
}

/// Classifies lines against the current section mode.
///
/// Classification is a pure function of the line, the mode and the
/// classifier's policy. Precedence: header, title, then content (ingredient,
/// instruction, nutrition), so one line is never counted twice.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    headers: HeaderMatching,
    bullet_titles: bool,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::strict()
    }
}

impl Classifier {
    pub fn new(headers: HeaderMatching) -> Self {
        Self {
            headers,
            bullet_titles: true,
        }
    }

    pub fn strict() -> Self {
        Self::new(HeaderMatching::Strict)
    }

    pub fn relaxed() -> Self {
        Self::new(HeaderMatching::Relaxed)
    }

    /// Variant for lines inside an open recipe, where a bullet is content
    /// and only emoji or `#` lines start the next recipe.
    pub fn within_recipe(self) -> Self {
        Self {
            bullet_titles: false,
            ..self
        }
    }

    pub fn classify(&self, line: &str, mode: Option<Section>) -> LineClass {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return LineClass::Plain(String::new());
        }

        if let Some(section) = self.section_header(trimmed, mode) {
            return LineClass::SectionHeader(section);
        }

        if let Some(title) = title_text(trimmed, mode, self.bullet_titles) {
            return LineClass::Title(title);
        }

        if mode != Some(Section::Nutrition) && METADATA_LABEL.is_match(&header_key(trimmed)) {
            return LineClass::Plain(trimmed.to_string());
        }

        match mode {
            Some(Section::Ingredients) => {
                if char_len(trimmed) > 3 && (is_list_item(trimmed) || has_measurement(trimmed)) {
                    return LineClass::Ingredient(strip_list_marker(trimmed));
                }
            }
            Some(Section::Instructions) => {
                let text = strip_list_marker(trimmed.trim_start_matches('#'));
                if char_len(trimmed) > 5 && char_len(&text) > 5 {
                    return LineClass::Instruction(text);
                }
            }
            Some(Section::Nutrition) => {
                return LineClass::Nutrition(line.trim_end().to_string());
            }
            None => {
                if looks_like_ingredient(trimmed) {
                    return LineClass::Ingredient(strip_list_marker(trimmed));
                }
                if looks_like_instruction(trimmed) {
                    return LineClass::Instruction(strip_list_marker(trimmed));
                }
            }
        }

        LineClass::Plain(trimmed.to_string())
    }

    fn section_header(&self, trimmed: &str, mode: Option<Section>) -> Option<Section> {
        let key = header_key(trimmed);
        if key.is_empty() {
            return None;
        }

        let lead_in = key.starts_with("for the")
            && char_len(trimmed) < 30
            && mode != Some(Section::Instructions);

        if INGREDIENT_HEADERS.contains(&key.as_str())
            || has_header_prefix(&key, "ingredients")
            || lead_in
        {
            return Some(Section::Ingredients);
        }

        if INSTRUCTION_HEADERS.contains(&key.as_str()) || has_header_prefix(&key, "instructions")
        {
            return Some(Section::Instructions);
        }

        let has_digits = key.chars().any(|c| c.is_ascii_digit());
        if NUTRITION_HEADERS.contains(&key.as_str())
            || (key.starts_with("nutrition") && !has_digits && char_len(&key) < 40)
            || (starts_with_marker(trimmed) && key.contains("nutritional") && !has_digits)
        {
            return Some(Section::Nutrition);
        }

        if self.headers == HeaderMatching::Relaxed {
            return relaxed_header(&key, trimmed);
        }

        None
    }
}

/// Classify with strict header matching.
pub fn classify(line: &str, mode: Option<Section>) -> LineClass {
    Classifier::strict().classify(line, mode)
}

fn relaxed_header(key: &str, trimmed: &str) -> Option<Section> {
    if char_len(key) > 40 || is_numbered(trimmed) || key.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let contains_any = |words: &[&str]| words.iter().any(|w| key.contains(w));

    if contains_any(&["ingredients", "you will need", "you'll need", "what you need"]) {
        Some(Section::Ingredients)
    } else if contains_any(&[
        "instructions",
        "directions",
        "steps",
        "how to make",
        "preparation",
        "method",
        "to prepare",
    ]) {
        Some(Section::Instructions)
    } else if contains_any(&["nutrition", "macros"]) {
        Some(Section::Nutrition)
    } else {
        None
    }
}

/// "ingredients (serves 4)" or "instructions for the sauce"
fn has_header_prefix(key: &str, word: &str) -> bool {
    key.strip_prefix(word)
        .map(|rest| rest.starts_with(" (") || rest.starts_with(" for "))
        .unwrap_or(false)
}

/// Lower-cased line with markdown markers, emoji and trailing colons removed.
fn header_key(trimmed: &str) -> String {
    trimmed
        .trim_start_matches(|c: char| is_decoration(c) || c.is_whitespace())
        .trim_end_matches(|c: char| matches!(c, ':' | '*' | '_') || c.is_whitespace())
        .to_lowercase()
}

fn title_text(trimmed: &str, mode: Option<Section>, bullet_titles: bool) -> Option<String> {
    if char_len(trimmed) <= 2 {
        return None;
    }

    let first = trimmed.chars().next()?;
    let marked = FOOD_EMOJI.contains(&first)
        || first == '#'
        || (bullet_titles
            && mode.is_none()
            && is_bullet(trimmed)
            && !bullet_starts_with_digit(trimmed));
    if !marked {
        return None;
    }

    let lower = trimmed.to_lowercase();
    if !TITLE_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
        return None;
    }

    let title = clean_title(trimmed);
    if title.is_empty() || STEP_HEADING.is_match(&title.to_lowercase()) {
        return None;
    }
    Some(title)
}

/// Strip heading markers, bullets, emoji, list numbers and bold markers from a title.
pub fn clean_title(line: &str) -> String {
    let stripped = line.trim_start_matches(|c: char| is_decoration(c) || c.is_whitespace());
    let stripped = TITLE_NUMBER.replace(stripped, "");
    stripped
        .replace("**", "")
        .trim_end_matches(|c: char| matches!(c, ':' | '*' | '_') || c.is_whitespace())
        .to_string()
}

fn looks_like_ingredient(trimmed: &str) -> bool {
    if has_measurement(trimmed) {
        // "Protein: 20g" is a nutrition fact, not an ingredient
        return extract_nutrition(trimmed).is_empty();
    }
    if !is_list_item(trimmed) {
        return false;
    }
    let lower = trimmed.to_lowercase();
    RAW_INGREDIENT_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(keyword))
}

fn looks_like_instruction(trimmed: &str) -> bool {
    let length = char_len(trimmed);
    (is_numbered(trimmed) && length > 10) || (length > 20 && COOKING_VERB.is_match(trimmed))
}

fn is_bullet(trimmed: &str) -> bool {
    is_list_item(trimmed) && !is_numbered(trimmed)
}

fn bullet_starts_with_digit(trimmed: &str) -> bool {
    strip_list_marker(trimmed)
        .chars()
        .next()
        .map(|c| c.is_ascii_digit())
        .unwrap_or(false)
}

fn starts_with_marker(trimmed: &str) -> bool {
    trimmed
        .chars()
        .next()
        .map(|c| is_decoration(c) || !c.is_alphanumeric())
        .unwrap_or(false)
}

fn is_decoration(c: char) -> bool {
    matches!(c, '#' | '*' | '-' | '•' | '_' | '>') || is_emoji(c)
}

fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F000..=0x1FAFF | 0x2600..=0x27BF | 0x2B00..=0x2BFF | 0xFE0F | 0x200D
    )
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
