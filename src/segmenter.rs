//! Splits a chat message into recipe drafts.
//!
//! A message with recognizable recipe titles is walked top to bottom, each
//! title opening a new draft. A message without titles that still looks
//! like a recipe becomes a single draft spanning the whole text, scanned
//! with looser header matching.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::ExtractionConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::extractors::{
    clean_title, extract_nutrition, extract_timing, has_nutrition_keyword, parse_ingredient,
    Classifier, LineClass,
};
use crate::model::{RecipeDraft, Section};

const FALLBACK_TITLE: &str = "Recipe";

const FOOD_TERMS: &[&str] = &[
    "chicken", "beef", "pork", "fish", "salad", "soup", "stew", "curry", "pasta", "bowl",
    "sandwich", "burger", "taco", "wrap", "lemonade", "smoothie", "juice", "cake", "pie",
    "bread", "cookie",
];

lazy_static! {
    static ref UNIT_TOKEN: Regex = Regex::new(r"(?i)\b(?:cups?|tbsp|tsp|oz|ml|g)\b")
        .expect("unit token pattern should be valid");
}

pub struct Segmenter<'a> {
    config: &'a ExtractionConfig,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> Segmenter<'a> {
    pub fn new(config: &'a ExtractionConfig, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self { config, sink }
    }

    /// Detect every recipe in `text`. Returns an empty list when nothing
    /// looks like a recipe.
    pub fn segment(&mut self, text: &str) -> Vec<RecipeDraft> {
        let lines: Vec<&str> = text.lines().collect();
        let key = document_key(text);

        if has_title(&lines) {
            let drafts = self.structured_pass(&lines, key);
            if !drafts.is_empty() {
                return drafts;
            }
        }

        if !looks_like_recipe(text) {
            self.sink.emit(Diagnostic::NoRecipe);
            return Vec::new();
        }

        vec![self.fallback_pass(&lines, text, key)]
    }

    fn structured_pass(&mut self, lines: &[&str], key: u64) -> Vec<RecipeDraft> {
        let classifier = Classifier::strict();
        let in_recipe = classifier.within_recipe();
        let mut drafts = Vec::new();
        let mut current: Option<RecipeDraft> = None;
        let mut mode: Option<Section> = None;

        for (index, line) in lines.iter().enumerate() {
            let class = if current.is_some() {
                in_recipe.classify(line, mode)
            } else {
                classifier.classify(line, mode)
            };

            if let LineClass::Title(title) = &class {
                if let Some(draft) = current.take() {
                    drafts.push(self.finish(draft, lines, index - 1));
                }
                self.sink.emit(Diagnostic::RecipeStarted {
                    line: index,
                    title: title.clone(),
                });
                current = Some(RecipeDraft::new(
                    draft_id(key, drafts.len()),
                    title.clone(),
                    index,
                ));
                mode = None;
            }

            // Preamble before the first title only steers the section mode
            let Some(draft) = current.as_mut() else {
                if let LineClass::SectionHeader(section) = class {
                    mode = Some(section);
                }
                continue;
            };
            self.consume(draft, &mut mode, index, line, class);
        }

        if let Some(draft) = current.take() {
            drafts.push(self.finish(draft, lines, lines.len() - 1));
        }

        drafts
    }

    fn fallback_pass(&mut self, lines: &[&str], text: &str, key: u64) -> RecipeDraft {
        let inferred = infer_title(lines, self.config.title_scan_lines);
        let title = inferred
            .as_ref()
            .map(|(_, title)| title.clone())
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());
        self.sink.emit(Diagnostic::FallbackRecipe {
            title: title.clone(),
        });

        let classifier = Classifier::relaxed();
        let mut draft = RecipeDraft::new(draft_id(key, 0), title, 0);
        let mut mode: Option<Section> = None;

        for (index, line) in lines.iter().enumerate() {
            if inferred.as_ref().map(|(i, _)| *i) == Some(index) {
                continue;
            }
            let class = classifier.classify(line, mode);
            self.consume(&mut draft, &mut mode, index, line, class);
        }

        draft.line_range = (0, lines.len().saturating_sub(1));
        draft.full_text = text.to_string();
        self.sink.emit(Diagnostic::RecipeFinished {
            title: draft.title.clone(),
            ingredients: draft.ingredients.len(),
            instructions: draft.instructions.len(),
        });
        draft
    }

    /// Route one classified line into the draft and pick up any nutrition,
    /// timing or servings it mentions.
    fn consume(
        &mut self,
        draft: &mut RecipeDraft,
        mode: &mut Option<Section>,
        index: usize,
        line: &str,
        class: LineClass,
    ) {
        match class {
            LineClass::SectionHeader(section) => {
                *mode = Some(section);
                draft.sections.mark(section);
                self.sink.emit(Diagnostic::SectionHeader {
                    line: index,
                    section,
                });
            }
            LineClass::Ingredient(text) => {
                self.infer_section(draft, mode, index, Section::Ingredients);
                draft.add_ingredient(parse_ingredient(&text));
                if let Some(entry) = draft.ingredients.last() {
                    self.sink.emit(Diagnostic::IngredientParsed {
                        line: index,
                        entry: entry.clone(),
                    });
                }
            }
            LineClass::Instruction(text) => {
                self.infer_section(draft, mode, index, Section::Instructions);
                self.sink.emit(Diagnostic::InstructionAdded {
                    line: index,
                    text: text.clone(),
                });
                draft.instructions.push(text);
            }
            LineClass::Nutrition(raw) => {
                if !draft.raw_nutrition_text.is_empty() {
                    draft.raw_nutrition_text.push('\n');
                }
                draft.raw_nutrition_text.push_str(&raw);
            }
            LineClass::Title(_) | LineClass::Plain(_) => {}
        }

        if has_nutrition_keyword(line) {
            let found = extract_nutrition(line);
            if !found.is_empty() {
                draft.nutrition.merge_nonzero(&found);
                self.sink.emit(Diagnostic::NutritionExtracted {
                    line: index,
                    nutrition: found,
                });
            }
        }

        extract_timing(line).apply_to(draft);
    }

    fn infer_section(
        &mut self,
        draft: &mut RecipeDraft,
        mode: &mut Option<Section>,
        index: usize,
        section: Section,
    ) {
        if mode.is_none() {
            *mode = Some(section);
            draft.sections.mark(section);
            self.sink.emit(Diagnostic::SectionInferred {
                line: index,
                section,
            });
        }
    }

    fn finish(&mut self, mut draft: RecipeDraft, lines: &[&str], end: usize) -> RecipeDraft {
        let start = draft.line_range.0;
        let end = end.max(start);
        draft.line_range = (start, end);
        draft.full_text = lines[start..=end].join("\n");
        self.sink.emit(Diagnostic::RecipeFinished {
            title: draft.title.clone(),
            ingredients: draft.ingredients.len(),
            instructions: draft.instructions.len(),
        });
        draft
    }
}

fn has_title(lines: &[&str]) -> bool {
    let classifier = Classifier::strict();
    lines
        .iter()
        .any(|line| matches!(classifier.classify(line, None), LineClass::Title(_)))
}

/// Text mentions recipe sections, or says "recipe" alongside a kitchen unit.
fn looks_like_recipe(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("ingredients")
        || lower.contains("instructions")
        || (lower.contains("recipe") && UNIT_TOKEN.is_match(&lower))
}

/// Pick a title from the first lines of an untitled recipe: the first
/// plain line mentioning a food, or the very first line.
fn infer_title(lines: &[&str], scan_lines: usize) -> Option<(usize, String)> {
    for (index, line) in lines.iter().take(scan_lines).enumerate() {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();
        if trimmed.chars().count() <= 3
            || trimmed.starts_with('#')
            || trimmed.starts_with(['*', '-', '•'])
            || lower.contains("ingredients")
            || lower.contains("instructions")
            || lower.contains("directions")
        {
            continue;
        }

        if index == 0 || FOOD_TERMS.iter().any(|term| lower.contains(term)) {
            let title = clean_title(trimmed);
            let title = if title.is_empty() {
                trimmed.to_string()
            } else {
                title
            };
            return Some((index, title));
        }
    }
    None
}

fn document_key(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

fn draft_id(key: u64, index: usize) -> String {
    format!("recipe-{:08x}-{}", key & 0xffff_ffff, index)
}
