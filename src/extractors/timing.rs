use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::model::RecipeDraft;

lazy_static! {
    static ref PREP_TIME: Vec<Regex> = vec![
        Regex::new(r"(?i)prep(?:aration)?\s*time[:*\s]*(\d+)\s*(min\w*|h(?:ours?|rs?)?)\b").expect("prep time pattern"),
        Regex::new(r"(?i)\bprep[:*\s]+(\d+)\s*(min\w*|h(?:ours?|rs?)?)\b").expect("prep pattern"),
    ];
    static ref COOK_TIME: Vec<Regex> = vec![
        Regex::new(r"(?i)cook(?:ing)?\s*time[:*\s]*(\d+)\s*(min\w*|h(?:ours?|rs?)?)\b").expect("cook time pattern"),
        Regex::new(r"(?i)\bcook[:*\s]+(\d+)\s*(min\w*|h(?:ours?|rs?)?)\b").expect("cook pattern"),
    ];
    static ref TOTAL_TIME: Vec<Regex> = vec![
        Regex::new(r"(?i)total\s*time[:*\s]*(\d+)\s*(min\w*|h(?:ours?|rs?)?)\b").expect("total time pattern"),
    ];
    static ref SERVINGS: Vec<Regex> = vec![
        Regex::new(r"(?i)servings[:*\s]*(\d+)").expect("servings pattern"),
        Regex::new(r"(?i)serves[:*\s]*(\d+)").expect("serves pattern"),
        Regex::new(r"(?i)yield[:*\s]*(\d+)\s*servings").expect("yield pattern"),
        Regex::new(r"(?i)makes[:*\s]*(\d+)\s*servings").expect("makes pattern"),
    ];
}

/// Timing and yield found on a line. Zero means "not mentioned".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timing {
    pub prep_time: u32,
    pub cook_time: u32,
    pub total_time: u32,
    pub servings: u32,
}

impl Timing {
    pub fn is_empty(&self) -> bool {
        *self == Timing::default()
    }

    /// Copy every value that was found onto the draft, leaving the rest untouched.
    pub fn apply_to(&self, draft: &mut RecipeDraft) {
        if self.prep_time != 0 {
            draft.prep_time = self.prep_time;
        }
        if self.cook_time != 0 {
            draft.cook_time = self.cook_time;
        }
        if self.total_time != 0 {
            draft.total_time = self.total_time;
        }
        if self.servings != 0 {
            draft.servings = self.servings;
        }
    }
}

/// Find "prep time: 10 min", "cook time: 1 hour", "total time: 40 min" and
/// "serves 4" style statements. Hours are converted to minutes.
pub fn extract_timing(line: &str) -> Timing {
    Timing {
        prep_time: first_minutes(&PREP_TIME, line),
        cook_time: first_minutes(&COOK_TIME, line),
        total_time: first_minutes(&TOTAL_TIME, line),
        servings: SERVINGS
            .iter()
            .find_map(|pattern| pattern.captures(line))
            .and_then(|caps| caps[1].parse().ok())
            .unwrap_or(0),
    }
}

fn first_minutes(patterns: &[Regex], line: &str) -> u32 {
    patterns
        .iter()
        .find_map(|pattern| pattern.captures(line))
        .and_then(|caps| to_minutes(&caps))
        .unwrap_or(0)
}

fn to_minutes(caps: &Captures) -> Option<u32> {
    let value: u32 = caps[1].parse().ok()?;
    if caps[2].to_ascii_lowercase().starts_with('h') {
        value.checked_mul(60)
    } else {
        Some(value)
    }
}
