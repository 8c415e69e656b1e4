//! # Inflection
//!
//! String transformations used to turn resource short names and property names into
//! route-name fragments and URL path segments.
//!
//! Only the **last word** of a compound name is ever pluralized, so
//! `relatedDummy` becomes `relatedDummies` and `related_person` becomes
//! `related_people`. Words already in plural form are left untouched, which keeps
//! property names such as `answers` stable.
//!
//! ## Irregular words
//!
//! | singular | plural |
//! |---|---|
//! | `person` | `people` |
//! | `child` | `children` |
//! | `man` / `woman` | `men` / `women` |
//! | `leaf`, `life`, `knife`, ... | `leaves`, `lives`, `knives`, ... |
//!
//! Uninflected words (`series`, `news`, `data`, ...) keep their spelling.

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase};

/// Words whose plural does not follow the suffix rules, as `(singular, plural)`.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("criterion", "criteria"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("half", "halves"),
    ("hero", "heroes"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("man", "men"),
    ("matrix", "matrices"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("potato", "potatoes"),
    ("quiz", "quizzes"),
    ("shelf", "shelves"),
    ("tomato", "tomatoes"),
    ("tooth", "teeth"),
    ("wife", "wives"),
    ("wolf", "wolves"),
    ("woman", "women"),
];

/// Words with identical singular and plural forms.
const UNINFLECTED: &[&str] = &[
    "data",
    "equipment",
    "feedback",
    "fish",
    "information",
    "media",
    "metadata",
    "money",
    "news",
    "police",
    "rice",
    "series",
    "sheep",
    "species",
    "staff",
];

/// Singular words ending in `s` that take `-es`.
const SINGULAR_ENDING_IN_S: &[&str] = &["alias", "bus", "campus", "status", "virus"];

/// Pluralizes the last word of `name`, preserving everything before it.
///
/// Word boundaries are `_`, `-` and lower-to-upper case transitions.
pub fn pluralize(name: &str) -> String {
    let (head, last) = name.split_at(last_word_start(name));
    format!("{head}{}", pluralize_word(last))
}

/// Converts `name` to snake case (`relatedDummies` -> `related_dummies`).
pub fn tableize(name: &str) -> String {
    name.to_snake_case()
}

/// Converts `name` to kebab case (`relatedDummies` -> `related-dummies`).
pub fn dasherize(name: &str) -> String {
    name.to_kebab_case()
}

/// Route-name inflection: lower camel case, pluralized when `plural` is set.
///
/// `Dummy` -> `dummies`, `relatedDummies` -> `relatedDummies`,
/// `DummyEntity` -> `dummyEntities`.
pub fn inflect(name: &str, plural: bool) -> String {
    let camel = name.to_lower_camel_case();
    if plural {
        pluralize(&camel)
    } else {
        camel
    }
}

/// Upper-cases the first character.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn last_word_start(name: &str) -> usize {
    let mut start = 0;
    let mut previous: Option<char> = None;
    for (index, ch) in name.char_indices() {
        if ch == '_' || ch == '-' {
            start = index + ch.len_utf8();
        } else if ch.is_uppercase() && previous.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            start = index;
        }
        previous = Some(ch);
    }
    start
}

fn pluralize_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();

    if UNINFLECTED.contains(&lower.as_str()) {
        return word.to_owned();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return match_leading_case(word, plural);
    }
    if IRREGULAR.iter().any(|(_, plural)| *plural == lower) {
        return word.to_owned();
    }
    if SINGULAR_ENDING_IN_S.contains(&lower.as_str()) {
        return format!("{word}es");
    }
    if ["ss", "x", "ch", "sh", "zz"].iter().any(|suffix| lower.ends_with(suffix)) {
        return format!("{word}es");
    }
    if lower.ends_with('s') {
        return word.to_owned();
    }
    if let Some(stem) = word.strip_suffix(['y', 'Y']) {
        let after_consonant = stem
            .chars()
            .last()
            .is_some_and(|c| !matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'));
        if after_consonant {
            return format!("{stem}ies");
        }
    }
    format!("{word}s")
}

fn match_leading_case(original: &str, replacement: &str) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        capitalize(replacement)
    } else {
        replacement.to_owned()
    }
}
