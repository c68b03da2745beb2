//! Shared builder functions used across topic generators.
//!
//! Every topic assembles the same pieces: localized text, a rendered tree,
//! and the final question struct. These helpers keep the topic files focused
//! on the exercise logic.

use crate::question_engine::models::{FreeTextQuestion, Language, MultipleChoiceQuestion, Question};

/// Pick the wording for the active language.
///
/// Game logic (keys, numbers, correct answer) is identical in both languages.
pub fn localized(lang: Language, en: String, de: String) -> String {
    match lang {
        Language::En => en,
        Language::De => de,
    }
}

/// Same as [`localized`] for static strings.
pub fn pick(lang: Language, en: &'static str, de: &'static str) -> &'static str {
    match lang {
        Language::En => en,
        Language::De => de,
    }
}

/// Render a level-order snapshot as `8, 3, 10, -, 14`.
pub fn level_order_str(level_order: &[Option<i64>]) -> String {
    level_order
        .iter()
        .map(|slot| slot.map_or_else(|| "-".to_string(), |k| k.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a level-order snapshot as a two-row markdown table with 1-based
/// indices, `-` marking empty child slots.
pub fn level_order_table(lang: Language, level_order: &[Option<i64>]) -> String {
    let mut index_row = format!("|{}|", pick(lang, "Index:", "Index:"));
    let mut value_row = format!("|{}|", pick(lang, "Value:", "Wert:"));
    for (i, slot) in level_order.iter().enumerate() {
        index_row.push_str(&format!("{}|", i + 1));
        value_row.push_str(&format!("{}|", slot.map_or_else(|| "-".to_string(), |k| k.to_string())));
    }
    let rule = "|---".repeat(level_order.len() + 1) + "|";
    format!("\n{index_row}\n{rule}\n{value_row}\n")
}

/// Assemble a free-text question with only the common fields set.
pub fn free_text(path: String, name: String, text: String) -> FreeTextQuestion {
    FreeTextQuestion {
        path,
        name,
        text: Some(text),
        prompt: None,
        placeholder: None,
        bottom_text: None,
        lines: None,
    }
}

/// Assemble a single-answer multiple-choice question.
pub fn multiple_choice(path: String, name: String, text: String, answers: Vec<String>) -> Question {
    Question::MultipleChoiceQuestion(MultipleChoiceQuestion {
        path,
        name,
        text: Some(text),
        answers,
        allow_multiple: None,
        sorting: None,
    })
}
