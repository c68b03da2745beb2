//! Feedback evaluators.
//!
//! A generator captures its ground truth in an [`Evaluator`] value instead of
//! a closure. Evaluating is pure: the same key and answer always give the
//! same feedback, and the key is never modified.
//!
//! Free-text answers are parsed here. Unparsable input is not an error; it
//! comes back as `correct: Some(false)` with an "invalid answer" message.

use serde::{Deserialize, Serialize};

use crate::question_engine::{
    helpers::{level_order_str, pick},
    models::{
        FormatCheck, FreeTextAnswer, FreeTextFeedback, Language, MultipleChoiceAnswer,
        MultipleChoiceFeedback,
    },
    oracles::{modular::normalize, stack::StackValue},
};

fn feedback_correct(lang: Language) -> &'static str {
    pick(lang, "Correct!", "Richtig!")
}

fn feedback_incorrect(lang: Language) -> &'static str {
    pick(lang, "Incorrect.", "Falsch.")
}

fn feedback_invalid(lang: Language) -> &'static str {
    pick(lang, "Your answer is not valid.", "Ihre Antwort ist ungültig.")
}

/// Ground truth for one generated question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Evaluator {
    MultipleChoice(ChoiceKey),
    FreeText(FreeTextKey),
}

impl Evaluator {
    pub fn as_choice(&self) -> Option<&ChoiceKey> {
        match self {
            Evaluator::MultipleChoice(key) => Some(key),
            Evaluator::FreeText(_)         => None,
        }
    }

    pub fn as_free_text(&self) -> Option<&FreeTextKey> {
        match self {
            Evaluator::MultipleChoice(_) => None,
            Evaluator::FreeText(key)     => Some(key),
        }
    }
}

// ---------------------------------------------------------------------------
// Multiple choice
// ---------------------------------------------------------------------------

/// Correct option indices for a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceKey {
    lang: Language,
    correct_choice: Vec<usize>,
    sorting: bool,
}

impl ChoiceKey {
    /// `sorting` makes the order of the selected indices significant.
    /// Otherwise both sides are compared as sorted lists.
    pub fn new(lang: Language, mut correct_choice: Vec<usize>, sorting: bool) -> Self {
        if !sorting {
            correct_choice.sort_unstable();
        }
        ChoiceKey { lang, correct_choice, sorting }
    }

    pub fn single(lang: Language, index: usize) -> Self {
        Self::new(lang, vec![index], false)
    }

    pub fn correct_choice(&self) -> &[usize] {
        &self.correct_choice
    }

    pub fn evaluate(&self, answer: &MultipleChoiceAnswer) -> MultipleChoiceFeedback {
        let mut choice = answer.choice.clone();
        if !self.sorting {
            choice.sort_unstable();
        }
        let correct = choice == self.correct_choice;
        let text = if correct { feedback_correct(self.lang) } else { feedback_incorrect(self.lang) };
        MultipleChoiceFeedback {
            correct: Some(correct),
            feedback_text: Some(text.to_string()),
            correct_choice: Some(self.correct_choice.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Free text
// ---------------------------------------------------------------------------

/// What a free-text answer is checked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerCheck {
    /// Any integer `x` with `x ≡ remainder (mod modulus)`.
    Congruent { remainder: i64, modulus: i64 },
    /// Exactly this integer.
    Integer(i64),
    /// An answer of the form `y (mod z)` with `z == modulus` and
    /// `y ≡ value (mod modulus)`.
    Residue { value: i64, modulus: i64 },
    /// A tree in level order; `None` marks an empty child slot.
    LevelOrder(Vec<Option<i64>>),
    /// Numbers and booleans, in order.
    ReturnValues(Vec<StackValue>),
    /// Numbers, in order.
    Values(Vec<i64>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTextKey {
    lang: Language,
    check: AnswerCheck,
}

impl FreeTextKey {
    pub fn new(lang: Language, check: AnswerCheck) -> Self {
        FreeTextKey { lang, check }
    }

    pub fn check(&self) -> &AnswerCheck {
        &self.check
    }

    /// A canonical answer that this key accepts.
    pub fn reference_answer(&self) -> String {
        match &self.check {
            AnswerCheck::Congruent { remainder, .. } => remainder.to_string(),
            AnswerCheck::Integer(n)                  => n.to_string(),
            AnswerCheck::Residue { value, modulus }  => format!("{value} (mod {modulus})"),
            AnswerCheck::LevelOrder(levels)          => level_order_str(levels),
            AnswerCheck::ReturnValues(values)        => join(values),
            AnswerCheck::Values(values)              => join(values),
        }
    }

    /// Syntax-only check, usable while the student is still typing.
    pub fn check_format(&self, answer: &FreeTextAnswer) -> FormatCheck {
        let ok = match &self.check {
            AnswerCheck::Congruent { .. } | AnswerCheck::Integer(_) => parse_integer(&answer.text).is_some(),
            AnswerCheck::Residue { .. }   => parse_residue(&answer.text).is_some(),
            AnswerCheck::LevelOrder(_)    => parse_level_order(&answer.text).is_some(),
            AnswerCheck::ReturnValues(_)  => parse_return_values(&answer.text).is_some(),
            AnswerCheck::Values(_)        => parse_values(&answer.text).is_some(),
        };
        if ok {
            return FormatCheck::valid();
        }
        let message = match &self.check {
            AnswerCheck::Congruent { .. } | AnswerCheck::Integer(_) => pick(
                self.lang,
                "Please enter a whole number.",
                "Bitte gib eine ganze Zahl ein.",
            ),
            AnswerCheck::Residue { .. } => pick(
                self.lang,
                "Please answer in the form y (mod z).",
                "Bitte antworte in der Form y (mod z).",
            ),
            AnswerCheck::LevelOrder(_) => pick(
                self.lang,
                "Please enter numbers separated by commas, using - for empty children.",
                "Bitte gib durch Kommas getrennte Zahlen ein, - steht für leere Kinder.",
            ),
            AnswerCheck::ReturnValues(_) => pick(
                self.lang,
                "Please only enter numbers, *true* or *false*, separated by commas.",
                "Bitte gib nur Zahlen, *true* oder *false* ein, durch Kommas getrennt.",
            ),
            AnswerCheck::Values(_) => pick(
                self.lang,
                "Please only enter numbers, separated by commas.",
                "Bitte gib nur Zahlen ein, durch Kommas getrennt.",
            ),
        };
        FormatCheck::invalid(message)
    }

    pub fn evaluate(&self, answer: &FreeTextAnswer) -> FreeTextFeedback {
        let verdict = match &self.check {
            AnswerCheck::Congruent { remainder, modulus } => parse_integer(&answer.text)
                .map(|x| same_residue(x, *remainder, *modulus)),
            AnswerCheck::Integer(expected) => parse_integer(&answer.text).map(|x| x == *expected),
            AnswerCheck::Residue { value, modulus } => parse_residue(&answer.text).map(|(y, z)| {
                z == *modulus && same_residue(y, *value, *modulus)
            }),
            AnswerCheck::LevelOrder(expected) => {
                parse_level_order(&answer.text).map(|given| given == *expected)
            }
            AnswerCheck::ReturnValues(expected) => {
                parse_return_values(&answer.text).map(|given| given == *expected)
            }
            AnswerCheck::Values(expected) => parse_values(&answer.text).map(|given| given == *expected),
        };

        let (correct, text) = match verdict {
            Some(true)  => (true, feedback_correct(self.lang)),
            Some(false) => (false, feedback_incorrect(self.lang)),
            None        => (false, feedback_invalid(self.lang)),
        };
        FreeTextFeedback {
            correct: Some(correct),
            feedback_text: Some(text.to_string()),
            correct_answer: Some(self.reference_answer()),
        }
    }
}

fn join<T: ToString>(values: &[T]) -> String {
    values.iter().map(T::to_string).collect::<Vec<_>>().join(", ")
}

/// `a ≡ b (mod n)`; never true for a non-positive modulus.
fn same_residue(a: i64, b: i64, n: i64) -> bool {
    matches!((normalize(a, n), normalize(b, n)), (Ok(x), Ok(y)) if x == y)
}

// ---------------------------------------------------------------------------
// Answer parsing
// ---------------------------------------------------------------------------

/// An integer, also written as an integer-valued decimal (`5.0`, `1e3`).
fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(n) = text.parse() {
        return Some(n);
    }
    let x: f64 = text.parse().ok()?;
    // `i64::MAX as f64` is 2^63, one past the largest i64.
    let in_range = x >= i64::MIN as f64 && x < i64::MAX as f64;
    (x.is_finite() && x.fract() == 0.0 && in_range).then_some(x as i64)
}

fn parse_digits(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// `y (mod z)` with non-negative integers, case-insensitive `mod`, optional
/// whitespace around every token.
fn parse_residue(text: &str) -> Option<(i64, i64)> {
    let text = text.trim().to_ascii_lowercase();
    let (value, rest) = text.split_once('(')?;
    let inner = rest.strip_suffix(')')?.trim();
    let modulus = inner.strip_prefix("mod")?.trim();
    Some((parse_digits(value.trim())?, parse_digits(modulus)?))
}

/// Tokens of a comma- or whitespace-separated list, optionally wrapped in
/// brackets.
fn list_tokens(text: &str) -> impl Iterator<Item = &str> {
    let text = text.trim();
    let text = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(text);
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
}

/// Level-order list: integers, with `-`, `_` or `null` for empty slots.
/// Trailing empty slots are dropped.
fn parse_level_order(text: &str) -> Option<Vec<Option<i64>>> {
    let mut slots = list_tokens(text)
        .map(|token| match token {
            "-" | "_" | "null" => Some(None),
            number => number.parse().ok().map(Some),
        })
        .collect::<Option<Vec<_>>>()?;
    while slots.last() == Some(&None) {
        slots.pop();
    }
    Some(slots)
}

/// Integers and case-insensitive `true` / `false`.
fn parse_return_values(text: &str) -> Option<Vec<StackValue>> {
    list_tokens(text)
        .map(|token| match token.to_ascii_lowercase().as_str() {
            "true"  => Some(StackValue::Bool(true)),
            "false" => Some(StackValue::Bool(false)),
            _       => parse_integer(token).map(StackValue::Number),
        })
        .collect()
}

fn parse_values(text: &str) -> Option<Vec<i64>> {
    list_tokens(text).map(parse_integer).collect()
}
