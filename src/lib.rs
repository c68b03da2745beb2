//! # algo_drill_gen
//!
//! A fully offline, deterministic generator of algorithms and discrete-math
//! exercises.
//!
//! Each exercise comes from a question generator (binary search trees, AVL
//! trees, stacks, modular arithmetic) and is fully determined by the generator id,
//! a language, the generator's parameters, and a seed string. Every question
//! carries a permalink that encodes exactly these inputs, so any question can
//! be regenerated later, bit for bit.
//!
//! ## How it works
//!
//! 1. Build a [`Registry`] with [`Registry::standard`], passing an
//!    [`EngineConfig`].
//! 2. Call [`Registry::generate`] with a generator id, a [`Language`],
//!    [`Parameters`] and a seed. The generator validates the parameters,
//!    derives all randomness from the seed, asks its oracle for the ground
//!    truth, and returns a [`Generated`] question plus [`Evaluator`].
//! 3. Score a student's answer with the evaluator, or call
//!    [`Registry::regenerate`] with the question's path to get the same
//!    question (and evaluator) back.
//!
//! ## Key features
//!
//! - **Deterministic**: the seed string fully determines the question.
//! - **Permalinks**: `/{lang}/{generator}/{parameter values...}/{seed}`.
//! - **Two languages**: English (`en`) and German (`de`); only the wording
//!   differs, never the exercise.
//! - **Serializable**: questions serialize to JSON with a `type` tag.
//!
//! ## Quick start
//!
//! ```rust
//! use algo_drill_gen::{EngineConfig, FreeTextAnswer, Language, Parameters, Registry};
//!
//! let registry = Registry::standard(&EngineConfig::default());
//! let params = Parameters::new().with("variant", "crt");
//! let generated = registry.generate("modtricks", Language::En, &params, "42").unwrap();
//! println!("{}", generated.question.text().unwrap_or_default());
//!
//! // The path regenerates the same question.
//! let again = registry.regenerate(generated.question.path()).unwrap();
//! assert_eq!(again, generated);
//!
//! // The evaluator accepts its own reference answer.
//! let key = generated.feedback.as_ref().and_then(|f| f.as_free_text()).unwrap();
//! let feedback = key.evaluate(&FreeTextAnswer::new(key.reference_answer()));
//! assert_eq!(feedback.correct, Some(true));
//! ```

pub mod question_engine;

// Convenience re-exports so callers can use `algo_drill_gen::Registry`
// directly without reaching into `question_engine::`.
pub use question_engine::{
    question_from_json, question_to_json, AnswerCheck, ChoiceKey, EngineConfig, Evaluator,
    ExpectedParameter, FormatCheck, FreeTextAnswer, FreeTextFeedback, FreeTextKey,
    FreeTextQuestion, GenerationError, Generated, GeneratorCall, Language, MultipleChoiceAnswer,
    MultipleChoiceFeedback, MultipleChoiceQuestion, OracleError, ParameterError, ParameterKind,
    ParameterValue, Parameters, PermalinkError, Question, QuestionGenerator, Registry,
};

#[cfg(test)]
mod tests;
