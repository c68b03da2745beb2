//! Core question engine: seeded generation, oracles, permalinks and feedback.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Question, answer and feedback types; `Language` |
//! | `random`    | Seed folding and the deterministic `Random` source |
//! | `oracles`   | BST, AVL, stack and modular-arithmetic ground truth |
//! | `params`    | Parameter schema, values and validation |
//! | `permalink` | `/{lang}/{generator}/{values...}/{seed}` encoding and decoding |
//! | `evaluator` | Answer keys for multiple-choice and free-text questions |
//! | `helpers`   | Localization and rendering helpers shared by topics |
//! | `generator` | `QuestionGenerator` trait and the `Registry` |
//! | `topics`    | The built-in generators |
//! | `config`    | `EngineConfig` |
//! | `error`     | Error types |

pub mod config;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod oracles;
pub mod params;
pub mod permalink;
pub mod random;
pub mod topics;

pub use config::EngineConfig;
pub use error::{GenerationError, OracleError, ParameterError, PermalinkError};
pub use evaluator::{AnswerCheck, ChoiceKey, Evaluator, FreeTextKey};
pub use generator::{Generated, QuestionGenerator, Registry};
pub use models::{
    question_from_json, question_to_json, FormatCheck, FreeTextAnswer, FreeTextFeedback,
    FreeTextQuestion, Language, MultipleChoiceAnswer, MultipleChoiceFeedback,
    MultipleChoiceQuestion, Question,
};
pub use params::{ExpectedParameter, ParameterKind, ParameterValue, Parameters};
pub use permalink::GeneratorCall;
