use thiserror::Error;

use crate::question_engine::params::ParameterKind;

/// Precondition violations reported by the oracles when called directly
/// with inputs that have no well-defined answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("modulus must be positive, got {0}")]
    InvalidModulus(i64),

    #[error("{a} has no inverse modulo {n}")]
    NotInvertible { a: i64, n: i64 },

    #[error("exponent must be non-negative, got {0}")]
    NegativeExponent(i64),

    #[error("congruence system is empty")]
    EmptySystem,

    #[error("moduli {0} and {1} are not coprime")]
    NotCoprime(i64, i64),

    #[error("product of moduli does not fit in 64 bits")]
    Overflow,

    #[error("`{0}` on an empty stack")]
    EmptyStack(&'static str),
}

/// A parameter set that does not match a generator's declared schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("unknown parameter `{0}`")]
    Unknown(String),

    #[error("missing parameter `{0}`")]
    Missing(String),

    #[error("parameter `{name}` must be a {expected}")]
    WrongType { name: String, expected: ParameterKind },

    #[error("value `{value}` is not allowed for parameter `{name}`")]
    NotAllowed { name: String, value: String },

    #[error("value `{value}` of parameter `{name}` is not path-safe")]
    NotPathSafe { name: String, value: String },
}

/// A permalink that cannot be resolved to a generator call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermalinkError {
    #[error("invalid permalink `{path}`: {reason}")]
    Malformed { path: String, reason: &'static str },

    #[error("invalid permalink: unknown language `{0}`")]
    UnknownLanguage(String),

    #[error("invalid permalink: unknown generator `{0}`")]
    UnknownGenerator(String),

    #[error("invalid permalink: {0}")]
    InvalidParameters(#[from] ParameterError),

    #[error("seed `{0}` cannot be embedded in a permalink")]
    InvalidSeed(String),
}

/// Everything that can reject a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("unknown generator `{0}`")]
    UnknownGenerator(String),

    #[error("generator `{generator}` does not support language `{language}`")]
    UnsupportedLanguage { generator: String, language: String },

    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),

    #[error("generator `{generator}` has no variant `{variant}`")]
    UnknownVariant { generator: String, variant: String },

    #[error("gave up drawing {what} after {attempts} attempts")]
    RedrawsExhausted { what: &'static str, attempts: usize },

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Permalink(#[from] PermalinkError),
}
