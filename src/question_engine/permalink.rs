//! Permalink codec.
//!
//! A permalink encodes one generator call as a path:
//!
//! ```text
//! /{lang}/{generator-id}/{value-1}/.../{value-k}/{seed}
//! ```
//!
//! Values appear in schema order, so the same call always produces the same
//! string. Identity and value segments only use `a-z`, `0-9` and `-`;
//! numbers are canonical decimals. The seed may be anything without `/`
//! (including the empty string).

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::question_engine::{
    error::{ParameterError, PermalinkError},
    models::Language,
    params::{is_path_safe, validate, ExpectedParameter, ParameterKind, ParameterValue, Parameters},
};

/// Everything needed to reproduce one `generate` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorCall {
    pub generator: String,
    pub lang: Language,
    pub parameters: Parameters,
    pub seed: String,
}

/// Encode a call. `expected` is the generator's schema.
pub fn encode(expected: &[ExpectedParameter], call: &GeneratorCall) -> Result<String, PermalinkError> {
    if !is_path_safe(&call.generator) {
        return Err(PermalinkError::Malformed {
            path: call.generator.clone(),
            reason: "generator id is not path-safe",
        });
    }
    validate(expected, &call.parameters)?;
    if call.seed.contains('/') {
        return Err(PermalinkError::InvalidSeed(call.seed.clone()));
    }

    let mut path = format!("/{}/{}", call.lang.code(), call.generator);
    for param in expected {
        if let Some(value) = call.parameters.get(&param.name) {
            path.push('/');
            path.push_str(&value.to_string());
        }
    }
    path.push('/');
    path.push_str(&call.seed);
    Ok(path)
}

/// Decode a permalink. `schema_for` resolves a generator id to its schema
/// and supported languages; `None` means the id is unknown.
pub fn decode<F>(path: &str, schema_for: F) -> Result<GeneratorCall, PermalinkError>
where
    F: FnOnce(&str) -> Option<(Vec<ExpectedParameter>, &'static [Language])>,
{
    let result = decode_inner(path, schema_for);
    if let Err(err) = &result {
        warn!(path, %err, "cannot resolve permalink");
    }
    result
}

fn decode_inner<F>(path: &str, schema_for: F) -> Result<GeneratorCall, PermalinkError>
where
    F: FnOnce(&str) -> Option<(Vec<ExpectedParameter>, &'static [Language])>,
{
    let malformed = |reason| PermalinkError::Malformed { path: path.to_string(), reason };

    let body = path.strip_prefix('/').ok_or_else(|| malformed("must start with `/`"))?;
    let segments: Vec<&str> = body.split('/').collect();
    let [lang, generator, rest @ ..] = segments.as_slice() else {
        return Err(malformed("too few segments"));
    };
    let Some((seed, values)) = rest.split_last() else {
        return Err(malformed("missing seed"));
    };

    let lang: Language = lang
        .parse()
        .map_err(|()| PermalinkError::UnknownLanguage(lang.to_string()))?;
    let (expected, languages) =
        schema_for(*generator).ok_or_else(|| PermalinkError::UnknownGenerator(generator.to_string()))?;
    if !languages.contains(&lang) {
        return Err(PermalinkError::UnknownLanguage(lang.to_string()));
    }
    if values.len() != expected.len() {
        return Err(malformed("wrong number of parameter segments"));
    }

    let mut parameters = Parameters::new();
    for (param, raw) in expected.iter().zip(values) {
        parameters.insert(&param.name, parse_value(param, *raw)?);
    }
    validate(&expected, &parameters)?;

    Ok(GeneratorCall {
        generator: generator.to_string(),
        lang,
        parameters,
        seed: seed.to_string(),
    })
}

fn parse_value(param: &ExpectedParameter, raw: &str) -> Result<ParameterValue, ParameterError> {
    match param.kind {
        ParameterKind::String => Ok(ParameterValue::Text(raw.to_string())),
        ParameterKind::Number => parse_canonical_number(raw)
            .map(ParameterValue::Number)
            .ok_or_else(|| ParameterError::WrongType { name: param.name.clone(), expected: param.kind }),
    }
}

/// Accept only the exact text `i64::to_string` would produce: no `+`, no
/// leading zeros, no `-0`.
fn parse_canonical_number(raw: &str) -> Option<i64> {
    let n: i64 = raw.parse().ok()?;
    (n.to_string() == raw).then_some(n)
}
