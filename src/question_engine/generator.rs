use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::question_engine::{
    config::EngineConfig,
    error::{GenerationError, PermalinkError},
    evaluator::Evaluator,
    models::{Language, Question},
    params::{validate, ExpectedParameter, Parameters},
    permalink::{self, GeneratorCall},
    topics::{avl::AvlGenerator, bst::BstGenerator, mod_tricks::ModTricksGenerator, stack::StackGenerator},
};

/// A generated question plus the evaluator holding its ground truth.
///
/// The evaluator is not part of the question's serialized form; it is
/// recovered by regenerating from [`Question::path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub question: Question,
    pub feedback: Option<Evaluator>,
}

/// The contract every question family implements.
///
/// `generate` must be a pure function of `(lang, parameters, seed)`.
pub trait QuestionGenerator: Send + Sync {
    /// Stable identity used in permalinks (`a-z`, `0-9`, `-`).
    fn id(&self) -> &'static str;

    fn languages(&self) -> &'static [Language] {
        &Language::ALL
    }

    fn name(&self, lang: Language) -> String;

    /// Short phrase naming the trained skill.
    fn description(&self, lang: Language) -> String;

    fn tags(&self) -> &'static [&'static str] {
        &[]
    }

    fn author(&self) -> Option<&'static str> {
        None
    }

    fn license(&self) -> Option<&'static str> {
        None
    }

    /// Ordered parameter schema.
    fn expected_parameters(&self) -> Vec<ExpectedParameter>;

    fn generate(&self, lang: Language, parameters: &Parameters, seed: &str) -> Result<Generated, GenerationError>;
}

/// Validate a call and encode its permalink.
///
/// Topic generators call this first, before building their [`Random`], so a
/// rejected request never consumes randomness.
///
/// [`Random`]: crate::question_engine::random::Random
pub fn prepare<G: QuestionGenerator + ?Sized>(
    generator: &G,
    lang: Language,
    parameters: &Parameters,
    seed: &str,
) -> Result<String, GenerationError> {
    if !generator.languages().contains(&lang) {
        warn!(generator = generator.id(), %lang, "unsupported language");
        return Err(GenerationError::UnsupportedLanguage {
            generator: generator.id().to_string(),
            language: lang.to_string(),
        });
    }
    let expected = generator.expected_parameters();
    validate(&expected, parameters)?;

    let call = GeneratorCall {
        generator: generator.id().to_string(),
        lang,
        parameters: parameters.clone(),
        seed: seed.to_string(),
    };
    let path = permalink::encode(&expected, &call)?;
    debug!(%path, "generating question");
    Ok(path)
}

/// Read the required string parameter `name` and parse it into the
/// generator's closed variant enum.
pub fn variant_param<G, V>(generator: &G, parameters: &Parameters, name: &str) -> Result<V, GenerationError>
where
    G: QuestionGenerator + ?Sized,
    V: std::str::FromStr,
{
    let raw = parameters.text(name).unwrap_or_default();
    raw.parse().map_err(|_| GenerationError::UnknownVariant {
        generator: generator.id().to_string(),
        variant: raw.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps generator ids to generators. Built once, then only read; cloning
/// shares the generators.
#[derive(Clone, Default)]
pub struct Registry {
    generators: BTreeMap<&'static str, Arc<dyn QuestionGenerator>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("generators", &self.generators.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in generator.
    pub fn standard(config: &EngineConfig) -> Self {
        let mut registry = Self::new();
        registry
            .register(BstGenerator::new(config))
            .register(AvlGenerator::new(config))
            .register(ModTricksGenerator::new(config))
            .register(StackGenerator::new(config));
        registry
    }

    /// Add a generator, replacing any previous one with the same id.
    pub fn register(&mut self, generator: impl QuestionGenerator + 'static) -> &mut Self {
        let id = generator.id();
        if self.generators.insert(id, Arc::new(generator)).is_some() {
            warn!(id, "replaced an already registered generator");
        }
        self
    }

    pub fn get(&self, id: &str) -> Option<&dyn QuestionGenerator> {
        self.generators.get(id).map(|g| g.as_ref())
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.generators.keys().copied()
    }

    pub fn generate(
        &self,
        id: &str,
        lang: Language,
        parameters: &Parameters,
        seed: &str,
    ) -> Result<Generated, GenerationError> {
        let generator = self
            .get(id)
            .ok_or_else(|| GenerationError::UnknownGenerator(id.to_string()))?;
        let generated = generator.generate(lang, parameters, seed)?;
        debug!(generator = id, %lang, seed, "generated question");
        Ok(generated)
    }

    /// Resolve a permalink into the call that produced it.
    pub fn decode(&self, path: &str) -> Result<GeneratorCall, PermalinkError> {
        permalink::decode(path, |id| {
            self.get(id).map(|g| (g.expected_parameters(), g.languages()))
        })
    }

    /// Regenerate the exact question a permalink points to.
    pub fn regenerate(&self, path: &str) -> Result<Generated, GenerationError> {
        let call = self.decode(path)?;
        self.generate(&call.generator, call.lang, &call.parameters, &call.seed)
    }
}
