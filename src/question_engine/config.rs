use serde::{Deserialize, Serialize};

/// Default cap on re-draws when a random candidate violates a precondition
/// (non-coprime moduli, duplicate tree keys).
pub const DEFAULT_MAX_REDRAWS: usize = 1_000;

/// Engine-wide settings handed to every generator by
/// [`Registry::standard`](crate::question_engine::generator::Registry::standard).
///
/// Missing JSON fields fall back to the defaults:
///
/// ```rust
/// use algo_drill_gen::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "maxRedraws": 50 }"#).unwrap();
/// assert_eq!(config.max_redraws, 50);
/// assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub max_redraws: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { max_redraws: DEFAULT_MAX_REDRAWS }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
