use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    De,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::De];

    /// The path segment used in permalinks ("en", "de").
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "de" => Ok(Language::De),
            _    => Err(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// A generated question. Serialized with a `type` tag so that the JSON
/// document matches the interchange format consumed by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Question {
    MultipleChoiceQuestion(MultipleChoiceQuestion),
    FreeTextQuestion(FreeTextQuestion),
}

impl Question {
    /// Permalink that regenerates this exact question.
    pub fn path(&self) -> &str {
        match self {
            Question::MultipleChoiceQuestion(q) => &q.path,
            Question::FreeTextQuestion(q)       => &q.path,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Question::MultipleChoiceQuestion(q) => &q.name,
            Question::FreeTextQuestion(q)       => &q.name,
        }
    }

    /// Markdown body, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Question::MultipleChoiceQuestion(q) => q.text.as_deref(),
            Question::FreeTextQuestion(q)       => q.text.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceQuestion {
    pub path: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub answers: Vec<String>,
    /// Whether more than one answer may be selected; absent means `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_multiple: Option<bool>,
    /// Whether the order of the selected answers matters; absent means `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorting: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeTextQuestion {
    pub path: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_text: Option<String>,
    /// Number of input lines; absent means one line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
}

// ---------------------------------------------------------------------------
// Answers and feedback
// ---------------------------------------------------------------------------

/// Indices of the selected answers. Order only matters for sorting questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleChoiceAnswer {
    pub choice: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTextAnswer {
    pub text: String,
}

impl FreeTextAnswer {
    pub fn new(text: impl Into<String>) -> Self {
        FreeTextAnswer { text: text.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceFeedback {
    /// `None` when correctness is deliberately withheld.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_choice: Option<Vec<usize>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeTextFeedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

/// Result of the free-text syntax pre-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatCheck {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormatCheck {
    pub fn valid() -> Self {
        FormatCheck { valid: true, message: None }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        FormatCheck { valid: false, message: Some(message.into()) }
    }
}

/// Serialize a question to the JSON interchange format.
pub fn question_to_json(question: &Question) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(question)
}

/// Parse a question from the JSON interchange format.
pub fn question_from_json(json: &str) -> Result<Question, serde_json::Error> {
    serde_json::from_str(json)
}
