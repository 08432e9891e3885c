// Error types shared across the workspace

use std::fmt;

/// Processing stage a workflow can end in.
///
/// Each stage produces one kind of result object: plain sentences after text
/// pre-processing, candidate sets after morphological analysis, and a single
/// chosen reading per eojeol after POS tagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    PlainText = 1,
    MorphAnalysis = 2,
    PosTagging = 3,
}

impl Stage {
    /// Name of the result type this stage produces.
    pub fn result_type(self) -> &'static str {
        match self {
            Stage::PlainText => "PlainSentence",
            Stage::MorphAnalysis => "SetOfSentences",
            Stage::PosTagging => "Sentence",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::PlainText => "plain-text",
            Stage::MorphAnalysis => "morph-analysis",
            Stage::PosTagging => "pos-tagging",
        };
        write!(f, "{name}")
    }
}

/// A result was requested in a shape the workflow does not produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error(
    "the workflow ends in the {actual} stage, so results must be read as `{}` (requested `{}`)",
    actual.result_type(),
    expected.result_type()
)]
pub struct ResultTypeError {
    /// Stage whose result type the caller asked for.
    pub expected: Stage,
    /// Stage the workflow actually ends in.
    pub actual: Stage,
}

/// A tag could not be mapped onto a coarser tag set level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to get a tag which is mapped with `{tag}`")]
pub struct TagMappingError {
    pub tag: String,
}

/// Errors raised while loading shared resources such as the tag set.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("required tag `{0}` is not defined in the tag set")]
    MissingTag(String),
}
