// Error types for analysis, configuration and workflows

use std::path::PathBuf;

use hannanum_core::CoreError;
use hannanum_dict::DictError;

/// Error raised while analyzing or tagging one sentence.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// A per-eojeol capacity limit was reached. The eojeol cannot be
    /// analyzed, but the analyzer stays usable.
    #[error("analysis overflow: more than {limit} {what}")]
    Overflow { what: &'static str, limit: usize },

    /// An eojeol position reached the tagger without any candidate.
    #[error("eojeol {index} has no analysis candidates")]
    NoCandidates { index: usize },

    #[error(transparent)]
    Dict(#[from] DictError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AnalysisError {
    pub(crate) fn overflow(what: &'static str, limit: usize) -> Self {
        AnalysisError::Overflow { what, limit }
    }
}

/// Error raised while loading configuration files and the resources they
/// point to.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}, line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("no data directory found (tried {0})")]
    NoDataDir(String),

    #[error(transparent)]
    Dict(#[from] DictError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Error raised by a [`Workflow`](crate::workflow::Workflow).
#[cfg(feature = "workflow")]
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    ResultType(#[from] hannanum_core::ResultTypeError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `analyze` or a result getter was called before activation.
    #[error("workflow is not activated")]
    NotActivated,

    /// The workflow was already activated.
    #[error("workflow is already activated")]
    AlreadyActivated,

    /// A stage needs an earlier stage the workflow does not have.
    #[error("workflow has no {0} stage")]
    MissingStage(hannanum_core::Stage),

    /// A result was requested while nothing is being analyzed.
    #[error("no pending results")]
    NoPendingResult,

    /// A worker stopped and its channel closed.
    #[error("{0} stage is no longer running")]
    Disconnected(&'static str),

    #[error("cannot read document: {0}")]
    Io(#[from] std::io::Error),
}
