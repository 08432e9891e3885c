//! Dictionary structures behind the HanNanum chart analyzer.
//!
//! Words are stored in "triple" form (see [`hannanum_core::jamo`]): every
//! Hangul syllable is split into its conjoining jamo before it reaches a trie.
//!
//! # Architecture
//!
//! - [`arena`] -- Growable node arena with contiguous sibling blocks and a coalescing free list
//! - [`trie`] -- Morpheme dictionary trie with a last-search cache
//! - [`simti`] -- Reversed-suffix index mapping shared tails to chart positions
//! - [`number`] -- Numeric literal automaton
//! - [`connection`] -- Tag adjacency table
//! - [`connection_not`] -- Morpheme-level connection exceptions
//! - [`analyzed`] -- Pre-analyzed eojeol dictionary

pub mod analyzed;
pub mod arena;
pub mod connection;
pub mod connection_not;
pub mod number;
pub mod simti;
pub mod trie;

pub use analyzed::AnalyzedDic;
pub use connection::Connection;
pub use connection_not::ConnectionNot;
pub use number::NumberDic;
pub use simti::Simti;
pub use trie::{Entry, Trie, TrieNode};

use std::path::PathBuf;

/// Error type for dictionary loading and mutation.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("empty key cannot be stored")]
    EmptyKey,
}

impl DictError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DictError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Open a file for buffered line reading, naming the path on failure.
pub(crate) fn open(path: &std::path::Path) -> Result<std::io::BufReader<std::fs::File>, DictError> {
    std::fs::File::open(path)
        .map(std::io::BufReader::new)
        .map_err(|e| DictError::io(path, e))
}
