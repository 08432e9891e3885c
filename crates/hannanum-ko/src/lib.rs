//! Korean morphological analysis and POS tagging in the HanNanum model.
//!
//! An eojeol (a space-delimited word) is analyzed by a morpheme chart that
//! combines dictionary lookups with morphophonemic rules; every
//! segmentation the tag connection table admits is kept. The HMM tagger
//! then picks one analysis per eojeol for the whole sentence.
//!
//! # Architecture
//!
//! - [`morphology`] -- Chart morphological analyzer: positions, rules, chart, post-processing
//! - [`tagger`] -- HMM POS tagger, phrase tags and probability tables (feature `tagger`)
//! - [`plugins`] -- Sentence segmentation, spacing fixes, unknown-word and tag simplification passes
//! - [`workflow`] -- Staged pipeline, single-threaded or one thread per stage (feature `workflow`)
//! - [`config`] -- JSON configuration of the analyzer and the tagger
//! - [`error`] -- Error types
//!
//! # Quick start
//!
//! ```no_run
//! use hannanum_core::PlainSentence;
//! use hannanum_ko::morphology::ChartMorphAnalyzer;
//!
//! let mut analyzer = ChartMorphAnalyzer::from_config("/usr/share/hannanum", "analyzer.json")?;
//! let sos = analyzer.analyze_sentence(&PlainSentence::new(0, 0, true, "나는 학교에 간다"))?;
//! print!("{sos}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod morphology;
pub mod plugins;
#[cfg(feature = "tagger")]
pub mod tagger;
#[cfg(feature = "workflow")]
pub mod workflow;

pub use config::{AnalyzerConfig, AnalyzerOptions, TaggerConfig};
#[cfg(feature = "workflow")]
pub use error::WorkflowError;
pub use error::{AnalysisError, ConfigError};
pub use morphology::{AnalyzerData, ChartMorphAnalyzer, MorphAnalyzer};
#[cfg(feature = "tagger")]
pub use tagger::{HmmTagger, PosTagger};
#[cfg(feature = "workflow")]
pub use workflow::{StageOutput, Workflow, WorkflowFactory};
