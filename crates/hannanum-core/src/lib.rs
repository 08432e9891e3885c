//! Shared types for the HanNanum Korean morphological analyzer.
//!
//! # Architecture
//!
//! - [`jamo`] -- Hangul syllable decomposition into conjoining jamo ("triple" form) and back
//! - [`tagset`] -- KAIST tag set: tag ids, tag groups, tag categories and irregular classes
//! - [`tag_mapper`] -- Mapping tags onto coarser levels of the tag hierarchy
//! - [`comm`] -- Objects passed between pipeline stages
//! - [`error`] -- Stage and loading errors

pub mod comm;
pub mod error;
pub mod jamo;
pub mod tag_mapper;
pub mod tagset;

pub use comm::{Eojeol, PlainSentence, Sentence, SetOfSentences};
pub use error::{CoreError, ResultTypeError, Stage, TagMappingError};
pub use tagset::{PHONEME_ALL, Phoneme, TagId, TagSet, TagSetOptions, TagType};
