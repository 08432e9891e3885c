// POS tagging: choosing one analysis per eojeol.

pub mod hmm;
pub mod phrase_tag;
pub mod probability;

use hannanum_core::{Sentence, SetOfSentences};

pub use hmm::HmmTagger;
pub use phrase_tag::phrase_tag;
pub use probability::ProbabilityTable;

use crate::error::AnalysisError;

/// POS tagging stage of a workflow.
pub trait PosTagger: Send {
    /// Pick one analysis for each eojeol of `sos`.
    fn tag_pos(&mut self, sos: &SetOfSentences) -> Result<Sentence, AnalysisError>;
}
