// Supplement plugins run between the major stages of a workflow.
//
// Plain-text processors reshape raw sentences before analysis, morpheme
// processors rewrite the candidate sets the analyzer produced, and POS
// processors rewrite the tagged sentence.

pub mod informal_filter;
pub mod noun_extractor;
pub mod sentence_segmentor;
pub mod simple_ma;
pub mod simple_pos;
pub mod unknown;

use hannanum_core::tag_mapper::kaist_tag_on_level;
use hannanum_core::{Eojeol, PlainSentence, Sentence, SetOfSentences};

pub use informal_filter::InformalSentenceFilter;
pub use noun_extractor::NounExtractor;
pub use sentence_segmentor::SentenceSegmentor;
pub use simple_ma::{SimpleMaResult09, SimpleMaResult22};
pub use simple_pos::{SimplePosResult09, SimplePosResult22};
pub use unknown::UnknownProcessor;

/// Rewrites raw text before morphological analysis.
///
/// A processor may hold text back (a sentence still waiting for its end
/// mark) and release it on a later call or on [`flush`](Self::flush).
pub trait PlainTextProcessor: Send {
    fn process(&mut self, sentence: PlainSentence) -> Vec<PlainSentence>;

    /// Release anything still buffered.
    fn flush(&mut self) -> Vec<PlainSentence> {
        Vec::new()
    }
}

/// Rewrites the candidate sets of the morphological analyzer.
pub trait MorphemeProcessor: Send {
    fn process(&mut self, sos: SetOfSentences) -> SetOfSentences;
}

/// Rewrites the tagged sentence.
pub trait PosProcessor: Send {
    fn process(&mut self, sentence: Sentence) -> Sentence;
}

/// Map every tag of `eojeol` onto `level` and merge neighbouring morphemes
/// that end up with the same tag.
pub(crate) fn simplify_eojeol(eojeol: &Eojeol, level: usize) -> Eojeol {
    let mut morphemes: Vec<String> = Vec::with_capacity(eojeol.len());
    let mut tags: Vec<String> = Vec::with_capacity(eojeol.len());
    for (morpheme, tag) in eojeol.pairs() {
        let mapped = kaist_tag_on_level(tag, level).unwrap_or_else(|err| {
            log::warn!("{err}; kept as is");
            tag.to_string()
        });
        if tags.last() == Some(&mapped) {
            if let Some(prev) = morphemes.last_mut() {
                prev.push_str(morpheme);
            }
        } else {
            morphemes.push(morpheme.to_string());
            tags.push(mapped);
        }
    }
    Eojeol::new(morphemes, tags)
}
