// Coarse-tag views of tagged sentences

use hannanum_core::Sentence;

use super::{PosProcessor, simplify_eojeol};

fn simplify(mut sentence: Sentence, level: usize) -> Sentence {
    for eojeol in &mut sentence.eojeols {
        *eojeol = simplify_eojeol(eojeol, level);
    }
    sentence
}

/// Maps the chosen analyses onto the 9 top-level KAIST tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplePosResult09;

impl PosProcessor for SimplePosResult09 {
    fn process(&mut self, sentence: Sentence) -> Sentence {
        simplify(sentence, 1)
    }
}

/// Maps the chosen analyses onto the 22 KAIST tags of the second level.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplePosResult22;

impl PosProcessor for SimplePosResult22 {
    fn process(&mut self, sentence: Sentence) -> Sentence {
        simplify(sentence, 2)
    }
}
