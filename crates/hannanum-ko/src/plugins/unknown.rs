// Guesses for unknown morphemes

use hannanum_core::{Eojeol, SetOfSentences};

use super::MorphemeProcessor;

const UNKNOWN: &str = "unk";
const COMMON_NOUN: &str = "ncn";
const PROPER_NOUN: &str = "nqq";

/// Turns unknown morphemes into nouns.
///
/// An `unk` morpheme most likely is a noun missing from the dictionary:
/// each one is retagged as a common noun, and a copy of the hypothesis with
/// it as a proper noun is added to the set.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownProcessor;

impl UnknownProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl MorphemeProcessor for UnknownProcessor {
    fn process(&mut self, mut sos: SetOfSentences) -> SetOfSentences {
        for set in &mut sos.eojeol_sets {
            let mut i = 0;
            while i < set.len() {
                for k in 0..set[i].len() {
                    if set[i].tag(k) != Some(UNKNOWN) {
                        continue;
                    }
                    let mut proper: Eojeol = set[i].clone();
                    proper.set_tag(k, PROPER_NOUN);
                    set.push(proper);
                    set[i].set_tag(k, COMMON_NOUN);
                }
                i += 1;
            }
        }
        sos
    }
}
