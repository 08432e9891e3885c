// Coarse-tag views of morphological analysis results

use hannanum_core::SetOfSentences;
use hashbrown::HashSet;

use super::{MorphemeProcessor, simplify_eojeol};

fn simplify_sets(mut sos: SetOfSentences, level: usize) -> SetOfSentences {
    for set in &mut sos.eojeol_sets {
        let mut seen = HashSet::with_capacity(set.len());
        let simplified = set
            .iter()
            .map(|e| simplify_eojeol(e, level))
            .filter(|e| seen.insert(e.to_string()))
            .collect();
        *set = simplified;
    }
    sos
}

/// Maps analyses onto the 9 top-level KAIST tags, merging neighbouring
/// morphemes that share a tag and dropping hypotheses that become equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleMaResult09;

impl MorphemeProcessor for SimpleMaResult09 {
    fn process(&mut self, sos: SetOfSentences) -> SetOfSentences {
        simplify_sets(sos, 1)
    }
}

/// Same as [`SimpleMaResult09`] on the 22-tag level.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleMaResult22;

impl MorphemeProcessor for SimpleMaResult22 {
    fn process(&mut self, sos: SetOfSentences) -> SetOfSentences {
        simplify_sets(sos, 2)
    }
}
