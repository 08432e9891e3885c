// Keeps only the nouns of a tagged sentence

use hannanum_core::{Eojeol, Sentence};

use super::PosProcessor;

/// Reduces every eojeol to its noun morphemes. Foreign words count as
/// common nouns.
#[derive(Debug, Clone, Copy, Default)]
pub struct NounExtractor;

impl NounExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl PosProcessor for NounExtractor {
    fn process(&mut self, mut sentence: Sentence) -> Sentence {
        for eojeol in &mut sentence.eojeols {
            let nouns = eojeol.pairs().filter_map(|(m, t)| match t.chars().next() {
                Some('n') => Some((m.to_string(), t.to_string())),
                Some('f') => Some((m.to_string(), "ncn".to_string())),
                _ => None,
            });
            *eojeol = Eojeol::from_pairs(nouns.collect::<Vec<_>>());
        }
        sentence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_nouns_and_foreign_words() {
        let sentence = Sentence::new(
            0,
            0,
            false,
            vec!["학교에".into(), "abc를".into(), "간다".into()],
            vec![
                Eojeol::from_pairs([("학교", "ncn"), ("에", "jca")]),
                Eojeol::from_pairs([("abc", "f"), ("를", "jco")]),
                Eojeol::from_pairs([("가", "pvg"), ("ㄴ다", "ef")]),
            ],
        );
        let out = NounExtractor::new().process(sentence);
        let shown: Vec<String> = out.eojeols.iter().map(ToString::to_string).collect();
        assert_eq!(shown, ["학교/ncn", "abc/ncn", ""]);
        assert!(out.eojeols[2].is_empty());
    }
}
