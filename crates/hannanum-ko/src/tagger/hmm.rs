// Hidden Markov model POS tagger over eojeol candidates

use std::path::Path;

use hannanum_core::{Eojeol, Sentence, SetOfSentences};

use super::phrase_tag::phrase_tag;
use super::probability::ProbabilityTable;
use super::PosTagger;
use crate::config::TaggerConfig;
use crate::error::{AnalysisError, ConfigError};

/// Log probability used for morpheme statistics missing from the tables.
pub const PCONSTANT: f64 = -20.0;
/// Log probability (ln 0.01) used for unseen phrase tag transitions.
pub const SMOOTHING: f64 = -4.605_170_185_988_091;

/// Tag of the blank between eojeols.
pub const BLANK: &str = "bnk";
/// Phrase tag of the sentence-final node.
pub const TERMINAL: &str = "SF";

#[derive(Debug)]
struct Node {
    candidate: usize,
    phrase_tag: String,
    prob_wt: f64,
    prob: f64,
    backptr: Option<usize>,
}

/// Picks one analysis per eojeol with a Viterbi search.
///
/// Every candidate analysis is a state. Its emission score comes from the
/// morpheme-level tables (`pwt.pos`, `ptt.pos`) and transitions between
/// neighbouring eojeols are scored on their phrase tags (`ptt.wp`).
#[derive(Debug, Clone, Default)]
pub struct HmmTagger {
    pwt_pos: ProbabilityTable,
    ptt_pos: ProbabilityTable,
    ptt_wp: ProbabilityTable,
}

impl HmmTagger {
    pub fn new(pwt_pos: ProbabilityTable, ptt_pos: ProbabilityTable, ptt_wp: ProbabilityTable) -> Self {
        Self { pwt_pos, ptt_pos, ptt_wp }
    }

    pub fn load(config: &TaggerConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            ProbabilityTable::load(&config.pwt_pos)?,
            ProbabilityTable::load(&config.ptt_pos)?,
            ProbabilityTable::load(&config.ptt_wp)?,
        ))
    }

    pub fn from_config(base_dir: impl AsRef<Path>, config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load(&TaggerConfig::load(base_dir, config_path)?)
    }

    /// Emission score of one analysis: for each morpheme, its lexical
    /// probability plus the tag bigram from the previous tag minus the tag
    /// unigram, then the bigram into the trailing blank minus the blank
    /// unigram.
    pub fn eojeol_score(&self, eojeol: &Eojeol) -> f64 {
        let pos = |key: &str| self.ptt_pos.first(key).unwrap_or(PCONSTANT);
        let mut score = 0.0;
        let mut prev = BLANK;
        for (morpheme, tag) in eojeol.pairs() {
            let lexicon = self.pwt_pos.first(&format!("{morpheme}/{tag}")).unwrap_or(PCONSTANT);
            score += lexicon + pos(&format!("{prev}-{tag}")) - pos(tag);
            prev = tag;
        }
        score + pos(&format!("{prev}-{BLANK}")) - pos(BLANK)
    }

    /// Score of moving from phrase tag `from` to phrase tag `to`.
    pub fn transition(&self, from: &str, to: &str) -> f64 {
        let joint = self.ptt_wp.first(&format!("{from}-{to}")).unwrap_or(SMOOTHING);
        match self.ptt_wp.first(to) {
            Some(unigram) => joint - unigram,
            None => joint,
        }
    }

    /// Choose the best analysis of every eojeol.
    pub fn tag(&self, sos: &SetOfSentences) -> Result<Sentence, AnalysisError> {
        let mut layers: Vec<Vec<Node>> = Vec::with_capacity(sos.len() + 1);
        for (index, set) in sos.eojeol_sets.iter().enumerate() {
            if set.is_empty() {
                return Err(AnalysisError::NoCandidates { index });
            }
            let nodes = set
                .iter()
                .enumerate()
                .map(|(candidate, eojeol)| {
                    let prob_wt = self.eojeol_score(eojeol);
                    Node {
                        candidate,
                        phrase_tag: phrase_tag(eojeol.tags()),
                        prob_wt,
                        prob: prob_wt,
                        backptr: None,
                    }
                })
                .collect();
            layers.push(nodes);
        }
        if layers.is_empty() {
            return Ok(Sentence::new(
                sos.document_id,
                sos.sentence_id,
                sos.end_of_document,
                sos.plain_eojeols.clone(),
                Vec::new(),
            ));
        }
        layers.push(vec![Node {
            candidate: 0,
            phrase_tag: TERMINAL.to_string(),
            prob_wt: 0.0,
            prob: 0.0,
            backptr: None,
        }]);

        for l in 1..layers.len() {
            let (done, rest) = layers.split_at_mut(l);
            let prev = &done[l - 1];
            for to in rest[0].iter_mut() {
                for (i, from) in prev.iter().enumerate() {
                    let p = from.prob + self.transition(&from.phrase_tag, &to.phrase_tag) + to.prob_wt;
                    if to.backptr.is_none() || p > to.prob {
                        to.backptr = Some(i);
                        to.prob = p;
                    }
                }
            }
        }

        let mut chosen = vec![0; sos.len()];
        let mut cursor = layers[sos.len()][0].backptr;
        for l in (0..sos.len()).rev() {
            let Some(i) = cursor else { break };
            chosen[l] = layers[l][i].candidate;
            cursor = layers[l][i].backptr;
        }
        log::trace!("best path score {}", layers[sos.len()][0].prob);

        let eojeols = chosen
            .iter()
            .zip(&sos.eojeol_sets)
            .map(|(&c, set)| set[c].clone())
            .collect();
        Ok(Sentence::new(
            sos.document_id,
            sos.sentence_id,
            sos.end_of_document,
            sos.plain_eojeols.clone(),
            eojeols,
        ))
    }
}

impl PosTagger for HmmTagger {
    fn tag_pos(&mut self, sos: &SetOfSentences) -> Result<Sentence, AnalysisError> {
        self.tag(sos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(src: &str) -> ProbabilityTable {
        ProbabilityTable::from_reader(src.as_bytes()).unwrap()
    }

    fn tagger() -> HmmTagger {
        HmmTagger::new(
            table("나/npp -1\n는/jxc -1\n나/pvg -5\n는/etm -3\n"),
            table("bnk-npp -2\nnpp-jxc -1\njxc-bnk -1\nnpp -3\njxc -2\nbnk -1\n"),
            table("NX-SF -1\nPM-SF -10\n"),
        )
    }

    fn sos(sets: Vec<Vec<Eojeol>>) -> SetOfSentences {
        let plain = sets.iter().map(|_| "x".to_string()).collect();
        SetOfSentences::new(1, 2, true, plain, sets)
    }

    #[test]
    fn eojeol_score_sums_morpheme_terms() {
        let t = tagger();
        let e = Eojeol::from_pairs([("나", "npp"), ("는", "jxc")]);
        // (-1 - 2 + 3) + (-1 - 1 + 2) + (-1 + 1)
        assert!((t.eojeol_score(&e) - 0.0).abs() < 1e-9);

        let unseen = Eojeol::from_pairs([("가", "zz")]);
        let expected = (PCONSTANT + PCONSTANT - PCONSTANT) + (PCONSTANT + 1.0);
        assert!((t.eojeol_score(&unseen) - expected).abs() < 1e-9);
    }

    #[test]
    fn empty_eojeol_scores_only_the_blank() {
        let t = tagger();
        let e = Eojeol::new(Vec::new(), Vec::new());
        assert!((t.eojeol_score(&e) - (PCONSTANT + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn transition_smooths_unseen_pairs() {
        let t = tagger();
        assert_eq!(t.transition("NX", "SF"), -1.0);
        assert_eq!(t.transition("NA", "SF"), SMOOTHING);
    }

    #[test]
    fn picks_the_best_candidate() {
        let t = tagger();
        let sentence = t
            .tag(&sos(vec![vec![
                Eojeol::from_pairs([("나", "pvg"), ("는", "etm")]),
                Eojeol::from_pairs([("나", "npp"), ("는", "jxc")]),
            ]]))
            .unwrap();
        assert_eq!(sentence.eojeols[0].to_string(), "나/npp+는/jxc");
        assert_eq!((sentence.document_id, sentence.sentence_id, sentence.end_of_document), (1, 2, true));
    }

    #[test]
    fn empty_candidate_set_is_an_error() {
        let t = tagger();
        let err = t
            .tag(&sos(vec![vec![Eojeol::from_pairs([("나", "npp")])], Vec::new()]))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::NoCandidates { index: 1 }));
    }

    #[test]
    fn empty_sentence_tags_to_nothing() {
        let sentence = tagger().tag(&sos(Vec::new())).unwrap();
        assert!(sentence.is_empty());
    }
}
