// Objects passed between pipeline stages

use std::fmt;

// ---------------------------------------------------------------------------
// Eojeol
// ---------------------------------------------------------------------------

/// One segmentation hypothesis of an eojeol: morphemes paired with tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Eojeol {
    morphemes: Vec<String>,
    tags: Vec<String>,
}

impl Eojeol {
    /// Build an eojeol. Extra entries in the longer list are dropped.
    pub fn new(mut morphemes: Vec<String>, mut tags: Vec<String>) -> Self {
        let len = morphemes.len().min(tags.len());
        morphemes.truncate(len);
        tags.truncate(len);
        Self { morphemes, tags }
    }

    /// Build an eojeol from `(morpheme, tag)` pairs.
    pub fn from_pairs<M, T>(pairs: impl IntoIterator<Item = (M, T)>) -> Self
    where
        M: Into<String>,
        T: Into<String>,
    {
        let (morphemes, tags) = pairs
            .into_iter()
            .map(|(m, t)| (m.into(), t.into()))
            .unzip();
        Self { morphemes, tags }
    }

    pub fn len(&self) -> usize {
        self.morphemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.morphemes.is_empty()
    }

    pub fn morphemes(&self) -> &[String] {
        &self.morphemes
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn morpheme(&self, index: usize) -> Option<&str> {
        self.morphemes.get(index).map(String::as_str)
    }

    pub fn tag(&self, index: usize) -> Option<&str> {
        self.tags.get(index).map(String::as_str)
    }

    /// Iterate over `(morpheme, tag)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.morphemes
            .iter()
            .zip(&self.tags)
            .map(|(m, t)| (m.as_str(), t.as_str()))
    }

    /// Replace the morpheme at `index`. Returns false if out of range.
    pub fn set_morpheme(&mut self, index: usize, morpheme: impl Into<String>) -> bool {
        match self.morphemes.get_mut(index) {
            Some(slot) => {
                *slot = morpheme.into();
                true
            }
            None => false,
        }
    }

    /// Replace the tag at `index`. Returns false if out of range.
    pub fn set_tag(&mut self, index: usize, tag: impl Into<String>) -> bool {
        match self.tags.get_mut(index) {
            Some(slot) => {
                *slot = tag.into();
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Eojeol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (m, t)) in self.pairs().enumerate() {
            if i != 0 {
                f.write_str("+")?;
            }
            write!(f, "{m}/{t}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sentence-level objects
// ---------------------------------------------------------------------------

/// A sentence of raw text, output of the plain-text stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainSentence {
    pub document_id: usize,
    pub sentence_id: usize,
    pub end_of_document: bool,
    pub sentence: String,
}

impl PlainSentence {
    pub fn new(document_id: usize, sentence_id: usize, end_of_document: bool, sentence: impl Into<String>) -> Self {
        Self {
            document_id,
            sentence_id,
            end_of_document,
            sentence: sentence.into(),
        }
    }
}

impl fmt::Display for PlainSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sentence)
    }
}

/// Every segmentation hypothesis of every eojeol in a sentence, output of
/// the morphological analysis stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetOfSentences {
    pub document_id: usize,
    pub sentence_id: usize,
    pub end_of_document: bool,
    pub plain_eojeols: Vec<String>,
    pub eojeol_sets: Vec<Vec<Eojeol>>,
}

impl SetOfSentences {
    pub fn new(
        document_id: usize,
        sentence_id: usize,
        end_of_document: bool,
        plain_eojeols: Vec<String>,
        eojeol_sets: Vec<Vec<Eojeol>>,
    ) -> Self {
        Self {
            document_id,
            sentence_id,
            end_of_document,
            plain_eojeols,
            eojeol_sets,
        }
    }

    /// Number of eojeols.
    pub fn len(&self) -> usize {
        self.eojeol_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eojeol_sets.is_empty()
    }
}

impl fmt::Display for SetOfSentences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (plain, set) in self.plain_eojeols.iter().zip(&self.eojeol_sets) {
            writeln!(f, "{plain}")?;
            for eojeol in set {
                writeln!(f, "\t{eojeol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One chosen reading per eojeol, output of the POS tagging stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    pub document_id: usize,
    pub sentence_id: usize,
    pub end_of_document: bool,
    pub plain_eojeols: Vec<String>,
    pub eojeols: Vec<Eojeol>,
}

impl Sentence {
    pub fn new(
        document_id: usize,
        sentence_id: usize,
        end_of_document: bool,
        plain_eojeols: Vec<String>,
        eojeols: Vec<Eojeol>,
    ) -> Self {
        Self {
            document_id,
            sentence_id,
            end_of_document,
            plain_eojeols,
            eojeols,
        }
    }

    pub fn len(&self) -> usize {
        self.eojeols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eojeols.is_empty()
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (plain, eojeol) in self.plain_eojeols.iter().zip(&self.eojeols) {
            writeln!(f, "{plain}")?;
            writeln!(f, "\t{eojeol}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eojeol(pairs: &[(&str, &str)]) -> Eojeol {
        Eojeol::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn eojeol_display_joins_pairs() {
        let e = eojeol(&[("나", "npp"), ("는", "jxc")]);
        assert_eq!(e.to_string(), "나/npp+는/jxc");
        assert_eq!(e.len(), 2);
    }

    #[test]
    fn eojeol_new_truncates_to_shorter_list() {
        let e = Eojeol::new(vec!["a".into(), "b".into()], vec!["f".into()]);
        assert_eq!(e.len(), 1);
        assert_eq!(e.tags(), ["f"]);
    }

    #[test]
    fn set_morpheme_checks_bounds() {
        let mut e = eojeol(&[("어", "ecs")]);
        assert!(e.set_morpheme(0, "아"));
        assert!(!e.set_morpheme(1, "x"));
        assert!(!e.set_tag(3, "x"));
        assert_eq!(e.morpheme(0), Some("아"));
    }

    #[test]
    fn set_of_sentences_display() {
        let sos = SetOfSentences::new(
            0,
            0,
            true,
            vec!["나는".into()],
            vec![vec![eojeol(&[("나", "npp"), ("는", "jxc")]), eojeol(&[("날", "pvg"), ("는", "etm")])]],
        );
        assert_eq!(sos.to_string(), "나는\n\t나/npp+는/jxc\n\t날/pvg+는/etm\n\n");
    }

    #[test]
    fn sentence_display() {
        let s = Sentence::new(0, 0, false, vec!["학교에".into()], vec![eojeol(&[("학교", "ncn"), ("에", "jca")])]);
        assert_eq!(s.to_string(), "학교에\n\t학교/ncn+에/jca\n\n");
    }
}
