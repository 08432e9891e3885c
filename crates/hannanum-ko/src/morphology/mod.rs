// Chart-based morphological analysis.
//
// A sentence is split into eojeols on spaces and tabs. Each eojeol is looked
// up in the pre-analyzed dictionary first; only unlisted eojeols go through
// the morpheme chart, which enumerates every dictionary-backed segmentation
// the connection table admits. The resulting candidate sets are finally
// passed through the ending post-processor.

pub mod chart;
pub mod postprocess;
pub mod rules;
pub mod segment;

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use hannanum_core::tagset::{TagSet, TagSetOptions};
use hannanum_core::{Eojeol, PlainSentence, SetOfSentences};
use hannanum_dict::{AnalyzedDic, Connection, ConnectionNot, Trie};

pub use chart::{MorphemeChart, CHI_PLACEHOLDER, ENG_PLACEHOLDER};
pub use postprocess::PostProcessor;

use crate::config::{AnalyzerConfig, AnalyzerOptions};
use crate::error::{AnalysisError, ConfigError};

/// Morphological analysis stage of a workflow.
pub trait MorphAnalyzer: Send {
    /// Every analysis of every eojeol of `sentence`.
    fn morph_analyze(&mut self, sentence: &PlainSentence) -> Result<SetOfSentences, AnalysisError>;
}

/// Loaded resources of the analyzer.
#[derive(Debug)]
pub struct AnalyzerData {
    pub tagset: TagSet,
    pub connection: Connection,
    pub connection_not: ConnectionNot,
    pub analyzed: AnalyzedDic,
    pub system_dic: Trie,
    pub user_dic: Option<Trie>,
}

impl AnalyzerData {
    /// Load every file named in `config`. Paths are used as given.
    pub fn load(config: &AnalyzerConfig) -> Result<Self, ConfigError> {
        let tag_options = TagSetOptions {
            legacy_josa_slot: config.options.legacy_josa_slot,
        };
        let tagset = TagSet::load_with(&config.tagset, tag_options)?;
        let connection = Connection::load(&config.connections, &tagset)?;
        let connection_not = ConnectionNot::load(&config.connections_not, &tagset)?;
        let analyzed = AnalyzedDic::load(&config.dic_analyzed)?;
        let system_dic = Trie::load(&config.dic_system, &tagset)?;
        let user_dic = match &config.dic_user {
            Some(path) => Some(Trie::load(path, &tagset)?),
            None => None,
        };
        log::info!(
            "analyzer resources loaded: {} tags, {} pre-analyzed eojeols",
            tagset.tag_count(),
            analyzed.len()
        );
        Ok(Self {
            tagset,
            connection,
            connection_not,
            analyzed,
            system_dic,
            user_dic,
        })
    }

    /// Build the resources from in-memory sources, without a user
    /// dictionary.
    pub fn from_readers(
        tagset: impl BufRead,
        connections: impl BufRead,
        connections_not: impl BufRead,
        analyzed: impl BufRead,
        system_dic: impl BufRead,
        options: TagSetOptions,
    ) -> Result<Self, ConfigError> {
        let tagset = TagSet::from_reader(tagset, options)?;
        let connection = Connection::from_reader(connections, &tagset)?;
        let connection_not = ConnectionNot::from_reader(connections_not, &tagset)?;
        let analyzed = AnalyzedDic::from_reader(analyzed)?;
        let mut dic = Trie::new();
        dic.read_dic(system_dic, &tagset)?;
        Ok(Self {
            tagset,
            connection,
            connection_not,
            analyzed,
            system_dic: dic,
            user_dic: None,
        })
    }
}

/// HanNanum chart morphological analyzer.
///
/// Not shareable between threads while analyzing: the chart is scratch
/// state reused across eojeols. Build one analyzer per worker.
pub struct ChartMorphAnalyzer {
    analyzed: AnalyzedDic,
    connection_not: ConnectionNot,
    chart: MorphemeChart,
    post: PostProcessor,
}

impl ChartMorphAnalyzer {
    pub fn new(data: AnalyzerData, options: AnalyzerOptions) -> Self {
        let AnalyzerData {
            tagset,
            connection,
            connection_not,
            analyzed,
            system_dic,
            user_dic,
        } = data;
        let chart = MorphemeChart::new(Arc::new(tagset), Arc::new(connection), system_dic, user_dic, options);
        Self {
            analyzed,
            connection_not,
            chart,
            post: PostProcessor::new(),
        }
    }

    /// Load the analyzer described by the JSON file `config_path`, with
    /// resource paths relative to `base_dir`.
    pub fn from_config(base_dir: impl AsRef<Path>, config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = AnalyzerConfig::load(base_dir, config_path)?;
        let data = AnalyzerData::load(&config)?;
        Ok(Self::new(data, config.options))
    }

    pub fn tagset(&self) -> &TagSet {
        self.chart.tagset()
    }

    /// Morpheme pairs the tag set says should never be adjacent.
    pub fn connection_not(&self) -> &ConnectionNot {
        &self.connection_not
    }

    /// Replace the user dictionary with the one in `path`.
    pub fn load_user_dic(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let dic = Trie::load(path, self.chart.tagset())?;
        self.chart.set_user_dic(Some(dic));
        Ok(())
    }

    /// Analyses of one eojeol, before post-processing.
    pub fn analyze_eojeol(&mut self, eojeol: &str) -> Result<Vec<Eojeol>, AnalysisError> {
        if let Some(listed) = self.analyzed.get(eojeol) {
            return Ok(listed.to_vec());
        }
        self.chart.analyze_eojeol(eojeol)
    }

    /// Analyze every eojeol of `sentence`.
    ///
    /// An eojeol that overflows the chart limits is kept as a single
    /// unknown morpheme so the rest of the sentence still gets analyzed.
    pub fn analyze_sentence(&mut self, sentence: &PlainSentence) -> Result<SetOfSentences, AnalysisError> {
        let plain: Vec<String> = sentence
            .sentence
            .split([' ', '\t'])
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let mut sets = Vec::with_capacity(plain.len());
        for eojeol in &plain {
            let analyses = match self.analyze_eojeol(eojeol) {
                Ok(analyses) => analyses,
                Err(err @ AnalysisError::Overflow { .. }) => {
                    log::warn!("{eojeol}: {err}; kept as unknown");
                    vec![self.unknown(eojeol)]
                }
                Err(err) => return Err(err),
            };
            sets.push(analyses);
        }

        let mut result = SetOfSentences::new(
            sentence.document_id,
            sentence.sentence_id,
            sentence.end_of_document,
            plain,
            sets,
        );
        self.post.process(&mut result);
        Ok(result)
    }

    fn unknown(&self, eojeol: &str) -> Eojeol {
        let tagset = self.chart.tagset();
        Eojeol::new(vec![eojeol.to_string()], vec![tagset.tag_name(tagset.unk_tag).to_string()])
    }
}

impl MorphAnalyzer for ChartMorphAnalyzer {
    fn morph_analyze(&mut self, sentence: &PlainSentence) -> Result<SetOfSentences, AnalysisError> {
        self.analyze_sentence(sentence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAGS: &str = "TAG\tiwg\nTAG\tunk\nTAG\tnnc\nTAG\tncn\nTAG\tnpp\nTAG\tpvg\nTAG\tjxc\nTAG\tetm\nTAG\tecs\n\
TSET\tn\tncn npp nnc\nTSET\tp\tpvg\nTSET\tj\tjxc\nTSET\te\tetm ecs\n";
    const CONNECTIONS: &str = "CONNECTION\tiwg*n,p,unk\nCONNECTION\tn*jxc\nCONNECTION\tp*e\nCONNECTION\tn,unk,jxc,etm,ecs*iwg\n";
    const NOT: &str = "CONNECTION_NOT\t나 npp 는 etm\n";
    const ANALYZED: &str = "너는\t너/npp+는/jxc\n";
    const DIC: &str = "나\tnpp pvg\n는\tjxc etm\n어\tecs\n";

    fn analyzer(options: AnalyzerOptions) -> ChartMorphAnalyzer {
        let data = AnalyzerData::from_readers(
            TAGS.as_bytes(),
            CONNECTIONS.as_bytes(),
            NOT.as_bytes(),
            ANALYZED.as_bytes(),
            DIC.as_bytes(),
            TagSetOptions::default(),
        )
        .unwrap();
        ChartMorphAnalyzer::new(data, options)
    }

    fn strings(set: &[Eojeol]) -> Vec<String> {
        set.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn pre_analyzed_eojeols_bypass_the_chart() {
        let mut ma = analyzer(AnalyzerOptions::default());
        assert_eq!(strings(&ma.analyze_eojeol("너는").unwrap()), ["너/npp+는/jxc"]);
        assert_eq!(ma.connection_not().rules().len(), 1);
    }

    #[test]
    fn sentence_splits_on_spaces_and_tabs() {
        let mut ma = analyzer(AnalyzerOptions::default());
        let ps = PlainSentence::new(3, 1, true, " 너는\t나  ");
        let sos = ma.analyze_sentence(&ps).unwrap();
        assert_eq!(sos.plain_eojeols, ["너는", "나"]);
        assert_eq!(sos.len(), 2);
        assert_eq!((sos.document_id, sos.sentence_id, sos.end_of_document), (3, 1, true));
        assert!(strings(&sos.eojeol_sets[1]).contains(&"나/npp".to_string()));
    }

    #[test]
    fn endings_are_post_processed() {
        let mut ma = analyzer(AnalyzerOptions::default());
        let sos = ma.analyze_sentence(&PlainSentence::new(0, 0, false, "나어")).unwrap();
        let found = strings(&sos.eojeol_sets[0]);
        assert!(found.contains(&"나/pvg+아/ecs".to_string()));
        assert!(!found.iter().any(|a| a.contains("나/pvg+어")));
    }

    #[test]
    fn overflow_falls_back_to_unknown() {
        let options = AnalyzerOptions {
            max_positions: 16,
            ..AnalyzerOptions::default()
        };
        let mut ma = analyzer(options);
        let sos = ma.analyze_sentence(&PlainSentence::new(0, 0, false, "나 가가가가가가가가가가")).unwrap();
        assert!(strings(&sos.eojeol_sets[0]).contains(&"나/npp".to_string()));
        assert_eq!(strings(&sos.eojeol_sets[1]), ["가가가가가가가가가가/unk"]);
    }

    #[test]
    fn very_long_eojeol_is_kept_whole() {
        let mut ma = analyzer(AnalyzerOptions::default());
        let word = "나".repeat(300);
        let sos = ma.analyze_sentence(&PlainSentence::new(0, 0, false, &word)).unwrap();
        assert_eq!(strings(&sos.eojeol_sets[0]), [format!("{word}/unk")]);
    }

    #[test]
    fn empty_sentence_has_no_eojeols() {
        let mut ma = analyzer(AnalyzerOptions::default());
        let sos = ma.morph_analyze(&PlainSentence::new(0, 0, false, "  ")).unwrap();
        assert!(sos.is_empty());
    }
}
