// Staged analysis workflow.
//
// A workflow chains plain-text processors, one morphological analyzer,
// morpheme processors, an optional POS tagger and POS processors. Each item
// travels down the chain as a `Result`, so an analysis error surfaces at
// the result getters in document order instead of stopping the chain.
//
// In single-thread mode `analyze` runs the whole chain before returning.
// In threaded mode every stage runs in its own worker thread, connected by
// unbounded channels; results are collected from the last channel.

use std::collections::VecDeque;
use std::path::Path;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use hannanum_core::{PlainSentence, ResultTypeError, Sentence, SetOfSentences, Stage};

use crate::error::{AnalysisError, WorkflowError};
use crate::morphology::{ChartMorphAnalyzer, MorphAnalyzer};
use crate::plugins::{
    InformalSentenceFilter, MorphemeProcessor, NounExtractor, PlainTextProcessor, PosProcessor,
    SentenceSegmentor, SimplePosResult09, SimplePosResult22, UnknownProcessor,
};
use crate::tagger::{HmmTagger, PosTagger};

/// Analyzer configuration file read by [`WorkflowFactory`].
pub const ANALYZER_CONFIG: &str = "analyzer.json";
/// Tagger configuration file read by [`WorkflowFactory`].
pub const TAGGER_CONFIG: &str = "tagger.json";

/// Output of one stage.
#[derive(Debug, Clone, PartialEq)]
pub enum StageResult {
    Plain(PlainSentence),
    Morph(SetOfSentences),
    Pos(Sentence),
}

impl StageResult {
    fn end_of_document(&self) -> bool {
        match self {
            StageResult::Plain(s) => s.end_of_document,
            StageResult::Morph(s) => s.end_of_document,
            StageResult::Pos(s) => s.end_of_document,
        }
    }
}

/// Result types a workflow can hand out, one per [`Stage`].
pub trait StageOutput: Sized {
    const STAGE: Stage;

    fn from_result(result: StageResult) -> Option<Self>;
}

impl StageOutput for PlainSentence {
    const STAGE: Stage = Stage::PlainText;

    fn from_result(result: StageResult) -> Option<Self> {
        match result {
            StageResult::Plain(s) => Some(s),
            _ => None,
        }
    }
}

impl StageOutput for SetOfSentences {
    const STAGE: Stage = Stage::MorphAnalysis;

    fn from_result(result: StageResult) -> Option<Self> {
        match result {
            StageResult::Morph(s) => Some(s),
            _ => None,
        }
    }
}

impl StageOutput for Sentence {
    const STAGE: Stage = Stage::PosTagging;

    fn from_result(result: StageResult) -> Option<Self> {
        match result {
            StageResult::Pos(s) => Some(s),
            _ => None,
        }
    }
}

type Item = Result<StageResult, AnalysisError>;

enum Worker {
    Plain(Box<dyn PlainTextProcessor>),
    Analyzer(Box<dyn MorphAnalyzer>),
    Morpheme(Box<dyn MorphemeProcessor>),
    Tagger(Box<dyn PosTagger>),
    Pos(Box<dyn PosProcessor>),
}

impl Worker {
    fn name(&self) -> &'static str {
        match self {
            Worker::Plain(_) => "plain-text",
            Worker::Analyzer(_) => "morph-analyzer",
            Worker::Morpheme(_) => "morpheme",
            Worker::Tagger(_) => "pos-tagger",
            Worker::Pos(_) => "pos",
        }
    }

    fn handle(&mut self, item: Item) -> Vec<Item> {
        match (self, item) {
            (_, Err(err)) => vec![Err(err)],
            (Worker::Plain(p), Ok(StageResult::Plain(ps))) => {
                let eod = ps.end_of_document;
                let (document_id, sentence_id) = (ps.document_id, ps.sentence_id);
                let mut out = p.process(ps);
                if eod {
                    out.extend(p.flush());
                    // the end of a document must reach the last stage
                    match out.last_mut() {
                        Some(last) => last.end_of_document = true,
                        None => out.push(PlainSentence::new(document_id, sentence_id, true, "")),
                    }
                }
                out.into_iter().map(|s| Ok(StageResult::Plain(s))).collect()
            }
            (Worker::Analyzer(a), Ok(StageResult::Plain(ps))) => {
                vec![a.morph_analyze(&ps).map(StageResult::Morph)]
            }
            (Worker::Morpheme(m), Ok(StageResult::Morph(sos))) => vec![Ok(StageResult::Morph(m.process(sos)))],
            (Worker::Tagger(t), Ok(StageResult::Morph(sos))) => vec![t.tag_pos(&sos).map(StageResult::Pos)],
            (Worker::Pos(p), Ok(StageResult::Pos(s))) => vec![Ok(StageResult::Pos(p.process(s)))],
            (worker, Ok(other)) => {
                log::error!("{} stage received an unexpected item; passed on", worker.name());
                vec![Ok(other)]
            }
        }
    }
}

struct Threads {
    input: Option<Sender<Item>>,
    output: Receiver<Item>,
    handles: Vec<JoinHandle<()>>,
}

enum State {
    Building,
    Single {
        workers: Vec<Worker>,
        results: VecDeque<Item>,
    },
    Threaded(Threads),
    Closed,
}

/// Chain of analysis stages.
///
/// ```no_run
/// use hannanum_ko::workflow::{Workflow, WorkflowFactory};
/// use hannanum_core::Sentence;
///
/// let mut workflow = WorkflowFactory::HmmPosTagger.build("/usr/share/hannanum")?;
/// workflow.activate_threaded()?;
/// workflow.analyze("나는 학교에 간다.")?;
/// for sentence in workflow.result_of_document::<Sentence>()? {
///     print!("{sentence}");
/// }
/// workflow.close();
/// # Ok::<(), hannanum_ko::WorkflowError>(())
/// ```
pub struct Workflow {
    plain: Vec<Box<dyn PlainTextProcessor>>,
    analyzer: Option<Box<dyn MorphAnalyzer>>,
    morpheme: Vec<Box<dyn MorphemeProcessor>>,
    tagger: Option<Box<dyn PosTagger>>,
    pos: Vec<Box<dyn PosProcessor>>,
    final_stage: Stage,
    next_document: usize,
    state: State,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

impl Workflow {
    pub fn new() -> Self {
        Self {
            plain: Vec::new(),
            analyzer: None,
            morpheme: Vec::new(),
            tagger: None,
            pos: Vec::new(),
            final_stage: Stage::PlainText,
            next_document: 0,
            state: State::Building,
        }
    }

    fn ensure_building(&self) -> Result<(), WorkflowError> {
        match self.state {
            State::Building => Ok(()),
            _ => Err(WorkflowError::AlreadyActivated),
        }
    }

    pub fn append_plain_text_processor(
        &mut self,
        processor: impl PlainTextProcessor + 'static,
    ) -> Result<&mut Self, WorkflowError> {
        self.ensure_building()?;
        self.plain.push(Box::new(processor));
        Ok(self)
    }

    pub fn set_morph_analyzer(&mut self, analyzer: impl MorphAnalyzer + 'static) -> Result<&mut Self, WorkflowError> {
        self.ensure_building()?;
        self.analyzer = Some(Box::new(analyzer));
        Ok(self)
    }

    pub fn append_morpheme_processor(
        &mut self,
        processor: impl MorphemeProcessor + 'static,
    ) -> Result<&mut Self, WorkflowError> {
        self.ensure_building()?;
        self.morpheme.push(Box::new(processor));
        Ok(self)
    }

    pub fn set_pos_tagger(&mut self, tagger: impl PosTagger + 'static) -> Result<&mut Self, WorkflowError> {
        self.ensure_building()?;
        self.tagger = Some(Box::new(tagger));
        Ok(self)
    }

    pub fn append_pos_processor(&mut self, processor: impl PosProcessor + 'static) -> Result<&mut Self, WorkflowError> {
        self.ensure_building()?;
        self.pos.push(Box::new(processor));
        Ok(self)
    }

    /// Stage whose results the workflow hands out.
    pub fn final_stage(&self) -> Stage {
        self.final_stage
    }

    fn take_workers(&mut self) -> Result<Vec<Worker>, WorkflowError> {
        self.ensure_building()?;
        let has_analyzer = self.analyzer.is_some();
        let has_tagger = self.tagger.is_some();
        if !has_analyzer && (!self.morpheme.is_empty() || has_tagger) {
            return Err(WorkflowError::MissingStage(Stage::MorphAnalysis));
        }
        if !has_tagger && !self.pos.is_empty() {
            return Err(WorkflowError::MissingStage(Stage::PosTagging));
        }

        let mut workers: Vec<Worker> = self.plain.drain(..).map(Worker::Plain).collect();
        workers.extend(self.analyzer.take().map(Worker::Analyzer));
        workers.extend(self.morpheme.drain(..).map(Worker::Morpheme));
        workers.extend(self.tagger.take().map(Worker::Tagger));
        workers.extend(self.pos.drain(..).map(Worker::Pos));
        self.final_stage = match (has_analyzer, has_tagger) {
            (_, true) => Stage::PosTagging,
            (true, false) => Stage::MorphAnalysis,
            (false, false) => Stage::PlainText,
        };
        Ok(workers)
    }

    /// Run every stage in the calling thread.
    pub fn activate_single(&mut self) -> Result<(), WorkflowError> {
        let workers = self.take_workers()?;
        log::debug!("workflow activated in single-thread mode with {} stages", workers.len());
        self.state = State::Single {
            workers,
            results: VecDeque::new(),
        };
        Ok(())
    }

    /// Run every stage in its own worker thread.
    pub fn activate_threaded(&mut self) -> Result<(), WorkflowError> {
        let workers = self.take_workers()?;
        log::debug!("workflow activated with {} worker threads", workers.len());
        let (input, mut rx) = crossbeam_channel::unbounded::<Item>();
        let mut handles = Vec::with_capacity(workers.len());
        for mut worker in workers {
            let (tx, next_rx) = crossbeam_channel::unbounded::<Item>();
            let stage_rx = std::mem::replace(&mut rx, next_rx);
            let handle = thread::Builder::new()
                .name(format!("hannanum-{}", worker.name()))
                .spawn(move || {
                    for item in stage_rx {
                        for out in worker.handle(item) {
                            if tx.send(out).is_err() {
                                return;
                            }
                        }
                    }
                    log::trace!("{} worker finished", worker.name());
                })?;
            handles.push(handle);
        }
        self.state = State::Threaded(Threads {
            input: Some(input),
            output: rx,
            handles,
        });
        Ok(())
    }

    /// Queue `document` for analysis, one plain sentence per line. The
    /// last line ends the document.
    pub fn analyze(&mut self, document: &str) -> Result<(), WorkflowError> {
        let document_id = self.next_document;
        let lines: Vec<&str> = document.split('\n').map(str::trim).collect();
        let last = lines.len() - 1;
        let sentences = lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| PlainSentence::new(document_id, i, i == last, line));

        match &mut self.state {
            State::Building | State::Closed => return Err(WorkflowError::NotActivated),
            State::Single { workers, results } => {
                for ps in sentences {
                    let mut items = vec![Ok(StageResult::Plain(ps))];
                    for worker in workers.iter_mut() {
                        items = items.into_iter().flat_map(|item| worker.handle(item)).collect();
                    }
                    results.extend(items);
                }
            }
            State::Threaded(threads) => {
                let input = threads.input.as_ref().ok_or(WorkflowError::NotActivated)?;
                for ps in sentences {
                    input
                        .send(Ok(StageResult::Plain(ps)))
                        .map_err(|_| WorkflowError::Disconnected("input"))?;
                }
            }
        }
        self.next_document += 1;
        Ok(())
    }

    /// Read a whole file and queue it like [`analyze`](Self::analyze).
    pub fn analyze_file(&mut self, path: impl AsRef<Path>) -> Result<(), WorkflowError> {
        let text = std::fs::read_to_string(path)?;
        self.analyze(text.trim_end_matches('\n'))
    }

    fn next_item(&mut self) -> Result<StageResult, WorkflowError> {
        let item = match &mut self.state {
            State::Building | State::Closed => return Err(WorkflowError::NotActivated),
            State::Single { results, .. } => results.pop_front().ok_or(WorkflowError::NoPendingResult)?,
            State::Threaded(threads) => threads
                .output
                .recv()
                .map_err(|_| WorkflowError::Disconnected("output"))?,
        };
        Ok(item?)
    }

    fn check_type<T: StageOutput>(&self) -> Result<(), WorkflowError> {
        if T::STAGE != self.final_stage {
            return Err(ResultTypeError {
                expected: T::STAGE,
                actual: self.final_stage,
            }
            .into());
        }
        Ok(())
    }

    /// Next analyzed sentence. In threaded mode this blocks until one is
    /// ready.
    pub fn result_of_sentence<T: StageOutput>(&mut self) -> Result<T, WorkflowError> {
        self.check_type::<T>()?;
        let result = self.next_item()?;
        T::from_result(result).ok_or(WorkflowError::ResultType(ResultTypeError {
            expected: T::STAGE,
            actual: self.final_stage,
        }))
    }

    /// Every remaining sentence of the current document.
    pub fn result_of_document<T: StageOutput>(&mut self) -> Result<Vec<T>, WorkflowError> {
        self.check_type::<T>()?;
        let mut out = Vec::new();
        loop {
            let result = self.next_item()?;
            let end = result.end_of_document();
            out.extend(T::from_result(result));
            if end {
                return Ok(out);
            }
        }
    }

    /// Stop the workers and wait for them. A closed workflow accepts no
    /// more documents.
    pub fn close(&mut self) {
        if let State::Threaded(threads) = &mut self.state {
            threads.input.take();
            for handle in threads.handles.drain(..) {
                if handle.join().is_err() {
                    log::error!("workflow worker panicked");
                }
            }
        }
        if !matches!(self.state, State::Building) {
            self.state = State::Closed;
        }
    }
}

impl Drop for Workflow {
    fn drop(&mut self) {
        self.close();
    }
}

/// Ready-made workflows over the data directory layout: the directory holds
/// `analyzer.json` and `tagger.json`, with resource paths relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowFactory {
    /// Sentence segmentation, chart analysis and HMM tagging.
    HmmPosTagger,
    /// Sentence segmentation and chart analysis.
    MorphAnalyzer,
    /// Tagging followed by noun extraction.
    NounExtractor,
    /// Tagging mapped onto the 9 top-level tags.
    PosSimple09,
    /// Tagging mapped onto the 22 second-level tags.
    PosSimple22,
}

impl WorkflowFactory {
    pub fn build(self, data_dir: impl AsRef<Path>) -> Result<Workflow, WorkflowError> {
        let data_dir = data_dir.as_ref();
        let mut workflow = Workflow::new();
        workflow
            .append_plain_text_processor(SentenceSegmentor::new())?
            .append_plain_text_processor(InformalSentenceFilter::new())?
            .set_morph_analyzer(ChartMorphAnalyzer::from_config(data_dir, ANALYZER_CONFIG)?)?
            .append_morpheme_processor(UnknownProcessor::new())?;
        if self == WorkflowFactory::MorphAnalyzer {
            return Ok(workflow);
        }
        workflow.set_pos_tagger(HmmTagger::from_config(data_dir, TAGGER_CONFIG)?)?;
        match self {
            WorkflowFactory::NounExtractor => {
                workflow.append_pos_processor(NounExtractor::new())?;
            }
            WorkflowFactory::PosSimple09 => {
                workflow.append_pos_processor(SimplePosResult09)?;
            }
            WorkflowFactory::PosSimple22 => {
                workflow.append_pos_processor(SimplePosResult22)?;
            }
            WorkflowFactory::HmmPosTagger | WorkflowFactory::MorphAnalyzer => {}
        }
        Ok(workflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hannanum_core::Eojeol;

    /// Analyzer that tags every space-separated word as a noun.
    struct WordAnalyzer;

    impl MorphAnalyzer for WordAnalyzer {
        fn morph_analyze(&mut self, ps: &PlainSentence) -> Result<SetOfSentences, AnalysisError> {
            let words: Vec<String> = ps.sentence.split_whitespace().map(str::to_string).collect();
            if words.iter().any(|w| w == "!!") {
                return Err(AnalysisError::NoCandidates { index: 0 });
            }
            let sets = words.iter().map(|w| vec![Eojeol::from_pairs([(w.as_str(), "ncn")])]).collect();
            Ok(SetOfSentences::new(ps.document_id, ps.sentence_id, ps.end_of_document, words, sets))
        }
    }

    fn morph_workflow() -> Workflow {
        let mut wf = Workflow::new();
        wf.append_plain_text_processor(SentenceSegmentor::new())
            .unwrap()
            .set_morph_analyzer(WordAnalyzer)
            .unwrap();
        wf
    }

    #[test]
    fn single_mode_runs_synchronously() {
        let mut wf = morph_workflow();
        wf.activate_single().unwrap();
        assert_eq!(wf.final_stage(), Stage::MorphAnalysis);
        wf.analyze("가방 안에. 책이 있다.\n끝").unwrap();
        let doc = wf.result_of_document::<SetOfSentences>().unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc[0].plain_eojeols, ["가방", "안에", "."]);
        assert!(doc[2].end_of_document);
        assert!(matches!(
            wf.result_of_sentence::<SetOfSentences>(),
            Err(WorkflowError::NoPendingResult)
        ));
    }

    #[test]
    fn threaded_mode_matches_single_mode() {
        let mut single = morph_workflow();
        single.activate_single().unwrap();
        single.analyze("가방 안에. 책이 있다.\n끝").unwrap();
        let expected = single.result_of_document::<SetOfSentences>().unwrap();

        let mut threaded = morph_workflow();
        threaded.activate_threaded().unwrap();
        threaded.analyze("가방 안에. 책이 있다.\n끝").unwrap();
        let got = threaded.result_of_document::<SetOfSentences>().unwrap();
        threaded.close();
        assert_eq!(got, expected);
    }

    #[test]
    fn wrong_result_type_is_reported() {
        let mut wf = morph_workflow();
        wf.activate_single().unwrap();
        wf.analyze("책.").unwrap();
        let err = wf.result_of_sentence::<Sentence>().unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::ResultType(ResultTypeError {
                expected: Stage::PosTagging,
                actual: Stage::MorphAnalysis,
            })
        ));
        assert!(wf.result_of_sentence::<SetOfSentences>().is_ok());
    }

    #[test]
    fn analysis_errors_come_back_in_order() {
        let mut wf = morph_workflow();
        wf.activate_single().unwrap();
        wf.analyze("!!\n책").unwrap();
        assert!(matches!(
            wf.result_of_sentence::<SetOfSentences>(),
            Err(WorkflowError::Analysis(AnalysisError::NoCandidates { .. }))
        ));
        let last = wf.result_of_sentence::<SetOfSentences>().unwrap();
        assert!(last.end_of_document);
    }

    #[test]
    fn plain_only_workflow() {
        let mut wf = Workflow::new();
        wf.append_plain_text_processor(SentenceSegmentor::new()).unwrap();
        wf.activate_single().unwrap();
        wf.analyze("간다. 왔다.").unwrap();
        let doc = wf.result_of_document::<PlainSentence>().unwrap();
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn empty_document_still_ends() {
        let mut wf = morph_workflow();
        wf.activate_threaded().unwrap();
        wf.analyze("").unwrap();
        let doc = wf.result_of_document::<SetOfSentences>().unwrap();
        assert_eq!(doc.len(), 1);
        assert!(doc[0].is_empty());
    }

    #[test]
    fn lifecycle_errors() {
        let mut wf = Workflow::new();
        assert!(matches!(wf.analyze("x"), Err(WorkflowError::NotActivated)));
        wf.append_pos_processor(NounExtractor::new()).unwrap();
        assert!(matches!(
            wf.activate_single(),
            Err(WorkflowError::MissingStage(Stage::PosTagging))
        ));
        wf.set_pos_tagger(HmmTagger::default()).unwrap();
        assert!(matches!(
            wf.activate_threaded(),
            Err(WorkflowError::MissingStage(Stage::MorphAnalysis))
        ));

        let mut wf = morph_workflow();
        wf.activate_single().unwrap();
        assert!(matches!(wf.set_morph_analyzer(WordAnalyzer), Err(WorkflowError::AlreadyActivated)));
        wf.close();
        assert!(matches!(wf.analyze("x"), Err(WorkflowError::NotActivated)));
    }
}
