// Morpheme chart of one eojeol

use std::sync::Arc;

use hannanum_core::Eojeol;
use hannanum_core::jamo;
use hannanum_core::tagset::{PHONEME_ALL, Phoneme, TagId, TagSet, TagType};
use hannanum_dict::arena::ROOT;
use hannanum_dict::{Connection, Entry, NumberDic, Simti, Trie, number};

use super::rules::{PhonemeSink, RuleEngine};
use super::segment::{PositionState, SegmentPositions, START_POSITION};
use crate::config::AnalyzerOptions;
use crate::error::AnalysisError;

/// Placeholder standing for a run of Latin letters.
pub const ENG_PLACEHOLDER: &str = "HAN_ENG";
/// Placeholder standing for a run of Chinese characters.
pub const CHI_PLACEHOLDER: &str = "HAN_CHI";

/// Chart id of the eojeol boundary node.
const BOUNDARY: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphemeState {
    Incomplete,
    Success,
    Fail,
}

/// One node of the chart: a morpheme candidate spanning from the position
/// it is anchored at to `next_position`.
#[derive(Debug, Clone)]
pub struct Morpheme {
    pub tag: TagId,
    pub phoneme: Phoneme,
    pub next_position: usize,
    /// Category the following morpheme must belong to.
    pub next_tag_type: TagType,
    pub state: MorphemeState,
    /// Spelling in triple form.
    pub text: Vec<char>,
    /// Chart ids of the morphemes that may follow. Id 0 is the end of the
    /// eojeol.
    pub connections: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Latin,
    Han,
}

fn script_of(c: char) -> Option<Script> {
    match c as u32 {
        _ if c.is_ascii_alphabetic() => Some(Script::Latin),
        0x2E80..=0x2EFF | 0x3400..=0x4DBF | 0x4E00..=0x9FBF | 0xF900..=0xFAFF => Some(Script::Han),
        _ => None,
    }
}

struct Frame {
    node: usize,
    next: usize,
    eng: usize,
    chi: usize,
}

/// Scan of the morphemes at `from` on behalf of node `node`.
struct Expansion {
    node: usize,
    tag_type: TagType,
    from: usize,
    /// Position state once searched and expanded.
    state: PositionState,
    next: usize,
    reached: usize,
}

/// Lattice of every morpheme sequence that spells an eojeol.
///
/// The chart is filled lazily: a position is looked up in the dictionaries
/// and expanded by the rules the first time a morpheme ends there, and a
/// morpheme is connected only to successors that themselves reach the end
/// of the eojeol. Surviving paths are enumerated in chart order.
pub struct MorphemeChart {
    tagset: Arc<TagSet>,
    connection: Arc<Connection>,
    system_dic: Trie,
    user_dic: Option<Trie>,
    number: NumberDic,
    rules: RuleEngine,
    options: AnalyzerOptions,
    simti: Simti,
    positions: SegmentPositions,
    chart: Vec<Morpheme>,
    eng_replacements: Vec<String>,
    chi_replacements: Vec<String>,
}

impl MorphemeChart {
    pub fn new(
        tagset: Arc<TagSet>,
        connection: Arc<Connection>,
        system_dic: Trie,
        user_dic: Option<Trie>,
        options: AnalyzerOptions,
    ) -> Self {
        Self {
            rules: RuleEngine::new(&tagset),
            tagset,
            connection,
            system_dic,
            user_dic,
            number: NumberDic::new(),
            options,
            simti: Simti::new(),
            positions: SegmentPositions::new(options.max_positions, options.max_morphemes_per_position),
            chart: Vec::with_capacity(options.max_chart),
            eng_replacements: Vec::new(),
            chi_replacements: Vec::new(),
        }
    }

    pub fn set_user_dic(&mut self, user_dic: Option<Trie>) {
        self.user_dic = user_dic;
    }

    pub fn tagset(&self) -> &TagSet {
        &self.tagset
    }

    /// Nodes of the last analyzed eojeol.
    pub fn nodes(&self) -> &[Morpheme] {
        &self.chart
    }

    /// All analyses of `word`. A word nothing matches comes back as a
    /// single unknown morpheme.
    pub fn analyze_eojeol(&mut self, word: &str) -> Result<Vec<Eojeol>, AnalysisError> {
        if word.is_empty() {
            return Ok(Vec::new());
        }
        self.init(word)?;
        if self.analyze(BOUNDARY, TagType::All)? == 0 && self.analyze_unknown()? == 0 {
            let unk = self.tagset.tag_name(self.tagset.unk_tag).to_string();
            return Ok(vec![Eojeol::new(vec![word.to_string()], vec![unk])]);
        }
        Ok(self.enumerate())
    }

    fn init(&mut self, word: &str) -> Result<(), AnalysisError> {
        self.simti.reset();
        let replaced = self.pre_replace(word);
        let triple = jamo::to_triple(&replaced);
        self.positions.init(&triple, &mut self.simti)?;
        self.chart.clear();
        let iwg = self.tagset.iwg_tag;
        let id = self.add_candidate(START_POSITION, iwg, PHONEME_ALL, 1, TagType::All, Vec::new())?;
        self.chart[id].state = MorphemeState::Success;
        Ok(())
    }

    /// Replace each run of Latin letters and each run of Chinese characters
    /// by a placeholder, remembering the runs in order.
    fn pre_replace(&mut self, word: &str) -> String {
        self.eng_replacements.clear();
        self.chi_replacements.clear();

        let mut out = String::with_capacity(word.len());
        let mut run: Option<(Script, String)> = None;
        for c in word.chars() {
            let script = script_of(c);
            if let Some((current, text)) = run.as_mut() {
                if Some(*current) == script {
                    text.push(c);
                    continue;
                }
            }
            if let Some((current, text)) = run.take() {
                self.flush_run(current, text, &mut out);
            }
            match script {
                Some(s) => run = Some((s, c.to_string())),
                None => out.push(c),
            }
        }
        if let Some((current, text)) = run {
            self.flush_run(current, text, &mut out);
        }
        out
    }

    fn flush_run(&mut self, script: Script, text: String, out: &mut String) {
        match script {
            Script::Latin => {
                out.push_str(ENG_PLACEHOLDER);
                self.eng_replacements.push(text);
            }
            Script::Han => {
                out.push_str(CHI_PLACEHOLDER);
                self.chi_replacements.push(text);
            }
        }
    }

    fn add_morpheme(
        &mut self,
        tag: TagId,
        phoneme: Phoneme,
        next_position: usize,
        next_tag_type: TagType,
        text: Vec<char>,
    ) -> Result<usize, AnalysisError> {
        if self.chart.len() >= self.options.max_chart {
            return Err(AnalysisError::overflow("chart morphemes", self.options.max_chart));
        }
        self.chart.push(Morpheme {
            tag,
            phoneme,
            next_position,
            next_tag_type,
            state: MorphemeState::Incomplete,
            text,
            connections: Vec::new(),
        });
        Ok(self.chart.len() - 1)
    }

    fn add_candidate(
        &mut self,
        from: usize,
        tag: TagId,
        phoneme: Phoneme,
        next_position: usize,
        next_tag_type: TagType,
        text: Vec<char>,
    ) -> Result<usize, AnalysisError> {
        let id = self.add_morpheme(tag, phoneme, next_position, next_tag_type, text)?;
        self.positions.push_morpheme(from, id)?;
        Ok(id)
    }

    /// Fill the chart after node `ci` with successors of `tag_type` and
    /// return how many successors `ci` connects to.
    ///
    /// Pending expansions live on an explicit stack of at most
    /// `max_positions` scans.
    fn analyze(&mut self, ci: usize, tag_type: TagType) -> Result<usize, AnalysisError> {
        let mut stack = vec![self.expansion(ci, tag_type)?];
        loop {
            let Some(top) = stack.last_mut() else {
                return Ok(0);
            };
            if let Some(mp) = self.next_pending(top) {
                if stack.len() > self.options.max_positions {
                    return Err(AnalysisError::overflow("nested chart expansions", self.options.max_positions));
                }
                let next_type = self.chart[mp].next_tag_type;
                stack.push(self.expansion(mp, next_type)?);
                continue;
            }

            let Some(done) = stack.pop() else {
                return Ok(0);
            };
            let found = self.finish(&done)?;
            match stack.last_mut() {
                None => return Ok(found),
                Some(parent) => {
                    parent.reached += found;
                    self.chart[done.node].state = if found != 0 {
                        MorphemeState::Success
                    } else {
                        MorphemeState::Fail
                    };
                }
            }
        }
    }

    /// Make sure the position after `ci` is searched and expanded, and open
    /// a scan over its morphemes.
    fn expansion(&mut self, ci: usize, tag_type: TagType) -> Result<Expansion, AnalysisError> {
        let from = self.chart[ci].next_position;

        let mut span = None;
        if self.positions.get(from).state == PositionState::Fresh {
            span = Some(self.search_dictionaries(from)?);
        }
        if self.positions.get(from).state == PositionState::DictSearched {
            let span = span.unwrap_or_else(|| self.positions.span(from));
            let prev = self.chart[ci].text.clone();
            let rules = self.rules;
            rules.expand(self, from, &prev, &span)?;
            self.positions.get_mut(from).state = PositionState::RuleExpanded;
        }

        Ok(Expansion {
            node: ci,
            tag_type,
            from,
            state: self.positions.get(from).state,
            next: 0,
            reached: 0,
        })
    }

    /// Advance the scan to the next morpheme of the right type that still
    /// has to be expanded. Finished morphemes only add their connections.
    fn next_pending(&self, scan: &mut Expansion) -> Option<usize> {
        if scan.state != PositionState::RuleExpanded {
            return None;
        }
        let morphemes = &self.positions.get(scan.from).morphemes;
        while let Some(&mp) = morphemes.get(scan.next) {
            scan.next += 1;
            let morph = &self.chart[mp];
            if !self.tagset.check_tag_type(scan.tag_type, morph.tag) {
                continue;
            }
            if morph.state == MorphemeState::Incomplete {
                return Some(mp);
            }
            scan.reached += morph.connections.len();
        }
        None
    }

    fn finish(&mut self, scan: &Expansion) -> Result<usize, AnalysisError> {
        match scan.state {
            PositionState::Failed => return Ok(0),
            PositionState::RuleExpanded => {
                if scan.reached == 0 {
                    if scan.tag_type == TagType::All {
                        self.positions.get_mut(scan.from).state = PositionState::Failed;
                    }
                    return Ok(0);
                }
                if scan.tag_type == TagType::All {
                    self.positions.get_mut(scan.from).state = PositionState::ConnectionChecked;
                }
            }
            _ => {}
        }
        self.connect(scan.node, scan.from)
    }

    /// Walk the dictionaries from `from` along its chain and add every
    /// prefix they know, longest first.
    fn search_dictionaries(&mut self, from: usize) -> Result<Vec<char>, AnalysisError> {
        let mut span = Vec::new();
        let mut path = Vec::new();
        let mut sidx = ROOT;
        let mut uidx = if self.user_dic.is_some() { ROOT } else { 0 };
        let mut nidx = number::START;

        let mut to = from;
        while to != START_POSITION && path.len() < self.positions.len() {
            let c = self.positions.get(to).key;
            if sidx != 0 {
                sidx = self.system_dic.node_look(c, sidx);
            }
            if uidx != 0 {
                uidx = self.user_dic.as_ref().map_or(0, |dic| dic.node_look(c, uidx));
            }
            if nidx != 0 {
                nidx = self.number.node_look(c, nidx);
            }
            let pos = self.positions.get_mut(to);
            pos.sys_idx = sidx;
            pos.user_idx = uidx;
            pos.num_idx = nidx;
            span.push(c);
            path.push(to);
            to = self.positions.next(to);
        }

        let mut number_found = false;
        for len in (1..=path.len()).rev() {
            let to = path[len - 1];
            let next = self.positions.next(to);
            let (sidx, uidx, nidx) = {
                let pos = self.positions.get(to);
                (pos.sys_idx, pos.user_idx, pos.num_idx)
            };

            if sidx != 0 {
                let entries = self.system_dic.node(sidx).entries().to_vec();
                self.add_entries(from, &entries, next, &span[..len])?;
            }
            if uidx != 0 {
                let entries = match &self.user_dic {
                    Some(dic) => dic.node(uidx).entries().to_vec(),
                    None => Vec::new(),
                };
                self.add_entries(from, &entries, next, &span[..len])?;
            }
            if !number_found && nidx != 0 && self.number.is_num(nidx) {
                let num_tag = self.tagset.num_tag;
                self.add_candidate(from, num_tag, PHONEME_ALL, next, TagType::All, span[..len].to_vec())?;
                number_found = true;
            }
        }

        self.positions.get_mut(from).state = PositionState::DictSearched;
        Ok(span)
    }

    fn add_entries(&mut self, from: usize, entries: &[Entry], next: usize, text: &[char]) -> Result<(), AnalysisError> {
        for entry in entries {
            self.add_candidate(from, entry.tag, entry.phoneme, next, TagType::All, text.to_vec())?;
        }
        Ok(())
    }

    /// Link node `ci` to every finished morpheme at `from` it may precede.
    fn connect(&mut self, ci: usize, from: usize) -> Result<usize, AnalysisError> {
        let (tag, len, next_tag_type) = {
            let morph = &self.chart[ci];
            (morph.tag, morph.text.len(), morph.next_tag_type)
        };
        let mut connections = Vec::new();
        for &mp in &self.positions.get(from).morphemes {
            let candidate = &self.chart[mp];
            if candidate.state == MorphemeState::Success
                && self.connection.check_connection(
                    &self.tagset,
                    tag,
                    candidate.tag,
                    len,
                    candidate.text.len(),
                    next_tag_type,
                )
            {
                if connections.len() >= self.options.max_connections {
                    return Err(AnalysisError::overflow("connections per morpheme", self.options.max_connections));
                }
                connections.push(mp);
            }
        }
        let count = connections.len();
        self.chart[ci].connections = connections;
        Ok(count)
    }

    /// Cover the eojeol with one unknown morpheme per prefix and retry.
    fn analyze_unknown(&mut self) -> Result<usize, AnalysisError> {
        let unk = self.tagset.unk_tag;
        let mut text = Vec::new();
        let mut i = 1;
        while i != START_POSITION && text.len() < self.positions.len() {
            text.push(self.positions.get(i).key);
            let next = self.positions.next(i);
            self.add_candidate(1, unk, PHONEME_ALL, next, TagType::All, text.clone())?;
            self.positions.get_mut(1).state = PositionState::RuleExpanded;
            i = next;
        }
        self.chart[BOUNDARY].connections.clear();
        self.analyze(BOUNDARY, TagType::All)
    }

    /// Position chain spelling `s`, sharing the longest suffix already in
    /// the chart.
    fn alt_segment(&mut self, s: &[char]) -> Result<usize, AnalysisError> {
        if s.is_empty() {
            return Ok(START_POSITION);
        }
        let rev: Vec<char> = s.iter().rev().copied().collect();
        let matched = self.simti.search(&rev);
        let to = if matched == 0 {
            START_POSITION
        } else {
            self.simti.fetch(&rev[..matched]).unwrap_or(START_POSITION)
        };

        let mut prev = START_POSITION;
        let mut len = rev.len();
        for &c in s {
            if len <= matched {
                break;
            }
            let next = self.positions.add_position(c)?;
            if prev != START_POSITION {
                self.positions.link(prev, next);
            }
            self.simti.insert(&rev[..len], next)?;
            prev = next;
            len -= 1;
        }
        if prev != START_POSITION {
            self.positions.link(prev, to);
        }
        Ok(self.simti.fetch(&rev).unwrap_or(START_POSITION))
    }

    fn enumerate(&self) -> Vec<Eojeol> {
        let limit = self.options.max_candidates;
        let mut results = Vec::new();
        let mut morphemes: Vec<String> = Vec::new();
        let mut tags: Vec<String> = Vec::new();
        let mut eng_idx = 0;
        let mut chi_idx = 0;
        let mut stack: Vec<Frame> = Vec::new();

        for &first in &self.chart[BOUNDARY].connections {
            self.enter(first, &mut stack, &mut morphemes, &mut tags, &mut eng_idx, &mut chi_idx);
            while let Some(frame) = stack.last_mut() {
                let connections = &self.chart[frame.node].connections;
                if frame.next < connections.len() && results.len() < limit {
                    let child = connections[frame.next];
                    frame.next += 1;
                    if child == BOUNDARY {
                        results.push(Eojeol::new(morphemes.clone(), tags.clone()));
                    } else if stack.len() <= self.positions.len() {
                        self.enter(child, &mut stack, &mut morphemes, &mut tags, &mut eng_idx, &mut chi_idx);
                    }
                } else {
                    eng_idx -= frame.eng;
                    chi_idx -= frame.chi;
                    stack.pop();
                    morphemes.pop();
                    tags.pop();
                }
            }
        }
        if results.len() >= limit {
            log::debug!("analysis list truncated at {limit} candidates");
        }
        results
    }

    fn enter(
        &self,
        node: usize,
        stack: &mut Vec<Frame>,
        morphemes: &mut Vec<String>,
        tags: &mut Vec<String>,
        eng_idx: &mut usize,
        chi_idx: &mut usize,
    ) {
        let morph = &self.chart[node];
        let (text, eng, chi) = self.render(&morph.text, *eng_idx, *chi_idx);
        *eng_idx += eng;
        *chi_idx += chi;
        morphemes.push(text);
        tags.push(self.tagset.tag_name(morph.tag).to_string());
        stack.push(Frame { node, next: 0, eng, chi });
    }

    /// Compose `text` and put the original runs back in place of the
    /// placeholders. Returns how many runs of each kind were consumed.
    fn render(&self, text: &[char], eng_idx: usize, chi_idx: usize) -> (String, usize, usize) {
        let mut s = jamo::to_string(text);
        let (mut eng, mut chi) = (0, 0);
        loop {
            if s.contains(ENG_PLACEHOLDER) {
                let Some(run) = self.eng_replacements.get(eng_idx + eng) else {
                    break;
                };
                s = s.replacen(ENG_PLACEHOLDER, run, 1);
                eng += 1;
            } else if s.contains(CHI_PLACEHOLDER) {
                let Some(run) = self.chi_replacements.get(chi_idx + chi) else {
                    break;
                };
                s = s.replacen(CHI_PLACEHOLDER, run, 1);
                chi += 1;
            } else {
                break;
            }
        }
        (s, eng, chi)
    }
}

impl PhonemeSink for MorphemeChart {
    fn phoneme_change(
        &mut self,
        from: usize,
        front: &[char],
        back: &[char],
        front_type: TagType,
        back_type: TagType,
        phoneme: Phoneme,
    ) -> Result<(), AnalysisError> {
        let entries = match self.system_dic.fetch(front) {
            Some(node) => node.entries().to_vec(),
            None => return Ok(()),
        };
        for entry in entries {
            if !self.tagset.check_tag_type(front_type, entry.tag)
                || !self.tagset.check_phoneme_type(phoneme, entry.phoneme)
            {
                continue;
            }
            let next = self.alt_segment(back)?;
            let duplicate = self.positions.get(from).morphemes.iter().any(|&mp| {
                let m = &self.chart[mp];
                m.tag == entry.tag
                    && m.phoneme == entry.phoneme
                    && m.next_position == next
                    && m.next_tag_type == back_type
                    && m.text == front
            });
            if duplicate {
                log::trace!("skipping duplicate candidate {}", jamo::to_string(front));
                continue;
            }
            self.add_candidate(from, entry.tag, entry.phoneme, next, back_type, front.to_vec())?;
        }
        Ok(())
    }
}
