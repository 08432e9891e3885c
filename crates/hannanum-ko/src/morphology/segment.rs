// Chart positions of one eojeol

use hannanum_dict::Simti;

use crate::error::AnalysisError;

/// Id of the sentinel position. It starts the chart and also ends every
/// position chain.
pub const START_POSITION: usize = 0;

const START_KEY: char = '\0';

/// How far a position has been processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionState {
    Fresh,
    DictSearched,
    RuleExpanded,
    ConnectionChecked,
    Failed,
}

#[derive(Debug, Clone)]
pub struct Position {
    /// Triple character at this position.
    pub key: char,
    pub state: PositionState,
    pub next: usize,
    /// Trie cursors reached at this position during the last dictionary walk.
    pub sys_idx: usize,
    pub user_idx: usize,
    pub num_idx: usize,
    /// Chart ids of the morphemes that start here.
    pub morphemes: Vec<usize>,
}

impl Position {
    fn new(key: char) -> Self {
        Self {
            key,
            state: PositionState::Fresh,
            next: START_POSITION,
            sys_idx: 0,
            user_idx: 0,
            num_idx: 0,
            morphemes: Vec::new(),
        }
    }
}

/// Positions of the current eojeol, linked into chains that end at
/// [`START_POSITION`].
///
/// The eojeol itself is the chain starting at position 1. Rules add
/// alternative chains that join an existing chain where the spellings
/// agree on the rest of the word.
#[derive(Debug, Clone)]
pub struct SegmentPositions {
    positions: Vec<Position>,
    max_positions: usize,
    max_morphemes: usize,
}

impl SegmentPositions {
    pub fn new(max_positions: usize, max_morphemes: usize) -> Self {
        Self {
            positions: Vec::new(),
            max_positions,
            max_morphemes,
        }
    }

    /// Lay out `triple` as positions 1..=n and index every suffix in `simti`.
    pub fn init(&mut self, triple: &[char], simti: &mut Simti) -> Result<(), AnalysisError> {
        self.positions.clear();
        let mut prev = self.add_position(START_KEY)?;
        self.positions[prev].state = PositionState::ConnectionChecked;

        let rev: Vec<char> = triple.iter().rev().copied().collect();
        for (i, &c) in triple.iter().enumerate() {
            let next = self.add_position(c)?;
            self.link(prev, next);
            prev = next;
            simti.insert(&rev[..triple.len() - i], next)?;
        }
        self.link(prev, START_POSITION);
        Ok(())
    }

    pub fn add_position(&mut self, key: char) -> Result<usize, AnalysisError> {
        if self.positions.len() >= self.max_positions {
            return Err(AnalysisError::overflow("chart positions", self.max_positions));
        }
        self.positions.push(Position::new(key));
        Ok(self.positions.len() - 1)
    }

    pub fn link(&mut self, prev: usize, next: usize) {
        self.positions[prev].next = next;
    }

    pub fn next(&self, idx: usize) -> usize {
        self.positions[idx].next
    }

    pub fn get(&self, idx: usize) -> &Position {
        &self.positions[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut Position {
        &mut self.positions[idx]
    }

    /// Anchor chart node `morpheme` at position `idx`.
    pub fn push_morpheme(&mut self, idx: usize, morpheme: usize) -> Result<(), AnalysisError> {
        let pos = &mut self.positions[idx];
        if pos.morphemes.len() >= self.max_morphemes {
            return Err(AnalysisError::overflow("morphemes at one position", self.max_morphemes));
        }
        pos.morphemes.push(morpheme);
        Ok(())
    }

    /// Keys from `from` to the end of its chain.
    pub fn span(&self, from: usize) -> Vec<char> {
        let mut out = Vec::new();
        let mut idx = from;
        while idx != START_POSITION && out.len() < self.positions.len() {
            out.push(self.positions[idx].key);
            idx = self.positions[idx].next;
        }
        out
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn init_builds_one_chain() {
        let mut simti = Simti::new();
        let mut sp = SegmentPositions::new(64, 8);
        sp.init(&chars("abc"), &mut simti).unwrap();
        assert_eq!(sp.len(), 4);
        assert_eq!(sp.get(0).state, PositionState::ConnectionChecked);
        assert_eq!(sp.next(1), 2);
        assert_eq!(sp.next(3), START_POSITION);
        assert_eq!(sp.span(1), chars("abc"));
        assert_eq!(sp.span(2), chars("bc"));
    }

    #[test]
    fn suffixes_are_indexed_reversed() {
        let mut simti = Simti::new();
        let mut sp = SegmentPositions::new(64, 8);
        sp.init(&chars("abc"), &mut simti).unwrap();
        assert_eq!(simti.fetch(&chars("cba")), Some(1));
        assert_eq!(simti.fetch(&chars("cb")), Some(2));
        assert_eq!(simti.fetch(&chars("c")), Some(3));
    }

    #[test]
    fn limits_overflow() {
        let mut simti = Simti::new();
        let mut sp = SegmentPositions::new(3, 1);
        let err = sp.init(&chars("abc"), &mut simti).unwrap_err();
        assert!(matches!(err, AnalysisError::Overflow { limit: 3, .. }));

        let mut sp = SegmentPositions::new(8, 1);
        sp.init(&chars("a"), &mut simti).unwrap();
        sp.push_morpheme(1, 0).unwrap();
        assert!(sp.push_morpheme(1, 1).is_err());
    }

    #[test]
    fn alternative_chain_joins_a_tail() {
        let mut simti = Simti::new();
        let mut sp = SegmentPositions::new(64, 8);
        sp.init(&chars("xbc"), &mut simti).unwrap();
        let alt = sp.add_position('y').unwrap();
        sp.link(alt, 2);
        assert_eq!(sp.span(alt), chars("ybc"));
    }
}
