// Suffix index: reversed strings to chart position ids

use crate::DictError;
use crate::arena::{ArenaNode, BlockArena, ROOT};

const DEFAULT_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Default)]
struct SimtiNode {
    key: char,
    child: usize,
    child_count: usize,
    id: Option<usize>,
}

impl ArenaNode for SimtiNode {
    fn key(&self) -> char {
        self.key
    }
    fn set_key(&mut self, key: char) {
        self.key = key;
    }
    fn child(&self) -> usize {
        self.child
    }
    fn child_count(&self) -> usize {
        self.child_count
    }
    fn set_children(&mut self, start: usize, count: usize) {
        self.child = start;
        self.child_count = count;
    }
}

/// Trie over reversed suffixes of the current eojeol.
///
/// Each key is a suffix read back to front; its value is the id of the chart
/// position where that suffix starts. Two spellings that end the same way
/// therefore resolve to the same position chain. The index lives for one
/// eojeol and is [`reset`](Simti::reset) before the next.
#[derive(Debug, Clone)]
pub struct Simti {
    arena: BlockArena<SimtiNode>,
    search_key: Vec<char>,
    search_idx: Vec<usize>,
}

impl Default for Simti {
    fn default() -> Self {
        Self::new()
    }
}

impl Simti {
    pub fn new() -> Self {
        Self {
            arena: BlockArena::with_capacity(DEFAULT_CAPACITY),
            search_key: Vec::new(),
            search_idx: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.arena.reset();
        self.search_key.clear();
        self.search_idx.clear();
    }

    /// Map `word` to `id`. An existing id is kept.
    ///
    /// Returns `Ok(true)` when the id was set by this call.
    pub fn insert(&mut self, word: &[char], id: usize) -> Result<bool, DictError> {
        if word.is_empty() {
            return Err(DictError::EmptyKey);
        }
        let matched = self.search(word);
        let mut parent = self.search_idx.last().copied().unwrap_or(ROOT);
        for &c in &word[matched..] {
            parent = self.arena.insert_child(parent, c);
            self.search_key.push(c);
            self.search_idx.push(parent);
        }
        let node = self.arena.node_mut(parent);
        if node.id.is_some() {
            return Ok(false);
        }
        node.id = Some(id);
        Ok(true)
    }

    /// Length of the longest prefix of `word` present in the index.
    pub fn search(&mut self, word: &[char]) -> usize {
        let reuse = self
            .search_key
            .iter()
            .zip(word)
            .take_while(|(a, b)| a == b)
            .count();
        self.search_key.truncate(reuse);
        self.search_idx.truncate(reuse);

        let mut parent = self.search_idx.last().copied().unwrap_or(ROOT);
        for &c in &word[reuse..] {
            let Some(idx) = self.arena.find_child(parent, c) else {
                break;
            };
            self.search_key.push(c);
            self.search_idx.push(idx);
            parent = idx;
        }
        self.search_key.len()
    }

    /// Id stored for exactly `word`.
    pub fn fetch(&mut self, word: &[char]) -> Option<usize> {
        if word.is_empty() || self.search(word) != word.len() {
            return None;
        }
        self.arena.node(self.search_idx[word.len() - 1]).id
    }

    /// Ids met along the matched path of `word`, one per character.
    pub fn lookup(&mut self, word: &[char]) -> Vec<Option<usize>> {
        let matched = self.search(word);
        self.search_idx[..matched]
            .iter()
            .map(|&idx| self.arena.node(idx).id)
            .collect()
    }

    /// Overwrite the id of an existing key.
    pub fn replace(&mut self, word: &[char], id: usize) -> bool {
        if word.is_empty() || self.search(word) != word.len() {
            return false;
        }
        let idx = self.search_idx[word.len() - 1];
        let node = self.arena.node_mut(idx);
        if node.id.is_none() {
            return false;
        }
        node.id = Some(id);
        true
    }

    /// Remove a key and prune the nodes it alone was using.
    pub fn delete(&mut self, word: &[char]) -> bool {
        if word.is_empty() || self.search(word) != word.len() {
            return false;
        }
        let mut depth = word.len();
        if self.arena.node_mut(self.search_idx[depth - 1]).id.take().is_none() {
            return false;
        }
        while depth > 0 {
            let idx = self.search_idx[depth - 1];
            let node = self.arena.node(idx);
            if node.id.is_some() || node.child_count > 0 {
                break;
            }
            let parent = if depth >= 2 { self.search_idx[depth - 2] } else { ROOT };
            self.arena.remove_child(parent, idx);
            depth -= 1;
        }
        self.search_key.truncate(depth);
        self.search_idx.truncate(depth);
        true
    }

    /// Every stored key with its id, in key order.
    pub fn entries(&self) -> Vec<(Vec<char>, usize)> {
        let mut out = Vec::new();
        let mut key = Vec::new();
        self.collect(ROOT, &mut key, &mut out);
        out
    }

    fn collect(&self, parent: usize, key: &mut Vec<char>, out: &mut Vec<(Vec<char>, usize)>) {
        let start = self.arena.node(parent).child;
        for i in 0..self.arena.node(parent).child_count {
            let idx = start + i;
            let node = self.arena.node(idx);
            key.push(node.key);
            if let Some(id) = node.id {
                out.push((key.clone(), id));
            }
            self.collect(idx, key, out);
            key.pop();
        }
    }

    pub fn free_size(&self) -> usize {
        self.arena.free_size()
    }

    pub fn used_size(&self) -> usize {
        self.arena.used_size()
    }

    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }
}
