// Morpheme dictionary trie over triple-form strings

use std::io::BufRead;
use std::path::Path;

use hannanum_core::jamo;
use hannanum_core::tagset::{PHONEME_ALL, Phoneme, TagId, TagSet};

use crate::DictError;
use crate::arena::{ArenaNode, BlockArena, ROOT};

/// Initial slot count of a dictionary trie.
pub const DEFAULT_CAPACITY: usize = 1 << 16;

/// One dictionary reading of a spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entry {
    pub tag: TagId,
    /// Irregular conjugation class, [`PHONEME_ALL`] for regular entries.
    pub phoneme: Phoneme,
}

#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    key: char,
    child: usize,
    child_count: usize,
    entries: Vec<Entry>,
}

impl TrieNode {
    pub fn key(&self) -> char {
        self.key
    }

    /// Readings of the spelling that ends at this node.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

impl ArenaNode for TrieNode {
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

/// Prefix trie from spelling to readings.
///
/// `search` remembers the path of the previous search, so a following search
/// that shares a prefix only walks the new suffix.
#[derive(Debug, Clone)]
pub struct Trie {
    arena: BlockArena<TrieNode>,
    search_key: Vec<char>,
    search_idx: Vec<usize>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: BlockArena::with_capacity(capacity),
            search_key: Vec::new(),
            search_idx: Vec::new(),
        }
    }

    /// Load a dictionary file.
    pub fn load(path: impl AsRef<Path>, tagset: &TagSet) -> Result<Self, DictError> {
        let path = path.as_ref();
        let mut trie = Self::new();
        let count = trie.read_dic(crate::open(path)?, tagset)?;
        log::debug!("{}: {count} dictionary entries", path.display());
        Ok(trie)
    }

    /// Read `word<TAB or SPACE>tag[.irr] tag[.irr] ...` lines and store every
    /// reading. Returns the number of readings stored.
    pub fn read_dic<R: BufRead>(&mut self, reader: R, tagset: &TagSet) -> Result<usize, DictError> {
        let mut stored = 0;
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let mut fields = line.split([' ', '\t']).filter(|f| !f.is_empty());
            let Some(word) = fields.next() else {
                continue;
            };
            let word = jamo::to_triple(word);

            for field in fields {
                let mut parts = field.split('.');
                let tag_name = parts.next().unwrap_or("");
                let Some(tag) = tagset.tag_id(tag_name) else {
                    log::warn!("dictionary line {}: unknown tag `{tag_name}`", lineno + 1);
                    continue;
                };
                let phoneme = match parts.next() {
                    Some(irr) => tagset.irregular_id(irr).unwrap_or_else(|| {
                        log::warn!("dictionary line {}: unknown irregular class `{irr}`", lineno + 1);
                        PHONEME_ALL
                    }),
                    None => PHONEME_ALL,
                };
                self.store(&word, Entry { tag, phoneme })?;
                stored += 1;
            }
        }
        Ok(stored)
    }

    /// Add a reading for `word`.
    pub fn store(&mut self, word: &[char], entry: Entry) -> Result<(), DictError> {
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
        self.arena.node_mut(parent).entries.push(entry);
        Ok(())
    }

    /// Length of the longest prefix of `word` that is a path from the root.
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

    /// Node reached by the first `len` characters of the last search.
    pub fn node_at(&self, len: usize) -> Option<&TrieNode> {
        if len == 0 {
            return None;
        }
        self.search_idx.get(len - 1).map(|&idx| self.arena.node(idx))
    }

    /// Node for exactly `word`, if it carries readings.
    pub fn fetch(&mut self, word: &[char]) -> Option<&TrieNode> {
        if word.is_empty() || self.search(word) != word.len() {
            return None;
        }
        self.node_at(word.len()).filter(|n| !n.entries.is_empty())
    }

    /// One step of a manual walk: the child of `idx` keyed `key`, or 0 when
    /// there is none. Start from [`ROOT`]; an index of 0 stays 0.
    pub fn node_look(&self, key: char, idx: usize) -> usize {
        if idx == 0 {
            return 0;
        }
        self.arena.find_child(idx, key).unwrap_or(0)
    }

    pub fn node(&self, idx: usize) -> &TrieNode {
        self.arena.node(idx)
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

#[cfg(test)]
mod tests {
    use super::*;
    use hannanum_core::tagset::TagSetOptions;

    const TAGS: &str = "TAG\tncn\nTAG\tnpp\nTAG\tpvg\nTAG\tjxc\nTAG\tetm\nTAG\tnnc\nTAG\tiwg\nTAG\tunk\n\
IRR\tirrb\nIRR\tirrs\n";

    fn tagset() -> TagSet {
        TagSet::from_reader(TAGS.as_bytes(), TagSetOptions::default()).unwrap()
    }

    fn t(s: &str) -> Vec<char> {
        jamo::to_triple(s)
    }

    #[test]
    fn store_then_fetch_returns_every_reading() {
        let mut trie = Trie::with_capacity(8);
        trie.store(&t("나"), Entry { tag: 0, phoneme: 0 }).unwrap();
        trie.store(&t("나"), Entry { tag: 1, phoneme: 0 }).unwrap();
        trie.store(&t("날"), Entry { tag: 2, phoneme: 0 }).unwrap();

        let tags: Vec<TagId> = trie.fetch(&t("나")).unwrap().entries().iter().map(|e| e.tag).collect();
        assert_eq!(tags, [0, 1]);
        assert_eq!(trie.fetch(&t("날")).unwrap().entries()[0].tag, 2);
        assert!(trie.fetch(&t("나는")).is_none());
        // a bare choseong is an interior node without readings
        assert!(trie.fetch(&t("나")[..1]).is_none());
    }

    #[test]
    fn search_reports_matched_prefix() {
        let mut trie = Trie::new();
        trie.store(&t("학교"), Entry { tag: 0, phoneme: 0 }).unwrap();
        assert_eq!(trie.search(&t("학교에")), t("학교").len());
        assert_eq!(trie.search(&t("학생")), t("학").len());
        assert_eq!(trie.search(&t("가")), 0);
        assert!(trie.node_at(0).is_none());
    }

    #[test]
    fn cached_search_agrees_with_fresh_search() {
        let mut trie = Trie::with_capacity(4);
        for w in ["가다", "가방", "가", "나비", "가방끈"] {
            trie.store(&t(w), Entry { tag: 0, phoneme: 0 }).unwrap();
        }
        for w in ["가방끈", "가방", "가다", "나", "가방끈이"] {
            let cached = trie.search(&t(w));
            let mut fresh = trie.clone();
            fresh.search_key.clear();
            fresh.search_idx.clear();
            assert_eq!(cached, fresh.search(&t(w)), "{w}");
        }
    }

    #[test]
    fn node_look_walks_from_root() {
        let mut trie = Trie::new();
        trie.store(&['a', 'b'], Entry { tag: 3, phoneme: 0 }).unwrap();
        let a = trie.node_look('a', ROOT);
        assert_ne!(a, 0);
        let b = trie.node_look('b', a);
        assert_eq!(trie.node(b).entries()[0].tag, 3);
        assert_eq!(trie.node_look('c', a), 0);
        assert_eq!(trie.node_look('a', 0), 0);
    }

    #[test]
    fn empty_key_is_rejected() {
        let mut trie = Trie::new();
        assert!(matches!(
            trie.store(&[], Entry { tag: 0, phoneme: 0 }),
            Err(DictError::EmptyKey)
        ));
    }

    #[test]
    fn arena_accounting_survives_inserts() {
        let mut trie = Trie::with_capacity(3);
        for w in ["하", "하다", "한", "할", "합", "가", "나", "다", "라"] {
            trie.store(&t(w), Entry { tag: 0, phoneme: 0 }).unwrap();
            assert_eq!(trie.free_size() + trie.used_size(), trie.capacity() - 2);
        }
    }

    #[test]
    fn read_dic_parses_irregular_classes() {
        let ts = tagset();
        let mut trie = Trie::new();
        let src = "나\tncn\tnpp\n돕 pvg.irrb\n\n없다 xyz\n";
        assert_eq!(trie.read_dic(src.as_bytes(), &ts).unwrap(), 3);
        let e = trie.fetch(&t("돕")).unwrap().entries()[0];
        assert_eq!(e.tag, ts.tag_id("pvg").unwrap());
        assert_eq!(e.phoneme, ts.irr_b);
        assert_eq!(trie.fetch(&t("나")).unwrap().entries().len(), 2);
        assert!(trie.fetch(&t("없다")).is_none());
    }
}
