// Node arena shared by the dictionary trie and the suffix index

/// Index of the free-list head. Never handed out.
pub const FREE_HEAD: usize = 0;
/// Index of the root node. Never handed out.
pub const ROOT: usize = 1;
/// First index available to [`BlockArena::alloc`].
pub const FIRST_BLOCK: usize = 2;

/// A node that lives in a [`BlockArena`] and owns one contiguous block of
/// children sorted by key.
pub trait ArenaNode: Default {
    fn key(&self) -> char;
    fn set_key(&mut self, key: char);
    /// Start of the child block (meaningless when `child_count() == 0`).
    fn child(&self) -> usize;
    fn child_count(&self) -> usize;
    fn set_children(&mut self, start: usize, count: usize);
}

#[derive(Debug, Clone, Copy, Default)]
struct FreeRun {
    size: usize,
    next: usize,
}

/// Growable arena of tree nodes.
///
/// Siblings are kept in one contiguous block, sorted by key, so a child
/// lookup is a binary search over a slice. Adding a child reallocates the
/// whole block and releases the old one. Free space is a singly linked list
/// of runs ordered by start index; a released run merges with both
/// neighbours. When no run is large enough the arena doubles and the new
/// space is released into the list, so it coalesces with a trailing run.
///
/// Invariant: `free_size() + used_size() == capacity() - 2`.
#[derive(Debug, Clone)]
pub struct BlockArena<N> {
    nodes: Vec<N>,
    runs: Vec<FreeRun>,
    used: usize,
    free: usize,
}

impl<N: ArenaNode> BlockArena<N> {
    /// Create an arena with room for `capacity` slots (at least 3).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(FIRST_BLOCK + 1);
        let mut arena = Self {
            nodes: (0..capacity).map(|_| N::default()).collect(),
            runs: vec![FreeRun::default(); capacity],
            used: 0,
            free: 0,
        };
        arena.reset();
        arena
    }

    /// Forget every node. The capacity is kept.
    pub fn reset(&mut self) {
        let capacity = self.nodes.len();
        self.runs.iter_mut().for_each(|r| *r = FreeRun::default());
        self.runs[FREE_HEAD].next = FIRST_BLOCK;
        self.runs[FIRST_BLOCK] = FreeRun {
            size: capacity - FIRST_BLOCK,
            next: FREE_HEAD,
        };
        self.nodes[ROOT] = N::default();
        self.used = 0;
        self.free = capacity - FIRST_BLOCK;
    }

    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    pub fn free_size(&self) -> usize {
        self.free
    }

    pub fn used_size(&self) -> usize {
        self.used
    }

    pub fn node(&self, idx: usize) -> &N {
        &self.nodes[idx]
    }

    pub fn node_mut(&mut self, idx: usize) -> &mut N {
        &mut self.nodes[idx]
    }

    /// Children of `parent` as a slice.
    pub fn children(&self, parent: usize) -> &[N] {
        let node = &self.nodes[parent];
        if node.child_count() == 0 {
            return &[];
        }
        &self.nodes[node.child()..node.child() + node.child_count()]
    }

    /// Free runs as `(start, size)` pairs in list order.
    pub fn free_runs(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        let mut idx = self.runs[FREE_HEAD].next;
        while idx != FREE_HEAD {
            out.push((idx, self.runs[idx].size));
            idx = self.runs[idx].next;
        }
        out
    }

    /// Allocate `size` contiguous slots, first fit. The slots are reset to
    /// `N::default()`.
    pub fn alloc(&mut self, size: usize) -> usize {
        let size = size.max(1);
        loop {
            let mut prev = FREE_HEAD;
            let mut idx = self.runs[FREE_HEAD].next;
            while idx != FREE_HEAD && self.runs[idx].size < size {
                prev = idx;
                idx = self.runs[idx].next;
            }
            if idx == FREE_HEAD {
                self.grow(size);
                continue;
            }

            let run = self.runs[idx];
            if run.size == size {
                self.runs[prev].next = run.next;
            } else {
                let rest = idx + size;
                self.runs[rest] = FreeRun {
                    size: run.size - size,
                    next: run.next,
                };
                self.runs[prev].next = rest;
            }
            self.runs[idx] = FreeRun::default();
            for node in &mut self.nodes[idx..idx + size] {
                *node = N::default();
            }
            self.free -= size;
            self.used += size;
            return idx;
        }
    }

    /// Return `size` slots starting at `start` to the free list.
    pub fn release(&mut self, start: usize, size: usize) {
        if size == 0 || start < FIRST_BLOCK {
            return;
        }
        self.used -= size;
        self.free += size;

        let mut prev = FREE_HEAD;
        let mut idx = self.runs[FREE_HEAD].next;
        while idx != FREE_HEAD && idx < start {
            prev = idx;
            idx = self.runs[idx].next;
        }

        let mut size = size;
        let mut next = idx;
        if idx != FREE_HEAD && start + size == idx {
            size += self.runs[idx].size;
            next = self.runs[idx].next;
            self.runs[idx] = FreeRun::default();
        }

        if prev != FREE_HEAD && prev + self.runs[prev].size == start {
            self.runs[prev].size += size;
            self.runs[prev].next = next;
        } else {
            self.runs[start] = FreeRun { size, next };
            self.runs[prev].next = start;
        }
    }

    fn grow(&mut self, at_least: usize) {
        let old = self.nodes.len();
        let extra = at_least.max(old);
        self.nodes.resize_with(old + extra, N::default);
        self.runs.resize(old + extra, FreeRun::default());
        log::trace!("arena grows from {old} to {} slots", old + extra);
        self.used += extra;
        self.release(old, extra);
    }

    /// Child of `parent` with the given key.
    pub fn find_child(&self, parent: usize, key: char) -> Option<usize> {
        let start = self.nodes[parent].child();
        self.children(parent)
            .binary_search_by(|n| n.key().cmp(&key))
            .ok()
            .map(|i| start + i)
    }

    /// Add a child with `key` under `parent` and return its index. The
    /// sibling block is moved to a fresh allocation one slot larger.
    pub fn insert_child(&mut self, parent: usize, key: char) -> usize {
        let start = self.nodes[parent].child();
        let count = self.nodes[parent].child_count();
        let block = self.alloc(count + 1);

        let pos = if count == 0 {
            0
        } else {
            self.nodes[start..start + count]
                .iter()
                .take_while(|n| n.key() < key)
                .count()
        };
        for i in 0..count {
            let dst = if i < pos { block + i } else { block + i + 1 };
            self.nodes[dst] = std::mem::take(&mut self.nodes[start + i]);
        }
        self.nodes[block + pos].set_key(key);
        self.nodes[parent].set_children(block, count + 1);
        if count > 0 {
            self.release(start, count);
        }
        block + pos
    }

    /// Detach the child at `child` from `parent`. The child's own subtree
    /// is not released.
    pub fn remove_child(&mut self, parent: usize, child: usize) {
        let start = self.nodes[parent].child();
        let count = self.nodes[parent].child_count();
        if count == 0 || child < start || child >= start + count {
            return;
        }
        if count == 1 {
            self.nodes[parent].set_children(0, 0);
            self.release(start, 1);
            return;
        }
        let block = self.alloc(count - 1);
        let mut dst = block;
        for src in start..start + count {
            if src == child {
                continue;
            }
            self.nodes[dst] = std::mem::take(&mut self.nodes[src]);
            dst += 1;
        }
        self.nodes[parent].set_children(block, count - 1);
        self.release(start, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Node {
        key: char,
        child: usize,
        count: usize,
    }

    impl ArenaNode for Node {
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
            self.count
        }
        fn set_children(&mut self, start: usize, count: usize) {
            self.child = start;
            self.count = count;
        }
    }

    fn balanced(arena: &BlockArena<Node>) -> bool {
        arena.free_size() + arena.used_size() == arena.capacity() - 2
    }

    #[test]
    fn alloc_splits_first_fitting_run() {
        let mut arena: BlockArena<Node> = BlockArena::with_capacity(10);
        assert_eq!(arena.alloc(3), 2);
        assert_eq!(arena.alloc(2), 5);
        assert_eq!(arena.free_runs(), vec![(7, 3)]);
        assert!(balanced(&arena));
    }

    #[test]
    fn release_coalesces_both_neighbours() {
        let mut arena: BlockArena<Node> = BlockArena::with_capacity(12);
        let a = arena.alloc(2);
        let b = arena.alloc(2);
        let c = arena.alloc(2);
        arena.release(a, 2);
        arena.release(c, 2);
        assert_eq!(arena.free_runs(), vec![(2, 2), (6, 6)]);
        arena.release(b, 2);
        assert_eq!(arena.free_runs(), vec![(2, 10)]);
        assert_eq!(arena.used_size(), 0);
        assert!(balanced(&arena));
    }

    #[test]
    fn grows_when_no_run_fits() {
        let mut arena: BlockArena<Node> = BlockArena::with_capacity(4);
        let a = arena.alloc(2);
        let b = arena.alloc(5);
        assert_eq!(a, 2);
        assert_eq!(b, 4);
        assert!(arena.capacity() >= 9);
        assert!(balanced(&arena));
    }

    #[test]
    fn children_stay_sorted_and_contiguous() {
        let mut arena: BlockArena<Node> = BlockArena::with_capacity(8);
        for key in ['m', 'c', 'x', 'a'] {
            arena.insert_child(ROOT, key);
            assert!(balanced(&arena));
        }
        let keys: Vec<char> = arena.children(ROOT).iter().map(|n| n.key).collect();
        assert_eq!(keys, ['a', 'c', 'm', 'x']);
        let x = arena.find_child(ROOT, 'x').unwrap();
        assert_eq!(arena.node(x).key, 'x');
        assert_eq!(arena.find_child(ROOT, 'b'), None);
        // only the live block is in use
        assert_eq!(arena.used_size(), 4);
    }

    #[test]
    fn grandchildren_survive_sibling_moves() {
        let mut arena: BlockArena<Node> = BlockArena::with_capacity(4);
        let b = arena.insert_child(ROOT, 'b');
        arena.insert_child(b, 'z');
        arena.insert_child(ROOT, 'a');
        let b = arena.find_child(ROOT, 'b').unwrap();
        assert!(arena.find_child(b, 'z').is_some());
    }

    #[test]
    fn remove_child_shrinks_block() {
        let mut arena: BlockArena<Node> = BlockArena::with_capacity(16);
        for key in ['a', 'b', 'c'] {
            arena.insert_child(ROOT, key);
        }
        let b = arena.find_child(ROOT, 'b').unwrap();
        arena.remove_child(ROOT, b);
        let keys: Vec<char> = arena.children(ROOT).iter().map(|n| n.key).collect();
        assert_eq!(keys, ['a', 'c']);
        let a = arena.find_child(ROOT, 'a').unwrap();
        arena.remove_child(ROOT, a);
        let c = arena.find_child(ROOT, 'c').unwrap();
        arena.remove_child(ROOT, c);
        assert!(arena.children(ROOT).is_empty());
        assert_eq!(arena.used_size(), 0);
        assert!(balanced(&arena));
    }

    #[test]
    fn reset_restores_single_run() {
        let mut arena: BlockArena<Node> = BlockArena::with_capacity(8);
        arena.insert_child(ROOT, 'q');
        arena.reset();
        assert_eq!(arena.free_runs(), vec![(2, 6)]);
        assert!(arena.children(ROOT).is_empty());
    }
}
