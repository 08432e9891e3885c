// Numeric literal automaton

/// Start state of the automaton.
pub const START: usize = 1;

// Columns: accepting flag, then the input classes `+ - . , digit other`.
// State 0 is the dead state.
const TABLE: [[u8; 7]; 13] = [
    [0, 0, 0, 0, 0, 0, 0],
    [0, 9, 9, 0, 0, 2, 0],
    [1, 0, 0, 11, 5, 3, 0],
    [1, 0, 0, 11, 5, 4, 0],
    [1, 0, 0, 11, 5, 10, 0],
    [0, 0, 0, 0, 0, 6, 0],
    [0, 0, 0, 0, 0, 7, 0],
    [0, 0, 0, 0, 0, 8, 0],
    [1, 0, 0, 0, 5, 0, 0],
    [0, 0, 0, 0, 0, 10, 0],
    [1, 0, 0, 11, 0, 10, 0],
    [1, 0, 0, 0, 0, 12, 0],
    [1, 0, 0, 0, 0, 12, 0],
];

/// Recognizer for numeric literals: signed integers, comma-grouped
/// integers (`1,234,567`) and decimals.
///
/// The chart walks it one character at a time alongside the dictionary
/// tries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberDic;

impl NumberDic {
    pub fn new() -> Self {
        NumberDic
    }

    /// State reached from `state` on `c`; 0 is the dead state.
    pub fn node_look(&self, c: char, state: usize) -> usize {
        if state == 0 || state >= TABLE.len() {
            return 0;
        }
        let input = match c {
            '+' => 1,
            '-' => 2,
            '.' => 3,
            ',' => 4,
            c if c.is_ascii_digit() => 5,
            _ => 6,
        };
        TABLE[state][input] as usize
    }

    /// Whether `state` is accepting.
    pub fn is_num(&self, state: usize) -> bool {
        TABLE.get(state).is_some_and(|row| row[0] == 1)
    }

    /// Whether the whole of `s` is a numeric literal.
    pub fn accepts(&self, s: &str) -> bool {
        let state = s.chars().fold(START, |state, c| self.node_look(c, state));
        self.is_num(state)
    }
}
