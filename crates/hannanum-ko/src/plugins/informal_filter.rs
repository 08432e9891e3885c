// Spacing fixes for informal text

use hannanum_core::PlainSentence;

use super::PlainTextProcessor;

/// Words up to this many characters are left alone.
const MAX_WORD: usize = 5;
/// Longest run of one character kept without a break.
const MAX_REPEAT: usize = 5;

/// Breaks up long words typical of chat text: runs of one repeated
/// character are split every five characters, and a dot followed by
/// another character is separated from it.
#[derive(Debug, Clone, Copy, Default)]
pub struct InformalSentenceFilter;

impl InformalSentenceFilter {
    pub fn new() -> Self {
        Self
    }

    fn filter_word(word: &str, out: &mut String) {
        let mut chars = word.chars();
        let Some(first) = chars.next() else {
            return;
        };
        out.push(first);
        let mut check = first;
        let mut repeat = 1;
        for c in chars {
            if c == check {
                if repeat == MAX_REPEAT {
                    out.push(' ');
                    repeat = 0;
                }
                repeat += 1;
            } else {
                if check == '.' {
                    out.push(' ');
                }
                check = c;
                repeat = 1;
            }
            out.push(c);
        }
    }
}

impl PlainTextProcessor for InformalSentenceFilter {
    fn process(&mut self, mut ps: PlainSentence) -> Vec<PlainSentence> {
        let mut out = String::with_capacity(ps.sentence.len());
        for word in ps.sentence.split([' ', '\t']).filter(|w| !w.is_empty()) {
            if !out.is_empty() {
                out.push(' ');
            }
            if word.chars().count() > MAX_WORD {
                Self::filter_word(word, &mut out);
            } else {
                out.push_str(word);
            }
        }
        ps.sentence = out;
        vec![ps]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(text: &str) -> String {
        let mut f = InformalSentenceFilter::new();
        let mut out = f.process(PlainSentence::new(0, 0, false, text));
        out.remove(0).sentence
    }

    #[test]
    fn splits_long_runs() {
        assert_eq!(filter("ㅋㅋㅋㅋㅋㅋㅋ"), "ㅋㅋㅋㅋㅋ ㅋㅋ");
        assert_eq!(filter("ㅋㅋㅋㅋㅋ"), "ㅋㅋㅋㅋㅋ");
        assert_eq!(filter("좋아ㅎㅎㅎㅎㅎㅎ"), "좋아ㅎㅎㅎㅎㅎ ㅎ");
    }

    #[test]
    fn separates_after_dots() {
        assert_eq!(filter("그래서...갔어"), "그래서... 갔어");
        assert_eq!(filter("a.b"), "a.b");
    }

    #[test]
    fn normalises_spacing() {
        assert_eq!(filter(" 나는\t\t간다 "), "나는 간다");
    }
}
