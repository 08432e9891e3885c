// Splits plain text into sentences at sentence-final marks

use hannanum_core::PlainSentence;

use super::PlainTextProcessor;

/// Symbols that stay attached to a sentence-final mark.
const CLOSING: [char; 8] = [')', ']', '}', '?', '!', '.', '\'', '"'];

/// Splits lines of text into sentences ending in `.`, `!` or `?`.
///
/// The mark is separated from the preceding word by a space. A `.` right
/// after a letter, in the second character of a word, or before a digit
/// does not end a sentence. Text with no sentence end yet is held until the
/// next line or until [`flush`](PlainTextProcessor::flush). Sentences are
/// numbered from 0 within each document.
#[derive(Debug, Clone, Default)]
pub struct SentenceSegmentor {
    document_id: usize,
    sentence_id: usize,
    pending: Vec<String>,
    end_of_document: bool,
}

impl SentenceSegmentor {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit(&mut self, end_of_document: bool) -> PlainSentence {
        let text = std::mem::take(&mut self.pending).join(" ");
        let sentence = PlainSentence::new(self.document_id, self.sentence_id, end_of_document, text);
        self.sentence_id += 1;
        sentence
    }
}

/// Byte offsets of the end mark in `word` and of the text after the mark
/// and its closing symbols.
fn find_end(word: &str) -> Option<(usize, usize)> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    for (j, &(at, c)) in chars.iter().enumerate() {
        let is_end = match c {
            '!' | '?' => true,
            '.' => {
                let after_letter = j > 0 && is_cased(chars[j - 1].1);
                let before_digit = chars.get(j + 1).is_some_and(|&(_, n)| n.is_ascii_digit());
                j != 1 && !after_letter && !before_digit
            }
            _ => false,
        };
        if is_end {
            let rest = chars[j + 1..]
                .iter()
                .find(|(_, n)| !CLOSING.contains(n))
                .map_or(word.len(), |&(i, _)| i);
            return Some((at, rest));
        }
    }
    None
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase()
}

impl PlainTextProcessor for SentenceSegmentor {
    fn process(&mut self, ps: PlainSentence) -> Vec<PlainSentence> {
        if ps.document_id != self.document_id {
            self.document_id = ps.document_id;
            self.sentence_id = 0;
        }
        self.end_of_document = ps.end_of_document;

        let words: Vec<&str> = ps.sentence.split_whitespace().collect();
        let mut out = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let mut word: &str = word;
            while let Some((mark, rest)) = find_end(word) {
                if mark > 0 {
                    self.pending.push(word[..mark].to_string());
                }
                self.pending.push(word[mark..rest].to_string());
                word = &word[rest..];
                let remaining = !word.is_empty() || i + 1 < words.len();
                out.push(self.emit(ps.end_of_document && !remaining));
            }
            if !word.is_empty() {
                self.pending.push(word.to_string());
            }
        }
        out
    }

    fn flush(&mut self) -> Vec<PlainSentence> {
        if self.pending.is_empty() {
            return Vec::new();
        }
        vec![self.emit(self.end_of_document)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(out: &[PlainSentence]) -> Vec<&str> {
        out.iter().map(|s| s.sentence.as_str()).collect()
    }

    #[test]
    fn splits_at_marks() {
        let mut seg = SentenceSegmentor::new();
        let out = seg.process(PlainSentence::new(0, 0, true, "나는 간다. 너는 왔니? 좋다!"));
        assert_eq!(texts(&out), ["나는 간다 .", "너는 왔니 ?", "좋다 !"]);
        assert_eq!(out.iter().map(|s| s.sentence_id).collect::<Vec<_>>(), [0, 1, 2]);
        assert_eq!(out.iter().map(|s| s.end_of_document).collect::<Vec<_>>(), [false, false, true]);
    }

    #[test]
    fn closing_symbols_stay_with_the_mark() {
        let mut seg = SentenceSegmentor::new();
        let out = seg.process(PlainSentence::new(0, 0, false, "\"간다.\" 그래"));
        assert_eq!(texts(&out), ["\"간다 .\""]);
        assert_eq!(texts(&seg.flush()), ["그래"]);
    }

    #[test]
    fn mark_inside_a_word_splits_it() {
        let mut seg = SentenceSegmentor::new();
        let out = seg.process(PlainSentence::new(0, 0, true, "간다.왔다."));
        assert_eq!(texts(&out), ["간다 .", "왔다 ."]);
        assert!(out[1].end_of_document);
    }

    #[test]
    fn guarded_dots_do_not_end_sentences() {
        let mut seg = SentenceSegmentor::new();
        let out = seg.process(PlainSentence::new(0, 0, true, "3.14 e.g 값"));
        assert!(out.is_empty());
        let flushed = seg.flush();
        assert_eq!(texts(&flushed), ["3.14 e.g 값"]);
        assert!(flushed[0].end_of_document);
    }

    #[test]
    fn incomplete_lines_are_joined() {
        let mut seg = SentenceSegmentor::new();
        assert!(seg.process(PlainSentence::new(0, 0, false, "나는")).is_empty());
        assert!(seg.process(PlainSentence::new(0, 1, false, "학교에")).is_empty());
        let out = seg.process(PlainSentence::new(0, 2, true, "간다."));
        assert_eq!(texts(&out), ["나는 학교에 간다 ."]);
        assert!(seg.flush().is_empty());
    }

    #[test]
    fn numbering_restarts_per_document() {
        let mut seg = SentenceSegmentor::new();
        seg.process(PlainSentence::new(0, 0, true, "간다. 왔다."));
        let out = seg.process(PlainSentence::new(1, 0, true, "논다."));
        assert_eq!((out[0].document_id, out[0].sentence_id), (1, 0));
    }
}
