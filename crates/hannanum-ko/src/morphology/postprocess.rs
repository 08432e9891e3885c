// Surface fixes applied to analyses after the chart

use hannanum_core::jamo::{self, is_jongseong, is_jungseong};
use hannanum_core::{Eojeol, SetOfSentences};

const JUNG_EU: char = '\u{1173}';
const JONG_B: char = '\u{11B8}';
const JONG_L: char = '\u{11AF}';

/// Vowels after which a stem takes 아 rather than 어.
const BRIGHT: [char; 3] = ['\u{1161}', '\u{1163}', '\u{1169}'];

/// Rewrites ending morphemes into the form they take after the preceding
/// morpheme.
///
/// The chart proposes endings in one canonical spelling: 어 for the 어/아
/// alternation, and with the 으, 스 or 느 that attaches after a consonant.
/// After a bright vowel 어 becomes 아, and after a vowel or ㄹ the leading
/// 으/스/느 is dropped.
#[derive(Debug, Clone)]
pub struct PostProcessor {
    eo: Vec<char>,
    eu: Vec<char>,
    seub_n: Vec<char>,
    neun_d: Vec<char>,
    ha: Vec<char>,
    xeu: Vec<char>,
}

impl Default for PostProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl PostProcessor {
    pub fn new() -> Self {
        let prefix = |s: &str, n: usize| jamo::to_triple(s).into_iter().take(n).collect();
        Self {
            eo: jamo::to_triple("어"),
            eu: jamo::to_triple("으"),
            seub_n: prefix("습니", 4),
            neun_d: prefix("는다", 4),
            ha: jamo::to_triple("하"),
            xeu: jamo::to_triple("끄뜨쓰크트"),
        }
    }

    pub fn process(&self, sentences: &mut SetOfSentences) {
        for eojeols in &mut sentences.eojeol_sets {
            for eojeol in eojeols.iter_mut() {
                self.process_eojeol(eojeol);
            }
        }
    }

    /// Fix the endings of one analysis in place.
    pub fn process_eojeol(&self, eojeol: &mut Eojeol) {
        let mut prev: Vec<char> = Vec::new();
        for i in 0..eojeol.len() {
            let replacement = match (eojeol.morpheme(i), eojeol.tag(i)) {
                (Some(morpheme), Some(tag)) if tag.starts_with('e') => self.rewrite(&prev, &jamo::to_triple(morpheme)),
                _ => None,
            };
            if let Some(replacement) = replacement {
                eojeol.set_morpheme(i, replacement);
            }
            prev = jamo::to_triple(eojeol.morpheme(i).unwrap_or_default());
        }
    }

    fn rewrite(&self, prev: &[char], ending: &[char]) -> Option<String> {
        let n = prev.len();
        let last = *prev.last()?;
        if ending.starts_with(&self.eo) {
            let bright = |c: char| BRIGHT.contains(&c);
            let to_a = if n >= 4
                && last == JUNG_EU
                && !self.xeu.contains(&prev[n - 2])
                && ((is_jungseong(prev[n - 3]) && bright(prev[n - 3])) || (is_jongseong(prev[n - 3]) && bright(prev[n - 4])))
            {
                true
            } else if (n >= 3 && last == JONG_B) || (n >= 2 && prev[n - 2..] == self.ha[..]) {
                false
            } else {
                n >= 2 && ((is_jungseong(last) && bright(last)) || (is_jongseong(last) && bright(prev[n - 2])))
            };
            if to_a {
                let mut tri = ending.to_vec();
                tri[1] = '\u{1161}';
                return Some(jamo::to_string(&tri));
            }
        } else if (ending.starts_with(&self.eu) || ending.starts_with(&self.seub_n) || ending.starts_with(&self.neun_d))
            && n >= 2
            && (is_jungseong(last) || last == JONG_L)
        {
            return Some(jamo::to_string(&ending[2..]));
        }
        None
    }
}
