// Morphophonemic rules that propose alternative spellings to the chart
//
// Each rule looks at one offset of the remaining eojeol (in triple form),
// rebuilds the spelling a contracted, elided or irregular form came from,
// and hands the rebuilt (front, back) split to a `PhonemeSink`. The sink
// only accepts a split whose front is a dictionary word of the right tag
// type, so the rules themselves never decide whether a reading is valid.

use hannanum_core::jamo;
use hannanum_core::tagset::{PHONEME_ALL, Phoneme, TagSet, TagType};

use crate::error::AnalysisError;

/// Receiver of rebuilt spellings.
pub trait PhonemeSink {
    /// Register `front` as a morpheme starting at position `from`, followed
    /// by `back`. `front` must carry a tag of `front_type` and, unless
    /// `phoneme` is [`PHONEME_ALL`], that irregular class; the morpheme
    /// after it must be of `back_type`.
    fn phoneme_change(
        &mut self,
        from: usize,
        front: &[char],
        back: &[char],
        front_type: TagType,
        back_type: TagType,
        phoneme: Phoneme,
    ) -> Result<(), AnalysisError>;
}

const VOWELS: &[char] = &['ᅡ', 'ᅣ', 'ᅥ', 'ᅧ', 'ᅩ', 'ᅭ', 'ᅮ', 'ᅲ', 'ᅳ', 'ᅵ', 'ᅢ', 'ᅤ', 'ᅦ', 'ᅨ', 'ᅬ', 'ᅱ', 'ᅴ', 'ᅪ', 'ᅯ', 'ᅫ', 'ᅰ'];
const FINALS: &[char] = &['ᆨ', 'ᆩ', 'ᆪ', 'ᆫ', 'ᆬ', 'ᆭ', 'ᆮ', 'ᆯ', 'ᆰ', 'ᆱ', 'ᆲ', 'ᆳ', 'ᆴ', 'ᆵ', 'ᆶ', 'ᆷ', 'ᆸ', 'ᆹ', 'ᆺ', 'ᆻ', 'ᆼ', 'ᆽ', 'ᆾ', 'ᆿ', 'ᇀ', 'ᇁ', 'ᇂ'];
const BRIGHT_VOWELS: &[char] = &['ᅡ', 'ᅩ', 'ᅣ', 'ᅢ', 'ᅪ', 'ᅬ', 'ᅤ'];
const GEOT_FOLLOW: &[char] = &['ᄂ', 'ᄆ', 'ᄅ', 'ᆫ', 'ᆯ', 'ᆸ'];

const L_ELISION: Pattern = Pattern {
    left: &['ᅡ', 'ᅣ', 'ᅥ', 'ᅧ', 'ᅩ', 'ᅭ', 'ᅮ', 'ᅲ', 'ᅳ', 'ᅵ', 'ᅢ', 'ᅤ', 'ᅦ', 'ᅨ', 'ᅬ', 'ᅱ', 'ᅴ', 'ᅪ', 'ᅯ', 'ᅫ', 'ᅰ'],
    mid: &[' ', 'ᆫ', 'ᆯ', 'ᆷ', 'ᆸ', 'ᄂ', 'ᄉ'],
    right: &[],
};
const EU_ELISION: Pattern = Pattern {
    left: &[],
    mid: &['ᅡ', 'ᅥ'],
    right: &[],
};
const A_ELISION: Pattern = Pattern {
    left: &[],
    mid: &['ᅡ'],
    right: &[],
};
const EO_ELISION: Pattern = Pattern {
    left: &[],
    mid: &['ᅥ', 'ᅦ', 'ᅧ', 'ᅢ'],
    right: &[],
};
const D_IRR: Pattern = Pattern {
    left: &['ᆯ'],
    mid: &['ᄋ'],
    right: &['ᅥ', 'ᅡ', 'ᅳ'],
};
const S_IRR: Pattern = Pattern {
    left: &['ᅡ', 'ᅥ', 'ᅮ', 'ᅳ', 'ᅵ'],
    mid: &['ᄋ'],
    right: &['ᅥ', 'ᅡ', 'ᅳ'],
};
const B_IRR_U: Pattern = Pattern {
    left: &['ᄋ'],
    mid: &['ᅮ'],
    right: &[],
};
const B_IRR_WA: Pattern = Pattern {
    left: &['ᄋ'],
    mid: &['ᅪ'],
    right: &[],
};
const B_IRR_WO: Pattern = Pattern {
    left: &['ᄋ'],
    mid: &['ᅯ'],
    right: &[],
};
const H_IRR_A: Pattern = Pattern {
    left: &['ᄀ', 'ᄃ', 'ᄅ', 'ᄆ', 'ᄋ'],
    mid: &['ᅡ', 'ᅣ'],
    right: &[],
};
const H_IRR_AE: Pattern = Pattern {
    left: &['ᄀ', 'ᄃ', 'ᄅ', 'ᄆ', 'ᄄ', 'ᄋ'],
    mid: &['ᅢ', 'ᅤ'],
    right: &[],
};
const H_IRR_EO: Pattern = Pattern {
    left: &['ᄀ', 'ᄃ', 'ᄅ', 'ᄆ', 'ᄄ', 'ᄋ'],
    mid: &['ᅥ'],
    right: &[],
};
const REU_IRR: Pattern = Pattern {
    left: &['ᆯ'],
    mid: &['ᄅ'],
    right: &['ᅥ', 'ᅡ'],
};
const REO_IRR: Pattern = Pattern {
    left: &['ᅳ'],
    mid: &['ᄅ'],
    right: &['ᅥ'],
};
const U_IRR: Pattern = Pattern {
    left: &['ᄑ'],
    mid: &['ᅥ'],
    right: &[],
};
const YEO_IRR_A: Pattern = Pattern {
    left: &['ᄒ'],
    mid: &['ᅡ'],
    right: &['ᄋ'],
};
const YEO_IRR_AE: Pattern = Pattern {
    left: &['ᄒ'],
    mid: &['ᅢ'],
    right: &[],
};
const O_U_CONTRACTION: Pattern = Pattern {
    left: &[],
    mid: &['ᅪ', 'ᅯ'],
    right: &[],
};
const OE_CONTRACTION: Pattern = Pattern {
    left: &[],
    mid: &['ᅫ'],
    right: &[],
};
const I_CONTRACTION: Pattern = Pattern {
    left: &[],
    mid: &['ᅧ'],
    right: &[],
};
const EU_INSERTION: Pattern = Pattern {
    left: &['ᆯ', 'ᅡ', 'ᅣ', 'ᅥ', 'ᅧ', 'ᅩ', 'ᅭ', 'ᅮ', 'ᅲ', 'ᅳ', 'ᅵ', 'ᅢ', 'ᅤ', 'ᅦ', 'ᅨ', 'ᅬ', 'ᅱ', 'ᅴ', 'ᅪ', 'ᅯ', 'ᅫ', 'ᅰ'],
    mid: &[' ', 'ᆫ', 'ᆯ', 'ᆷ', 'ᆸ', 'ᄂ', 'ᄅ', 'ᄆ', 'ᄉ', 'ᄋ'],
    right: &[],
};

const JUNG_A: char = 'ᅡ';
const JUNG_AE: char = 'ᅢ';
const JUNG_YA: char = 'ᅣ';
const JUNG_EO: char = 'ᅥ';
const JUNG_YEO: char = 'ᅧ';
const JUNG_O: char = 'ᅩ';
const JUNG_WA: char = 'ᅪ';
const JUNG_OE: char = 'ᅬ';
const JUNG_U: char = 'ᅮ';
const JUNG_EU: char = 'ᅳ';
const JUNG_I: char = 'ᅵ';
const CHO_RIEUL: char = 'ᄅ';
const CHO_IEUNG: char = 'ᄋ';
const JONG_N: char = 'ᆫ';
const JONG_D: char = 'ᆮ';
const JONG_L: char = 'ᆯ';
const JONG_B: char = 'ᆸ';
const JONG_S: char = 'ᆺ';

const GEO: &[char] = &['ᄀ', 'ᅥ']; // 거
const NAEGA: &[char] = &['ᄂ', 'ᅢ', 'ᄀ', 'ᅡ']; // 내가
const NEGA: &[char] = &['ᄂ', 'ᅦ', 'ᄀ', 'ᅡ']; // 네가
const JEGA: &[char] = &['ᄌ', 'ᅦ', 'ᄀ', 'ᅡ']; // 제가
const NAE: &[char] = &['ᄂ', 'ᅢ']; // 내
const NE: &[char] = &['ᄂ', 'ᅦ']; // 네
const JE: &[char] = &['ᄌ', 'ᅦ']; // 제
const NAEGE: &[char] = &['ᄂ', 'ᅢ', 'ᄀ', 'ᅦ']; // 내게
const NEGE: &[char] = &['ᄂ', 'ᅦ', 'ᄀ', 'ᅦ']; // 네게
const JEGE: &[char] = &['ᄌ', 'ᅦ', 'ᄀ', 'ᅦ']; // 제게
const NA: &[char] = &['ᄂ', 'ᅡ']; // 나
const NEO: &[char] = &['ᄂ', 'ᅥ']; // 너
const JEO: &[char] = &['ᄌ', 'ᅥ']; // 저
const NUGU: &[char] = &['ᄂ', 'ᅮ', 'ᄀ', 'ᅮ']; // 누구
const MUEONGA: &[char] = &['ᄆ', 'ᅮ', 'ᄋ', 'ᅥ', 'ᆫ', 'ᄀ', 'ᅡ']; // 무언가
const MUEOT: &[char] = &['ᄆ', 'ᅮ', 'ᄋ', 'ᅥ', 'ᆺ']; // 무엇
const INGA: &[char] = &['ᄋ', 'ᅵ', 'ᆫ', 'ᄀ', 'ᅡ']; // 인가
const UI: &[char] = &['ᄋ', 'ᅴ']; // 의
const E: &[char] = &['ᄋ', 'ᅦ']; // 에
const NEUN: &[char] = &['ᄂ', 'ᅳ', 'ᆫ']; // 는
const REUL: &[char] = &['ᄅ', 'ᅳ', 'ᆯ']; // 를
const EUN: &[char] = &['ᄋ', 'ᅳ', 'ᆫ']; // 은
const EUM: &[char] = &['ᄋ', 'ᅳ', 'ᆷ']; // 음
const I: &[char] = &['ᄋ', 'ᅵ']; // 이
const EU: &[char] = &['ᄋ', 'ᅳ']; // 으
const SEU: &[char] = &['ᄉ', 'ᅳ']; // 스
const NEU: &[char] = &['ᄂ', 'ᅳ']; // 느
const EO: &[char] = &['ᄋ', 'ᅥ']; // 어
const O: &[char] = &['ᄋ', 'ᅩ']; // 오
const YEO: &[char] = &['ᄋ', 'ᅧ']; // 여
const B_NI: &[char] = &['ᆸ', 'ᄂ', 'ᅵ']; // ㅂ니
const N_DA: &[char] = &['ᆫ', 'ᄃ', 'ᅡ']; // ㄴ다
const L_RO: &[char] = &['ᆯ', 'ᄅ', 'ᅩ']; // ㄹ로
const S_I: &[char] = &['ᆺ', 'ᄋ', 'ᅵ']; // ㅅ이
const S_EU: &[char] = &['ᆺ', 'ᄋ', 'ᅳ']; // ㅅ으
const H_EU: &[char] = &['ᇂ', 'ᄋ', 'ᅳ']; // ㅎ으
const H_EO: &[char] = &['ᇂ', 'ᄋ', 'ᅥ']; // ㅎ어
const H_NG: &[char] = &['ᇂ', 'ᄋ']; // ㅎㅇ
const EU_NG: &[char] = &['ᅳ', 'ᄋ']; // ㅡㅇ
const I_NG: &[char] = &['ᅵ', 'ᄋ']; // ㅣㅇ

/// Left context, trigger and right context classes of one rule. An empty
/// class matches anything, including the end of the string.
#[derive(Debug, Clone, Copy)]
struct Pattern {
    left: &'static [char],
    mid: &'static [char],
    right: &'static [char],
}

impl Pattern {
    /// Whether the pattern matches with its trigger at `cur`. The left
    /// context must exist.
    fn matches(&self, s: &[char], cur: usize) -> bool {
        cur > 0
            && in_class(self.left, s, cur - 1)
            && in_class(self.mid, s, cur)
            && in_class(self.right, s, cur + 1)
    }
}

fn in_class(class: &[char], s: &[char], idx: usize) -> bool {
    class.is_empty() || s.get(idx).is_some_and(|c| class.contains(c))
}

fn starts_at(s: &[char], idx: usize, lit: &[char]) -> bool {
    s.get(idx..idx + lit.len()) == Some(lit)
}

fn insert(s: &[char], at: usize, lit: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(s.len() + lit.len());
    out.extend_from_slice(&s[..at]);
    out.extend_from_slice(lit);
    out.extend_from_slice(&s[at..]);
    out
}

fn replace(s: &[char], at: usize, c: char) -> Vec<char> {
    let mut out = s.to_vec();
    out[at] = c;
    out
}

/// The rule set, parameterized by the irregular class ids of a tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleEngine {
    irr_b: Phoneme,
    irr_s: Phoneme,
    irr_d: Phoneme,
    irr_h: Phoneme,
    irr_reu: Phoneme,
    irr_reo: Phoneme,
}

type RuleResult = Result<(), AnalysisError>;

impl RuleEngine {
    pub fn new(tagset: &TagSet) -> Self {
        Self {
            irr_b: tagset.irr_b,
            irr_s: tagset.irr_s,
            irr_d: tagset.irr_d,
            irr_h: tagset.irr_h,
            irr_reu: tagset.irr_reu,
            irr_reo: tagset.irr_reo,
        }
    }

    /// Run every rule over `span`, the remaining eojeol from position
    /// `from`. `prev` is the morpheme before `from`.
    pub fn expand<S: PhonemeSink + ?Sized>(
        &self,
        sink: &mut S,
        from: usize,
        prev: &[char],
        span: &[char],
    ) -> RuleResult {
        self.pronoun(sink, from, span)?;
        for cur in 0..span.len() {
            self.elision(sink, from, span, cur)?;
            self.irregular_stem(sink, from, span, cur)?;
            self.irregular_ending(sink, from, span, cur)?;
            self.contraction(sink, from, span, cur)?;
            self.eu_insertion(sink, from, span, cur)?;
            self.vowel_harmony(sink, from, span, cur)?;
            self.copula(sink, from, prev, span, cur)?;
            self.bound_noun_geot(sink, from, span, cur)?;
        }
        Ok(())
    }

    /// Pronoun and particle fusions: 내가, 제게, 난, 누굴, 무언가, ...
    fn pronoun<S: PhonemeSink + ?Sized>(&self, sink: &mut S, from: usize, s: &[char]) -> RuleResult {
        let (front, back): (&[char], Vec<char>) = if s.starts_with(NAEGA) {
            (NA, s[2..].to_vec())
        } else if s.starts_with(NEGA) {
            (NEO, s[2..].to_vec())
        } else if s.starts_with(JEGA) {
            (JEO, s[2..].to_vec())
        } else if s == NAE {
            (NA, UI.to_vec())
        } else if s == NE {
            (NEO, UI.to_vec())
        } else if s == JE {
            (JEO, UI.to_vec())
        } else if s.starts_with(NAEGE) {
            (NA, [E, &s[2..]].concat())
        } else if s.starts_with(NEGE) {
            (NEO, [E, &s[2..]].concat())
        } else if s.starts_with(JEGE) {
            (JEO, [E, &s[2..]].concat())
        } else if s.starts_with(NA) || s.starts_with(NEO) {
            let front = if s.starts_with(NA) { NA } else { NEO };
            match s {
                [_, _, JONG_N] => (front, NEUN.to_vec()),
                [_, _, JONG_L] => (front, REUL.to_vec()),
                _ => return Ok(()),
            }
        } else if s.starts_with(NUGU) {
            match s {
                [_, _, _, _, JONG_N] => (NUGU, NEUN.to_vec()),
                [_, _, _, _, JONG_L] => (NUGU, REUL.to_vec()),
                _ => return Ok(()),
            }
        } else if s == MUEONGA {
            (MUEOT, INGA.to_vec())
        } else {
            return Ok(());
        };
        sink.phoneme_change(from, front, &back, TagType::Nbnp, TagType::Josa, PHONEME_ALL)
    }

    /// Restore an elided ㄹ, ㅡ, ㅏ or ㅓ.
    fn elision<S: PhonemeSink + ?Sized>(&self, sink: &mut S, from: usize, s: &[char], cur: usize) -> RuleResult {
        if cur >= s.len() {
            return Ok(());
        }
        let yongs = |sink: &mut S, new: &[char], at: usize| {
            sink.phoneme_change(from, &new[..at], &new[at..], TagType::Yongs, TagType::Eomies, PHONEME_ALL)
        };

        let l = L_ELISION;
        if cur > 0
            && in_class(l.left, s, cur - 1)
            && (in_class(l.mid, s, cur) || starts_at(s, cur, O))
            && in_class(l.right, s, cur + 1)
        {
            let new = insert(s, cur, &[JONG_L]);
            yongs(sink, &new, cur + 1)?;
            self.eu_insertion(sink, from, &new, cur + 1)?;
        }
        if EU_ELISION.matches(s, cur) || (cur == 1 && s[cur] != JUNG_A) {
            let new = insert(&replace(s, cur, JUNG_EO), cur, EU_NG);
            yongs(sink, &new, cur + 1)?;
        }
        if A_ELISION.matches(s, cur) {
            yongs(sink, &insert(s, cur + 1, EO), cur + 1)?;
        }
        if EO_ELISION.matches(s, cur) {
            yongs(sink, &insert(s, cur + 1, EO), cur + 1)?;
        }
        Ok(())
    }

    /// ㄷ, ㅅ, ㅂ, ㅎ, 르 and 러 irregular stems.
    fn irregular_stem<S: PhonemeSink + ?Sized>(
        &self,
        sink: &mut S,
        from: usize,
        s: &[char],
        cur: usize,
    ) -> RuleResult {
        let len = s.len();
        let stem = |sink: &mut S, new: &[char], at: usize, phoneme: Phoneme| {
            sink.phoneme_change(from, &new[..at], &new[at..], TagType::Yongs, TagType::Eomies, phoneme)
        };

        if D_IRR.matches(s, cur) {
            stem(sink, &replace(s, cur - 1, JONG_D), cur, self.irr_d)?;
        }
        if cur < len && S_IRR.matches(s, cur) {
            stem(sink, &insert(s, cur, &[JONG_S]), cur + 1, self.irr_s)?;
        }
        for (pattern, vowel) in [(B_IRR_U, JUNG_EU), (B_IRR_WA, JUNG_EO), (B_IRR_WO, JUNG_EO)] {
            if pattern.matches(s, cur) {
                let new = insert(&replace(s, cur, vowel), cur - 1, &[JONG_B]);
                stem(sink, &new, cur, self.irr_b)?;
            }
        }
        if cur + 1 < len && H_IRR_A.matches(s, cur) {
            stem(sink, &insert(s, cur + 1, H_EU), cur + 2, self.irr_h)?;
        }
        if cur + 1 < len && H_IRR_AE.matches(s, cur) {
            let vowels = if s[cur] == JUNG_AE {
                [JUNG_A, JUNG_EO]
            } else {
                [JUNG_YA, JUNG_YEO]
            };
            for vowel in vowels {
                let new = insert(&replace(s, cur, vowel), cur + 1, H_EO);
                stem(sink, &new, cur + 2, self.irr_h)?;
            }
        }
        if cur + 1 < len && H_IRR_EO.matches(s, cur) {
            let new = insert(&replace(s, cur, JUNG_EO), cur + 1, H_NG);
            stem(sink, &new, cur + 2, self.irr_h)?;
        }
        if cur < len && REU_IRR.matches(s, cur) {
            let mut new = replace(s, cur, JUNG_EU);
            if new[cur + 1] == JUNG_A {
                new[cur + 1] = JUNG_EO;
            }
            let mut new = insert(&new, cur + 1, &[CHO_IEUNG]);
            new[cur - 1] = jamo::to_choseong(new[cur - 1]);
            stem(sink, &new, cur + 1, self.irr_reu)?;
        }
        if REO_IRR.matches(s, cur) && cur >= 2 && s[cur - 2] == CHO_RIEUL {
            stem(sink, &replace(s, cur, CHO_IEUNG), cur, self.irr_reo)?;
        }
        Ok(())
    }

    /// 우 and 여 irregular endings.
    fn irregular_ending<S: PhonemeSink + ?Sized>(
        &self,
        sink: &mut S,
        from: usize,
        s: &[char],
        cur: usize,
    ) -> RuleResult {
        if cur >= s.len() {
            return Ok(());
        }
        let yongs = |sink: &mut S, new: &[char], at: usize| {
            sink.phoneme_change(from, &new[..at], &new[at..], TagType::Yongs, TagType::Eomies, PHONEME_ALL)
        };

        if U_IRR.matches(s, cur) {
            yongs(sink, &insert(&replace(s, cur, JUNG_U), cur + 1, EO), cur + 1)?;
        }
        if YEO_IRR_A.matches(s, cur) && s.get(cur + 2) == Some(&JUNG_YEO) {
            yongs(sink, &replace(s, cur + 2, JUNG_EO), cur + 1)?;
        }
        if YEO_IRR_AE.matches(s, cur) {
            yongs(sink, &insert(&replace(s, cur, JUNG_A), cur + 1, EO), cur + 1)?;
        }
        Ok(())
    }

    /// ㅘ ㅝ ㅙ ㅕ written for ㅗ/ㅜ/ㅚ/ㅣ followed by 어.
    fn contraction<S: PhonemeSink + ?Sized>(&self, sink: &mut S, from: usize, s: &[char], cur: usize) -> RuleResult {
        if cur >= s.len() {
            return Ok(());
        }
        let yongs = |sink: &mut S, new: &[char], at: usize| {
            sink.phoneme_change(from, &new[..at], &new[at..], TagType::Yongs, TagType::Eomies, PHONEME_ALL)
        };

        if O_U_CONTRACTION.matches(s, cur) {
            let vowel = if s[cur] == JUNG_WA { JUNG_O } else { JUNG_U };
            yongs(sink, &insert(&replace(s, cur, vowel), cur + 1, EO), cur + 1)?;
        }
        if OE_CONTRACTION.matches(s, cur) {
            yongs(sink, &insert(&replace(s, cur, JUNG_OE), cur + 1, EO), cur + 1)?;
        }
        if cur > 0 && (cur > 1 || s[cur - 1] != CHO_IEUNG) && I_CONTRACTION.matches(s, cur) {
            yongs(sink, &insert(&replace(s, cur, JUNG_I), cur + 1, EO), cur + 1)?;
        }
        Ok(())
    }

    /// Restore the 으, 스 or 느 an ending drops after a vowel or ㄹ.
    fn eu_insertion<S: PhonemeSink + ?Sized>(&self, sink: &mut S, from: usize, s: &[char], cur: usize) -> RuleResult {
        if cur > s.len() || cur == 0 || !in_class(EU_INSERTION.left, s, cur - 1) {
            return Ok(());
        }
        let mut split = |lit: &[char]| {
            let new = insert(s, cur, lit);
            sink.phoneme_change(from, &new[..cur], &new[cur..], TagType::Yongs, TagType::Eomies, PHONEME_ALL)
        };

        if in_class(EU_INSERTION.mid, s, cur) && in_class(EU_INSERTION.right, s, cur + 1) {
            split(EU)?;
        }
        if starts_at(s, cur, B_NI) {
            split(SEU)?;
        }
        if starts_at(s, cur, N_DA) {
            split(NEU)?;
        }
        Ok(())
    }

    /// 아 written as 어 after a bright vowel.
    fn vowel_harmony<S: PhonemeSink + ?Sized>(&self, sink: &mut S, from: usize, s: &[char], cur: usize) -> RuleResult {
        if cur == 0 || !in_class(BRIGHT_VOWELS, s, cur - 1) {
            return Ok(());
        }
        let len = s.len();
        let (new, at) = if cur + 2 < len && s[cur + 1] == CHO_IEUNG && s[cur + 2] == JUNG_A {
            (replace(s, cur + 2, JUNG_EO), cur + 1)
        } else if cur + 1 < len && s[cur] == CHO_IEUNG && s[cur + 1] == JUNG_A {
            (replace(s, cur + 1, JUNG_EO), cur)
        } else {
            return Ok(());
        };
        sink.phoneme_change(from, &new[..at], &new[at..], TagType::Yongs, TagType::Eomies, PHONEME_ALL)
    }

    /// The copula 이 dropped after a vowel-final noun.
    fn copula<S: PhonemeSink + ?Sized>(
        &self,
        sink: &mut S,
        from: usize,
        prev: &[char],
        s: &[char],
        cur: usize,
    ) -> RuleResult {
        if cur != 0 || cur + 2 > s.len() {
            return Ok(());
        }
        if !prev.last().is_some_and(|c| VOWELS.contains(c)) {
            return Ok(());
        }
        if s.starts_with(YEO) {
            let new = insert(&replace(s, 1, JUNG_EO), 1, I_NG);
            return sink.phoneme_change(from, &new[..2], &new[2..], TagType::Jp, TagType::Eomies, PHONEME_ALL);
        }
        if in_class(FINALS, s, 0)
            || s.starts_with(NEUN)
            || s.starts_with(EUN)
            || s.starts_with(EUM)
            || starts_at(s, 2, NEUN)
        {
            return Ok(());
        }
        sink.phoneme_change(from, I, s, TagType::Jp, TagType::Eomies, PHONEME_ALL)?;
        self.eu_insertion(sink, from, &[I, s].concat(), cur + 2)
    }

    /// Contractions of the bound noun 것: 건, 걸, 걸로, 겁니다, 거면.
    fn bound_noun_geot<S: PhonemeSink + ?Sized>(
        &self,
        sink: &mut S,
        from: usize,
        s: &[char],
        cur: usize,
    ) -> RuleResult {
        if cur >= s.len() || cur < 2 || !starts_at(s, cur - 2, GEO) || !in_class(GEOT_FOLLOW, s, cur) {
            return Ok(());
        }
        let mut split = |new: Vec<char>, back_type: TagType| {
            sink.phoneme_change(from, &new[..cur + 1], &new[cur + 1..], TagType::Nbnp, back_type, PHONEME_ALL)
        };

        if s[cur] == JONG_B {
            if starts_at(s, cur, B_NI) {
                split(insert(s, cur, S_I), TagType::Jp)?;
            }
        } else if starts_at(s, cur, L_RO) {
            split(insert(&replace(s, cur, JONG_S), cur + 1, EU), TagType::Josa)?;
        } else if s[cur] == JONG_L || s[cur] == JONG_N {
            if s.len() != cur + 1 {
                split(insert(s, cur, S_I), TagType::Jp)?;
            }
            split(insert(s, cur, S_EU), TagType::Josa)?;
        } else {
            split(insert(s, cur, S_I), TagType::Jp)?;
        }
        Ok(())
    }
}
