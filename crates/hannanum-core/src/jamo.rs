// Hangul jamo decomposition and recomposition
//
// The analyzer works on "triple" strings: every precomposed syllable is
// split into its conjoining choseong / jungseong / jongseong code points, so
// that phonological rules can look at and rewrite individual jamo.

// ---------------------------------------------------------------------------
// Unicode ranges
// ---------------------------------------------------------------------------

const SYLLABLE_FIRST: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;

const CHOSEONG_BASE: u32 = 0x1100;
const JUNGSEONG_BASE: u32 = 0x1161;
/// Jongseong index 0 means "no final consonant", so the base sits one below U+11A8.
const JONGSEONG_BASE: u32 = 0x11A7;

const JUNGSEONG_COUNT: u32 = 21;
const JONGSEONG_COUNT: u32 = 28;

const COMPAT_CONSONANT_FIRST: u32 = 0x3131;
const COMPAT_CONSONANT_LAST: u32 = 0x314E;
const COMPAT_VOWEL_FIRST: u32 = 0x314F;
const COMPAT_VOWEL_LAST: u32 = 0x3163;

/// Hangul filler, printed for an empty jongseong slot.
pub const HANGUL_FILLER: char = '\u{3164}';

/// Compatibility jamo for each choseong index.
const CHOSEONG_COMPAT: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// Compatibility jamo for each jongseong index (index 0 is the filler).
const JONGSEONG_COMPAT: [char; 28] = [
    HANGUL_FILLER,
    'ㄱ', 'ㄲ', 'ㄳ', 'ㄴ', 'ㄵ', 'ㄶ', 'ㄷ', 'ㄹ', 'ㄺ', 'ㄻ', 'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ', 'ㅀ', 'ㅁ',
    'ㅂ', 'ㅄ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Compatibility consonant (offset from U+3131) to choseong index, -1 if none.
const CHOSEONG_FROM_COMPAT: [i8; 30] = [
    0, 1, -1, 2, -1, -1, 3, 4, 5, -1, -1, -1, -1, -1, -1, -1, 6, 7, 8, -1, 9, 10, 11, 12, 13, 14,
    15, 16, 17, 18,
];

/// Compatibility consonant (offset from U+3131) to jongseong index, -1 if none.
const JONGSEONG_FROM_COMPAT: [i8; 30] = [
    1, 2, 3, 4, 5, 6, 7, -1, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, -1, 18, 19, 20, 21, 22, -1, 23,
    24, 25, 26, 27,
];

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Returns true for a precomposed Hangul syllable (U+AC00..=U+D7A3).
pub fn is_hangul_syllable(c: char) -> bool {
    (SYLLABLE_FIRST..=SYLLABLE_LAST).contains(&(c as u32))
}

/// Returns true for a modern conjoining initial consonant (U+1100..=U+1112).
pub fn is_choseong(c: char) -> bool {
    ('\u{1100}'..='\u{1112}').contains(&c)
}

/// Returns true for a modern conjoining medial vowel (U+1161..=U+1175).
pub fn is_jungseong(c: char) -> bool {
    ('\u{1161}'..='\u{1175}').contains(&c)
}

/// Returns true for a modern conjoining final consonant (U+11A8..=U+11C2).
pub fn is_jongseong(c: char) -> bool {
    ('\u{11A8}'..='\u{11C2}').contains(&c)
}

fn from_u32(cp: u32) -> char {
    char::from_u32(cp).unwrap_or(HANGUL_FILLER)
}

// ---------------------------------------------------------------------------
// Decomposition
// ---------------------------------------------------------------------------

/// Decompose a string into its triple (conjoining jamo) form.
///
/// Compatibility consonants become jongseong when such a final exists, and
/// choseong otherwise. A `^` directly before a compatibility consonant forces
/// the choseong reading (`^ㄴ` is an initial ㄴ, not a final one).
pub fn to_triple(s: &str) -> Vec<char> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = Vec::with_capacity(chars.len() * 3);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let cp = c as u32;
        if is_hangul_syllable(c) {
            let combined = cp - SYLLABLE_FIRST;
            let cho = combined / (JUNGSEONG_COUNT * JONGSEONG_COUNT);
            let jung = (combined % (JUNGSEONG_COUNT * JONGSEONG_COUNT)) / JONGSEONG_COUNT;
            let jong = combined % JONGSEONG_COUNT;
            out.push(from_u32(CHOSEONG_BASE + cho));
            out.push(from_u32(JUNGSEONG_BASE + jung));
            if jong != 0 {
                out.push(from_u32(JONGSEONG_BASE + jong));
            }
        } else if (COMPAT_CONSONANT_FIRST..=COMPAT_CONSONANT_LAST).contains(&cp) {
            let offset = (cp - COMPAT_CONSONANT_FIRST) as usize;
            if JONGSEONG_FROM_COMPAT[offset] != -1 {
                out.push(from_u32(JONGSEONG_BASE + JONGSEONG_FROM_COMPAT[offset] as u32));
            } else if CHOSEONG_FROM_COMPAT[offset] != -1 {
                out.push(from_u32(CHOSEONG_BASE + CHOSEONG_FROM_COMPAT[offset] as u32));
            } else {
                out.push(c);
            }
        } else if (COMPAT_VOWEL_FIRST..=COMPAT_VOWEL_LAST).contains(&cp) {
            out.push(from_u32(cp - COMPAT_VOWEL_FIRST + JUNGSEONG_BASE));
        } else if c == '^' && i + 1 < chars.len() && is_compat_consonant(chars[i + 1]) {
            let offset = (chars[i + 1] as u32 - COMPAT_CONSONANT_FIRST) as usize;
            if CHOSEONG_FROM_COMPAT[offset] != -1 {
                out.push(from_u32(CHOSEONG_BASE + CHOSEONG_FROM_COMPAT[offset] as u32));
                i += 1;
            } else {
                out.push('^');
            }
        } else {
            out.push(c);
        }
        i += 1;
    }
    out
}

/// [`to_triple`] collected into a `String`.
pub fn to_triple_string(s: &str) -> String {
    to_triple(s).into_iter().collect()
}

fn is_compat_consonant(c: char) -> bool {
    (COMPAT_CONSONANT_FIRST..=COMPAT_CONSONANT_LAST).contains(&(c as u32))
}

// ---------------------------------------------------------------------------
// Recomposition
// ---------------------------------------------------------------------------

/// Recompose a triple string into precomposed syllables.
///
/// Jamo that cannot join a syllable are printed as compatibility jamo; a
/// dangling choseong is prefixed with `^` so that [`to_triple`] reads it back
/// as an initial (ㄸ, ㅃ and ㅉ can only be initials and print bare).
pub fn to_string(triple: &[char]) -> String {
    let mut out = String::with_capacity(triple.len());
    let mut i = 0;
    while i < triple.len() {
        let c = triple[i];
        if is_choseong(c) {
            let cho = c as u32 - CHOSEONG_BASE;
            match triple.get(i + 1) {
                Some(&v) if is_jungseong(v) => {
                    let jung = v as u32 - JUNGSEONG_BASE;
                    let mut syllable =
                        SYLLABLE_FIRST + cho * JUNGSEONG_COUNT * JONGSEONG_COUNT + jung * JONGSEONG_COUNT;
                    i += 2;
                    if let Some(&f) = triple.get(i) {
                        if is_jongseong(f) {
                            syllable += f as u32 - JONGSEONG_BASE;
                            i += 1;
                        }
                    }
                    out.push(from_u32(syllable));
                }
                _ => {
                    let compat = CHOSEONG_COMPAT[cho as usize];
                    if !matches!(compat, 'ㅃ' | 'ㅉ' | 'ㄸ') {
                        out.push('^');
                    }
                    out.push(compat);
                    i += 1;
                }
            }
        } else if is_jungseong(c) {
            out.push(from_u32(c as u32 - JUNGSEONG_BASE + COMPAT_VOWEL_FIRST));
            i += 1;
        } else if is_jongseong(c) {
            out.push(JONGSEONG_COMPAT[(c as u32 - JONGSEONG_BASE) as usize]);
            i += 1;
        } else {
            out.push(c);
            i += 1;
        }
    }
    out
}

/// Convert a jongseong to the choseong with the same sound, when one exists.
/// Any other input is returned unchanged.
pub fn to_choseong(jong: char) -> char {
    if is_jongseong(jong) {
        let compat = JONGSEONG_COMPAT[(jong as u32 - JONGSEONG_BASE) as usize];
        let offset = (compat as u32 - COMPAT_CONSONANT_FIRST) as usize;
        if CHOSEONG_FROM_COMPAT[offset] != -1 {
            return from_u32(CHOSEONG_BASE + CHOSEONG_FROM_COMPAT[offset] as u32);
        }
    }
    jong
}

/// Map a conjoining jamo to its compatibility form. `'\0'` maps to the filler.
pub fn to_compatibility_jamo(jamo: char) -> char {
    if is_choseong(jamo) {
        return CHOSEONG_COMPAT[(jamo as u32 - CHOSEONG_BASE) as usize];
    }
    if is_jungseong(jamo) {
        return from_u32(jamo as u32 - JUNGSEONG_BASE + COMPAT_VOWEL_FIRST);
    }
    if jamo == '\0' {
        return HANGUL_FILLER;
    }
    if is_jongseong(jamo) {
        return JONGSEONG_COMPAT[(jamo as u32 - JONGSEONG_BASE) as usize];
    }
    jamo
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decompose_open_and_closed_syllables() {
        assert_eq!(to_triple("나"), vec!['\u{1102}', '\u{1161}']);
        assert_eq!(to_triple("는"), vec!['\u{1102}', '\u{1173}', '\u{11AB}']);
    }

    #[test]
    fn compatibility_consonant_prefers_final() {
        assert_eq!(to_triple("ㄴ"), vec!['\u{11AB}']);
        // ㄸ has no final form
        assert_eq!(to_triple("ㄸ"), vec!['\u{1104}']);
    }

    #[test]
    fn caret_forces_initial() {
        assert_eq!(to_triple("^ㄴ"), vec!['\u{1102}']);
        assert_eq!(to_triple("^a"), vec!['^', 'a']);
    }

    #[test]
    fn compatibility_vowel_becomes_medial() {
        assert_eq!(to_triple("ㅏ"), vec!['\u{1161}']);
    }

    #[test]
    fn non_hangul_passes_through() {
        assert_eq!(to_triple("a1."), vec!['a', '1', '.']);
    }

    #[test]
    fn recompose_round_trip() {
        for s in ["나는", "학교에", "간다.", "HAN_ENG다", "밟았습니다"] {
            assert_eq!(to_string(&to_triple(s)), s);
        }
    }

    #[test]
    fn recompose_dangling_jamo() {
        assert_eq!(to_string(&to_triple("ㄴ다")), "ㄴ다");
        assert_eq!(to_string(&['\u{1102}']), "^ㄴ");
        assert_eq!(to_string(&['\u{1104}']), "ㄸ");
        assert_eq!(to_string(&['\u{1161}']), "ㅏ");
    }

    #[test]
    fn to_choseong_maps_finals() {
        assert_eq!(to_choseong('\u{11AF}'), '\u{1105}'); // ㄹ
        assert_eq!(to_choseong('\u{11AA}'), '\u{11AA}'); // ㄳ has no initial
        assert_eq!(to_choseong('a'), 'a');
    }

    #[test]
    fn compatibility_jamo() {
        assert_eq!(to_compatibility_jamo('\u{1100}'), 'ㄱ');
        assert_eq!(to_compatibility_jamo('\u{1175}'), 'ㅣ');
        assert_eq!(to_compatibility_jamo('\u{11C2}'), 'ㅎ');
        assert_eq!(to_compatibility_jamo('\0'), HANGUL_FILLER);
    }

    #[test]
    fn classification_ranges() {
        assert!(is_choseong('\u{1112}'));
        assert!(!is_choseong('\u{1113}'));
        assert!(is_jungseong('\u{1161}'));
        assert!(is_jongseong('\u{11A8}'));
        assert!(!is_jongseong('\u{11A7}'));
        assert!(is_hangul_syllable('힣'));
    }
}
