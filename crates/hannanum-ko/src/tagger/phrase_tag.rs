// Eojeol (phrase) tags derived from morpheme tag sequences

const NONE: char = '.';

/// Two-letter phrase tag of an eojeol analysis.
///
/// The first letter classifies the head of the eojeol from its leading tags
/// (`N` nominal, `P` predicate, `A` adverbial, `M` adnominal, `I`
/// interjection, `C` conjunctive, `S` symbol); the second one classifies how
/// it attaches to what follows, from its last tag. `.` marks an empty slot.
pub fn phrase_tag<S: AsRef<str>>(tags: &[S]) -> String {
    let mut res = [NONE, NONE];
    let first = tags.first().map(AsRef::as_ref).unwrap_or("");
    if first.is_empty() {
        return res.iter().collect();
    }
    let at = |i: usize| tags.get(i).map(AsRef::as_ref).unwrap_or("");
    let last = at(tags.len() - 1);
    let nominal_within = |from: usize| third_is(at(from), 'n') || third_is(at(from + 1), 'n');

    match head(first) {
        'm' => {
            if first.starts_with("ma") {
                res[0] = if at(1).starts_with('p') || at(1).starts_with('x') || at(1).starts_with("jcp") {
                    'P'
                } else {
                    'A'
                };
            } else if first.len() > 1 {
                res[0] = if last.starts_with('j') || at(1).starts_with('n') {
                    'N'
                } else if at(1).starts_with('p') {
                    'P'
                } else {
                    'M'
                };
            }
        }
        'e' => {
            if first.starts_with("ecc") || first.starts_with("ecs") {
                res[0] = 'C';
            }
        }
        'f' => res[0] = 'N',
        'i' => res[0] = if at(1).starts_with('j') { 'N' } else { 'I' },
        'n' => {
            let second = at(1);
            res[0] = if second.starts_with('x') && (third_is(second, 'v') || third_is(second, 'm')) {
                if nominal_within(2) { 'N' } else { 'P' }
            } else if second.starts_with('x') && third_is(second, 'n') {
                'N'
            } else if second.starts_with('p') {
                if nominal_within(2) { 'N' } else { 'P' }
            } else {
                'N'
            };
        }
        'p' => {
            res[0] = if at(1).starts_with("xsa") {
                'A'
            } else if at(1).starts_with("etn") || at(2).starts_with('n') {
                'N'
            } else {
                'P'
            };
        }
        's' => {
            res[0] = if at(1).starts_with("su") || at(2).starts_with('j') || at(2).starts_with('n') || last.starts_with('j') {
                'N'
            } else {
                'S'
            };
            if first.starts_with("sf") || at(1).starts_with('s') {
                res[1] = 'F';
            }
        }
        'x' => {
            if first.starts_with("xsn") || first.starts_with("xp") {
                res[0] = 'N';
            }
        }
        _ => {}
    }

    match head(last) {
        'e' => {
            if last.starts_with("ecc") || last.starts_with("ecs") || last.starts_with("ecx") {
                res[1] = 'C';
            } else if last.starts_with("ef") {
                res[1] = 'F';
            } else if last.starts_with("etm") {
                res[1] = 'M';
            } else if last.starts_with("etn") {
                res[1] = 'N';
            }
        }
        'j' => {
            let adverbial = res[0] == 'A';
            if last.starts_with("jcv") {
                res[0] = 'I';
            } else if last.starts_with("jx") {
                res[1] = if adverbial { 'J' } else { 'X' };
            } else if last.starts_with("jcj") {
                res[1] = if adverbial { 'J' } else { 'Y' };
            } else if last.starts_with("jca") {
                res[1] = 'A';
            } else if last.starts_with("jcm") {
                res[1] = if adverbial { 'J' } else { 'M' };
            } else if last.starts_with("jc") {
                res[1] = 'J';
            }
        }
        'm' => {
            if last.len() > 1 && !last.starts_with("ma") {
                res[1] = 'M';
            } else if last.starts_with("mag") {
                res[1] = 'A';
            }
        }
        'n' => res[0] = 'N',
        'x' => {
            if last.starts_with("xsa") {
                res[1] = 'A';
            }
        }
        _ => {}
    }

    if res[0] == res[1] {
        res[1] = NONE;
    } else if res[0] == NONE {
        res = [res[1], NONE];
    }
    res[0] = match (res[0], res[1]) {
        ('A', 'M') => 'N',
        ('M', 'A') => 'A',
        ('M', 'F' | 'C') => 'N',
        ('I', 'M' | 'J' | 'F') => 'N',
        ('I', 'C') => 'P',
        (r, _) => r,
    };
    if res[0] == res[1] {
        res[1] = NONE;
    }
    res.iter().collect()
}

fn head(tag: &str) -> char {
    tag.chars().next().unwrap_or(NONE)
}

fn third_is(tag: &str, c: char) -> bool {
    tag.chars().nth(2) == Some(c)
}
