use std::path::PathBuf;

use hannanum_core::{Eojeol, PlainSentence, SetOfSentences};
use hannanum_ko::tagger::phrase_tag;
use hannanum_ko::tagger::hmm::{SMOOTHING, TERMINAL};
use hannanum_ko::{ChartMorphAnalyzer, HmmTagger};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn analyze(text: &str) -> SetOfSentences {
    let mut analyzer = ChartMorphAnalyzer::from_config(data_dir(), "analyzer.json").unwrap();
    analyzer.analyze_sentence(&PlainSentence::new(3, 1, false, text)).unwrap()
}

fn tagger() -> HmmTagger {
    HmmTagger::from_config(data_dir(), "tagger.json").unwrap()
}

fn path_score(tagger: &HmmTagger, path: &[&Eojeol]) -> f64 {
    let tags: Vec<String> = path.iter().map(|e| phrase_tag(e.tags())).collect();
    let mut score: f64 = path.iter().map(|e| tagger.eojeol_score(e)).sum();
    for pair in tags.windows(2) {
        score += tagger.transition(&pair[0], &pair[1]);
    }
    if let Some(last) = tags.last() {
        score += tagger.transition(last, TERMINAL);
    }
    score
}

/// Best score over every combination of analyses, and how many
/// combinations were scored.
fn best_by_enumeration(tagger: &HmmTagger, sos: &SetOfSentences) -> (f64, usize) {
    let mut best = f64::NEG_INFINITY;
    let mut visited = 0;
    let mut index = vec![0usize; sos.len()];
    loop {
        let path: Vec<&Eojeol> = index.iter().zip(&sos.eojeol_sets).map(|(&i, set)| &set[i]).collect();
        best = best.max(path_score(tagger, &path));
        visited += 1;

        let mut k = 0;
        while k < index.len() {
            index[k] += 1;
            if index[k] < sos.eojeol_sets[k].len() {
                break;
            }
            index[k] = 0;
            k += 1;
        }
        if k == index.len() {
            return (best, visited);
        }
    }
}

#[test]
fn viterbi_finds_the_best_path() {
    let tagger = tagger();
    let sos = analyze("나는 학교에 간다 .");
    assert!(sos.eojeol_sets.iter().all(|set| !set.is_empty()));

    let sentence = tagger.tag(&sos).unwrap();
    assert_eq!(sentence.len(), sos.len());
    let chosen: Vec<&Eojeol> = sentence.eojeols.iter().collect();
    for (eojeol, set) in chosen.iter().zip(&sos.eojeol_sets) {
        assert!(set.contains(eojeol));
    }

    let (expected, _) = best_by_enumeration(&tagger, &sos);
    let got = path_score(&tagger, &chosen);
    assert!((got - expected).abs() < 1e-9, "{got} != {expected}");
}

#[test]
fn viterbi_matches_every_combination() {
    let tagger = tagger();
    let sos = analyze("나는 학교에 간다.");
    assert_eq!(sos.plain_eojeols, ["나는", "학교에", "간다."]);
    let counts: Vec<usize> = sos.eojeol_sets.iter().map(Vec::len).collect();
    assert_eq!(counts, [9, 1, 3]);

    let last: Vec<String> = sos.eojeol_sets[2].iter().map(ToString::to_string).collect();
    assert!(last.contains(&"가/pvg+ㄴ다/ef+./sf".to_string()));
    assert!(last.contains(&"갈/pvg+ㄴ다/ef+./sf".to_string()));

    let (expected, visited) = best_by_enumeration(&tagger, &sos);
    assert_eq!(visited, 27);

    let sentence = tagger.tag(&sos).unwrap();
    let chosen: Vec<&Eojeol> = sentence.eojeols.iter().collect();
    let got = path_score(&tagger, &chosen);
    assert!((got - expected).abs() < 1e-9, "{got} != {expected}");
    assert_eq!(sentence.eojeols[0].to_string(), "나/npp+는/jxc");
}

#[test]
fn pronoun_reading_wins() {
    let sentence = tagger().tag(&analyze("나는 학교에 간다 .")).unwrap();
    let shown: Vec<String> = sentence.eojeols.iter().map(ToString::to_string).collect();
    assert_eq!(shown[0], "나/npp+는/jxc");
    assert_eq!(shown[1], "학교/ncn+에/jca");
    assert_eq!(shown[3], "./sf");
}

#[test]
fn sentence_metadata_is_kept() {
    let sentence = tagger().tag(&analyze("나는 학교에")).unwrap();
    assert_eq!(sentence.document_id, 3);
    assert_eq!(sentence.sentence_id, 1);
    assert!(!sentence.end_of_document);
    assert_eq!(sentence.plain_eojeols, ["나는", "학교에"]);
}

#[test]
fn unseen_phrase_tags_are_smoothed() {
    let tagger = tagger();
    assert_eq!(tagger.transition("ZZ", "QQ"), SMOOTHING);
    assert!((tagger.transition("PM", "NF") - SMOOTHING).abs() < 1e-12);
    assert!((tagger.transition("NX", "NA") - 1.2).abs() < 1e-9);
}

#[test]
fn unknown_words_still_get_tagged() {
    let sentence = tagger().tag(&analyze("쀍 나는")).unwrap();
    assert_eq!(sentence.eojeols[0].to_string(), "쀍/unk");
    assert!(tagger().eojeol_score(&sentence.eojeols[0]).is_finite());
}
