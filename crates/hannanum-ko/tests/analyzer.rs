use std::path::PathBuf;

use hannanum_core::{PlainSentence, SetOfSentences, TagSet};
use hannanum_dict::Connection;
use hannanum_ko::{AnalyzerConfig, ChartMorphAnalyzer};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn analyzer() -> ChartMorphAnalyzer {
    ChartMorphAnalyzer::from_config(data_dir(), "analyzer.json").unwrap()
}

fn analyze(analyzer: &mut ChartMorphAnalyzer, text: &str) -> SetOfSentences {
    analyzer.analyze_sentence(&PlainSentence::new(0, 0, true, text)).unwrap()
}

fn strings(sos: &SetOfSentences, index: usize) -> Vec<String> {
    sos.eojeol_sets[index].iter().map(ToString::to_string).collect()
}

#[test]
fn naneun_keeps_every_reading() {
    let sos = analyze(&mut analyzer(), "나는");
    let expected = [
        "나/ncn+는/jxc",
        "나/npp+는/jxc",
        "나/pvg+는/etm",
        "나/px+는/etm",
        "나/pvg+아/ecs+는/jxc",
        "나/pvg+아/ef+는/etm",
        "나/px+아/ecs+는/jxc",
        "나/px+아/ef+는/etm",
        "날/pvg+는/etm",
    ];
    assert_eq!(strings(&sos, 0), expected);
}

#[test]
fn sentence_is_split_into_eojeols() {
    let sos = analyze(&mut analyzer(), "나는  학교에\t간다 .");
    assert_eq!(sos.plain_eojeols, ["나는", "학교에", "간다", "."]);
    assert_eq!(sos.len(), 4);
    assert!(strings(&sos, 1).contains(&"학교/ncn+에/jca".to_string()));
    assert!(strings(&sos, 2).contains(&"가/pvg+ㄴ다/ef".to_string()));
    assert_eq!(strings(&sos, 3), ["./sf"]);
    assert!(sos.end_of_document);
}

#[test]
fn every_eojeol_gets_an_analysis() {
    let sos = analyze(&mut analyzer(), "나는 쀍 abc 1,234 漢字 학교에");
    assert_eq!(sos.len(), 6);
    for (word, set) in sos.plain_eojeols.iter().zip(&sos.eojeol_sets) {
        assert!(!set.is_empty(), "{word} has no analysis");
    }
    assert_eq!(strings(&sos, 1), ["쀍/unk"]);
    assert_eq!(strings(&sos, 2), ["abc/f"]);
    assert_eq!(strings(&sos, 3), ["1,234/nnc"]);
    assert_eq!(strings(&sos, 4), ["漢字/f"]);
}

#[test]
fn analyses_respect_the_connection_table() {
    let dir = data_dir();
    let config = AnalyzerConfig::load(&dir, "analyzer.json").unwrap();
    let tagset = TagSet::load(&config.tagset).unwrap();
    let connection = Connection::load(&config.connections, &tagset).unwrap();
    let boundary = tagset.tag_id("iwg").unwrap();

    let sos = analyze(&mut analyzer(), "나는 학교에 간다 . 너는 abc는");
    for set in &sos.eojeol_sets {
        for eojeol in set {
            let mut prev = boundary;
            for tag in eojeol.tags() {
                let id = tagset.tag_id(tag).unwrap();
                assert!(connection.is_connected(prev, id), "{eojeol}: {tag} after {}", tagset.tag_name(prev));
                prev = id;
            }
            assert!(connection.is_connected(prev, boundary), "{eojeol} cannot end here");
        }
    }
}

#[test]
fn pre_analyzed_eojeols_skip_the_chart() {
    let sos = analyze(&mut analyzer(), "너는");
    assert_eq!(strings(&sos, 0), ["너/npp+는/jxc"]);
}

#[test]
fn analysis_is_repeatable() {
    let mut analyzer = analyzer();
    let text = "나는 학교에 간다 .";
    let first = analyze(&mut analyzer, text);
    analyze(&mut analyzer, "쀍 abc는 漢字");
    let second = analyze(&mut analyzer, text);
    assert_eq!(first.eojeol_sets, second.eojeol_sets);
}

#[test]
fn user_dictionary_adds_words() {
    let mut analyzer = analyzer();
    assert_eq!(strings(&analyze(&mut analyzer, "쀍"), 0), ["쀍/unk"]);
    analyzer.load_user_dic(data_dir().join("dic_user.txt")).unwrap();
    assert_eq!(strings(&analyze(&mut analyzer, "쀍"), 0), ["쀍/ncn"]);
}

#[test]
fn forbidden_pairs_are_loaded() {
    let analyzer = analyzer();
    assert_eq!(analyzer.connection_not().rules().len(), 1);
}

#[test]
fn missing_config_is_reported() {
    let err = ChartMorphAnalyzer::from_config(data_dir(), "absent.json").err().unwrap();
    assert!(err.to_string().contains("absent.json"));
}
