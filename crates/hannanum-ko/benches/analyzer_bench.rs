// Criterion benchmarks for hannanum-ko.
//
// Uses the resources in tests/data by default. Set HANNANUM_DATA_PATH to a
// directory holding analyzer.json and tagger.json to measure full-size
// dictionaries instead.
//
// Run:
//   cargo bench -p hannanum-ko
//   HANNANUM_DATA_PATH=/usr/share/hannanum cargo bench -p hannanum-ko

use std::hint::black_box;
use std::path::PathBuf;

use criterion::{Criterion, criterion_group, criterion_main};
use hannanum_core::PlainSentence;
use hannanum_ko::{ChartMorphAnalyzer, HmmTagger, WorkflowFactory};

const SENTENCES: [&str; 4] = ["나는 학교에 간다 .", "너는 나는", "abc는 漢字 1,234", "쀍 나는 학교에"];

fn data_dir() -> PathBuf {
    std::env::var_os("HANNANUM_DATA_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data"))
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_analyze(c: &mut Criterion) {
    let mut analyzer = ChartMorphAnalyzer::from_config(data_dir(), "analyzer.json").expect("analyzer");
    let sentences: Vec<PlainSentence> = SENTENCES
        .iter()
        .enumerate()
        .map(|(i, s)| PlainSentence::new(0, i, false, *s))
        .collect();

    c.bench_function("analyze_sentences", |b| {
        b.iter(|| {
            for ps in &sentences {
                black_box(analyzer.analyze_sentence(black_box(ps)).expect("analysis"));
            }
        })
    });
}

fn bench_tag(c: &mut Criterion) {
    let mut analyzer = ChartMorphAnalyzer::from_config(data_dir(), "analyzer.json").expect("analyzer");
    let tagger = HmmTagger::from_config(data_dir(), "tagger.json").expect("tagger");
    let analyzed: Vec<_> = SENTENCES
        .iter()
        .map(|s| analyzer.analyze_sentence(&PlainSentence::new(0, 0, false, *s)).expect("analysis"))
        .collect();

    c.bench_function("hmm_tag", |b| {
        b.iter(|| {
            for sos in &analyzed {
                black_box(tagger.tag(black_box(sos)).expect("tagging"));
            }
        })
    });
}

fn bench_workflow(c: &mut Criterion) {
    let mut workflow = WorkflowFactory::HmmPosTagger.build(data_dir()).expect("workflow");
    workflow.activate_single().expect("activate");
    let document = SENTENCES.join("\n");

    c.bench_function("workflow_document", |b| {
        b.iter(|| {
            workflow.analyze(black_box(&document)).expect("analyze");
            black_box(workflow.result_of_document::<hannanum_core::Sentence>().expect("result"));
        })
    });
}

criterion_group!(benches, bench_analyze, bench_tag, bench_workflow);
criterion_main!(benches);
