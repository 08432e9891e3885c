// hannanum-nouns: Noun extraction from Korean text.
//
// Tags the text and keeps only the nouns of every eojeol. Eojeols without
// nouns print an empty analysis line.
//
// Usage:
//   hannanum-nouns [-d DATA_DIR] [TEXT...]
//
// Options:
//   -d, --data-dir PATH   Directory holding analyzer.json and tagger.json
//   -h, --help            Print help

use hannanum_core::Sentence;
use hannanum_ko::WorkflowFactory;

fn main() {
    hannanum_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (data_dir, args) = hannanum_cli::parse_data_dir(&args);

    if hannanum_cli::wants_help(&args) {
        println!("hannanum-nouns: Noun extraction from Korean text.");
        println!();
        println!("Usage: hannanum-nouns [-d DATA_DIR] [TEXT...]");
        println!();
        println!("If TEXT arguments are given, extracts nouns from each of them.");
        println!("Otherwise reads documents from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --data-dir PATH   Directory holding analyzer.json and tagger.json");
        println!("  -h, --help            Print this help");
        return;
    }

    let texts: Vec<String> = args.iter().filter(|a| !a.starts_with('-')).cloned().collect();

    let mut workflow = hannanum_cli::load_workflow(WorkflowFactory::NounExtractor, data_dir.as_deref())
        .unwrap_or_else(|e| hannanum_cli::fatal(&e));

    if let Err(e) = hannanum_cli::run::<Sentence>(&mut workflow, &texts) {
        hannanum_cli::fatal(&e.to_string());
    }
    workflow.close();
}
