// hannanum-analyze: Morphological analysis of Korean text.
//
// Prints every analysis hypothesis of every eojeol, one sentence at a
// time, in the `SetOfSentences` layout: the eojeol on its own line, then
// one tab-indented line per hypothesis.
//
// Usage:
//   hannanum-analyze [-d DATA_DIR] [TEXT...]
//
// Options:
//   -d, --data-dir PATH   Directory holding analyzer.json
//   -h, --help            Print help

use hannanum_core::SetOfSentences;
use hannanum_ko::WorkflowFactory;

fn main() {
    hannanum_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (data_dir, args) = hannanum_cli::parse_data_dir(&args);

    if hannanum_cli::wants_help(&args) {
        println!("hannanum-analyze: Morphological analysis of Korean text.");
        println!();
        println!("Usage: hannanum-analyze [-d DATA_DIR] [TEXT...]");
        println!();
        println!("If TEXT arguments are given, analyzes each of them as a document.");
        println!("Otherwise reads documents from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --data-dir PATH   Directory holding analyzer.json");
        println!("  -h, --help            Print this help");
        return;
    }

    let texts: Vec<String> = args.iter().filter(|a| !a.starts_with('-')).cloned().collect();

    let mut workflow = hannanum_cli::load_workflow(WorkflowFactory::MorphAnalyzer, data_dir.as_deref())
        .unwrap_or_else(|e| hannanum_cli::fatal(&e));

    if let Err(e) = hannanum_cli::run::<SetOfSentences>(&mut workflow, &texts) {
        hannanum_cli::fatal(&e.to_string());
    }
    workflow.close();
}
