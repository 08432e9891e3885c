// hannanum-tag: POS tagging of Korean text.
//
// Runs the morphological analyzer and the HMM tagger and prints the chosen
// analysis of every eojeol. `--simple` maps the tags onto the 9 or 22
// coarse KAIST classes.
//
// Usage:
//   hannanum-tag [-d DATA_DIR] [--simple 09|22] [TEXT...]
//
// Options:
//   -d, --data-dir PATH   Directory holding analyzer.json and tagger.json
//   -s, --simple LEVEL    Coarse tags: 09 or 22
//   -h, --help            Print help

use hannanum_core::Sentence;
use hannanum_ko::WorkflowFactory;

fn main() {
    hannanum_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (data_dir, args) = hannanum_cli::parse_data_dir(&args);
    let (simple, args) = hannanum_cli::take_option(&args, "--simple", "-s");

    if hannanum_cli::wants_help(&args) {
        println!("hannanum-tag: POS tagging of Korean text.");
        println!();
        println!("Usage: hannanum-tag [-d DATA_DIR] [--simple 09|22] [TEXT...]");
        println!();
        println!("If TEXT arguments are given, tags each of them as a document.");
        println!("Otherwise reads documents from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --data-dir PATH   Directory holding analyzer.json and tagger.json");
        println!("  -s, --simple LEVEL    Map tags onto the 09 or 22 coarse classes");
        println!("  -h, --help            Print this help");
        return;
    }

    let factory = match simple.as_deref() {
        None => WorkflowFactory::HmmPosTagger,
        Some("09" | "9") => WorkflowFactory::PosSimple09,
        Some("22") => WorkflowFactory::PosSimple22,
        Some(other) => hannanum_cli::fatal(&format!("unknown --simple level `{other}` (expected 09 or 22)")),
    };

    let texts: Vec<String> = args.iter().filter(|a| !a.starts_with('-')).cloned().collect();

    let mut workflow =
        hannanum_cli::load_workflow(factory, data_dir.as_deref()).unwrap_or_else(|e| hannanum_cli::fatal(&e));

    if let Err(e) = hannanum_cli::run::<Sentence>(&mut workflow, &texts) {
        hannanum_cli::fatal(&e.to_string());
    }
    workflow.close();
}
