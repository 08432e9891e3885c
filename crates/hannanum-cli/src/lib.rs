// hannanum-cli: shared utilities for CLI tools.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use hannanum_ko::workflow::{ANALYZER_CONFIG, TAGGER_CONFIG};
use hannanum_ko::{ConfigError, StageOutput, Workflow, WorkflowError, WorkflowFactory};

/// Search for the data directory, the first one holding `analyzer.json`.
///
/// Search order:
/// 1. `data_dir` argument (if provided)
/// 2. `HANNANUM_DATA_PATH` environment variable
/// 3. `~/.hannanum`
/// 4. `/usr/share/hannanum`
/// 5. Current working directory
pub fn find_data_dir(data_dir: Option<&str>) -> Result<PathBuf, ConfigError> {
    let search_paths = build_search_paths(data_dir);
    if let Some(dir) = search_paths.iter().find(|dir| dir.join(ANALYZER_CONFIG).is_file()) {
        log::debug!("data directory {}", dir.display());
        return Ok(dir.clone());
    }
    Err(ConfigError::NoDataDir(
        search_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    ))
}

fn build_search_paths(data_dir: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = data_dir {
        paths.push(PathBuf::from(p));
    }
    if let Ok(env_path) = std::env::var("HANNANUM_DATA_PATH") {
        paths.push(PathBuf::from(env_path));
    }
    if let Some(home) = home_dir() {
        paths.push(home.join(".hannanum"));
    }
    paths.push(PathBuf::from("/usr/share/hannanum"));
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }

    paths
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Build and start a preset workflow over the data directory.
///
/// Presets that tag also need `tagger.json` next to `analyzer.json`.
pub fn load_workflow(factory: WorkflowFactory, data_dir: Option<&str>) -> Result<Workflow, String> {
    let dir = find_data_dir(data_dir).map_err(|e| e.to_string())?;
    if factory != WorkflowFactory::MorphAnalyzer && !dir.join(TAGGER_CONFIG).is_file() {
        return Err(format!("{} has no {TAGGER_CONFIG}", dir.display()));
    }
    let mut workflow = factory.build(&dir).map_err(|e| e.to_string())?;
    workflow.activate_threaded().map_err(|e| e.to_string())?;
    Ok(workflow)
}

/// Analyze every text argument, or every stdin line when there are none,
/// and print each resulting sentence.
pub fn run<T: StageOutput + Display>(workflow: &mut Workflow, texts: &[String]) -> Result<(), WorkflowError> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut analyze = |text: &str, out: &mut io::BufWriter<io::StdoutLock<'_>>| -> Result<(), WorkflowError> {
        workflow.analyze(text)?;
        for sentence in workflow.result_of_document::<T>()? {
            write!(out, "{sentence}")?;
        }
        out.flush()?;
        Ok(())
    };

    if texts.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            analyze(text, &mut out)?;
        }
    } else {
        for text in texts {
            analyze(text, &mut out)?;
        }
    }
    Ok(())
}

/// Take `--NAME=VALUE`, `--NAME VALUE` or `-S VALUE` out of `args`.
///
/// Returns `(value, remaining_args)`.
pub fn take_option(args: &[String], long: &str, short: &str) -> (Option<String>, Vec<String>) {
    let prefix = format!("{long}=");
    let mut value = None;
    let mut remaining = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix(&prefix) {
            value = Some(val.to_string());
        } else if arg == long || arg == short {
            match iter.next() {
                Some(val) => value = Some(val.clone()),
                None => fatal(&format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (value, remaining)
}

/// Parse a `--data-dir=PATH` or `-d PATH` argument.
pub fn parse_data_dir(args: &[String]) -> (Option<String>, Vec<String>) {
    take_option(args, "--data-dir", "-d")
}

/// Log to stderr at `warn` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
