// Probability tables read by the HMM tagger

use std::io::BufRead;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;

use crate::error::ConfigError;

/// Key to log-probability map.
///
/// Each line is a key followed by one or more numbers, separated by
/// whitespace. Only the first number is used by the tagger.
#[derive(Debug, Clone, Default)]
pub struct ProbabilityTable {
    table: HashMap<String, Vec<f64>>,
}

impl ProbabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::read(std::io::BufReader::new(file), path)?;
        log::debug!("{}: {} entries", path.display(), table.len());
        Ok(table)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ConfigError> {
        Self::read(reader, Path::new("<memory>"))
    }

    fn read<R: BufRead>(reader: R, path: &Path) -> Result<Self, ConfigError> {
        let parse_error = |line: usize, message: String| ConfigError::Parse {
            path: PathBuf::from(path),
            line,
            message,
        };
        let mut table = HashMap::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let mut tokens = line.split_whitespace();
            let Some(key) = tokens.next() else {
                continue;
            };
            let values = tokens
                .map(|t| t.parse::<f64>().map_err(|e| parse_error(lineno + 1, format!("`{t}`: {e}"))))
                .collect::<Result<Vec<_>, _>>()?;
            if values.is_empty() {
                return Err(parse_error(lineno + 1, format!("no value for `{key}`")));
            }
            table.insert(key.to_string(), values);
        }
        Ok(Self { table })
    }

    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.table.get(key).map(Vec::as_slice)
    }

    /// First value stored under `key`.
    pub fn first(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.first().copied())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.table.insert(key.into(), vec![value]);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
