// JSON configuration for the analyzer and the tagger

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Capacity limits and compatibility switches of the chart analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerOptions {
    /// Chart positions per eojeol, rule-generated ones included.
    pub max_positions: usize,
    /// Morpheme candidates anchored at one position.
    pub max_morphemes_per_position: usize,
    /// Morpheme nodes per eojeol.
    pub max_chart: usize,
    /// Successors kept by one morpheme node.
    pub max_connections: usize,
    /// Hypotheses enumerated per eojeol. Enumeration stops silently here.
    pub max_candidates: usize,
    /// Register only `jcc` in the particle tag type, as older tag set
    /// loaders did.
    pub legacy_josa_slot: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            max_positions: 1024,
            max_morphemes_per_position: 512,
            max_chart: 2046,
            max_connections: 30,
            max_candidates: 100_000,
            legacy_josa_slot: false,
        }
    }
}

/// Resource files of the chart morphological analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub tagset: PathBuf,
    pub connections: PathBuf,
    pub connections_not: PathBuf,
    pub dic_analyzed: PathBuf,
    pub dic_system: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dic_user: Option<PathBuf>,
    #[serde(default)]
    pub options: AnalyzerOptions,
}

impl AnalyzerConfig {
    /// Read `path` and resolve every file it names against `base_dir`.
    pub fn load(base_dir: impl AsRef<Path>, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base_dir = base_dir.as_ref();
        let config: Self = read_json(&base_dir.join(path))?;
        Ok(config.resolved(base_dir))
    }

    /// Copy with relative paths joined onto `base_dir`.
    pub fn resolved(&self, base_dir: &Path) -> Self {
        Self {
            tagset: base_dir.join(&self.tagset),
            connections: base_dir.join(&self.connections),
            connections_not: base_dir.join(&self.connections_not),
            dic_analyzed: base_dir.join(&self.dic_analyzed),
            dic_system: base_dir.join(&self.dic_system),
            dic_user: self.dic_user.as_ref().map(|p| base_dir.join(p)),
            options: self.options,
        }
    }
}

/// Probability tables of the HMM tagger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggerConfig {
    /// `P(word|tag)` table.
    #[serde(rename = "pwt.pos")]
    pub pwt_pos: PathBuf,
    /// Morpheme tag transitions.
    #[serde(rename = "ptt.pos")]
    pub ptt_pos: PathBuf,
    /// Eojeol (phrase) tag transitions.
    #[serde(rename = "ptt.wp")]
    pub ptt_wp: PathBuf,
}

impl TaggerConfig {
    pub fn load(base_dir: impl AsRef<Path>, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base_dir = base_dir.as_ref();
        let config: Self = read_json(&base_dir.join(path))?;
        Ok(Self {
            pwt_pos: base_dir.join(&config.pwt_pos),
            ptt_pos: base_dir.join(&config.ptt_pos),
            ptt_wp: base_dir.join(&config.ptt_wp),
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}
