// Pre-analyzed eojeol dictionary

use std::io::BufRead;
use std::path::Path;

use hannanum_core::Eojeol;
use hashbrown::HashMap;

use crate::DictError;

/// Eojeols whose analyses are listed verbatim and bypass the chart.
///
/// Lines are `eojeol<TAB>analysis[<TAB>analysis...]`; an analysis field may
/// also hold several analyses joined by `^`. One analysis is written
/// `morpheme/tag+morpheme/tag...`.
#[derive(Debug, Clone, Default)]
pub struct AnalyzedDic {
    entries: HashMap<String, Vec<Eojeol>>,
}

impl AnalyzedDic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictError> {
        let path = path.as_ref();
        let dic = Self::from_reader(crate::open(path)?)?;
        log::debug!("{}: {} pre-analyzed eojeols", path.display(), dic.len());
        Ok(dic)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, DictError> {
        let mut dic = Self::new();
        for line in reader.lines() {
            let line = line?;
            let mut fields = line.trim().split('\t').filter(|f| !f.is_empty());
            let Some(key) = fields.next() else {
                continue;
            };
            let analyses = fields
                .flat_map(|f| f.split('^'))
                .filter(|a| !a.is_empty())
                .map(parse_analysis)
                .collect();
            dic.entries.insert(key.to_string(), analyses);
        }
        Ok(dic)
    }

    /// Analyses listed for `eojeol`.
    pub fn get(&self, eojeol: &str) -> Option<&[Eojeol]> {
        self.entries.get(eojeol).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Parse `m/t+m/t`. A trailing unpaired token is dropped.
pub fn parse_analysis(analysis: &str) -> Eojeol {
    let tokens: Vec<&str> = analysis.split(['+', '/']).collect();
    Eojeol::from_pairs(tokens.chunks_exact(2).map(|pair| (pair[0], pair[1])))
}
