// Morpheme-level connection exceptions

use std::io::BufRead;
use std::path::Path;

use hannanum_core::tagset::{Metadata, TagId, TagSet};

use crate::DictError;

/// A pair of (morpheme, tag) that should not be adjacent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotRule {
    pub left_morpheme: String,
    pub left_tag: TagId,
    pub right_morpheme: String,
    pub right_tag: TagId,
}

/// Exception table read from `CONNECTION_NOT<TAB>morph tag morph tag` lines.
///
/// The rules are loaded and exposed, but [`check_connection`] admits every
/// pair: the table is advisory data for callers that want it.
///
/// [`check_connection`]: ConnectionNot::check_connection
#[derive(Debug, Clone, Default)]
pub struct ConnectionNot {
    pub metadata: Metadata,
    rules: Vec<NotRule>,
}

impl ConnectionNot {
    pub fn load(path: impl AsRef<Path>, tagset: &TagSet) -> Result<Self, DictError> {
        let path = path.as_ref();
        let table = Self::from_reader(crate::open(path)?, tagset)?;
        log::debug!("{}: {} connection exceptions", path.display(), table.rules.len());
        Ok(table)
    }

    pub fn from_reader<R: BufRead>(reader: R, tagset: &TagSet) -> Result<Self, DictError> {
        let mut table = ConnectionNot::default();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let mut fields = line.split('\t').filter(|f| !f.is_empty());
            let Some(head) = fields.next() else {
                continue;
            };
            if head.starts_with('@') {
                table.metadata.set(head, fields.next().unwrap_or(""));
                continue;
            }
            if head != "CONNECTION_NOT" {
                continue;
            }
            let rule = fields.next().unwrap_or("");
            let parts: Vec<&str> = rule.split(' ').filter(|p| !p.is_empty()).collect();
            let [lm, lt, rm, rt] = parts.as_slice() else {
                return Err(DictError::Parse {
                    line: lineno + 1,
                    message: format!("expected `morph tag morph tag`, got `{rule}`"),
                });
            };
            let (Some(left_tag), Some(right_tag)) = (tagset.tag_id(lt), tagset.tag_id(rt)) else {
                log::warn!("connection-not line {}: unknown tag in `{rule}`", lineno + 1);
                continue;
            };
            table.rules.push(NotRule {
                left_morpheme: lm.to_string(),
                left_tag,
                right_morpheme: rm.to_string(),
                right_tag,
            });
        }
        Ok(table)
    }

    pub fn rules(&self) -> &[NotRule] {
        &self.rules
    }

    pub fn check_connection(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hannanum_core::tagset::TagSetOptions;

    fn tagset() -> TagSet {
        let src = "TAG\tncn\nTAG\tjxc\nTAG\tnnc\nTAG\tiwg\nTAG\tunk\n";
        TagSet::from_reader(src.as_bytes(), TagSetOptions::default()).unwrap()
    }

    #[test]
    fn reads_rules() {
        let ts = tagset();
        let src = "@version\t1.0\nCONNECTION_NOT\t것 ncn 는 jxc\nCONNECTION_NOT\t가 xx 나 jxc\n";
        let table = ConnectionNot::from_reader(src.as_bytes(), &ts).unwrap();
        assert_eq!(table.metadata.version, "1.0");
        assert_eq!(table.rules().len(), 1);
        assert_eq!(table.rules()[0].right_morpheme, "는");
        assert!(table.check_connection());
    }

    #[test]
    fn short_rule_is_an_error() {
        let ts = tagset();
        let err = ConnectionNot::from_reader("CONNECTION_NOT\t것 ncn\n".as_bytes(), &ts).unwrap_err();
        assert!(matches!(err, DictError::Parse { line: 1, .. }));
    }
}
