// Tag adjacency table

use std::io::BufRead;
use std::path::Path;

use hannanum_core::tagset::{Metadata, TagId, TagSet, TagType};
use hashbrown::HashSet;

use crate::DictError;

/// Which tag may immediately follow which.
///
/// File lines are `CONNECTION<TAB>left*right`. Each side is a list of
/// tokens separated by `,`, `(` or `)`; a token is `name-ex-ex...` where
/// `name` is a tag or tag group and every `ex` is a tag removed again. All
/// left tags connect to all right tags.
#[derive(Debug, Clone, Default)]
pub struct Connection {
    pub metadata: Metadata,
    pub start_tag: String,
    size: usize,
    table: Vec<bool>,
}

impl Connection {
    pub fn load(path: impl AsRef<Path>, tagset: &TagSet) -> Result<Self, DictError> {
        let path = path.as_ref();
        let connection = Self::from_reader(crate::open(path)?, tagset)?;
        log::debug!(
            "{}: {} connected tag pairs",
            path.display(),
            connection.table.iter().filter(|&&b| b).count()
        );
        Ok(connection)
    }

    pub fn from_reader<R: BufRead>(reader: R, tagset: &TagSet) -> Result<Self, DictError> {
        let size = tagset.tag_count();
        let mut connection = Connection {
            size,
            table: vec![false; size * size],
            ..Default::default()
        };

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let mut fields = line.split('\t').filter(|f| !f.is_empty());
            let Some(head) = fields.next() else {
                continue;
            };
            if head.starts_with('@') {
                connection.metadata.set(head, fields.next().unwrap_or(""));
                continue;
            }
            match head {
                "CONNECTION" => {
                    let rule = fields.next().unwrap_or("");
                    let Some((left, right)) = rule.split_once('*') else {
                        return Err(DictError::Parse {
                            line: lineno + 1,
                            message: format!("connection rule `{rule}` has no `*`"),
                        });
                    };
                    let left = tag_list(left, tagset, lineno);
                    let right = tag_list(right, tagset, lineno);
                    for &a in &left {
                        for &b in &right {
                            connection.table[a * size + b] = true;
                        }
                    }
                }
                "START_TAG" => {
                    connection.start_tag = fields.next().unwrap_or("").to_string();
                }
                _ => {}
            }
        }
        Ok(connection)
    }

    /// Raw table lookup.
    pub fn is_connected(&self, tag1: TagId, tag2: TagId) -> bool {
        tag1 < self.size && tag2 < self.size && self.table[tag1 * self.size + tag2]
    }

    /// Whether a morpheme tagged `tag2` may follow one tagged `tag1`.
    ///
    /// `len1` and `len2` are morpheme lengths in triple characters. A common
    /// noun (or foreign word) followed by another noun needs a first part of
    /// at least 4 and a second of at least 2, and never a `nq*` noun.
    /// `tag2` must also belong to `type_of_tag2`.
    pub fn check_connection(
        &self,
        tagset: &TagSet,
        tag1: TagId,
        tag2: TagId,
        len1: usize,
        len2: usize,
        type_of_tag2: TagType,
    ) -> bool {
        let name1 = tagset.tag_name(tag1);
        let name2 = tagset.tag_name(tag2);
        if (name1.starts_with("nc") || name1.starts_with('f')) && name2.starts_with('n') {
            if name2.starts_with("nq") || len1 < 4 || len2 < 2 {
                return false;
            }
        }
        self.is_connected(tag1, tag2) && tagset.check_tag_type(type_of_tag2, tag2)
    }
}

fn tag_list(side: &str, tagset: &TagSet, lineno: usize) -> HashSet<TagId> {
    let mut tags = HashSet::new();
    for token in side.split([',', '(', ')']).filter(|t| !t.is_empty()) {
        let mut parts = token.split('-').filter(|p| !p.is_empty());
        let Some(name) = parts.next() else {
            continue;
        };
        if let Some(group) = tagset.tags_of(name) {
            tags.extend(group.iter().copied());
        } else if let Some(id) = tagset.tag_id(name) {
            tags.insert(id);
        } else {
            log::warn!("connection line {}: unknown tag `{name}`", lineno + 1);
        }
        for excluded in parts {
            match tagset.tag_id(excluded) {
                Some(id) => {
                    tags.remove(&id);
                }
                None => log::warn!("connection line {}: unknown tag `{excluded}`", lineno + 1),
            }
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use hannanum_core::tagset::TagSetOptions;

    const TAGS: &str = "TAG\tncn\nTAG\tncpa\nTAG\tnqq\nTAG\tnnc\nTAG\tjxc\nTAG\tjca\nTAG\tpvg\nTAG\tetm\n\
TAG\tiwg\nTAG\tunk\nTAG\tf\n\
TSET\tn\tncn ncpa nqq nnc\nTSET\tj\tjxc jca\n";

    fn tagset() -> TagSet {
        TagSet::from_reader(TAGS.as_bytes(), TagSetOptions::default()).unwrap()
    }

    fn id(ts: &TagSet, name: &str) -> TagId {
        ts.tag_id(name).unwrap()
    }

    #[test]
    fn groups_expand_and_exclusions_apply() {
        let ts = tagset();
        let src = "@title\tconn\nSTART_TAG\tiwg\nCONNECTION\tn-nqq,f*j-jca\n";
        let c = Connection::from_reader(src.as_bytes(), &ts).unwrap();
        assert_eq!(c.metadata.title, "conn");
        assert_eq!(c.start_tag, "iwg");
        assert!(c.is_connected(id(&ts, "ncn"), id(&ts, "jxc")));
        assert!(c.is_connected(id(&ts, "f"), id(&ts, "jxc")));
        assert!(!c.is_connected(id(&ts, "nqq"), id(&ts, "jxc")));
        assert!(!c.is_connected(id(&ts, "ncn"), id(&ts, "jca")));
        assert!(!c.is_connected(id(&ts, "jxc"), id(&ts, "ncn")));
    }

    #[test]
    fn parenthesised_lists() {
        let ts = tagset();
        let src = "CONNECTION\t(pvg)*(etm,jxc)\n";
        let c = Connection::from_reader(src.as_bytes(), &ts).unwrap();
        assert!(c.is_connected(id(&ts, "pvg"), id(&ts, "etm")));
        assert!(c.is_connected(id(&ts, "pvg"), id(&ts, "jxc")));
    }

    #[test]
    fn noun_compound_exception() {
        let ts = tagset();
        let src = "CONNECTION\tn*n\n";
        let c = Connection::from_reader(src.as_bytes(), &ts).unwrap();
        let (ncn, ncpa, nqq) = (id(&ts, "ncn"), id(&ts, "ncpa"), id(&ts, "nqq"));
        assert!(c.check_connection(&ts, ncn, ncpa, 4, 2, TagType::All));
        assert!(!c.check_connection(&ts, ncn, ncpa, 3, 2, TagType::All));
        assert!(!c.check_connection(&ts, ncn, ncpa, 4, 1, TagType::All));
        assert!(!c.check_connection(&ts, ncn, nqq, 6, 6, TagType::All));
        // the exception only concerns common nouns on the left
        assert!(c.check_connection(&ts, nqq, ncn, 1, 1, TagType::All));
    }

    #[test]
    fn missing_star_is_an_error() {
        let ts = tagset();
        let err = Connection::from_reader("CONNECTION\tncn\n".as_bytes(), &ts).unwrap_err();
        assert!(matches!(err, DictError::Parse { line: 1, .. }));
    }
}
