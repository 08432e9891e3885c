// KAIST morpheme tag set: tag ids, named tag groups and irregular classes

use std::io::BufRead;
use std::path::Path;

use hashbrown::HashMap;

use crate::error::CoreError;

/// Integer id of a morpheme tag, assigned in declaration order.
pub type TagId = usize;

/// Conjugation ("phoneme") class of a dictionary entry.
///
/// `0` means regular / unconstrained; irregular classes declared with `IRR`
/// lines are numbered from 1 in declaration order.
pub type Phoneme = u16;

/// Phoneme class that matches every entry.
pub const PHONEME_ALL: Phoneme = 0;

/// Coarse tag categories used to constrain which morpheme may follow another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    All,
    Verbs,
    Nouns,
    Nps,
    Adjs,
    /// Bound nouns and pronouns.
    Nbnp,
    /// Case and auxiliary particles.
    Josa,
    /// Predicates and everything that can carry an ending.
    Yongs,
    Eomies,
    /// Predicative particle.
    Jp,
}

impl TagType {
    pub const COUNT: usize = 10;

    fn index(self) -> usize {
        self as usize
    }
}

/// Header fields shared by the tag set and connection files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub version: String,
    pub copyright: String,
    pub author: String,
    pub date: String,
    pub editor: String,
}

impl Metadata {
    /// Record an `@key<TAB>value` line. Unknown keys are ignored.
    pub fn set(&mut self, key: &str, value: &str) {
        let slot = match key {
            "@title" => &mut self.title,
            "@version" => &mut self.version,
            "@copyright" => &mut self.copyright,
            "@author" => &mut self.author,
            "@date" => &mut self.date,
            "@editor" => &mut self.editor,
            _ => return,
        };
        *slot = value.to_string();
    }
}

/// Options for building the tag-type table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagSetOptions {
    /// Reproduce the historical particle group where every particle tag was
    /// written into the same slot: only `jcc` is registered and the five
    /// remaining slots hold tag id 0.
    pub legacy_josa_slot: bool,
}

/// The loaded tag set.
#[derive(Debug, Clone)]
pub struct TagSet {
    pub metadata: Metadata,
    tags: Vec<String>,
    tag_ids: HashMap<String, TagId>,
    irregulars: Vec<String>,
    groups: HashMap<String, Vec<TagId>>,
    tag_types: Vec<Vec<TagId>>,
    /// Tags of morphemes worth indexing (the `index` group).
    pub index_tags: Vec<TagId>,
    /// Tags an unknown morpheme may receive (the `unkset` group).
    pub unk_tags: Vec<TagId>,
    /// Eojeol boundary tag.
    pub iwg_tag: TagId,
    /// Unknown-word tag.
    pub unk_tag: TagId,
    /// Tag given to numeric literals.
    pub num_tag: TagId,
    pub irr_b: Phoneme,
    pub irr_s: Phoneme,
    pub irr_d: Phoneme,
    pub irr_h: Phoneme,
    /// 르 irregular.
    pub irr_reu: Phoneme,
    /// 러 irregular.
    pub irr_reo: Phoneme,
}

impl TagSet {
    /// Load a tag set file with default options.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        Self::load_with(path, TagSetOptions::default())
    }

    /// Load a tag set file.
    pub fn load_with(path: impl AsRef<Path>, options: TagSetOptions) -> Result<Self, CoreError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(std::io::BufReader::new(file), options)
    }

    /// Parse a tag set from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R, options: TagSetOptions) -> Result<Self, CoreError> {
        let mut metadata = Metadata::default();
        let mut tags: Vec<String> = Vec::new();
        let mut tag_ids: HashMap<String, TagId> = HashMap::new();
        let mut irregulars: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<TagId>> = HashMap::new();

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let mut fields = line.split('\t').filter(|f| !f.is_empty());
            let Some(head) = fields.next() else {
                continue;
            };
            let value = fields.next();
            if head.starts_with('@') {
                metadata.set(head, value.unwrap_or(""));
                continue;
            }
            match head {
                "TAG" => {
                    let name = value.ok_or_else(|| missing_field(lineno, "TAG"))?;
                    if !tag_ids.contains_key(name) {
                        tag_ids.insert(name.to_string(), tags.len());
                        tags.push(name.to_string());
                    }
                }
                "TSET" => {
                    let name = value.ok_or_else(|| missing_field(lineno, "TSET"))?;
                    let members = fields.next().unwrap_or("");
                    let mut ids = Vec::new();
                    for token in members.split(' ').filter(|t| !t.is_empty()) {
                        if let Some(&id) = tag_ids.get(token) {
                            ids.push(id);
                        } else if let Some(group) = groups.get(token) {
                            ids.extend_from_slice(group);
                        } else {
                            log::warn!("tag set line {}: unknown tag `{token}` in group `{name}`", lineno + 1);
                        }
                    }
                    groups.insert(name.to_string(), ids);
                }
                "IRR" => {
                    let name = value.ok_or_else(|| missing_field(lineno, "IRR"))?;
                    irregulars.push(name.to_string());
                }
                _ => {}
            }
        }

        let required = |name: &str| -> Result<TagId, CoreError> {
            tag_ids
                .get(name)
                .copied()
                .ok_or_else(|| CoreError::MissingTag(name.to_string()))
        };
        let iwg_tag = required("iwg")?;
        let unk_tag = required("unk")?;
        let num_tag = required("nnc")?;

        let irregular = |name: &str| -> Phoneme {
            irregulars
                .iter()
                .position(|irr| irr == name)
                .map(|i| (i + 1) as Phoneme)
                .unwrap_or(PHONEME_ALL)
        };

        let mut set = TagSet {
            metadata,
            index_tags: groups.get("index").cloned().unwrap_or_default(),
            unk_tags: groups.get("unkset").cloned().unwrap_or_default(),
            iwg_tag,
            unk_tag,
            num_tag,
            irr_b: irregular("irrb"),
            irr_s: irregular("irrs"),
            irr_d: irregular("irrd"),
            irr_h: irregular("irrh"),
            irr_reu: irregular("irrlu"),
            irr_reo: irregular("irrle"),
            tags,
            tag_ids,
            irregulars,
            groups,
            tag_types: vec![Vec::new(); TagType::COUNT],
        };
        set.build_tag_types(options);
        log::debug!(
            "tag set loaded: {} tags, {} groups, {} irregular classes",
            set.tags.len(),
            set.groups.len(),
            set.irregulars.len()
        );
        Ok(set)
    }

    fn build_tag_types(&mut self, options: TagSetOptions) {
        let verbs = [self.group("pv"), self.group("xsm"), self.single("px")].concat();
        let yongs = [
            self.group("p"),
            self.group("xsv"),
            self.group("xsm"),
            self.single("ep"),
            self.single("jp"),
        ]
        .concat();
        let nbnp = [self.single("nbn"), self.single("npd"), self.single("npp")].concat();
        let josa = if options.legacy_josa_slot {
            let mut slots = vec![0; 6];
            if let Some(&jcc) = self.tag_ids.get("jcc") {
                slots[0] = jcc;
            }
            slots
        } else {
            ["jxc", "jco", "jca", "jcm", "jcs", "jcc"]
                .iter()
                .flat_map(|t| self.single(t))
                .collect()
        };

        self.tag_types[TagType::Verbs.index()] = verbs;
        self.tag_types[TagType::Nouns.index()] = self.group("n");
        self.tag_types[TagType::Nps.index()] = self.group("np");
        self.tag_types[TagType::Adjs.index()] = self.group("pa");
        self.tag_types[TagType::Nbnp.index()] = nbnp;
        self.tag_types[TagType::Josa.index()] = josa;
        self.tag_types[TagType::Yongs.index()] = yongs;
        self.tag_types[TagType::Eomies.index()] = self.group("e");
        self.tag_types[TagType::Jp.index()] = self.single("jp");
    }

    fn group(&self, name: &str) -> Vec<TagId> {
        match self.groups.get(name) {
            Some(ids) => ids.clone(),
            None => {
                log::warn!("tag set has no `{name}` group; treating it as empty");
                Vec::new()
            }
        }
    }

    fn single(&self, name: &str) -> Vec<TagId> {
        match self.tag_ids.get(name) {
            Some(&id) => vec![id],
            None => {
                log::warn!("tag set has no `{name}` tag");
                Vec::new()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Whether `tag` belongs to the category `tag_type`. `All` admits every tag.
    pub fn check_tag_type(&self, tag_type: TagType, tag: TagId) -> bool {
        tag_type == TagType::All || self.tag_types[tag_type.index()].contains(&tag)
    }

    /// Whether an entry of class `phoneme` satisfies the requested class.
    pub fn check_phoneme_type(&self, phoneme_type: Phoneme, phoneme: Phoneme) -> bool {
        phoneme_type == PHONEME_ALL || phoneme_type == phoneme
    }

    /// Members of a tag category.
    pub fn tag_type_members(&self, tag_type: TagType) -> &[TagId] {
        &self.tag_types[tag_type.index()]
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn tag_id(&self, name: &str) -> Option<TagId> {
        self.tag_ids.get(name).copied()
    }

    /// Name of a tag id. Out-of-range ids yield an empty string.
    pub fn tag_name(&self, id: TagId) -> &str {
        self.tags.get(id).map(String::as_str).unwrap_or("")
    }

    /// Tags of a named `TSET` group.
    pub fn tags_of(&self, group: &str) -> Option<&[TagId]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Phoneme class id of an irregular class name.
    pub fn irregular_id(&self, name: &str) -> Option<Phoneme> {
        self.irregulars
            .iter()
            .position(|irr| irr == name)
            .map(|i| (i + 1) as Phoneme)
    }

    /// Name of an irregular class; `None` for [`PHONEME_ALL`] or unknown ids.
    pub fn irregular_name(&self, phoneme: Phoneme) -> Option<&str> {
        if phoneme == PHONEME_ALL {
            return None;
        }
        self.irregulars
            .get(phoneme as usize - 1)
            .map(String::as_str)
    }
}

fn missing_field(lineno: usize, kind: &str) -> CoreError {
    CoreError::Parse {
        line: lineno + 1,
        message: format!("`{kind}` line without a name"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "@title\tsample\n\
TAG\tncn\nTAG\tnpp\nTAG\tnbn\nTAG\tnpd\nTAG\tnnc\n\
TAG\tpvg\nTAG\tpaa\nTAG\tpx\nTAG\txsm\nTAG\txsv\nTAG\tep\nTAG\tjp\n\
TAG\tjxc\nTAG\tjco\nTAG\tjca\nTAG\tjcm\nTAG\tjcs\nTAG\tjcc\n\
TAG\tecs\nTAG\tef\nTAG\tetm\nTAG\tiwg\nTAG\tunk\n\
TSET\tnc\tncn\nTSET\tnp\tnpp npd\nTSET\tn\tnc np nbn nnc\n\
TSET\tpv\tpvg\nTSET\tpa\tpaa\nTSET\tp\tpv pa px\n\
TSET\txsm\txsm\nTSET\txsv\txsv\nTSET\te\tecs ef etm\n\
TSET\tindex\tncn\nTSET\tunkset\tncn\n\
IRR\tirrb\nIRR\tirrs\nIRR\tirrd\nIRR\tirrh\nIRR\tirrlu\nIRR\tirrle\n";

    fn sample(options: TagSetOptions) -> TagSet {
        TagSet::from_reader(SAMPLE.as_bytes(), options).unwrap()
    }

    #[test]
    fn tags_are_numbered_in_order() {
        let ts = sample(TagSetOptions::default());
        assert_eq!(ts.tag_id("ncn"), Some(0));
        assert_eq!(ts.tag_name(1), "npp");
        assert_eq!(ts.metadata.title, "sample");
        assert_eq!(ts.iwg_tag, ts.tag_id("iwg").unwrap());
    }

    #[test]
    fn groups_expand_nested_groups() {
        let ts = sample(TagSetOptions::default());
        let n = ts.tags_of("n").unwrap();
        for tag in ["ncn", "npp", "npd", "nbn", "nnc"] {
            assert!(n.contains(&ts.tag_id(tag).unwrap()), "{tag}");
        }
    }

    #[test]
    fn tag_type_membership() {
        let ts = sample(TagSetOptions::default());
        let pvg = ts.tag_id("pvg").unwrap();
        let ecs = ts.tag_id("ecs").unwrap();
        assert!(ts.check_tag_type(TagType::All, ecs));
        assert!(ts.check_tag_type(TagType::Yongs, pvg));
        assert!(ts.check_tag_type(TagType::Verbs, ts.tag_id("px").unwrap()));
        assert!(!ts.check_tag_type(TagType::Yongs, ecs));
        assert!(ts.check_tag_type(TagType::Eomies, ecs));
        assert!(ts.check_tag_type(TagType::Nbnp, ts.tag_id("npp").unwrap()));
    }

    #[test]
    fn josa_group_holds_every_particle() {
        let ts = sample(TagSetOptions::default());
        for tag in ["jxc", "jco", "jca", "jcm", "jcs", "jcc"] {
            assert!(ts.check_tag_type(TagType::Josa, ts.tag_id(tag).unwrap()), "{tag}");
        }
        assert!(!ts.check_tag_type(TagType::Josa, 0));
    }

    #[test]
    fn legacy_josa_slot_registers_only_jcc() {
        let ts = sample(TagSetOptions { legacy_josa_slot: true });
        assert!(ts.check_tag_type(TagType::Josa, ts.tag_id("jcc").unwrap()));
        assert!(!ts.check_tag_type(TagType::Josa, ts.tag_id("jxc").unwrap()));
        // the empty slots hold id 0
        assert!(ts.check_tag_type(TagType::Josa, 0));
    }

    #[test]
    fn irregular_classes_start_at_one() {
        let ts = sample(TagSetOptions::default());
        assert_eq!(ts.irr_b, 1);
        assert_eq!(ts.irr_reo, 6);
        assert_eq!(ts.irregular_name(ts.irr_h), Some("irrh"));
        assert_eq!(ts.irregular_name(PHONEME_ALL), None);
        assert!(ts.check_phoneme_type(PHONEME_ALL, ts.irr_b));
        assert!(!ts.check_phoneme_type(ts.irr_s, ts.irr_b));
    }

    #[test]
    fn missing_boundary_tag_is_an_error() {
        let err = TagSet::from_reader("TAG\tncn\n".as_bytes(), TagSetOptions::default());
        assert!(matches!(err, Err(CoreError::MissingTag(t)) if t == "iwg"));
    }
}
