// Mapping KAIST tags onto the coarser levels of the tag hierarchy

use crate::error::TagMappingError;

/// Deepest level of the KAIST tag hierarchy.
pub const MAX_LEVEL: usize = 4;

/// Map a KAIST tag onto the given hierarchy level.
///
/// The tag names are prefix-coded (`ncpa` → `ncp` → `nc` → `n`), so level
/// *n* is the first *n* characters, upper-cased. Level 1 yields the 9
/// top-level classes and level 2 the 22-tag set.
pub fn kaist_tag_on_level(tag: &str, level: usize) -> Result<String, TagMappingError> {
    if tag.is_empty() || !(1..=MAX_LEVEL).contains(&level) {
        return Err(TagMappingError {
            tag: tag.to_string(),
        });
    }
    Ok(tag.chars().take(level).collect::<String>().to_uppercase())
}
