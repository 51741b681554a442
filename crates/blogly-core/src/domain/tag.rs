use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::required;
use crate::error::DomainError;

/// Tag entity. Names are stored lower-cased, which makes them unique
/// regardless of the case they were typed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

impl Tag {
    pub fn normalize_name(name: &str) -> Result<String, DomainError> {
        Ok(required("tag name", name)?.to_lowercase())
    }
}

/// Join-table changes needed to move a post from one tag set to another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDiff {
    pub added: Vec<i32>,
    pub removed: Vec<i32>,
}

impl TagDiff {
    /// Compare the associations a post has with the ones it should have.
    /// Only the difference is returned, so untouched rows are never rewritten.
    pub fn between(current: &[i32], desired: &[i32]) -> Self {
        let current: BTreeSet<i32> = current.iter().copied().collect();
        let desired: BTreeSet<i32> = desired.iter().copied().collect();

        Self {
            added: desired.difference(&current).copied().collect(),
            removed: current.difference(&desired).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(Tag::normalize_name("Music").unwrap(), "music");
        assert_eq!(Tag::normalize_name("  ROCK ").unwrap(), "rock");
        assert!(Tag::normalize_name("").is_err());
    }

    #[test]
    fn test_diff_adds_and_removes() {
        let diff = TagDiff::between(&[1, 2, 3], &[3, 4]);
        assert_eq!(diff.added, vec![4]);
        assert_eq!(diff.removed, vec![1, 2]);
    }

    #[test]
    fn test_diff_of_same_set_is_empty() {
        assert!(TagDiff::between(&[2, 1], &[1, 2, 2]).is_empty());
    }
}
