//! # BMES Tags for Word Segmentation
//!
//! Defines the hidden-state alphabet of the segmentation HMM. Every character
//! of a sentence is tagged with its position inside the word it belongs to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Position of a character inside its word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tag {
    /// First character of a multi-character word.
    Begin,
    /// Interior character of a word of three or more characters.
    Middle,
    /// Last character of a multi-character word.
    End,
    /// A word made of exactly one character.
    Single,
}

impl Tag {
    /// Total number of distinct tags.
    pub const NUM_TAGS: usize = 4;

    /// All tags in their fixed iteration order.
    pub const ALL: [Tag; Tag::NUM_TAGS] = [Tag::Begin, Tag::Middle, Tag::End, Tag::Single];

    /// Get all possible tags in order.
    pub fn all_tags() -> &'static [Tag] {
        &Self::ALL
    }

    /// Get the table index of this tag.
    pub fn index(&self) -> usize {
        match self {
            Tag::Begin => 0,
            Tag::Middle => 1,
            Tag::End => 2,
            Tag::Single => 3,
        }
    }

    /// Get tag from index.
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// One-letter code used in tag strings.
    pub fn as_char(&self) -> char {
        match self {
            Tag::Begin => 'B',
            Tag::Middle => 'M',
            Tag::End => 'E',
            Tag::Single => 'S',
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Tag::Begin),
            "M" => Ok(Tag::Middle),
            "E" => Ok(Tag::End),
            "S" => Ok(Tag::Single),
            other => Err(format!("unknown tag {other:?}")),
        }
    }
}

/// Tags for a word of `word_len` characters.
///
/// # Panics
/// Panics if `word_len` is zero. Callers must never label an empty word.
///
/// # Examples
/// ```
/// use hanseg_core::tag::{label, Tag};
///
/// assert_eq!(label(1), vec![Tag::Single]);
/// assert_eq!(label(3), vec![Tag::Begin, Tag::Middle, Tag::End]);
/// ```
pub fn label(word_len: usize) -> Vec<Tag> {
    let mut tags = Vec::with_capacity(word_len);
    label_into(&mut tags, word_len);
    tags
}

/// Append the tags for a word of `word_len` characters to `tags`.
///
/// # Panics
/// Panics if `word_len` is zero.
pub fn label_into(tags: &mut Vec<Tag>, word_len: usize) {
    assert!(word_len > 0, "cannot label an empty word");
    if word_len == 1 {
        tags.push(Tag::Single);
        return;
    }
    tags.push(Tag::Begin);
    tags.extend(std::iter::repeat_n(Tag::Middle, word_len - 2));
    tags.push(Tag::End);
}

/// Render a tag sequence as a `BMES` string.
pub fn tags_to_string(tags: &[Tag]) -> String {
    tags.iter().map(Tag::as_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_index_roundtrip() {
        for tag in Tag::all_tags() {
            let idx = tag.index();
            let recovered = Tag::from_index(idx).unwrap();
            assert_eq!(*tag, recovered);
        }
        assert_eq!(Tag::from_index(Tag::NUM_TAGS), None);
    }

    #[test]
    fn test_display_and_parse() {
        for tag in Tag::all_tags() {
            let parsed: Tag = tag.to_string().parse().unwrap();
            assert_eq!(parsed, *tag);
        }
        assert!("X".parse::<Tag>().is_err());
    }

    #[test]
    fn test_label_single() {
        assert_eq!(label(1), vec![Tag::Single]);
    }

    #[test]
    fn test_label_two() {
        assert_eq!(label(2), vec![Tag::Begin, Tag::End]);
    }

    #[test]
    fn test_label_four() {
        assert_eq!(
            label(4),
            vec![Tag::Begin, Tag::Middle, Tag::Middle, Tag::End]
        );
    }

    #[test]
    #[should_panic(expected = "empty word")]
    fn test_label_zero_panics() {
        label(0);
    }

    #[test]
    fn test_label_into_appends() {
        let mut tags = vec![Tag::Single];
        label_into(&mut tags, 2);
        assert_eq!(tags_to_string(&tags), "SBE");
    }
}
