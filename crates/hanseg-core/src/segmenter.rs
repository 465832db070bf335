//! # Tag-to-Token Segmentation
//!
//! Turns a decoded BMES sequence back into word tokens borrowed from the input.

use std::iter::Zip;
use std::str::CharIndices;

use crate::error::{HansegError, Result};
use crate::tag::Tag;

/// Split `text` into words according to `tags`.
///
/// # Errors
/// Returns [`HansegError::TagAlignment`] unless there is exactly one tag per character.
///
/// # Examples
/// ```
/// use hanseg_core::segmenter::segment;
/// use hanseg_core::Tag;
///
/// let tags = [Tag::Begin, Tag::End, Tag::Single];
/// let words: Vec<&str> = segment("中国人", &tags).unwrap().collect();
/// assert_eq!(words, vec!["中国", "人"]);
/// ```
pub fn segment<'a, 't>(text: &'a str, tags: &'t [Tag]) -> Result<Segments<'a, 't>> {
    let chars = text.chars().count();
    if chars != tags.len() {
        return Err(HansegError::TagAlignment {
            chars,
            tags: tags.len(),
        });
    }
    Ok(Segments {
        text,
        cursor: text.char_indices().zip(tags.iter()),
        begin: 0,
        next: 0,
        finished: false,
    })
}

/// Lazy iterator over the words of a tagged text.
///
/// Cloning restarts from the current position, so a fresh clone taken before
/// iteration replays the whole segmentation.
#[derive(Debug, Clone)]
pub struct Segments<'a, 't> {
    text: &'a str,
    cursor: Zip<CharIndices<'a>, std::slice::Iter<'t, Tag>>,
    /// Byte offset where the open word started.
    begin: usize,
    /// Byte offset one past the last emitted word.
    next: usize,
    finished: bool,
}

impl<'a> Iterator for Segments<'a, '_> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.finished {
            return None;
        }

        let text = self.text;
        for ((offset, ch), tag) in self.cursor.by_ref() {
            let end = offset + ch.len_utf8();
            match tag {
                Tag::Begin => self.begin = offset,
                Tag::Middle => {}
                Tag::End => {
                    self.next = end;
                    return Some(&text[self.begin..end]);
                }
                Tag::Single => {
                    self.next = end;
                    return Some(&text[offset..end]);
                }
            }
        }

        self.finished = true;
        // Unterminated B/M run at the end of the text.
        if self.next < text.len() {
            let rest = &text[self.next..];
            self.next = text.len();
            return Some(rest);
        }
        None
    }
}

impl std::iter::FusedIterator for Segments<'_, '_> {}
