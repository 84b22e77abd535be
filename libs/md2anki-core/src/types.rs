//! Core types for md2anki.

use std::fmt;

/// A flashcard built from one toggle block.
///
/// Fields are raw bytes taken from the page; tags keep the order of the
/// heading stack at the toggle's position (outermost heading first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    pub front: Vec<u8>,
    pub back: Vec<u8>,
    pub tags: Vec<Vec<u8>>,
}

impl Card {
    pub fn new(front: impl Into<Vec<u8>>, back: impl Into<Vec<u8>>, tags: Vec<Vec<u8>>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            tags,
        }
    }

    /// Tags joined by single spaces, the form Anki expects in its tag column.
    pub fn joined_tags(&self) -> Vec<u8> {
        self.tags.join(&b' ')
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Card{{front: {}, back: {:?}, tags: {}}}",
            String::from_utf8_lossy(&self.front),
            String::from_utf8_lossy(&self.back),
            String::from_utf8_lossy(&self.joined_tags()),
        )
    }
}
