//! Error types for md2anki-core.

use crate::scratch::Section;
use thiserror::Error;

/// Result type alias using ScratchError.
pub type Result<T> = std::result::Result<T, ScratchError>;

/// Errors that can occur while reading back an edited scratch file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScratchError {
    #[error("unexpected text before the first section marker at line {line}")]
    UnexpectedContent { line: usize },

    #[error("{found} marker at line {line}, expected the {expected} marker")]
    MarkerOutOfOrder {
        line: usize,
        found: Section,
        expected: Section,
    },

    #[error("file ends inside the {section} section")]
    UnterminatedSection { section: Section },

    #[error("no card found, the section markers must be left intact")]
    NoCard,
}
