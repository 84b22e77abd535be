//! Heading tags and the stack of headings active at a page position.

/// Deepest heading level that becomes a tag.
pub const MAX_DEPTH: usize = 3;

/// A tag derived from a heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// 1, 2 or 3 for `#`, `##` and `###`.
    pub level: u8,
    /// Heading text without spaces or quotes, which Anki does not allow in tags.
    pub name: Vec<u8>,
}

impl Tag {
    pub fn new(level: u8, name: impl Into<Vec<u8>>) -> Self {
        Self {
            level,
            name: name.into(),
        }
    }

    /// Build a tag from a heading line such as `## Some heading`.
    ///
    /// Returns `None` when the line has no leading `#` or no text after it.
    pub fn from_heading(line: &[u8]) -> Option<Self> {
        let markers = line.iter().take_while(|&&b| b == b'#').count();
        if markers == 0 {
            return None;
        }
        let level = u8::try_from(markers).ok()?;

        let text = line[markers..].trim_ascii();
        if text.is_empty() {
            return None;
        }

        let name = text
            .iter()
            .filter(|&&b| b != b'"')
            .map(|&b| if b.is_ascii_whitespace() { b'_' } else { b })
            .collect();

        Some(Self { level, name })
    }
}

/// The innermost heading at each level seen so far.
///
/// A heading of level L ends the scope of every active heading at level L or
/// deeper; shallower headings stay active.
#[derive(Debug, Clone, Default)]
pub struct TagStack {
    tags: Vec<Tag>,
}

impl TagStack {
    pub fn new() -> Self {
        Self {
            tags: Vec::with_capacity(MAX_DEPTH),
        }
    }

    pub fn push(&mut self, tag: Tag) {
        match self.tags.iter().position(|t| t.level >= tag.level) {
            Some(i) => self.tags.truncate(i),
            // Only reachable with levels beyond MAX_DEPTH.
            None if self.tags.len() == MAX_DEPTH => {
                self.tags.pop();
            }
            None => {}
        }
        self.tags.push(tag);
    }

    /// Current tag names, outermost heading first.
    pub fn snapshot(&self) -> Vec<Vec<u8>> {
        self.tags.iter().map(|t| t.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
