//! Text rewrites applied to cards before they are edited.

use crate::types::Card;
use regex::bytes::Regex;
use std::sync::OnceLock;

const DISPLAY_MATH_PATTERN: &str = r"\$\$(.+?)\$\$";
const DISPLAY_MATH_REPLACEMENT: &[u8] = br"\[${1}\]";

const INLINE_MATH_PATTERN: &str = r"\$(.+?)\$";
const INLINE_MATH_REPLACEMENT: &[u8] = br"\(${1}\)";

/// `![dir/file](...)`, split into the directory and the file name.
const MEDIA_PATTERN: &str = r"!\[(.+)/(.+)\]\(.+\)";
const MEDIA_REPLACEMENT: &[u8] = br#"<img src="${1}_${2}">"#;

fn display_math_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DISPLAY_MATH_PATTERN).expect("display math pattern is valid"))
}

fn inline_math_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(INLINE_MATH_PATTERN).expect("inline math pattern is valid"))
}

fn media_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MEDIA_PATTERN).expect("media pattern is valid"))
}

/// A rewrite of a card's front and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// `$$x$$` to `\[x\]` and `$x$` to `\(x\)`.
    MathJax,
    /// `![dir/file](...)` to `<img src="dir_file">`, the name Anki's media
    /// folder holds after the file is moved there.
    Media,
}

impl Mutation {
    pub fn apply(self, card: &mut Card) {
        card.front = self.rewrite(&card.front);
        card.back = self.rewrite(&card.back);
    }

    fn rewrite(self, text: &[u8]) -> Vec<u8> {
        match self {
            Self::MathJax => {
                let display = display_math_regex().replace_all(text, DISPLAY_MATH_REPLACEMENT);
                inline_math_regex()
                    .replace_all(&display, INLINE_MATH_REPLACEMENT)
                    .into_owned()
            }
            Self::Media => media_regex().replace_all(text, MEDIA_REPLACEMENT).into_owned(),
        }
    }
}

/// Apply mutations in order.
pub fn apply_all(mutations: &[Mutation], card: &mut Card) {
    for mutation in mutations {
        mutation.apply(card);
    }
}

/// A media file referenced by a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    pub dir: String,
    pub file: String,
}

impl MediaRef {
    /// Name of the file in the media folder, matching the rewritten `src`.
    pub fn flat_name(&self) -> String {
        format!("{}_{}", self.dir, self.file)
    }
}

/// Media references in `text`, in order of appearance.
pub fn media_references(text: &[u8]) -> Vec<MediaRef> {
    media_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let dir = caps.get(1)?.as_bytes();
            let file = caps.get(2)?.as_bytes();
            Some(MediaRef {
                dir: String::from_utf8_lossy(dir).into_owned(),
                file: String::from_utf8_lossy(file).into_owned(),
            })
        })
        .collect()
}
