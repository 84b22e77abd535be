//! Locating headings and toggle blocks in an exported page.
//!
//! # Format
//! ```markdown
//! # Page title
//!
//! ## Section
//!
//! - How to quit
//!
//! 	press q
//!
//! ```
//!
//! The first heading is the page title. Every later heading up to level 3
//! scopes the toggles that follow it. A toggle is a `- ` line, a blank line,
//! and a body indented by one tab or four spaces, closed by a blank line.
//! Nested toggles are not recognised; they stay part of the parent's body.

use crate::tags::Tag;
use regex::bytes::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Heading line, optionally indented. Group 1 is the heading without
/// indentation or line terminator.
const HEADING_PATTERN: &str = r"(?m)^[ \t]*(#{1,3}[ \t][^\n]+)\n";

/// Toggle block. Group 1 is the head text, group 2 the indented body up to the
/// last line the greedy repetition can take while leaving a closing blank line.
/// Lines holding only spaces or tabs count as blank.
const TOGGLE_PATTERN: &str = r"(?m)^- ([^\n]+)\n\n((?:[ \t]*\n)*(?:\t| {4})[^\n]+\n(?:(?:\t| {4})[^\n]+\n|[ \t]*\n)*)[ \t]*\n";

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HEADING_PATTERN).expect("heading pattern is valid"))
}

fn toggle_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TOGGLE_PATTERN).expect("toggle pattern is valid"))
}

/// Byte range of one heading line, `#` markers included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingRange {
    pub start: usize,
    pub end: usize,
}

impl HeadingRange {
    pub fn text<'a>(&self, raw: &'a [u8]) -> &'a [u8] {
        &raw[self.start..self.end]
    }
}

/// Byte ranges of one toggle: its head text and its still-indented body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleRange {
    pub front_start: usize,
    pub front_end: usize,
    pub body_start: usize,
    pub body_end: usize,
}

impl ToggleRange {
    pub fn front<'a>(&self, raw: &'a [u8]) -> &'a [u8] {
        &raw[self.front_start..self.front_end]
    }

    pub fn body<'a>(&self, raw: &'a [u8]) -> &'a [u8] {
        &raw[self.body_start..self.body_end]
    }
}

/// All heading lines of level 1 to 3 after the page title, in page order.
pub fn find_headings(raw: &[u8]) -> impl Iterator<Item = HeadingRange> + '_ {
    heading_regex()
        .captures_iter(raw)
        .skip(1)
        .filter_map(|caps| caps.get(1))
        .map(|m| HeadingRange {
            start: m.start(),
            end: m.end(),
        })
}

/// All toggle blocks in page order.
pub fn find_toggles(raw: &[u8]) -> impl Iterator<Item = ToggleRange> + '_ {
    toggle_regex().captures_iter(raw).filter_map(|caps| {
        let front = caps.get(1)?;
        let body = caps.get(2)?;
        Some(ToggleRange {
            front_start: front.start(),
            front_end: front.end(),
            body_start: body.start(),
            body_end: body.end(),
        })
    })
}

/// Remove one level of indentation (a tab or four spaces) from every line.
pub fn strip_indent(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len());
    for line in body.split_inclusive(|&b| b == b'\n') {
        let line = line
            .strip_prefix(b"\t")
            .or_else(|| line.strip_prefix(b"    "))
            .unwrap_or(line);
        out.extend_from_slice(line);
    }
    out
}

/// Deck name from the page title heading, if the page has one.
pub fn deck_title(raw: &[u8]) -> Option<String> {
    let caps = heading_regex().captures(raw)?;
    let tag = Tag::from_heading(caps.get(1)?.as_bytes())?;
    Some(sanitize(&String::from_utf8_lossy(&tag.name)))
}

/// Deck name from an export file name such as `Vim Basics 4f2a9c.md`.
///
/// The trailing page id is dropped when present.
pub fn deck_name_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let title = match stem.trim().rsplit_once(' ') {
        Some((title, _id)) if !title.trim().is_empty() => title.trim().to_string(),
        _ => stem.trim().to_string(),
    };

    let name = sanitize(&title);
    if name.is_empty() {
        "deck".to_string()
    } else {
        name
    }
}

fn sanitize(name: &str) -> String {
    name.replace([' ', '/', '\\'], "_")
}
