//! Scratch file protocol for the human editing round trip.
//!
//! # Format
//! ```text
//! ~~~~~Front~~~~~
//! How to quit
//! ~~~~~Back~~~~~
//! press q
//! ~~~~~Tags~~~~~
//! vim
//! ```
//!
//! The three sections may be repeated to split one card into several. A file
//! starting with `skip` (any case) drops the card.

use crate::error::{Result, ScratchError};
use crate::types::Card;
use std::fmt;

pub const FRONT_MARKER: &[u8] = b"~~~~~Front~~~~~";
pub const BACK_MARKER: &[u8] = b"~~~~~Back~~~~~";
pub const TAGS_MARKER: &[u8] = b"~~~~~Tags~~~~~";

/// File content starting with this token, in any letter case, skips the card.
pub const SKIP_TOKEN: &[u8] = b"skip";

/// A section of a card in the scratch file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Front,
    Back,
    Tags,
}

impl Section {
    pub fn marker(self) -> &'static [u8] {
        match self {
            Self::Front => FRONT_MARKER,
            Self::Back => BACK_MARKER,
            Self::Tags => TAGS_MARKER,
        }
    }

    /// The section whose marker must come after this one.
    fn next(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Tags,
            Self::Tags => Self::Front,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::Tags => "tags",
        })
    }
}

/// What the user made of one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// One or more cards, in file order.
    Edited(Vec<Card>),
    Skipped,
}

impl EditOutcome {
    pub fn into_cards(self) -> Vec<Card> {
        match self {
            Self::Edited(cards) => cards,
            Self::Skipped => Vec::new(),
        }
    }
}

/// Write a card in scratch file form.
pub fn serialize(card: &Card) -> Vec<u8> {
    let tags_len: usize = card.tags.iter().map(|t| t.len() + 1).sum();
    let mut buf = Vec::with_capacity(
        FRONT_MARKER.len() + BACK_MARKER.len() + TAGS_MARKER.len()
            + card.front.len()
            + card.back.len()
            + tags_len
            + 5,
    );

    write_line(&mut buf, FRONT_MARKER);
    write_line(&mut buf, &card.front);
    write_line(&mut buf, BACK_MARKER);
    buf.extend_from_slice(&card.back);
    if !card.back.is_empty() && !card.back.ends_with(b"\n") {
        buf.push(b'\n');
    }
    write_line(&mut buf, TAGS_MARKER);
    for tag in &card.tags {
        write_line(&mut buf, tag);
    }
    buf
}

fn write_line(buf: &mut Vec<u8>, line: &[u8]) {
    buf.extend_from_slice(line);
    buf.push(b'\n');
}

/// Whether the file content asks to drop the card.
///
/// Content shorter than the skip token counts as a skip, so an emptied file
/// drops the card too.
pub fn is_skip(raw: &[u8]) -> bool {
    raw.len() < SKIP_TOKEN.len() || raw[..SKIP_TOKEN.len()].eq_ignore_ascii_case(SKIP_TOKEN)
}

/// Read an edited scratch file back into cards.
pub fn deserialize(raw: &[u8]) -> Result<EditOutcome> {
    if is_skip(raw) {
        return Ok(EditOutcome::Skipped);
    }

    let mut parser = Parser::new();
    for (idx, line) in raw.split_inclusive(|&b| b == b'\n').enumerate() {
        parser.process_line(line, idx + 1)?;
    }
    parser.finalize().map(EditOutcome::Edited)
}

#[derive(Default)]
struct CardBuilder {
    front: Vec<u8>,
    back: Vec<u8>,
    tags: Vec<u8>,
}

impl CardBuilder {
    fn section_mut(&mut self, section: Section) -> &mut Vec<u8> {
        match section {
            Section::Front => &mut self.front,
            Section::Back => &mut self.back,
            Section::Tags => &mut self.tags,
        }
    }

    fn build(self) -> Card {
        let front = strip_line_end(&self.front).to_vec();
        let tags = self
            .tags
            .split(|&b| b == b'\n')
            .map(|t| t.trim_ascii())
            .filter(|t| !t.is_empty())
            .map(<[u8]>::to_vec)
            .collect();

        Card {
            front,
            back: self.back,
            tags,
        }
    }
}

fn strip_line_end(text: &[u8]) -> &[u8] {
    let text = text.strip_suffix(b"\n").unwrap_or(text);
    text.strip_suffix(b"\r").unwrap_or(text)
}

struct Parser {
    current: Option<CardBuilder>,
    section: Option<Section>,
    cards: Vec<Card>,
}

impl Parser {
    fn new() -> Self {
        Self {
            current: None,
            section: None,
            cards: Vec::new(),
        }
    }

    fn process_line(&mut self, line: &[u8], line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Marker(found) => self.handle_marker(found, line_num),
            LineType::Text => self.handle_text(line, line_num),
        }
    }

    fn parse_line(line: &[u8]) -> LineType {
        let content = strip_line_end(line);
        [Section::Front, Section::Back, Section::Tags]
            .into_iter()
            .find(|s| s.marker() == content)
            .map_or(LineType::Text, LineType::Marker)
    }

    fn handle_marker(&mut self, found: Section, line_num: usize) -> Result<()> {
        let expected = self.section.map_or(Section::Front, Section::next);
        if found != expected {
            return Err(ScratchError::MarkerOutOfOrder {
                line: line_num,
                found,
                expected,
            });
        }

        if found == Section::Front {
            if let Some(card) = self.current.take() {
                self.cards.push(card.build());
            }
            self.current = Some(CardBuilder::default());
        }
        self.section = Some(found);
        Ok(())
    }

    fn handle_text(&mut self, line: &[u8], line_num: usize) -> Result<()> {
        match (self.section, self.current.as_mut()) {
            (Some(section), Some(card)) => {
                card.section_mut(section).extend_from_slice(line);
                Ok(())
            }
            _ if line.trim_ascii().is_empty() => Ok(()),
            _ => Err(ScratchError::UnexpectedContent { line: line_num }),
        }
    }

    fn finalize(mut self) -> Result<Vec<Card>> {
        match self.section {
            None => Err(ScratchError::NoCard),
            Some(Section::Tags) => {
                if let Some(card) = self.current.take() {
                    self.cards.push(card.build());
                }
                Ok(self.cards)
            }
            Some(section) => Err(ScratchError::UnterminatedSection { section }),
        }
    }
}

enum LineType {
    Marker(Section),
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn card(front: &str, back: &str, tags: &[&str]) -> Card {
        Card::new(
            front,
            back,
            tags.iter().map(|t| t.as_bytes().to_vec()).collect(),
        )
    }

    fn cards(raw: &str) -> Vec<Card> {
        match deserialize(raw.as_bytes()).unwrap() {
            EditOutcome::Edited(cards) => cards,
            EditOutcome::Skipped => panic!("unexpected skip"),
        }
    }

    #[test]
    fn serialize_layout() {
        let c = card("How to quit", "press q\n", &["vim", "basics"]);
        assert_eq!(
            String::from_utf8(serialize(&c)).unwrap(),
            "~~~~~Front~~~~~\nHow to quit\n~~~~~Back~~~~~\npress q\n~~~~~Tags~~~~~\nvim\nbasics\n"
        );
    }

    #[test]
    fn serialize_terminates_back_without_newline() {
        let c = card("q", "a", &[]);
        assert_eq!(
            String::from_utf8(serialize(&c)).unwrap(),
            "~~~~~Front~~~~~\nq\n~~~~~Back~~~~~\na\n~~~~~Tags~~~~~\n"
        );
    }

    #[test]
    fn round_trip_is_identity() {
        let originals = [
            card("How to quit", "press q\n", &["vim"]),
            card("Multi", "line one\n\n    indented\nline three\n", &["a", "b", "a"]),
            card("No tags", "x\n", &[]),
            card("Empty back", "", &["t"]),
        ];
        for original in originals {
            let outcome = deserialize(&serialize(&original)).unwrap();
            assert_eq!(outcome, EditOutcome::Edited(vec![original]));
        }
    }

    #[test]
    fn skip_in_any_case() {
        for raw in ["skip", "SKIP", "Skip\n", "sKiP this card\n~~~~~Front~~~~~\n"] {
            assert_eq!(deserialize(raw.as_bytes()).unwrap(), EditOutcome::Skipped);
        }
    }

    #[test]
    fn short_content_is_skip() {
        assert_eq!(deserialize(b"").unwrap(), EditOutcome::Skipped);
        assert_eq!(deserialize(b"ab\n").unwrap(), EditOutcome::Skipped);
    }

    #[test]
    fn repeated_sections_split_the_card() {
        let raw = "~~~~~Front~~~~~\nQ1\n~~~~~Back~~~~~\nA1\n~~~~~Tags~~~~~\nt1\n\
                   ~~~~~Front~~~~~\nQ2\n~~~~~Back~~~~~\nA2\n~~~~~Tags~~~~~\nt2\nt3\n";
        assert_eq!(
            cards(raw),
            vec![card("Q1", "A1\n", &["t1"]), card("Q2", "A2\n", &["t2", "t3"])]
        );
    }

    #[test]
    fn empty_tag_lines_are_dropped() {
        let raw = "~~~~~Front~~~~~\nQ\n~~~~~Back~~~~~\nA\n~~~~~Tags~~~~~\n\nvim\n\n  \n";
        assert_eq!(cards(raw), vec![card("Q", "A\n", &["vim"])]);
    }

    #[test]
    fn last_tag_without_newline() {
        let raw = "~~~~~Front~~~~~\nQ\n~~~~~Back~~~~~\nA\n~~~~~Tags~~~~~\nvim";
        assert_eq!(cards(raw), vec![card("Q", "A\n", &["vim"])]);
    }

    #[test]
    fn multi_line_front_keeps_inner_newlines() {
        let raw = "~~~~~Front~~~~~\nline 1\nline 2\n~~~~~Back~~~~~\nA\n~~~~~Tags~~~~~\n";
        assert_eq!(cards(raw), vec![card("line 1\nline 2", "A\n", &[])]);
    }

    #[test]
    fn crlf_markers_are_recognised() {
        let raw = "~~~~~Front~~~~~\r\nQ\r\n~~~~~Back~~~~~\r\nA\r\n~~~~~Tags~~~~~\r\nt\r\n";
        assert_eq!(cards(raw), vec![card("Q", "A\r\n", &["t"])]);
    }

    #[test]
    fn leading_blank_lines_are_allowed() {
        let raw = "\n\n~~~~~Front~~~~~\nQ\n~~~~~Back~~~~~\nA\n~~~~~Tags~~~~~\n";
        assert_eq!(cards(raw), vec![card("Q", "A\n", &[])]);
    }

    #[test]
    fn text_before_first_marker_is_an_error() {
        let raw = "hello\n~~~~~Front~~~~~\nQ\n~~~~~Back~~~~~\nA\n~~~~~Tags~~~~~\n";
        assert_eq!(
            deserialize(raw.as_bytes()),
            Err(ScratchError::UnexpectedContent { line: 1 })
        );
    }

    #[test]
    fn missing_back_marker_is_an_error() {
        let raw = "~~~~~Front~~~~~\nQ\n~~~~~Tags~~~~~\nt\n";
        assert_eq!(
            deserialize(raw.as_bytes()),
            Err(ScratchError::MarkerOutOfOrder {
                line: 3,
                found: Section::Tags,
                expected: Section::Back,
            })
        );
    }

    #[test]
    fn file_ending_in_back_section_is_an_error() {
        let raw = "~~~~~Front~~~~~\nQ\n~~~~~Back~~~~~\nA\n";
        assert_eq!(
            deserialize(raw.as_bytes()),
            Err(ScratchError::UnterminatedSection {
                section: Section::Back
            })
        );
    }

    #[test]
    fn file_without_markers_is_an_error() {
        assert_eq!(deserialize(b"\n\n\n\n\n"), Err(ScratchError::NoCard));
    }
}
