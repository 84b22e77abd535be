//! Merging heading and toggle ranges into tagged cards.

use crate::document::{self, HeadingRange, ToggleRange};
use crate::tags::{Tag, TagStack};
use crate::types::Card;

/// Walks the page's headings alongside its toggles and emits one card per
/// toggle, tagged with the headings in scope at that toggle.
///
/// Both inputs must be sorted by position, which the locators guarantee.
/// Toggles must be passed to [`Combiner::card_for`] in page order.
pub struct Combiner<'a> {
    raw: &'a [u8],
    headings: &'a [HeadingRange],
    stack: TagStack,
}

impl<'a> Combiner<'a> {
    pub fn new(raw: &'a [u8], headings: &'a [HeadingRange]) -> Self {
        Self {
            raw,
            headings,
            stack: TagStack::new(),
        }
    }

    /// Build the card for the next toggle in page order.
    pub fn card_for(&mut self, toggle: &ToggleRange) -> Card {
        while let Some((heading, rest)) = self.headings.split_first() {
            if heading.end <= toggle.front_start {
                if let Some(tag) = Tag::from_heading(heading.text(self.raw)) {
                    self.stack.push(tag);
                }
            } else if heading.end > toggle.body_end {
                break;
            }
            // Headings inside the toggle's body are consumed without a tag.
            self.headings = rest;
        }

        Card {
            front: toggle.front(self.raw).to_vec(),
            back: document::strip_indent(toggle.body(self.raw)),
            tags: self.stack.snapshot(),
        }
    }

    pub fn stack(&self) -> &TagStack {
        &self.stack
    }
}

/// Combine materialized heading and toggle ranges into cards, in page order.
pub fn combine(raw: &[u8], headings: &[HeadingRange], toggles: &[ToggleRange]) -> Vec<Card> {
    let mut combiner = Combiner::new(raw, headings);
    toggles.iter().map(|t| combiner.card_for(t)).collect()
}

/// Locate and combine in one call.
pub fn extract_cards(raw: &[u8]) -> Vec<Card> {
    let headings: Vec<_> = document::find_headings(raw).collect();
    let toggles: Vec<_> = document::find_toggles(raw).collect();
    combine(raw, &headings, &toggles)
}
