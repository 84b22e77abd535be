//! Core library for turning an exported page of toggles into an Anki deck.
//!
//! Provides:
//! - Heading and toggle locators over the raw page bytes
//! - The heading tag stack and the combiner that emits tagged cards
//! - The scratch file protocol used for the human editing round trip
//! - Text mutations (MathJax delimiters, media references)

pub mod combine;
pub mod document;
pub mod error;
pub mod mutation;
pub mod scratch;
pub mod tags;
pub mod types;

pub use combine::{combine, extract_cards, Combiner};
pub use document::{deck_name_from_path, deck_title, find_headings, find_toggles, HeadingRange, ToggleRange};
pub use error::{Result, ScratchError};
pub use mutation::{media_references, MediaRef, Mutation};
pub use scratch::{EditOutcome, Section};
pub use tags::{Tag, TagStack};
pub use types::Card;
