use crate::editor::CardEditor;
use crate::error::{AppError, Result};
use md2anki_core::scratch::{deserialize, serialize};
use md2anki_core::{Card, EditOutcome};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Counters for one editing session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    /// Cards handed to the editor.
    pub received: usize,
    /// Cards that came back, after splits.
    pub emitted: usize,
    pub skipped: usize,
}

/// Round-trips each card through a scratch file and an editor.
///
/// The scratch file is overwritten for every card and removed by
/// [`EditingSession::finish`].
pub struct EditingSession<E> {
    scratch_path: PathBuf,
    editor: E,
    report: SessionReport,
}

impl<E: CardEditor> EditingSession<E> {
    pub fn new(scratch_path: impl Into<PathBuf>, editor: E) -> Self {
        Self {
            scratch_path: scratch_path.into(),
            editor,
            report: SessionReport::default(),
        }
    }

    /// Write the card, let the editor change it, and read back what is left.
    pub fn edit(&mut self, card: &Card) -> Result<EditOutcome> {
        self.report.received += 1;

        fs::write(&self.scratch_path, serialize(card))
            .map_err(|e| AppError::io(&self.scratch_path, e))?;
        self.editor.edit(&self.scratch_path)?;
        let edited = fs::read(&self.scratch_path).map_err(|e| AppError::io(&self.scratch_path, e))?;

        let outcome = deserialize(&edited)?;
        match &outcome {
            EditOutcome::Skipped => {
                self.report.skipped += 1;
                tracing::debug!(card = %card, "Card skipped");
            }
            EditOutcome::Edited(cards) => {
                self.report.emitted += cards.len();
                if cards.len() > 1 {
                    tracing::debug!(count = cards.len(), "Card split");
                }
            }
        }
        Ok(outcome)
    }

    /// Remove the scratch file and return the counters.
    pub fn finish(self) -> SessionReport {
        match fs::remove_file(&self.scratch_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %self.scratch_path.display(),
                    error = %e,
                    "Failed to remove scratch file"
                );
            }
        }
        self.report
    }
}
