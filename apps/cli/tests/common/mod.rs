//! Common test utilities for integration tests.
//!
//! - `TestContext` owns a temporary directory holding the page, the scratch
//!   file and the deck output
//! - `ScriptedEditor` stands in for a human, acting on each card in turn

#![allow(dead_code)]

pub mod fixtures;

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use md2anki::editor::CardEditor;
use md2anki::error::{AppError, Result};
use md2anki::pipeline::{Pipeline, RunSummary};
use md2anki::session::EditingSession;
use md2anki::sink::CsvSink;
use md2anki_core::Mutation;

/// What the scripted editor does with the next card.
#[derive(Debug, Clone)]
pub enum Action {
    Keep,
    Replace(String),
    Skip,
}

/// Editor that applies queued actions and records every buffer it was shown.
///
/// Cards beyond the script are kept unchanged.
#[derive(Clone, Default)]
pub struct ScriptedEditor {
    actions: Arc<Mutex<VecDeque<Action>>>,
    seen: Arc<Mutex<Vec<String>>>,
}

impl ScriptedEditor {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: Arc::new(Mutex::new(actions.into_iter().collect())),
            seen: Arc::default(),
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl CardEditor for ScriptedEditor {
    fn edit(&mut self, path: &Path) -> Result<()> {
        let buffer = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        self.seen.lock().unwrap().push(buffer);

        let action = self.actions.lock().unwrap().pop_front().unwrap_or(Action::Keep);
        let replacement = match action {
            Action::Keep => return Ok(()),
            Action::Replace(content) => content,
            Action::Skip => "skip\n".to_string(),
        };
        fs::write(path, replacement).map_err(|e| AppError::io(path, e))
    }
}

/// Temporary workspace for one conversion.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn scratch_path(&self) -> PathBuf {
        self.path().join("note.txt")
    }

    pub fn deck_path(&self) -> PathBuf {
        self.path().join("deck.txt")
    }

    /// Write the page under the export's file name and return its path.
    pub fn write_page(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).expect("Failed to write page");
        path
    }

    /// Run the pipeline over `page` with a scripted editor, writing `deck.txt`.
    pub async fn convert(
        &self,
        page: &str,
        editor: ScriptedEditor,
        mutations: Vec<Mutation>,
    ) -> Result<RunSummary> {
        let session = EditingSession::new(self.scratch_path(), editor);
        let sink = CsvSink::create(&self.deck_path())?;
        Pipeline::new(page.as_bytes(), session, sink)
            .with_mutations(mutations)
            .run()
            .await
    }

    pub fn deck_rows(&self) -> Vec<Vec<String>> {
        read_rows(&self.deck_path())
    }
}

/// Read a deck file back as rows of `front, back, tags`.
pub fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("Failed to open deck");
    reader
        .records()
        .map(|r| r.expect("Invalid row").iter().map(str::to_string).collect())
        .collect()
}

pub fn row(front: &str, back: &str, tags: &str) -> Vec<String> {
    vec![front.to_string(), back.to_string(), tags.to_string()]
}
