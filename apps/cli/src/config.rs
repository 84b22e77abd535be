use crate::cli::Cli;
use crate::editor::resolve_editor;
use md2anki_core::{deck_name_from_path, deck_title, Mutation};
use std::path::{Path, PathBuf};

/// Settings for one conversion run, resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub scratch_path: PathBuf,
    pub editor: String,
    pub mutations: Vec<Mutation>,
    pub media_dir: Option<PathBuf>,
    pub interactive: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let mut mutations = Vec::new();
        if cli.mathjax {
            mutations.push(Mutation::MathJax);
        }
        if cli.media || cli.media_dir.is_some() {
            mutations.push(Mutation::Media);
        }

        Self {
            input: cli.input.clone(),
            output_dir: cli.output_dir.clone(),
            scratch_path: cli.scratch.clone(),
            editor: resolve_editor(cli.editor.as_deref()),
            mutations,
            media_dir: cli.media_dir.clone(),
            interactive: !cli.no_edit,
        }
    }

    /// Deck name: the page title, else the export's file name.
    pub fn deck_name(&self, raw: &[u8]) -> String {
        deck_title(raw).unwrap_or_else(|| deck_name_from_path(&self.input))
    }

    pub fn output_path(&self, deck: &str) -> PathBuf {
        self.output_dir.join(format!("{deck}.txt"))
    }

    /// Directory media references are resolved against.
    pub fn source_dir(&self) -> &Path {
        match self.input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}
