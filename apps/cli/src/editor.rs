use crate::error::{AppError, Result};
use std::env;
use std::path::Path;
use std::process::Command;

#[cfg(windows)]
pub const DEFAULT_EDITOR: &str = "notepad.exe";
#[cfg(not(windows))]
pub const DEFAULT_EDITOR: &str = "nano";

/// Environment variables consulted for the editor, in priority order.
pub const EDITOR_VARS: [&str; 3] = ["MD2ANKI_EDITOR", "EDITOR", "VISUAL"];

/// Something that lets a human change the scratch file in place.
///
/// Returns once the edit is finished; the caller reads the file back.
pub trait CardEditor: Send {
    fn edit(&mut self, path: &Path) -> Result<()>;
}

impl<E: CardEditor + ?Sized> CardEditor for Box<E> {
    fn edit(&mut self, path: &Path) -> Result<()> {
        (**self).edit(path)
    }
}

/// Opens the scratch file in an external editor and blocks until it exits.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    // The command may carry arguments ("code --wait"), so let the shell split it.
    #[cfg(not(windows))]
    fn build(&self, path: &Path) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(format!("{} \"$1\"", self.command))
            .arg("md2anki")
            .arg(path);
        cmd
    }

    #[cfg(windows)]
    fn build(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.arg(path);
        cmd
    }
}

impl CardEditor for ExternalEditor {
    fn edit(&mut self, path: &Path) -> Result<()> {
        tracing::debug!(editor = %self.command, path = %path.display(), "Opening editor");
        let status = self
            .build(path)
            .status()
            .map_err(|source| AppError::EditorLaunch {
                editor: self.command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(AppError::EditorFailed {
                editor: self.command.clone(),
                status,
            });
        }
        Ok(())
    }
}

/// Leaves the scratch file untouched, accepting every card as serialized.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl CardEditor for Passthrough {
    fn edit(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Pick the editor command: the explicit one, then the first non-empty
/// variable in [`EDITOR_VARS`], then [`DEFAULT_EDITOR`].
pub fn pick_editor(explicit: Option<&str>, lookup: impl Fn(&str) -> Option<String>) -> String {
    explicit
        .map(str::to_string)
        .into_iter()
        .chain(EDITOR_VARS.iter().filter_map(|var| lookup(var)))
        .map(|editor| editor.trim().to_string())
        .find(|editor| !editor.is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

/// [`pick_editor`] against the process environment.
pub fn resolve_editor(explicit: Option<&str>) -> String {
    pick_editor(explicit, |var| env::var(var).ok())
}
