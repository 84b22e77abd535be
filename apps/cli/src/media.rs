use crate::error::{AppError, Result};
use md2anki_core::{media_references, Card};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Copies media referenced by cards into Anki's media folder under the
/// flattened `dir_file` name the rewritten `<img>` tags point at.
#[derive(Debug)]
pub struct MediaMover {
    source_dir: PathBuf,
    media_dir: PathBuf,
    copied: usize,
}

impl MediaMover {
    /// Create the mover, creating `media_dir` if needed.
    pub fn new(source_dir: impl Into<PathBuf>, media_dir: impl Into<PathBuf>) -> Result<Self> {
        let media_dir = media_dir.into();
        fs::create_dir_all(&media_dir).map_err(|e| AppError::io(&media_dir, e))?;
        Ok(Self {
            source_dir: source_dir.into(),
            media_dir,
            copied: 0,
        })
    }

    /// Copy every file the card references. Must run before the media
    /// mutation rewrites the references away. Returns the number copied.
    pub fn collect(&mut self, card: &Card) -> Result<usize> {
        let mut count = 0;
        let refs = media_references(&card.front)
            .into_iter()
            .chain(media_references(&card.back));

        for media in refs {
            let source = self.source_dir.join(&media.dir).join(&media.file);
            let target = self.media_dir.join(media.flat_name());
            match fs::copy(&source, &target) {
                Ok(_) => {
                    tracing::debug!(
                        from = %source.display(),
                        to = %target.display(),
                        "Copied media"
                    );
                    count += 1;
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound && !source.exists() => {
                    tracing::warn!(path = %source.display(), "Referenced media not found");
                }
                Err(e) => return Err(AppError::io(&target, e)),
            }
        }

        self.copied += count;
        Ok(count)
    }

    pub fn copied(&self) -> usize {
        self.copied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Export directory with an empty `Page/` folder.
    fn workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Page")).unwrap();
        dir
    }

    #[test]
    fn copies_under_flat_name() {
        let dir = workspace();
        let root = dir.path();
        fs::write(root.join("Page").join("Untitled 1.png"), b"png").unwrap();
        let mut mover = MediaMover::new(root, root.join("collection.media")).unwrap();

        let card = Card::new("q", "![Page/Untitled 1.png](Page/Untitled%201.png)\n", vec![]);
        assert_eq!(mover.collect(&card).unwrap(), 1);
        assert_eq!(mover.copied(), 1);
        assert_eq!(
            fs::read(root.join("collection.media").join("Page_Untitled 1.png")).unwrap(),
            b"png"
        );
        assert!(root.join("Page").join("Untitled 1.png").exists());
    }

    #[test]
    fn missing_source_is_skipped() {
        let dir = workspace();
        let root = dir.path();
        let mut mover = MediaMover::new(root, root.join("collection.media")).unwrap();

        let card = Card::new("q", "![Page/gone.png](Page/gone.png)\n", vec![]);
        assert_eq!(mover.collect(&card).unwrap(), 0);
        assert_eq!(mover.copied(), 0);
    }

    #[test]
    fn card_without_media() {
        let dir = workspace();
        let root = dir.path();
        let mut mover = MediaMover::new(root, root.join("collection.media")).unwrap();
        assert_eq!(mover.collect(&Card::new("q", "a\n", vec![])).unwrap(), 0);
    }

    #[test]
    fn media_dir_is_created() {
        let dir = workspace();
        let media_dir = dir.path().join("nested").join("collection.media");
        MediaMover::new(dir.path(), &media_dir).unwrap();
        assert!(media_dir.is_dir());
    }
}
