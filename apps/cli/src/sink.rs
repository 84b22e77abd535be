use crate::error::{AppError, Result};
use csv::{Terminator, Writer, WriterBuilder};
use md2anki_core::Card;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Appends cards as `front,back,tags` rows, the layout Anki's text import
/// maps onto a basic note type.
pub struct CsvSink<W: Write> {
    writer: Writer<W>,
    written: usize,
}

impl CsvSink<File> {
    /// Create (or truncate) the deck file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| AppError::io(path, e))?;
        tracing::debug!(path = %path.display(), "Opened deck file");
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(inner: W) -> Self {
        let writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(inner);
        Self { writer, written: 0 }
    }

    /// Write one row and flush it, so an aborted run keeps every accepted card.
    pub fn write(&mut self, card: &Card) -> Result<()> {
        let tags = card.joined_tags();
        self.writer
            .write_record([card.front.as_slice(), card.back.as_slice(), tags.as_slice()])?;
        self.writer.flush().map_err(csv::Error::from)?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| AppError::Csv(csv::Error::from(e.into_error())))
    }
}
