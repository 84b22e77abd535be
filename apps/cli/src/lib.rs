pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod media;
pub mod pipeline;
pub mod session;
pub mod sink;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::editor::{CardEditor, ExternalEditor, Passthrough};
use crate::error::AppError;
use crate::media::MediaMover;
use crate::pipeline::{Pipeline, RunSummary};
use crate::session::EditingSession;
use crate::sink::CsvSink;

/// Log to stderr; `RUST_LOG` overrides the default filter.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run(config: Config) -> anyhow::Result<RunSummary> {
    let raw: Arc<[u8]> = tokio::fs::read(&config.input)
        .await
        .map_err(|e| AppError::io(&config.input, e))?
        .into();

    let deck = config.deck_name(&raw);
    let output = config.output_path(&deck);
    tracing::info!(input = %config.input.display(), deck = %deck, "Converting page");

    let sink = CsvSink::create(&output)?;
    let editor: Box<dyn CardEditor> = if config.interactive {
        tracing::debug!(editor = %config.editor, "Using editor");
        Box::new(ExternalEditor::new(config.editor.clone()))
    } else {
        Box::new(Passthrough)
    };
    let session = EditingSession::new(&config.scratch_path, editor);

    let mut pipeline = Pipeline::new(raw, session, sink).with_mutations(config.mutations.clone());
    if let Some(media_dir) = &config.media_dir {
        pipeline = pipeline.with_media(MediaMover::new(config.source_dir(), media_dir)?);
    }

    let summary = pipeline.run().await?;
    if summary.media_copied > 0 {
        tracing::info!(count = summary.media_copied, "Copied media files");
    }
    tracing::info!(
        "Done. Added {} cards to {} ({} skipped)",
        summary.written,
        output.display(),
        summary.skipped
    );
    Ok(summary)
}
