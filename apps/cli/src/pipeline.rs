//! Conversion pipeline.
//!
//! ```text
//! heading locator ─┐
//!                  ├─> combiner ─> editing session ─> csv sink
//! toggle locator  ─┘
//! ```
//!
//! Every stage is a task in one `JoinSet`, connected by bounded channels.
//! A stage signals end of input by dropping its sender.

use crate::editor::CardEditor;
use crate::error::{AppError, Result};
use crate::media::MediaMover;
use crate::session::{EditingSession, SessionReport};
use crate::sink::CsvSink;
use md2anki_core::mutation::apply_all;
use md2anki_core::{find_headings, find_toggles, Card, Combiner, HeadingRange, Mutation, ToggleRange};
use std::io::Write;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

pub const CHANNEL_CAPACITY: usize = 64;

/// What a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub headings: usize,
    pub toggles: usize,
    /// Cards handed to the editing session.
    pub cards: usize,
    pub skipped: usize,
    pub written: usize,
    pub media_copied: usize,
}

enum Stage {
    Headings(usize),
    Toggles(usize),
    Combined(usize),
    Edited {
        report: SessionReport,
        media_copied: usize,
    },
    Written(usize),
}

impl RunSummary {
    fn record(&mut self, stage: Stage) {
        match stage {
            Stage::Headings(n) => self.headings = n,
            Stage::Toggles(n) => self.toggles = n,
            Stage::Combined(n) => self.cards = n,
            Stage::Edited {
                report,
                media_copied,
            } => {
                self.skipped = report.skipped;
                self.media_copied = media_copied;
            }
            Stage::Written(n) => self.written = n,
        }
    }
}

pub struct Pipeline<E, W: Write> {
    raw: Arc<[u8]>,
    session: EditingSession<E>,
    sink: CsvSink<W>,
    mutations: Vec<Mutation>,
    media: Option<MediaMover>,
}

impl<E, W> Pipeline<E, W>
where
    E: CardEditor + 'static,
    W: Write + Send + 'static,
{
    pub fn new(raw: impl Into<Arc<[u8]>>, session: EditingSession<E>, sink: CsvSink<W>) -> Self {
        Self {
            raw: raw.into(),
            session,
            sink,
            mutations: Vec::new(),
            media: None,
        }
    }

    /// Mutations applied to every card, in order, before it is edited.
    pub fn with_mutations(mut self, mutations: Vec<Mutation>) -> Self {
        self.mutations = mutations;
        self
    }

    pub fn with_media(mut self, media: MediaMover) -> Self {
        self.media = Some(media);
        self
    }

    /// Run every stage to completion.
    ///
    /// The first stage error aborts the rest and is returned.
    pub async fn run(self) -> Result<RunSummary> {
        let Self {
            raw,
            session,
            mut sink,
            mutations,
            media,
        } = self;

        let (heading_tx, heading_rx) = mpsc::channel::<HeadingRange>(CHANNEL_CAPACITY);
        let (toggle_tx, toggle_rx) = mpsc::channel::<ToggleRange>(CHANNEL_CAPACITY);
        let (card_tx, card_rx) = mpsc::channel::<Card>(CHANNEL_CAPACITY);
        let (edited_tx, mut edited_rx) = mpsc::channel::<Card>(CHANNEL_CAPACITY);

        let mut tasks: JoinSet<Result<Stage>> = JoinSet::new();

        let doc = Arc::clone(&raw);
        tasks.spawn_blocking(move || {
            let mut count = 0;
            for heading in find_headings(&doc) {
                heading_tx
                    .blocking_send(heading)
                    .map_err(|_| AppError::ChannelClosed("heading"))?;
                count += 1;
            }
            tracing::debug!(count, "Headings located");
            Ok(Stage::Headings(count))
        });

        let doc = Arc::clone(&raw);
        tasks.spawn_blocking(move || {
            let mut count = 0;
            for toggle in find_toggles(&doc) {
                toggle_tx
                    .blocking_send(toggle)
                    .map_err(|_| AppError::ChannelClosed("toggle"))?;
                count += 1;
            }
            tracing::debug!(count, "Toggles located");
            Ok(Stage::Toggles(count))
        });

        tasks.spawn(combine_stage(raw, heading_rx, toggle_rx, card_tx));

        tasks.spawn_blocking(move || edit_stage(session, media, &mutations, card_rx, edited_tx));

        tasks.spawn_blocking(move || {
            while let Some(card) = edited_rx.blocking_recv() {
                sink.write(&card)?;
            }
            let written = sink.written();
            sink.finish()?;
            Ok(Stage::Written(written))
        });

        let mut summary = RunSummary::default();
        let mut failure: Option<AppError> = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(stage)) => summary.record(stage),
                Ok(Err(e)) => {
                    tasks.abort_all();
                    if failure.as_ref().map_or(true, AppError::is_channel_closed) {
                        failure = Some(e);
                    }
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    tasks.abort_all();
                    failure.get_or_insert(AppError::Pipeline(format!("stage task failed: {e}")));
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(summary),
        }
    }
}

/// Drain both locators, then walk the toggles in page order.
///
/// Tags depend on every heading before a toggle, so no card can be emitted
/// until the heading stream has ended.
async fn combine_stage(
    raw: Arc<[u8]>,
    mut heading_rx: mpsc::Receiver<HeadingRange>,
    mut toggle_rx: mpsc::Receiver<ToggleRange>,
    card_tx: mpsc::Sender<Card>,
) -> Result<Stage> {
    let mut headings = Vec::new();
    let mut toggles = Vec::new();
    let (mut headings_open, mut toggles_open) = (true, true);

    while headings_open || toggles_open {
        tokio::select! {
            heading = heading_rx.recv(), if headings_open => match heading {
                Some(heading) => headings.push(heading),
                None => headings_open = false,
            },
            toggle = toggle_rx.recv(), if toggles_open => match toggle {
                Some(toggle) => toggles.push(toggle),
                None => toggles_open = false,
            },
        }
    }

    let mut combiner = Combiner::new(&raw, &headings);
    for toggle in &toggles {
        let card = combiner.card_for(toggle);
        card_tx
            .send(card)
            .await
            .map_err(|_| AppError::ChannelClosed("card"))?;
    }
    Ok(Stage::Combined(toggles.len()))
}

fn edit_stage<E: CardEditor>(
    mut session: EditingSession<E>,
    mut media: Option<MediaMover>,
    mutations: &[Mutation],
    mut card_rx: mpsc::Receiver<Card>,
    edited_tx: mpsc::Sender<Card>,
) -> Result<Stage> {
    let mut edit_all = || -> Result<()> {
        while let Some(mut card) = card_rx.blocking_recv() {
            if let Some(media) = media.as_mut() {
                media.collect(&card)?;
            }
            apply_all(mutations, &mut card);

            for edited in session.edit(&card)?.into_cards() {
                edited_tx
                    .blocking_send(edited)
                    .map_err(|_| AppError::ChannelClosed("edited card"))?;
            }
        }
        Ok(())
    };
    let result = edit_all();

    let media_copied = media.as_ref().map_or(0, MediaMover::copied);
    let report = session.finish();
    tracing::debug!(
        received = report.received,
        emitted = report.emitted,
        skipped = report.skipped,
        "Editing session finished"
    );

    result.map(|()| Stage::Edited {
        report,
        media_copied,
    })
}
