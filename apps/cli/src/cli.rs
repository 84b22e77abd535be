use clap::Parser;
use std::path::PathBuf;

/// md2anki - turn an exported page of toggles into an Anki deck
///
/// Every toggle becomes a card: its head is the front, its indented body the
/// back, and the headings above it the tags. Each card is opened in your
/// editor before it is written; repeat the three sections to split a card,
/// or replace everything with `skip` to drop it.
///
/// ```bash
/// md2anki "Vim Basics 4f2a9c.md"                 # writes Vim_Basics.txt
/// md2anki page.md -o ~/decks --mathjax
/// md2anki page.md --media-dir ~/.local/share/Anki2/User\ 1/collection.media
/// md2anki page.md --no-edit                     # accept every card as is
/// ```
#[derive(Debug, Parser)]
#[command(name = "md2anki", version, verbatim_doc_comment)]
pub struct Cli {
    /// Exported Markdown page
    pub input: PathBuf,

    /// Directory the deck file is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Scratch file opened in the editor for every card
    #[arg(long, default_value = "note.txt")]
    pub scratch: PathBuf,

    /// Editor command, overrides MD2ANKI_EDITOR, EDITOR and VISUAL
    #[arg(long)]
    pub editor: Option<String>,

    /// Rewrite $..$ and $$..$$ to MathJax delimiters
    #[arg(long)]
    pub mathjax: bool,

    /// Rewrite media references to <img> tags
    #[arg(long)]
    pub media: bool,

    /// Copy referenced media into this directory (implies --media)
    #[arg(long)]
    pub media_dir: Option<PathBuf>,

    /// Accept every card without opening the editor
    #[arg(long)]
    pub no_edit: bool,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}
