//! The `studypath flashcards` command.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use studypath_core::flashcards::FlashcardDeck;
use studypath_render::render_flashcard;
use studypath_render::terminal::to_text;

use super::App;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let app = App::load(config_path.as_deref())?;
    let (subject, level) = app.selection()?.require_level()?;

    let cards = app
        .source
        .flashcards(&subject, level)
        .await
        .with_context(|| format!("failed to load flashcards for {subject}/{level}"))?;
    let mut deck = FlashcardDeck::new(cards)?;

    print_card(&deck)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }
        deck.next_card();
        print_card(&deck)?;
    }
    Ok(())
}

fn print_card(deck: &FlashcardDeck) -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "\n{}[Enter] next, q to quit: ", to_text(&render_flashcard(deck)))?;
    stdout.flush()?;
    Ok(())
}
