use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use oe_dialog::DialogSequencer;
use oe_story::{EndingCard, GameSession, StoryConfig};
use tokio::sync::mpsc;

use crate::input;
use crate::terminal::TerminalFrontend;

pub async fn run(save: &Path, seed: u64) -> Result<(), String> {
    let store = super::open_store(save);
    let config = StoryConfig::default().with_seed(seed);
    let dialogs = Arc::new(DialogSequencer::new());

    let (typing_tx, typing_rx) = mpsc::channel(1);
    let lines = input::spawn_stdin_reader();
    let router = tokio::spawn(input::route(Arc::clone(&dialogs), lines, typing_rx));

    let mut session = GameSession::new(store, dialogs, TerminalFrontend::new(typing_tx), config);
    let result = session.run().await;
    router.abort();

    match result.map_err(|e| e.to_string())? {
        Some(ending) => println!(
            "\n  Last ending: {}",
            EndingCard::for_ending(ending).title.bold()
        ),
        None => println!("\n  {}", "See you tomorrow.".dimmed()),
    }
    Ok(())
}
