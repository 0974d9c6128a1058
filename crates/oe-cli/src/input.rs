//! Routing stdin lines to dialogs and typing prompts.

use std::io::{self, BufRead};
use std::sync::Arc;

use colored::Colorize;
use oe_dialog::{DialogInput, DialogSequencer};
use oe_story::TypingAttempt;
use strsim::jaro_winkler;
use tokio::sync::mpsc;

use crate::terminal::TypingRequest;

/// Minimum similarity score for fuzzy option matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// Read stdin on a dedicated thread so a pending read never blocks shutdown.
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Feed lines to whatever is waiting: the dialog on screen or a typing
/// prompt. Once input runs out, every dialog is cancelled and every typing
/// prompt gives up, which winds the session down.
pub async fn route(
    dialogs: Arc<DialogSequencer>,
    mut lines: mpsc::UnboundedReceiver<String>,
    mut typing: mpsc::Receiver<TypingRequest>,
) {
    let mut awaiting = dialogs.awaiting_input();
    let mut exhausted = false;
    loop {
        tokio::select! {
            showing = async { awaiting.wait_for(|showing| *showing).await.is_ok() } => {
                if !showing {
                    return;
                }
                let line = if exhausted { None } else { lines.recv().await };
                match line {
                    Some(line) => answer_dialog(&dialogs, &line),
                    None => {
                        exhausted = true;
                        dialogs.cleanup();
                    }
                }
            }
            request = typing.recv() => {
                let Some(reply) = request else {
                    return;
                };
                let line = if exhausted { None } else { lines.recv().await };
                let attempt = match line {
                    Some(line) if !line.trim().is_empty() => TypingAttempt::Typed(line),
                    Some(_) => TypingAttempt::Cancelled,
                    None => {
                        exhausted = true;
                        TypingAttempt::Cancelled
                    }
                };
                let _ = reply.send(attempt);
            }
        }
    }
}

fn answer_dialog(dialogs: &DialogSequencer, line: &str) {
    let options = dialogs.current_options();
    if options.is_empty() {
        dialogs.handle_input(DialogInput::Click);
        return;
    }
    match resolve_option(&options, line) {
        Some(index) => {
            dialogs.handle_input(DialogInput::Select(index));
        }
        None => println!(
            "  {}",
            format!("Pick 1-{} or type an option.", options.len()).yellow()
        ),
    }
}

/// Resolve player input to an option index.
///
/// Accepts a 1-based number, an exact (case-insensitive) label, a unique
/// label prefix, or failing those the closest label by Jaro-Winkler
/// similarity above [`FUZZY_THRESHOLD`].
pub fn resolve_option(options: &[String], input: &str) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).filter(|i| *i < options.len());
    }

    let input_lower = input.to_lowercase();
    let lowered: Vec<String> = options.iter().map(|o| o.to_lowercase()).collect();

    if let Some(i) = lowered.iter().position(|o| *o == input_lower) {
        return Some(i);
    }

    let prefixed: Vec<usize> = lowered
        .iter()
        .enumerate()
        .filter(|(_, o)| o.starts_with(&input_lower))
        .map(|(i, _)| i)
        .collect();
    if let [only] = prefixed.as_slice() {
        return Some(*only);
    }

    lowered
        .iter()
        .enumerate()
        .map(|(i, o)| (i, jaro_winkler(&input_lower, o)))
        .filter(|(_, score)| *score >= FUZZY_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}
