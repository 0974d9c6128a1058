//! Dialog rendering and typing prompts on a plain terminal.

use colored::Colorize;
use oe_core::SceneId;
use oe_dialog::{BlockerMode, DialogSurface, Frame};
use oe_story::{Frontend, TypingAttempt};
use tokio::sync::{mpsc, oneshot};

/// Prints dialogs to stdout.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    elements: bool,
    frame: Option<Frame>,
}

impl DialogSurface for TerminalSurface {
    fn create_elements(&mut self) {
        self.elements = true;
    }

    fn destroy_elements(&mut self) {
        self.elements = false;
        self.frame = None;
    }

    fn has_elements(&self) -> bool {
        self.elements
    }

    fn show_frame(&mut self, frame: Frame) {
        self.frame = Some(frame);
    }

    fn hide_frames(&mut self) {
        self.frame = None;
    }

    fn show_text(&mut self, text: &str) {
        println!();
        for line in text.lines() {
            match self.frame {
                Some(Frame::Protagonist) => println!("  {}", line.bold()),
                _ => println!("  {}", line.italic()),
            }
        }
    }

    fn hide_text(&mut self) {}

    fn show_options(&mut self, options: &[String]) {
        for (i, option) in options.iter().enumerate() {
            println!("    {} {option}", format!("{}.", i + 1).cyan());
        }
    }

    fn clear_options(&mut self) {}

    fn install_blocker(&mut self, mode: BlockerMode) {
        if mode == BlockerMode::Dismiss {
            println!("  {}", "(press Enter)".dimmed());
        }
    }

    fn remove_blocker(&mut self) {}
}

/// A typing prompt handed to the input task, answered through the sender.
pub type TypingRequest = oneshot::Sender<TypingAttempt>;

/// Terminal surfaces plus typing attempts read by the input task.
pub struct TerminalFrontend {
    typing: mpsc::Sender<TypingRequest>,
}

impl TerminalFrontend {
    pub fn new(typing: mpsc::Sender<TypingRequest>) -> Self {
        Self { typing }
    }
}

impl Frontend for TerminalFrontend {
    fn surface_for(&mut self, scene: SceneId) -> Box<dyn DialogSurface> {
        tracing::debug!(%scene, "binding terminal surface");
        Box::new(TerminalSurface::default())
    }

    async fn type_attempt(&mut self, target: &str) -> TypingAttempt {
        println!();
        println!("  {}", "COMPLETE THE REPORT".bold());
        println!("  {}", target.yellow());
        println!(
            "  {}",
            "Type the text above exactly as shown (empty line to cancel)".dimmed()
        );

        let (reply, answer) = oneshot::channel();
        if self.typing.send(reply).await.is_err() {
            return TypingAttempt::Cancelled;
        }
        answer.await.unwrap_or(TypingAttempt::Cancelled)
    }
}
