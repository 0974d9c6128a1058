//! Serializes dialogs so exactly one waits for the player at a time.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::{oneshot, watch};
use tracing::{debug, error, warn};

use crate::error::{DialogError, DialogResult};
use crate::request::{DialogInput, DialogRequest};
use crate::surface::{BlockerMode, DialogSurface};

/// How a pending dialog was settled.
#[derive(Debug)]
enum Resolution {
    Chosen(String),
    Superseded,
    Cancelled,
}

struct Pending {
    options: Vec<String>,
    resolver: oneshot::Sender<Resolution>,
}

#[derive(Default)]
struct SequencerState {
    surface: Option<Box<dyn DialogSurface>>,
    pending: Option<Pending>,
}

impl SequencerState {
    /// Hide all dialog visuals, then settle the pending dialog with `reason`.
    /// Returns whether a dialog was pending.
    fn teardown(&mut self, reason: Resolution) -> bool {
        if let Some(surface) = self.surface.as_mut() {
            surface.hide_frames();
            surface.hide_text();
            surface.clear_options();
            surface.remove_blocker();
        }
        match self.pending.take() {
            Some(pending) => {
                // The receiver may already be gone; nothing to settle then.
                let _ = pending.resolver.send(reason);
                true
            }
            None => false,
        }
    }
}

/// A dialog on screen, waiting for the player.
#[derive(Debug)]
pub struct PendingDialog {
    receiver: oneshot::Receiver<Resolution>,
}

impl PendingDialog {
    /// Wait for the player's answer.
    ///
    /// Yields the chosen option text, or an empty string for a dismissal.
    pub async fn outcome(self) -> DialogResult<String> {
        match self.receiver.await {
            Ok(Resolution::Chosen(choice)) => Ok(choice),
            Ok(Resolution::Superseded) => Err(DialogError::Superseded),
            Ok(Resolution::Cancelled) | Err(_) => Err(DialogError::Cancelled),
        }
    }
}

/// Presents dialogs one at a time and turns player input into answers.
///
/// Share it behind an `Arc`: scene logic awaits dialogs while the input side
/// calls [`DialogSequencer::handle_input`]. Internal locking is never held
/// across an await.
pub struct DialogSequencer {
    state: Mutex<SequencerState>,
    awaiting: watch::Sender<bool>,
}

impl Default for DialogSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DialogSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("DialogSequencer")
            .field("initialized", &state.surface.is_some())
            .field("showing", &state.pending.is_some())
            .finish()
    }
}

impl DialogSequencer {
    /// A sequencer with no surface bound.
    pub fn new() -> Self {
        let (awaiting, _) = watch::channel(false);
        Self {
            state: Mutex::new(SequencerState::default()),
            awaiting,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SequencerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sync_awaiting(&self, state: &SequencerState) {
        self.awaiting.send_replace(state.pending.is_some());
    }

    /// Bind a scene's surface, discarding any leftover dialog from the
    /// previous one. Elements are created immediately.
    pub fn init(&self, mut surface: Box<dyn DialogSurface>) {
        let mut state = self.lock();
        if state.teardown(Resolution::Cancelled) {
            debug!("pending dialog cancelled by re-initialization");
        }
        if let Some(old) = state.surface.as_mut() {
            old.destroy_elements();
        }
        surface.create_elements();
        if !surface.has_elements() {
            warn!("dialog surface did not create its elements; will retry on show");
        }
        state.surface = Some(surface);
        self.sync_awaiting(&state);
    }

    /// Whether a surface is bound.
    pub fn is_initialized(&self) -> bool {
        self.lock().surface.is_some()
    }

    /// Whether a dialog is waiting for the player.
    pub fn is_showing(&self) -> bool {
        self.lock().pending.is_some()
    }

    /// A watch that is `true` exactly while a dialog waits for input.
    pub fn awaiting_input(&self) -> watch::Receiver<bool> {
        self.awaiting.subscribe()
    }

    /// The options of the dialog on screen. Empty for dismiss-only dialogs
    /// and when nothing is showing.
    pub fn current_options(&self) -> Vec<String> {
        self.lock()
            .pending
            .as_ref()
            .map(|p| p.options.clone())
            .unwrap_or_default()
    }

    /// Put a dialog on screen, replacing any dialog already there.
    ///
    /// A replaced dialog resolves with [`DialogError::Superseded`] after its
    /// visuals are torn down.
    pub fn begin(&self, request: DialogRequest) -> DialogResult<PendingDialog> {
        let mut state = self.lock();
        if state.teardown(Resolution::Superseded) {
            warn!(text = %request.text, "dialog shown while another was pending; the earlier one was superseded");
        }
        self.open(&mut state, request)
    }

    /// Put a dialog on screen unless one is already waiting.
    pub fn try_begin(&self, request: DialogRequest) -> DialogResult<PendingDialog> {
        let mut state = self.lock();
        if state.pending.is_some() {
            return Err(DialogError::Busy);
        }
        self.open(&mut state, request)
    }

    fn open(
        &self,
        state: &mut SequencerState,
        request: DialogRequest,
    ) -> DialogResult<PendingDialog> {
        let result = Self::render(state, request);
        self.sync_awaiting(state);
        result
    }

    fn render(state: &mut SequencerState, request: DialogRequest) -> DialogResult<PendingDialog> {
        let Some(surface) = state.surface.as_mut() else {
            return Err(DialogError::NotInitialized);
        };
        if !surface.has_elements() {
            debug!("dialog elements missing; recreating");
            surface.create_elements();
            if !surface.has_elements() {
                return Err(DialogError::ElementsUnavailable);
            }
        }

        let DialogRequest {
            text,
            kind,
            options,
        } = request;
        surface.show_frame(kind.frame());
        surface.show_text(&text);
        if options.is_empty() {
            surface.install_blocker(BlockerMode::Dismiss);
        } else {
            surface.install_blocker(BlockerMode::Block);
            surface.show_options(&options);
        }
        debug!(?kind, options = options.len(), "dialog shown");

        let (resolver, receiver) = oneshot::channel();
        state.pending = Some(Pending { options, resolver });
        Ok(PendingDialog { receiver })
    }

    /// Show a dialog and wait for the answer.
    pub async fn present(&self, request: DialogRequest) -> DialogResult<String> {
        self.begin(request)?.outcome().await
    }

    /// Show a dialog and wait for the answer, refusing if one is pending.
    pub async fn try_show_dialog(&self, request: DialogRequest) -> DialogResult<String> {
        self.try_begin(request)?.outcome().await
    }

    /// Show a dialog and wait for the answer.
    ///
    /// Never fails: anything that keeps the player from answering is logged
    /// and yields an empty string.
    pub async fn show_dialog(&self, request: DialogRequest) -> String {
        match self.present(request).await {
            Ok(choice) => choice,
            Err(e) => {
                log_unanswered(&e);
                String::new()
            }
        }
    }

    /// Show dialogs strictly one after another, collecting each answer.
    ///
    /// Once a dialog is cancelled the rest are skipped and answer with empty
    /// strings, so the result always has one entry per request.
    pub async fn show_dialog_sequence(&self, requests: Vec<DialogRequest>) -> Vec<String> {
        let mut answers = Vec::with_capacity(requests.len());
        let mut cancelled = false;
        for request in requests {
            if cancelled {
                answers.push(String::new());
                continue;
            }
            match self.present(request).await {
                Ok(choice) => answers.push(choice),
                Err(e) => {
                    log_unanswered(&e);
                    cancelled = e == DialogError::Cancelled;
                    answers.push(String::new());
                }
            }
        }
        answers
    }

    /// Show dialogs one after another, stopping at the first failure.
    pub async fn try_show_dialog_sequence(
        &self,
        requests: Vec<DialogRequest>,
    ) -> DialogResult<Vec<String>> {
        let mut answers = Vec::with_capacity(requests.len());
        for request in requests {
            answers.push(self.present(request).await?);
        }
        Ok(answers)
    }

    /// Route player input to the dialog on screen.
    ///
    /// A click only dismisses dialogs without options; a selection must name
    /// a valid option. Returns whether the input resolved a dialog.
    pub fn handle_input(&self, input: DialogInput) -> bool {
        let mut state = self.lock();
        let Some(pending) = state.pending.as_ref() else {
            return false;
        };
        let choice = match input {
            DialogInput::Click if pending.options.is_empty() => String::new(),
            DialogInput::Click => return false,
            DialogInput::Select(index) => match pending.options.get(index) {
                Some(option) => option.clone(),
                None => return false,
            },
        };
        debug!(choice = %choice, "dialog answered");
        state.teardown(Resolution::Chosen(choice));
        self.sync_awaiting(&state);
        true
    }

    /// Hide the dialog on screen. A waiting caller resolves as cancelled.
    /// Safe to call when nothing is showing.
    pub fn hide_dialog(&self) {
        let mut state = self.lock();
        if state.teardown(Resolution::Cancelled) {
            debug!("pending dialog hidden");
        }
        self.sync_awaiting(&state);
    }

    /// Hide the dialog and destroy the surface's elements.
    ///
    /// The surface stays bound; the next dialog recreates its elements.
    pub fn cleanup(&self) {
        let mut state = self.lock();
        if state.teardown(Resolution::Cancelled) {
            debug!("pending dialog cancelled by cleanup");
        }
        if let Some(surface) = state.surface.as_mut() {
            surface.destroy_elements();
        }
        self.sync_awaiting(&state);
    }
}

fn log_unanswered(e: &DialogError) {
    match e {
        DialogError::Cancelled => debug!("dialog cancelled before an answer"),
        DialogError::Superseded => warn!("dialog superseded before an answer"),
        other => error!(error = %other, "dialog could not be shown"),
    }
}
