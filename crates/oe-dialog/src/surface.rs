//! The rendering seam between the sequencer and whatever draws dialogs.

use std::sync::{Arc, Mutex, PoisonError};

use crate::request::Frame;

/// How the full-screen input blocker treats clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockerMode {
    /// A click anywhere dismisses the dialog.
    Dismiss,
    /// Clicks are swallowed; only an option can resolve the dialog.
    Block,
}

/// Something that can draw a dialog box for one scene.
///
/// The sequencer calls these in a fixed order: frame, text, blocker, options
/// to show; frames, text, options, blocker to hide. Implementations only
/// draw; they never resolve dialogs themselves.
pub trait DialogSurface: Send {
    /// Build the frame and text elements. Called when they are missing.
    fn create_elements(&mut self);

    /// Destroy all elements. Called on scene teardown.
    fn destroy_elements(&mut self);

    /// Whether the frame and text elements exist.
    fn has_elements(&self) -> bool;

    /// Show one frame and hide the other.
    fn show_frame(&mut self, frame: Frame);

    /// Hide both frames.
    fn hide_frames(&mut self);

    /// Display the dialog text.
    fn show_text(&mut self, text: &str);

    /// Hide the dialog text.
    fn hide_text(&mut self);

    /// Display selectable options, indexed in order.
    fn show_options(&mut self, options: &[String]);

    /// Remove all option elements.
    fn clear_options(&mut self);

    /// Install the full-screen input blocker.
    fn install_blocker(&mut self, mode: BlockerMode);

    /// Remove the input blocker.
    fn remove_blocker(&mut self);
}

/// A single call recorded by [`MemorySurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Elements created.
    Created,
    /// Elements destroyed.
    Destroyed,
    /// A frame shown.
    FrameShown(Frame),
    /// Frames hidden.
    FramesHidden,
    /// Text shown.
    TextShown(String),
    /// Text hidden.
    TextHidden,
    /// Options shown.
    OptionsShown(Vec<String>),
    /// Options cleared.
    OptionsCleared,
    /// Blocker installed.
    BlockerInstalled(BlockerMode),
    /// Blocker removed.
    BlockerRemoved,
}

/// What a [`MemorySurface`] currently displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceSnapshot {
    /// Whether elements exist.
    pub has_elements: bool,
    /// The visible frame.
    pub frame: Option<Frame>,
    /// The visible text.
    pub text: Option<String>,
    /// The visible options.
    pub options: Vec<String>,
    /// The installed blocker.
    pub blocker: Option<BlockerMode>,
    /// Texts shown so far, oldest first, up to
    /// [`MemorySurface::HISTORY_LIMIT`] of the most recent.
    pub shown: Vec<String>,
    /// Calls so far, oldest first, up to [`MemorySurface::HISTORY_LIMIT`] of
    /// the most recent.
    pub events: Vec<SurfaceEvent>,
}

#[derive(Debug, Default)]
struct SurfaceState {
    snapshot: SurfaceSnapshot,
    broken: bool,
}

/// A headless surface that records what it is asked to draw.
///
/// Clones share state, so a test or a headless run can keep a handle while
/// the sequencer owns the boxed copy. Only the most recent
/// [`HISTORY_LIMIT`](Self::HISTORY_LIMIT) texts and calls are kept, so one
/// surface can last a whole session.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl MemorySurface {
    /// How many shown texts and recorded calls are kept.
    pub const HISTORY_LIMIT: usize = 1024;

    /// A working surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose elements can never be created.
    pub fn broken() -> Self {
        let surface = Self::default();
        surface.with_state(|s| s.broken = true);
        surface
    }

    /// A copy of the current display state.
    pub fn snapshot(&self) -> SurfaceSnapshot {
        self.with_state(|s| s.snapshot.clone())
    }

    /// Every text shown so far.
    pub fn shown(&self) -> Vec<String> {
        self.with_state(|s| s.snapshot.shown.clone())
    }

    /// The visible text, if any.
    pub fn text(&self) -> Option<String> {
        self.with_state(|s| s.snapshot.text.clone())
    }

    /// The visible options.
    pub fn options(&self) -> Vec<String> {
        self.with_state(|s| s.snapshot.options.clone())
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut SurfaceState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    fn record(&self, event: SurfaceEvent, f: impl FnOnce(&mut SurfaceSnapshot)) {
        self.with_state(|s| {
            f(&mut s.snapshot);
            push_capped(&mut s.snapshot.events, event);
        });
    }
}

fn push_capped<T>(log: &mut Vec<T>, item: T) {
    log.push(item);
    if log.len() > MemorySurface::HISTORY_LIMIT {
        let excess = log.len() - MemorySurface::HISTORY_LIMIT;
        log.drain(..excess);
    }
}

impl DialogSurface for MemorySurface {
    fn create_elements(&mut self) {
        self.with_state(|s| {
            s.snapshot.has_elements = !s.broken;
            push_capped(&mut s.snapshot.events, SurfaceEvent::Created);
        });
    }

    fn destroy_elements(&mut self) {
        self.record(SurfaceEvent::Destroyed, |s| {
            s.has_elements = false;
            s.frame = None;
            s.text = None;
            s.options.clear();
            s.blocker = None;
        });
    }

    fn has_elements(&self) -> bool {
        self.with_state(|s| s.snapshot.has_elements)
    }

    fn show_frame(&mut self, frame: Frame) {
        self.record(SurfaceEvent::FrameShown(frame), |s| s.frame = Some(frame));
    }

    fn hide_frames(&mut self) {
        self.record(SurfaceEvent::FramesHidden, |s| s.frame = None);
    }

    fn show_text(&mut self, text: &str) {
        self.record(SurfaceEvent::TextShown(text.to_string()), |s| {
            s.text = Some(text.to_string());
            push_capped(&mut s.shown, text.to_string());
        });
    }

    fn hide_text(&mut self) {
        self.record(SurfaceEvent::TextHidden, |s| s.text = None);
    }

    fn show_options(&mut self, options: &[String]) {
        self.record(SurfaceEvent::OptionsShown(options.to_vec()), |s| {
            s.options = options.to_vec();
        });
    }

    fn clear_options(&mut self) {
        self.record(SurfaceEvent::OptionsCleared, |s| s.options.clear());
    }

    fn install_blocker(&mut self, mode: BlockerMode) {
        self.record(SurfaceEvent::BlockerInstalled(mode), |s| {
            s.blocker = Some(mode);
        });
    }

    fn remove_blocker(&mut self) {
        self.record(SurfaceEvent::BlockerRemoved, |s| s.blocker = None);
    }
}
