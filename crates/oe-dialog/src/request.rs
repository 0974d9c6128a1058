//! Dialog requests and player input.

/// The presentation style of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogKind {
    /// The narrator describing the scene.
    #[default]
    Narration,
    /// The protagonist speaking or thinking.
    Protagonist,
    /// A decision with selectable options.
    Choice,
}

impl DialogKind {
    /// The background frame used for this kind.
    pub fn frame(self) -> Frame {
        match self {
            DialogKind::Narration => Frame::Narration,
            DialogKind::Protagonist | DialogKind::Choice => Frame::Protagonist,
        }
    }
}

/// A background panel behind dialog text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Narration panel.
    Narration,
    /// Protagonist panel.
    Protagonist,
}

/// One unit of text to present to the player.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogRequest {
    /// The line to display.
    pub text: String,
    /// How to frame it.
    pub kind: DialogKind,
    /// Selectable options; empty means any click dismisses.
    pub options: Vec<String>,
}

impl DialogRequest {
    /// Create a request of the given kind without options.
    pub fn new(text: impl Into<String>, kind: DialogKind) -> Self {
        Self {
            text: text.into(),
            kind,
            options: Vec::new(),
        }
    }

    /// A narration line.
    pub fn narration(text: impl Into<String>) -> Self {
        Self::new(text, DialogKind::Narration)
    }

    /// A protagonist line.
    pub fn protagonist(text: impl Into<String>) -> Self {
        Self::new(text, DialogKind::Protagonist)
    }

    /// A decision with the given options.
    pub fn choice<I, S>(text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(text, DialogKind::Choice).with_options(options)
    }

    /// Add one option.
    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    /// Add several options.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.extend(options.into_iter().map(Into::into));
        self
    }

    /// Whether the player has to pick an option.
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

/// Player input routed to the live dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogInput {
    /// A click anywhere on the input blocker.
    Click,
    /// Activation of the option at this index.
    Select(usize),
}
