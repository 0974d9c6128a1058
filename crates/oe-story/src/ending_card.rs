//! Ending cards shown in the final scene.

use oe_core::Ending;

/// Title and summary of an ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndingCard {
    /// Headline.
    pub title: &'static str,
    /// One-paragraph summary.
    pub description: &'static str,
}

impl EndingCard {
    /// The card for an ending.
    pub fn for_ending(ending: Ending) -> Self {
        match ending {
            Ending::Balanced => Self {
                title: "The Balanced Life",
                description: "You've found a healthy balance between work and personal life. \
                    Your career progresses steadily while you maintain good mental health.",
            },
            Ending::Workaholic => Self {
                title: "The Workaholic",
                description: "You've prioritized work above all else. Your career advances \
                    rapidly, but at what cost to your personal life?",
            },
            Ending::Carefree => Self {
                title: "The Free Spirit",
                description: "You've chosen freedom and personal fulfillment over professional \
                    expectations. Life is enjoyable, though your career trajectory is uncertain.",
            },
            Ending::Burnout => Self {
                title: "The Burnout",
                description: "You've pushed yourself too hard without proper self-care. The \
                    stress has caught up with you, leading to burnout.",
            },
        }
    }

    /// Title and description as one block of narration.
    pub fn text(&self) -> String {
        format!("{}\n\n{}", self.title, self.description)
    }
}
