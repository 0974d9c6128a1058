//! Scored decisions and their outcomes.
//!
//! Each decision is a prompt with fixed options. Picking an option records
//! `decision.id = option.value` in the ledger, adds the option's score deltas,
//! and plays its reply lines.

use oe_core::{Ending, ScoreDelta};
use oe_dialog::DialogRequest;

/// A prompt with fixed, scored options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Choice id in the ledger.
    pub id: &'static str,
    /// The line shown above the options.
    pub prompt: &'static str,
    /// Options in display order.
    pub options: &'static [DecisionOption],
}

/// One option of a [`Decision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionOption {
    /// Text shown to the player.
    pub label: &'static str,
    /// Value stored in the ledger.
    pub value: &'static str,
    /// Points added when chosen.
    pub deltas: &'static [ScoreDelta],
    /// Protagonist lines played afterwards.
    pub replies: &'static [&'static str],
}

impl Decision {
    /// The dialog that asks this decision.
    pub fn request(&self) -> DialogRequest {
        DialogRequest::choice(self.prompt, self.options.iter().map(|o| o.label))
    }

    /// The option with this label.
    pub fn option(&self, label: &str) -> Option<&'static DecisionOption> {
        self.options.iter().find(|o| o.label == label)
    }

    /// The option stored under this value.
    pub fn option_by_value(&self, value: &str) -> Option<&'static DecisionOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

const fn points(ending: Ending, amount: u32) -> ScoreDelta {
    ScoreDelta::new(ending, amount)
}

/// Label of the computer option that starts the typing challenge.
pub const START_REPORT: &str = "Complete the report (start mini-game)";

/// The report on the office computer.
///
/// `completed` is only recorded once the typing challenge succeeds.
pub const COMPUTER: Decision = Decision {
    id: "computer",
    prompt: "The work is never-ending...",
    options: &[
        DecisionOption {
            label: START_REPORT,
            value: "completed",
            deltas: &[points(Ending::Workaholic, 2)],
            replies: &["Finally done. One less thing to worry about."],
        },
        DecisionOption {
            label: "Skip it for tomorrow",
            value: "skipped",
            deltas: &[points(Ending::Carefree, 2)],
            replies: &["I'll just finish this tomorrow morning..."],
        },
    ],
};

/// The half-empty coffee cup.
pub const COFFEE: Decision = Decision {
    id: "coffee",
    prompt: "This is the only thing keeping me awake right now",
    options: &[
        DecisionOption {
            label: "Drink the rest",
            value: "drink",
            deltas: &[points(Ending::Workaholic, 1)],
            replies: &["That hit the spot. I feel more alert now."],
        },
        DecisionOption {
            label: "Leave it",
            value: "leave",
            deltas: &[points(Ending::Balanced, 1)],
            replies: &["I'm already too wired to sleep tonight anyway"],
        },
    ],
};

/// The wilting desk plant.
pub const PLANT: Decision = Decision {
    id: "plant",
    prompt: "The plant is just like me…",
    options: &[
        DecisionOption {
            label: "Water the plant",
            value: "water",
            deltas: &[points(Ending::Balanced, 1)],
            replies: &["At least one of us is getting proper care"],
        },
        DecisionOption {
            label: "Ignore it",
            value: "ignore",
            deltas: &[points(Ending::Burnout, 1)],
            replies: &["Maybe we're both beyond saving at this point"],
        },
    ],
};

/// The fish tank. One of the two hotspots required before leaving.
pub const FISH_TANK: Decision = Decision {
    id: "fish_thought",
    prompt: "The poor fish is trapped… just swimming in circles",
    options: &[
        DecisionOption {
            label: "But at least it's safe and cared for",
            value: "safe",
            deltas: &[points(Ending::Balanced, 1)],
            replies: &[],
        },
        DecisionOption {
            label: "It's a comfortable prison, like this office",
            value: "freedom",
            deltas: &[points(Ending::Carefree, 2)],
            replies: &[],
        },
        DecisionOption {
            label: "Still, it's doing what it's supposed to do",
            value: "overachiever",
            deltas: &[points(Ending::Workaholic, 2)],
            replies: &[],
        },
        DecisionOption {
            label: "I wonder if fish dream of being something else",
            value: "funny",
            deltas: &[points(Ending::Carefree, 1)],
            replies: &[],
        },
    ],
};

/// The eye mask in the drawer.
pub const EYE_MASK: Decision = Decision {
    id: "eyemask",
    prompt: "Perfect for 'resting' my eyes",
    options: &[
        DecisionOption {
            label: "Try it on",
            value: "try",
            deltas: &[points(Ending::Carefree, 1)],
            replies: &[
                "*You drift into a momentary daydream*",
                "That was nice... but back to reality.",
            ],
        },
        DecisionOption {
            label: "Pack it away",
            value: "pack",
            deltas: &[points(Ending::Balanced, 1)],
            replies: &["Better save this for the commute"],
        },
    ],
};

/// The water bottle.
pub const WATER: Decision = Decision {
    id: "water",
    prompt: "You're getting older after all...",
    options: &[
        DecisionOption {
            label: "Brew goji berries",
            value: "goji",
            deltas: &[points(Ending::Balanced, 1)],
            replies: &["Health before everything else"],
        },
        DecisionOption {
            label: "Drink plain water",
            value: "plain",
            deltas: &[points(Ending::Burnout, 1)],
            replies: &["No time for health rituals today"],
        },
    ],
};

/// What the protagonist dwells on during the skytrain ride.
///
/// The option value also names the `thought_<value>` counter flag.
pub const COMMUTE_THOUGHT: Decision = Decision {
    id: "commute_thought",
    prompt: "The city slides past the window. My mind keeps drifting to...",
    options: &[
        DecisionOption {
            label: "Tomorrow's deadlines",
            value: "work",
            deltas: &[points(Ending::Workaholic, 1)],
            replies: &["Maybe I can get a head start tonight."],
        },
        DecisionOption {
            label: "Dinner with friends this weekend",
            value: "life",
            deltas: &[points(Ending::Balanced, 1)],
            replies: &["It's been too long since we all got together."],
        },
        DecisionOption {
            label: "Nothing at all. I just want to sleep.",
            value: "rest",
            deltas: &[points(Ending::Burnout, 1)],
            replies: &["My eyes keep closing on their own."],
        },
    ],
};

/// The call that wakes the protagonist on the bus.
pub const PHONE_CALL: Decision = Decision {
    id: "phone_call",
    prompt: "What do you want to do?",
    options: &[
        DecisionOption {
            label: "Block the call",
            value: "block",
            deltas: &[points(Ending::Carefree, 2)],
            replies: &["Whatever it is, it can wait until tomorrow."],
        },
        DecisionOption {
            label: "Answer the call",
            value: "answer",
            deltas: &[points(Ending::Workaholic, 2), points(Ending::Burnout, 1)],
            replies: &["Of course it's the boss. There goes my evening."],
        },
    ],
};
