//! Interactive objects in the office.

use crate::decision::{self, Decision};

/// A clickable object in the office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hotspot {
    /// The computer with the unfinished report.
    Computer,
    /// The coffee cup.
    Coffee,
    /// The desk plant.
    Plant,
    /// The fish tank.
    FishTank,
    /// The eye mask.
    EyeMask,
    /// The water bottle.
    Water,
}

impl Hotspot {
    /// All hotspots in menu order.
    pub const ALL: [Hotspot; 6] = [
        Hotspot::Computer,
        Hotspot::Coffee,
        Hotspot::Plant,
        Hotspot::FishTank,
        Hotspot::EyeMask,
        Hotspot::Water,
    ];

    /// Hotspots that must be dealt with before the player may leave.
    pub const REQUIRED: [Hotspot; 2] = [Hotspot::Computer, Hotspot::FishTank];

    /// Interaction id in the ledger.
    pub fn id(self) -> &'static str {
        match self {
            Hotspot::Computer => "computer",
            Hotspot::Coffee => "coffee",
            Hotspot::Plant => "plant",
            Hotspot::FishTank => "fishtank",
            Hotspot::EyeMask => "eyemask",
            Hotspot::Water => "water",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Hotspot::Computer => "Computer",
            Hotspot::Coffee => "Coffee cup",
            Hotspot::Plant => "Plant",
            Hotspot::FishTank => "Fish tank",
            Hotspot::EyeMask => "Eye mask",
            Hotspot::Water => "Water bottle",
        }
    }

    /// The hotspot with this menu label.
    pub fn from_label(label: &str) -> Option<Hotspot> {
        Hotspot::ALL.into_iter().find(|h| h.label() == label)
    }

    /// The decision asked when the player clicks this hotspot.
    pub fn decision(self) -> &'static Decision {
        match self {
            Hotspot::Computer => &decision::COMPUTER,
            Hotspot::Coffee => &decision::COFFEE,
            Hotspot::Plant => &decision::PLANT,
            Hotspot::FishTank => &decision::FISH_TANK,
            Hotspot::EyeMask => &decision::EYE_MASK,
            Hotspot::Water => &decision::WATER,
        }
    }

    /// The line shown when the hotspot was already answered this visit.
    pub fn reminder(self) -> &'static str {
        match self {
            Hotspot::Computer => "You've already dealt with the report.",
            Hotspot::Coffee => "The cup is empty now.",
            Hotspot::Plant => "The plant will have to manage on its own for now.",
            Hotspot::FishTank => "The fish seems content after being fed.",
            Hotspot::EyeMask => "The eye mask can wait.",
            Hotspot::Water => "I've had enough to drink for now.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for hotspot in Hotspot::ALL {
            assert_eq!(Hotspot::from_label(hotspot.label()), Some(hotspot));
        }
        assert_eq!(Hotspot::from_label("Window"), None);
    }

    #[test]
    fn fish_tank_records_its_thought() {
        assert_eq!(Hotspot::FishTank.id(), "fishtank");
        assert_eq!(Hotspot::FishTank.decision().id, "fish_thought");
    }

    #[test]
    fn required_hotspots() {
        assert!(Hotspot::REQUIRED.contains(&Hotspot::Computer));
        assert!(Hotspot::REQUIRED.contains(&Hotspot::FishTank));
        assert!(!Hotspot::REQUIRED.contains(&Hotspot::Coffee));
    }
}
