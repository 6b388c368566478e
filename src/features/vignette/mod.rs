//! # Vignette Feature
//!
//! Console mini-game: a water spirit asks whether you'll drink some water and
//! your HP goes up or down depending on the answer. Pure decoration, shares
//! nothing with the reminder app.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//! - **Toggleable**: true (cargo feature `vignette` for rendering)

#[cfg(feature = "vignette")]
pub mod render;

use rand::seq::IndexedRandom;
use rand::Rng;

pub const MAX_HP: u32 = 20;

/// HP gained by answering YES
pub const HEAL: u32 = 5;

/// Two-line flavour texts
pub const DIALOGUES: &[&str] = &[
    "* A little water spirit appears.\n* HEY! DRINK SOME WATER, OKAY?",
    "* A bright flower pops up smiling.\n* THIRSTY? WATER MAKES YOU FEEL GOOD!",
    "* A glowing water drop materializes.\n* DRINK UP! YOU'LL FEEL STRONG!",
    "* A friendly stream flows nearby, calling out.\n* LET'S DRINK WATER!",
    "* A playful raindrop dances in front of you.\n* TIME TO HYDRATE! JUST ONE SIP!",
];

pub const YES_RESPONSE: &str = "* The water refreshes your SOUL!";
pub const NO_RESPONSE: &str = "* The water spirit looks disappointed...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Yes,
    No,
}

impl Choice {
    pub fn toggled(self) -> Self {
        match self {
            Choice::Yes => Choice::No,
            Choice::No => Choice::Yes,
        }
    }
}

/// HP and the current selection, kept across rounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vignette {
    pub hp: u32,
    pub max_hp: u32,
    pub selected: Choice,
}

impl Default for Vignette {
    fn default() -> Self {
        Vignette {
            hp: MAX_HP,
            max_hp: MAX_HP,
            selected: Choice::Yes,
        }
    }
}

impl Vignette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.selected = self.selected.toggled();
    }

    /// Apply the selected answer: YES heals (capped at max), NO hurts
    /// (floored at 1). Returns the response line.
    pub fn confirm(&mut self) -> &'static str {
        match self.selected {
            Choice::Yes => {
                self.hp = (self.hp + HEAL).min(self.max_hp);
                YES_RESPONSE
            }
            Choice::No => {
                self.hp = self.hp.saturating_sub(1).max(1);
                NO_RESPONSE
            }
        }
    }
}

pub fn pick_dialogue<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    DIALOGUES.choose(rng).copied().unwrap_or(DIALOGUES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_heals_up_to_max() {
        let mut state = Vignette {
            hp: 12,
            ..Vignette::new()
        };
        assert_eq!(state.confirm(), YES_RESPONSE);
        assert_eq!(state.hp, 17);
        state.confirm();
        assert_eq!(state.hp, MAX_HP);
    }

    #[test]
    fn test_no_hurts_but_never_below_one() {
        let mut state = Vignette {
            hp: 2,
            selected: Choice::No,
            ..Vignette::new()
        };
        assert_eq!(state.confirm(), NO_RESPONSE);
        assert_eq!(state.hp, 1);
        state.confirm();
        assert_eq!(state.hp, 1);
    }

    #[test]
    fn test_toggle_switches_selection() {
        let mut state = Vignette::new();
        assert_eq!(state.selected, Choice::Yes);
        state.toggle();
        assert_eq!(state.selected, Choice::No);
        state.toggle();
        assert_eq!(state.selected, Choice::Yes);
    }

    #[test]
    fn test_dialogues_are_two_lines() {
        assert!(DIALOGUES.iter().all(|d| d.lines().count() == 2));
        let mut rng = rand::rng();
        assert!(DIALOGUES.contains(&pick_dialogue(&mut rng)));
    }
}
