//! Care actions and the reports they produce.
//!
//! Every handler is all-or-nothing: either the full effect applies or the
//! pet is left untouched and the report says why.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::trainer::BonusKind;

/// The five care actions a player can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Feed,
    Walk,
    Train,
    Clean,
    Play,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Feed,
        Action::Walk,
        Action::Train,
        Action::Clean,
        Action::Play,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::Feed => "feed",
            Action::Walk => "walk",
            Action::Train => "train",
            Action::Clean => "clean",
            Action::Play => "play",
        }
    }

    /// Which trainer bonus scales this action's gains.
    pub fn bonus_kind(self) -> BonusKind {
        match self {
            Action::Feed => BonusKind::Feed,
            Action::Walk | Action::Play => BonusKind::Happiness,
            Action::Train => BonusKind::Discipline,
            Action::Clean => BonusKind::Cleanliness,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Action {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Action::ALL
            .into_iter()
            .find(|a| a.label() == wanted)
            .ok_or_else(|| InputError::UnknownAction(s.to_string()))
    }
}

/// How an action request resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Success,
    /// Not enough energy; nothing changed.
    TooTired,
    /// The pet has died; nothing changed.
    Gone,
    /// No pet is selected to receive the action.
    NoPet,
    /// The request was valid but had nothing left to do.
    Unchanged,
}

/// Outcome plus the status line shown to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReport {
    pub outcome: ActionOutcome,
    pub message: String,
}

impl ActionReport {
    pub fn new(outcome: ActionOutcome, message: impl Into<String>) -> Self {
        Self {
            outcome,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ActionOutcome::Success, message)
    }

    pub fn gone(name: &str) -> Self {
        Self::new(ActionOutcome::Gone, format!("{name} is no longer with us..."))
    }

    pub fn no_pet() -> Self {
        Self::new(ActionOutcome::NoPet, "Adopt or select a dog first.")
    }

    pub fn is_success(&self) -> bool {
        self.outcome == ActionOutcome::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_labels() {
        for action in Action::ALL {
            assert_eq!(action.label().parse::<Action>(), Ok(action));
        }
        assert_eq!(" WALK ".parse::<Action>(), Ok(Action::Walk));
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert_eq!(
            "bathe".parse::<Action>(),
            Err(InputError::UnknownAction("bathe".into()))
        );
    }

    #[test]
    fn test_walk_and_play_share_happiness_bonus() {
        assert_eq!(Action::Walk.bonus_kind(), BonusKind::Happiness);
        assert_eq!(Action::Play.bonus_kind(), BonusKind::Happiness);
        assert_eq!(Action::Feed.bonus_kind(), BonusKind::Feed);
    }
}
