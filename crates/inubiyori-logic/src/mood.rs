//! Mood and animation state as pure functions of current vitals.

use serde::{Deserialize, Serialize};

use crate::constants::health::SICK_MOOD_HEALTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Deceased,
    Sick,
    VeryHappy,
    Happy,
    Normal,
    Unsatisfied,
    Grumpy,
}

impl Mood {
    /// Classify from liveness, health, and the hunger/happiness/cleanliness average.
    pub fn from_vitals(is_alive: bool, health: f64, care_average: f64) -> Self {
        if !is_alive {
            Mood::Deceased
        } else if health < SICK_MOOD_HEALTH {
            Mood::Sick
        } else if care_average > 80.0 {
            Mood::VeryHappy
        } else if care_average > 60.0 {
            Mood::Happy
        } else if care_average > 40.0 {
            Mood::Normal
        } else if care_average > 20.0 {
            Mood::Unsatisfied
        } else {
            Mood::Grumpy
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Deceased => "deceased",
            Mood::Sick => "sick",
            Mood::VeryHappy => "very happy",
            Mood::Happy => "happy",
            Mood::Normal => "normal",
            Mood::Unsatisfied => "unsatisfied",
            Mood::Grumpy => "grumpy",
        }
    }

    /// Sick, unsatisfied and grumpy dogs have no dedicated animation.
    pub fn animation(self) -> AnimationState {
        match self {
            Mood::VeryHappy | Mood::Happy => AnimationState::Happy,
            _ => AnimationState::Idle,
        }
    }
}

/// Sprite loop a renderer should play. A deceased pet renders as a static idle frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationState {
    Idle,
    Happy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_bands() {
        assert_eq!(Mood::from_vitals(true, 100.0, 81.0), Mood::VeryHappy);
        assert_eq!(Mood::from_vitals(true, 100.0, 80.0), Mood::Happy);
        assert_eq!(Mood::from_vitals(true, 100.0, 60.0), Mood::Normal);
        assert_eq!(Mood::from_vitals(true, 100.0, 40.0), Mood::Unsatisfied);
        assert_eq!(Mood::from_vitals(true, 100.0, 20.0), Mood::Grumpy);
        assert_eq!(Mood::from_vitals(true, 100.0, 0.0), Mood::Grumpy);
    }

    #[test]
    fn test_sick_overrides_average() {
        assert_eq!(Mood::from_vitals(true, 29.9, 95.0), Mood::Sick);
        assert_eq!(Mood::from_vitals(true, 30.0, 95.0), Mood::VeryHappy);
    }

    #[test]
    fn test_dead_overrides_everything() {
        assert_eq!(Mood::from_vitals(false, 100.0, 100.0), Mood::Deceased);
    }

    #[test]
    fn test_animation_collapse() {
        assert_eq!(Mood::VeryHappy.animation(), AnimationState::Happy);
        assert_eq!(Mood::Happy.animation(), AnimationState::Happy);
        for mood in [
            Mood::Deceased,
            Mood::Sick,
            Mood::Normal,
            Mood::Unsatisfied,
            Mood::Grumpy,
        ] {
            assert_eq!(mood.animation(), AnimationState::Idle);
        }
    }
}
