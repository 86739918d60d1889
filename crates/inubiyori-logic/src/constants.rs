//! Tuning constants: vital bounds, decay rates, thresholds, experience curve.
//!
//! Rates are expressed per simulated day. Both the kennel engine and the
//! headless harness read these, so changing a value here changes the game.

pub mod vitals {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;
    /// Starting value for hunger, happiness, discipline, cleanliness, energy.
    pub const STARTING_STAT: f64 = 50.0;
    pub const STARTING_HEALTH: f64 = 100.0;
}

pub mod decay {
    pub const HUNGER_PER_DAY: f64 = 0.5;
    pub const HAPPINESS_PER_DAY: f64 = 0.3;
    pub const CLEANLINESS_PER_DAY: f64 = 0.2;
    /// Energy regenerates rather than decays.
    pub const ENERGY_REGEN_PER_DAY: f64 = 0.1;
}

pub mod health {
    /// Below this average of hunger/happiness/cleanliness the pet is sick.
    pub const NEGLECT_AVERAGE: f64 = 30.0;
    pub const DAMAGE_PER_SICK_DAY: f64 = 10.0;
    pub const RECOVERY_PER_DAY: f64 = 5.0;
    pub const FATAL_SICK_DAYS: f64 = 5.0;
    /// Mood reads "sick" below this health regardless of other vitals.
    pub const SICK_MOOD_HEALTH: f64 = 30.0;
    /// Debug `make_sick` sets exactly these.
    pub const DEBUG_SICK_HEALTH: f64 = 20.0;
    pub const DEBUG_SICK_DAYS: f64 = 3.0;
}

pub mod growth {
    pub const ADULT_POINTS: f64 = 30.0;
    pub const SENIOR_POINTS: f64 = 100.0;
}

pub mod costs {
    pub const WALK_MIN_ENERGY: f64 = 20.0;
    pub const TRAIN_MIN_ENERGY: f64 = 15.0;
    pub const PLAY_MIN_ENERGY: f64 = 10.0;
}

pub mod trainer {
    pub const BASE_DEATH_EXP: f64 = 10.0;
    pub const ADULT_EXP_BONUS: f64 = 20.0;
    pub const SENIOR_EXP_BONUS: f64 = 50.0;
    /// Experience needed to clear level `n` is `n * EXP_PER_LEVEL`.
    pub const EXP_PER_LEVEL: f64 = 100.0;
    pub const BONUS_PER_LEVEL: f64 = 0.05;
    /// Level-ups a loaded ledger may still owe before its experience is
    /// treated as corrupt.
    pub const MAX_REPAIR_LEVELS: u32 = 10;
}

/// One real minute is one simulated day.
pub const DEFAULT_SECONDS_PER_DAY: f64 = 60.0;

/// Longest display name a player can choose, in characters.
pub const MAX_NAME_CHARS: usize = 10;
