//! Pure pet lifecycle logic for Inubiyori.
//!
//! This crate contains all simulation rules that are independent of the
//! filesystem, rendering, or any frame loop. Functions take plain data and
//! return results, so every rule is unit-testable and the same code drives
//! both the kennel engine and the headless harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`actions`] | Care actions, action reports, and string parsing at the input boundary |
//! | [`clock`] | Wall-clock to simulated-day conversion and timestamp formatting |
//! | [`constants`] | Tuning values: decay rates, thresholds, experience curve |
//! | [`error`] | Input validation errors |
//! | [`graveyard`] | Append-only memorial records of deceased pets |
//! | [`mood`] | Mood and animation state derived from vitals |
//! | [`pet`] | The per-dog lifecycle state machine |
//! | [`species`] | Closed species enum and static trait table |
//! | [`trainer`] | Cross-pet trainer progression and the bonus table |

pub mod actions;
pub mod clock;
pub mod constants;
pub mod error;
pub mod graveyard;
pub mod mood;
pub mod pet;
pub mod species;
pub mod trainer;

pub use actions::{Action, ActionOutcome, ActionReport};
pub use clock::StatClock;
pub use error::InputError;
pub use graveyard::{GraveRecord, Graveyard};
pub use mood::{AnimationState, Mood};
pub use pet::{DeathCause, GrowthStage, Pet, StatusUpdate, Vital};
pub use species::{Species, SpeciesTraits};
pub use trainer::{BonusKind, DeathRecord, TrainerBonuses, TrainerLedger, TrainerSummary};
