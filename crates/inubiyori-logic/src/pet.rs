//! The per-dog lifecycle state machine.
//!
//! A [`Pet`] owns six bounded vitals plus its growth and aging counters.
//! Care actions mutate vitals immediately; [`Pet::update_status`] applies
//! passive decay, sickness, growth, and aging for the simulated time that
//! has passed since the last update.
//!
//! # Invariants
//!
//! - Every vital stays within `0.0..=100.0` after every public call.
//! - `is_alive` only ever goes from `true` to `false`.
//! - `growth_stage` never moves backwards.
//! - `lifespan_days` never decreases; `sick_days` never drops below zero.
//!
//! ```
//! use inubiyori_logic::pet::Pet;
//! use inubiyori_logic::species::Species;
//!
//! let mut pet = Pet::new(Species::Corgi, 0.0);
//! let report = pet.feed(None);
//! assert!(report.is_success());
//! assert_eq!(pet.hunger(), 80.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::actions::{Action, ActionOutcome, ActionReport};
use crate::clock::StatClock;
use crate::constants::{costs, decay, growth, health, vitals, MAX_NAME_CHARS};
use crate::error::InputError;
use crate::mood::{AnimationState, Mood};
use crate::species::{Species, SpeciesTraits};
use crate::trainer::TrainerBonuses;

/// Ordered life phase. Ordering is `Puppy < Adult < Senior`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum GrowthStage {
    #[default]
    Puppy,
    Adult,
    Senior,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 3] = [GrowthStage::Puppy, GrowthStage::Adult, GrowthStage::Senior];

    /// Highest stage whose growth point threshold is met.
    pub fn from_growth_points(points: f64) -> Self {
        if points >= growth::SENIOR_POINTS {
            GrowthStage::Senior
        } else if points >= growth::ADULT_POINTS {
            GrowthStage::Adult
        } else {
            GrowthStage::Puppy
        }
    }

    /// Growth points needed to reach this stage.
    pub fn threshold(self) -> f64 {
        match self {
            GrowthStage::Puppy => 0.0,
            GrowthStage::Adult => growth::ADULT_POINTS,
            GrowthStage::Senior => growth::SENIOR_POINTS,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            GrowthStage::Puppy => Some(GrowthStage::Adult),
            GrowthStage::Adult => Some(GrowthStage::Senior),
            GrowthStage::Senior => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GrowthStage::Puppy => "puppy",
            GrowthStage::Adult => "adult",
            GrowthStage::Senior => "senior",
        }
    }
}

/// Why a pet died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Health reached zero.
    HealthDepleted,
    /// Too many consecutive-ish days spent neglected.
    ProlongedIllness,
    /// Reached the species lifespan ceiling.
    OldAge,
    /// Ended through the debug controls.
    Forced,
}

/// One of the six bounded vitals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vital {
    Hunger,
    Happiness,
    Discipline,
    Cleanliness,
    Energy,
    Health,
}

impl Vital {
    pub const ALL: [Vital; 6] = [
        Vital::Hunger,
        Vital::Happiness,
        Vital::Discipline,
        Vital::Cleanliness,
        Vital::Energy,
        Vital::Health,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Vital::Hunger => "hunger",
            Vital::Happiness => "happiness",
            Vital::Discipline => "discipline",
            Vital::Cleanliness => "cleanliness",
            Vital::Energy => "energy",
            Vital::Health => "health",
        }
    }
}

/// What a status update changed, for logging and UI notices.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatusUpdate {
    pub elapsed_days: f64,
    pub grew_into: Option<GrowthStage>,
    pub died: Option<DeathCause>,
}

#[inline]
fn clamp_vital(value: f64) -> f64 {
    value.clamp(vitals::MIN, vitals::MAX)
}

/// Trim a chosen name, defaulting to the species name when blank.
pub fn validate_name(species: Species, raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(species.display_name().to_string());
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(InputError::NameTooLong {
            name: trimmed.to_string(),
            max: MAX_NAME_CHARS,
        });
    }
    Ok(trimmed.to_string())
}

/// One dog. Field order matches the on-disk document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    #[serde(rename = "dog_type")]
    species: Species,
    name: String,
    hunger: f64,
    happiness: f64,
    discipline: f64,
    cleanliness: f64,
    energy: f64,
    growth_stage: GrowthStage,
    birth_time: f64,
    last_update_time: f64,
    growth_points: f64,
    lifespan_days: f64,
    is_alive: bool,
    health: f64,
    sick_days: f64,
}

impl Pet {
    /// A freshly adopted dog named after its species.
    pub fn new(species: Species, now: f64) -> Self {
        Self {
            species,
            name: species.display_name().to_string(),
            hunger: vitals::STARTING_STAT,
            happiness: vitals::STARTING_STAT,
            discipline: vitals::STARTING_STAT,
            cleanliness: vitals::STARTING_STAT,
            energy: vitals::STARTING_STAT,
            growth_stage: GrowthStage::Puppy,
            birth_time: now,
            last_update_time: now,
            growth_points: 0.0,
            lifespan_days: 0.0,
            is_alive: true,
            health: vitals::STARTING_HEALTH,
            sick_days: 0.0,
        }
    }

    /// A freshly adopted dog with a player-chosen name.
    pub fn named(species: Species, name: &str, now: f64) -> Result<Self, InputError> {
        let mut pet = Self::new(species, now);
        pet.name = validate_name(species, name)?;
        Ok(pet)
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn traits(&self) -> &'static SpeciesTraits {
        self.species.traits()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn growth_stage(&self) -> GrowthStage {
        self.growth_stage
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    pub fn birth_time(&self) -> f64 {
        self.birth_time
    }

    pub fn last_update_time(&self) -> f64 {
        self.last_update_time
    }

    pub fn lifespan_days(&self) -> f64 {
        self.lifespan_days
    }

    pub fn sick_days(&self) -> f64 {
        self.sick_days
    }

    pub fn hunger(&self) -> f64 {
        self.hunger
    }

    pub fn happiness(&self) -> f64 {
        self.happiness
    }

    pub fn discipline(&self) -> f64 {
        self.discipline
    }

    pub fn cleanliness(&self) -> f64 {
        self.cleanliness
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn growth_points(&self) -> f64 {
        self.growth_points
    }

    pub fn vital(&self, vital: Vital) -> f64 {
        match vital {
            Vital::Hunger => self.hunger,
            Vital::Happiness => self.happiness,
            Vital::Discipline => self.discipline,
            Vital::Cleanliness => self.cleanliness,
            Vital::Energy => self.energy,
            Vital::Health => self.health,
        }
    }

    /// All six vitals in [`Vital::ALL`] order.
    pub fn vitals(&self) -> [f64; 6] {
        Vital::ALL.map(|v| self.vital(v))
    }

    fn vital_mut(&mut self, vital: Vital) -> &mut f64 {
        match vital {
            Vital::Hunger => &mut self.hunger,
            Vital::Happiness => &mut self.happiness,
            Vital::Discipline => &mut self.discipline,
            Vital::Cleanliness => &mut self.cleanliness,
            Vital::Energy => &mut self.energy,
            Vital::Health => &mut self.health,
        }
    }

    /// Overwrite a vital, clamped to `0.0..=100.0`. Non-finite values are ignored.
    /// Does nothing on a dead pet.
    pub fn set_vital(&mut self, vital: Vital, value: f64) {
        if self.is_alive && value.is_finite() {
            *self.vital_mut(vital) = clamp_vital(value);
        }
    }

    /// Overwrite the growth accumulator, floored at zero. The stage follows
    /// on the next update and never moves backwards.
    pub fn set_growth_points(&mut self, points: f64) {
        if self.is_alive && points.is_finite() {
            self.growth_points = points.max(0.0);
        }
    }

    /// Average of hunger, happiness and cleanliness; drives mood and sickness.
    pub fn care_average(&self) -> f64 {
        (self.hunger + self.happiness + self.cleanliness) / 3.0
    }

    pub fn mood(&self) -> Mood {
        Mood::from_vitals(self.is_alive, self.health, self.care_average())
    }

    pub fn animation_state(&self) -> AnimationState {
        self.mood().animation()
    }

    /// Repair a document read from disk: clamp vitals, floor counters, and
    /// lift the stage to whatever the growth points already earned.
    pub fn sanitize(&mut self) {
        for vital in Vital::ALL {
            let v = self.vital_mut(vital);
            *v = if v.is_finite() {
                clamp_vital(*v)
            } else {
                vitals::STARTING_STAT
            };
        }
        for counter in [
            &mut self.growth_points,
            &mut self.lifespan_days,
            &mut self.sick_days,
        ] {
            if !counter.is_finite() || *counter < 0.0 {
                *counter = 0.0;
            }
        }
        self.growth_stage = self
            .growth_stage
            .max(GrowthStage::from_growth_points(self.growth_points));
        if self.name.trim().is_empty() {
            self.name = self.species.display_name().to_string();
        }
    }

    // ── Care actions ────────────────────────────────────────────────────

    /// Apply a care action, scaling its gains by the matching trainer bonus.
    pub fn perform(&mut self, action: Action, bonuses: Option<&TrainerBonuses>) -> ActionReport {
        if !self.is_alive {
            return ActionReport::gone(&self.name);
        }
        let bonus = bonuses.map_or(1.0, |b| b.multiplier(action.bonus_kind()));
        match action {
            Action::Feed => self.apply_feed(bonus),
            Action::Walk => self.apply_walk(bonus),
            Action::Train => self.apply_train(bonus),
            Action::Clean => self.apply_clean(bonus),
            Action::Play => self.apply_play(bonus),
        }
    }

    pub fn feed(&mut self, bonuses: Option<&TrainerBonuses>) -> ActionReport {
        self.perform(Action::Feed, bonuses)
    }

    pub fn walk(&mut self, bonuses: Option<&TrainerBonuses>) -> ActionReport {
        self.perform(Action::Walk, bonuses)
    }

    pub fn train(&mut self, bonuses: Option<&TrainerBonuses>) -> ActionReport {
        self.perform(Action::Train, bonuses)
    }

    pub fn clean(&mut self, bonuses: Option<&TrainerBonuses>) -> ActionReport {
        self.perform(Action::Clean, bonuses)
    }

    pub fn play(&mut self, bonuses: Option<&TrainerBonuses>) -> ActionReport {
        self.perform(Action::Play, bonuses)
    }

    fn too_tired(&self, activity: &str) -> ActionReport {
        ActionReport::new(
            ActionOutcome::TooTired,
            format!("{} is too tired to {}...", self.name, activity),
        )
    }

    fn apply_feed(&mut self, bonus: f64) -> ActionReport {
        self.hunger = clamp_vital(self.hunger + 30.0 * bonus);
        self.energy = clamp_vital(self.energy + 10.0 * bonus);
        self.health = clamp_vital(self.health + 5.0 * bonus);
        self.growth_points += 1.0;
        ActionReport::success(format!("{} gobbled up the meal!", self.name))
    }

    fn apply_walk(&mut self, bonus: f64) -> ActionReport {
        if self.energy < costs::WALK_MIN_ENERGY {
            return self.too_tired("go for a walk");
        }
        self.happiness = clamp_vital(self.happiness + 20.0 * bonus);
        self.health = clamp_vital(self.health + 10.0 * bonus);
        self.hunger = clamp_vital(self.hunger - 15.0);
        self.energy = clamp_vital(self.energy - 20.0);
        self.cleanliness = clamp_vital(self.cleanliness - 10.0);
        self.growth_points += 2.0;
        ActionReport::success(format!("You and {} had a lovely walk!", self.name))
    }

    fn apply_train(&mut self, bonus: f64) -> ActionReport {
        if self.energy < costs::TRAIN_MIN_ENERGY {
            return self.too_tired("focus on training");
        }
        self.discipline = clamp_vital(self.discipline + 25.0 * bonus);
        self.energy = clamp_vital(self.energy - 15.0);
        self.happiness = clamp_vital(self.happiness - 5.0);
        self.growth_points += 1.5;
        ActionReport::success(format!("{} worked hard at training!", self.name))
    }

    fn apply_clean(&mut self, bonus: f64) -> ActionReport {
        self.cleanliness = clamp_vital(self.cleanliness + 40.0 * bonus);
        self.health = clamp_vital(self.health + 5.0 * bonus);
        ActionReport::success(format!("You tidied up after {}!", self.name))
    }

    fn apply_play(&mut self, bonus: f64) -> ActionReport {
        if self.energy < costs::PLAY_MIN_ENERGY {
            return self.too_tired("play");
        }
        self.happiness = clamp_vital(self.happiness + 30.0 * bonus);
        self.energy = clamp_vital(self.energy - 15.0);
        self.growth_points += 1.0;
        ActionReport::success(format!("{} had a blast playing with a toy!", self.name))
    }

    // ── Time-driven update ──────────────────────────────────────────────

    /// Advance to `now`, converting the wall-clock gap with `clock`.
    ///
    /// Does nothing when no time has passed (or the clock went backwards),
    /// and leaves the timestamp untouched in that case.
    pub fn update_status(&mut self, now: f64, clock: &StatClock) -> StatusUpdate {
        if !self.is_alive {
            return StatusUpdate::default();
        }
        let elapsed = clock.elapsed_days(self.last_update_time, now);
        if !(elapsed > 0.0) {
            return StatusUpdate::default();
        }
        let update = self.advance(elapsed);
        self.last_update_time = now;
        update
    }

    /// Apply `elapsed_days` of decay, health, growth and aging.
    pub fn advance(&mut self, elapsed_days: f64) -> StatusUpdate {
        if !self.is_alive || !elapsed_days.is_finite() || elapsed_days <= 0.0 {
            return StatusUpdate::default();
        }
        let traits = self.traits();
        let e = elapsed_days;
        let mut update = StatusUpdate {
            elapsed_days: e,
            ..Default::default()
        };

        self.lifespan_days += e;

        self.hunger = clamp_vital(self.hunger - decay::HUNGER_PER_DAY * traits.hunger_rate * e);
        self.happiness = clamp_vital(self.happiness - decay::HAPPINESS_PER_DAY * e);
        self.cleanliness = clamp_vital(self.cleanliness - decay::CLEANLINESS_PER_DAY * e);
        self.energy =
            clamp_vital(self.energy + decay::ENERGY_REGEN_PER_DAY * traits.energy_rate * e);

        if let Some(cause) = self.update_health(e) {
            self.die();
            update.died = Some(cause);
            return update;
        }

        update.grew_into = self.update_growth(e);

        if self.lifespan_days >= traits.max_lifespan_days {
            self.die();
            update.died = Some(DeathCause::OldAge);
        }
        update
    }

    fn update_health(&mut self, e: f64) -> Option<DeathCause> {
        if self.care_average() < health::NEGLECT_AVERAGE {
            self.health = clamp_vital(self.health - health::DAMAGE_PER_SICK_DAY * e);
            self.sick_days += e;
        } else {
            self.health = clamp_vital(self.health + health::RECOVERY_PER_DAY * e);
            self.sick_days = (self.sick_days - e).max(0.0);
        }

        if self.health <= 0.0 {
            Some(DeathCause::HealthDepleted)
        } else if self.sick_days >= health::FATAL_SICK_DAYS {
            Some(DeathCause::ProlongedIllness)
        } else {
            None
        }
    }

    /// Returns the new stage when this update crossed a threshold.
    fn update_growth(&mut self, e: f64) -> Option<GrowthStage> {
        let health_factor = self.health / vitals::MAX;
        self.growth_points += self.traits().growth_rate * e * health_factor;

        let reached = GrowthStage::from_growth_points(self.growth_points);
        if reached > self.growth_stage {
            self.growth_stage = reached;
            Some(reached)
        } else {
            None
        }
    }

    fn die(&mut self) {
        self.is_alive = false;
    }

    // ── Debug controls ──────────────────────────────────────────────────

    /// Jump straight to the next growth stage.
    pub fn force_grow(&mut self) -> ActionReport {
        if !self.is_alive {
            return ActionReport::gone(&self.name);
        }
        match self.growth_stage.next() {
            Some(next) => {
                self.growth_stage = next;
                self.growth_points = self.growth_points.max(next.threshold());
                ActionReport::success(format!("{} grew into {}!", self.name, next.label()))
            }
            None => ActionReport::new(
                ActionOutcome::Unchanged,
                format!("{} can't grow any further.", self.name),
            ),
        }
    }

    /// Put the dog into a serious but survivable illness.
    pub fn make_sick(&mut self) -> ActionReport {
        if !self.is_alive {
            return ActionReport::gone(&self.name);
        }
        self.health = health::DEBUG_SICK_HEALTH;
        self.sick_days = health::DEBUG_SICK_DAYS;
        ActionReport::success(format!("{} fell ill!", self.name))
    }

    pub fn force_kill(&mut self) -> ActionReport {
        if !self.is_alive {
            return ActionReport::gone(&self.name);
        }
        self.die();
        self.health = vitals::MIN;
        ActionReport::success(format!("{} has gone to sleep forever...", self.name))
    }
}
