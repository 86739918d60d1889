//! Trainer progression shared across every dog the player raises.
//!
//! The ledger only changes when a dog dies: the death is written to the
//! graveyard, counted, and converted into experience. Experience rolls over
//! into levels, and every level raises all five bonus multipliers.
//!
//! # Experience curve
//!
//! Clearing level `n` costs `n * 100` experience. A single grant can clear
//! several levels; the bonus increment is applied once per level gained.
//!
//! ```
//! use inubiyori_logic::trainer::TrainerLedger;
//!
//! let mut ledger = TrainerLedger::default();
//! assert_eq!(ledger.add_experience(95.0), 0);
//! assert_eq!(ledger.add_experience(10.0), 1);
//! assert_eq!(ledger.level(), 2);
//! assert_eq!(ledger.experience(), 5.0);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::trainer::{
    ADULT_EXP_BONUS, BASE_DEATH_EXP, BONUS_PER_LEVEL, EXP_PER_LEVEL, MAX_REPAIR_LEVELS,
    SENIOR_EXP_BONUS,
};
use crate::graveyard::{GraveRecord, Graveyard};
use crate::pet::{GrowthStage, Pet};
use crate::species::Species;

/// The five bonus categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    Feed,
    Happiness,
    Discipline,
    Cleanliness,
    Energy,
}

impl BonusKind {
    pub const ALL: [BonusKind; 5] = [
        BonusKind::Feed,
        BonusKind::Happiness,
        BonusKind::Discipline,
        BonusKind::Cleanliness,
        BonusKind::Energy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BonusKind::Feed => "feed",
            BonusKind::Happiness => "happiness",
            BonusKind::Discipline => "discipline",
            BonusKind::Cleanliness => "cleanliness",
            BonusKind::Energy => "energy",
        }
    }
}

/// Multipliers on action gains. All start at 1.0 and only ever rise.
///
/// `energy_bonus` levels up with the rest but no action consumes it yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerBonuses {
    pub feed_bonus: f64,
    pub happiness_bonus: f64,
    pub discipline_bonus: f64,
    pub cleanliness_bonus: f64,
    pub energy_bonus: f64,
}

impl Default for TrainerBonuses {
    fn default() -> Self {
        Self {
            feed_bonus: 1.0,
            happiness_bonus: 1.0,
            discipline_bonus: 1.0,
            cleanliness_bonus: 1.0,
            energy_bonus: 1.0,
        }
    }
}

impl TrainerBonuses {
    pub fn multiplier(&self, kind: BonusKind) -> f64 {
        match kind {
            BonusKind::Feed => self.feed_bonus,
            BonusKind::Happiness => self.happiness_bonus,
            BonusKind::Discipline => self.discipline_bonus,
            BonusKind::Cleanliness => self.cleanliness_bonus,
            BonusKind::Energy => self.energy_bonus,
        }
    }

    fn slot(&mut self, kind: BonusKind) -> &mut f64 {
        match kind {
            BonusKind::Feed => &mut self.feed_bonus,
            BonusKind::Happiness => &mut self.happiness_bonus,
            BonusKind::Discipline => &mut self.discipline_bonus,
            BonusKind::Cleanliness => &mut self.cleanliness_bonus,
            BonusKind::Energy => &mut self.energy_bonus,
        }
    }

    fn raise_all(&mut self, amount: f64) {
        for kind in BonusKind::ALL {
            *self.slot(kind) += amount;
        }
    }

    /// Bonus expressed as a percentage over baseline, e.g. `1.15` → `15`.
    pub fn percent_over_base(&self, kind: BonusKind) -> f64 {
        ((self.multiplier(kind) - 1.0) * 100.0).max(0.0)
    }

    /// Multipliers below baseline are lifted back to 1.0.
    fn sanitize(&mut self) {
        for kind in BonusKind::ALL {
            let slot = self.slot(kind);
            if !slot.is_finite() || *slot < 1.0 {
                *slot = 1.0;
            }
        }
    }
}

/// Experience awarded for a dog that died at `stage`.
pub fn experience_for_stage(stage: GrowthStage) -> f64 {
    match stage {
        GrowthStage::Puppy => BASE_DEATH_EXP,
        GrowthStage::Adult => BASE_DEATH_EXP + ADULT_EXP_BONUS,
        GrowthStage::Senior => BASE_DEATH_EXP + SENIOR_EXP_BONUS,
    }
}

/// What a recorded death did to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct DeathRecord {
    pub grave: GraveRecord,
    pub experience_gained: f64,
    pub levels_gained: u32,
}

fn default_dogs_raised() -> BTreeMap<Species, u32> {
    Species::ALL.iter().map(|&s| (s, 0)).collect()
}

/// Read-only snapshot of the ledger for trainer info screens.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerSummary {
    pub level: u32,
    pub experience: f64,
    pub next_level_threshold: f64,
    pub total_deaths: u32,
    pub max_growth_stage: GrowthStage,
    pub dogs_raised: Vec<(Species, u32)>,
    /// Percentage over baseline for each bonus.
    pub bonus_percent: Vec<(BonusKind, f64)>,
}

impl fmt::Display for TrainerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Trainer level {} ({:.0}/{:.0} exp)",
            self.level, self.experience, self.next_level_threshold
        )?;
        writeln!(
            f,
            "Dogs remembered: {}  Oldest stage reached: {}",
            self.total_deaths,
            self.max_growth_stage.label()
        )?;
        for (species, count) in &self.dogs_raised {
            writeln!(f, "  {:10} raised: {}", species.display_name(), count)?;
        }
        for (kind, pct) in &self.bonus_percent {
            writeln!(f, "  {:11} bonus: +{:.0}%", kind.label(), pct)?;
        }
        Ok(())
    }
}

/// Player-wide progression. Persisted as `trainer_data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerLedger {
    #[serde(rename = "trainer_level")]
    level: u32,
    #[serde(rename = "trainer_exp")]
    experience: f64,
    dogs_raised: BTreeMap<Species, u32>,
    total_deaths: u32,
    max_growth_stage: GrowthStage,
    bonuses: TrainerBonuses,
}

impl Default for TrainerLedger {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0.0,
            dogs_raised: default_dogs_raised(),
            total_deaths: 0,
            max_growth_stage: GrowthStage::Puppy,
            bonuses: TrainerBonuses::default(),
        }
    }
}

impl TrainerLedger {
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> f64 {
        self.experience
    }

    /// Experience needed to clear the current level.
    pub fn next_level_threshold(&self) -> f64 {
        self.level as f64 * EXP_PER_LEVEL
    }

    pub fn total_deaths(&self) -> u32 {
        self.total_deaths
    }

    pub fn max_growth_stage(&self) -> GrowthStage {
        self.max_growth_stage
    }

    pub fn bonuses(&self) -> &TrainerBonuses {
        &self.bonuses
    }

    pub fn dogs_raised(&self, species: Species) -> u32 {
        self.dogs_raised.get(&species).copied().unwrap_or(0)
    }

    pub fn total_dogs_raised(&self) -> u32 {
        self.dogs_raised.values().sum()
    }

    pub fn summary(&self) -> TrainerSummary {
        TrainerSummary {
            level: self.level,
            experience: self.experience,
            next_level_threshold: self.next_level_threshold(),
            total_deaths: self.total_deaths,
            max_growth_stage: self.max_growth_stage,
            dogs_raised: Species::ALL
                .iter()
                .map(|&s| (s, self.dogs_raised(s)))
                .collect(),
            bonus_percent: BonusKind::ALL
                .iter()
                .map(|&k| (k, self.bonuses.percent_over_base(k)))
                .collect(),
        }
    }

    /// Add experience, rolling overflow into levels. Returns levels gained.
    ///
    /// Experience too large to pay down (the level counter would overflow,
    /// or the threshold is below `f64` precision) is dropped once the
    /// levels it can buy are credited.
    pub fn add_experience(&mut self, exp: f64) -> u32 {
        if !exp.is_finite() || exp <= 0.0 {
            return 0;
        }
        self.experience += exp;
        let mut gained = 0;
        while self.experience >= self.next_level_threshold() {
            let threshold = self.next_level_threshold();
            let remaining = self.experience - threshold;
            let Some(next_level) = self.level.checked_add(1) else {
                self.experience = 0.0;
                break;
            };
            if remaining == self.experience {
                self.experience = 0.0;
                break;
            }
            self.experience = remaining;
            self.level = next_level;
            self.bonuses.raise_all(BONUS_PER_LEVEL);
            gained += 1;
        }
        gained
    }

    /// Experience needed to climb `levels` levels from the current one.
    fn cost_of_levels(&self, levels: u32) -> f64 {
        let (l, n) = (self.level as f64, levels as f64);
        EXP_PER_LEVEL * (n * l + n * (n - 1.0) / 2.0)
    }

    /// Bury `pet` and credit the trainer for raising it.
    pub fn record_death(
        &mut self,
        pet: &Pet,
        graveyard: &mut Graveyard,
        died_at: f64,
    ) -> DeathRecord {
        let grave = GraveRecord::from_pet(pet, died_at);
        graveyard.bury(grave.clone());

        self.total_deaths += 1;
        *self.dogs_raised.entry(pet.species()).or_insert(0) += 1;
        self.max_growth_stage = self.max_growth_stage.max(pet.growth_stage());

        let experience_gained = experience_for_stage(pet.growth_stage());
        let levels_gained = self.add_experience(experience_gained);

        DeathRecord {
            grave,
            experience_gained,
            levels_gained,
        }
    }

    /// Repair a document read from disk so the ledger invariants hold.
    ///
    /// Experience worth a few levels is rolled over. Experience worth more
    /// than [`MAX_REPAIR_LEVELS`] levels, negative or non-finite, cannot have
    /// been earned and is zeroed. Returns `true` when that happened.
    pub fn sanitize(&mut self) -> bool {
        self.level = self.level.max(1);
        for species in Species::ALL {
            self.dogs_raised.entry(species).or_insert(0);
        }
        self.bonuses.sanitize();

        let pending = std::mem::take(&mut self.experience);
        let plausible = pending.is_finite()
            && pending >= 0.0
            && pending < self.cost_of_levels(MAX_REPAIR_LEVELS + 1);
        if plausible {
            self.add_experience(pending);
        }
        !plausible
    }
}
