//! Memorial records of dogs that have passed.
//!
//! The graveyard is append-only: records are added through
//! [`TrainerLedger::record_death`](crate::trainer::TrainerLedger::record_death)
//! and are never edited or pruned. Insertion order is death order.

use serde::{Deserialize, Serialize};

use crate::clock::format_timestamp;
use crate::pet::{GrowthStage, Pet};
use crate::species::Species;

/// Terminal snapshot of a dead pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraveRecord {
    pub name: String,
    #[serde(rename = "dog_type")]
    pub species: Species,
    pub growth_stage: GrowthStage,
    /// Local time of death, `YYYY-MM-DD HH:MM:SS`.
    pub death_date: String,
    #[serde(rename = "lifespan")]
    pub lifespan_days: f64,
}

impl GraveRecord {
    pub fn from_pet(pet: &Pet, died_at: f64) -> Self {
        Self {
            name: pet.name().to_string(),
            species: pet.species(),
            growth_stage: pet.growth_stage(),
            death_date: format_timestamp(died_at),
            lifespan_days: pet.lifespan_days(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Graveyard {
    records: Vec<GraveRecord>,
}

impl Graveyard {
    pub(crate) fn bury(&mut self, record: GraveRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[GraveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GraveRecord> {
        self.records.iter()
    }

    /// Most recent burial first, for memorial listings.
    pub fn newest_first(&self) -> impl Iterator<Item = &GraveRecord> {
        self.records.iter().rev()
    }

    /// Longest-lived dog on record.
    pub fn longest_lived(&self) -> Option<&GraveRecord> {
        self.records
            .iter()
            .max_by(|a, b| a.lifespan_days.total_cmp(&b.lifespan_days))
    }
}
