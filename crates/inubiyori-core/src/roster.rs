//! Multi-pet orchestration: the live dogs, the selection, and reaping.
//!
//! The roster owns the [`PersistenceStore`] together with the trainer
//! ledger and graveyard it loads from it, so every mutation can be written
//! back immediately. All calls are synchronous; the caller's loop decides
//! how often to [`tick`](Roster::tick).

use std::collections::BTreeMap;

use inubiyori_logic::clock::unix_now;
use inubiyori_logic::{
    Action, ActionReport, DeathCause, DeathRecord, GrowthStage, Graveyard, Pet, Species,
    StatClock, TrainerLedger,
};

use crate::config::KennelConfig;
use crate::error::{PersistError, RosterError};
use crate::persistence::{PersistenceStore, PetId};

/// A dog removed from the roster because it died.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaped {
    pub id: PetId,
    /// `None` when the dog was already dead on disk.
    pub cause: Option<DeathCause>,
    pub record: DeathRecord,
}

/// Everything one tick changed.
#[derive(Debug, Default)]
pub struct TickReport {
    pub updated: usize,
    pub grew: Vec<(PetId, GrowthStage)>,
    pub reaped: Vec<Reaped>,
    /// Writes that failed this tick. In-memory state is still advanced.
    pub persist_errors: Vec<PersistError>,
}

pub struct Roster {
    store: PersistenceStore,
    clock: StatClock,
    ledger: TrainerLedger,
    graveyard: Graveyard,
    pets: BTreeMap<PetId, Pet>,
    selected: Option<PetId>,
    /// Reaped dogs whose files stay on disk until the graveyard and ledger
    /// are written.
    unburied: Vec<PetId>,
}

impl Roster {
    /// Open the save tree named by `config` and load everything in it.
    pub fn open(config: &KennelConfig) -> Result<Self, RosterError> {
        config.validate()?;
        let clock = config.clock()?;
        let store = PersistenceStore::open(&config.save_dir)?;
        Ok(Self::load(store, clock))
    }

    /// Load trainer data, graveyard and live pets from `store`.
    /// The first pet by id is selected.
    pub fn load(store: PersistenceStore, clock: StatClock) -> Self {
        let ledger = store.load_trainer();
        let graveyard = store.load_graveyard();
        let pets: BTreeMap<PetId, Pet> = store.load_pets().into_iter().collect();
        let selected = pets
            .iter()
            .find(|(_, pet)| pet.is_alive())
            .map(|(id, _)| id.clone());
        log::info!(
            "Loaded kennel from {}: {} dog(s), {} grave(s), trainer level {}",
            store.root().display(),
            pets.len(),
            graveyard.len(),
            ledger.level()
        );
        Self {
            store,
            clock,
            ledger,
            graveyard,
            pets,
            selected,
            unburied: Vec::new(),
        }
    }

    pub fn store(&self) -> &PersistenceStore {
        &self.store
    }

    pub fn clock(&self) -> &StatClock {
        &self.clock
    }

    pub fn ledger(&self) -> &TrainerLedger {
        &self.ledger
    }

    pub fn graveyard(&self) -> &Graveyard {
        &self.graveyard
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    pub fn pets(&self) -> impl Iterator<Item = (&PetId, &Pet)> {
        self.pets.iter()
    }

    pub fn pet(&self, id: &str) -> Option<&Pet> {
        self.pets.get(id)
    }

    pub fn selected_id(&self) -> Option<&PetId> {
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&Pet> {
        self.selected.as_ref().and_then(|id| self.pets.get(id))
    }

    /// Reaped dogs still waiting for their death to reach disk.
    pub fn unburied(&self) -> &[PetId] {
        &self.unburied
    }

    /// Adopt a new dog, save it, and select it.
    pub fn adopt(
        &mut self,
        species: Species,
        name: &str,
        now: f64,
    ) -> Result<PetId, RosterError> {
        let pet = Pet::named(species, name, now)?;
        let id = self
            .store
            .allocate_id(now, |candidate| self.pets.contains_key(candidate));
        if let Err(e) = self.store.save_pet(&id, &pet) {
            log::warn!("Adopted {} but could not save it: {}", id, e);
        }
        log::info!("Adopted {} the {} as {}", pet.name(), species, id);
        self.pets.insert(id.clone(), pet);
        self.selected = Some(id.clone());
        Ok(id)
    }

    /// Parse species text at the input boundary, then adopt.
    pub fn adopt_named(&mut self, species: &str, name: &str) -> Result<PetId, RosterError> {
        let species: Species = species.parse()?;
        self.adopt(species, name, unix_now())
    }

    /// Select a live dog.
    pub fn select(&mut self, id: &str) -> Result<(), RosterError> {
        match self.pets.get_key_value(id) {
            Some((key, pet)) if pet.is_alive() => {
                self.selected = Some(key.clone());
                Ok(())
            }
            _ => Err(RosterError::NotFound(id.to_string())),
        }
    }

    /// Advance every live pet to `now`, reap the dead, and save the rest.
    /// Deaths whose records failed to write on an earlier call are retried.
    pub fn tick(&mut self, now: f64) -> TickReport {
        let mut report = TickReport::default();
        let mut dead = Vec::new();

        for (id, pet) in self.pets.iter_mut() {
            let update = pet.update_status(now, &self.clock);
            report.updated += 1;
            if let Some(stage) = update.grew_into {
                log::info!("{} ({}) grew into {}", pet.name(), id, stage.label());
                report.grew.push((id.clone(), stage));
            }
            if !pet.is_alive() {
                dead.push((id.clone(), update.died));
                continue;
            }
            if let Err(e) = self.store.save_pet(id, pet) {
                log::warn!("Could not save {}: {}", id, e);
                report.persist_errors.push(e);
            }
        }

        for (id, cause) in dead {
            if let Some(reaped) = self.reap(&id, cause, now) {
                report.reaped.push(reaped);
            }
        }
        self.flush_burials(&mut report.persist_errors);

        log::debug!(
            "tick: {} updated, {} grew, {} reaped",
            report.updated,
            report.grew.len(),
            report.reaped.len()
        );
        report
    }

    /// [`tick`](Self::tick) at the current wall-clock time.
    pub fn tick_now(&mut self) -> TickReport {
        self.tick(unix_now())
    }

    /// Apply a care action to the selected pet with the trainer's bonuses.
    pub fn perform_action(&mut self, action: Action) -> ActionReport {
        let Some(id) = self.selected.clone() else {
            return ActionReport::no_pet();
        };
        let Some(pet) = self.pets.get_mut(&id) else {
            self.selected = None;
            return ActionReport::no_pet();
        };
        let report = pet.perform(action, Some(self.ledger.bonuses()));
        if let Err(e) = self.store.save_pet(&id, pet) {
            log::warn!("Could not save {} after {}: {}", id, action, e);
        }
        report
    }

    /// Parse action text at the input boundary, then perform it.
    pub fn perform_named(&mut self, action: &str) -> Result<ActionReport, RosterError> {
        let action: Action = action.parse()?;
        Ok(self.perform_action(action))
    }

    // ── Debug controls ─────────────────────────────────────────────────

    pub fn debug_grow(&mut self) -> ActionReport {
        self.with_selected(Pet::force_grow)
    }

    pub fn debug_make_sick(&mut self) -> ActionReport {
        self.with_selected(Pet::make_sick)
    }

    /// Kill the selected dog and bury it right away. Records that fail to
    /// write are retried by the next [`tick`](Self::tick).
    pub fn debug_kill(&mut self, now: f64) -> ActionReport {
        let report = self.with_selected(Pet::force_kill);
        if report.is_success() {
            if let Some(id) = self.selected.clone() {
                self.reap(&id, Some(DeathCause::Forced), now);
                self.flush_burials(&mut Vec::new());
            }
        }
        report
    }

    fn with_selected(&mut self, f: impl FnOnce(&mut Pet) -> ActionReport) -> ActionReport {
        let Some(id) = self.selected.clone() else {
            return ActionReport::no_pet();
        };
        let Some(pet) = self.pets.get_mut(&id) else {
            return ActionReport::no_pet();
        };
        let report = f(pet);
        if pet.is_alive() {
            if let Err(e) = self.store.save_pet(&id, pet) {
                log::warn!("Could not save {}: {}", id, e);
            }
        }
        report
    }

    /// One-line status for the selected dog.
    pub fn status_line(&self) -> String {
        match self.selected() {
            Some(pet) if pet.is_alive() => {
                format!("{} looks {}...", pet.name(), pet.mood().label())
            }
            Some(pet) => format!("{} is no longer with us...", pet.name()),
            None if self.pets.is_empty() => "Choose a dog to adopt.".to_string(),
            None => "Select one of your dogs.".to_string(),
        }
    }

    /// Move a dead pet into the graveyard and queue its file for removal.
    fn reap(&mut self, id: &PetId, cause: Option<DeathCause>, died_at: f64) -> Option<Reaped> {
        let pet = self.pets.remove(id)?;
        let level_before = self.ledger.level();
        let record = self.ledger.record_death(&pet, &mut self.graveyard, died_at);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }

        log::info!(
            "{} the {} ({}) died as a {} after {:.1} days ({:?})",
            pet.name(),
            pet.species(),
            id,
            pet.growth_stage().label(),
            pet.lifespan_days(),
            cause
        );
        if self.ledger.level() > level_before {
            log::info!("Trainer reached level {}", self.ledger.level());
        }

        self.unburied.push(id.clone());

        Some(Reaped {
            id: id.clone(),
            cause,
            record,
        })
    }

    /// Write the graveyard, then the ledger, then delete the files of every
    /// unburied dog. A failed ledger write keeps all files in place; a failed
    /// delete keeps that id queued.
    fn flush_burials(&mut self, errors: &mut Vec<PersistError>) {
        if self.unburied.is_empty() {
            return;
        }
        let written = self
            .store
            .save_graveyard(&self.graveyard)
            .and_then(|()| self.store.save_trainer(&self.ledger));
        if let Err(e) = written {
            log::warn!(
                "Could not record {} death(s), will retry: {}",
                self.unburied.len(),
                e
            );
            errors.push(e);
            return;
        }

        let mut pending = Vec::new();
        for id in std::mem::take(&mut self.unburied) {
            if let Err(e) = self.store.delete_pet(&id) {
                log::warn!("Could not remove save of {}: {}", id, e);
                errors.push(e);
                pending.push(id);
            }
        }
        self.unburied = pending;
    }
}
