//! Integration tests for the full pet lifecycle.
//!
//! Exercises: adoption → care actions → status updates → death → graveyard
//! → trainer progression, plus property checks over random action/tick
//! sequences.
//!
//! All tests are pure logic: no filesystem, no rendering.

use inubiyori_logic::actions::{Action, ActionOutcome};
use inubiyori_logic::clock::StatClock;
use inubiyori_logic::graveyard::Graveyard;
use inubiyori_logic::pet::{GrowthStage, Pet, Vital};
use inubiyori_logic::species::Species;
use inubiyori_logic::trainer::TrainerLedger;
use proptest::prelude::*;

// ── Helpers ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Step {
    Act(Action),
    Tick(f64),
    Grow,
    Sicken,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        prop::sample::select(Action::ALL.to_vec()).prop_map(Step::Act),
        (0.0f64..6.0).prop_map(Step::Tick),
        Just(Step::Grow),
        Just(Step::Sicken),
    ]
}

fn species_strategy() -> impl Strategy<Value = Species> {
    prop::sample::select(Species::ALL.to_vec())
}

fn vitals(pet: &Pet) -> [f64; 6] {
    pet.vitals()
}

fn apply(pet: &mut Pet, step: &Step, ledger: &TrainerLedger) {
    match step {
        Step::Act(action) => {
            pet.perform(*action, Some(ledger.bonuses()));
        }
        Step::Tick(days) => {
            pet.advance(*days);
        }
        Step::Grow => {
            pet.force_grow();
        }
        Step::Sicken => {
            pet.make_sick();
        }
    }
}

// ── Properties ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn vitals_stay_bounded(
        species in species_strategy(),
        steps in prop::collection::vec(step_strategy(), 1..80),
    ) {
        let ledger = TrainerLedger::default();
        let mut pet = Pet::new(species, 0.0);
        for step in &steps {
            apply(&mut pet, step, &ledger);
            for v in vitals(&pet) {
                prop_assert!((0.0..=100.0).contains(&v), "vital {} out of range after {:?}", v, step);
            }
        }
    }

    #[test]
    fn alive_and_stage_are_monotonic(
        species in species_strategy(),
        steps in prop::collection::vec(step_strategy(), 1..80),
    ) {
        let ledger = TrainerLedger::default();
        let mut pet = Pet::new(species, 0.0);
        let mut was_dead = false;
        let mut stage = pet.growth_stage();
        let mut lifespan = pet.lifespan_days();
        for step in &steps {
            apply(&mut pet, step, &ledger);
            if was_dead {
                prop_assert!(!pet.is_alive());
            }
            was_dead = !pet.is_alive();
            prop_assert!(pet.growth_stage() >= stage);
            stage = pet.growth_stage();
            prop_assert!(pet.lifespan_days() >= lifespan);
            lifespan = pet.lifespan_days();
            prop_assert!(pet.sick_days() >= 0.0);
        }
    }

    #[test]
    fn json_round_trip_is_lossless(
        species in species_strategy(),
        steps in prop::collection::vec(step_strategy(), 0..30),
    ) {
        let ledger = TrainerLedger::default();
        let mut pet = Pet::new(species, 1_700_000_000.123);
        for step in &steps {
            apply(&mut pet, step, &ledger);
        }
        let json = serde_json::to_string_pretty(&pet).unwrap();
        let back: Pet = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&back, &pet);
        prop_assert_eq!(back.traits(), pet.traits());
    }

    #[test]
    fn ledger_experience_below_threshold(grants in prop::collection::vec(0.0f64..500.0, 1..20)) {
        let mut ledger = TrainerLedger::default();
        let mut previous_feed = ledger.bonuses().feed_bonus;
        for exp in grants {
            ledger.add_experience(exp);
            prop_assert!(ledger.experience() < ledger.next_level_threshold());
            prop_assert!(ledger.experience() >= 0.0);
            prop_assert!(ledger.bonuses().feed_bonus >= previous_feed);
            previous_feed = ledger.bonuses().feed_bonus;
        }
    }
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn neglected_dog_dies_and_is_remembered() {
    let clock = StatClock::default();
    let mut ledger = TrainerLedger::default();
    let mut graveyard = Graveyard::default();
    let mut pet = Pet::named(Species::Corgi, "Maru", 0.0).unwrap();

    // Never cared for: poll once per simulated day until it dies.
    let mut now = 0.0;
    let mut cause = None;
    while pet.is_alive() {
        now += clock.days_to_seconds(1.0);
        cause = pet.update_status(now, &clock).died;
    }
    assert!(cause.is_some());
    assert!(pet.lifespan_days() < Species::Corgi.traits().max_lifespan_days + 1.0);

    let record = ledger.record_death(&pet, &mut graveyard, now);
    assert_eq!(graveyard.len(), 1);
    assert_eq!(record.grave.name, "Maru");
    assert_eq!(ledger.total_deaths(), 1);
    assert_eq!(ledger.dogs_raised(Species::Corgi), 1);

    assert_eq!(pet.feed(Some(ledger.bonuses())).outcome, ActionOutcome::Gone);
}

#[test]
fn well_cared_dog_reaches_old_age() {
    let mut ledger = TrainerLedger::default();
    let mut graveyard = Graveyard::default();
    let mut pet = Pet::new(Species::Shiba, 0.0);

    let mut days = 0;
    while pet.is_alive() {
        pet.feed(None);
        pet.clean(None);
        pet.play(None);
        pet.advance(1.0);
        days += 1;
        assert!(days <= 28, "shiba outlived its lifespan ceiling");
    }
    assert_eq!(days, 28);
    assert_eq!(pet.growth_stage(), GrowthStage::Adult);

    let record = ledger.record_death(&pet, &mut graveyard, 0.0);
    assert_eq!(record.experience_gained, 30.0);
    assert_eq!(ledger.max_growth_stage(), GrowthStage::Adult);
}

#[test]
fn trainer_levels_feed_back_into_care() {
    let mut ledger = TrainerLedger::default();
    let mut graveyard = Graveyard::default();

    // Four seniors: 4 × 60 = 240 exp → level 2 (100 spent), 140 toward level 3.
    for _ in 0..4 {
        let mut pet = Pet::new(Species::Dachshund, 0.0);
        pet.force_grow();
        pet.force_grow();
        pet.force_kill();
        ledger.record_death(&pet, &mut graveyard, 0.0);
    }
    assert_eq!(ledger.level(), 2);
    assert_eq!(ledger.experience(), 140.0);

    let mut pet = Pet::new(Species::Corgi, 0.0);
    pet.set_vital(Vital::Health, 50.0);
    pet.feed(Some(ledger.bonuses()));
    assert!((pet.hunger() - 81.5).abs() < 1e-9);
    assert!((pet.energy() - 60.5).abs() < 1e-9);
    assert!((pet.health() - 55.25).abs() < 1e-9);
}
