//! Inubiyori Headless Simulation Harness
//!
//! Validates the pet lifecycle rules and then drives a seeded multi-dog
//! session against a real save directory. No UI, no frame loop: simulated
//! time is advanced explicitly.
//!
//! Usage:
//!   cargo run -p inubiyori-simtest
//!   cargo run -p inubiyori-simtest -- --verbose --days 90 --seed 42
//!   cargo run -p inubiyori-simtest -- --save-dir ./saves --seconds-per-day 3600

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use inubiyori_core::prelude::*;
use inubiyori_logic::clock::format_timestamp;
use inubiyori_logic::trainer::experience_for_stage;
use inubiyori_logic::{
    AnimationState, BonusKind, DeathCause, Graveyard, GrowthStage, InputError, Mood, Pet,
    StatClock, TrainerLedger, Vital,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

const EPS: f64 = 1e-9;

#[derive(Parser, Debug)]
#[command(name = "inubiyori-simtest", about = "Headless validation of the Inubiyori kennel")]
struct Args {
    /// Print every check, not only failures
    #[arg(short, long)]
    verbose: bool,

    /// Kennel config file (TOML)
    #[arg(long, env = "INUBIYORI_CONFIG")]
    config: Option<PathBuf>,

    /// Save directory for the session; a temporary one when omitted
    #[arg(long, env = "INUBIYORI_SAVE_DIR")]
    save_dir: Option<PathBuf>,

    /// Real seconds per simulated day
    #[arg(long)]
    seconds_per_day: Option<f64>,

    /// Simulated days the session runs
    #[arg(long, default_value_t = 60)]
    days: u32,

    /// Seed for the session's player choices
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== Inubiyori Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Species table and input boundary
    results.extend(validate_species_and_input(args.verbose));

    // 2. Care actions
    results.extend(validate_care_actions(args.verbose));

    // 3. Health & sickness
    results.extend(validate_health(args.verbose));

    // 4. Growth & aging
    results.extend(validate_growth_and_aging(args.verbose));

    // 5. Trainer progression
    results.extend(validate_trainer(args.verbose));

    // 6. Mood & animation
    results.extend(validate_mood(args.verbose));

    // 7. Save document format
    results.extend(validate_save_format(args.verbose));

    // 8. Kennel session against a save directory
    results.extend(run_kennel_session(&args));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Species & Input ──────────────────────────────────────────────────

fn validate_species_and_input(verbose: bool) -> Vec<TestResult> {
    println!("--- Species & Input ---");
    let mut results = Vec::new();

    if verbose {
        for species in Species::ALL {
            let t = species.traits();
            println!(
                "  {:10} {:18} hunger x{:.1} energy x{:.1} growth x{:.1} lifespan {:.0}d",
                t.display_name,
                t.temperament,
                t.hunger_rate,
                t.energy_rate,
                t.growth_rate,
                t.max_lifespan_days
            );
        }
    }

    let lifespans: Vec<f64> = Species::ALL
        .iter()
        .map(|s| s.traits().max_lifespan_days)
        .collect();
    results.push(check(
        "species_lifespans",
        lifespans == [30.0, 35.0, 28.0],
        format!("corgi/dachshund/shiba live {:?} days", lifespans),
    ));

    let aliases_ok = "Shiba Inu".parse::<Species>() == Ok(Species::Shiba)
        && "miniature dachshund".parse::<Species>() == Ok(Species::Dachshund)
        && "CORGI".parse::<Species>() == Ok(Species::Corgi);
    results.push(check(
        "species_aliases",
        aliases_ok,
        "case-insensitive names and aliases parse",
    ));

    results.push(check(
        "species_unknown_rejected",
        matches!("poodle".parse::<Species>(), Err(InputError::UnknownSpecies(_))),
        "unknown species is an input error",
    ));

    let actions_ok = Action::ALL
        .iter()
        .all(|a| a.label().parse::<Action>() == Ok(*a))
        && matches!("dance".parse::<Action>(), Err(InputError::UnknownAction(_)));
    results.push(check(
        "action_parsing",
        actions_ok,
        "all five actions parse by label, unknown rejected",
    ));

    let blank = Pet::named(Species::Dachshund, "   ", 0.0);
    let long = Pet::named(Species::Corgi, "Bartholomew the Third", 0.0);
    results.push(check(
        "name_validation",
        blank.as_ref().map(|p| p.name()) == Ok("Dachshund")
            && matches!(long, Err(InputError::NameTooLong { .. })),
        "blank name defaults to species, long names rejected",
    ));

    results
}

// ── 2. Care Actions ─────────────────────────────────────────────────────

fn validate_care_actions(_verbose: bool) -> Vec<TestResult> {
    println!("--- Care Actions ---");
    let mut results = Vec::new();

    // Scenario A: feed from health 50
    let mut pet = Pet::new(Species::Corgi, 0.0);
    pet.set_vital(Vital::Health, 50.0);
    let report = pet.feed(None);
    results.push(check(
        "feed_gains",
        report.is_success()
            && approx(pet.hunger(), 80.0)
            && approx(pet.energy(), 60.0)
            && approx(pet.health(), 55.0)
            && approx(pet.growth_points(), 1.0),
        format!(
            "hunger {:.0}, energy {:.0}, health {:.0}: {}",
            pet.hunger(), pet.energy(), pet.health(), report.message
        ),
    ));

    // Scenario B: tired walk changes nothing
    let mut pet = Pet::new(Species::Corgi, 0.0);
    pet.set_vital(Vital::Energy, 10.0);
    let before = pet.clone();
    let report = pet.walk(None);
    results.push(check(
        "walk_too_tired",
        report.outcome == ActionOutcome::TooTired && pet == before,
        report.message,
    ));

    // Gains clamp at 100
    let mut pet = Pet::new(Species::Shiba, 0.0);
    for _ in 0..5 {
        pet.clean(None);
    }
    results.push(check(
        "vitals_clamped",
        approx(pet.cleanliness(), 100.0) && approx(pet.health(), 100.0),
        format!("cleanliness {:.0} after five cleanings", pet.cleanliness()),
    ));

    // Bonuses scale gains but not costs
    let mut ledger = TrainerLedger::default();
    ledger.add_experience(100.0);
    let mut pet = Pet::new(Species::Corgi, 0.0);
    pet.perform(Action::Walk, Some(ledger.bonuses()));
    results.push(check(
        "walk_bonus_scaling",
        approx(pet.happiness(), 71.0) && approx(pet.energy(), 30.0) && approx(pet.hunger(), 35.0),
        format!(
            "level {} walk: happiness {:.1}, energy {:.1}",
            ledger.level(),
            pet.happiness(),
            pet.energy()
        ),
    ));

    let mut pet = Pet::new(Species::Corgi, 0.0);
    pet.force_kill();
    let report = pet.feed(None);
    results.push(check(
        "dead_pet_ignores_actions",
        report.outcome == ActionOutcome::Gone && approx(pet.hunger(), 50.0),
        report.message,
    ));

    results
}

// ── 3. Health & Sickness ────────────────────────────────────────────────

fn validate_health(_verbose: bool) -> Vec<TestResult> {
    println!("--- Health & Sickness ---");
    let mut results = Vec::new();

    // Scenario C: neglect damages health and accrues sick days
    let mut pet = Pet::new(Species::Dachshund, 0.0);
    pet.set_vital(Vital::Hunger, 10.0);
    pet.set_vital(Vital::Happiness, 10.0);
    pet.set_vital(Vital::Cleanliness, 10.0);
    pet.advance(1.0);
    results.push(check(
        "neglect_damage",
        approx(pet.health(), 90.0) && approx(pet.sick_days(), 1.0),
        format!(
            "health {:.1}, sick days {:.1}",
            pet.health(),
            pet.sick_days()
        ),
    ));

    // Recovery pays sick days back down
    pet.set_vital(Vital::Hunger, 90.0);
    pet.set_vital(Vital::Happiness, 90.0);
    pet.set_vital(Vital::Cleanliness, 90.0);
    pet.advance(0.5);
    results.push(check(
        "recovery",
        approx(pet.health(), 92.5) && approx(pet.sick_days(), 0.5),
        format!(
            "health {:.1}, sick days {:.1}",
            pet.health(),
            pet.sick_days()
        ),
    ));

    // Scenario D: health reaching zero kills on the same call
    let mut pet = Pet::new(Species::Corgi, 0.0);
    pet.set_vital(Vital::Health, 5.0);
    pet.set_vital(Vital::Hunger, 0.0);
    pet.set_vital(Vital::Happiness, 0.0);
    pet.set_vital(Vital::Cleanliness, 0.0);
    let update = pet.advance(1.0);
    results.push(check(
        "death_at_zero_health",
        !pet.is_alive() && update.died == Some(DeathCause::HealthDepleted),
        format!("died: {:?}", update.died),
    ));

    // Five sick days is fatal even with health left
    let mut pet = Pet::new(Species::Corgi, 0.0);
    pet.make_sick();
    pet.set_vital(Vital::Health, 100.0);
    pet.set_vital(Vital::Hunger, 0.0);
    pet.set_vital(Vital::Happiness, 0.0);
    pet.set_vital(Vital::Cleanliness, 0.0);
    let update = pet.advance(2.0);
    results.push(check(
        "death_by_illness",
        update.died == Some(DeathCause::ProlongedIllness) && pet.health() > 0.0,
        format!("health {:.0} at death, {:?}", pet.health(), update.died),
    ));

    // Death is permanent
    let frozen = pet.clone();
    pet.advance(10.0);
    pet.make_sick();
    results.push(check(
        "death_irreversible",
        pet == frozen,
        "advancing or debugging a dead pet changes nothing",
    ));

    results
}

// ── 4. Growth & Aging ───────────────────────────────────────────────────

fn validate_growth_and_aging(verbose: bool) -> Vec<TestResult> {
    println!("--- Growth & Aging ---");
    let mut results = Vec::new();
    let clock = StatClock::default();

    // Scenario F: crossing the Adult threshold via the wall clock
    let mut pet = Pet::new(Species::Corgi, 1000.0);
    pet.set_growth_points(29.0);
    let update = pet.update_status(1000.0 + clock.days_to_seconds(2.0), &clock);
    results.push(check(
        "growth_to_adult",
        approx(pet.growth_points(), 31.0)
            && pet.growth_stage() == GrowthStage::Adult
            && update.grew_into == Some(GrowthStage::Adult),
        format!(
            "{:.1} points → {}",
            pet.growth_points(),
            pet.growth_stage().label()
        ),
    ));

    // Clock going backwards is ignored
    let stamp = pet.last_update_time();
    let update = pet.update_status(stamp - 500.0, &clock);
    results.push(check(
        "clock_skew_ignored",
        update.elapsed_days == 0.0 && pet.last_update_time() == stamp,
        "negative elapsed time is a no-op",
    ));

    // One long absence can skip straight to Senior
    let mut pet = Pet::new(Species::Dachshund, 0.0);
    pet.set_growth_points(95.0);
    pet.advance(10.0);
    results.push(check(
        "multi_stage_growth",
        pet.growth_stage() == GrowthStage::Senior,
        format!("{:.1} points → {}", pet.growth_points(), pet.growth_stage().label()),
    ));

    // Debug growth
    let mut pet = Pet::new(Species::Shiba, 0.0);
    pet.force_grow();
    let adult_points = pet.growth_points();
    pet.force_grow();
    let capped = pet.force_grow();
    results.push(check(
        "force_grow",
        approx(adult_points, 30.0)
            && approx(pet.growth_points(), 100.0)
            && capped.outcome == ActionOutcome::Unchanged,
        capped.message,
    ));

    // A well cared-for Shiba dies of old age at 28 days
    let mut pet = Pet::new(Species::Shiba, 0.0);
    let mut death = None;
    for day in 1..=40 {
        pet.feed(None);
        pet.clean(None);
        pet.play(None);
        let update = pet.advance(1.0);
        if let Some(stage) = update.grew_into {
            if verbose {
                println!("  day {:2}: grew into {}", day, stage.label());
            }
        }
        if update.died.is_some() {
            death = update.died;
            break;
        }
    }
    results.push(check(
        "old_age",
        death == Some(DeathCause::OldAge) && approx(pet.lifespan_days(), 28.0),
        format!(
            "{:?} after {:.1} days as {}",
            death,
            pet.lifespan_days(),
            pet.growth_stage().label()
        ),
    ));

    results
}

// ── 5. Trainer Progression ──────────────────────────────────────────────

fn validate_trainer(verbose: bool) -> Vec<TestResult> {
    println!("--- Trainer Progression ---");
    let mut results = Vec::new();

    // Scenario E: level-up with carry-over
    let mut ledger = TrainerLedger::default();
    ledger.add_experience(95.0);
    let gained = ledger.add_experience(10.0);
    let bonuses_ok = BonusKind::ALL
        .iter()
        .all(|&k| approx(ledger.bonuses().multiplier(k), 1.05));
    results.push(check(
        "level_up_carry_over",
        gained == 1 && ledger.level() == 2 && approx(ledger.experience(), 5.0) && bonuses_ok,
        format!(
            "level {}, {:.0}/{:.0} exp",
            ledger.level(),
            ledger.experience(),
            ledger.next_level_threshold()
        ),
    ));

    results.push(check(
        "death_experience_table",
        experience_for_stage(GrowthStage::Puppy) == 10.0
            && experience_for_stage(GrowthStage::Adult) == 30.0
            && experience_for_stage(GrowthStage::Senior) == 60.0,
        "puppy 10, adult 30, senior 60",
    ));

    // One grant can clear several levels
    let mut ledger = TrainerLedger::default();
    let gained = ledger.add_experience(350.0);
    results.push(check(
        "multi_level_grant",
        gained == 2 && ledger.level() == 3 && approx(ledger.experience(), 50.0),
        format!("350 exp → level {} with {:.0}", ledger.level(), ledger.experience()),
    ));

    // Recording deaths
    let mut ledger = TrainerLedger::default();
    let mut graveyard = Graveyard::default();
    for (species, grow) in [
        (Species::Corgi, 0),
        (Species::Shiba, 2),
        (Species::Shiba, 1),
    ] {
        let mut pet = Pet::new(species, 0.0);
        for _ in 0..grow {
            pet.force_grow();
        }
        pet.force_kill();
        ledger.record_death(&pet, &mut graveyard, 1_700_000_000.0);
    }
    results.push(check(
        "record_death",
        ledger.total_deaths() == 3
            && ledger.dogs_raised(Species::Shiba) == 2
            && ledger.max_growth_stage() == GrowthStage::Senior
            && ledger.level() == 2
            && approx(ledger.experience(), 0.0)
            && graveyard.len() == 3,
        format!(
            "{} deaths, level {}, {} graves",
            ledger.total_deaths(),
            ledger.level(),
            graveyard.len()
        ),
    ));
    if verbose {
        print!("{}", ledger.summary());
    }

    results
}

// ── 6. Mood & Animation ─────────────────────────────────────────────────

fn validate_mood(_verbose: bool) -> Vec<TestResult> {
    println!("--- Mood & Animation ---");
    let mut results = Vec::new();

    let tiers_ok = Mood::from_vitals(true, 100.0, 90.0) == Mood::VeryHappy
        && Mood::from_vitals(true, 100.0, 70.0) == Mood::Happy
        && Mood::from_vitals(true, 100.0, 50.0) == Mood::Normal
        && Mood::from_vitals(true, 100.0, 30.0) == Mood::Unsatisfied
        && Mood::from_vitals(true, 100.0, 10.0) == Mood::Grumpy
        && Mood::from_vitals(true, 29.0, 90.0) == Mood::Sick
        && Mood::from_vitals(false, 100.0, 90.0) == Mood::Deceased;
    results.push(check(
        "mood_tiers",
        tiers_ok,
        "deceased > sick > care-average tiers",
    ));

    results.push(check(
        "mood_boundaries_exclusive",
        Mood::from_vitals(true, 30.0, 80.0) == Mood::Happy
            && Mood::from_vitals(true, 30.0, 20.0) == Mood::Grumpy,
        "care average exactly on a threshold falls to the lower tier",
    ));

    let animations_ok = Mood::VeryHappy.animation() == AnimationState::Happy
        && Mood::Happy.animation() == AnimationState::Happy
        && [Mood::Normal, Mood::Unsatisfied, Mood::Grumpy, Mood::Sick, Mood::Deceased]
            .iter()
            .all(|m| m.animation() == AnimationState::Idle);
    results.push(check(
        "animation_mapping",
        animations_ok,
        "only happy moods animate",
    ));

    results
}

// ── 7. Save Format ──────────────────────────────────────────────────────

fn validate_save_format(verbose: bool) -> Vec<TestResult> {
    println!("--- Save Format ---");
    let mut results = Vec::new();

    let pet = Pet::new(Species::Shiba, 1_700_000_000.5);
    let value = match serde_json::to_value(&pet) {
        Ok(v) => v,
        Err(e) => {
            results.push(check("pet_serialize", false, format!("serialize error: {}", e)));
            return results;
        }
    };
    let keys: Vec<&str> = value
        .as_object()
        .map(|o| o.keys().map(String::as_str).collect())
        .unwrap_or_default();
    if verbose {
        println!("  pet keys: {:?}", keys);
    }
    let expected = [
        "dog_type",
        "name",
        "hunger",
        "happiness",
        "discipline",
        "cleanliness",
        "energy",
        "growth_stage",
        "birth_time",
        "last_update_time",
        "growth_points",
        "lifespan_days",
        "is_alive",
        "health",
        "sick_days",
    ];
    results.push(check(
        "pet_document_keys",
        expected.iter().all(|k| keys.contains(k)) && !keys.contains(&"id"),
        format!("{} keys, dog_type = {}", keys.len(), value["dog_type"]),
    ));

    let mut ledger = TrainerLedger::default();
    ledger.add_experience(120.0);
    let trainer = serde_json::to_value(&ledger).unwrap_or_default();
    results.push(check(
        "trainer_document_keys",
        trainer["trainer_level"] == 2 && trainer["trainer_exp"] == 20.0,
        format!("trainer_level = {}", trainer["trainer_level"]),
    ));

    results
}

// ── 8. Kennel Session ───────────────────────────────────────────────────

fn resolve_config(args: &Args) -> Result<(KennelConfig, Option<TempDir>), String> {
    let mut config = match &args.config {
        Some(path) => KennelConfig::load(path).map_err(|e| e.to_string())?,
        None => KennelConfig::default(),
    };
    if let Some(secs) = args.seconds_per_day {
        config.seconds_per_day = secs;
    }
    let scratch = match (&args.save_dir, &args.config) {
        (Some(dir), _) => {
            config.save_dir = dir.clone();
            None
        }
        (None, Some(_)) => None,
        (None, None) => {
            let dir = TempDir::new().map_err(|e| format!("temp dir: {}", e))?;
            config.save_dir = dir.path().join("saves");
            Some(dir)
        }
    };
    config.validate().map_err(|e| e.to_string())?;
    Ok((config, scratch))
}

fn snapshot(roster: &Roster) -> Vec<(PetId, Pet)> {
    roster
        .pets()
        .map(|(id, pet)| (id.clone(), pet.clone()))
        .collect()
}

fn run_kennel_session(args: &Args) -> Vec<TestResult> {
    println!("--- Kennel Session ---");
    let mut results = Vec::new();

    let (config, _scratch) = match resolve_config(args) {
        Ok(c) => c,
        Err(e) => {
            results.push(check("session_config", false, e));
            return results;
        }
    };
    let mut roster = match Roster::open(&config) {
        Ok(r) => r,
        Err(e) => {
            results.push(check("session_open", false, e.to_string()));
            return results;
        }
    };
    log::info!(
        "Session: {} days, seed {}, {} s/day, saves in {}",
        args.days,
        args.seed,
        config.seconds_per_day,
        config.save_dir.display()
    );

    let deaths_before = roster.ledger().total_deaths();
    let graves_before = roster.graveyard().len();
    let clock = *roster.clock();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut now = unix_now().floor();

    let mut bounded = true;
    let mut monotonic = true;
    let mut reaped_total = 0usize;
    let mut persist_errors = 0usize;
    let mut stages: HashMap<PetId, GrowthStage> = HashMap::new();
    let mut attentive: HashMap<PetId, bool> = HashMap::new();

    let steps_per_day = 4;
    for step in 0..args.days * steps_per_day {
        if roster.len() < 3 && (roster.is_empty() || rng.gen_bool(0.02)) {
            let species = Species::ALL[rng.gen_range(0..Species::ALL.len())];
            let name = format!("Pup{}", step);
            match roster.adopt(species, &name, now) {
                Ok(id) => {
                    attentive.insert(id, rng.gen_bool(0.5));
                }
                Err(e) => log::warn!("Adoption failed: {}", e),
            }
        }

        // Some dogs get diligent owners, some get forgotten for days.
        let ids: Vec<PetId> = roster.pets().map(|(id, _)| id.clone()).collect();
        for id in &ids {
            if roster.select(id.as_str()).is_err() {
                continue;
            }
            let care_chance = if attentive.get(id).copied().unwrap_or(true) {
                0.9
            } else {
                0.15
            };
            if rng.gen_bool(care_chance) {
                let action = Action::ALL[rng.gen_range(0..Action::ALL.len())];
                let report = roster.perform_action(action);
                log::debug!("{} → {:?}", action, report.outcome);
            }
        }

        now += clock.days_to_seconds(1.0 / steps_per_day as f64);
        let report = roster.tick(now);
        reaped_total += report.reaped.len();
        persist_errors += report.persist_errors.len();
        for reaped in &report.reaped {
            stages.remove(&reaped.id);
            attentive.remove(&reaped.id);
            if args.verbose {
                println!(
                    "  day {:5.1}: {} the {} passed away as {} ({:?})",
                    step as f64 / steps_per_day as f64,
                    reaped.record.grave.name,
                    reaped.record.grave.species,
                    reaped.record.grave.growth_stage.label(),
                    reaped.cause
                );
            }
        }

        for (id, pet) in roster.pets() {
            bounded &= pet.vitals().iter().all(|v| (0.0..=100.0).contains(v));
            monotonic &= pet.is_alive();
            let previous = stages.insert(id.clone(), pet.growth_stage());
            monotonic &= previous.map_or(true, |p| p <= pet.growth_stage());
        }
    }

    results.push(check(
        "session_vitals_bounded",
        bounded,
        format!("{} simulated days", args.days),
    ));
    results.push(check(
        "session_lifecycle_monotonic",
        monotonic,
        "only living dogs remain, stages never regress",
    ));

    let new_deaths = (roster.ledger().total_deaths() - deaths_before) as usize;
    let new_graves = roster.graveyard().len() - graves_before;
    results.push(check(
        "session_deaths_recorded",
        new_deaths == reaped_total && new_graves == reaped_total,
        format!("{} reaped, {} deaths, {} graves", reaped_total, new_deaths, new_graves),
    ));

    let files = fs::read_dir(roster.store().dogs_dir())
        .map(|entries| {
            entries
                .flatten()
                .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("json"))
                .count()
        })
        .unwrap_or(0);
    results.push(check(
        "session_files_match_roster",
        files == roster.len() && persist_errors == 0,
        format!("{} dog files, {} live dogs, {} write errors", files, roster.len(), persist_errors),
    ));

    // Simulated restart
    let before = snapshot(&roster);
    let reloaded = match PersistenceStore::open(roster.store().root()) {
        Ok(store) => Roster::load(store, clock),
        Err(e) => {
            results.push(check("session_reload", false, e.to_string()));
            return results;
        }
    };
    results.push(check(
        "session_reload",
        snapshot(&reloaded) == before
            && reloaded.ledger() == roster.ledger()
            && reloaded.graveyard() == roster.graveyard(),
        format!("{} dogs and {} graves survive a restart", before.len(), reloaded.graveyard().len()),
    ));

    println!("\n{}", roster.ledger().summary());
    println!("Graveyard ({} resting):", roster.graveyard().len());
    for grave in roster.graveyard().newest_first().take(10) {
        println!(
            "  {:10} {:10} {:7} {:5.1} days  {}",
            grave.name,
            grave.species.display_name(),
            grave.growth_stage.label(),
            grave.lifespan_days,
            grave.death_date
        );
    }
    if let Some(oldest) = roster.graveyard().longest_lived() {
        println!("  Longest lived: {} ({:.1} days)", oldest.name, oldest.lifespan_days);
    }
    println!("Session ended {}", format_timestamp(now));
    println!("{}", roster.status_line());

    results
}
