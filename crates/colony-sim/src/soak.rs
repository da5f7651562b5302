//! Soak harness: plays a colony in memory for many turns and checks the
//! engine's invariants after every one of them.

use std::collections::HashSet;

use colony_core::persistence::{load_colony, save_colony};
use colony_core::prelude::*;
use colony_logic::buildings::BuildingKind;
use colony_logic::constants::vitals;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_SEED: u64 = 42;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

/// Run every check. Returns true when all passed.
pub fn run(config: &GameConfig, turns: u32, verbose: bool) -> bool {
    println!("=== Colony Soak Harness ===\n");
    let seed = config.seed.unwrap_or(DEFAULT_SEED);

    let mut results = Vec::new();

    // 1. Seed colony
    results.extend(validate_seed_colony(config, seed));

    // 2. Long run with a simple build/hire policy
    results.extend(validate_long_run(config, seed, turns, verbose));

    // 3. Event table coverage
    results.extend(validate_event_table(seed));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );
    failed == 0
}

// ── 1. Seed colony ──────────────────────────────────────────────────────

fn validate_seed_colony(config: &GameConfig, seed: u64) -> Vec<TestResult> {
    println!("--- Seed Colony ---");
    let mut rng = StdRng::seed_from_u64(seed);
    let colony = Colony::with_colonists(
        config.colony_name.clone(),
        config.starting_colonists,
        &mut rng,
    );
    let mut results = Vec::new();

    results.push(TestResult {
        name: "seed_population".into(),
        passed: colony.alive_count() == config.starting_colonists as usize,
        detail: format!("{} colonists alive", colony.alive_count()),
    });

    let kinds: Vec<_> = colony.buildings().iter().map(|b| b.kind()).collect();
    results.push(TestResult {
        name: "seed_buildings".into(),
        passed: kinds
            == [
                BuildingKind::PowerGenerator,
                BuildingKind::Farm,
                BuildingKind::WaterPurifier,
            ],
        detail: format!("{:?}", kinds),
    });

    results.push(TestResult {
        name: "seed_paid_for".into(),
        passed: colony.resources().metal.quantity() == 15.0
            && colony.resources().energy.quantity() == 75.0,
        detail: format!(
            "{} / {}",
            colony.resources().metal,
            colony.resources().energy
        ),
    });

    results
}

// ── 2. Long run ─────────────────────────────────────────────────────────

/// Build whatever the colony is shortest on, hire when there is room.
fn play_policy(colony: &mut Colony, rng: &mut StdRng) {
    let ledger = colony.resources();
    let wanted = if ledger.food.percent_full() < 20.0 {
        "farm"
    } else if ledger.water.percent_full() < 20.0 {
        "purifier"
    } else if ledger.energy.percent_full() < 20.0 {
        "generator"
    } else if ledger.metal.percent_full() < 40.0 {
        "mine"
    } else {
        "habitat"
    };
    let _ = colony.build(wanted);

    if rng.gen_bool(0.2) {
        let _ = colony.hire_colonist(None, rng);
    }
}

fn check_invariants(before: &Colony, after: &Colony) -> Result<(), String> {
    for resource in after.resources().iter() {
        if resource.quantity() < 0.0 || resource.quantity() > resource.capacity() {
            return Err(format!("ledger out of bounds: {}", resource));
        }
    }
    for colonist in after.colonists() {
        if !(vitals::MIN..=vitals::MAX).contains(&colonist.health())
            || !(vitals::MIN..=vitals::MAX).contains(&colonist.happiness())
        {
            return Err(format!("vitals out of range: {}", colonist));
        }
    }
    if after.day() != before.day() + 1 {
        return Err(format!("day went {} -> {}", before.day(), after.day()));
    }
    let was_dead: HashSet<u32> = before
        .colonists()
        .iter()
        .filter(|c| !c.is_alive())
        .map(|c| c.id())
        .collect();
    if let Some(c) = after
        .colonists()
        .iter()
        .find(|c| was_dead.contains(&c.id()) && c.is_alive())
    {
        return Err(format!("colonist {} came back to life", c.id()));
    }
    let dead = after.colonists().len() - after.alive_count();
    if after.total_deaths() as usize != dead {
        return Err(format!(
            "death counter {} but {} dead",
            after.total_deaths(),
            dead
        ));
    }
    if after.history().len() < before.history().len() {
        return Err("event history shrank".into());
    }
    if after.efficiency_bonus() != 1.0 && after.history().last().map(|e| e.kind)
        != Some(EventKind::TechBreakthrough)
    {
        return Err(format!("efficiency bonus {} leaked", after.efficiency_bonus()));
    }
    Ok(())
}

fn validate_long_run(config: &GameConfig, seed: u64, turns: u32, verbose: bool) -> Vec<TestResult> {
    println!("--- Long Run ({} turns) ---", turns);
    let mut rng = StdRng::seed_from_u64(seed);
    let engine = EventEngine::new(config.event_chance);
    let mut colony = Colony::with_colonists(
        config.colony_name.clone(),
        config.starting_colonists,
        &mut rng,
    );
    let mut results = Vec::new();

    let mut violation = None;
    let mut events = 0;
    let mut played = 0;
    for _ in 0..turns {
        play_policy(&mut colony, &mut rng);
        let before = colony.clone();
        let report = colony.process_turn(&engine, &mut rng);
        played += 1;
        events += report.event.is_some() as usize;

        if verbose && report.day % 50 == 0 {
            println!("  {}", colony);
        }
        if let Err(e) = check_invariants(&before, &colony) {
            violation = Some(format!("day {}: {}", report.day, e));
            break;
        }
        if colony.check_conditions().status != GameStatus::Active {
            break;
        }
    }

    results.push(TestResult {
        name: "invariants_hold".into(),
        passed: violation.is_none(),
        detail: violation.unwrap_or_else(|| format!("{} turns clean", played)),
    });

    results.push(TestResult {
        name: "history_matches_events".into(),
        passed: colony.history().len() == events,
        detail: format!("{} events fired, {} recorded", events, colony.history().len()),
    });

    let conditions = colony.check_conditions();
    results.push(TestResult {
        name: "final_state".into(),
        passed: true,
        detail: format!("{} ({:?}) {}", colony, conditions.status, conditions.message),
    });

    let mut buffer = Vec::new();
    let round_trip = save_colony(&mut buffer, &colony)
        .and_then(|_| load_colony(&buffer[..]))
        .map(|loaded| loaded.statistics() == colony.statistics());
    results.push(TestResult {
        name: "snapshot_round_trip".into(),
        passed: matches!(round_trip, Ok(true)),
        detail: match round_trip {
            Ok(same) => format!("{} bytes, identical: {}", buffer.len(), same),
            Err(e) => e.to_string(),
        },
    });

    results
}

// ── 3. Event table ──────────────────────────────────────────────────────

fn validate_event_table(seed: u64) -> Vec<TestResult> {
    println!("--- Event Table ---");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut results = Vec::new();

    let always = EventEngine::new(1.0);
    let seen: HashSet<EventKind> = (0..2_000)
        .filter_map(|_| always.generate(&mut rng))
        .map(|e| e.kind)
        .collect();
    results.push(TestResult {
        name: "event_all_kinds_reachable".into(),
        passed: seen.len() == EventKind::ALL.len(),
        detail: format!("{}/{} kinds seen", seen.len(), EventKind::ALL.len()),
    });

    let quiet = EventEngine::quiet();
    let fired = (0..1_000).filter(|_| quiet.generate(&mut rng).is_some()).count();
    results.push(TestResult {
        name: "event_quiet_engine".into(),
        passed: fired == 0,
        detail: format!("{} events at chance 0", fired),
    });

    let mut colony = Colony::new("Event Check", &mut rng);
    let mut event = Event::new(EventKind::ResourceDiscovery);
    let first = event.apply(&mut colony, &mut rng);
    let metal = colony.resources().metal.quantity();
    let second = event.apply(&mut colony, &mut rng);
    results.push(TestResult {
        name: "event_applies_once".into(),
        passed: second == "Event already applied" && colony.resources().metal.quantity() == metal,
        detail: first,
    });

    results
}
