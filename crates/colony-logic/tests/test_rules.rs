//! Integration tests across the pure rule modules.
//!
//! Exercises: BuildingKind specs → energy allocation → production
//! → rations → vitals → win/loss evaluation
//!
//! All tests are pure logic, no engine state and no randomness.

use colony_logic::buildings::{BuildingKind, Output};
use colony_logic::conditions::{evaluate, GameStatus};
use colony_logic::production::{base_production, energy_draw, generator_output, upgrade_cost};
use colony_logic::resources::ResourceType;
use colony_logic::vitals::{clamp_vital, productivity, ration, Profession};

// ── Helpers ────────────────────────────────────────────────────────────

/// Allocate `energy` across buildings in order, the way a turn does.
/// Returns the output of each building and the energy left over.
fn allocate(kinds: &[BuildingKind], mut energy: f64) -> (Vec<f64>, f64) {
    let mut outputs = Vec::new();
    for kind in kinds {
        let spec = kind.spec();
        let out = base_production(spec.base_rate, 1, energy, spec.energy_cost);
        energy -= energy_draw(energy, spec.energy_cost);
        outputs.push(out.amount);
    }
    (outputs, energy)
}

// ── Specs ──────────────────────────────────────────────────────────────

#[test]
fn test_every_kind_round_trips_through_its_key() {
    for kind in BuildingKind::ALL {
        assert_eq!(kind.key().parse::<BuildingKind>(), Ok(kind));
    }
}

#[test]
fn test_only_generator_makes_energy() {
    let makers: Vec<_> = BuildingKind::ALL
        .into_iter()
        .filter(|k| k.spec().output == Output::Resource(ResourceType::Energy))
        .collect();
    assert_eq!(makers, vec![BuildingKind::PowerGenerator]);
    assert_eq!(BuildingKind::PowerGenerator.spec().energy_cost, 0.0);
}

#[test]
fn test_seed_buildings_fit_the_starting_ledger() {
    let (metal, _) = ResourceType::Metal.starting_stock();
    let (energy, _) = ResourceType::Energy.starting_stock();
    let seed = [
        BuildingKind::PowerGenerator,
        BuildingKind::Farm,
        BuildingKind::WaterPurifier,
    ];

    let cost_of = |resource: ResourceType| -> f64 {
        seed.iter()
            .flat_map(|k| k.spec().construction_cost.iter())
            .filter(|(r, _)| *r == resource)
            .map(|(_, amount)| amount)
            .sum()
    };

    assert_eq!(cost_of(ResourceType::Metal), 85.0);
    assert_eq!(cost_of(ResourceType::Energy), 25.0);
    assert!(cost_of(ResourceType::Metal) <= metal);
    assert!(cost_of(ResourceType::Energy) <= energy);
}

// ── Energy allocation ──────────────────────────────────────────────────

#[test]
fn test_allocation_with_plenty_of_energy() {
    let (outputs, left) = allocate(
        &[BuildingKind::Farm, BuildingKind::WaterPurifier, BuildingKind::Mine],
        100.0,
    );
    assert_eq!(outputs, vec![15.0, 12.0, 8.0]);
    assert_eq!(left, 100.0 - 5.0 - 8.0 - 6.0);
}

#[test]
fn test_allocation_starves_the_tail() {
    let (outputs, left) = allocate(
        &[BuildingKind::Farm, BuildingKind::WaterPurifier, BuildingKind::Mine],
        9.0,
    );
    assert_eq!(outputs[0], 15.0);
    assert_eq!(outputs[1], 12.0 * (4.0 / 8.0) * 0.5);
    assert_eq!(outputs[2], 0.0);
    assert_eq!(left, 0.0);
}

#[test]
fn test_generator_then_farm() {
    // energy generated first is what the farm sees
    let generated = generator_output(BuildingKind::PowerGenerator.spec().base_rate, 1);
    let (outputs, _) = allocate(&[BuildingKind::Farm], generated);
    assert_eq!(outputs, vec![15.0]);
}

#[test]
fn test_upgrade_costs_compound_with_level() {
    let metal = 20.0;
    let total: f64 = (1..=3).map(|level| upgrade_cost(metal, level)).sum();
    assert_eq!(total, 30.0 + 60.0 + 90.0);
}

// ── Colonists ──────────────────────────────────────────────────────────

#[test]
fn test_full_ration_has_no_penalty() {
    let r = ration(100.0, 100.0);
    assert_eq!((r.food, r.water), (5.0, 3.0));
    assert_eq!(r.penalty(), (0, 0));
}

#[test]
fn test_empty_stores_stack_both_penalties() {
    let r = ration(0.0, 0.0);
    assert_eq!(r.penalty(), (-25, -25));
    assert_eq!(clamp_vital(100 + r.penalty().0), 75);
}

#[test]
fn test_engineer_is_the_most_productive() {
    let best = Profession::ALL
        .into_iter()
        .max_by(|a, b| {
            productivity(100, 100, a.multiplier()).total_cmp(&productivity(100, 100, b.multiplier()))
        })
        .unwrap();
    assert_eq!(best, Profession::Engineer);
}

// ── Win/loss ───────────────────────────────────────────────────────────

#[test]
fn test_status_progression() {
    assert_eq!(evaluate(3, 80.0), GameStatus::Active);
    assert_eq!(evaluate(20, 80.0), GameStatus::Victory);
    assert_eq!(evaluate(0, 80.0), GameStatus::Defeat);
}
