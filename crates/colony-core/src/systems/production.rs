//! Production pass - runs every non-generator building against the turn's
//! energy allocation.

use std::collections::BTreeMap;

use colony_logic::resources::ResourceType;

use crate::components::{Building, ResourceLedger, Yield};

/// Outcome of one production pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductionPass {
    /// Resources credited to the ledger, after the efficiency multiplier.
    pub produced: BTreeMap<ResourceType, f64>,
    /// Allocation left once every building has drawn its share.
    pub energy_remaining: f64,
}

/// Allocate energy to buildings in order and bank what they produce.
///
/// The allocation starts from the energy ledger's quantity and is drawn
/// down by each building's consumption. The ledger itself is not debited:
/// the allocation only decides who runs at full power this turn.
pub fn production_system(
    buildings: &mut [Building],
    ledger: &mut ResourceLedger,
    efficiency: f64,
) -> ProductionPass {
    let mut available = ledger.energy.quantity();
    let mut produced = BTreeMap::new();

    for building in buildings.iter_mut().filter(|b| !b.kind().is_generator()) {
        let run = building.produce(available);
        available -= run.energy_consumed;

        if let Yield::Resource(kind, amount) = run.output {
            if amount > 0.0 {
                let boosted = amount * efficiency;
                ledger.get_mut(kind).add(boosted);
                *produced.entry(kind).or_insert(0.0) += boosted;
            }
        }
        log::debug!(
            "{} produced {:?}, energy left {:.1}",
            building.name(),
            run.output,
            available
        );
    }

    ProductionPass {
        produced,
        energy_remaining: available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony_logic::buildings::BuildingKind;

    #[test]
    fn test_allocation_runs_out_in_order() {
        let mut buildings = vec![
            Building::new(1, BuildingKind::Farm),
            Building::new(2, BuildingKind::WaterPurifier),
            Building::new(3, BuildingKind::Mine),
        ];
        let mut ledger = ResourceLedger::new();
        ledger.energy.remove(90.0); // 10 left: farm takes 5, purifier gets 5 of 8

        let pass = production_system(&mut buildings, &mut ledger, 1.0);

        assert_eq!(pass.produced[&ResourceType::Food], 15.0);
        assert!((pass.produced[&ResourceType::Water] - 12.0 * (5.0 / 8.0) * 0.5).abs() < 1e-9);
        assert!(!pass.produced.contains_key(&ResourceType::Metal));
        assert_eq!(pass.energy_remaining, 0.0);
        // the ledger keeps its energy; only the allocation is spent
        assert_eq!(ledger.energy.quantity(), 10.0);
        assert_eq!(buildings[1].total_production(), 0.0);
    }

    #[test]
    fn test_efficiency_multiplier_scales_output() {
        let mut buildings = vec![Building::new(1, BuildingKind::Farm)];
        let mut ledger = ResourceLedger::new();

        let pass = production_system(&mut buildings, &mut ledger, 1.2);

        assert!((pass.produced[&ResourceType::Food] - 18.0).abs() < 1e-9);
        assert!((ledger.food.quantity() - 68.0).abs() < 1e-9);
    }

    #[test]
    fn test_generators_are_skipped() {
        let mut buildings = vec![Building::new(1, BuildingKind::PowerGenerator)];
        let mut ledger = ResourceLedger::new();

        let pass = production_system(&mut buildings, &mut ledger, 1.0);

        assert!(pass.produced.is_empty());
        assert_eq!(pass.energy_remaining, 100.0);
        assert_eq!(ledger.energy.quantity(), 100.0);
    }

    #[test]
    fn test_facilities_draw_from_allocation() {
        let mut buildings = vec![
            Building::new(1, BuildingKind::Habitat),
            Building::new(2, BuildingKind::Hospital),
        ];
        let mut ledger = ResourceLedger::new();

        let pass = production_system(&mut buildings, &mut ledger, 1.0);

        assert!(pass.produced.is_empty());
        assert_eq!(pass.energy_remaining, 92.0);
    }
}
