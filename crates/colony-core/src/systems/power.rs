//! Energy generation - first pass of every turn.

use colony_logic::resources::ResourceType;

use crate::components::{Building, ResourceLedger, Yield};

/// Run every power generator and bank the total in the energy ledger.
/// Returns the energy generated (before any capacity clipping).
pub fn power_system(buildings: &mut [Building], ledger: &mut ResourceLedger) -> f64 {
    let mut generated = 0.0;
    for building in buildings.iter_mut().filter(|b| b.kind().is_generator()) {
        if let Yield::Resource(ResourceType::Energy, amount) = building.produce(0.0).output {
            generated += amount;
        }
    }
    ledger.energy.add(generated);
    generated
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony_logic::buildings::BuildingKind;
    use crate::components::BuildingStatus;

    #[test]
    fn test_generators_feed_energy_ledger() {
        let mut buildings = vec![
            Building::new(1, BuildingKind::PowerGenerator),
            Building::new(2, BuildingKind::Farm),
            Building::new(3, BuildingKind::PowerGenerator),
        ];
        buildings[2].upgrade();
        let mut ledger = ResourceLedger::new();

        let generated = power_system(&mut buildings, &mut ledger);

        assert_eq!(generated, 90.0);
        assert_eq!(ledger.energy.quantity(), 190.0);
        assert_eq!(ledger.food.quantity(), 50.0);
    }

    #[test]
    fn test_inactive_generator_adds_nothing() {
        let mut buildings = vec![Building::new(1, BuildingKind::PowerGenerator)];
        buildings[0].set_status(BuildingStatus::Inactive);
        let mut ledger = ResourceLedger::new();

        assert_eq!(power_system(&mut buildings, &mut ledger), 0.0);
        assert_eq!(ledger.energy.quantity(), 100.0);
    }
}
