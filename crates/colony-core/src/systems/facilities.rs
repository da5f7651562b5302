//! Facility effects - hospitals treat patients, habitats lift morale.

use colony_logic::buildings::BuildingKind;
use colony_logic::constants::medical::PATIENTS_PER_HOSPITAL;

use crate::components::{Building, Colonist, Yield};

/// Colonists touched by facilities this turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FacilityEffects {
    pub treated: usize,
    pub cheered: usize,
}

/// Apply hospital and habitat effects using what is left of the turn's
/// energy allocation.
///
/// Each powered hospital treats the first few living colonists in roster
/// order. Each powered habitat raises happiness of every living colonist.
pub fn facilities_system(
    buildings: &mut [Building],
    colonists: &mut [Colonist],
    energy_remaining: f64,
) -> FacilityEffects {
    let mut effects = FacilityEffects::default();

    for building in buildings.iter_mut() {
        match building.kind() {
            BuildingKind::Hospital => {
                if let Yield::Health(bonus) = building.produce(energy_remaining).output {
                    if bonus > 0 {
                        for patient in colonists
                            .iter_mut()
                            .filter(|c| c.is_alive())
                            .take(PATIENTS_PER_HOSPITAL)
                        {
                            patient.receive_medical_care();
                            effects.treated += 1;
                        }
                    }
                }
            }
            BuildingKind::Habitat => {
                if let Yield::Happiness(bonus) = building.produce(energy_remaining).output {
                    if bonus > 0 {
                        for resident in colonists.iter_mut().filter(|c| c.is_alive()) {
                            resident.adjust_happiness(bonus);
                            effects.cheered += 1;
                        }
                    }
                }
            }
            _ => {}
        }
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::BuildingStatus;
    use colony_logic::vitals::Profession;

    fn wounded(n: u32) -> Vec<Colonist> {
        (1..=n)
            .map(|i| {
                let mut c = Colonist::new(i, format!("C{i}"), Profession::Miner);
                c.set_health(50);
                c.set_happiness(50);
                c
            })
            .collect()
    }

    #[test]
    fn test_hospital_treats_first_three_living() {
        let mut buildings = vec![Building::new(1, BuildingKind::Hospital)];
        let mut colonists = wounded(5);
        colonists[0].set_health(0);

        let effects = facilities_system(&mut buildings, &mut colonists, 10.0);

        assert_eq!(effects.treated, 3);
        assert_eq!(colonists[0].health(), 0);
        assert_eq!(colonists[1].health(), 70);
        assert_eq!(colonists[3].health(), 70);
        assert_eq!(colonists[4].health(), 50);
    }

    #[test]
    fn test_hospital_needs_energy() {
        let mut buildings = vec![Building::new(1, BuildingKind::Hospital)];
        let mut colonists = wounded(2);

        let effects = facilities_system(&mut buildings, &mut colonists, 4.0);

        assert_eq!(effects.treated, 0);
        assert_eq!(colonists[0].health(), 50);
    }

    #[test]
    fn test_habitat_cheers_everyone() {
        let mut buildings = vec![Building::new(1, BuildingKind::Habitat)];
        let mut colonists = wounded(4);

        let effects = facilities_system(&mut buildings, &mut colonists, 3.0);

        assert_eq!(effects.cheered, 4);
        assert!(colonists.iter().all(|c| c.happiness() == 52));
    }

    #[test]
    fn test_inactive_facility_does_nothing() {
        let mut buildings = vec![Building::new(1, BuildingKind::Habitat)];
        buildings[0].set_status(BuildingStatus::Maintenance);
        let mut colonists = wounded(2);

        let effects = facilities_system(&mut buildings, &mut colonists, 100.0);

        assert_eq!(effects, FacilityEffects::default());
    }
}
