//! Events system - random one-shot occurrences that perturb the colony.
//!
//! At most one event fires per turn. An event is generated from a fixed
//! weighted table, applied to the colony exactly once, then kept in the
//! colony's history.

use colony_logic::constants::events::{TECH_BREAKTHROUGH_EFFICIENCY, TRIGGER_CHANCE};
use colony_logic::resources::ResourceType;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::Colony;

/// Kinds of events that can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SolarStorm,
    ResourceDiscovery,
    AbundantHarvest,
    WaterContamination,
    HighMorale,
    Epidemic,
    NewColonist,
    TechBreakthrough,
}

/// A single effect carried by an event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventEffect {
    /// Positive adds to the ledger, negative removes (all-or-nothing).
    Resource(ResourceType, f64),
    /// Happiness delta for every living colonist.
    Happiness(i32),
    /// Health delta for every living colonist.
    Health(i32),
    /// One colonist asks to join.
    NewColonist,
    /// Production multiplier for the next production pass.
    Efficiency(f64),
}

impl EventEffect {
    /// Application order: resources, colonist-wide vitals, arrivals, efficiency.
    fn phase(&self) -> u8 {
        match self {
            Self::Resource(..) => 0,
            Self::Happiness(_) => 1,
            Self::Health(_) => 2,
            Self::NewColonist => 3,
            Self::Efficiency(_) => 4,
        }
    }
}

impl EventKind {
    pub const ALL: [EventKind; 8] = [
        EventKind::SolarStorm,
        EventKind::ResourceDiscovery,
        EventKind::AbundantHarvest,
        EventKind::WaterContamination,
        EventKind::HighMorale,
        EventKind::Epidemic,
        EventKind::NewColonist,
        EventKind::TechBreakthrough,
    ];

    /// Relative selection weight once an event has been triggered.
    pub fn weight(self) -> f64 {
        match self {
            Self::SolarStorm => 0.15,
            Self::ResourceDiscovery => 0.20,
            Self::AbundantHarvest => 0.18,
            Self::WaterContamination => 0.12,
            Self::HighMorale => 0.25,
            Self::Epidemic => 0.10,
            Self::NewColonist => 0.15,
            Self::TechBreakthrough => 0.08,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SolarStorm => "Solar Storm",
            Self::ResourceDiscovery => "Resource Discovery",
            Self::AbundantHarvest => "Abundant Harvest",
            Self::WaterContamination => "Water Contamination",
            Self::HighMorale => "High Morale",
            Self::Epidemic => "Epidemic",
            Self::NewColonist => "New Colonist",
            Self::TechBreakthrough => "Tech Breakthrough",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::SolarStorm => "A solar storm damaged some of the power generators!",
            Self::ResourceDiscovery => "The colonists found a metal deposit!",
            Self::AbundantHarvest => "The farms brought in an exceptional harvest!",
            Self::WaterContamination => "Part of the water supply was contaminated!",
            Self::HighMorale => "The colonists are excited and motivated!",
            Self::Epidemic => "A disease is spreading through the colony!",
            Self::NewColonist => "A lone traveller asked to join the colony!",
            Self::TechBreakthrough => "The scientists made a discovery that improves efficiency!",
        }
    }

    pub fn effects(self) -> Vec<EventEffect> {
        use EventEffect::*;
        match self {
            Self::SolarStorm => vec![Resource(ResourceType::Energy, -20.0)],
            Self::ResourceDiscovery => vec![Resource(ResourceType::Metal, 50.0)],
            Self::AbundantHarvest => vec![Resource(ResourceType::Food, 30.0)],
            Self::WaterContamination => vec![Resource(ResourceType::Water, -15.0)],
            Self::HighMorale => vec![Happiness(10)],
            Self::Epidemic => vec![Health(-15)],
            Self::NewColonist => vec![NewColonist],
            Self::TechBreakthrough => vec![Efficiency(TECH_BREAKTHROUGH_EFFICIENCY)],
        }
    }
}

/// An event in the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub name: String,
    pub description: String,
    pub effects: Vec<EventEffect>,
    applied: bool,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            name: kind.name().to_string(),
            description: kind.description().to_string(),
            effects: kind.effects(),
            applied: false,
        }
    }

    pub(crate) fn restore(
        kind: EventKind,
        name: String,
        description: String,
        effects: Vec<EventEffect>,
        applied: bool,
    ) -> Self {
        Self {
            kind,
            name,
            description,
            effects,
            applied,
        }
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Apply every effect to the colony once. Returns a one-line summary.
    pub fn apply(&mut self, colony: &mut Colony, rng: &mut impl Rng) -> String {
        if self.applied {
            return "Event already applied".to_string();
        }

        let mut effects = self.effects.clone();
        effects.sort_by_key(EventEffect::phase);

        let mut parts = vec![self.description.clone()];
        for effect in effects {
            parts.push(apply_effect(effect, colony, rng));
        }

        self.applied = true;
        parts.join(" | ")
    }
}

fn apply_effect(effect: EventEffect, colony: &mut Colony, rng: &mut impl Rng) -> String {
    match effect {
        EventEffect::Resource(kind, amount) if amount >= 0.0 => {
            colony.resources_mut().get_mut(kind).add(amount);
            format!("+{amount:.0} {kind}")
        }
        EventEffect::Resource(kind, amount) => {
            if colony.resources_mut().get_mut(kind).remove(-amount) {
                format!("{amount:.0} {kind}")
            } else {
                format!("{amount:.0} {kind} (stores too low, nothing lost)")
            }
        }
        EventEffect::Happiness(delta) => {
            for colonist in colony.living_colonists_mut() {
                colonist.adjust_happiness(delta);
            }
            format!("Colonist happiness: {delta:+}")
        }
        EventEffect::Health(delta) => {
            for colonist in colony.living_colonists_mut() {
                colonist.adjust_health(delta);
            }
            format!("Colonist health: {delta:+}")
        }
        EventEffect::NewColonist => match colony.hire_colonist(None, rng) {
            Ok(_) => "A new colonist joined the colony!".to_string(),
            Err(e) => format!("The traveller was turned away: {e}"),
        },
        EventEffect::Efficiency(multiplier) => {
            colony.set_efficiency_bonus(multiplier);
            format!("Efficiency increased by {:.0}%!", (multiplier - 1.0) * 100.0)
        }
    }
}

/// Generates at most one event per turn from the weighted table.
#[derive(Debug, Clone)]
pub struct EventEngine {
    trigger_chance: f64,
}

impl EventEngine {
    /// `trigger_chance` is the probability that any event fires in a turn,
    /// clamped into `[0, 1]`.
    pub fn new(trigger_chance: f64) -> Self {
        let trigger_chance = if trigger_chance.is_nan() {
            0.0
        } else {
            trigger_chance.clamp(0.0, 1.0)
        };
        Self { trigger_chance }
    }

    /// Engine that never fires.
    pub fn quiet() -> Self {
        Self::new(0.0)
    }

    pub fn trigger_chance(&self) -> f64 {
        self.trigger_chance
    }

    pub fn generate(&self, rng: &mut impl Rng) -> Option<Event> {
        if !rng.gen_bool(self.trigger_chance) {
            return None;
        }
        let dist = WeightedIndex::new(EventKind::ALL.map(EventKind::weight)).ok()?;
        Some(Event::new(EventKind::ALL[dist.sample(rng)]))
    }
}

impl Default for EventEngine {
    fn default() -> Self {
        Self::new(TRIGGER_CHANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn colony() -> Colony {
        Colony::new("Test", &mut StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_quiet_engine_never_fires() {
        let engine = EventEngine::quiet();
        let mut rng = StdRng::seed_from_u64(1);
        assert!((0..500).all(|_| engine.generate(&mut rng).is_none()));
    }

    #[test]
    fn test_trigger_rate_near_thirty_percent() {
        let engine = EventEngine::default();
        let mut rng = StdRng::seed_from_u64(2);
        let fired = (0..10_000).filter(|_| engine.generate(&mut rng).is_some()).count();
        assert!((2_700..3_300).contains(&fired), "fired {fired}");
    }

    #[test]
    fn test_weighted_selection_favours_high_morale() {
        let engine = EventEngine::new(1.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut counts: HashMap<EventKind, usize> = HashMap::new();
        for _ in 0..20_000 {
            if let Some(e) = engine.generate(&mut rng) {
                *counts.entry(e.kind).or_default() += 1;
            }
        }
        assert_eq!(counts.len(), 8);
        assert!(counts[&EventKind::HighMorale] > counts[&EventKind::TechBreakthrough] * 2);
    }

    #[test]
    fn test_chance_is_clamped() {
        assert_eq!(EventEngine::new(4.0).trigger_chance(), 1.0);
        assert_eq!(EventEngine::new(-1.0).trigger_chance(), 0.0);
        assert_eq!(EventEngine::new(f64::NAN).trigger_chance(), 0.0);
    }

    #[test]
    fn test_apply_once() {
        let mut colony = colony();
        let mut rng = StdRng::seed_from_u64(4);
        let mut event = Event::new(EventKind::ResourceDiscovery);
        let metal = colony.resources().metal.quantity();

        let summary = event.apply(&mut colony, &mut rng);
        assert_eq!(summary, "The colonists found a metal deposit! | +50 metal");
        assert!(event.is_applied());

        assert_eq!(event.apply(&mut colony, &mut rng), "Event already applied");
        assert_eq!(colony.resources().metal.quantity(), metal + 50.0);
    }

    #[test]
    fn test_solar_storm_drains_energy() {
        let mut colony = colony();
        let mut rng = StdRng::seed_from_u64(5);
        let before = colony.resources().energy.quantity();

        let summary = Event::new(EventKind::SolarStorm).apply(&mut colony, &mut rng);

        assert!(summary.ends_with("| -20 energy"));
        assert_eq!(colony.resources().energy.quantity(), before - 20.0);
    }

    #[test]
    fn test_solar_storm_with_low_stores_takes_nothing() {
        let mut colony = colony();
        let mut rng = StdRng::seed_from_u64(5);
        let energy = colony.resources().energy.quantity();
        assert!(colony.resources_mut().energy.remove(energy - 10.0));

        let summary = Event::new(EventKind::SolarStorm).apply(&mut colony, &mut rng);

        assert!(summary.ends_with("| -20 energy (stores too low, nothing lost)"));
        assert_eq!(colony.resources().energy.quantity(), 10.0);
    }

    #[test]
    fn test_epidemic_spares_the_dead() {
        let mut colony = colony();
        let mut rng = StdRng::seed_from_u64(6);
        colony.colonists_mut()[0].set_health(0);

        let summary = Event::new(EventKind::Epidemic).apply(&mut colony, &mut rng);

        assert!(summary.ends_with("Colonist health: -15"));
        assert_eq!(colony.colonists()[0].health(), 0);
        assert_eq!(colony.colonists()[1].health(), 85);
    }

    #[test]
    fn test_tech_breakthrough_sets_efficiency() {
        let mut colony = colony();
        let mut rng = StdRng::seed_from_u64(7);

        let summary = Event::new(EventKind::TechBreakthrough).apply(&mut colony, &mut rng);

        assert!(summary.ends_with("Efficiency increased by 20%!"));
        assert_eq!(colony.efficiency_bonus(), 1.2);
    }

    #[test]
    fn test_new_colonist_joins() {
        let mut colony = colony();
        let mut rng = StdRng::seed_from_u64(8);

        Event::new(EventKind::NewColonist).apply(&mut colony, &mut rng);

        assert_eq!(colony.colonists().len(), 4);
        assert_eq!(colony.colonists()[3].name(), "Colonist 4");
    }

    #[test]
    fn test_new_colonist_turned_away_when_housing_full() {
        let mut colony = colony();
        let mut rng = StdRng::seed_from_u64(9);
        colony.resources_mut().metal.add(100.0);
        colony.resources_mut().energy.add(100.0);
        colony.build("habitat").unwrap();
        colony.hire_colonist(None, &mut rng).unwrap();
        colony.hire_colonist(None, &mut rng).unwrap();
        assert_eq!(colony.alive_count(), 5);

        let summary = Event::new(EventKind::NewColonist).apply(&mut colony, &mut rng);

        assert!(summary.contains("turned away"), "{summary}");
        assert_eq!(colony.colonists().len(), 5);
    }
}
