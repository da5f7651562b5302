//! Resource ledger: one bounded stockpile per resource type.

use colony_logic::resources::ResourceType;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ColonyError;

/// Bounded stockpile of one resource. `0 <= quantity <= capacity` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub(crate) kind: ResourceType,
    pub(crate) quantity: f64,
    pub(crate) capacity: f64,
}

impl Resource {
    pub fn new(kind: ResourceType, quantity: f64, capacity: f64) -> Self {
        let capacity = capacity.max(1.0);
        Self {
            kind,
            quantity: quantity.clamp(0.0, capacity),
            capacity,
        }
    }

    pub fn kind(&self) -> ResourceType {
        self.kind
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Add up to capacity. Returns how much was actually stored.
    pub fn add(&mut self, amount: f64) -> f64 {
        if amount <= 0.0 {
            return 0.0;
        }
        let before = self.quantity;
        self.quantity = (self.quantity + amount).min(self.capacity);
        self.quantity - before
    }

    /// Take `amount` if all of it is there. Otherwise nothing changes.
    pub fn remove(&mut self, amount: f64) -> bool {
        if amount <= 0.0 {
            return true;
        }
        if self.quantity >= amount {
            self.quantity -= amount;
            true
        } else {
            false
        }
    }

    pub fn is_available(&self, amount: f64) -> bool {
        self.quantity >= amount
    }

    pub fn percent_full(&self) -> f64 {
        100.0 * self.quantity / self.capacity
    }

    /// Change the storage limit, clipping the stock if it no longer fits.
    pub fn set_capacity(&mut self, capacity: f64) -> Result<(), ColonyError> {
        if capacity.is_nan() || capacity < 1.0 {
            return Err(ColonyError::InvalidCapacity(capacity));
        }
        self.capacity = capacity;
        self.quantity = self.quantity.min(capacity);
        Ok(())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.1}/{}", self.kind.label(), self.quantity, self.capacity)
    }
}

/// The colony's four stockpiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLedger {
    pub food: Resource,
    pub water: Resource,
    pub energy: Resource,
    pub metal: Resource,
}

impl ResourceLedger {
    /// Ledger with the standard starting stockpiles.
    pub fn new() -> Self {
        let make = |kind: ResourceType| {
            let (qty, cap) = kind.starting_stock();
            Resource::new(kind, qty, cap)
        };
        Self {
            food: make(ResourceType::Food),
            water: make(ResourceType::Water),
            energy: make(ResourceType::Energy),
            metal: make(ResourceType::Metal),
        }
    }

    pub fn get(&self, kind: ResourceType) -> &Resource {
        match kind {
            ResourceType::Food => &self.food,
            ResourceType::Water => &self.water,
            ResourceType::Energy => &self.energy,
            ResourceType::Metal => &self.metal,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceType) -> &mut Resource {
        match kind {
            ResourceType::Food => &mut self.food,
            ResourceType::Water => &mut self.water,
            ResourceType::Energy => &mut self.energy,
            ResourceType::Metal => &mut self.metal,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        [&self.food, &self.water, &self.energy, &self.metal].into_iter()
    }

    /// True when every entry of `cost` is available.
    pub fn can_afford(&self, cost: &[(ResourceType, f64)]) -> bool {
        cost.iter().all(|(kind, amount)| self.get(*kind).is_available(*amount))
    }

    /// Deduct a whole cost mapping, or nothing at all.
    pub fn spend(&mut self, cost: &[(ResourceType, f64)]) -> Result<(), ColonyError> {
        if !self.can_afford(cost) {
            return Err(ColonyError::InsufficientResources {
                required: cost.to_vec(),
            });
        }
        for (kind, amount) in cost {
            self.get_mut(*kind).remove(*amount);
        }
        Ok(())
    }
}

impl Default for ResourceLedger {
    fn default() -> Self {
        Self::new()
    }
}
