//! Errors returned by colony actions.
//!
//! Validation and resource failures never abort a turn; they come back to
//! the caller as a [`ColonyError`] whose message is shown to the player.

use colony_logic::resources::ResourceType;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColonyError {
    #[error("Invalid building type: {0}")]
    InvalidBuildingType(String),

    #[error("Invalid profession: {0} (choose Farmer, Engineer, Scientist, Miner or Doctor)")]
    InvalidProfession(String),

    #[error("Invalid building status: {0} (choose active, inactive or maintenance)")]
    InvalidStatus(String),

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Insufficient resources! Required: {}", format_cost(.required))]
    InsufficientResources { required: Vec<(ResourceType, f64)> },

    #[error("Housing capacity reached! Build more habitats.")]
    HousingFull,

    #[error("No building at index {0}")]
    UnknownBuilding(usize),

    #[error("No colonist with id {0}")]
    UnknownColonist(u32),

    #[error("Colonist {0} is dead")]
    ColonistDead(u32),

    #[error("Capacity must be at least 1, got {0}")]
    InvalidCapacity(f64),
}

fn format_cost(cost: &[(ResourceType, f64)]) -> String {
    cost.iter()
        .map(|(r, amt)| format!("{amt:.0} {r}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_message_lists_cost() {
        let err = ColonyError::InsufficientResources {
            required: vec![(ResourceType::Metal, 20.0), (ResourceType::Energy, 10.0)],
        };
        assert_eq!(
            err.to_string(),
            "Insufficient resources! Required: 20 metal, 10 energy"
        );
    }
}
