//! Low-resource alerts.

use colony_logic::constants::colony::LOW_RESOURCE_PERCENT;

use crate::components::ResourceLedger;

/// One alert per resource below the low-stock threshold, in ledger order.
pub fn low_resource_alerts(ledger: &ResourceLedger) -> Vec<String> {
    ledger
        .iter()
        .filter(|r| r.percent_full() < LOW_RESOURCE_PERCENT)
        .map(|r| format!("{} is low!", r.kind().label()))
        .collect()
}
