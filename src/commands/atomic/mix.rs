//! Single-well mix cycle.

use super::pipetting::{aspirate, dispense};
use crate::commands::command::PipettingOverrides;
use crate::commands::creator::CommandCreator;

/// `times` aspirate/dispense pairs of `volume` at one well, flattened.
pub fn mix_util(
    pipette: &str,
    labware: &str,
    well: &str,
    volume: f64,
    times: u32,
    overrides: &PipettingOverrides,
) -> Vec<CommandCreator> {
    (0..times)
        .flat_map(|_| {
            [
                aspirate(overrides.aspirate_params(pipette, labware, well, volume)),
                dispense(overrides.dispense_params(pipette, labware, well, volume)),
            ]
        })
        .collect()
}
