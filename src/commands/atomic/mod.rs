//! Atomic command creators.
//!
//! Each creator checks its preconditions against the snapshot it is given
//! and either emits one instruction plus the successor snapshot, or one
//! error and the unchanged snapshot.

mod mix;
mod pipetting;
mod tips;

pub use mix::mix_util;
pub use pipetting::{aspirate, blowout, dispense, touch_tip};
pub use tips::{drop_tip, pick_up_tip};

use crate::core::{LabwareDefinition, PipetteInstrument, RobotState, WellName};
use crate::errors::{Action, CommandCreatorError, CommandCreatorWarning};

fn require_pipette<'a>(
    state: &'a RobotState,
    action: Action,
    pipette: &str,
) -> Result<&'a PipetteInstrument, CommandCreatorError> {
    state
        .pipette(pipette)
        .ok_or_else(|| CommandCreatorError::PipetteDoesNotExist {
            action,
            pipette: pipette.to_string(),
        })
}

fn require_labware<'a>(
    state: &'a RobotState,
    action: Action,
    labware: &str,
) -> Result<&'a LabwareDefinition, CommandCreatorError> {
    state
        .labware(labware)
        .ok_or_else(|| CommandCreatorError::LabwareDoesNotExist {
            action,
            labware: labware.to_string(),
        })
}

fn require_tip(
    state: &RobotState,
    action: Action,
    pipette: &str,
) -> Result<(), CommandCreatorError> {
    if state.has_tip(pipette) {
        Ok(())
    } else {
        Err(CommandCreatorError::NoTipOnPipette {
            action,
            pipette: pipette.to_string(),
        })
    }
}

/// Wells touched by each tip, indexed by tip.
fn resolve_wells(
    definition: &LabwareDefinition,
    action: Action,
    labware: &str,
    well: &str,
    channels: usize,
) -> Result<Vec<WellName>, CommandCreatorError> {
    if !definition.has_well(well) {
        return Err(CommandCreatorError::WellDoesNotExist {
            action,
            labware: labware.to_string(),
            well: well.to_string(),
        });
    }

    definition
        .wells_for_tips(well, channels)
        .ok_or_else(|| CommandCreatorError::ChannelsOutOfRange {
            action,
            labware: labware.to_string(),
            well: well.to_string(),
            channels,
        })
}

fn below_minimum_warning(
    instrument: &PipetteInstrument,
    pipette: &str,
    volume: f64,
) -> Option<CommandCreatorWarning> {
    let min_volume = instrument.spec.min_volume;
    (volume > 0.0 && volume < min_volume).then(|| CommandCreatorWarning::BelowPipetteMinimumVolume {
        pipette: pipette.to_string(),
        volume,
        min_volume,
    })
}
