//! Errors reported by command creators.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::core::{LabwareId, PipetteId, WellName};

/// Atomic action that reported a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    PickUpTip,
    DropTip,
    ReplaceTip,
    Aspirate,
    Dispense,
    TouchTip,
    Blowout,
    Transfer,
    Consolidate,
    Distribute,
    Mix,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PickUpTip => "pick up tip",
            Self::DropTip => "drop tip",
            Self::ReplaceTip => "replace tip",
            Self::Aspirate => "aspirate",
            Self::Dispense => "dispense",
            Self::TouchTip => "touch tip",
            Self::Blowout => "blow out",
            Self::Transfer => "transfer",
            Self::Consolidate => "consolidate",
            Self::Distribute => "distribute",
            Self::Mix => "mix",
        };
        f.write_str(name)
    }
}

/// Errors that stop command generation.
///
/// Errors are values: command creators return them alongside the unchanged
/// robot state instead of panicking.
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "kind",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum CommandCreatorError {
    #[error("Attempted to {action} with pipette '{pipette}' that does not exist")]
    PipetteDoesNotExist { action: Action, pipette: PipetteId },

    #[error("Attempted to {action} with labware '{labware}' that does not exist")]
    LabwareDoesNotExist { action: Action, labware: LabwareId },

    #[error("Attempted to {action} at well '{well}' which labware '{labware}' does not have")]
    WellDoesNotExist {
        action: Action,
        labware: LabwareId,
        well: WellName,
    },

    #[error("Cannot {action} with {channels} channels starting at well '{well}' of '{labware}'")]
    ChannelsOutOfRange {
        action: Action,
        labware: LabwareId,
        well: WellName,
        channels: usize,
    },

    #[error("Attempted to {action} with no tip on pipette '{pipette}'")]
    NoTipOnPipette { action: Action, pipette: PipetteId },

    #[error("Pipette '{pipette}' already has a tip; drop it before picking up another")]
    PipetteAlreadyHasTip { pipette: PipetteId },

    #[error("No tip at well '{well}' of tip rack '{labware}'")]
    TipNotAvailable { labware: LabwareId, well: WellName },

    #[error("Not enough tips left for pipette '{pipette}'")]
    InsufficientTips { pipette: PipetteId },

    #[error("Cannot aspirate {requested} uL from '{labware}' well '{well}' which holds {available} uL")]
    NotEnoughLiquid {
        labware: LabwareId,
        well: WellName,
        requested: f64,
        available: f64,
    },

    #[error("Cannot dispense {requested} uL from tip {tip_index} of '{pipette}' which holds {available} uL")]
    NotEnoughLiquidInTip {
        pipette: PipetteId,
        tip_index: usize,
        requested: f64,
        available: f64,
    },

    #[error("Aspirating {requested} uL would exceed the {capacity} uL capacity of pipette '{pipette}'")]
    TipVolumeExceeded {
        pipette: PipetteId,
        requested: f64,
        capacity: f64,
    },

    #[error("Dispensing into '{labware}' well '{well}' would hold {requested} uL, above its {capacity} uL capacity")]
    WellCapacityExceeded {
        labware: LabwareId,
        well: WellName,
        requested: f64,
        capacity: f64,
    },

    #[error("Invalid {step} arguments: {reason}")]
    InvalidStepArguments { step: String, reason: String },
}

impl CommandCreatorError {
    /// Stable catalog code for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PipetteDoesNotExist { .. } => "PIPETTE_DOES_NOT_EXIST",
            Self::LabwareDoesNotExist { .. } => "LABWARE_DOES_NOT_EXIST",
            Self::WellDoesNotExist { .. } => "WELL_DOES_NOT_EXIST",
            Self::ChannelsOutOfRange { .. } => "CHANNELS_OUT_OF_RANGE",
            Self::NoTipOnPipette { .. } => "NO_TIP_ON_PIPETTE",
            Self::PipetteAlreadyHasTip { .. } => "PIPETTE_ALREADY_HAS_TIP",
            Self::TipNotAvailable { .. } => "TIP_NOT_AVAILABLE",
            Self::InsufficientTips { .. } => "INSUFFICIENT_TIPS",
            Self::NotEnoughLiquid { .. } => "NOT_ENOUGH_LIQUID",
            Self::NotEnoughLiquidInTip { .. } => "NOT_ENOUGH_LIQUID_IN_TIP",
            Self::TipVolumeExceeded { .. } => "TIP_VOLUME_EXCEEDED",
            Self::WellCapacityExceeded { .. } => "WELL_CAPACITY_EXCEEDED",
            Self::InvalidStepArguments { .. } => "INVALID_STEP_ARGUMENTS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_serialized_tag() {
        let error = CommandCreatorError::NoTipOnPipette {
            action: Action::Aspirate,
            pipette: "p300".to_string(),
        };

        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["kind"], error.kind());
        assert_eq!(json["action"], "aspirate");
    }

    #[test]
    fn message_names_the_action() {
        let error = CommandCreatorError::PipetteDoesNotExist {
            action: Action::Transfer,
            pipette: "ghost".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Attempted to transfer with pipette 'ghost' that does not exist"
        );
    }
}
