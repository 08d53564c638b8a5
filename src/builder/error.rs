//! Build errors for the robot state builder.

use thiserror::Error;

/// Errors that can occur when assembling an initial robot state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("No trash labware. Call .trash() before .build()")]
    MissingTrash,

    #[error("Pipette '{0}' is declared twice")]
    DuplicatePipette(String),

    #[error("Labware '{0}' is declared twice")]
    DuplicateLabware(String),

    #[error("Pipette '{pipette}' has invalid spec: {reason}")]
    InvalidPipetteSpec { pipette: String, reason: String },

    #[error("Pipette '{pipette}' uses tip rack '{labware}' which is not declared")]
    UnknownTiprack { pipette: String, labware: String },

    #[error("Pipette '{pipette}' uses '{labware}' which is not a tip rack")]
    NotATiprack { pipette: String, labware: String },

    #[error("Liquid placed in undeclared labware '{0}'")]
    UnknownLabware(String),

    #[error("Liquid placed in well '{well}' which labware '{labware}' does not have")]
    UnknownWell { labware: String, well: String },

    #[error("Tip mounted on undeclared pipette '{0}'")]
    UnknownPipette(String),
}
