//! Warnings that accompany successful command generation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::PipetteId;

/// Non-fatal findings. Warnings never stop expansion.
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "kind",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum CommandCreatorWarning {
    #[error("Volume {volume} uL is below the {min_volume} uL minimum of pipette '{pipette}'")]
    BelowPipetteMinimumVolume {
        pipette: PipetteId,
        volume: f64,
        min_volume: f64,
    },

    #[error("Disposal volume {disposal_volume} uL is below the {min_volume} uL minimum of pipette '{pipette}'")]
    BelowMinDisposalVolume {
        pipette: PipetteId,
        disposal_volume: f64,
        min_volume: f64,
    },
}

impl CommandCreatorWarning {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BelowPipetteMinimumVolume { .. } => "BELOW_PIPETTE_MINIMUM_VOLUME",
            Self::BelowMinDisposalVolume { .. } => "BELOW_MIN_DISPOSAL_VOLUME",
        }
    }
}
