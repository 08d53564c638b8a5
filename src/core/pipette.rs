//! Pipette capability specs and installed instruments.

use serde::{Deserialize, Serialize};

use super::LabwareId;

/// Physical capabilities of a pipette model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipetteSpec {
    pub model: String,
    pub channels: usize,
    /// Smallest volume the pipette can move accurately (uL)
    pub min_volume: f64,
    /// Largest volume the pipette can hold (uL)
    pub max_volume: f64,
}

impl PipetteSpec {
    pub fn new(
        model: impl Into<String>,
        channels: usize,
        min_volume: f64,
        max_volume: f64,
    ) -> Self {
        Self {
            model: model.into(),
            channels,
            min_volume,
            max_volume,
        }
    }

    pub fn p10_single() -> Self {
        Self::new("p10_single", 1, 1.0, 10.0)
    }

    pub fn p50_single() -> Self {
        Self::new("p50_single", 1, 5.0, 50.0)
    }

    pub fn p300_single() -> Self {
        Self::new("p300_single", 1, 30.0, 300.0)
    }

    pub fn p300_multi() -> Self {
        Self::new("p300_multi", 8, 30.0, 300.0)
    }

    pub fn p1000_single() -> Self {
        Self::new("p1000_single", 1, 100.0, 1000.0)
    }
}

/// A pipette installed on the robot, together with the tip racks it draws from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipetteInstrument {
    pub spec: PipetteSpec,
    /// Tip racks searched in order when a fresh tip is needed
    pub tipracks: Vec<LabwareId>,
}

impl PipetteInstrument {
    pub fn new(spec: PipetteSpec) -> Self {
        Self {
            spec,
            tipracks: Vec::new(),
        }
    }

    pub fn with_tiprack(mut self, tiprack: impl Into<LabwareId>) -> Self {
        self.tipracks.push(tiprack.into());
        self
    }

    pub fn channels(&self) -> usize {
        self.spec.channels
    }
}
