//! Atomic robot instructions.
//!
//! Instructions serialize as `{"command": name, "params": {...}}`, the form
//! consumed by protocol serializers.

use serde::{Deserialize, Serialize};

use crate::core::{LabwareId, PipetteId, WellName};

/// One atomic robot instruction.
///
/// # Example
///
/// ```rust
/// use stepgen::commands::{Command, TipParams};
///
/// let command = Command::PickUpTip(TipParams::new("p300", "tiprack", "A1"));
/// let json = serde_json::to_value(&command).unwrap();
///
/// assert_eq!(json["command"], "pick-up-tip");
/// assert_eq!(json["params"]["well"], "A1");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "params", rename_all = "kebab-case")]
pub enum Command {
    PickUpTip(TipParams),
    DropTip(TipParams),
    Aspirate(PipettingParams),
    Dispense(PipettingParams),
    TouchTip(TouchTipParams),
    Blowout(BlowoutParams),
    Delay(DelayParams),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PickUpTip(_) => "pick-up-tip",
            Self::DropTip(_) => "drop-tip",
            Self::Aspirate(_) => "aspirate",
            Self::Dispense(_) => "dispense",
            Self::TouchTip(_) => "touch-tip",
            Self::Blowout(_) => "blowout",
            Self::Delay(_) => "delay",
        }
    }
}

/// Tip pick-up or drop location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipParams {
    pub pipette: PipetteId,
    pub labware: LabwareId,
    pub well: WellName,
}

impl TipParams {
    pub fn new(
        pipette: impl Into<PipetteId>,
        labware: impl Into<LabwareId>,
        well: impl Into<WellName>,
    ) -> Self {
        Self {
            pipette: pipette.into(),
            labware: labware.into(),
            well: well.into(),
        }
    }
}

/// Parameters shared by aspirate and dispense.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipettingParams {
    pub pipette: PipetteId,
    pub volume: f64,
    pub labware: LabwareId,
    pub well: WellName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_from_bottom_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_rate_ul_sec: Option<f64>,
}

impl PipettingParams {
    pub fn new(
        pipette: impl Into<PipetteId>,
        labware: impl Into<LabwareId>,
        well: impl Into<WellName>,
        volume: f64,
    ) -> Self {
        Self {
            pipette: pipette.into(),
            volume,
            labware: labware.into(),
            well: well.into(),
            offset_from_bottom_mm: None,
            flow_rate_ul_sec: None,
        }
    }

    pub fn with_offset_from_bottom(mut self, offset_mm: Option<f64>) -> Self {
        self.offset_from_bottom_mm = offset_mm;
        self
    }

    pub fn with_flow_rate(mut self, flow_rate_ul_sec: Option<f64>) -> Self {
        self.flow_rate_ul_sec = flow_rate_ul_sec;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchTipParams {
    pub pipette: PipetteId,
    pub labware: LabwareId,
    pub well: WellName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_from_bottom_mm: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlowoutParams {
    pub pipette: PipetteId,
    pub labware: LabwareId,
    pub well: WellName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_rate_ul_sec: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub wait: Wait,
}

/// How long a delay lasts.
///
/// Serialized as `true` when waiting for the operator to resume, or as a
/// number of seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "WaitRepr", into = "WaitRepr")]
pub enum Wait {
    UntilResume,
    Seconds(f64),
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum WaitRepr {
    Flag(bool),
    Seconds(f64),
}

impl From<WaitRepr> for Wait {
    fn from(repr: WaitRepr) -> Self {
        match repr {
            WaitRepr::Flag(true) => Wait::UntilResume,
            WaitRepr::Flag(false) => Wait::Seconds(0.0),
            WaitRepr::Seconds(seconds) => Wait::Seconds(seconds),
        }
    }
}

impl From<Wait> for WaitRepr {
    fn from(wait: Wait) -> Self {
        match wait {
            Wait::UntilResume => WaitRepr::Flag(true),
            Wait::Seconds(seconds) => WaitRepr::Seconds(seconds),
        }
    }
}

/// Per-step flow rate and height overrides applied to aspirates and dispenses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipettingOverrides {
    pub aspirate_flow_rate_ul_sec: Option<f64>,
    pub dispense_flow_rate_ul_sec: Option<f64>,
    pub aspirate_offset_from_bottom_mm: Option<f64>,
    pub dispense_offset_from_bottom_mm: Option<f64>,
}

impl PipettingOverrides {
    pub fn aspirate_params(
        &self,
        pipette: &str,
        labware: &str,
        well: &str,
        volume: f64,
    ) -> PipettingParams {
        PipettingParams::new(pipette, labware, well, volume)
            .with_offset_from_bottom(self.aspirate_offset_from_bottom_mm)
            .with_flow_rate(self.aspirate_flow_rate_ul_sec)
    }

    pub fn dispense_params(
        &self,
        pipette: &str,
        labware: &str,
        well: &str,
        volume: f64,
    ) -> PipettingParams {
        PipettingParams::new(pipette, labware, well, volume)
            .with_offset_from_bottom(self.dispense_offset_from_bottom_mm)
            .with_flow_rate(self.dispense_flow_rate_ul_sec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspirate_serializes_as_command_record() {
        let command = Command::Aspirate(PipettingParams::new("p300", "plate", "A1", 30.0));

        let json = serde_json::to_value(&command).unwrap();

        assert_eq!(json["command"], "aspirate");
        assert_eq!(json["params"]["volume"], 30.0);
        assert!(json["params"].get("flowRateUlSec").is_none());
    }

    #[test]
    fn overrides_reach_params() {
        let overrides = PipettingOverrides {
            aspirate_flow_rate_ul_sec: Some(50.0),
            dispense_offset_from_bottom_mm: Some(2.5),
            ..Default::default()
        };

        let aspirate = overrides.aspirate_params("p", "plate", "A1", 10.0);
        let dispense = overrides.dispense_params("p", "plate", "B1", 10.0);

        assert_eq!(aspirate.flow_rate_ul_sec, Some(50.0));
        assert_eq!(aspirate.offset_from_bottom_mm, None);
        assert_eq!(dispense.offset_from_bottom_mm, Some(2.5));
    }

    #[test]
    fn delay_wait_serializes_as_flag_or_seconds() {
        let resume = Command::Delay(DelayParams {
            message: Some("swap plates".to_string()),
            wait: Wait::UntilResume,
        });
        let timed = Command::Delay(DelayParams {
            message: None,
            wait: Wait::Seconds(90.0),
        });

        let resume_json = serde_json::to_value(&resume).unwrap();
        let timed_json = serde_json::to_value(&timed).unwrap();

        assert_eq!(resume_json["params"]["wait"], true);
        assert_eq!(timed_json["params"]["wait"], 90.0);

        let parsed: Command = serde_json::from_value(timed_json).unwrap();
        assert_eq!(parsed, timed);
    }
}
