//! Step argument records, one per step kind.
//!
//! Optional behaviors are explicit `Option` records: `None` means the
//! behavior is skipped.

use serde::{Deserialize, Serialize};

use crate::commands::{PipettingOverrides, Wait};
use crate::core::{LabwareId, PipetteId, WellName, FIXED_TRASH_ID, TRASH_WELL};

/// When a pipette takes a fresh tip during a multi-aspirate step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeTip {
    /// Fresh tip before every aspirate cycle
    Always,
    /// One fresh tip before the first aspirate of the step
    #[default]
    Once,
    /// Never change tips; the pipette must already hold one
    Never,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixOptions {
    pub volume: f64,
    pub times: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchTipOptions {
    #[serde(default)]
    pub offset_from_bottom_mm: Option<f64>,
}

/// Where residual liquid is blown out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlowoutLocation {
    Trash,
    /// The well just aspirated from
    SourceWell,
    /// The well just dispensed into
    DestWell,
    Well { labware: LabwareId, well: WellName },
}

impl BlowoutLocation {
    /// Concrete `(labware, well)` given the current source and destination.
    pub fn resolve(&self, source: (&str, &str), dest: (&str, &str)) -> (LabwareId, WellName) {
        match self {
            Self::Trash => (FIXED_TRASH_ID.to_string(), TRASH_WELL.to_string()),
            Self::SourceWell => (source.0.to_string(), source.1.to_string()),
            Self::DestWell => (dest.0.to_string(), dest.1.to_string()),
            Self::Well { labware, well } => (labware.clone(), well.clone()),
        }
    }

    /// Labware named explicitly by this location, if any.
    pub fn labware(&self) -> Option<&str> {
        match self {
            Self::Well { labware, .. } => Some(labware.as_str()),
            Self::Trash | Self::SourceWell | Self::DestWell => None,
        }
    }
}

/// Extra volume aspirated by a distribute and blown out after the dispenses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisposalOptions {
    pub volume: f64,
    pub location: BlowoutLocation,
}

/// Move `volume` from each source well to the destination well at the same
/// position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferArgs {
    pub pipette: PipetteId,
    pub source_labware: LabwareId,
    pub source_wells: Vec<WellName>,
    pub dest_labware: LabwareId,
    pub dest_wells: Vec<WellName>,
    pub volume: f64,
    #[serde(default)]
    pub change_tip: ChangeTip,
    #[serde(default)]
    pub pre_wet_tip: bool,
    #[serde(default)]
    pub mix_before_aspirate: Option<MixOptions>,
    #[serde(default)]
    pub touch_tip_after_aspirate: Option<TouchTipOptions>,
    #[serde(default)]
    pub touch_tip_after_dispense: Option<TouchTipOptions>,
    #[serde(default)]
    pub mix_in_destination: Option<MixOptions>,
    #[serde(default)]
    pub blowout: Option<BlowoutLocation>,
    #[serde(default)]
    pub overrides: PipettingOverrides,
}

impl TransferArgs {
    pub fn new(
        pipette: impl Into<PipetteId>,
        source_labware: impl Into<LabwareId>,
        source_wells: Vec<WellName>,
        dest_labware: impl Into<LabwareId>,
        dest_wells: Vec<WellName>,
        volume: f64,
    ) -> Self {
        Self {
            pipette: pipette.into(),
            source_labware: source_labware.into(),
            source_wells,
            dest_labware: dest_labware.into(),
            dest_wells,
            volume,
            change_tip: ChangeTip::default(),
            pre_wet_tip: false,
            mix_before_aspirate: None,
            touch_tip_after_aspirate: None,
            touch_tip_after_dispense: None,
            mix_in_destination: None,
            blowout: None,
            overrides: PipettingOverrides::default(),
        }
    }
}

/// Move `volume` from every source well into one destination well.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidateArgs {
    pub pipette: PipetteId,
    pub source_labware: LabwareId,
    pub source_wells: Vec<WellName>,
    pub dest_labware: LabwareId,
    pub dest_well: WellName,
    pub volume: f64,
    #[serde(default)]
    pub change_tip: ChangeTip,
    #[serde(default)]
    pub pre_wet_tip: bool,
    /// Mix at the first source of each aspiration group, while the tip is empty
    #[serde(default)]
    pub mix_first_aspirate: Option<MixOptions>,
    #[serde(default)]
    pub touch_tip_after_aspirate: Option<TouchTipOptions>,
    #[serde(default)]
    pub touch_tip_after_dispense: Option<TouchTipOptions>,
    #[serde(default)]
    pub mix_in_destination: Option<MixOptions>,
    #[serde(default)]
    pub blowout: Option<BlowoutLocation>,
    #[serde(default)]
    pub overrides: PipettingOverrides,
}

impl ConsolidateArgs {
    pub fn new(
        pipette: impl Into<PipetteId>,
        source_labware: impl Into<LabwareId>,
        source_wells: Vec<WellName>,
        dest_labware: impl Into<LabwareId>,
        dest_well: impl Into<WellName>,
        volume: f64,
    ) -> Self {
        Self {
            pipette: pipette.into(),
            source_labware: source_labware.into(),
            source_wells,
            dest_labware: dest_labware.into(),
            dest_well: dest_well.into(),
            volume,
            change_tip: ChangeTip::default(),
            pre_wet_tip: false,
            mix_first_aspirate: None,
            touch_tip_after_aspirate: None,
            touch_tip_after_dispense: None,
            mix_in_destination: None,
            blowout: None,
            overrides: PipettingOverrides::default(),
        }
    }
}

/// Move `volume` from one source well into every destination well.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributeArgs {
    pub pipette: PipetteId,
    pub source_labware: LabwareId,
    pub source_well: WellName,
    pub dest_labware: LabwareId,
    pub dest_wells: Vec<WellName>,
    pub volume: f64,
    #[serde(default)]
    pub change_tip: ChangeTip,
    #[serde(default)]
    pub pre_wet_tip: bool,
    #[serde(default)]
    pub mix_before_aspirate: Option<MixOptions>,
    #[serde(default)]
    pub touch_tip_after_aspirate: Option<TouchTipOptions>,
    #[serde(default)]
    pub touch_tip_after_dispense: Option<TouchTipOptions>,
    #[serde(default)]
    pub disposal: Option<DisposalOptions>,
    /// Used when no disposal volume is configured
    #[serde(default)]
    pub blowout: Option<BlowoutLocation>,
    #[serde(default)]
    pub overrides: PipettingOverrides,
}

impl DistributeArgs {
    pub fn new(
        pipette: impl Into<PipetteId>,
        source_labware: impl Into<LabwareId>,
        source_well: impl Into<WellName>,
        dest_labware: impl Into<LabwareId>,
        dest_wells: Vec<WellName>,
        volume: f64,
    ) -> Self {
        Self {
            pipette: pipette.into(),
            source_labware: source_labware.into(),
            source_well: source_well.into(),
            dest_labware: dest_labware.into(),
            dest_wells,
            volume,
            change_tip: ChangeTip::default(),
            pre_wet_tip: false,
            mix_before_aspirate: None,
            touch_tip_after_aspirate: None,
            touch_tip_after_dispense: None,
            disposal: None,
            blowout: None,
            overrides: PipettingOverrides::default(),
        }
    }
}

/// Mix `times` cycles of `volume` in each well.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixArgs {
    pub pipette: PipetteId,
    pub labware: LabwareId,
    pub wells: Vec<WellName>,
    pub volume: f64,
    pub times: u32,
    #[serde(default)]
    pub change_tip: ChangeTip,
    #[serde(default)]
    pub touch_tip: Option<TouchTipOptions>,
    #[serde(default)]
    pub blowout: Option<BlowoutLocation>,
    #[serde(default)]
    pub overrides: PipettingOverrides,
}

impl MixArgs {
    pub fn new(
        pipette: impl Into<PipetteId>,
        labware: impl Into<LabwareId>,
        wells: Vec<WellName>,
        volume: f64,
        times: u32,
    ) -> Self {
        Self {
            pipette: pipette.into(),
            labware: labware.into(),
            wells,
            volume,
            times,
            change_tip: ChangeTip::default(),
            touch_tip: None,
            blowout: None,
            overrides: PipettingOverrides::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseArgs {
    #[serde(default)]
    pub message: Option<String>,
    pub wait: Wait,
}

/// Fully validated arguments for one protocol step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stepType", rename_all = "camelCase")]
pub enum StepArgs {
    Transfer(TransferArgs),
    Consolidate(ConsolidateArgs),
    Distribute(DistributeArgs),
    Mix(MixArgs),
    Pause(PauseArgs),
}

impl StepArgs {
    pub fn step_type(&self) -> &'static str {
        match self {
            Self::Transfer(_) => "transfer",
            Self::Consolidate(_) => "consolidate",
            Self::Distribute(_) => "distribute",
            Self::Mix(_) => "mix",
            Self::Pause(_) => "pause",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_args_parse_from_tagged_json() {
        let json = serde_json::json!({
            "stepType": "transfer",
            "pipette": "p300",
            "sourceLabware": "source",
            "sourceWells": ["A1"],
            "destLabware": "dest",
            "destWells": ["B2"],
            "volume": 30.0,
            "changeTip": "never",
            "mixInDestination": {"volume": 20.0, "times": 2},
            "blowout": {"type": "trash"}
        });

        let args: StepArgs = serde_json::from_value(json).unwrap();

        match args {
            StepArgs::Transfer(transfer) => {
                assert_eq!(transfer.change_tip, ChangeTip::Never);
                assert_eq!(transfer.mix_in_destination.unwrap().times, 2);
                assert_eq!(transfer.blowout, Some(BlowoutLocation::Trash));
                assert!(!transfer.pre_wet_tip);
            }
            other => panic!("Expected transfer, got {}", other.step_type()),
        }
    }

    #[test]
    fn blowout_location_resolves_against_current_wells() {
        let source = ("src", "A1");
        let dest = ("dst", "B2");

        assert_eq!(
            BlowoutLocation::SourceWell.resolve(source, dest),
            ("src".to_string(), "A1".to_string())
        );
        assert_eq!(
            BlowoutLocation::DestWell.resolve(source, dest),
            ("dst".to_string(), "B2".to_string())
        );
        assert_eq!(
            BlowoutLocation::Trash.resolve(source, dest),
            (FIXED_TRASH_ID.to_string(), "A1".to_string())
        );
    }
}
