//! Builder for the initial robot state of a protocol.

use std::collections::BTreeMap;

use crate::builder::error::BuildError;
use crate::core::{
    Composition, LabwareDefinition, LabwareId, PipetteId, PipetteInstrument, RobotState,
    WellName, FIXED_TRASH_ID,
};

/// Builder for the snapshot a protocol starts from, with a fluent API.
///
/// Tip racks start full. Pipettes start without tips unless
/// [`tip_mounted`](Self::tip_mounted) is called.
///
/// # Example
///
/// ```rust
/// use stepgen::builder::RobotStateBuilder;
/// use stepgen::composition;
/// use stepgen::core::{LabwareDefinition, PipetteInstrument, PipetteSpec};
///
/// let state = RobotStateBuilder::new()
///     .trash()
///     .labware("tiprack", LabwareDefinition::tiprack_96(300.0))
///     .labware("plate", LabwareDefinition::well_plate_96(360.0))
///     .pipette("p300", PipetteInstrument::new(PipetteSpec::p300_single()).with_tiprack("tiprack"))
///     .liquid("plate", "A1", composition! { "water" => 200.0 })
///     .build()
///     .unwrap();
///
/// assert_eq!(state.well_volume("plate", "A1"), 200.0);
/// assert_eq!(state.max_aspirate_volume("p300"), Some(300.0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RobotStateBuilder {
    pipettes: Vec<(PipetteId, PipetteInstrument)>,
    labware: Vec<(LabwareId, LabwareDefinition)>,
    liquids: Vec<(LabwareId, WellName, Composition)>,
    mounted_tips: Vec<PipetteId>,
}

impl RobotStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a pipette.
    pub fn pipette(mut self, id: impl Into<PipetteId>, instrument: PipetteInstrument) -> Self {
        self.pipettes.push((id.into(), instrument));
        self
    }

    /// Place a piece of labware on the deck.
    pub fn labware(mut self, id: impl Into<LabwareId>, definition: LabwareDefinition) -> Self {
        self.labware.push((id.into(), definition));
        self
    }

    /// Place the fixed trash (required).
    pub fn trash(self) -> Self {
        self.labware(FIXED_TRASH_ID, LabwareDefinition::trash())
    }

    /// Fill a well. Repeated calls for one well add up.
    pub fn liquid(
        mut self,
        labware: impl Into<LabwareId>,
        well: impl Into<WellName>,
        contents: Composition,
    ) -> Self {
        self.liquids.push((labware.into(), well.into(), contents));
        self
    }

    /// Start with a fresh tip already on the pipette.
    pub fn tip_mounted(mut self, pipette: impl Into<PipetteId>) -> Self {
        self.mounted_tips.push(pipette.into());
        self
    }

    /// Build the robot state.
    /// Returns an error if the deck setup is inconsistent.
    pub fn build(self) -> Result<RobotState, BuildError> {
        let mut labware = BTreeMap::new();
        for (id, definition) in self.labware {
            if labware.contains_key(&id) {
                return Err(BuildError::DuplicateLabware(id));
            }
            labware.insert(id, definition);
        }

        if !labware.contains_key(FIXED_TRASH_ID) {
            return Err(BuildError::MissingTrash);
        }

        let mut instruments = BTreeMap::new();
        for (id, instrument) in self.pipettes {
            if instruments.contains_key(&id) {
                return Err(BuildError::DuplicatePipette(id));
            }
            validate_instrument(&id, &instrument, &labware)?;
            instruments.insert(id, instrument);
        }

        let mut state = RobotState {
            instruments,
            labware,
            ..RobotState::default()
        };

        for (id, definition) in &state.labware {
            if definition.is_tiprack() {
                let tips = definition.wells().map(|well| (well.clone(), true)).collect();
                state.tip_state.tipracks.insert(id.clone(), tips);
            }
        }

        for id in state.instruments.keys() {
            state.tip_state.pipettes.insert(id.clone(), false);
        }

        for (labware_id, well, contents) in self.liquids {
            let definition = state
                .labware
                .get(&labware_id)
                .ok_or_else(|| BuildError::UnknownLabware(labware_id.clone()))?;
            if !definition.has_well(&well) {
                return Err(BuildError::UnknownWell {
                    labware: labware_id,
                    well,
                });
            }
            let merged = state
                .liquid_state
                .well(&labware_id, &well)
                .cloned()
                .unwrap_or_default()
                .merge(&contents);
            state = state.with_well_contents(&labware_id, &well, merged);
        }

        for pipette in self.mounted_tips {
            let channels = state
                .instruments
                .get(&pipette)
                .map(PipetteInstrument::channels)
                .ok_or_else(|| BuildError::UnknownPipette(pipette.clone()))?;
            state = state
                .with_tip_mounted(&pipette, true)
                .with_fresh_tips(&pipette, channels);
        }

        Ok(state)
    }
}

fn validate_instrument(
    id: &str,
    instrument: &PipetteInstrument,
    labware: &BTreeMap<LabwareId, LabwareDefinition>,
) -> Result<(), BuildError> {
    let spec = &instrument.spec;
    let invalid = |reason: &str| BuildError::InvalidPipetteSpec {
        pipette: id.to_string(),
        reason: reason.to_string(),
    };

    if spec.channels == 0 {
        return Err(invalid("channels must be at least 1"));
    }
    if !(spec.max_volume.is_finite() && spec.max_volume > 0.0) {
        return Err(invalid("max volume must be positive"));
    }
    if !(spec.min_volume.is_finite()
        && spec.min_volume >= 0.0
        && spec.min_volume <= spec.max_volume)
    {
        return Err(invalid("min volume must lie between 0 and max volume"));
    }

    for rack in &instrument.tipracks {
        match labware.get(rack) {
            None => {
                return Err(BuildError::UnknownTiprack {
                    pipette: id.to_string(),
                    labware: rack.clone(),
                })
            }
            Some(definition) if !definition.is_tiprack() => {
                return Err(BuildError::NotATiprack {
                    pipette: id.to_string(),
                    labware: rack.clone(),
                })
            }
            Some(_) => {}
        }
    }

    Ok(())
}
