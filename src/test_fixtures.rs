//! Shared deck setup for unit tests.

use crate::builder::RobotStateBuilder;
use crate::core::{Composition, LabwareDefinition, PipetteInstrument, PipetteSpec, RobotState};

pub(crate) const PIPETTE: &str = "p300SingleId";
pub(crate) const MULTI_PIPETTE: &str = "p300MultiId";
pub(crate) const TIPRACK: &str = "tiprack1Id";
pub(crate) const SOURCE_PLATE: &str = "sourcePlateId";
pub(crate) const DEST_PLATE: &str = "destPlateId";
pub(crate) const SMALL_PLATE: &str = "smallPlateId";
pub(crate) const RESERVOIR: &str = "troughId";

pub(crate) fn deck() -> RobotStateBuilder {
    RobotStateBuilder::new()
        .trash()
        .labware(TIPRACK, LabwareDefinition::tiprack_96(300.0))
        .labware(SOURCE_PLATE, LabwareDefinition::well_plate_96(2000.0))
        .labware(DEST_PLATE, LabwareDefinition::well_plate_96(2000.0))
        .labware(SMALL_PLATE, LabwareDefinition::well_plate_96(200.0))
        .labware(RESERVOIR, LabwareDefinition::reservoir_12(15_000.0))
        .pipette(
            PIPETTE,
            PipetteInstrument::new(PipetteSpec::p300_single()).with_tiprack(TIPRACK),
        )
        .pipette(
            MULTI_PIPETTE,
            PipetteInstrument::new(PipetteSpec::p300_multi()).with_tiprack(TIPRACK),
        )
}

/// Deck with no tips mounted and empty wells.
pub(crate) fn robot_state() -> RobotState {
    deck().build().expect("fixture deck is consistent")
}

/// Same deck with a fresh tip on the single-channel pipette.
pub(crate) fn robot_state_with_tip() -> RobotState {
    deck()
        .tip_mounted(PIPETTE)
        .build()
        .expect("fixture deck is consistent")
}

pub(crate) fn with_liquid(
    state: RobotState,
    labware: &str,
    well: &str,
    ingredient: &str,
    volume: f64,
) -> RobotState {
    let contents = state
        .liquid_state()
        .well(labware, well)
        .cloned()
        .unwrap_or_else(Composition::new)
        .with_ingredient(ingredient, volume);
    state.with_well_contents(labware, well, contents)
}
