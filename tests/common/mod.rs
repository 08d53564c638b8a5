//! Deck shared by the integration tests.

#![allow(dead_code)]

use stepgen::builder::RobotStateBuilder;
use stepgen::composition;
use stepgen::core::{LabwareDefinition, PipetteInstrument, PipetteSpec, RobotState};

pub const PIPETTE: &str = "p300SingleId";
pub const TIPRACK: &str = "tiprack1Id";
pub const SOURCE: &str = "sourcePlateId";
pub const DEST: &str = "destPlateId";

pub fn deck() -> RobotStateBuilder {
    RobotStateBuilder::new()
        .trash()
        .labware(TIPRACK, LabwareDefinition::tiprack_96(300.0))
        .labware(SOURCE, LabwareDefinition::well_plate_96(2000.0))
        .labware(DEST, LabwareDefinition::well_plate_96(2000.0))
        .pipette(
            PIPETTE,
            PipetteInstrument::new(PipetteSpec::p300_single()).with_tiprack(TIPRACK),
        )
}

/// Source well A1 holding `volume` of ingredient "0", no tip mounted.
pub fn stocked(volume: f64) -> RobotState {
    deck()
        .liquid(SOURCE, "A1", composition! { "0" => volume })
        .build()
        .expect("test deck is consistent")
}

/// Same as [`stocked`] with a fresh tip already on the pipette.
pub fn stocked_with_tip(volume: f64) -> RobotState {
    deck()
        .liquid(SOURCE, "A1", composition! { "0" => volume })
        .tip_mounted(PIPETTE)
        .build()
        .expect("test deck is consistent")
}

pub fn wells(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
