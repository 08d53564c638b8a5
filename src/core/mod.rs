//! Robot state model.
//!
//! This module contains the pure data the compiler threads through every
//! command creator:
//! - Ingredient compositions for wells and tips
//! - Pipette and labware specs
//! - The immutable `RobotState` snapshot and its query helpers
//!
//! Nothing in this module mutates a snapshot in place; successor snapshots
//! are derived with explicit `with_*` constructors.

mod composition;
mod labware;
mod pipette;
mod state;

pub use composition::{Composition, VOLUME_EPSILON};
pub use labware::{LabwareDefinition, LabwareKind, FIXED_TRASH_ID, TRASH_WELL};
pub use pipette::{PipetteInstrument, PipetteSpec};
pub use state::{LiquidState, RobotState, TipState};

pub type PipetteId = String;
pub type LabwareId = String;
pub type WellName = String;
pub type IngredientId = String;
