//! Stepgen: a pure compiler from liquid-handling steps to robot instructions
//!
//! Stepgen turns declarative protocol steps (transfer, consolidate,
//! distribute, mix, pause) into ordered atomic robot instructions while
//! simulating tip occupancy and liquid composition, so the next step sees a
//! consistent world.
//!
//! Everything here is a pure function. State is an immutable [`RobotState`]
//! value threaded through a short-circuiting fold; errors and warnings are
//! returned, never thrown.
//!
//! # Core Concepts
//!
//! - **RobotState**: Immutable snapshot of tips and liquid
//! - **CommandCreator**: `RobotState -> {commands, robot_state, errors, warnings}`
//! - **Compound creators**: Expand one step into many atomic creators
//! - **Reducer**: Runs creators in order, stopping at the first error
//!
//! # Example
//!
//! ```rust
//! use stepgen::builder::RobotStateBuilder;
//! use stepgen::compound::{transfer, ChangeTip, TransferArgs};
//! use stepgen::composition;
//! use stepgen::core::{LabwareDefinition, PipetteInstrument, PipetteSpec};
//!
//! let state = RobotStateBuilder::new()
//!     .trash()
//!     .labware("tips", LabwareDefinition::tiprack_96(300.0))
//!     .labware("source", LabwareDefinition::well_plate_96(2000.0))
//!     .labware("dest", LabwareDefinition::well_plate_96(2000.0))
//!     .pipette("p300", PipetteInstrument::new(PipetteSpec::p300_single()).with_tiprack("tips"))
//!     .liquid("source", "A1", composition! { "water" => 1000.0 })
//!     .build()
//!     .unwrap();
//!
//! let args = TransferArgs {
//!     change_tip: ChangeTip::Once,
//!     ..TransferArgs::new(
//!         "p300",
//!         "source",
//!         vec!["A1".to_string()],
//!         "dest",
//!         vec!["B2".to_string()],
//!         350.0,
//!     )
//! };
//!
//! let result = transfer(args).run(&state);
//!
//! let names: Vec<&str> = result.commands.iter().map(|c| c.name()).collect();
//! assert_eq!(names, ["pick-up-tip", "aspirate", "dispense", "aspirate", "dispense"]);
//! assert_eq!(result.robot_state.well_volume("dest", "B2"), 350.0);
//!
//! // the input snapshot is untouched
//! assert_eq!(state.well_volume("source", "A1"), 1000.0);
//! ```

pub mod builder;
pub mod commands;
pub mod compound;
pub mod core;
pub mod errors;
pub mod validation;

#[cfg(test)]
mod test_fixtures;

// Re-export commonly used types
pub use builder::{BuildError, RobotStateBuilder};
pub use commands::{reduce_command_creators, Command, CommandCreator, CommandCreatorResult};
pub use compound::{compile_step, StepArgs};
pub use core::{Composition, RobotState};
pub use errors::{CommandCreatorError, CommandCreatorWarning, IssueRecord};
