//! Compound command creators: one protocol step to many instructions.
//!
//! Each creator takes its step arguments, checks them once, and returns a
//! [`CommandCreator`] that expands into atomic creators and reduces them
//! against whatever state it is later run on.
//!
//! # Example
//!
//! ```rust
//! use stepgen::builder::RobotStateBuilder;
//! use stepgen::compound::{compile_step, StepArgs, TransferArgs};
//! use stepgen::composition;
//! use stepgen::core::{LabwareDefinition, PipetteInstrument, PipetteSpec};
//!
//! let state = RobotStateBuilder::new()
//!     .trash()
//!     .labware("tips", LabwareDefinition::tiprack_96(300.0))
//!     .labware("plate", LabwareDefinition::well_plate_96(2000.0))
//!     .pipette("p300", PipetteInstrument::new(PipetteSpec::p300_single()).with_tiprack("tips"))
//!     .liquid("plate", "A1", composition! { "water" => 500.0 })
//!     .build()
//!     .unwrap();
//!
//! let step = StepArgs::Transfer(TransferArgs::new(
//!     "p300",
//!     "plate",
//!     vec!["A1".to_string()],
//!     "plate",
//!     vec!["B1".to_string()],
//!     100.0,
//! ));
//!
//! let result = compile_step(&step).run(&state);
//!
//! assert!(result.is_success());
//! assert_eq!(result.robot_state.well_volume("plate", "B1"), 100.0);
//! ```

mod args;
mod chunking;
mod common;
mod consolidate;
mod distribute;
mod mix;
mod pause;
mod replace_tip;
mod transfer;

pub use args::{
    BlowoutLocation, ChangeTip, ConsolidateArgs, DisposalOptions, DistributeArgs, MixArgs,
    MixOptions, PauseArgs, StepArgs, TouchTipOptions, TransferArgs,
};
pub use chunking::{split_volume, MAX_CHUNKS};
pub use consolidate::consolidate;
pub use distribute::distribute;
pub use mix::mix;
pub use pause::pause;
pub use replace_tip::replace_tip;
pub use transfer::transfer;

use crate::commands::CommandCreator;

/// Compound creator for any step kind.
pub fn compile_step(step: &StepArgs) -> CommandCreator {
    tracing::debug!(step_type = step.step_type(), "compiling step");

    match step.clone() {
        StepArgs::Transfer(args) => transfer(args),
        StepArgs::Consolidate(args) => consolidate(args),
        StepArgs::Distribute(args) => distribute(args),
        StepArgs::Mix(args) => mix(args),
        StepArgs::Pause(args) => pause(args),
    }
}
