//! Instructions, command creators and the reducer.
//!
//! A [`CommandCreator`] is a pure function from a [`RobotState`] to a
//! [`CommandCreatorResult`]. Atomic creators emit a single instruction;
//! [`reduce_command_creators`] folds a list of creators into one result,
//! stopping at the first error.
//!
//! [`RobotState`]: crate::core::RobotState

pub mod atomic;
mod command;
mod creator;
mod reduce;

pub use atomic::{aspirate, blowout, dispense, drop_tip, mix_util, pick_up_tip, touch_tip};
pub use command::{
    BlowoutParams, Command, DelayParams, PipettingOverrides, PipettingParams, TipParams,
    TouchTipParams, Wait,
};
pub use creator::{CommandCreator, CommandCreatorResult};
pub use reduce::{reduce_command_creators, sequence};
