//! Pauses between steps.

use super::args::PauseArgs;
use super::common::checked;
use crate::commands::{Command, CommandCreator, CommandCreatorResult, DelayParams};

/// A single delay instruction. The robot state passes through untouched.
pub fn pause(args: PauseArgs) -> CommandCreator {
    checked("pause", args, |args| {
        let delay = Command::Delay(DelayParams {
            message: args.message,
            wait: args.wait,
        });
        CommandCreator::new("pause", move |prev| {
            CommandCreatorResult::success(vec![delay.clone()], prev.clone())
        })
    })
}
