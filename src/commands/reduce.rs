//! Short-circuiting fold of command creators over a robot state.

use super::creator::{CommandCreator, CommandCreatorResult};
use crate::core::RobotState;

/// Run `creators` in order, each against the state left by the previous one.
///
/// Stops at the first creator that reports an error. Instructions and state
/// produced before the failure are kept; later creators never run.
pub fn reduce_command_creators(
    creators: &[CommandCreator],
    initial: &RobotState,
) -> CommandCreatorResult {
    let mut result = CommandCreatorResult::success(Vec::new(), initial.clone());

    for (index, creator) in creators.iter().enumerate() {
        let next = creator.run(&result.robot_state);

        result.commands.extend(next.commands);
        result.warnings.extend(next.warnings);
        result.robot_state = next.robot_state;

        if !next.errors.is_empty() {
            tracing::debug!(
                creator = creator.name(),
                index,
                remaining = creators.len() - index - 1,
                "command creator failed, halting reduction"
            );
            result.errors = next.errors;
            return result;
        }
    }

    result
}

/// Compose `creators` into a single creator that reduces them in order.
pub fn sequence(name: &'static str, creators: Vec<CommandCreator>) -> CommandCreator {
    CommandCreator::new(name, move |state| reduce_command_creators(&creators, state))
}
