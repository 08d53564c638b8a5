//! Command creators: pure functions from a robot state to instructions.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::command::Command;
use crate::core::RobotState;
use crate::errors::{CommandCreatorError, CommandCreatorWarning};

/// Outcome of running a command creator against a snapshot.
///
/// On success `errors` is empty and `robot_state` is the successor snapshot.
/// On failure `commands` and `robot_state` hold whatever was produced before
/// the failing instruction.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandCreatorResult {
    pub commands: Vec<Command>,
    pub robot_state: RobotState,
    pub errors: Vec<CommandCreatorError>,
    pub warnings: Vec<CommandCreatorWarning>,
}

impl CommandCreatorResult {
    pub fn success(commands: Vec<Command>, robot_state: RobotState) -> Self {
        Self {
            commands,
            robot_state,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// A failure carrying no instructions and the unchanged snapshot.
    pub fn failure(error: CommandCreatorError, prev: &RobotState) -> Self {
        Self {
            commands: Vec::new(),
            robot_state: prev.clone(),
            errors: vec![error],
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<CommandCreatorWarning>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_failure(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Output of an atomic creator that passed its preconditions.
pub(crate) struct Emission {
    pub command: Command,
    pub robot_state: RobotState,
    pub warnings: Vec<CommandCreatorWarning>,
}

impl Emission {
    pub fn new(command: Command, robot_state: RobotState) -> Self {
        Self {
            command,
            robot_state,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(
        mut self,
        warnings: impl IntoIterator<Item = CommandCreatorWarning>,
    ) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

type CreatorFn = dyn Fn(&RobotState) -> CommandCreatorResult + Send + Sync;

/// A pure function `RobotState -> CommandCreatorResult`.
///
/// Running a creator never changes the snapshot it is given, so creators can
/// be invoked speculatively and any number of times.
///
/// # Example
///
/// ```rust
/// use stepgen::commands::{CommandCreator, CommandCreatorResult};
/// use stepgen::core::RobotState;
///
/// let noop = CommandCreator::new("noop", |state: &RobotState| {
///     CommandCreatorResult::success(Vec::new(), state.clone())
/// });
///
/// let result = noop.run(&RobotState::default());
/// assert!(result.is_success());
/// assert!(result.commands.is_empty());
/// ```
#[derive(Clone)]
pub struct CommandCreator {
    name: &'static str,
    run: Arc<CreatorFn>,
}

impl CommandCreator {
    pub fn new<F>(name: &'static str, creator: F) -> Self
    where
        F: Fn(&RobotState) -> CommandCreatorResult + Send + Sync + 'static,
    {
        Self {
            name,
            run: Arc::new(creator),
        }
    }

    /// Wrap a creator that emits exactly one instruction or one error.
    pub(crate) fn atomic<F>(name: &'static str, creator: F) -> Self
    where
        F: Fn(&RobotState) -> Result<Emission, CommandCreatorError> + Send + Sync + 'static,
    {
        Self::new(name, move |prev| match creator(prev) {
            Ok(emission) => {
                CommandCreatorResult::success(vec![emission.command], emission.robot_state)
                    .with_warnings(emission.warnings)
            }
            Err(error) => CommandCreatorResult::failure(error, prev),
        })
    }

    /// A creator that always fails with `error` and emits nothing.
    pub fn fail(name: &'static str, error: CommandCreatorError) -> Self {
        Self::new(name, move |prev| CommandCreatorResult::failure(error.clone(), prev))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn run(&self, state: &RobotState) -> CommandCreatorResult {
        (self.run)(state)
    }
}

impl fmt::Debug for CommandCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandCreator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
