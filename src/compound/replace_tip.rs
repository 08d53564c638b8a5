//! Tip replacement.

use crate::commands::{
    drop_tip, pick_up_tip, reduce_command_creators, CommandCreator, CommandCreatorResult, TipParams,
};
use crate::core::PipetteId;
use crate::errors::{Action, CommandCreatorError};

/// Drop the current tip (if any) and pick up the next available one.
pub fn replace_tip(pipette: impl Into<PipetteId>) -> CommandCreator {
    let pipette = pipette.into();

    CommandCreator::new("replace_tip", move |prev| {
        if prev.pipette(&pipette).is_none() {
            return CommandCreatorResult::failure(
                CommandCreatorError::PipetteDoesNotExist {
                    action: Action::ReplaceTip,
                    pipette: pipette.clone(),
                },
                prev,
            );
        }

        let Some((tiprack, well)) = prev.next_tip(&pipette) else {
            return CommandCreatorResult::failure(
                CommandCreatorError::InsufficientTips {
                    pipette: pipette.clone(),
                },
                prev,
            );
        };

        let mut creators = Vec::with_capacity(2);
        if prev.has_tip(&pipette) {
            creators.push(drop_tip(pipette.clone()));
        }
        creators.push(pick_up_tip(TipParams::new(pipette.clone(), tiprack, well)));

        reduce_command_creators(&creators, prev)
    })
}
