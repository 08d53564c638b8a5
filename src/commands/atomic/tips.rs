//! Tip pick-up and drop.

use super::{require_labware, require_pipette, resolve_wells};
use crate::commands::command::{Command, TipParams};
use crate::commands::creator::{CommandCreator, Emission};
use crate::core::{PipetteId, FIXED_TRASH_ID, TRASH_WELL};
use crate::errors::{Action, CommandCreatorError};

/// Pick up tips from a rack position.
///
/// Requires an empty pipette and a tip at every position its channels cover.
pub fn pick_up_tip(params: TipParams) -> CommandCreator {
    CommandCreator::atomic("pick_up_tip", move |prev| {
        let action = Action::PickUpTip;
        let instrument = require_pipette(prev, action, &params.pipette)?;
        let rack = require_labware(prev, action, &params.labware)?;
        let channels = instrument.channels();
        let wells = resolve_wells(rack, action, &params.labware, &params.well, channels)?;

        if prev.has_tip(&params.pipette) {
            return Err(CommandCreatorError::PipetteAlreadyHasTip {
                pipette: params.pipette.clone(),
            });
        }

        let missing = wells
            .iter()
            .find(|well| {
                !rack.is_tiprack() || !prev.tip_state().tip_present(&params.labware, well)
            });
        if let Some(well) = missing {
            return Err(CommandCreatorError::TipNotAvailable {
                labware: params.labware.clone(),
                well: well.clone(),
            });
        }

        let next = prev
            .with_tips_taken(&params.labware, &wells)
            .with_tip_mounted(&params.pipette, true)
            .with_fresh_tips(&params.pipette, channels);

        Ok(Emission::new(Command::PickUpTip(params.clone()), next))
    })
}

/// Drop the pipette's tips into the fixed trash, discarding their contents.
pub fn drop_tip(pipette: impl Into<PipetteId>) -> CommandCreator {
    let params = TipParams::new(pipette, FIXED_TRASH_ID, TRASH_WELL);

    CommandCreator::atomic("drop_tip", move |prev| {
        let action = Action::DropTip;
        require_pipette(prev, action, &params.pipette)?;
        require_labware(prev, action, &params.labware)?;

        if !prev.has_tip(&params.pipette) {
            return Err(CommandCreatorError::NoTipOnPipette {
                action,
                pipette: params.pipette.clone(),
            });
        }

        let next = prev
            .with_tip_mounted(&params.pipette, false)
            .with_tip_contents_removed(&params.pipette);

        Ok(Emission::new(Command::DropTip(params.clone()), next))
    })
}
