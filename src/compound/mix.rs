//! In-place mixing across wells.

use super::args::MixArgs;
use super::common::{blowout_at, checked, prepare, referenced_labware, tip_change, touch_with};
use crate::commands::{mix_util, reduce_command_creators, CommandCreator, CommandCreatorResult};
use crate::errors::Action;

/// Mix in place at each listed well, one well after another.
///
/// Per well: tip change, `times` aspirate/dispense cycles, then the optional
/// blow-out and touch-tip.
pub fn mix(args: MixArgs) -> CommandCreator {
    checked("mix", args, |args| {
        CommandCreator::new("mix", move |prev| {
            let labware = referenced_labware(&[args.labware.as_str()], &[args.blowout.as_ref()]);
            let resolved = prepare(prev, Action::Mix, &args.pipette, &labware, args.change_tip);
            if let Err(error) = resolved {
                return CommandCreatorResult::failure(error, prev);
            }

            tracing::debug!(
                pipette = %args.pipette,
                wells = args.wells.len(),
                times = args.times,
                "expanding mix"
            );

            let pipette = args.pipette.as_str();
            let labware = args.labware.as_str();
            let mut creators = Vec::new();

            for (index, well) in args.wells.iter().enumerate() {
                let here = (labware, well.as_str());

                creators.extend(tip_change(args.change_tip, index == 0, pipette));
                creators.extend(mix_util(
                    pipette,
                    labware,
                    well,
                    args.volume,
                    args.times,
                    &args.overrides,
                ));
                creators.extend(blowout_at(pipette, args.blowout.as_ref(), here, here));
                creators.extend(touch_with(pipette, labware, well, args.touch_tip.as_ref()));
            }

            reduce_command_creators(&creators, prev)
        })
    })
}
