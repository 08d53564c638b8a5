//! Paired well-to-well transfers.

use super::args::TransferArgs;
use super::chunking::split_volume;
use super::common::{
    blowout_at, checked, mix_with, prepare, referenced_labware, tip_change, touch_with,
    within_chunk_limit,
};
use crate::commands::{
    aspirate, dispense, mix_util, reduce_command_creators, CommandCreator, CommandCreatorResult,
};
use crate::errors::Action;

/// Move liquid from each source well to its paired destination well.
///
/// The volume is split into chunks that fit the pipette's working capacity.
/// Per chunk the order is: tip change, pre-wet (first chunk of a pair),
/// mix before aspirate, aspirate, touch tip, dispense, touch tip, mix in
/// destination, blow-out. An unknown pipette or labware, a volume past the
/// chunk limit, or the `never` policy with an empty pipette aborts before
/// anything is emitted.
pub fn transfer(args: TransferArgs) -> CommandCreator {
    checked("transfer", args, |args| {
        CommandCreator::new("transfer", move |prev| {
            let labware = referenced_labware(
                &[args.source_labware.as_str(), args.dest_labware.as_str()],
                &[args.blowout.as_ref()],
            );
            let resolved = prepare(prev, Action::Transfer, &args.pipette, &labware, args.change_tip)
                .and_then(|(instrument, capacity)| {
                    within_chunk_limit("transfer", args.volume, capacity)?;
                    Ok((instrument, capacity))
                });
            let (instrument, capacity) = match resolved {
                Ok(resolved) => resolved,
                Err(error) => return CommandCreatorResult::failure(error, prev),
            };
            let chunks = split_volume(args.volume, capacity, instrument.spec.min_volume);

            tracing::debug!(
                pipette = %args.pipette,
                pairs = args.source_wells.len(),
                chunks = chunks.len(),
                capacity,
                "expanding transfer"
            );

            reduce_command_creators(&plan(&args, &chunks), prev)
        })
    })
}

fn plan(args: &TransferArgs, chunks: &[f64]) -> Vec<CommandCreator> {
    let pipette = args.pipette.as_str();
    let overrides = &args.overrides;
    let mut creators = Vec::new();
    let mut first_cycle = true;

    for (source, dest) in args.source_wells.iter().zip(&args.dest_wells) {
        let source_at = (args.source_labware.as_str(), source.as_str());
        let dest_at = (args.dest_labware.as_str(), dest.as_str());

        for (index, &chunk) in chunks.iter().enumerate() {
            creators.extend(tip_change(args.change_tip, first_cycle, pipette));
            first_cycle = false;

            if args.pre_wet_tip && index == 0 {
                creators.extend(mix_util(pipette, source_at.0, source_at.1, chunk, 1, overrides));
            }
            creators.extend(mix_with(
                pipette,
                source_at.0,
                source_at.1,
                args.mix_before_aspirate.as_ref(),
                overrides,
            ));

            creators.push(aspirate(overrides.aspirate_params(
                pipette,
                source_at.0,
                source_at.1,
                chunk,
            )));
            creators.extend(touch_with(
                pipette,
                source_at.0,
                source_at.1,
                args.touch_tip_after_aspirate.as_ref(),
            ));

            creators.push(dispense(overrides.dispense_params(
                pipette,
                dest_at.0,
                dest_at.1,
                chunk,
            )));
            creators.extend(touch_with(
                pipette,
                dest_at.0,
                dest_at.1,
                args.touch_tip_after_dispense.as_ref(),
            ));

            creators.extend(mix_with(
                pipette,
                dest_at.0,
                dest_at.1,
                args.mix_in_destination.as_ref(),
                overrides,
            ));
            creators.extend(blowout_at(pipette, args.blowout.as_ref(), source_at, dest_at));
        }
    }

    creators
}
