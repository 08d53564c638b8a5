//! Many-to-one pooling.

use super::args::ConsolidateArgs;
use super::chunking::split_volume;
use super::common::{
    blowout_at, checked, mix_with, prepare, referenced_labware, tip_change, touch_with,
    within_chunk_limit,
};
use crate::commands::{
    aspirate, dispense, mix_util, reduce_command_creators, CommandCreator, CommandCreatorResult,
};
use crate::core::{WellName, VOLUME_EPSILON};
use crate::errors::Action;

/// Wells aspirated in one trip before a single dispense.
type AspirationGroup = Vec<(WellName, f64)>;

/// Pool liquid from many source wells into one destination well.
///
/// Sources are gathered into as few trips as the working capacity allows.
/// When a single source volume exceeds capacity, each source is instead
/// chunked on its own, exactly like a transfer.
pub fn consolidate(args: ConsolidateArgs) -> CommandCreator {
    checked("consolidate", args, |args| {
        CommandCreator::new("consolidate", move |prev| {
            let labware = referenced_labware(
                &[args.source_labware.as_str(), args.dest_labware.as_str()],
                &[args.blowout.as_ref()],
            );
            let resolved =
                prepare(prev, Action::Consolidate, &args.pipette, &labware, args.change_tip)
                    .and_then(|(instrument, capacity)| {
                        within_chunk_limit("consolidate", args.volume, capacity)?;
                        Ok((instrument, capacity))
                    });
            let (instrument, capacity) = match resolved {
                Ok(resolved) => resolved,
                Err(error) => return CommandCreatorResult::failure(error, prev),
            };
            let groups = aspiration_groups(&args, capacity, instrument.spec.min_volume);

            tracing::debug!(
                pipette = %args.pipette,
                sources = args.source_wells.len(),
                trips = groups.len(),
                capacity,
                "expanding consolidate"
            );

            reduce_command_creators(&plan(&args, &groups), prev)
        })
    })
}

fn aspiration_groups(
    args: &ConsolidateArgs,
    capacity: f64,
    min_volume: f64,
) -> Vec<AspirationGroup> {
    if args.volume <= capacity + VOLUME_EPSILON {
        let per_trip = (((capacity + VOLUME_EPSILON) / args.volume).floor() as usize).max(1);
        args.source_wells
            .chunks(per_trip)
            .map(|wells| wells.iter().map(|well| (well.clone(), args.volume)).collect())
            .collect()
    } else {
        let chunks = split_volume(args.volume, capacity, min_volume);
        args.source_wells
            .iter()
            .flat_map(|well| chunks.iter().map(move |&chunk| vec![(well.clone(), chunk)]))
            .collect()
    }
}

fn plan(args: &ConsolidateArgs, groups: &[AspirationGroup]) -> Vec<CommandCreator> {
    let pipette = args.pipette.as_str();
    let overrides = &args.overrides;
    let source_labware = args.source_labware.as_str();
    let dest_at = (args.dest_labware.as_str(), args.dest_well.as_str());
    let mut creators = Vec::new();

    for (index, group) in groups.iter().enumerate() {
        let Some((first_well, first_volume)) = group.first() else {
            continue;
        };
        let first_cycle = index == 0;

        let changed = tip_change(args.change_tip, first_cycle, pipette);
        let fresh_tip = changed.is_some() || first_cycle;
        creators.extend(changed);

        if args.pre_wet_tip && fresh_tip {
            creators.extend(mix_util(
                pipette,
                source_labware,
                first_well,
                *first_volume,
                1,
                overrides,
            ));
        }
        creators.extend(mix_with(
            pipette,
            source_labware,
            first_well,
            args.mix_first_aspirate.as_ref(),
            overrides,
        ));

        for (well, volume) in group {
            creators.push(aspirate(overrides.aspirate_params(
                pipette,
                source_labware,
                well,
                *volume,
            )));
            creators.extend(touch_with(
                pipette,
                source_labware,
                well,
                args.touch_tip_after_aspirate.as_ref(),
            ));
        }

        let total: f64 = group.iter().map(|(_, volume)| volume).sum();
        creators.push(dispense(overrides.dispense_params(pipette, dest_at.0, dest_at.1, total)));
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

        let last_source = group
            .last()
            .map_or(first_well.as_str(), |(well, _)| well.as_str());
        creators.extend(blowout_at(
            pipette,
            args.blowout.as_ref(),
            (source_labware, last_source),
            dest_at,
        ));
    }

    creators
}
