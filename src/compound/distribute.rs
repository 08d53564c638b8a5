//! One-to-many distribution with an optional disposal volume.

use super::args::{DistributeArgs, TransferArgs};
use super::common::{
    blowout_at, checked, mix_with, prepare, referenced_labware, tip_change, touch_with,
};
use super::transfer::transfer;
use crate::commands::{
    aspirate, dispense, mix_util, reduce_command_creators, CommandCreator, CommandCreatorResult,
};
use crate::core::VOLUME_EPSILON;
use crate::errors::{Action, CommandCreatorWarning};

/// Split one source well across many destination wells.
///
/// Each trip aspirates enough for as many destinations as fit alongside the
/// disposal volume, dispenses into them in order, then blows the disposal
/// volume out. When not even one dispense fits, every destination gets its
/// own transfer from the source instead.
pub fn distribute(args: DistributeArgs) -> CommandCreator {
    checked("distribute", args, |args| {
        CommandCreator::new("distribute", move |prev| {
            let labware = referenced_labware(
                &[args.source_labware.as_str(), args.dest_labware.as_str()],
                &[
                    args.blowout.as_ref(),
                    args.disposal.as_ref().map(|disposal| &disposal.location),
                ],
            );
            let (instrument, capacity) =
                match prepare(prev, Action::Distribute, &args.pipette, &labware, args.change_tip) {
                    Ok(resolved) => resolved,
                    Err(error) => return CommandCreatorResult::failure(error, prev),
                };
            let min_volume = instrument.spec.min_volume;
            let disposal_volume = args.disposal.as_ref().map_or(0.0, |disposal| disposal.volume);

            let warnings: Vec<CommandCreatorWarning> = (disposal_volume > 0.0
                && disposal_volume < min_volume)
                .then(|| CommandCreatorWarning::BelowMinDisposalVolume {
                    pipette: args.pipette.clone(),
                    disposal_volume,
                    min_volume,
                })
                .into_iter()
                .collect();

            let per_trip = ((capacity - disposal_volume + VOLUME_EPSILON) / args.volume).floor();
            if per_trip < 1.0 {
                tracing::debug!(
                    pipette = %args.pipette,
                    volume = args.volume,
                    disposal_volume,
                    capacity,
                    "distribute volume exceeds capacity, falling back to transfers"
                );
                return transfer(fallback_transfer(&args)).run(prev).with_warnings(warnings);
            }
            let per_trip = per_trip as usize;

            tracing::debug!(
                pipette = %args.pipette,
                destinations = args.dest_wells.len(),
                per_trip,
                disposal_volume,
                "expanding distribute"
            );

            reduce_command_creators(&plan(&args, per_trip, disposal_volume), prev)
                .with_warnings(warnings)
        })
    })
}

fn fallback_transfer(args: &DistributeArgs) -> TransferArgs {
    TransferArgs {
        change_tip: args.change_tip,
        pre_wet_tip: args.pre_wet_tip,
        mix_before_aspirate: args.mix_before_aspirate.clone(),
        touch_tip_after_aspirate: args.touch_tip_after_aspirate.clone(),
        touch_tip_after_dispense: args.touch_tip_after_dispense.clone(),
        blowout: args.blowout.clone(),
        overrides: args.overrides.clone(),
        ..TransferArgs::new(
            args.pipette.clone(),
            args.source_labware.clone(),
            vec![args.source_well.clone(); args.dest_wells.len()],
            args.dest_labware.clone(),
            args.dest_wells.clone(),
            args.volume,
        )
    }
}

fn plan(args: &DistributeArgs, per_trip: usize, disposal_volume: f64) -> Vec<CommandCreator> {
    let pipette = args.pipette.as_str();
    let overrides = &args.overrides;
    let source_at = (args.source_labware.as_str(), args.source_well.as_str());
    let mut creators = Vec::new();

    for (index, dests) in args.dest_wells.chunks(per_trip).enumerate() {
        let aspirate_volume = args.volume * dests.len() as f64 + disposal_volume;

        creators.extend(tip_change(args.change_tip, index == 0, pipette));
        if args.pre_wet_tip && index == 0 {
            creators.extend(mix_util(
                pipette,
                source_at.0,
                source_at.1,
                aspirate_volume,
                1,
                overrides,
            ));
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
            aspirate_volume,
        )));
        creators.extend(touch_with(
            pipette,
            source_at.0,
            source_at.1,
            args.touch_tip_after_aspirate.as_ref(),
        ));

        for dest in dests {
            creators.push(dispense(overrides.dispense_params(
                pipette,
                &args.dest_labware,
                dest,
                args.volume,
            )));
            creators.extend(touch_with(
                pipette,
                &args.dest_labware,
                dest,
                args.touch_tip_after_dispense.as_ref(),
            ));
        }

        let last_dest = dests.last().map_or("", String::as_str);
        let dest_at = (args.dest_labware.as_str(), last_dest);
        let location = match &args.disposal {
            Some(disposal) if disposal_volume > 0.0 => Some(&disposal.location),
            _ => args.blowout.as_ref(),
        };
        creators.extend(blowout_at(pipette, location, source_at, dest_at));
    }

    creators
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::compound::{BlowoutLocation, ChangeTip, DisposalOptions, MixOptions, TouchTipOptions};
    use crate::errors::CommandCreatorError;
    use crate::core::{RobotState, WellName, FIXED_TRASH_ID};
    use crate::test_fixtures::*;

    fn wells(names: &[&str]) -> Vec<WellName> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn filled() -> RobotState {
        with_liquid(robot_state(), SOURCE_PLATE, "A1", "stock", 1500.0)
    }

    fn names(result: &CommandCreatorResult) -> Vec<&'static str> {
        result.commands.iter().map(Command::name).collect()
    }

    fn base(volume: f64) -> DistributeArgs {
        DistributeArgs::new(
            PIPETTE,
            SOURCE_PLATE,
            "A1",
            DEST_PLATE,
            wells(&["A1", "A2", "A3", "A4"]),
            volume,
        )
    }

    #[test]
    fn destinations_share_one_aspirate() {
        let result = distribute(base(50.0)).run(&filled());

        assert!(result.is_success(), "{:?}", result.errors);
        assert_eq!(
            names(&result),
            ["pick-up-tip", "aspirate", "dispense", "dispense", "dispense", "dispense"]
        );
        for well in ["A1", "A2", "A3", "A4"] {
            assert_eq!(result.robot_state.well_volume(DEST_PLATE, well), 50.0);
        }
        assert_eq!(result.robot_state.well_volume(SOURCE_PLATE, "A1"), 1300.0);
    }

    #[test]
    fn disposal_volume_is_aspirated_and_blown_out() {
        let args = DistributeArgs {
            disposal: Some(DisposalOptions {
                volume: 40.0,
                location: BlowoutLocation::Trash,
            }),
            ..base(100.0)
        };

        let result = distribute(args).run(&filled());

        assert!(result.is_success(), "{:?}", result.errors);
        // 300 capacity minus 40 disposal leaves room for two 100 dispenses
        assert_eq!(
            names(&result),
            [
                "pick-up-tip",
                "aspirate",
                "dispense",
                "dispense",
                "blowout",
                "aspirate",
                "dispense",
                "dispense",
                "blowout"
            ]
        );
        match &result.commands[1] {
            Command::Aspirate(params) => assert_eq!(params.volume, 240.0),
            other => panic!("Expected aspirate, got {}", other.name()),
        }
        match &result.commands[4] {
            Command::Blowout(params) => assert_eq!(params.labware, FIXED_TRASH_ID),
            other => panic!("Expected blowout, got {}", other.name()),
        }
        assert_eq!(result.robot_state.tip_volume(PIPETTE, 0), 0.0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn small_disposal_volume_warns() {
        let args = DistributeArgs {
            disposal: Some(DisposalOptions {
                volume: 10.0,
                location: BlowoutLocation::SourceWell,
            }),
            ..base(50.0)
        };

        let result = distribute(args).run(&filled());

        assert!(result.is_success(), "{:?}", result.errors);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind(), "BELOW_MIN_DISPOSAL_VOLUME");
    }

    #[test]
    fn oversized_volume_falls_back_to_transfers() {
        let args = DistributeArgs {
            dest_wells: wells(&["A1", "A2"]),
            change_tip: ChangeTip::Always,
            ..base(350.0)
        };

        let result = distribute(args).run(&filled());

        assert!(result.is_success(), "{:?}", result.errors);
        let aspirated: Vec<f64> = result
            .commands
            .iter()
            .filter_map(|command| match command {
                Command::Aspirate(params) => Some(params.volume),
                _ => None,
            })
            .collect();
        assert_eq!(aspirated, [300.0, 50.0, 300.0, 50.0]);
        assert_eq!(result.robot_state.well_volume(DEST_PLATE, "A2"), 350.0);
    }

    #[test]
    fn advanced_options_follow_fixed_order() {
        let args = DistributeArgs {
            pre_wet_tip: true,
            mix_before_aspirate: Some(MixOptions {
                volume: 20.0,
                times: 1,
            }),
            touch_tip_after_aspirate: Some(TouchTipOptions::default()),
            touch_tip_after_dispense: Some(TouchTipOptions::default()),
            ..base(50.0)
        };

        let result = distribute(args).run(&filled());

        assert!(result.is_success(), "{:?}", result.errors);
        assert_eq!(
            names(&result),
            [
                "pick-up-tip",
                "aspirate",
                "dispense",
                "aspirate",
                "dispense",
                "aspirate",
                "touch-tip",
                "dispense",
                "touch-tip",
                "dispense",
                "touch-tip",
                "dispense",
                "touch-tip",
                "dispense",
                "touch-tip"
            ]
        );
        // pre-wet uses the full trip volume
        match (&result.commands[1], &result.commands[5]) {
            (Command::Aspirate(pre_wet), Command::Aspirate(trip)) => {
                assert_eq!(pre_wet.volume, 200.0);
                assert_eq!(trip.volume, 200.0);
            }
            _ => panic!("Expected pre-wet then trip aspirate"),
        }
        assert_eq!(result.robot_state.well_volume(SOURCE_PLATE, "A1"), 1300.0);
    }

    #[test]
    fn unknown_labware_aborts_before_any_tip_is_used() {
        let state = filled();
        let to_nowhere = DistributeArgs {
            dest_labware: "noSuchDest".to_string(),
            ..base(50.0)
        };
        let dispose_nowhere = DistributeArgs {
            disposal: Some(DisposalOptions {
                volume: 40.0,
                location: BlowoutLocation::Well {
                    labware: "noSuchWaste".to_string(),
                    well: "A1".to_string(),
                },
            }),
            ..base(50.0)
        };
        let cases = [(to_nowhere, "noSuchDest"), (dispose_nowhere, "noSuchWaste")];

        for (args, missing) in cases {
            let result = distribute(args).run(&state);

            assert!(result.commands.is_empty());
            assert_eq!(
                result.errors,
                vec![CommandCreatorError::LabwareDoesNotExist {
                    action: Action::Distribute,
                    labware: missing.to_string(),
                }]
            );
            assert_eq!(result.robot_state, state);
        }
    }

    #[test]
    fn never_policy_without_tip_fails() {
        let args = DistributeArgs {
            change_tip: ChangeTip::Never,
            ..base(50.0)
        };
        let state = filled();

        let result = distribute(args).run(&state);

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind(), "NO_TIP_ON_PIPETTE");
        assert_eq!(result.robot_state, state);
    }
}
