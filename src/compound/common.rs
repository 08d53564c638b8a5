//! Pieces shared by the compound creators.

use stillwater::validation::Validation;

use super::args::{BlowoutLocation, ChangeTip, MixOptions, TouchTipOptions};
use super::chunking::MAX_CHUNKS;
use super::replace_tip::replace_tip;
use crate::commands::{
    blowout, mix_util, touch_tip, BlowoutParams, CommandCreator, CommandCreatorResult,
    PipettingOverrides, TouchTipParams,
};
use crate::core::{PipetteInstrument, RobotState};
use crate::errors::{Action, CommandCreatorError};
use crate::validation::ValidateArgs;

/// Build the creator only when `args` pass validation.
///
/// Invalid arguments yield a creator that reports one
/// `INVALID_STEP_ARGUMENTS` error per violation and emits nothing.
pub(crate) fn checked<A, F>(step: &'static str, args: A, build: F) -> CommandCreator
where
    A: ValidateArgs,
    F: FnOnce(A) -> CommandCreator,
{
    match args.validate() {
        Validation::Success(_) => build(args),
        Validation::Failure(violations) => {
            tracing::debug!(step, violations = violations.len(), "rejected step arguments");
            let errors: Vec<CommandCreatorError> = violations
                .iter()
                .map(|violation| CommandCreatorError::InvalidStepArguments {
                    step: step.to_string(),
                    reason: violation.to_string(),
                })
                .collect();
            CommandCreator::new(step, move |prev| CommandCreatorResult {
                commands: Vec::new(),
                robot_state: prev.clone(),
                errors: errors.clone(),
                warnings: Vec::new(),
            })
        }
    }
}

/// Resolve every reference a step makes and enforce the `never` tip policy
/// before anything is planned.
///
/// Returns the instrument and its working capacity.
pub(crate) fn prepare<'a>(
    state: &'a RobotState,
    action: Action,
    pipette: &str,
    labware: &[&str],
    change_tip: ChangeTip,
) -> Result<(&'a PipetteInstrument, f64), CommandCreatorError> {
    let missing = || CommandCreatorError::PipetteDoesNotExist {
        action,
        pipette: pipette.to_string(),
    };
    let instrument = state.pipette(pipette).ok_or_else(missing)?;
    let capacity = state.max_aspirate_volume(pipette).ok_or_else(missing)?;

    if let Some(unknown) = labware.iter().find(|id| state.labware(id).is_none()) {
        return Err(CommandCreatorError::LabwareDoesNotExist {
            action,
            labware: unknown.to_string(),
        });
    }

    if change_tip == ChangeTip::Never && !state.has_tip(pipette) {
        return Err(CommandCreatorError::NoTipOnPipette {
            action,
            pipette: pipette.to_string(),
        });
    }

    Ok((instrument, capacity))
}

/// Labware ids a step names, including explicit blow-out wells.
pub(crate) fn referenced_labware<'a>(
    labware: &[&'a str],
    locations: &[Option<&'a BlowoutLocation>],
) -> Vec<&'a str> {
    labware
        .iter()
        .copied()
        .chain(
            locations
                .iter()
                .copied()
                .flatten()
                .filter_map(BlowoutLocation::labware),
        )
        .collect()
}

/// Reject a volume that would take more than [`MAX_CHUNKS`] aspirations.
pub(crate) fn within_chunk_limit(
    step: &str,
    volume: f64,
    capacity: f64,
) -> Result<(), CommandCreatorError> {
    let needed = (volume / capacity).ceil();
    if needed <= MAX_CHUNKS as f64 {
        return Ok(());
    }

    Err(CommandCreatorError::InvalidStepArguments {
        step: step.to_string(),
        reason: format!(
            "volume {volume} uL needs more than {MAX_CHUNKS} aspirations of {capacity} uL"
        ),
    })
}

/// Tip change owed before an aspirate cycle.
pub(crate) fn tip_change(
    policy: ChangeTip,
    first_cycle: bool,
    pipette: &str,
) -> Option<CommandCreator> {
    match policy {
        ChangeTip::Always => Some(replace_tip(pipette)),
        ChangeTip::Once if first_cycle => Some(replace_tip(pipette)),
        ChangeTip::Once | ChangeTip::Never => None,
    }
}

pub(crate) fn mix_with(
    pipette: &str,
    labware: &str,
    well: &str,
    mix: Option<&MixOptions>,
    overrides: &PipettingOverrides,
) -> Vec<CommandCreator> {
    mix.map(|mix| mix_util(pipette, labware, well, mix.volume, mix.times, overrides))
        .unwrap_or_default()
}

pub(crate) fn touch_with(
    pipette: &str,
    labware: &str,
    well: &str,
    touch: Option<&TouchTipOptions>,
) -> Option<CommandCreator> {
    touch.map(|touch| {
        touch_tip(TouchTipParams {
            pipette: pipette.to_string(),
            labware: labware.to_string(),
            well: well.to_string(),
            offset_from_bottom_mm: touch.offset_from_bottom_mm,
        })
    })
}

pub(crate) fn blowout_at(
    pipette: &str,
    location: Option<&BlowoutLocation>,
    source: (&str, &str),
    dest: (&str, &str),
) -> Option<CommandCreator> {
    location.map(|location| {
        let (labware, well) = location.resolve(source, dest);
        blowout(BlowoutParams {
            pipette: pipette.to_string(),
            labware,
            well,
            flow_rate_ul_sec: None,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compound::MixArgs;
    use crate::test_fixtures::*;

    #[test]
    fn invalid_arguments_report_every_violation() {
        let args = MixArgs::new(PIPETTE, SOURCE_PLATE, Vec::new(), 0.0, 0);
        let state = robot_state();

        let result = checked("mix", args, |_| unreachable!("invalid args never build")).run(&state);

        assert!(result.commands.is_empty());
        assert_eq!(result.errors.len(), 3);
        assert!(result
            .errors
            .iter()
            .all(|error| error.kind() == "INVALID_STEP_ARGUMENTS"));
        assert_eq!(result.robot_state, state);
    }

    #[test]
    fn never_policy_requires_mounted_tip() {
        let state = robot_state();

        let error = prepare(&state, Action::Transfer, PIPETTE, &[], ChangeTip::Never).unwrap_err();

        assert_eq!(error.kind(), "NO_TIP_ON_PIPETTE");
    }

    #[test]
    fn capacity_is_limited_by_tip_volume() {
        let state = robot_state();

        let (_, capacity) =
            prepare(&state, Action::Transfer, PIPETTE, &[SOURCE_PLATE], ChangeTip::Once).unwrap();

        assert_eq!(capacity, 300.0);
    }

    #[test]
    fn unknown_labware_is_reported_before_tip_policy() {
        let state = robot_state();

        let error = prepare(
            &state,
            Action::Distribute,
            PIPETTE,
            &[SOURCE_PLATE, "noSuchPlate"],
            ChangeTip::Never,
        )
        .unwrap_err();

        assert_eq!(error.kind(), "LABWARE_DOES_NOT_EXIST");
        assert_eq!(
            error.to_string(),
            "Attempted to distribute with labware 'noSuchPlate' that does not exist"
        );
    }

    #[test]
    fn chunk_limit_rejects_huge_volumes() {
        assert!(within_chunk_limit("transfer", 3000.0, 300.0).is_ok());
        assert!(within_chunk_limit("transfer", 300.0 * MAX_CHUNKS as f64, 300.0).is_ok());

        let error = within_chunk_limit("transfer", 1e20, 300.0).unwrap_err();
        assert_eq!(error.kind(), "INVALID_STEP_ARGUMENTS");
        assert!(within_chunk_limit("transfer", 10.0, 0.0).is_err());
    }

    #[test]
    fn once_policy_changes_only_on_first_cycle() {
        assert!(tip_change(ChangeTip::Once, true, PIPETTE).is_some());
        assert!(tip_change(ChangeTip::Once, false, PIPETTE).is_none());
        assert!(tip_change(ChangeTip::Always, false, PIPETTE).is_some());
        assert!(tip_change(ChangeTip::Never, true, PIPETTE).is_none());
    }
}
