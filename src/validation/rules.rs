//! Argument rules for each step kind, using Validation.

use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

use crate::commands::Wait;
use crate::compound::{
    ConsolidateArgs, DistributeArgs, MixArgs, MixOptions, PauseArgs, StepArgs, TransferArgs,
};
use crate::validation::violations::ArgumentViolation;

/// Outcome of checking one rule or a whole argument record.
pub type ArgumentCheck = Validation<(), NonEmptyVec<ArgumentViolation>>;

/// Step arguments that can be checked for structural consistency.
///
/// Every rule is evaluated; the failure lists ALL violations, not just the
/// first one found.
pub trait ValidateArgs {
    fn validate(&self) -> ArgumentCheck;
}

fn check(ok: bool, violation: impl FnOnce() -> ArgumentViolation) -> ArgumentCheck {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

fn non_empty<T>(field: &'static str, wells: &[T]) -> ArgumentCheck {
    check(!wells.is_empty(), || ArgumentViolation::EmptyWells { field })
}

fn positive_volume(field: &'static str, value: f64) -> ArgumentCheck {
    check(value.is_finite() && value > 0.0, || {
        ArgumentViolation::NonPositiveVolume { field, value }
    })
}

fn non_negative(field: &'static str, value: f64) -> ArgumentCheck {
    check(value.is_finite() && value >= 0.0, || {
        ArgumentViolation::NegativeValue { field, value }
    })
}

/// Most aspirate/dispense cycles a single mix may run.
const MAX_REPETITIONS: u32 = 1_000;

fn repetitions(field: &'static str, times: u32) -> ArgumentCheck {
    check((1..=MAX_REPETITIONS).contains(&times), || {
        if times == 0 {
            ArgumentViolation::ZeroRepetitions { field }
        } else {
            ArgumentViolation::TooManyRepetitions {
                field,
                times,
                limit: MAX_REPETITIONS,
            }
        }
    })
}

fn mix_options(field: &'static str, mix: Option<&MixOptions>, checks: &mut Vec<ArgumentCheck>) {
    if let Some(mix) = mix {
        checks.push(positive_volume(field, mix.volume));
        checks.push(repetitions(field, mix.times));
    }
}

fn all(checks: Vec<ArgumentCheck>) -> ArgumentCheck {
    Validation::all_vec(checks).map(|_| ())
}

impl ValidateArgs for TransferArgs {
    fn validate(&self) -> ArgumentCheck {
        let mut checks = vec![
            non_empty("sourceWells", &self.source_wells),
            non_empty("destWells", &self.dest_wells),
            check(self.source_wells.len() == self.dest_wells.len(), || {
                ArgumentViolation::MismatchedWellCounts {
                    sources: self.source_wells.len(),
                    destinations: self.dest_wells.len(),
                }
            }),
            positive_volume("volume", self.volume),
        ];
        mix_options("mixBeforeAspirate", self.mix_before_aspirate.as_ref(), &mut checks);
        mix_options("mixInDestination", self.mix_in_destination.as_ref(), &mut checks);
        all(checks)
    }
}

impl ValidateArgs for ConsolidateArgs {
    fn validate(&self) -> ArgumentCheck {
        let mut checks = vec![
            non_empty("sourceWells", &self.source_wells),
            positive_volume("volume", self.volume),
        ];
        mix_options("mixFirstAspirate", self.mix_first_aspirate.as_ref(), &mut checks);
        mix_options("mixInDestination", self.mix_in_destination.as_ref(), &mut checks);
        all(checks)
    }
}

impl ValidateArgs for DistributeArgs {
    fn validate(&self) -> ArgumentCheck {
        let mut checks = vec![
            non_empty("destWells", &self.dest_wells),
            positive_volume("volume", self.volume),
        ];
        if let Some(disposal) = &self.disposal {
            checks.push(non_negative("disposalVolume", disposal.volume));
        }
        mix_options("mixBeforeAspirate", self.mix_before_aspirate.as_ref(), &mut checks);
        all(checks)
    }
}

impl ValidateArgs for MixArgs {
    fn validate(&self) -> ArgumentCheck {
        all(vec![
            non_empty("wells", &self.wells),
            positive_volume("volume", self.volume),
            repetitions("times", self.times),
        ])
    }
}

impl ValidateArgs for PauseArgs {
    fn validate(&self) -> ArgumentCheck {
        match self.wait {
            Wait::UntilResume => Validation::success(()),
            Wait::Seconds(seconds) => non_negative("wait", seconds),
        }
    }
}

impl ValidateArgs for StepArgs {
    fn validate(&self) -> ArgumentCheck {
        match self {
            StepArgs::Transfer(args) => args.validate(),
            StepArgs::Consolidate(args) => args.validate(),
            StepArgs::Distribute(args) => args.validate(),
            StepArgs::Mix(args) => args.validate(),
            StepArgs::Pause(args) => args.validate(),
        }
    }
}
