//! Liquid-moving instructions: aspirate, dispense, touch-tip, blow-out.

use super::{below_minimum_warning, require_labware, require_pipette, require_tip, resolve_wells};
use crate::commands::command::{BlowoutParams, Command, PipettingParams, TouchTipParams};
use crate::commands::creator::{CommandCreator, Emission};
use crate::core::VOLUME_EPSILON;
use crate::errors::{Action, CommandCreatorError};

/// Draw `volume` into every tip from the wells its channels cover.
///
/// Source liquid is split proportionally across ingredients and merged into
/// the tip, so a tip that already holds liquid becomes a mixture.
pub fn aspirate(params: PipettingParams) -> CommandCreator {
    CommandCreator::atomic("aspirate", move |prev| {
        let action = Action::Aspirate;
        let pipette = params.pipette.as_str();
        let labware = params.labware.as_str();
        let volume = params.volume;

        let instrument = require_pipette(prev, action, pipette)?;
        let definition = require_labware(prev, action, labware)?;
        let channels = instrument.channels();
        let wells = resolve_wells(definition, action, labware, &params.well, channels)?;
        require_tip(prev, action, pipette)?;

        let capacity = prev
            .max_aspirate_volume(pipette)
            .unwrap_or(instrument.spec.max_volume);

        let mut next = prev.clone();
        for (tip_index, well) in wells.iter().enumerate() {
            let tip = next
                .liquid_state()
                .tip(pipette, tip_index)
                .cloned()
                .unwrap_or_default();
            let in_tip = tip.total_volume();
            if in_tip + volume > capacity + VOLUME_EPSILON {
                return Err(CommandCreatorError::TipVolumeExceeded {
                    pipette: pipette.to_string(),
                    requested: in_tip + volume,
                    capacity,
                });
            }

            let source = next
                .liquid_state()
                .well(labware, well)
                .cloned()
                .unwrap_or_default();
            let available = source.total_volume();
            if volume > available + VOLUME_EPSILON {
                return Err(CommandCreatorError::NotEnoughLiquid {
                    labware: labware.to_string(),
                    well: well.clone(),
                    requested: volume,
                    available,
                });
            }

            let (remaining, taken) = source.split(volume);
            next = next
                .with_well_contents(labware, well, remaining)
                .with_tip_contents(pipette, tip_index, tip.merge(&taken));
        }

        Ok(Emission::new(Command::Aspirate(params.clone()), next)
            .with_warnings(below_minimum_warning(instrument, pipette, volume)))
    })
}

/// Expel `volume` from every tip into the wells its channels cover.
///
/// The tip keeps a zero-volume trace of each ingredient it held.
pub fn dispense(params: PipettingParams) -> CommandCreator {
    CommandCreator::atomic("dispense", move |prev| {
        let action = Action::Dispense;
        let pipette = params.pipette.as_str();
        let labware = params.labware.as_str();
        let volume = params.volume;

        let instrument = require_pipette(prev, action, pipette)?;
        let definition = require_labware(prev, action, labware)?;
        let channels = instrument.channels();
        let wells = resolve_wells(definition, action, labware, &params.well, channels)?;
        require_tip(prev, action, pipette)?;

        let mut next = prev.clone();
        for (tip_index, well) in wells.iter().enumerate() {
            let tip = next
                .liquid_state()
                .tip(pipette, tip_index)
                .cloned()
                .unwrap_or_default();
            let available = tip.total_volume();
            if volume > available + VOLUME_EPSILON {
                return Err(CommandCreatorError::NotEnoughLiquidInTip {
                    pipette: pipette.to_string(),
                    tip_index,
                    requested: volume,
                    available,
                });
            }

            let (remaining, expelled) = tip.split(volume);
            let destination = next
                .liquid_state()
                .well(labware, well)
                .cloned()
                .unwrap_or_default()
                .merge(&expelled);

            if let Some(capacity) = definition.well_capacity {
                let requested = destination.total_volume();
                if requested > capacity + VOLUME_EPSILON {
                    return Err(CommandCreatorError::WellCapacityExceeded {
                        labware: labware.to_string(),
                        well: well.clone(),
                        requested,
                        capacity,
                    });
                }
            }

            next = next
                .with_well_contents(labware, well, destination)
                .with_tip_contents(pipette, tip_index, remaining);
        }

        Ok(Emission::new(Command::Dispense(params.clone()), next)
            .with_warnings(below_minimum_warning(instrument, pipette, volume)))
    })
}

/// Touch the tip to the well walls. Leaves liquid untouched.
pub fn touch_tip(params: TouchTipParams) -> CommandCreator {
    CommandCreator::atomic("touch_tip", move |prev| {
        let action = Action::TouchTip;
        let instrument = require_pipette(prev, action, &params.pipette)?;
        let definition = require_labware(prev, action, &params.labware)?;
        resolve_wells(definition, action, &params.labware, &params.well, instrument.channels())?;
        require_tip(prev, action, &params.pipette)?;

        Ok(Emission::new(Command::TouchTip(params.clone()), prev.clone()))
    })
}

/// Blow residual liquid out of the tips. Tip volumes drop to zero.
pub fn blowout(params: BlowoutParams) -> CommandCreator {
    CommandCreator::atomic("blowout", move |prev| {
        let action = Action::Blowout;
        let instrument = require_pipette(prev, action, &params.pipette)?;
        let definition = require_labware(prev, action, &params.labware)?;
        resolve_wells(definition, action, &params.labware, &params.well, instrument.channels())?;
        require_tip(prev, action, &params.pipette)?;

        let next = prev.with_tip_contents_drained(&params.pipette);

        Ok(Emission::new(Command::Blowout(params.clone()), next))
    })
}
