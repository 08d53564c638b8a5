//! Immutable robot state snapshot.
//!
//! A `RobotState` records which pipettes hold tips, which tips remain in each
//! rack, and the liquid held by every well and every tip. Queries are pure.
//! Changes go through `with_*` methods that return a successor snapshot and
//! leave the receiver untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::composition::Composition;
use super::labware::LabwareDefinition;
use super::pipette::PipetteInstrument;
use super::{LabwareId, PipetteId, WellName};

/// Tip occupancy: tips left in racks and tips mounted on pipettes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipState {
    pub(crate) tipracks: BTreeMap<LabwareId, BTreeMap<WellName, bool>>,
    pub(crate) pipettes: BTreeMap<PipetteId, bool>,
}

impl TipState {
    /// Whether a tip sits at this rack position.
    pub fn tip_present(&self, tiprack: &str, well: &str) -> bool {
        self.tipracks
            .get(tiprack)
            .and_then(|wells| wells.get(well))
            .copied()
            .unwrap_or(false)
    }

    pub fn has_tip(&self, pipette: &str) -> bool {
        self.pipettes.get(pipette).copied().unwrap_or(false)
    }

    /// Number of tips still present in a rack.
    pub fn tips_remaining(&self, tiprack: &str) -> usize {
        self.tipracks
            .get(tiprack)
            .map(|wells| wells.values().filter(|present| **present).count())
            .unwrap_or(0)
    }
}

/// Liquid held by wells and by pipette tips.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidState {
    pub(crate) labware: BTreeMap<LabwareId, BTreeMap<WellName, Composition>>,
    pub(crate) pipettes: BTreeMap<PipetteId, BTreeMap<usize, Composition>>,
}

impl LiquidState {
    pub fn well(&self, labware: &str, well: &str) -> Option<&Composition> {
        self.labware.get(labware).and_then(|wells| wells.get(well))
    }

    pub fn tip(&self, pipette: &str, tip_index: usize) -> Option<&Composition> {
        self.pipettes
            .get(pipette)
            .and_then(|tips| tips.get(&tip_index))
    }
}

/// Snapshot of the robot threaded through every command creator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotState {
    pub(crate) instruments: BTreeMap<PipetteId, PipetteInstrument>,
    pub(crate) labware: BTreeMap<LabwareId, LabwareDefinition>,
    pub(crate) tip_state: TipState,
    pub(crate) liquid_state: LiquidState,
}

impl RobotState {
    pub fn tip_state(&self) -> &TipState {
        &self.tip_state
    }

    pub fn liquid_state(&self) -> &LiquidState {
        &self.liquid_state
    }

    pub fn pipette(&self, pipette: &str) -> Option<&PipetteInstrument> {
        self.instruments.get(pipette)
    }

    pub fn labware(&self, labware: &str) -> Option<&LabwareDefinition> {
        self.labware.get(labware)
    }

    pub fn pipette_ids(&self) -> impl Iterator<Item = &PipetteId> {
        self.instruments.keys()
    }

    pub fn has_tip(&self, pipette: &str) -> bool {
        self.tip_state.has_tip(pipette)
    }

    /// Largest volume one tip of this pipette can hold.
    ///
    /// The smaller of the pipette's maximum and the volume of the tips in its
    /// assigned racks. `None` when the pipette is not installed.
    pub fn max_aspirate_volume(&self, pipette: &str) -> Option<f64> {
        let instrument = self.instruments.get(pipette)?;
        let tip_volume = instrument
            .tipracks
            .iter()
            .filter_map(|id| self.labware.get(id))
            .filter_map(LabwareDefinition::tip_volume)
            .fold(f64::INFINITY, f64::min);

        Some(instrument.spec.max_volume.min(tip_volume))
    }

    /// Volume currently recorded in a well, zero when nothing was ever added.
    pub fn well_volume(&self, labware: &str, well: &str) -> f64 {
        self.liquid_state
            .well(labware, well)
            .map(Composition::total_volume)
            .unwrap_or(0.0)
    }

    pub fn tip_volume(&self, pipette: &str, tip_index: usize) -> f64 {
        self.liquid_state
            .tip(pipette, tip_index)
            .map(Composition::total_volume)
            .unwrap_or(0.0)
    }

    /// First rack position holding a full set of tips for this pipette.
    ///
    /// Racks are searched in the pipette's assignment order, positions in
    /// column order. A multi-channel pipette needs a whole column of tips
    /// starting at row A.
    pub fn next_tip(&self, pipette: &str) -> Option<(LabwareId, WellName)> {
        let instrument = self.instruments.get(pipette)?;
        let channels = instrument.channels();

        instrument.tipracks.iter().find_map(|rack_id| {
            let rack = self.labware.get(rack_id)?;
            let well = if channels <= 1 {
                rack.wells()
                    .find(|well| self.tip_state.tip_present(rack_id, well))?
            } else {
                rack.columns
                    .iter()
                    .filter(|column| column.len() >= channels)
                    .find(|column| {
                        column[..channels]
                            .iter()
                            .all(|well| self.tip_state.tip_present(rack_id, well))
                    })
                    .map(|column| &column[0])?
            };
            Some((rack_id.clone(), well.clone()))
        })
    }

    /// Successor with the pipette's tip flag set.
    pub fn with_tip_mounted(&self, pipette: &str, mounted: bool) -> Self {
        let mut next = self.clone();
        next.tip_state.pipettes.insert(pipette.to_string(), mounted);
        next
    }

    /// Successor with the given rack positions emptied.
    pub fn with_tips_taken(&self, tiprack: &str, wells: &[WellName]) -> Self {
        let mut next = self.clone();
        let rack = next
            .tip_state
            .tipracks
            .entry(tiprack.to_string())
            .or_default();
        for well in wells {
            rack.insert(well.clone(), false);
        }
        next
    }

    pub fn with_well_contents(&self, labware: &str, well: &str, contents: Composition) -> Self {
        let mut next = self.clone();
        next.liquid_state
            .labware
            .entry(labware.to_string())
            .or_default()
            .insert(well.to_string(), contents);
        next
    }

    pub fn with_tip_contents(
        &self,
        pipette: &str,
        tip_index: usize,
        contents: Composition,
    ) -> Self {
        let mut next = self.clone();
        next.liquid_state
            .pipettes
            .entry(pipette.to_string())
            .or_default()
            .insert(tip_index, contents);
        next
    }

    /// Successor where every tip of the pipette is fresh and empty.
    pub fn with_fresh_tips(&self, pipette: &str, channels: usize) -> Self {
        let mut next = self.clone();
        let tips = (0..channels).map(|index| (index, Composition::new())).collect();
        next.liquid_state.pipettes.insert(pipette.to_string(), tips);
        next
    }

    /// Successor with the pipette's tip liquid discarded along with its tips.
    pub fn with_tip_contents_removed(&self, pipette: &str) -> Self {
        let mut next = self.clone();
        next.liquid_state.pipettes.remove(pipette);
        next
    }

    /// Successor where every tip of the pipette holds zero volume but keeps
    /// its contamination traces.
    pub fn with_tip_contents_drained(&self, pipette: &str) -> Self {
        let mut next = self.clone();
        if let Some(tips) = next.liquid_state.pipettes.get_mut(pipette) {
            for contents in tips.values_mut() {
                *contents = contents.drained();
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LabwareDefinition, PipetteSpec};

    fn state_with_rack(channels: usize) -> RobotState {
        let mut state = RobotState::default();
        let spec = PipetteSpec::new("test", channels, 30.0, 300.0);
        state.instruments.insert(
            "p".to_string(),
            PipetteInstrument::new(spec).with_tiprack("rack"),
        );
        let rack = LabwareDefinition::tiprack_96(200.0);
        let tips = rack.wells().map(|w| (w.clone(), true)).collect();
        state.tip_state.tipracks.insert("rack".to_string(), tips);
        state.labware.insert("rack".to_string(), rack);
        state
    }

    #[test]
    fn max_aspirate_volume_is_bounded_by_tip() {
        let state = state_with_rack(1);

        assert_eq!(state.max_aspirate_volume("p"), Some(200.0));
        assert_eq!(state.max_aspirate_volume("missing"), None);
    }

    #[test]
    fn next_tip_scans_column_order() {
        let state = state_with_rack(1);
        let taken = state.with_tips_taken("rack", &["A1".to_string(), "B1".to_string()]);

        assert_eq!(
            taken.next_tip("p"),
            Some(("rack".to_string(), "C1".to_string()))
        );
    }

    #[test]
    fn next_tip_for_multichannel_skips_partial_columns() {
        let state = state_with_rack(8).with_tips_taken("rack", &["H1".to_string()]);

        assert_eq!(
            state.next_tip("p"),
            Some(("rack".to_string(), "A2".to_string()))
        );
    }

    #[test]
    fn successor_leaves_original_untouched() {
        let state = state_with_rack(1);

        let next = state.with_tip_mounted("p", true);

        assert!(next.has_tip("p"));
        assert!(!state.has_tip("p"));
    }

    #[test]
    fn empty_well_has_zero_volume() {
        let state = state_with_rack(1);

        assert_eq!(state.well_volume("plate", "A1"), 0.0);
    }
}
