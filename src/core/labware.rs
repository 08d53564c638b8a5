//! Labware definitions: well layout, well capacity and tip volume.

use serde::{Deserialize, Serialize};

use super::WellName;

/// Labware id of the fixed trash that receives dropped tips.
pub const FIXED_TRASH_ID: &str = "trashId";

/// Well used for every drop-tip and trash blow-out.
pub const TRASH_WELL: &str = "A1";

const ROW_NAMES: &str = "ABCDEFGHIJKLMNOP";

/// What a piece of labware is used for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LabwareKind {
    WellPlate,
    Reservoir,
    #[serde(rename_all = "camelCase")]
    TipRack {
        tip_volume: f64,
    },
    Trash,
}

/// Layout and capacity of a piece of labware.
///
/// Wells are stored column by column; that is also the order in which tips
/// are taken from a tip rack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabwareDefinition {
    pub kind: LabwareKind,
    pub columns: Vec<Vec<WellName>>,
    /// Maximum volume a single well holds, when known
    pub well_capacity: Option<f64>,
}

impl LabwareDefinition {
    /// Build a rectangular grid named `A1`, `B1`, ... in column order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stepgen::core::{LabwareDefinition, LabwareKind};
    ///
    /// let plate = LabwareDefinition::grid(LabwareKind::WellPlate, 8, 12, Some(200.0));
    /// assert_eq!(plate.columns.len(), 12);
    /// assert_eq!(plate.columns[0][1], "B1");
    /// assert!(plate.has_well("H12"));
    /// ```
    pub fn grid(
        kind: LabwareKind,
        rows: usize,
        columns: usize,
        well_capacity: Option<f64>,
    ) -> Self {
        let columns = (1..=columns)
            .map(|column| {
                ROW_NAMES
                    .chars()
                    .take(rows)
                    .map(|row| format!("{row}{column}"))
                    .collect()
            })
            .collect();

        Self {
            kind,
            columns,
            well_capacity,
        }
    }

    pub fn well_plate_96(well_capacity: f64) -> Self {
        Self::grid(LabwareKind::WellPlate, 8, 12, Some(well_capacity))
    }

    pub fn tiprack_96(tip_volume: f64) -> Self {
        Self::grid(LabwareKind::TipRack { tip_volume }, 8, 12, None)
    }

    pub fn reservoir_12(well_capacity: f64) -> Self {
        Self::grid(LabwareKind::Reservoir, 1, 12, Some(well_capacity))
    }

    pub fn trash() -> Self {
        Self::grid(LabwareKind::Trash, 1, 1, None)
    }

    pub fn is_tiprack(&self) -> bool {
        matches!(self.kind, LabwareKind::TipRack { .. })
    }

    pub fn tip_volume(&self) -> Option<f64> {
        match self.kind {
            LabwareKind::TipRack { tip_volume } => Some(tip_volume),
            _ => None,
        }
    }

    /// All wells in column order.
    pub fn wells(&self) -> impl Iterator<Item = &WellName> {
        self.columns.iter().flatten()
    }

    pub fn has_well(&self, well: &str) -> bool {
        self.wells().any(|w| w == well)
    }

    /// Wells touched by a pipette with `channels` tips addressing `well`.
    ///
    /// A single channel touches only `well`. Multiple channels run down the
    /// column starting at `well`; a column holding one well (a reservoir
    /// trough) is shared by every tip. Returns `None` when the well is
    /// unknown or the column is too short.
    pub fn wells_for_tips(&self, well: &str, channels: usize) -> Option<Vec<WellName>> {
        let column = self.columns.iter().find(|c| c.iter().any(|w| w == well))?;

        if channels <= 1 {
            return Some(vec![well.to_string()]);
        }

        if column.len() == 1 {
            return Some(vec![well.to_string(); channels]);
        }

        let start = column.iter().position(|w| w == well)?;
        column
            .get(start..start + channels)
            .map(|wells| wells.to_vec())
    }
}
