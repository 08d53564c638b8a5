//! Ingredient composition of a single liquid location.
//!
//! A composition maps ingredient ids to volumes. It is used both for wells
//! and for pipette tips. All operations return new values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::IngredientId;

/// Volumes smaller than this are treated as zero.
pub const VOLUME_EPSILON: f64 = 1e-9;

/// Ingredient id → volume for one well or one tip.
///
/// Ingredients that were once present stay in the map with a volume of zero.
/// That zero-volume entry is how contamination is tracked after a tip or a
/// well has been emptied.
///
/// # Example
///
/// ```rust
/// use stepgen::core::Composition;
///
/// let well = Composition::new().with_ingredient("buffer", 100.0);
/// let (remaining, taken) = well.split(30.0);
///
/// assert_eq!(remaining.volume_of("buffer"), 70.0);
/// assert_eq!(taken.volume_of("buffer"), 30.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Composition {
    volumes: BTreeMap<IngredientId, f64>,
}

impl Composition {
    /// Create an empty composition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new composition with `volume` of `ingredient` added.
    pub fn with_ingredient(&self, ingredient: impl Into<IngredientId>, volume: f64) -> Self {
        let mut volumes = self.volumes.clone();
        *volumes.entry(ingredient.into()).or_insert(0.0) += volume;
        Self { volumes }
    }

    /// Total volume across all ingredients.
    pub fn total_volume(&self) -> f64 {
        self.volumes.values().sum()
    }

    /// Volume of one ingredient, zero when absent.
    pub fn volume_of(&self, ingredient: &str) -> f64 {
        self.volumes.get(ingredient).copied().unwrap_or(0.0)
    }

    /// Whether the ingredient has ever been recorded here, even at zero volume.
    pub fn contains(&self, ingredient: &str) -> bool {
        self.volumes.contains_key(ingredient)
    }

    /// Ingredient ids in stable order.
    pub fn ingredients(&self) -> impl Iterator<Item = &IngredientId> {
        self.volumes.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IngredientId, f64)> {
        self.volumes.iter().map(|(id, volume)| (id, *volume))
    }

    /// No ingredient has ever been recorded.
    pub fn is_pristine(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Merge another composition into this one, summing per ingredient.
    pub fn merge(&self, other: &Composition) -> Self {
        let mut volumes = self.volumes.clone();
        for (id, volume) in &other.volumes {
            *volumes.entry(id.clone()).or_insert(0.0) += volume;
        }
        Self { volumes }
    }

    /// Split `volume` off this composition proportionally.
    ///
    /// Returns `(remaining, taken)`. Every ingredient present here appears in
    /// both halves, possibly at zero volume. Callers check availability
    /// first; requesting more than the total takes everything.
    pub fn split(&self, volume: f64) -> (Composition, Composition) {
        let total = self.total_volume();

        if self.volumes.len() == 1 {
            if let Some((id, available)) = self.volumes.iter().next() {
                let taken = volume.min(*available).max(0.0);
                let remaining = snap_to_zero(available - taken);
                return (
                    Self::single(id.clone(), remaining),
                    Self::single(id.clone(), taken),
                );
            }
        }

        let mut remaining = BTreeMap::new();
        let mut taken = BTreeMap::new();
        for (id, available) in &self.volumes {
            let portion = if total > VOLUME_EPSILON {
                (available * volume / total).min(*available)
            } else {
                0.0
            };
            remaining.insert(id.clone(), snap_to_zero(available - portion));
            taken.insert(id.clone(), snap_to_zero(portion));
        }

        (Self { volumes: remaining }, Self { volumes: taken })
    }

    /// Keep every ingredient but set all volumes to zero.
    pub fn drained(&self) -> Self {
        Self {
            volumes: self.volumes.keys().map(|id| (id.clone(), 0.0)).collect(),
        }
    }

    fn single(id: IngredientId, volume: f64) -> Self {
        let mut volumes = BTreeMap::new();
        volumes.insert(id, volume);
        Self { volumes }
    }
}

impl FromIterator<(IngredientId, f64)> for Composition {
    fn from_iter<I: IntoIterator<Item = (IngredientId, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Composition::new(), |acc, (id, volume)| acc.with_ingredient(id, volume))
    }
}

fn snap_to_zero(volume: f64) -> f64 {
    if volume.abs() < VOLUME_EPSILON {
        0.0
    } else {
        volume
    }
}
