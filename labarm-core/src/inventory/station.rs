//! A single station and its spots

use heapless::Vec;

use crate::config::{StationSpec, MAX_SPOTS};

/// A station: a stable index and one occupancy flag per spot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Station {
    id: usize,
    slots: Vec<bool, MAX_SPOTS>,
}

impl Station {
    /// Build a station from its configured spec
    ///
    /// The spec must already be validated; spot counts beyond
    /// [`MAX_SPOTS`] are clipped.
    pub fn from_spec(id: usize, spec: &StationSpec) -> Self {
        let mut slots = Vec::new();
        for spot in 0..spec.spots.min(MAX_SPOTS) {
            let _ = slots.push(spec.occupied.contains(&spot));
        }
        Self { id, slots }
    }

    /// Index of this station
    pub fn id(&self) -> usize {
        self.id
    }

    /// Occupancy flags, one per spot
    pub fn slots(&self) -> &[bool] {
        &self.slots
    }

    /// Number of spots
    pub fn spot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied spots
    pub fn sample_count(&self) -> usize {
        self.slots.iter().filter(|&&occupied| occupied).count()
    }

    pub(super) fn slot(&self, spot: usize) -> Option<bool> {
        self.slots.get(spot).copied()
    }

    pub(super) fn slot_mut(&mut self, spot: usize) -> Option<&mut bool> {
        self.slots.get_mut(spot)
    }
}
