//! Inventory model
//!
//! Owns every station. All access goes through bounds-checked accessors;
//! the dispatcher never indexes slots directly.

mod station;

pub use station::Station;

use heapless::Vec;

use crate::config::{StationLayout, MAX_STATIONS};
use crate::error::InventoryError;
use crate::operation::Target;

/// All stations of the machine
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Inventory {
    stations: Vec<Station, MAX_STATIONS>,
}

impl Inventory {
    /// Build the power-on inventory from a validated layout
    pub fn from_layout(layout: &StationLayout) -> Self {
        let mut stations = Vec::new();
        for (id, spec) in layout.stations().iter().enumerate() {
            let _ = stations.push(Station::from_spec(id, spec));
        }
        Self { stations }
    }

    /// Look up a station
    pub fn station(&self, station: usize) -> Result<&Station, InventoryError> {
        self.stations
            .get(station)
            .ok_or(InventoryError::StationOutOfRange {
                station,
                stations: self.stations.len(),
            })
    }

    /// Occupancy of one spot
    pub fn occupied(&self, target: Target) -> Result<bool, InventoryError> {
        let station = self.station(target.station)?;
        station
            .slot(target.spot)
            .ok_or(InventoryError::SpotOutOfRange {
                station: target.station,
                spot: target.spot,
                spots: station.spot_count(),
            })
    }

    /// Set the occupancy of one spot
    ///
    /// Returns the station's full slot vector after the change.
    pub fn set_occupied(&mut self, target: Target, value: bool) -> Result<&[bool], InventoryError> {
        let stations = self.stations.len();
        let station = self
            .stations
            .get_mut(target.station)
            .ok_or(InventoryError::StationOutOfRange {
                station: target.station,
                stations,
            })?;
        let spots = station.spot_count();
        let slot = station
            .slot_mut(target.spot)
            .ok_or(InventoryError::SpotOutOfRange {
                station: target.station,
                spot: target.spot,
                spots,
            })?;
        *slot = value;
        Ok(station.slots())
    }

    /// All stations in index order
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Number of stations
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Total samples held by all stations
    pub fn sample_count(&self) -> usize {
        self.stations.iter().map(Station::sample_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bench() -> Inventory {
        Inventory::from_layout(&StationLayout::default())
    }

    #[test]
    fn test_from_default_layout() {
        let inv = bench();
        assert_eq!(inv.station_count(), 3);
        assert_eq!(inv.station(0).unwrap().slots(), &[true, false]);
        assert_eq!(inv.station(1).unwrap().slots(), &[false]);
        assert_eq!(inv.station(2).unwrap().slots(), &[false]);
        assert_eq!(inv.sample_count(), 1);
    }

    #[test]
    fn test_station_ids_match_index() {
        let inv = bench();
        for (i, station) in inv.stations().iter().enumerate() {
            assert_eq!(station.id(), i);
        }
    }

    #[test]
    fn test_station_out_of_range() {
        let inv = bench();
        assert_eq!(
            inv.station(5),
            Err(InventoryError::StationOutOfRange {
                station: 5,
                stations: 3
            })
        );
    }

    #[test]
    fn test_spot_out_of_range() {
        let mut inv = bench();
        let err = InventoryError::SpotOutOfRange {
            station: 1,
            spot: 1,
            spots: 1,
        };
        assert_eq!(inv.occupied(Target::new(1, 1)), Err(err));
        assert_eq!(inv.set_occupied(Target::new(1, 1), true), Err(err));
        assert_eq!(inv.sample_count(), 1);
    }

    #[test]
    fn test_set_occupied_returns_station_slots() {
        let mut inv = bench();
        let slots = inv.set_occupied(Target::new(0, 1), true).unwrap();
        assert_eq!(slots, &[true, true]);

        let slots = inv.set_occupied(Target::new(0, 0), false).unwrap();
        assert_eq!(slots, &[false, true]);

        // Other stations untouched
        assert_eq!(inv.station(1).unwrap().slots(), &[false]);
        assert_eq!(inv.station(2).unwrap().slots(), &[false]);
    }
}
