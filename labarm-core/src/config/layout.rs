//! Station layout configuration
//!
//! The layout fixes how many stations exist, how many spots each one has,
//! and which spots hold a sample at power-on.

use core::fmt;

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of stations
pub const MAX_STATIONS: usize = 8;

/// Maximum spots per station
pub const MAX_SPOTS: usize = 8;

/// Spot counts of the default bench: three stations, the first with two spots
pub const DEFAULT_SPOT_COUNTS: [usize; 3] = [2, 1, 1];

/// Layout validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// Layout has no stations
    NoStations,
    /// More than [`MAX_STATIONS`] stations
    TooManyStations,
    /// Station declared with zero spots
    EmptyStation { station: usize },
    /// Station declared with more than [`MAX_SPOTS`] spots
    TooManySpots { station: usize, spots: usize },
    /// Initially occupied spot does not exist
    OccupiedOutOfRange { station: usize, spot: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::NoStations => f.write_str("layout has no stations"),
            LayoutError::TooManyStations => {
                write!(f, "layout has more than {} stations", MAX_STATIONS)
            }
            LayoutError::EmptyStation { station } => {
                write!(f, "station {} has no spots", station)
            }
            LayoutError::TooManySpots { station, spots } => write!(
                f,
                "station {} has {} spots (max {})",
                station, spots, MAX_SPOTS
            ),
            LayoutError::OccupiedOutOfRange { station, spot } => write!(
                f,
                "initial sample at station {}, spot {} is outside the station",
                station, spot
            ),
        }
    }
}

/// One station of the layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StationSpec {
    /// Number of spots
    pub spots: usize,
    /// Spots holding a sample at power-on
    #[cfg_attr(feature = "serde", serde(default))]
    pub occupied: Vec<usize, MAX_SPOTS>,
}

impl StationSpec {
    fn validate(&self, station: usize) -> Result<(), LayoutError> {
        if self.spots == 0 {
            return Err(LayoutError::EmptyStation { station });
        }
        if self.spots > MAX_SPOTS {
            return Err(LayoutError::TooManySpots {
                station,
                spots: self.spots,
            });
        }
        if let Some(&spot) = self.occupied.iter().find(|&&spot| spot >= self.spots) {
            return Err(LayoutError::OccupiedOutOfRange { station, spot });
        }
        Ok(())
    }
}

/// Ordered list of stations
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StationLayout {
    stations: Vec<StationSpec, MAX_STATIONS>,
}

impl StationLayout {
    /// Create an empty layout
    pub const fn new() -> Self {
        Self {
            stations: Vec::new(),
        }
    }

    /// Build a layout from spot counts with every spot empty
    pub fn from_spot_counts(counts: &[usize]) -> Result<Self, LayoutError> {
        let mut layout = Self::new();
        for &spots in counts {
            layout.push_station(spots, &[])?;
        }
        layout.validate()?;
        Ok(layout)
    }

    /// Append a station
    pub fn push_station(&mut self, spots: usize, occupied: &[usize]) -> Result<(), LayoutError> {
        let station = self.stations.len();
        let spec = StationSpec {
            spots,
            occupied: Vec::from_slice(occupied).map_err(|_| LayoutError::TooManySpots {
                station,
                spots: occupied.len(),
            })?,
        };
        spec.validate(station)?;
        self.stations
            .push(spec)
            .map_err(|_| LayoutError::TooManyStations)
    }

    /// Station specifications in index order
    pub fn stations(&self) -> &[StationSpec] {
        &self.stations
    }

    /// Number of stations
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True if the layout has no stations
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Check the whole layout
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.stations.is_empty() {
            return Err(LayoutError::NoStations);
        }
        self.stations
            .iter()
            .enumerate()
            .try_for_each(|(station, spec)| spec.validate(station))
    }
}

impl Default for StationLayout {
    /// `[2, 1, 1]` with a sample at station 0, spot 0
    fn default() -> Self {
        let mut layout = Self::new();
        for (station, &spots) in DEFAULT_SPOT_COUNTS.iter().enumerate() {
            let occupied: &[usize] = if station == 0 { &[0] } else { &[] };
            // Constants are within every limit
            let _ = layout.push_station(spots, occupied);
        }
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = StationLayout::default();
        assert_eq!(layout.len(), 3);
        assert!(layout.validate().is_ok());

        let spots: std::vec::Vec<usize> = layout.stations().iter().map(|s| s.spots).collect();
        assert_eq!(spots, [2, 1, 1]);
        assert_eq!(layout.stations()[0].occupied.as_slice(), &[0]);
        assert!(layout.stations()[1].occupied.is_empty());
    }

    #[test]
    fn test_empty_layout_rejected() {
        assert_eq!(StationLayout::new().validate(), Err(LayoutError::NoStations));
        assert_eq!(StationLayout::from_spot_counts(&[]), Err(LayoutError::NoStations));
    }

    #[test]
    fn test_zero_spot_station_rejected() {
        assert_eq!(
            StationLayout::from_spot_counts(&[2, 0]),
            Err(LayoutError::EmptyStation { station: 1 })
        );
    }

    #[test]
    fn test_too_many_spots_rejected() {
        assert_eq!(
            StationLayout::from_spot_counts(&[MAX_SPOTS + 1]),
            Err(LayoutError::TooManySpots {
                station: 0,
                spots: MAX_SPOTS + 1
            })
        );
    }

    #[test]
    fn test_too_many_stations_rejected() {
        let counts = [1usize; MAX_STATIONS + 1];
        assert_eq!(
            StationLayout::from_spot_counts(&counts),
            Err(LayoutError::TooManyStations)
        );
    }

    #[test]
    fn test_initial_sample_outside_station() {
        let mut layout = StationLayout::new();
        assert_eq!(
            layout.push_station(1, &[1]),
            Err(LayoutError::OccupiedOutOfRange { station: 0, spot: 1 })
        );
    }
}
