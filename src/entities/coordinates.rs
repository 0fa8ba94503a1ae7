use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{invalid_coordinate_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, Error> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(invalid_coordinate_error());
        }

        Ok(Self { lat, lng })
    }

    /// Reads an engine `[lat, lng]` pair.
    pub fn from_pair(pair: [f64; 2]) -> Result<Self, Error> {
        Self::new(pair[0], pair[1])
    }
}

/// Free-text form written into endpoint inputs: `lat,lng` with six decimals.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        coordinates.to_string()
    }
}

impl FromStr for Coordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s.split_once(',').ok_or_else(invalid_coordinate_error)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid_coordinate_error())?;
        let lng: f64 = lng.trim().parse().map_err(|_| invalid_coordinate_error())?;

        if !lat.is_finite() || !lng.is_finite() {
            return Err(invalid_coordinate_error());
        }

        Self::new(lat, lng)
    }
}

impl From<Coordinates> for geo_types::Coord<f64> {
    fn from(coordinates: Coordinates) -> Self {
        geo_types::Coord {
            x: coordinates.lng,
            y: coordinates.lat,
        }
    }
}

#[test]
fn coordinates_format_test() {
    let c = Coordinates::new(19.432601, -99.133298).unwrap();
    assert_eq!(c.to_string(), "19.432601,-99.133298");

    let c = Coordinates::new(19.0, -99.5).unwrap();
    assert_eq!(String::from(c), "19.000000,-99.500000");
}

#[test]
fn coordinates_range_test() {
    assert!(Coordinates::new(90.0, 180.0).is_ok());
    assert!(Coordinates::new(-90.0, -180.0).is_ok());
    assert!(Coordinates::new(90.5, 0.0).is_err());
    assert!(Coordinates::new(0.0, -180.1).is_err());
    assert!(Coordinates::new(f64::NAN, 0.0).is_err());
}

#[test]
fn coordinates_parse_test() {
    let c: Coordinates = " 19.4326 , -99.1332 ".parse().unwrap();
    assert_eq!(c, Coordinates::new(19.4326, -99.1332).unwrap());

    assert!("Zocalo, CDMX".parse::<Coordinates>().is_err());
    assert!("19.4".parse::<Coordinates>().is_err());
    assert!("100.0,10.0".parse::<Coordinates>().is_err());
}

#[test]
fn coordinates_geo_axis_order_test() {
    let coord: geo_types::Coord<f64> = Coordinates::new(19.0, -99.0).unwrap().into();
    assert_eq!(coord.x, -99.0);
    assert_eq!(coord.y, 19.0);
}
