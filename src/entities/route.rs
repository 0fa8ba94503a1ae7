use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::{AvoidSet, Coordinates, TravelMode};

/// A route endpoint as typed or clicked by the user.
#[derive(Clone, Debug, PartialEq)]
pub enum Endpoint {
    Coordinates(Coordinates),
    Text(String),
}

impl Endpoint {
    /// Classifies already-trimmed input. Anything that is not an in-range
    /// `lat,lng` pair is passed through as text for the engine to geocode.
    pub fn from_input(input: &str) -> Self {
        match input.parse::<Coordinates>() {
            Ok(coordinates) => Self::Coordinates(coordinates),
            Err(_) => Self::Text(input.to_string()),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinates(coordinates) => fmt::Display::fmt(coordinates, f),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    origin: Endpoint,
    destination: Endpoint,
    travel_mode: TravelMode,
    avoids: AvoidSet,
}

impl RouteRequest {
    pub(crate) fn new(
        origin: Endpoint,
        destination: Endpoint,
        travel_mode: TravelMode,
        avoids: AvoidSet,
    ) -> Self {
        Self {
            origin,
            destination,
            travel_mode,
            avoids,
        }
    }

    pub fn origin(&self) -> &Endpoint {
        &self.origin
    }

    pub fn destination(&self) -> &Endpoint {
        &self.destination
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.travel_mode
    }

    pub fn avoids(&self) -> &AvoidSet {
        &self.avoids
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Costs {
    pub fuel_liters: f64,
    pub fuel_cost: f64,
    pub toll_cost: f64,
    pub total_cost: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteResponse {
    /// Flat `lat, lng, lat, lng, ...` sequence as sent by the engine.
    pub shape: Vec<f64>,
    pub start: Coordinates,
    pub end: Coordinates,
    pub travel_mode: TravelMode,
    pub applied_avoids: AvoidSet,
    pub has_tolls: bool,
    pub toll_distance_km: f64,
    pub traffic_delay_minutes: f64,
    pub costs: Costs,
    pub distance_km: f64,
    pub time_minutes: f64,
    pub directions: Vec<String>,
}

#[test]
fn endpoint_classification_test() {
    assert_eq!(
        Endpoint::from_input("19.432601,-99.133298"),
        Endpoint::Coordinates(Coordinates::new(19.432601, -99.133298).unwrap())
    );
    assert_eq!(
        Endpoint::from_input("Palacio de Bellas Artes"),
        Endpoint::Text("Palacio de Bellas Artes".into())
    );
    // out of range stays text; the engine decides what to do with it
    assert_eq!(
        Endpoint::from_input("200,10"),
        Endpoint::Text("200,10".into())
    );
}

#[test]
fn endpoint_text_form_test() {
    assert_eq!(Endpoint::from_input("19.4,-99.1").to_string(), "19.400000,-99.100000");
    assert_eq!(Endpoint::from_input("Puebla").to_string(), "Puebla");
}
