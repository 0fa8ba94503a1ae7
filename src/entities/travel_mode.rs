use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Car,
    Motorcycle,
    Pedestrian,
}

impl TravelMode {
    pub const ALL: [TravelMode; 3] = [Self::Car, Self::Motorcycle, Self::Pedestrian];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Motorcycle => "motorcycle",
            Self::Pedestrian => "pedestrian",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Car => "Car",
            Self::Motorcycle => "Motorcycle",
            Self::Pedestrian => "Pedestrian",
        }
    }

    /// Colour of the drawn route line.
    pub fn route_color(&self) -> &'static str {
        match self {
            Self::Car => "#4361ee",
            Self::Motorcycle => "#f72585",
            Self::Pedestrian => "#4cc9f0",
        }
    }

    pub fn has_costs(&self) -> bool {
        !matches!(self, Self::Pedestrian)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.name() == name)
    }
}

/// Which endpoint input the next map click fills.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    Origin,
    Destination,
}

impl SelectionMode {
    pub const ALL: [SelectionMode; 2] = [Self::Origin, Self::Destination];
}

#[test]
fn travel_mode_wire_names_test() {
    assert_eq!(serde_json::to_string(&TravelMode::Motorcycle).unwrap(), "\"motorcycle\"");
    assert_eq!(TravelMode::from_name("pedestrian"), Some(TravelMode::Pedestrian));
    assert_eq!(TravelMode::from_name("bicycle"), None);

    for mode in TravelMode::ALL {
        assert_eq!(TravelMode::from_name(mode.name()), Some(mode));
    }
}

#[test]
fn only_pedestrian_has_no_costs_test() {
    assert!(TravelMode::Car.has_costs());
    assert!(TravelMode::Motorcycle.has_costs());
    assert!(!TravelMode::Pedestrian.has_costs());
}
