use geo_types::{LineString, Rect};

use crate::entities::Coordinates;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerRole {
    Provisional,
    Origin,
    Destination,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerSize {
    Small,
    Medium,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub symbol: Option<char>,
    pub size: MarkerSize,
}

impl MarkerRole {
    pub fn style(&self) -> MarkerStyle {
        match self {
            Self::Provisional => MarkerStyle {
                color: "#888888",
                symbol: None,
                size: MarkerSize::Small,
            },
            Self::Origin => MarkerStyle {
                color: "#4361ee",
                symbol: Some('A'),
                size: MarkerSize::Medium,
            },
            Self::Destination => MarkerStyle {
                color: "#f72585",
                symbol: Some('B'),
                size: MarkerSize::Medium,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub position: Coordinates,
    pub role: MarkerRole,
}

impl Marker {
    pub fn new(position: Coordinates, role: MarkerRole) -> Self {
        Self { position, role }
    }

    pub fn style(&self) -> MarkerStyle {
        self.role.style()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteLine {
    pub points: LineString<f64>,
    pub color: &'static str,
    pub weight: u32,
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitBounds {
    pub bounds: Rect<f64>,
    /// Pixel padding as (x, y).
    pub padding: (u32, u32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Viewport {
    Centered { center: Coordinates, zoom: u8 },
    Fitted(FitBounds),
}

/// Everything the host map widget is expected to show.
#[derive(Clone, Debug, PartialEq)]
pub struct MapState {
    pub viewport: Viewport,
    pub provisional_markers: Vec<Marker>,
    pub origin_marker: Option<Marker>,
    pub destination_marker: Option<Marker>,
    pub route: Option<RouteLine>,
}

impl MapState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            provisional_markers: vec![],
            origin_marker: None,
            destination_marker: None,
            route: None,
        }
    }

    /// Drops the drawn route and its endpoint markers. Provisional markers stay.
    pub fn clear_route_and_markers(&mut self) {
        self.route = None;
        self.origin_marker = None;
        self.destination_marker = None;
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.provisional_markers
            .iter()
            .chain(self.origin_marker.iter())
            .chain(self.destination_marker.iter())
    }

    pub fn is_clear(&self) -> bool {
        self.route.is_none() && self.markers().next().is_none()
    }
}

#[test]
fn clear_route_keeps_provisional_markers_test() {
    let point = Coordinates::new(19.4, -99.1).unwrap();
    let center = Coordinates::new(19.4326, -99.1332).unwrap();

    let mut map = MapState::new(Viewport::Centered { center, zoom: 12 });
    map.provisional_markers
        .push(Marker::new(point, MarkerRole::Provisional));
    map.origin_marker = Some(Marker::new(point, MarkerRole::Origin));
    map.destination_marker = Some(Marker::new(point, MarkerRole::Destination));

    assert_eq!(map.markers().count(), 3);

    map.clear_route_and_markers();

    assert_eq!(map.markers().count(), 1);
    assert!(!map.is_clear());
}

#[test]
fn marker_styles_test() {
    assert_eq!(MarkerRole::Origin.style().symbol, Some('A'));
    assert_eq!(MarkerRole::Destination.style().symbol, Some('B'));
    assert_eq!(MarkerRole::Provisional.style().size, MarkerSize::Small);
    assert_eq!(MarkerRole::Provisional.style().color, "#888888");
}
