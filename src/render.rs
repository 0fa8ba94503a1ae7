//! Pure mapping from reconciled statements to display instructions.

use geo_types::{Coord, LineString, Rect};

use crate::entities::{
    Coordinates, FitBounds, Marker, MarkerRole, RouteLine, RouteResponse,
};
use crate::reconcile::Statement;

pub const FIT_PADDING: (u32, u32) = (40, 40);
pub const ROUTE_WEIGHT: u32 = 5;
pub const ROUTE_OPACITY: f64 = 0.8;
pub const LOADING_MESSAGE: &str = "Calculating the best route...";
pub const ESTIMATE_FOOTER: &str = "Costs and times are estimates.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummaryKind {
    Plain,
    Warning,
    Total,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SummaryItem {
    pub kind: SummaryKind,
    pub label: &'static str,
    pub value: String,
}

impl SummaryItem {
    fn plain(label: &'static str, value: String) -> Self {
        Self {
            kind: SummaryKind::Plain,
            label,
            value,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectionStep {
    /// 1-based position shown to the user.
    pub number: usize,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultPanel {
    pub applied_options: Vec<String>,
    pub summary: Vec<SummaryItem>,
    pub directions: Vec<DirectionStep>,
    pub footer: &'static str,
}

/// Content of the result area. Only one state is shown at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Panel {
    #[default]
    Empty,
    Loading { message: String },
    Error { message: String },
    Result(ResultPanel),
}

impl Panel {
    pub fn loading() -> Self {
        Self::Loading {
            message: LOADING_MESSAGE.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn is_result(&self) -> bool {
        matches!(self, Self::Result(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteDisplay {
    pub route: RouteLine,
    /// Absent when the engine sent no usable geometry.
    pub fit: Option<FitBounds>,
    pub origin: Marker,
    pub destination: Marker,
    pub panel: ResultPanel,
}

/// Groups a flat `lat, lng, ...` sequence into points. A trailing unpaired
/// value and out-of-range pairs are dropped.
pub fn decode_shape(shape: &[f64]) -> Vec<Coordinates> {
    if shape.len() % 2 != 0 {
        tracing::warn!("route shape has odd length {}, dropping last value", shape.len());
    }

    shape
        .chunks_exact(2)
        .filter_map(|pair| match Coordinates::new(pair[0], pair[1]) {
            Ok(coordinates) => Some(coordinates),
            Err(_) => {
                tracing::warn!("dropping out of range shape point {:?}", pair);
                None
            }
        })
        .collect()
}

pub fn bounds(points: &[Coordinates]) -> Option<Rect<f64>> {
    let first: Coord<f64> = (*points.first()?).into();

    let (min, max) = points.iter().skip(1).fold((first, first), |(min, max), p| {
        let c: Coord<f64> = (*p).into();
        (
            Coord {
                x: min.x.min(c.x),
                y: min.y.min(c.y),
            },
            Coord {
                x: max.x.max(c.x),
                y: max.y.max(c.y),
            },
        )
    });

    Some(Rect::new(min, max))
}

#[tracing::instrument(skip_all)]
pub fn render(statements: Vec<Statement>, response: RouteResponse) -> RouteDisplay {
    let points = decode_shape(&response.shape);
    let fit = bounds(&points).map(|bounds| FitBounds {
        bounds,
        padding: FIT_PADDING,
    });

    let route = RouteLine {
        points: points.iter().copied().map(Coord::from).collect::<LineString<f64>>(),
        color: response.travel_mode.route_color(),
        weight: ROUTE_WEIGHT,
        opacity: ROUTE_OPACITY,
    };

    let applied_options = statements
        .iter()
        .filter(|s| s.is_applied_option())
        .map(|s| s.to_string())
        .collect();

    let mut summary = vec![
        SummaryItem::plain("Distance", format!("{} km", response.distance_km)),
        SummaryItem::plain(
            "Estimated time",
            format!("{:.0} minutes", response.time_minutes.round()),
        ),
    ];

    for statement in statements.iter().filter(|s| !s.is_applied_option()) {
        match statement {
            Statement::TrafficDelay { .. } => summary.push(SummaryItem {
                kind: SummaryKind::Warning,
                label: "Traffic",
                value: statement.to_string(),
            }),
            Statement::CostBreakdown(costs) => {
                summary.push(SummaryItem::plain(
                    "Fuel consumption (est.)",
                    format!("{} L", costs.fuel_liters),
                ));
                summary.push(SummaryItem::plain(
                    "Fuel cost (est.)",
                    format!("${:.2} MXN", costs.fuel_cost),
                ));
                summary.push(SummaryItem::plain(
                    "Toll cost (est.)",
                    format!("${:.2} MXN", costs.toll_cost),
                ));
                summary.push(SummaryItem {
                    kind: SummaryKind::Total,
                    label: "Total trip cost (est.)",
                    value: format!("${:.2} MXN", costs.total_cost),
                });
            }
            _ => {}
        }
    }

    let directions = response
        .directions
        .into_iter()
        .enumerate()
        .map(|(i, text)| DirectionStep { number: i + 1, text })
        .collect();

    RouteDisplay {
        route,
        fit,
        origin: Marker::new(response.start, MarkerRole::Origin),
        destination: Marker::new(response.end, MarkerRole::Destination),
        panel: ResultPanel {
            applied_options,
            summary,
            directions,
            footer: ESTIMATE_FOOTER,
        },
    }
}

#[test]
fn decode_shape_pairs_test() {
    let points = decode_shape(&[19.0, -99.0, 19.1, -99.1]);

    assert_eq!(
        points,
        vec![
            Coordinates::new(19.0, -99.0).unwrap(),
            Coordinates::new(19.1, -99.1).unwrap(),
        ]
    );
}

#[test]
fn decode_shape_odd_length_test() {
    assert_eq!(decode_shape(&[19.0, -99.0, 19.1]).len(), 1);
    assert!(decode_shape(&[19.0]).is_empty());
    assert!(decode_shape(&[]).is_empty());
}

#[test]
fn decode_shape_drops_out_of_range_test() {
    let points = decode_shape(&[19.0, -99.0, 191.0, -99.1, 19.2, -99.2]);
    assert_eq!(points.len(), 2);
}

#[test]
fn bounds_test() {
    let points = decode_shape(&[19.0, -99.0, 19.3, -99.4, 19.1, -98.9]);
    let rect = bounds(&points).unwrap();

    assert_eq!(rect.min(), Coord { x: -99.4, y: 19.0 });
    assert_eq!(rect.max(), Coord { x: -98.9, y: 19.3 });
    assert!(bounds(&[]).is_none());
}

#[test]
fn render_car_route_test() {
    use crate::entities::{AvoidSet, AvoidanceFlag, TravelMode};
    use crate::reconcile::{reconcile, sample_response};

    let requested: AvoidSet = [AvoidanceFlag::TollRoad].into_iter().collect();
    let mut response = sample_response(TravelMode::Car, &[AvoidanceFlag::TollRoad]);
    response.traffic_delay_minutes = 4.0;
    let statements = reconcile(&requested, TravelMode::Car, &response);

    let display = render(statements, response);

    assert_eq!(display.route.points.0.len(), 2);
    assert_eq!(display.route.color, "#4361ee");
    assert_eq!(display.fit.unwrap().padding, (40, 40));
    assert_eq!(display.origin.role, MarkerRole::Origin);
    assert_eq!(display.destination.role, MarkerRole::Destination);

    assert_eq!(
        display.panel.applied_options,
        vec!["Travel mode: Car", "Route calculated avoiding tolls."]
    );

    let labels: Vec<_> = display.panel.summary.iter().map(|i| i.label).collect();
    assert_eq!(
        labels,
        vec![
            "Distance",
            "Estimated time",
            "Traffic",
            "Fuel consumption (est.)",
            "Fuel cost (est.)",
            "Toll cost (est.)",
            "Total trip cost (est.)",
        ]
    );
    assert_eq!(display.panel.summary[1].value, "25 minutes");
    assert_eq!(display.panel.summary[4].value, "$36.75 MXN");
    assert_eq!(display.panel.summary[6].kind, SummaryKind::Total);

    assert_eq!(
        display.panel.directions,
        vec![
            DirectionStep {
                number: 1,
                text: "Head north".into()
            },
            DirectionStep {
                number: 2,
                text: "Arrive".into()
            },
        ]
    );
    assert_eq!(display.panel.footer, ESTIMATE_FOOTER);
}

#[test]
fn render_pedestrian_route_has_distance_and_time_only_test() {
    use crate::entities::{AvoidSet, TravelMode};
    use crate::reconcile::{reconcile, sample_response};

    let response = sample_response(TravelMode::Pedestrian, &[]);
    let statements = reconcile(&AvoidSet::new(), TravelMode::Pedestrian, &response);

    let display = render(statements, response);

    let labels: Vec<_> = display.panel.summary.iter().map(|i| i.label).collect();
    assert_eq!(labels, vec!["Distance", "Estimated time"]);
    assert_eq!(display.route.color, "#4cc9f0");
}

#[test]
fn render_without_geometry_skips_fit_test() {
    use crate::entities::{AvoidSet, TravelMode};
    use crate::reconcile::{reconcile, sample_response};

    let mut response = sample_response(TravelMode::Car, &[]);
    response.shape = vec![19.0];
    let statements = reconcile(&AvoidSet::new(), TravelMode::Car, &response);

    let display = render(statements, response);

    assert!(display.fit.is_none());
    assert!(display.route.points.0.is_empty());
}

#[test]
fn panel_states_are_exclusive_test() {
    let mut panel = Panel::loading();
    assert!(panel.is_loading());

    panel = Panel::error("boom");
    assert!(panel.is_error());
    assert!(!panel.is_loading());
    assert!(!panel.is_result());
}
