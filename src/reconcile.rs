//! Turns an engine response into statements that never contradict it.
//!
//! Requested constraints are only ever used to choose between phrasings of
//! what the engine reports; a requested-but-unconfirmed avoidance is never
//! stated as achieved.

use std::fmt;

use crate::entities::{AvoidSet, AvoidanceFlag, Costs, RouteResponse, TravelMode};

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    TravelMode(TravelMode),
    AvoidsTolls,
    IncludesTolls { toll_distance_km: f64 },
    NoTolls,
    AvoidsLimitedAccess,
    AvoidsUnpaved,
    TrafficDelay { minutes: f64 },
    CostBreakdown(Costs),
}

impl Statement {
    pub fn is_toll_statement(&self) -> bool {
        matches!(
            self,
            Self::AvoidsTolls | Self::IncludesTolls { .. } | Self::NoTolls
        )
    }

    /// Statements shown in the "applied options" block rather than the route summary.
    pub fn is_applied_option(&self) -> bool {
        matches!(
            self,
            Self::TravelMode(_)
                | Self::AvoidsTolls
                | Self::IncludesTolls { .. }
                | Self::NoTolls
                | Self::AvoidsLimitedAccess
                | Self::AvoidsUnpaved
        )
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TravelMode(mode) => write!(f, "Travel mode: {}", mode.label()),
            Self::AvoidsTolls => f.write_str("Route calculated avoiding tolls."),
            Self::IncludesTolls { toll_distance_km } => {
                write!(f, "This route includes {} km of toll road.", toll_distance_km)
            }
            Self::NoTolls => f.write_str("This route has no tolls."),
            Self::AvoidsLimitedAccess => f.write_str("Limited-access highways avoided."),
            Self::AvoidsUnpaved => f.write_str("Unpaved roads avoided."),
            Self::TrafficDelay { minutes } => {
                write!(f, "Estimated traffic delay of {} min.", minutes)
            }
            Self::CostBreakdown(costs) => write!(
                f,
                "Fuel {} L, fuel ${:.2} MXN, tolls ${:.2} MXN, total ${:.2} MXN",
                costs.fuel_liters, costs.fuel_cost, costs.toll_cost, costs.total_cost
            ),
        }
    }
}

#[tracing::instrument(skip(response))]
pub fn reconcile(
    requested: &AvoidSet,
    requested_mode: TravelMode,
    response: &RouteResponse,
) -> Vec<Statement> {
    if response.travel_mode != requested_mode {
        tracing::warn!(
            "engine answered for {} although {} was requested",
            response.travel_mode.name(),
            requested_mode.name()
        );
    }

    let applied = &response.applied_avoids;
    let mut statements = vec![Statement::TravelMode(response.travel_mode)];

    statements.push(toll_statement(requested, response));

    if applied.contains(AvoidanceFlag::LimitedAccess) {
        statements.push(Statement::AvoidsLimitedAccess);
    }

    if applied.contains(AvoidanceFlag::Unpaved) {
        statements.push(Statement::AvoidsUnpaved);
    }

    for flag in requested.iter().filter(|flag| !applied.contains(*flag)) {
        tracing::debug!("requested avoidance \"{}\" not confirmed", flag.constraint());
    }

    if response.traffic_delay_minutes > 0.0 {
        statements.push(Statement::TrafficDelay {
            minutes: response.traffic_delay_minutes,
        });
    }

    if response.travel_mode.has_costs() {
        statements.push(Statement::CostBreakdown(response.costs));
    }

    statements
}

fn toll_statement(requested: &AvoidSet, response: &RouteResponse) -> Statement {
    // a confirmed avoidance wins even if has_tolls is set for a residual segment
    if requested.contains(AvoidanceFlag::TollRoad)
        && response.applied_avoids.contains(AvoidanceFlag::TollRoad)
    {
        return Statement::AvoidsTolls;
    }

    if response.has_tolls {
        return Statement::IncludesTolls {
            toll_distance_km: response.toll_distance_km,
        };
    }

    Statement::NoTolls
}

#[cfg(test)]
pub(crate) fn sample_response(travel_mode: TravelMode, applied: &[AvoidanceFlag]) -> RouteResponse {
    use crate::entities::Coordinates;

    RouteResponse {
        shape: vec![19.0, -99.0, 19.1, -99.1],
        start: Coordinates::new(19.0, -99.0).unwrap(),
        end: Coordinates::new(19.1, -99.1).unwrap(),
        travel_mode,
        applied_avoids: applied.iter().copied().collect(),
        has_tolls: false,
        toll_distance_km: 0.0,
        traffic_delay_minutes: 0.0,
        costs: Costs {
            fuel_liters: 1.5,
            fuel_cost: 36.75,
            toll_cost: 0.0,
            total_cost: 36.75,
        },
        distance_km: 18.0,
        time_minutes: 25.4,
        directions: vec!["Head north".into(), "Arrive".into()],
    }
}

#[test]
fn confirmed_toll_avoidance_beats_toll_distance_test() {
    let requested: AvoidSet = [AvoidanceFlag::TollRoad].into_iter().collect();
    let mut response = sample_response(TravelMode::Car, &[AvoidanceFlag::TollRoad]);
    response.has_tolls = true;
    response.toll_distance_km = 12.0;

    let statements = reconcile(&requested, TravelMode::Car, &response);

    let tolls: Vec<_> = statements
        .iter()
        .filter(|s| s.is_toll_statement())
        .collect();
    assert_eq!(tolls, vec![&Statement::AvoidsTolls]);
}

#[test]
fn unmet_toll_request_reports_actual_tolls_test() {
    let requested: AvoidSet = [AvoidanceFlag::TollRoad].into_iter().collect();
    let mut response = sample_response(TravelMode::Car, &[]);
    response.has_tolls = true;
    response.toll_distance_km = 12.0;

    let statements = reconcile(&requested, TravelMode::Car, &response);

    assert_eq!(
        statements[1],
        Statement::IncludesTolls {
            toll_distance_km: 12.0
        }
    );
    assert_eq!(
        statements[1].to_string(),
        "This route includes 12 km of toll road."
    );
}

#[test]
fn engine_applied_toll_without_request_is_not_phrased_as_avoidance_test() {
    let response = sample_response(TravelMode::Car, &[AvoidanceFlag::TollRoad]);

    let statements = reconcile(&AvoidSet::new(), TravelMode::Car, &response);

    assert_eq!(statements[1], Statement::NoTolls);
}

#[test]
fn no_tolls_and_no_unconfirmed_avoidance_test() {
    let requested: AvoidSet = [AvoidanceFlag::LimitedAccess, AvoidanceFlag::Unpaved]
        .into_iter()
        .collect();
    let response = sample_response(TravelMode::Car, &[]);

    let statements = reconcile(&requested, TravelMode::Car, &response);

    assert_eq!(statements[0], Statement::TravelMode(TravelMode::Car));
    assert_eq!(statements[1], Statement::NoTolls);
    assert!(!statements.contains(&Statement::AvoidsLimitedAccess));
    assert!(!statements.contains(&Statement::AvoidsUnpaved));
}

#[test]
fn engine_initiated_avoidance_is_reported_test() {
    let response = sample_response(TravelMode::Motorcycle, &[AvoidanceFlag::LimitedAccess]);

    let statements = reconcile(&AvoidSet::new(), TravelMode::Motorcycle, &response);

    assert_eq!(
        statements,
        vec![
            Statement::TravelMode(TravelMode::Motorcycle),
            Statement::NoTolls,
            Statement::AvoidsLimitedAccess,
            Statement::CostBreakdown(response.costs),
        ]
    );
}

#[test]
fn statement_order_test() {
    let requested: AvoidSet = [
        AvoidanceFlag::Unpaved,
        AvoidanceFlag::LimitedAccess,
        AvoidanceFlag::TollRoad,
    ]
    .into_iter()
    .collect();
    let mut response = sample_response(
        TravelMode::Car,
        &[
            AvoidanceFlag::Unpaved,
            AvoidanceFlag::TollRoad,
            AvoidanceFlag::LimitedAccess,
        ],
    );
    response.traffic_delay_minutes = 7.0;

    let statements = reconcile(&requested, TravelMode::Car, &response);

    assert_eq!(
        statements,
        vec![
            Statement::TravelMode(TravelMode::Car),
            Statement::AvoidsTolls,
            Statement::AvoidsLimitedAccess,
            Statement::AvoidsUnpaved,
            Statement::TrafficDelay { minutes: 7.0 },
            Statement::CostBreakdown(response.costs),
        ]
    );
}

#[test]
fn pedestrian_has_no_cost_breakdown_test() {
    let response = sample_response(TravelMode::Pedestrian, &[]);

    let statements = reconcile(&AvoidSet::new(), TravelMode::Pedestrian, &response);

    assert!(!statements
        .iter()
        .any(|s| matches!(s, Statement::CostBreakdown(_))));
}

#[test]
fn travel_mode_statement_names_reported_mode_test() {
    let response = sample_response(TravelMode::Pedestrian, &[]);

    let statements = reconcile(&AvoidSet::new(), TravelMode::Car, &response);

    assert_eq!(statements[0], Statement::TravelMode(TravelMode::Pedestrian));
    assert_eq!(statements[0].to_string(), "Travel mode: Pedestrian");
}
