use super::{request, Session};

use async_trait::async_trait;

use crate::{
    api::{RouteAPI, RoutingEngine},
    entities::{MapState, RouteRequest, RouteResponse, Viewport},
    error::Error,
    reconcile::reconcile,
    render::{render, Panel},
};

/// A calculate that has been validated and shown as loading but not yet answered.
#[derive(Clone, Debug)]
pub struct PendingCalculation {
    pub sequence: u64,
    pub request: RouteRequest,
}

impl Session {
    /// Validates the inputs and moves the session into the loading state.
    ///
    /// On a validation error the error is shown and nothing else changes.
    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    pub fn begin_calculate(&mut self) -> Result<PendingCalculation, Error> {
        let request = match request::build(
            &self.origin_text,
            &self.destination_text,
            self.selection.travel_mode(),
            &self.avoids,
        ) {
            Ok(request) => request,
            Err(err) => {
                self.panel = Panel::error(err.message.clone());
                return Err(err);
            }
        };

        self.map.clear_route_and_markers();
        self.panel = Panel::loading();
        self.dispatched += 1;

        Ok(PendingCalculation {
            sequence: self.dispatched,
            request,
        })
    }

    /// Applies the engine outcome of `pending`. Returns false when the outcome
    /// was dropped as stale.
    #[tracing::instrument(skip(self, outcome), fields(session_id = %self.id))]
    pub fn finish_calculate(
        &mut self,
        pending: PendingCalculation,
        outcome: Result<RouteResponse, Error>,
    ) -> bool {
        if self.config.reject_stale_responses && pending.sequence < self.dispatched {
            tracing::debug!(
                "dropping response {} superseded by {}",
                pending.sequence,
                self.dispatched
            );
            return false;
        }

        match outcome {
            Ok(response) => {
                let statements = reconcile(
                    pending.request.avoids(),
                    pending.request.travel_mode(),
                    &response,
                );
                let display = render(statements, response);

                self.map.provisional_markers.clear();
                self.map.route = Some(display.route);
                self.map.origin_marker = Some(display.origin);
                self.map.destination_marker = Some(display.destination);
                if let Some(fit) = display.fit {
                    self.map.viewport = Viewport::Fitted(fit);
                }
                self.panel = Panel::Result(display.panel);
            }
            Err(err) => {
                tracing::info!("route calculation failed: {}", err);
                self.map.clear_route_and_markers();
                self.panel = Panel::error(err.message);
            }
        }

        true
    }
}

#[async_trait]
impl RouteAPI for Session {
    async fn calculate(&mut self, engine: &dyn RoutingEngine) {
        let pending = match self.begin_calculate() {
            Ok(pending) => pending,
            Err(_) => return,
        };

        let outcome = engine.submit(&pending.request).await;

        self.finish_calculate(pending, outcome);
    }

    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    fn reset(&mut self) {
        self.origin_text.clear();
        self.destination_text.clear();
        self.avoids.clear();
        self.panel = Panel::Empty;
        self.map = MapState::new(self.config.initial_viewport());
        // anything still in flight now belongs to an older sequence
        self.dispatched += 1;
    }
}

#[cfg(test)]
fn ready_session(config: crate::config::Config) -> Session {
    use crate::api::{InputAPI, MapAPI, SelectionAPI};
    use crate::entities::{AvoidanceFlag, Coordinates, SelectionMode};

    let (mut session, _receiver) = Session::new(config);
    session.map_clicked(Coordinates::new(19.0, -99.0).unwrap());
    session.set_mode(SelectionMode::Destination);
    session.map_clicked(Coordinates::new(19.1, -99.1).unwrap());
    session.set_avoid(AvoidanceFlag::TollRoad, true);
    session
}

#[cfg(test)]
fn test_config() -> crate::config::Config {
    crate::config::Config::new("http://localhost:5000/ruta")
}

#[test]
fn calculate_draws_route_test() {
    use super::StubEngine;
    use crate::entities::{AvoidanceFlag, MarkerRole, TravelMode};
    use crate::reconcile::sample_response;
    use tokio_test::block_on;

    let mut session = ready_session(test_config());
    let engine = StubEngine::new(Ok(sample_response(
        TravelMode::Car,
        &[AvoidanceFlag::TollRoad],
    )));

    block_on(session.calculate(&engine));

    assert_eq!(engine.calls(), 1);
    assert!(session.map().provisional_markers.is_empty());
    assert_eq!(
        session.map().origin_marker.map(|m| m.role),
        Some(MarkerRole::Origin)
    );
    assert_eq!(
        session.map().destination_marker.map(|m| m.role),
        Some(MarkerRole::Destination)
    );
    assert_eq!(session.map().markers().count(), 2);
    assert!(session.map().route.is_some());
    assert!(matches!(session.map().viewport, Viewport::Fitted(_)));

    match session.panel() {
        Panel::Result(panel) => {
            assert_eq!(panel.applied_options[1], "Route calculated avoiding tolls.");
            assert_eq!(panel.directions.len(), 2);
        }
        other => panic!("unexpected panel {:?}", other),
    }
}

#[test]
fn missing_endpoint_makes_no_call_test() {
    use super::StubEngine;
    use crate::api::InputAPI;
    use crate::entities::TravelMode;
    use crate::error::MISSING_ENDPOINT_MESSAGE;
    use crate::reconcile::sample_response;
    use tokio_test::block_on;

    let mut session = ready_session(test_config());
    session.set_destination_text("   ".into());
    let engine = StubEngine::new(Ok(sample_response(TravelMode::Car, &[])));

    block_on(session.calculate(&engine));

    assert_eq!(engine.calls(), 0);
    assert_eq!(session.panel(), &Panel::error(MISSING_ENDPOINT_MESSAGE));
    // validation failures leave the map alone
    assert_eq!(session.map().provisional_markers.len(), 2);
}

#[test]
fn transport_failure_replaces_previous_result_test() {
    use super::StubEngine;
    use crate::entities::TravelMode;
    use crate::error::{transport_error, TRANSPORT_FALLBACK_MESSAGE};
    use crate::reconcile::sample_response;
    use tokio_test::block_on;

    let mut session = ready_session(test_config());

    block_on(session.calculate(&StubEngine::new(Ok(sample_response(TravelMode::Car, &[])))));
    assert!(session.panel().is_result());

    block_on(session.calculate(&StubEngine::new(Err(transport_error()))));

    assert_eq!(session.panel(), &Panel::error(TRANSPORT_FALLBACK_MESSAGE));
    assert!(session.map().route.is_none());
    assert!(session.map().origin_marker.is_none());
    assert!(session.map().destination_marker.is_none());
}

#[test]
fn engine_error_is_shown_verbatim_test() {
    use super::StubEngine;
    use crate::error::engine_error;
    use tokio_test::block_on;

    let mut session = ready_session(test_config());

    block_on(session.calculate(&StubEngine::new(Err(engine_error(
        "Origen inválido: Coordenadas fuera de rango.".into(),
    )))));

    assert_eq!(
        session.panel(),
        &Panel::error("Origen inválido: Coordenadas fuera de rango.")
    );
}

#[test]
fn loading_is_shown_while_in_flight_test() {
    let mut session = ready_session(test_config());

    let pending = session.begin_calculate().unwrap();

    assert!(session.panel().is_loading());
    assert!(session.map().route.is_none());
    // provisional markers survive until a route is drawn
    assert_eq!(session.map().provisional_markers.len(), 2);
    assert_eq!(pending.request.avoids().constraints(), vec!["toll road"]);
}

#[test]
fn last_finished_response_wins_test() {
    use super::StubEngine;
    use crate::entities::TravelMode;
    use crate::reconcile::sample_response;
    use futures::future::join;
    use tokio_test::block_on;

    let mut session = ready_session(test_config());
    let slow = StubEngine::new(Ok(sample_response(TravelMode::Pedestrian, &[])));
    let fast = StubEngine::new(Ok(sample_response(TravelMode::Car, &[])));

    let first = session.begin_calculate().unwrap();
    let second = session.begin_calculate().unwrap();
    assert!(second.sequence > first.sequence);

    let (first_outcome, second_outcome) = block_on(join(
        slow.submit(&first.request),
        fast.submit(&second.request),
    ));

    assert!(session.finish_calculate(second, second_outcome));
    assert!(session.finish_calculate(first, first_outcome));

    assert_eq!(session.map().route.as_ref().unwrap().color, "#4cc9f0");
}

#[test]
fn stale_response_is_dropped_when_configured_test() {
    use crate::entities::TravelMode;
    use crate::reconcile::sample_response;

    let mut config = test_config();
    config.reject_stale_responses = true;
    let mut session = ready_session(config);

    let first = session.begin_calculate().unwrap();
    let second = session.begin_calculate().unwrap();

    assert!(session.finish_calculate(second, Ok(sample_response(TravelMode::Car, &[]))));
    assert!(!session.finish_calculate(
        first,
        Ok(sample_response(TravelMode::Pedestrian, &[]))
    ));

    assert_eq!(session.map().route.as_ref().unwrap().color, "#4361ee");
}

#[test]
fn reset_clears_everything_test() {
    use super::StubEngine;
    use crate::api::MapAPI;
    use crate::entities::{Coordinates, SelectionMode, TravelMode};
    use crate::reconcile::sample_response;
    use tokio_test::block_on;

    let mut session = ready_session(test_config());
    block_on(session.calculate(&StubEngine::new(Ok(sample_response(TravelMode::Car, &[])))));
    session.map_clicked(Coordinates::new(19.2, -99.2).unwrap());

    session.reset();

    assert!(session.origin_text().is_empty());
    assert!(session.destination_text().is_empty());
    assert!(session.avoids().is_empty());
    assert_eq!(session.panel(), &Panel::Empty);
    assert!(session.map().is_clear());
    assert_eq!(session.map().viewport, test_config().initial_viewport());
    // modes are not part of the reset
    assert_eq!(session.selection().mode(), SelectionMode::Destination);
}

#[test]
fn reset_discards_in_flight_response_when_configured_test() {
    use crate::entities::TravelMode;
    use crate::reconcile::sample_response;

    let mut config = test_config();
    config.reject_stale_responses = true;
    let mut session = ready_session(config);

    let pending = session.begin_calculate().unwrap();
    session.reset();

    assert!(!session.finish_calculate(pending, Ok(sample_response(TravelMode::Car, &[]))));
    assert!(session.map().is_clear());
    assert_eq!(session.panel(), &Panel::Empty);
}
