use super::Session;

use crate::{
    api::{InputAPI, MapAPI, RouteAPI, RoutingEngine, SelectionAPI},
    entities::{AvoidanceFlag, Coordinates, SelectionMode, TravelMode},
};

/// Typed UI events consumed by [`Session::dispatch`].
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    SetMode(SelectionMode),
    SetTravelMode(TravelMode),
    SetOriginText(String),
    SetDestinationText(String),
    SetAvoid(AvoidanceFlag, bool),
    MapClicked(Coordinates),
    Calculate,
    Reset,
}

impl Session {
    pub async fn dispatch(&mut self, engine: &dyn RoutingEngine, command: Command) {
        tracing::debug!(session_id = %self.id, "dispatching {:?}", command);

        match command {
            Command::SetMode(mode) => self.set_mode(mode),
            Command::SetTravelMode(mode) => self.set_travel_mode(mode),
            Command::SetOriginText(text) => self.set_origin_text(text),
            Command::SetDestinationText(text) => self.set_destination_text(text),
            Command::SetAvoid(flag, enabled) => self.set_avoid(flag, enabled),
            Command::MapClicked(coordinates) => self.map_clicked(coordinates),
            Command::Calculate => self.calculate(engine).await,
            Command::Reset => self.reset(),
        }
    }
}

#[test]
fn dispatch_full_flow_test() {
    use super::StubEngine;
    use crate::config::Config;
    use crate::reconcile::sample_response;
    use crate::render::Panel;
    use tokio_test::block_on;

    let (mut session, _receiver) = Session::new(Config::new("http://localhost:5000/ruta"));
    let engine = StubEngine::new(Ok(sample_response(TravelMode::Pedestrian, &[])));

    let commands = vec![
        Command::SetOriginText("Zócalo, CDMX".into()),
        Command::SetMode(SelectionMode::Destination),
        Command::MapClicked(Coordinates::new(19.432601, -99.133298).unwrap()),
        Command::SetTravelMode(TravelMode::Pedestrian),
        Command::SetAvoid(AvoidanceFlag::Unpaved, true),
        Command::Calculate,
    ];

    block_on(async {
        for command in commands {
            session.dispatch(&engine, command).await;
        }
    });

    assert_eq!(session.destination_text(), "19.432601,-99.133298");
    assert_eq!(engine.calls(), 1);

    match session.panel() {
        Panel::Result(panel) => {
            assert_eq!(panel.applied_options[0], "Travel mode: Pedestrian");
            // unconfirmed by the engine, so not claimed
            assert!(!panel
                .applied_options
                .iter()
                .any(|line| line.contains("Unpaved")));
            assert_eq!(panel.summary.len(), 2);
        }
        other => panic!("unexpected panel {:?}", other),
    }

    block_on(session.dispatch(&engine, Command::Reset));

    assert!(session.map().is_clear());
    assert!(session.origin_text().is_empty());
    assert!(session.avoids().is_empty());
}
