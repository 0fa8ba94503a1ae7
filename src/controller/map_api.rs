use super::Session;

use crate::{
    api::MapAPI,
    entities::{Coordinates, Marker, MarkerRole, SelectionMode},
};

impl MapAPI for Session {
    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    fn map_clicked(&mut self, coordinates: Coordinates) {
        let text = coordinates.to_string();

        match self.selection.mode() {
            SelectionMode::Origin => self.origin_text = text,
            SelectionMode::Destination => self.destination_text = text,
        }

        self.map
            .provisional_markers
            .push(Marker::new(coordinates, MarkerRole::Provisional));
    }
}

#[test]
fn click_fills_active_endpoint_test() {
    use crate::api::SelectionAPI;
    use crate::config::Config;

    let (mut session, _receiver) = Session::new(Config::new("http://localhost:5000/ruta"));

    session.map_clicked(Coordinates::new(19.432601, -99.133298).unwrap());
    assert_eq!(session.origin_text(), "19.432601,-99.133298");
    assert!(session.destination_text().is_empty());

    session.set_mode(SelectionMode::Destination);
    session.map_clicked(Coordinates::new(19.0414, -98.2063).unwrap());
    assert_eq!(session.origin_text(), "19.432601,-99.133298");
    assert_eq!(session.destination_text(), "19.041400,-98.206300");

    session.map_clicked(Coordinates::new(19.05, -98.2).unwrap());
    assert_eq!(session.destination_text(), "19.050000,-98.200000");
}

#[test]
fn provisional_markers_accumulate_test() {
    use crate::api::SelectionAPI;
    use crate::config::Config;

    let (mut session, _receiver) = Session::new(Config::new("http://localhost:5000/ruta"));

    for i in 0..5 {
        if i % 2 == 1 {
            session.set_mode(SelectionMode::Destination);
        }
        session.map_clicked(Coordinates::new(19.0 + i as f64 * 0.01, -99.0).unwrap());
    }

    let markers = &session.map().provisional_markers;
    assert_eq!(markers.len(), 5);
    assert!(markers.iter().all(|m| m.role == MarkerRole::Provisional));
    assert!(session.map().route.is_none());
}
