use super::Session;

use crate::{
    api::SelectionAPI,
    entities::{SelectionMode, TravelMode},
};

impl SelectionAPI for Session {
    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    fn set_mode(&mut self, mode: SelectionMode) {
        let notification = self.selection.set_mode(mode);
        self.notify(notification);
    }

    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    fn set_travel_mode(&mut self, mode: TravelMode) {
        let notification = self.selection.set_travel_mode(mode);
        self.notify(notification);
    }
}

#[test]
fn set_mode_notifies_view_test() {
    use super::Notification;
    use crate::config::Config;

    let (mut session, receiver) = Session::new(Config::new("http://localhost:5000/ruta"));

    session.set_mode(SelectionMode::Destination);
    session.set_mode(SelectionMode::Destination);
    session.set_travel_mode(TravelMode::Pedestrian);

    assert_eq!(
        receiver.try_recv().unwrap(),
        Notification::SelectionModeChanged(SelectionMode::Destination)
    );
    assert_eq!(
        receiver.try_recv().unwrap(),
        Notification::SelectionModeChanged(SelectionMode::Destination)
    );
    assert_eq!(
        receiver.try_recv().unwrap(),
        Notification::TravelModeChanged(TravelMode::Pedestrian)
    );
    assert!(receiver.try_recv().is_err());

    assert_eq!(session.selection().mode(), SelectionMode::Destination);
    assert_eq!(session.selection().travel_mode(), TravelMode::Pedestrian);
}

#[test]
fn set_mode_without_listener_test() {
    use crate::config::Config;

    let (mut session, receiver) = Session::new(Config::new("http://localhost:5000/ruta"));
    drop(receiver);

    session.set_mode(SelectionMode::Destination);

    assert_eq!(session.selection().mode(), SelectionMode::Destination);
}
