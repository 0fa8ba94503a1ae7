use super::Session;

use crate::{api::InputAPI, entities::AvoidanceFlag};

impl InputAPI for Session {
    fn set_origin_text(&mut self, text: String) {
        self.origin_text = text;
    }

    fn set_destination_text(&mut self, text: String) {
        self.destination_text = text;
    }

    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    fn set_avoid(&mut self, flag: AvoidanceFlag, enabled: bool) {
        self.avoids.set(flag, enabled);
    }
}

#[test]
fn set_avoid_toggles_membership_test() {
    use crate::config::Config;

    let (mut session, _receiver) = Session::new(Config::new("http://localhost:5000/ruta"));

    session.set_avoid(AvoidanceFlag::Unpaved, true);
    session.set_avoid(AvoidanceFlag::TollRoad, true);
    session.set_avoid(AvoidanceFlag::Unpaved, false);
    session.set_avoid(AvoidanceFlag::LimitedAccess, false);

    assert_eq!(session.avoids().constraints(), vec!["toll road"]);
}
