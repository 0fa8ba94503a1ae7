mod command;
mod input_api;
mod map_api;
pub mod request;
mod route_api;
pub mod selection;
mod selection_api;

pub use command::Command;
pub use route_api::PendingCalculation;
pub use selection::{Indicators, Notification, SelectionController};

use async_channel::{Receiver, Sender};
use uuid::Uuid;

use crate::{
    api::API,
    config::Config,
    entities::{AvoidSet, MapState},
    render::Panel,
};

/// All mutable state of one user's route-planning page.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    config: Config,
    selection: SelectionController,
    origin_text: String,
    destination_text: String,
    avoids: AvoidSet,
    map: MapState,
    panel: Panel,
    notifications: Sender<Notification>,
    // sequence number of the latest calculate (or reset)
    dispatched: u64,
}

impl Session {
    #[tracing::instrument(name = "Session::new", skip_all)]
    pub fn new(config: Config) -> (Self, Receiver<Notification>) {
        let (notifications, receiver) = async_channel::unbounded();
        let map = MapState::new(config.initial_viewport());

        let session = Self {
            id: Uuid::new_v4(),
            config,
            selection: SelectionController::new(),
            origin_text: String::new(),
            destination_text: String::new(),
            avoids: AvoidSet::new(),
            map,
            panel: Panel::Empty,
            notifications,
            dispatched: 0,
        };

        tracing::info!(session_id = %session.id, "session started");

        (session, receiver)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn indicators(&self) -> Indicators {
        self.selection.indicators()
    }

    pub fn origin_text(&self) -> &str {
        &self.origin_text
    }

    pub fn destination_text(&self) -> &str {
        &self.destination_text
    }

    pub fn avoids(&self) -> &AvoidSet {
        &self.avoids
    }

    pub fn map(&self) -> &MapState {
        &self.map
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    fn notify(&self, notification: Notification) {
        if self.notifications.try_send(notification).is_err() {
            tracing::debug!("no view listening for {:?}", notification);
        }
    }
}

impl API for Session {}

#[cfg(test)]
pub(crate) struct StubEngine {
    outcome: std::sync::Mutex<Option<Result<crate::entities::RouteResponse, crate::error::Error>>>,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl StubEngine {
    pub fn new(outcome: Result<crate::entities::RouteResponse, crate::error::Error>) -> Self {
        Self {
            outcome: std::sync::Mutex::new(Some(outcome)),
            calls: Default::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl crate::api::RoutingEngine for StubEngine {
    async fn submit(
        &self,
        _request: &crate::entities::RouteRequest,
    ) -> Result<crate::entities::RouteResponse, crate::error::Error> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.outcome
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(crate::error::transport_error()))
    }
}

#[test]
fn new_session_test() {
    use crate::entities::Viewport;

    let (session, _receiver) = Session::new(Config::new("http://localhost:5000/ruta"));

    assert!(session.origin_text().is_empty());
    assert!(session.destination_text().is_empty());
    assert!(session.avoids().is_empty());
    assert!(session.map().is_clear());
    assert_eq!(session.panel(), &Panel::Empty);
    assert!(matches!(
        session.map().viewport,
        Viewport::Centered { zoom: 12, .. }
    ));
}
